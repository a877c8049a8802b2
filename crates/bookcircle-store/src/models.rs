//! Domain model structs held in the entity graph.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be
//! written into the snapshot record as-is. Relations are id
//! references; the joined shapes the UI reads are built in
//! [`crate::views`].

use std::collections::HashSet;

use bookcircle_shared::{
    BookFormat, BookId, ChatId, MessageId, MessageKind, RequestId, RequestStatus, UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A user account, either the session's own or a book owner known from
/// the seeded catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Display name shown next to books, requests and messages.
    pub name: String,
    pub email: String,
    /// Avatar image reference (placeholder URL in this build).
    pub avatar_url: String,
    /// Free-text location, e.g. "New York, NY".
    pub location: String,
    /// Community reputation, 0.0–5.0.
    pub rating: f32,
    /// Number of books this user currently shares.
    pub books_shared: u32,
    /// Number of books this user has received from others.
    pub books_received: u32,
    pub joined_at: DateTime<Utc>,
}

impl User {
    /// The synthetic sender of auto-generated chat-opening messages:
    /// an empty record under the reserved system id.
    pub fn system() -> Self {
        Self {
            id: UserId::SYSTEM,
            name: "System".to_string(),
            email: String::new(),
            avatar_url: String::new(),
            location: String::new(),
            rating: 0.0,
            books_shared: 0,
            books_received: 0,
            joined_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

// ---------------------------------------------------------------------------
// Book
// ---------------------------------------------------------------------------

/// A listed book. `owner_id` is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub format: BookFormat,
    /// Free text; a fixed suggestion list lives in the shared crate.
    pub genre: String,
    pub language: String,
    /// Cover image reference (placeholder URL in this build).
    pub cover_url: String,
    pub owner_id: UserId,
    /// Displayed like total: seeded baseline plus per-user toggles.
    pub likes: u32,
    /// Users who have liked this book in this session's store. Guards
    /// like-toggling against double counting.
    #[serde(default)]
    pub liked_by: HashSet<UserId>,
    /// How many borrow requests this book has received.
    pub request_count: u32,
    /// Distance from the owner in kilometres, where known.
    pub distance_km: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub is_available: bool,
}

/// Input for listing a new book. Id, owner, counters and timestamps
/// are stamped by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: String,
    pub format: BookFormat,
    pub genre: String,
    pub language: String,
    pub cover_url: String,
    pub distance_km: Option<f64>,
}

/// Partial update merged into an existing book. `None` fields are left
/// untouched; the owner can never change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub format: Option<BookFormat>,
    pub genre: Option<String>,
    pub language: Option<String>,
    pub cover_url: Option<String>,
    pub distance_km: Option<f64>,
    pub is_available: Option<bool>,
}

impl BookPatch {
    pub fn apply(&self, book: &mut Book) {
        if let Some(v) = &self.title {
            book.title = v.clone();
        }
        if let Some(v) = &self.author {
            book.author = v.clone();
        }
        if let Some(v) = &self.description {
            book.description = v.clone();
        }
        if let Some(v) = self.format {
            book.format = v;
        }
        if let Some(v) = &self.genre {
            book.genre = v.clone();
        }
        if let Some(v) = &self.language {
            book.language = v.clone();
        }
        if let Some(v) = &self.cover_url {
            book.cover_url = v.clone();
        }
        if let Some(v) = self.distance_km {
            book.distance_km = Some(v);
        }
        if let Some(v) = self.is_available {
            book.is_available = v;
        }
    }
}

// ---------------------------------------------------------------------------
// BookRequest
// ---------------------------------------------------------------------------

/// A borrow request from `requester_id` to the owner of `book_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub id: RequestId,
    pub book_id: BookId,
    pub requester_id: UserId,
    pub owner_id: UserId,
    /// Free-text note the requester attached.
    pub message: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// A conversation between a requester and a book owner, opened when a
/// request is accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: ChatId,
    pub book_id: BookId,
    /// Requester first, owner second.
    pub participant_ids: [UserId; 2],
    /// Message ids in send order; the newest is the last element.
    pub message_ids: Vec<MessageId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub chat_id: ChatId,
    /// [`UserId::SYSTEM`] for auto-generated messages.
    pub sender_id: UserId,
    pub content: String,
    pub kind: MessageKind,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_leaves_unset_fields_untouched() {
        let mut book = crate::seed::seed_books().remove(0);
        let title_before = book.title.clone();
        let owner_before = book.owner_id;

        let patch = BookPatch {
            is_available: Some(false),
            ..Default::default()
        };
        patch.apply(&mut book);

        assert!(!book.is_available);
        assert_eq!(book.title, title_before);
        assert_eq!(book.owner_id, owner_before);
    }

    #[test]
    fn system_user_has_reserved_id() {
        let sys = User::system();
        assert!(sys.id.is_system());
        assert!(sys.email.is_empty());
        assert_eq!(sys.rating, 0.0);
    }
}
