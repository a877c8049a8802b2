//! Read-side derivation layer.
//!
//! The entity graph stores relations as ids; these views reconstruct
//! the joined shapes the UI consumes — a book carrying its owner, a
//! request carrying its book and both participants, a chat carrying
//! its resolved messages. Because the join happens on read, edits to a
//! user or book propagate everywhere instead of going stale.
//!
//! Views serialize `camelCase` and are handed to UI consumers as-is.
//! Entries whose referenced book or user no longer resolves are
//! dropped from listings rather than surfaced half-joined.

use bookcircle_shared::{
    BookFormat, BookId, ChatId, MessageId, RequestId, RequestStatus, UserId,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Book, BookRequest, Chat, Message, User};
use crate::store::Store;

/// A catalog entry joined with its owner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookView {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub format: BookFormat,
    pub genre: String,
    pub language: String,
    pub cover_url: String,
    pub owner: User,
    pub likes: u32,
    /// Whether the session user has liked this book.
    pub liked_by_me: bool,
    pub request_count: u32,
    pub distance_km: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub is_available: bool,
}

/// A borrow request joined with its book and both participants.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestView {
    pub id: RequestId,
    pub book: BookView,
    pub requester: User,
    pub owner: User,
    pub message: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A chat message with its sender resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: MessageId,
    pub chat_id: ChatId,
    pub sender: User,
    pub content: String,
    pub kind: bookcircle_shared::MessageKind,
    pub created_at: DateTime<Utc>,
}

/// A chat joined with its book, participants and message history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatView {
    pub id: ChatId,
    pub book: BookView,
    pub participants: Vec<User>,
    pub messages: Vec<MessageView>,
    pub last_message: Option<MessageView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    fn join_book(&self, book: &Book) -> Option<BookView> {
        let owner = self.graph().users.get(&book.owner_id)?.clone();
        let liked_by_me = self
            .session_user_id()
            .map(|id| book.liked_by.contains(&id))
            .unwrap_or(false);
        Some(BookView {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            format: book.format,
            genre: book.genre.clone(),
            language: book.language.clone(),
            cover_url: book.cover_url.clone(),
            owner,
            likes: book.likes,
            liked_by_me,
            request_count: book.request_count,
            distance_km: book.distance_km,
            created_at: book.created_at,
            is_available: book.is_available,
        })
    }

    fn join_request(&self, request: &BookRequest) -> Option<RequestView> {
        let book = self.graph().books.get(&request.book_id)?;
        Some(RequestView {
            id: request.id,
            book: self.join_book(book)?,
            requester: self.graph().users.get(&request.requester_id)?.clone(),
            owner: self.graph().users.get(&request.owner_id)?.clone(),
            message: request.message.clone(),
            status: request.status,
            created_at: request.created_at,
            updated_at: request.updated_at,
        })
    }

    fn join_message(&self, message: &Message) -> Option<MessageView> {
        let sender = if message.sender_id.is_system() {
            User::system()
        } else {
            self.graph().users.get(&message.sender_id)?.clone()
        };
        Some(MessageView {
            id: message.id,
            chat_id: message.chat_id,
            sender,
            content: message.content.clone(),
            kind: message.kind,
            created_at: message.created_at,
        })
    }

    fn join_chat(&self, chat: &Chat) -> Option<ChatView> {
        let book = self.graph().books.get(&chat.book_id)?;
        let participants: Vec<User> = chat
            .participant_ids
            .iter()
            .filter_map(|id| self.graph().users.get(id).cloned())
            .collect();
        let messages: Vec<MessageView> = chat
            .message_ids
            .iter()
            .filter_map(|id| self.graph().messages.get(id))
            .filter_map(|m| self.join_message(m))
            .collect();
        Some(ChatView {
            id: chat.id,
            book: self.join_book(book)?,
            participants,
            last_message: messages.last().cloned(),
            messages,
            created_at: chat.created_at,
            updated_at: chat.updated_at,
        })
    }

    /// The shared catalog, newest listing first.
    pub fn catalog(&self) -> Vec<BookView> {
        self.graph()
            .catalog
            .iter()
            .filter_map(|id| self.graph().books.get(id))
            .filter_map(|b| self.join_book(b))
            .collect()
    }

    /// The session user's own listings, newest first. Empty without a
    /// session.
    pub fn my_books(&self) -> Vec<BookView> {
        let Some(session) = self.session_user_id() else {
            return Vec::new();
        };
        self.graph()
            .catalog
            .iter()
            .filter_map(|id| self.graph().books.get(id))
            .filter(|b| b.owner_id == session)
            .filter_map(|b| self.join_book(b))
            .collect()
    }

    pub fn book(&self, id: BookId) -> Option<BookView> {
        self.graph().books.get(&id).and_then(|b| self.join_book(b))
    }

    /// Requests the session user has sent, newest first.
    pub fn sent_requests(&self) -> Vec<RequestView> {
        self.requests_where(|r, session| r.requester_id == session)
    }

    /// Requests addressed to the session user, newest first.
    pub fn received_requests(&self) -> Vec<RequestView> {
        self.requests_where(|r, session| r.owner_id == session)
    }

    fn requests_where(&self, pred: impl Fn(&BookRequest, UserId) -> bool) -> Vec<RequestView> {
        let Some(session) = self.session_user_id() else {
            return Vec::new();
        };
        self.graph()
            .request_order
            .iter()
            .filter_map(|id| self.graph().requests.get(id))
            .filter(|r| pred(r, session))
            .filter_map(|r| self.join_request(r))
            .collect()
    }

    pub fn request(&self, id: RequestId) -> Option<RequestView> {
        self.graph()
            .requests
            .get(&id)
            .and_then(|r| self.join_request(r))
    }

    /// All open chats, newest first.
    pub fn chats(&self) -> Vec<ChatView> {
        self.graph()
            .chat_order
            .iter()
            .filter_map(|id| self.graph().chats.get(id))
            .filter_map(|c| self.join_chat(c))
            .collect()
    }

    pub fn chat(&self, id: ChatId) -> Option<ChatView> {
        self.graph().chats.get(&id).and_then(|c| self.join_chat(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookPatch;
    use crate::store::Store;

    #[test]
    fn catalog_reflects_seed_order() {
        let store = Store::in_memory();
        let titles: Vec<_> = store.catalog().iter().map(|b| b.title.clone()).collect();
        assert_eq!(titles, vec!["The Great Gatsby", "Dune", "Sapiens"]);
    }

    #[test]
    fn views_join_live_owner_records() {
        let mut store = Store::in_memory();
        let sarah = store.catalog()[0].owner.clone();
        assert_eq!(sarah.name, "Sarah Johnson");

        // An owner edit is visible through the book view on the next
        // read, because nothing is embedded by value.
        store.login(sarah);
        let mine = store.my_books();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "The Great Gatsby");
    }

    #[test]
    fn owner_edits_propagate_into_request_views() {
        let mut store = Store::in_memory();
        let requester = crate::seed::seed_users().remove(2); // Emma
        store.login(requester);
        let dune = store
            .catalog()
            .into_iter()
            .find(|b| b.title == "Dune")
            .unwrap();
        store.send_request(dune.id, "trade?").unwrap();

        // Retitle the book after the request was created.
        let patch = BookPatch {
            title: Some("Dune (Deluxe)".to_string()),
            ..Default::default()
        };
        store.update_book(dune.id, &patch);

        let sent = store.sent_requests();
        assert_eq!(sent[0].book.title, "Dune (Deluxe)");
    }

    #[test]
    fn requests_for_deleted_books_are_dropped_from_listings() {
        let mut store = Store::in_memory();
        store.login(crate::seed::seed_users().remove(2));
        let dune = store
            .catalog()
            .into_iter()
            .find(|b| b.title == "Dune")
            .unwrap();
        store.send_request(dune.id, "trade?").unwrap();
        assert_eq!(store.sent_requests().len(), 1);

        store.delete_book(dune.id);
        assert!(store.sent_requests().is_empty());
    }

    #[test]
    fn views_without_a_session_are_empty() {
        let store = Store::in_memory();
        assert!(store.my_books().is_empty());
        assert!(store.sent_requests().is_empty());
        assert!(store.received_requests().is_empty());
    }
}
