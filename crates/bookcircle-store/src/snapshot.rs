//! Single-record JSON persistence.
//!
//! The persisted subset is the session record: identity,
//! the authenticated flag, the session user's own listings, both
//! request directions, and chats with their messages — plus the
//! referenced user records the normalized graph needs to re-join them.
//! The shared catalog and the notification counter are intentionally
//! excluded and reseeded on load.
//!
//! Saves are full-state and fire-and-forget; there is no partial-write
//! protection or cross-process coordination. The last writer wins.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use bookcircle_shared::constants::STORAGE_FILE;
use bookcircle_shared::UserId;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::graph::EntityGraph;
use crate::models::{Book, BookRequest, Chat, Message, User};
use crate::store::Store;

/// The on-disk record. One JSON document under one storage file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Record layout version.
    pub version: u32,
    pub user: Option<User>,
    pub is_authenticated: bool,
    /// Counterparty user records referenced by the lists below.
    pub users: Vec<User>,
    pub my_books: Vec<Book>,
    pub sent_requests: Vec<BookRequest>,
    pub received_requests: Vec<BookRequest>,
    pub chats: Vec<Chat>,
    pub messages: Vec<Message>,
}

pub const SNAPSHOT_VERSION: u32 = 1;

impl Snapshot {
    /// Capture the persisted subset of the store.
    pub fn capture(store: &Store) -> Self {
        let graph = store.graph();
        let session = store.session_user_id();
        let user = store.current_user().cloned();

        let my_books: Vec<Book> = graph
            .catalog
            .iter()
            .filter_map(|id| graph.books.get(id))
            .filter(|b| Some(b.owner_id) == session)
            .cloned()
            .collect();

        let requests = |mine: fn(&BookRequest, UserId) -> bool| -> Vec<BookRequest> {
            let Some(session) = session else {
                return Vec::new();
            };
            graph
                .request_order
                .iter()
                .filter_map(|id| graph.requests.get(id))
                .filter(|r| mine(r, session))
                .cloned()
                .collect()
        };
        let sent_requests = requests(|r, s| r.requester_id == s);
        let received_requests = requests(|r, s| r.owner_id == s);

        let chats: Vec<Chat> = graph
            .chat_order
            .iter()
            .filter_map(|id| graph.chats.get(id))
            .cloned()
            .collect();
        let messages: Vec<Message> = chats
            .iter()
            .flat_map(|c| c.message_ids.iter())
            .filter_map(|id| graph.messages.get(id))
            .cloned()
            .collect();

        // Every user the persisted lists reference, so joins resolve
        // again after the catalog reseed.
        let mut referenced: BTreeSet<UserId> = BTreeSet::new();
        for r in sent_requests.iter().chain(&received_requests) {
            referenced.insert(r.requester_id);
            referenced.insert(r.owner_id);
        }
        for c in &chats {
            referenced.extend(c.participant_ids);
        }
        let users: Vec<User> = referenced
            .into_iter()
            .filter(|id| !id.is_system() && Some(*id) != session)
            .filter_map(|id| graph.users.get(&id).cloned())
            .collect();

        Self {
            version: SNAPSHOT_VERSION,
            is_authenticated: user.is_some(),
            user,
            users,
            my_books,
            sent_requests,
            received_requests,
            chats,
            messages,
        }
    }
}

impl EntityGraph {
    /// Merge a snapshot into a freshly seeded graph.
    pub fn apply(&mut self, snap: &Snapshot) {
        for user in &snap.users {
            self.upsert_user(user.clone());
        }
        if let Some(user) = &snap.user {
            self.upsert_user(user.clone());
        }

        // insert_* prepend, so feed each newest-first list in reverse
        // to restore its order in front of the seeds.
        for book in snap.my_books.iter().rev() {
            self.insert_book(book.clone());
        }

        let mut requests: Vec<BookRequest> = snap
            .sent_requests
            .iter()
            .chain(&snap.received_requests)
            .cloned()
            .collect();
        requests.sort_by_key(|r| r.created_at);
        for request in requests {
            self.insert_request(request);
        }

        for message in &snap.messages {
            self.insert_message(message.clone());
        }
        for chat in snap.chats.iter().rev() {
            self.insert_chat(chat.clone());
        }
    }
}

/// Platform-appropriate location of the storage record:
/// - Linux:   `~/.local/share/bookcircle/bookcircle-storage.json`
/// - macOS:   `~/Library/Application Support/com.bookcircle.bookcircle/…`
/// - Windows: `{FOLDERID_RoamingAppData}\bookcircle\bookcircle\data\…`
pub fn default_storage_file() -> Result<PathBuf> {
    let project_dirs =
        ProjectDirs::from("com", "bookcircle", "bookcircle").ok_or(StoreError::NoDataDir)?;
    let data_dir = project_dirs.data_dir();
    fs::create_dir_all(data_dir)?;
    Ok(data_dir.join(STORAGE_FILE))
}

/// Write the record, creating parent directories as needed.
pub fn save(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_vec_pretty(snapshot)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read the record. A missing file is a fresh install; an unreadable
/// record is discarded rather than blocking startup.
pub fn load(path: &Path) -> Result<Option<Snapshot>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    match serde_json::from_str(&content) {
        Ok(snap) => Ok(Some(snap)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "discarding unreadable snapshot");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookcircle_shared::constants::DEFAULT_NOTIFICATIONS;
    use bookcircle_shared::{BookFormat, RequestDecision};
    use chrono::Utc;

    use crate::models::NewBook;
    use crate::store::RequestOutcome;

    fn test_user(name: &str) -> User {
        User {
            id: UserId::new(),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            avatar_url: String::new(),
            location: "Testville".to_string(),
            rating: 4.5,
            books_shared: 0,
            books_received: 0,
            joined_at: Utc::now(),
        }
    }

    fn draft(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Anon".to_string(),
            description: String::new(),
            format: BookFormat::Pdf,
            genre: "Fiction".to_string(),
            language: "English".to_string(),
            cover_url: String::new(),
            distance_km: None,
        }
    }

    #[test]
    fn round_trip_restores_the_session_subset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);

        let alice = test_user("Alice");
        {
            let mut store = Store::open_at(&path).unwrap();
            store.login(alice.clone());
            store.add_book(draft("My Book")).unwrap();
            let dune = store
                .catalog()
                .into_iter()
                .find(|b| b.title == "Dune")
                .unwrap();
            store.send_request(dune.id, "please").unwrap();
            store.set_notifications(9);
        }

        let store = Store::open_at(&path).unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.current_user().unwrap().name, "Alice");

        // Own book restored in front of the reseeded catalog.
        assert_eq!(store.my_books().len(), 1);
        assert_eq!(store.catalog().len(), 4);
        assert_eq!(store.catalog()[0].title, "My Book");

        // Sent request still joins against the reseeded book/owner.
        let sent = store.sent_requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].book.title, "Dune");
        assert_eq!(sent[0].owner.name, "Mike Chen");

        // Notifications are not persisted.
        assert_eq!(store.notification_count(), DEFAULT_NOTIFICATIONS);
    }

    #[test]
    fn chats_survive_reload_with_their_messages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);

        let owner = test_user("Owner");
        let requester = test_user("Requester");
        {
            let mut store = Store::open_at(&path).unwrap();
            store.login(owner.clone());
            let book_id = store.add_book(draft("Lent Out")).unwrap();
            store.login(requester.clone());
            let request_id = store.send_request(book_id, "hi").unwrap();
            store.login(owner.clone());
            let Some(RequestOutcome::Accepted { chat_id }) =
                store.respond_to_request(request_id, RequestDecision::Accepted)
            else {
                panic!("accept failed");
            };
            store.send_message(chat_id, "pick it up anytime").unwrap();
        }

        let store = Store::open_at(&path).unwrap();
        let chats = store.chats();
        assert_eq!(chats.len(), 1);
        assert_eq!(chats[0].messages.len(), 2);
        assert_eq!(
            chats[0].last_message.as_ref().unwrap().content,
            "pick it up anytime"
        );
        assert_eq!(chats[0].book.title, "Lent Out");
    }

    #[test]
    fn logout_persists_a_cleared_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);

        {
            let mut store = Store::open_at(&path).unwrap();
            store.login(test_user("Alice"));
            store.add_book(draft("Ephemeral")).unwrap();
            store.logout();
        }

        let store = Store::open_at(&path).unwrap();
        assert!(!store.is_authenticated());
        assert!(store.my_books().is_empty());
        // Only the seeds come back: the cleared record had no session,
        // so the earlier listing was not part of the persisted subset.
        assert_eq!(store.catalog().len(), 3);
        assert!(store.sent_requests().is_empty());
        assert!(store.chats().is_empty());
    }

    #[test]
    fn unreadable_snapshot_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);
        fs::write(&path, b"{ not json").unwrap();

        let store = Store::open_at(&path).unwrap();
        assert!(!store.is_authenticated());
        assert_eq!(store.catalog().len(), 3);
    }
}
