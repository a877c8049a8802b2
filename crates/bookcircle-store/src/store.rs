//! The application state store: session identity, the entity graph,
//! and the action functions that are its only mutation surface.
//!
//! Every action runs synchronously to completion. Calls with a missing
//! precondition (no session, unknown id, non-forward status change)
//! are no-ops; the return value reports whether anything happened.
//! Successful mutations trigger a fire-and-forget snapshot save —
//! persistence failures are logged, never propagated.

use std::path::{Path, PathBuf};

use bookcircle_shared::constants::DEFAULT_NOTIFICATIONS;
use bookcircle_shared::{
    BookId, ChatId, MessageId, MessageKind, RequestDecision, RequestId, RequestStatus, UserId,
};
use chrono::Utc;

use crate::error::Result;
use crate::graph::EntityGraph;
use crate::models::{Book, BookPatch, BookRequest, Chat, Message, NewBook, User};
use crate::{seed, snapshot};

/// What answering a pending request produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The request was accepted and a chat was opened.
    Accepted { chat_id: ChatId },
    /// The request was rejected; no chat exists.
    Rejected,
}

/// Single source of truth for the session and all entity collections.
#[derive(Debug)]
pub struct Store {
    graph: EntityGraph,
    session: Option<UserId>,
    notifications: u32,
    /// Where the snapshot record lives. `None` disables persistence.
    storage_path: Option<PathBuf>,
}

impl Store {
    /// Open the store against the default platform data directory,
    /// seeding the catalog and rehydrating any persisted session.
    pub fn open() -> Result<Self> {
        let path = snapshot::default_storage_file()?;
        Self::open_at(&path)
    }

    /// Open the store against an explicit snapshot path. Useful for
    /// tests and custom directory layouts.
    pub fn open_at(path: &Path) -> Result<Self> {
        let mut store = Self::in_memory();
        store.storage_path = Some(path.to_path_buf());

        if let Some(snap) = snapshot::load(path)? {
            tracing::info!(path = %path.display(), "rehydrating persisted session");
            store.apply_snapshot(snap);
        }
        Ok(store)
    }

    /// A seeded store with persistence disabled.
    pub fn in_memory() -> Self {
        let mut graph = EntityGraph::new();
        for user in seed::seed_users() {
            graph.upsert_user(user);
        }
        // insert_book prepends, so feed it oldest first.
        for book in seed::seed_books().into_iter().rev() {
            graph.insert_book(book);
        }
        Self {
            graph,
            session: None,
            notifications: DEFAULT_NOTIFICATIONS,
            storage_path: None,
        }
    }

    // -- Session --------------------------------------------------------

    /// Set the session identity. Credentials are validated upstream
    /// (authentication is simulated); the store just records the user.
    pub fn login(&mut self, user: User) {
        tracing::info!(user_id = %user.id, name = %user.name, "login");
        self.session = Some(user.id);
        self.graph.upsert_user(user);
        self.persist();
    }

    /// Clear the session and every session-scoped collection. The
    /// shared catalog is untouched; the own-books view simply becomes
    /// empty with the session.
    pub fn logout(&mut self) {
        tracing::info!("logout");
        self.session = None;
        self.graph.clear_session_collections();
        self.persist();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session_user_id(&self) -> Option<UserId> {
        self.session
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.and_then(|id| self.graph.users.get(&id))
    }

    // -- Books ----------------------------------------------------------

    /// List a new book owned by the session user. No-op without a
    /// session.
    pub fn add_book(&mut self, draft: NewBook) -> Option<BookId> {
        let owner_id = self.session?;
        let book = Book {
            id: BookId::new(),
            title: draft.title,
            author: draft.author,
            description: draft.description,
            format: draft.format,
            genre: draft.genre,
            language: draft.language,
            cover_url: draft.cover_url,
            owner_id,
            likes: 0,
            liked_by: Default::default(),
            request_count: 0,
            distance_km: draft.distance_km,
            created_at: Utc::now(),
            is_available: true,
        };
        let id = book.id;

        tracing::debug!(book_id = %id, title = %book.title, "adding book");
        self.graph.insert_book(book);
        if let Some(owner) = self.graph.users.get_mut(&owner_id) {
            owner.books_shared += 1;
        }
        self.persist();
        Some(id)
    }

    /// Merge a partial update into the matching book. The owner never
    /// changes. Returns `false` if the id is absent.
    pub fn update_book(&mut self, id: BookId, patch: &BookPatch) -> bool {
        let Some(book) = self.graph.books.get_mut(&id) else {
            return false;
        };
        patch.apply(book);
        self.persist();
        true
    }

    /// Remove a book from the catalog, decrementing its owner's shared
    /// counter (floored at zero). The second call for the same id is a
    /// no-op.
    pub fn delete_book(&mut self, id: BookId) -> bool {
        let Some(removed) = self.graph.remove_book(id) else {
            return false;
        };
        if let Some(owner) = self.graph.users.get_mut(&removed.owner_id) {
            owner.books_shared = owner.books_shared.saturating_sub(1);
        }
        tracing::debug!(book_id = %id, "book deleted");
        self.persist();
        true
    }

    /// Toggle the session user's like on a book. Idempotent per user:
    /// liking twice is a like followed by an unlike, never a double
    /// count. Returns whether the book is now liked, or `None` on a
    /// missing session or book.
    pub fn toggle_like(&mut self, book_id: BookId) -> Option<bool> {
        let user_id = self.session?;
        let book = self.graph.books.get_mut(&book_id)?;

        let now_liked = if book.liked_by.remove(&user_id) {
            book.likes = book.likes.saturating_sub(1);
            false
        } else {
            book.liked_by.insert(user_id);
            book.likes += 1;
            true
        };
        self.persist();
        Some(now_liked)
    }

    // -- Requests -------------------------------------------------------

    /// Send a borrow request for a book. Requires a session and an
    /// existing book; increments the book's request counter.
    pub fn send_request(&mut self, book_id: BookId, message: &str) -> Option<RequestId> {
        let requester_id = self.session?;
        let book = self.graph.books.get_mut(&book_id)?;
        book.request_count += 1;
        let owner_id = book.owner_id;

        let now = Utc::now();
        let request = BookRequest {
            id: RequestId::new(),
            book_id,
            requester_id,
            owner_id,
            message: message.to_string(),
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        let id = request.id;

        tracing::debug!(request_id = %id, book_id = %book_id, "request sent");
        self.graph.insert_request(request);
        self.persist();
        Some(id)
    }

    /// Answer a pending request addressed to the session user. If and
    /// only if the decision is an acceptance, a chat is opened whose
    /// first message is a synthetic system message naming the book.
    ///
    /// No-op when the request is unknown, the session user is not the
    /// owner, the status change is not a forward transition, or (on
    /// accept) the book has since been deleted.
    pub fn respond_to_request(
        &mut self,
        id: RequestId,
        decision: RequestDecision,
    ) -> Option<RequestOutcome> {
        let owner_id = self.session?;
        let next: RequestStatus = decision.into();

        {
            let request = self.graph.requests.get(&id)?;
            if request.owner_id != owner_id || !request.status.can_transition_to(next) {
                return None;
            }
            if decision == RequestDecision::Accepted && !self.graph.books.contains_key(&request.book_id) {
                return None;
            }
        }

        let now = Utc::now();
        let (book_id, requester_id) = {
            let request = self.graph.requests.get_mut(&id)?;
            request.status = next;
            request.updated_at = now;
            (request.book_id, request.requester_id)
        };

        let outcome = match decision {
            RequestDecision::Rejected => RequestOutcome::Rejected,
            RequestDecision::Accepted => {
                let title = self
                    .graph
                    .books
                    .get(&book_id)
                    .map(|b| b.title.clone())
                    .unwrap_or_default();

                let chat_id = ChatId::new();
                let system_message = Message {
                    id: MessageId::new(),
                    chat_id,
                    sender_id: UserId::SYSTEM,
                    content: format!(
                        "Book request accepted! You can now coordinate the exchange of \"{title}\"."
                    ),
                    kind: MessageKind::System,
                    created_at: now,
                };
                let chat = Chat {
                    id: chat_id,
                    book_id,
                    participant_ids: [requester_id, owner_id],
                    message_ids: vec![system_message.id],
                    created_at: now,
                    updated_at: now,
                };
                tracing::info!(request_id = %id, chat_id = %chat_id, "request accepted, chat opened");
                self.graph.insert_message(system_message);
                self.graph.insert_chat(chat);
                RequestOutcome::Accepted { chat_id }
            }
        };

        self.persist();
        Some(outcome)
    }

    // -- Chats ----------------------------------------------------------

    /// Open a chat directly (outside the accept flow) and prepend it to
    /// the chat list.
    pub fn add_chat(&mut self, book_id: BookId, participant_ids: [UserId; 2]) -> ChatId {
        let now = Utc::now();
        let chat = Chat {
            id: ChatId::new(),
            book_id,
            participant_ids,
            message_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let id = chat.id;
        self.graph.insert_chat(chat);
        self.persist();
        id
    }

    /// Append a text message from the session user to a chat, bumping
    /// the chat's update timestamp. No-op without a session or on an
    /// unknown chat.
    pub fn send_message(&mut self, chat_id: ChatId, content: &str) -> Option<MessageId> {
        let sender_id = self.session?;
        let now = Utc::now();
        let message = Message {
            id: MessageId::new(),
            chat_id,
            sender_id,
            content: content.to_string(),
            kind: MessageKind::Text,
            created_at: now,
        };
        let id = message.id;

        let chat = self.graph.chats.get_mut(&chat_id)?;
        chat.message_ids.push(id);
        chat.updated_at = now;
        self.graph.insert_message(message);
        self.persist();
        Some(id)
    }

    // -- Notifications --------------------------------------------------

    pub fn set_notifications(&mut self, count: u32) {
        self.notifications = count;
        self.persist();
    }

    pub fn notification_count(&self) -> u32 {
        self.notifications
    }

    // -- Internals ------------------------------------------------------

    pub(crate) fn graph(&self) -> &EntityGraph {
        &self.graph
    }

    fn apply_snapshot(&mut self, snap: snapshot::Snapshot) {
        self.graph.apply(&snap);
        self.session = snap.user.map(|u| u.id);
    }

    /// Fire-and-forget full-state save. Last writer wins at the
    /// storage layer; failures are logged and swallowed.
    fn persist(&self) {
        let Some(path) = &self.storage_path else {
            return;
        };
        let snap = snapshot::Snapshot::capture(self);
        if let Err(e) = snapshot::save(path, &snap) {
            tracing::warn!(path = %path.display(), error = %e, "failed to persist state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookcircle_shared::BookFormat;

    fn test_user(name: &str) -> User {
        User {
            id: UserId::new(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            avatar_url: String::new(),
            location: "Testville".to_string(),
            rating: 4.5,
            books_shared: 0,
            books_received: 0,
            joined_at: Utc::now(),
        }
    }

    fn test_draft(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Anon".to_string(),
            description: "A test book".to_string(),
            format: BookFormat::Pdf,
            genre: "Fiction".to_string(),
            language: "English".to_string(),
            cover_url: String::new(),
            distance_km: None,
        }
    }

    #[test]
    fn add_book_requires_session() {
        let mut store = Store::in_memory();
        assert!(store.add_book(test_draft("Nope")).is_none());
        assert_eq!(store.catalog().len(), 3);
    }

    #[test]
    fn added_books_land_in_both_views_and_count_shared() {
        let mut store = Store::in_memory();
        store.login(test_user("Alice"));

        let a = store.add_book(test_draft("One")).unwrap();
        let b = store.add_book(test_draft("Two")).unwrap();

        let mine: Vec<_> = store.my_books().iter().map(|b| b.id).collect();
        assert_eq!(mine, vec![b, a]); // newest first
        assert_eq!(store.catalog().len(), 5);
        assert_eq!(store.catalog()[0].id, b);
        assert_eq!(store.current_user().unwrap().books_shared, 2);
    }

    #[test]
    fn delete_book_is_idempotent_and_floors_shared_count() {
        let mut store = Store::in_memory();
        store.login(test_user("Alice"));
        let id = store.add_book(test_draft("One")).unwrap();

        assert!(store.delete_book(id));
        assert!(!store.delete_book(id));
        assert_eq!(store.current_user().unwrap().books_shared, 0);

        // A second delete of an already-deleted book must not drive
        // the counter negative.
        assert!(!store.delete_book(id));
        assert_eq!(store.current_user().unwrap().books_shared, 0);
    }

    #[test]
    fn update_book_propagates_to_every_view() {
        let mut store = Store::in_memory();
        store.login(test_user("Alice"));
        let id = store.add_book(test_draft("Old Title")).unwrap();

        let patch = BookPatch {
            title: Some("New Title".to_string()),
            ..Default::default()
        };
        assert!(store.update_book(id, &patch));

        assert_eq!(store.my_books()[0].title, "New Title");
        assert_eq!(store.catalog()[0].title, "New Title");
        assert!(!store.update_book(BookId::new(), &patch));
    }

    #[test]
    fn toggle_like_is_idempotent_per_user() {
        let mut store = Store::in_memory();
        store.login(test_user("Alice"));
        let gatsby = store
            .catalog()
            .into_iter()
            .find(|b| b.title == "The Great Gatsby")
            .unwrap()
            .id;
        let baseline = store.book(gatsby).unwrap().likes;

        assert_eq!(store.toggle_like(gatsby), Some(true));
        assert_eq!(store.book(gatsby).unwrap().likes, baseline + 1);
        assert!(store.book(gatsby).unwrap().liked_by_me);

        // Second toggle unlikes instead of double counting.
        assert_eq!(store.toggle_like(gatsby), Some(false));
        assert_eq!(store.book(gatsby).unwrap().likes, baseline);
    }

    #[test]
    fn send_request_snapshots_join_and_bumps_counter() {
        let mut store = Store::in_memory();
        store.login(test_user("Alice"));

        // Gatsby is seeded with 8 requests.
        let gatsby = store
            .catalog()
            .into_iter()
            .find(|b| b.title == "The Great Gatsby")
            .unwrap();
        assert_eq!(gatsby.request_count, 8);

        let id = store.send_request(gatsby.id, "hi").unwrap();

        assert_eq!(store.book(gatsby.id).unwrap().request_count, 9);
        let sent = store.sent_requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].id, id);
        assert_eq!(sent[0].book.id, gatsby.id);
        assert_eq!(sent[0].owner.name, "Sarah Johnson");
        assert_eq!(sent[0].status, RequestStatus::Pending);
    }

    #[test]
    fn send_request_on_missing_book_is_noop() {
        let mut store = Store::in_memory();
        store.login(test_user("Alice"));
        assert!(store.send_request(BookId::new(), "hi").is_none());
        assert!(store.sent_requests().is_empty());
    }

    #[test]
    fn accept_opens_exactly_one_chat_with_a_system_message() {
        let mut store = Store::in_memory();
        let owner = test_user("Owner");
        let requester = test_user("Requester");

        store.login(owner.clone());
        let book_id = store.add_book(test_draft("Shared Book")).unwrap();

        store.login(requester.clone());
        let request_id = store.send_request(book_id, "may I?").unwrap();

        store.login(owner.clone());
        let outcome = store
            .respond_to_request(request_id, RequestDecision::Accepted)
            .unwrap();
        let RequestOutcome::Accepted { chat_id } = outcome else {
            panic!("expected an accepted outcome");
        };

        let chats = store.chats();
        assert_eq!(chats.len(), 1);
        let chat = &chats[0];
        assert_eq!(chat.id, chat_id);
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].kind, MessageKind::System);
        assert!(chat.messages[0].content.contains("Shared Book"));
        assert!(chat.messages[0].sender.id.is_system());

        // The transition is final: accepting again is a no-op.
        assert!(store
            .respond_to_request(request_id, RequestDecision::Accepted)
            .is_none());
        assert_eq!(store.chats().len(), 1);
    }

    #[test]
    fn reject_creates_no_chat_and_is_final() {
        let mut store = Store::in_memory();
        let owner = test_user("Owner");
        store.login(owner.clone());
        let book_id = store.add_book(test_draft("Shared Book")).unwrap();

        store.login(test_user("Requester"));
        let request_id = store.send_request(book_id, "please").unwrap();

        store.login(owner);
        assert_eq!(
            store.respond_to_request(request_id, RequestDecision::Rejected),
            Some(RequestOutcome::Rejected)
        );
        assert!(store.chats().is_empty());

        // A rejected request cannot be accepted afterwards.
        assert!(store
            .respond_to_request(request_id, RequestDecision::Accepted)
            .is_none());
    }

    #[test]
    fn only_the_owner_can_respond() {
        let mut store = Store::in_memory();
        let owner = test_user("Owner");
        store.login(owner);
        let book_id = store.add_book(test_draft("Shared Book")).unwrap();

        let requester = test_user("Requester");
        store.login(requester);
        let request_id = store.send_request(book_id, "please").unwrap();

        // Still logged in as the requester: responding is a no-op.
        assert!(store
            .respond_to_request(request_id, RequestDecision::Accepted)
            .is_none());
    }

    #[test]
    fn add_chat_opens_an_empty_conversation() {
        let mut store = Store::in_memory();
        let friend = test_user("Friend");
        let owner = test_user("Owner");

        store.login(friend.clone());
        store.login(owner.clone());
        let book_id = store.add_book(test_draft("Shared Book")).unwrap();

        let chat_id = store.add_chat(book_id, [friend.id, owner.id]);
        let chat = store.chat(chat_id).unwrap();
        assert!(chat.messages.is_empty());
        assert!(chat.last_message.is_none());
        assert_eq!(chat.participants.len(), 2);
        assert_eq!(chat.book.id, book_id);
    }

    #[test]
    fn send_message_appends_and_refreshes_last_message() {
        let mut store = Store::in_memory();
        let owner = test_user("Owner");
        let requester = test_user("Requester");

        store.login(owner.clone());
        let book_id = store.add_book(test_draft("Shared Book")).unwrap();
        store.login(requester.clone());
        let request_id = store.send_request(book_id, "hello").unwrap();
        store.login(owner.clone());
        let Some(RequestOutcome::Accepted { chat_id }) =
            store.respond_to_request(request_id, RequestDecision::Accepted)
        else {
            panic!("accept failed");
        };

        let id = store.send_message(chat_id, "See you Saturday?").unwrap();
        let chat = store.chat(chat_id).unwrap();
        assert_eq!(chat.messages.len(), 2);
        let last = chat.last_message.unwrap();
        assert_eq!(last.id, id);
        assert_eq!(last.content, "See you Saturday?");
        assert_eq!(last.sender.id, owner.id);

        assert!(store.send_message(ChatId::new(), "lost").is_none());
    }

    #[test]
    fn logout_clears_session_scope_but_not_the_catalog() {
        let mut store = Store::in_memory();
        store.login(test_user("Alice"));
        let book_id = store.add_book(test_draft("Mine")).unwrap();
        let dune = store
            .catalog()
            .into_iter()
            .find(|b| b.title == "Dune")
            .unwrap();
        store.send_request(dune.id, "want").unwrap();
        let catalog_len = store.catalog().len();

        store.logout();

        assert!(!store.is_authenticated());
        assert!(store.my_books().is_empty());
        assert!(store.sent_requests().is_empty());
        assert!(store.received_requests().is_empty());
        assert!(store.chats().is_empty());
        assert_eq!(store.catalog().len(), catalog_len);
        // The listed book itself survives in the shared catalog.
        assert!(store.book(book_id).is_some());
    }

    #[test]
    fn notifications_default_and_overwrite() {
        let mut store = Store::in_memory();
        assert_eq!(store.notification_count(), DEFAULT_NOTIFICATIONS);
        store.set_notifications(0);
        assert_eq!(store.notification_count(), 0);
    }
}
