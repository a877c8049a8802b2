//! The normalized entity graph: one map per entity type keyed by id,
//! plus explicit newest-first ordering for the collections the UI
//! renders as lists.

use std::collections::HashMap;

use bookcircle_shared::{BookId, ChatId, MessageId, RequestId, UserId};

use crate::models::{Book, BookRequest, Chat, Message, User};

/// All entities, keyed by id. Relations are id references; nothing is
/// embedded by value.
#[derive(Debug, Default, Clone)]
pub struct EntityGraph {
    pub users: HashMap<UserId, User>,
    pub books: HashMap<BookId, Book>,
    pub requests: HashMap<RequestId, BookRequest>,
    pub chats: HashMap<ChatId, Chat>,
    pub messages: HashMap<MessageId, Message>,

    /// Catalog order, newest listing first.
    pub catalog: Vec<BookId>,
    /// Request order, newest first.
    pub request_order: Vec<RequestId>,
    /// Chat order, newest first.
    pub chat_order: Vec<ChatId>,
}

impl EntityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user record.
    pub fn upsert_user(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    /// Add a book at the front of the catalog. Re-inserting an id that
    /// is already listed replaces the record without duplicating the
    /// catalog entry.
    pub fn insert_book(&mut self, book: Book) {
        let id = book.id;
        if self.books.insert(id, book).is_none() {
            self.catalog.insert(0, id);
        }
    }

    /// Remove a book from the graph and the catalog. Returns the
    /// removed record, or `None` if the id was absent.
    pub fn remove_book(&mut self, id: BookId) -> Option<Book> {
        let removed = self.books.remove(&id)?;
        self.catalog.retain(|b| *b != id);
        Some(removed)
    }

    /// Add a request at the front of the request list.
    pub fn insert_request(&mut self, request: BookRequest) {
        let id = request.id;
        if self.requests.insert(id, request).is_none() {
            self.request_order.insert(0, id);
        }
    }

    /// Add a chat at the front of the chat list.
    pub fn insert_chat(&mut self, chat: Chat) {
        let id = chat.id;
        if self.chats.insert(id, chat).is_none() {
            self.chat_order.insert(0, id);
        }
    }

    pub fn insert_message(&mut self, message: Message) {
        self.messages.insert(message.id, message);
    }

    /// Drop all session-scoped collections: requests, chats and their
    /// messages. Users and the book catalog stay.
    pub fn clear_session_collections(&mut self) {
        self.requests.clear();
        self.request_order.clear();
        self.chats.clear();
        self.chat_order.clear();
        self.messages.clear();
    }
}
