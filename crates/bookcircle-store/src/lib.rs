//! # bookcircle-store
//!
//! The BookCircle application state store: a normalized in-memory
//! entity graph (users, books, borrow requests, chats, messages) with
//! a single mutation surface and a derivation layer that joins related
//! entities back together on read.
//!
//! Entities reference each other by id; the joined shapes the UI
//! consumes (a request carrying its book and both participants, a chat
//! carrying its messages) are reconstructed by [`views`] so that user
//! and book edits propagate instead of going stale.
//!
//! The store persists a session-scoped subset of the graph as one JSON
//! record in the platform data directory. The shared catalog and the
//! notification counter are never persisted; they are reseeded from
//! built-in mock data on every load.

pub mod error;
pub mod graph;
pub mod models;
pub mod query;
pub mod seed;
pub mod snapshot;
pub mod store;
pub mod views;

pub use error::{Result, StoreError};
pub use models::*;
pub use query::{BookFilter, BookSort};
pub use store::{RequestOutcome, Store};
pub use views::{BookView, ChatView, MessageView, RequestView};
