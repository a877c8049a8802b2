//! Events broadcast to UI consumers whenever a command changes state
//! another surface may be rendering.

use bookcircle_shared::{BookId, ChatId, RequestId, RequestStatus, UserId};
use serde::Serialize;

/// Application event stream payloads, serialized `camelCase` with a
/// `type` tag for UI dispatch.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AppEvent {
    /// A message was appended to a chat.
    #[serde(rename_all = "camelCase")]
    NewMessage {
        chat_id: ChatId,
        sender_id: UserId,
    },
    /// A request was accepted and a chat opened.
    #[serde(rename_all = "camelCase")]
    ChatOpened { chat_id: ChatId, book_title: String },
    /// A new book was listed in the catalog.
    #[serde(rename_all = "camelCase")]
    BookAdded { book_id: BookId, title: String },
    /// A borrow request was sent to a book owner.
    #[serde(rename_all = "camelCase")]
    RequestSent {
        request_id: RequestId,
        book_id: BookId,
    },
    /// A pending request was answered.
    #[serde(rename_all = "camelCase")]
    RequestResponded {
        request_id: RequestId,
        status: RequestStatus,
    },
    /// The unread counter changed.
    #[serde(rename_all = "camelCase")]
    NotificationsChanged { count: u32 },
}
