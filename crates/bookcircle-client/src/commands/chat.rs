//! Chat commands over conversations opened by accepted requests.

use bookcircle_shared::ChatId;
use bookcircle_store::{ChatView, MessageView};

use crate::events::AppEvent;
use crate::state::SharedState;

/// All open chats, newest first.
pub fn list_chats(state: &SharedState) -> Result<Vec<ChatView>, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    Ok(guard.store.chats())
}

/// Message history of one chat, oldest first.
pub fn get_messages(state: &SharedState, chat_id: ChatId) -> Result<Vec<MessageView>, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let chat = guard
        .store
        .chat(chat_id)
        .ok_or_else(|| "Chat not found".to_string())?;
    Ok(chat.messages)
}

/// Append a text message from the session user.
pub fn send_message(
    state: &SharedState,
    chat_id: ChatId,
    content: &str,
) -> Result<MessageView, String> {
    let content = content.trim();
    if content.is_empty() {
        return Err("Cannot send an empty message".to_string());
    }

    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let sender_id = guard
        .store
        .session_user_id()
        .ok_or_else(|| "Please sign in to send messages".to_string())?;
    let id = guard
        .store
        .send_message(chat_id, content)
        .ok_or_else(|| "Chat not found".to_string())?;

    let message = guard
        .store
        .chat(chat_id)
        .and_then(|c| c.messages.into_iter().find(|m| m.id == id))
        .ok_or_else(|| "Chat not found".to_string())?;

    guard.emit(AppEvent::NewMessage { chat_id, sender_id });
    Ok(message)
}
