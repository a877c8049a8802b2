//! Borrow-request commands.
//!
//! The self-request guard lives here rather than in the store: the
//! store treats any session as a valid requester, the command layer
//! enforces the user-facing rule.

use bookcircle_shared::{BookId, RequestDecision, RequestId, UserId};
use bookcircle_store::{RequestOutcome, RequestView};
use tracing::info;

use crate::events::AppEvent;
use crate::state::SharedState;

/// Ask the owner of a book to borrow it.
pub fn send_request(
    state: &SharedState,
    book_id: BookId,
    message: &str,
) -> Result<RequestView, String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;

    let session = guard
        .store
        .session_user_id()
        .ok_or_else(|| "Please sign in to request books".to_string())?;
    let book = guard
        .store
        .book(book_id)
        .ok_or_else(|| "Book not found".to_string())?;
    if book.owner.id == session {
        return Err("You cannot request your own book".to_string());
    }

    let id = guard
        .store
        .send_request(book_id, message)
        .ok_or_else(|| "Book not found".to_string())?;
    let view = guard
        .store
        .request(id)
        .ok_or_else(|| "Request not found".to_string())?;

    info!(request_id = %id, book = %view.book.title, "borrow request sent");
    guard.emit(AppEvent::RequestSent {
        request_id: id,
        book_id,
    });
    Ok(view)
}

/// Answer a pending request addressed to the session user. Accepting
/// opens a chat and announces it on the event stream.
pub fn respond_to_request(
    state: &SharedState,
    id: RequestId,
    decision: RequestDecision,
) -> Result<RequestView, String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;

    let outcome = guard
        .store
        .respond_to_request(id, decision)
        .ok_or_else(|| "Request not found or already answered".to_string())?;
    let view = guard
        .store
        .request(id)
        .ok_or_else(|| "Request not found".to_string())?;

    guard.emit(AppEvent::RequestResponded {
        request_id: id,
        status: view.status,
    });
    if let RequestOutcome::Accepted { chat_id } = outcome {
        guard.emit(AppEvent::ChatOpened {
            chat_id,
            book_title: view.book.title.clone(),
        });
        guard.emit(AppEvent::NewMessage {
            chat_id,
            sender_id: UserId::SYSTEM,
        });
    }
    Ok(view)
}

/// Requests the session user has sent, newest first.
pub fn sent_requests(state: &SharedState) -> Result<Vec<RequestView>, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    Ok(guard.store.sent_requests())
}

/// Requests waiting on the session user's answer, newest first.
pub fn received_requests(state: &SharedState) -> Result<Vec<RequestView>, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    Ok(guard.store.received_requests())
}
