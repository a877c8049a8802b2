//! Unread-notification counter commands.

use crate::events::AppEvent;
use crate::state::SharedState;

/// Overwrite the unread counter and announce the change.
pub fn set_notifications(state: &SharedState, count: u32) -> Result<u32, String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    guard.store.set_notifications(count);
    guard.emit(AppEvent::NotificationsChanged { count });
    Ok(count)
}

pub fn notification_count(state: &SharedState) -> Result<u32, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    Ok(guard.store.notification_count())
}
