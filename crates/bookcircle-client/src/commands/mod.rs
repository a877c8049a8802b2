//! Command handlers invoked by UI consumers.
//!
//! Each sub-module groups related commands by domain. Commands take
//! the shared [`crate::state::SharedState`] handle, return
//! `Result<T, String>` with user-facing error strings, and emit
//! [`crate::events::AppEvent`]s for changes other surfaces render.
//! The state lock is never held across a simulated delay.

pub mod auth;
pub mod books;
pub mod chat;
pub mod notifications;
pub mod requests;

use std::time::Duration;

use crate::state::SharedState;

/// Sleep for the configured simulated latency, unless the config
/// disables delays.
pub(crate) async fn simulate_latency(state: &SharedState, ms: u64) -> Result<(), String> {
    let skip = state
        .lock()
        .map_err(|e| format!("Lock poisoned: {e}"))?
        .config
        .skip_delays;
    if !skip {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
    Ok(())
}
