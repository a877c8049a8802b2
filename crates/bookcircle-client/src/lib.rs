//! # bookcircle-client
//!
//! Session/command layer over the BookCircle store: simulated
//! authentication and upload flows, form validation, and an event
//! broadcast for UI consumers. Commands operate on a shared
//! [`state::AppState`] and return serializable views, mirroring the
//! store's single-mutation-surface contract.

pub mod commands;
pub mod config;
pub mod events;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing for the client process.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bookcircle_client=debug,bookcircle_store=info,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
