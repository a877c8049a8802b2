//! Simulated authentication.
//!
//! There is no credential check; each command sleeps for a fixed
//! latency, builds the mock account and logs it into the store. The
//! password parameter exists only to mirror the sign-in form.

use bookcircle_shared::constants::{AUTH_DELAY_MS, SOCIAL_AUTH_DELAY_MS};
use bookcircle_shared::{UserId, ValidationError};
use bookcircle_store::User;
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::state::SharedState;

const DEFAULT_EMAIL: &str = "john.doe@example.com";
const DEFAULT_LOCATION: &str = "New York, NY";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub user: User,
    pub is_authenticated: bool,
    pub notifications: u32,
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

fn mock_user(name: &str, email: String, location: String, shared: u32, received: u32) -> User {
    User {
        id: UserId::new(),
        name: name.to_string(),
        email,
        avatar_url: format!(
            "/placeholder.svg?height=40&width=40&text={}",
            initials(name)
        ),
        location,
        rating: 4.8,
        books_shared: shared,
        books_received: received,
        joined_at: Utc::now(),
    }
}

fn complete_login(state: &SharedState, user: User) -> Result<SessionDto, String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    guard.store.login(user.clone());
    Ok(SessionDto {
        user,
        is_authenticated: true,
        notifications: guard.store.notification_count(),
    })
}

/// Sign in with email and password. The account is an established mock
/// profile regardless of the credentials entered.
pub async fn sign_in(
    state: &SharedState,
    email: String,
    _password: String,
) -> Result<SessionDto, String> {
    super::simulate_latency(state, AUTH_DELAY_MS).await?;

    let email = email.trim().to_string();
    let email = if email.is_empty() {
        DEFAULT_EMAIL.to_string()
    } else {
        email
    };

    info!(email = %email, "signing in");
    complete_login(
        state,
        mock_user("John Doe", email, DEFAULT_LOCATION.to_string(), 12, 8),
    )
}

/// Create a new account. Fresh profiles start with zeroed share
/// counters.
pub async fn sign_up(
    state: &SharedState,
    username: String,
    email: String,
    location: String,
) -> Result<SessionDto, String> {
    let username = username.trim().to_string();
    if username.is_empty() {
        return Err(ValidationError::MissingUsername.to_string());
    }
    let email = email.trim().to_string();
    if email.is_empty() {
        return Err(ValidationError::MissingEmail.to_string());
    }

    super::simulate_latency(state, AUTH_DELAY_MS).await?;

    let location = location.trim().to_string();
    let location = if location.is_empty() {
        DEFAULT_LOCATION.to_string()
    } else {
        location
    };

    info!(username = %username, email = %email, "signing up");
    complete_login(state, mock_user(&username, email, location, 0, 0))
}

/// Sign in through a social provider. Same mock account, shorter
/// simulated round trip.
pub async fn social_sign_in(state: &SharedState, provider: &str) -> Result<SessionDto, String> {
    super::simulate_latency(state, SOCIAL_AUTH_DELAY_MS).await?;

    info!(provider = %provider, "social sign-in");
    complete_login(
        state,
        mock_user(
            "John Doe",
            DEFAULT_EMAIL.to_string(),
            DEFAULT_LOCATION.to_string(),
            12,
            8,
        ),
    )
}

/// End the session. The store persists the cleared record before the
/// lock is released.
pub fn sign_out(state: &SharedState) -> Result<(), String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    guard.store.logout();
    Ok(())
}
