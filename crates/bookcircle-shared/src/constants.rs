/// Application name
pub const APP_NAME: &str = "BookCircle";

/// File name of the persisted state record (single JSON document).
pub const STORAGE_FILE: &str = "bookcircle-storage.json";

/// Maximum cover image size in bytes (10 MiB)
pub const MAX_COVER_SIZE: usize = 10 * 1024 * 1024;

/// Simulated sign-in / sign-up latency in milliseconds
pub const AUTH_DELAY_MS: u64 = 1500;

/// Simulated social-provider sign-in latency in milliseconds
pub const SOCIAL_AUTH_DELAY_MS: u64 = 1000;

/// Simulated cover upload and processing latency in milliseconds
pub const UPLOAD_DELAY_MS: u64 = 2000;

/// Unread-notification count shown to a fresh session
pub const DEFAULT_NOTIFICATIONS: u32 = 3;

/// Genre suggestions offered by the add-book form. The field itself is
/// free text; this list is not enforced.
pub const GENRES: &[&str] = &[
    "Fiction",
    "Non-fiction",
    "Science Fiction",
    "Classic Literature",
    "Self-Help",
    "Finance",
];

/// Language suggestions offered by the catalog filters.
pub const LANGUAGES: &[&str] = &["English", "Spanish", "French", "German"];
