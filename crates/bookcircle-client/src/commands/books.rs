//! Book listing commands: the add-book form flow plus catalog reads.

use bookcircle_shared::constants::{MAX_COVER_SIZE, UPLOAD_DELAY_MS};
use bookcircle_shared::{BookFormat, BookId, ValidationError};
use bookcircle_store::{BookFilter, BookPatch, BookSort, BookView, NewBook};
use serde::Deserialize;
use tracing::info;

use crate::events::AppEvent;
use crate::state::SharedState;

/// Add-book form input. The cover itself is not carried; only its size
/// is checked, and the stored URL is a placeholder derived from the
/// title.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBookForm {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    pub format: BookFormat,
    pub genre: String,
    pub language: String,
    #[serde(default)]
    pub cover_size_bytes: Option<usize>,
    #[serde(default)]
    pub distance_km: Option<f64>,
}

impl Default for AddBookForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            description: String::new(),
            format: BookFormat::Pdf,
            genre: String::new(),
            language: "English".to_string(),
            cover_size_bytes: None,
            distance_km: None,
        }
    }
}

fn validate(form: &AddBookForm) -> Result<(), ValidationError> {
    if form.title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if form.author.trim().is_empty() {
        return Err(ValidationError::MissingAuthor);
    }
    if form.genre.trim().is_empty() {
        return Err(ValidationError::MissingGenre);
    }
    if let Some(size) = form.cover_size_bytes {
        if size > MAX_COVER_SIZE {
            return Err(ValidationError::CoverTooLarge);
        }
    }
    Ok(())
}

/// Validate the form, simulate the cover upload and list the book for
/// the session user.
pub async fn add_book(state: &SharedState, form: AddBookForm) -> Result<BookView, String> {
    validate(&form).map_err(|e| e.to_string())?;

    super::simulate_latency(state, UPLOAD_DELAY_MS).await?;

    let title = form.title.trim().to_string();
    let author = form.author.trim().to_string();
    let description = form.description.trim().to_string();
    let description = if description.is_empty() {
        format!("A {} book by {}", form.genre.to_lowercase(), author)
    } else {
        description
    };
    let cover_url = format!(
        "/placeholder.svg?height=300&width=200&text={}",
        title.replace(' ', "%20")
    );

    let draft = NewBook {
        title,
        author,
        description,
        format: form.format,
        genre: form.genre,
        language: form.language,
        cover_url,
        distance_km: form.distance_km,
    };

    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let id = guard
        .store
        .add_book(draft)
        .ok_or_else(|| "Please sign in to share books".to_string())?;
    let view = guard
        .store
        .book(id)
        .ok_or_else(|| "Book not found".to_string())?;

    info!(book_id = %id, title = %view.title, "book listed");
    guard.emit(AppEvent::BookAdded {
        book_id: id,
        title: view.title.clone(),
    });
    Ok(view)
}

/// Merge a partial edit into one of the catalog's books.
pub fn update_book(state: &SharedState, id: BookId, patch: BookPatch) -> Result<BookView, String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    if !guard.store.update_book(id, &patch) {
        return Err("Book not found".to_string());
    }
    guard
        .store
        .book(id)
        .ok_or_else(|| "Book not found".to_string())
}

/// Remove a listing from the catalog.
pub fn delete_book(state: &SharedState, id: BookId) -> Result<(), String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    if !guard.store.delete_book(id) {
        return Err("Book not found".to_string());
    }
    Ok(())
}

/// Toggle the session user's like on a book; returns whether the book
/// is now liked.
pub fn toggle_like(state: &SharedState, id: BookId) -> Result<bool, String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    if !guard.store.is_authenticated() {
        return Err("Please sign in to like books".to_string());
    }
    guard
        .store
        .toggle_like(id)
        .ok_or_else(|| "Book not found".to_string())
}

/// Filtered, sorted catalog for the explore surface.
pub fn explore(
    state: &SharedState,
    filter: BookFilter,
    sort: BookSort,
) -> Result<Vec<BookView>, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    Ok(guard.store.explore(&filter, sort))
}

/// The session user's own listings.
pub fn my_books(state: &SharedState) -> Result<Vec<BookView>, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    Ok(guard.store.my_books())
}
