//! Scripted demo session against the BookCircle store.
//!
//! Signs in, lists a book, browses the catalog, then plays both sides
//! of a borrow request so the accept flow and the chat that follows
//! are visible in the logs. `BOOKCIRCLE_DATA_DIR` redirects the
//! storage record, `BOOKCIRCLE_SKIP_DELAYS=true` makes the run
//! instant.

use anyhow::Context;
use bookcircle_shared::constants::STORAGE_FILE;
use bookcircle_shared::RequestDecision;
use bookcircle_store::{BookFilter, BookSort, Store};
use tracing::info;

use bookcircle_client::commands::{auth, books, chat, notifications, requests};
use bookcircle_client::config::ClientConfig;
use bookcircle_client::state::{AppState, SharedState};

fn cmd<T>(result: Result<T, String>) -> anyhow::Result<T> {
    result.map_err(anyhow::Error::msg)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bookcircle_client::init_tracing();

    let config = ClientConfig::from_env();
    let store = match &config.data_dir {
        Some(dir) => Store::open_at(&dir.join(STORAGE_FILE))?,
        None => Store::open()?,
    };
    let state: SharedState = AppState::new(store, config).into_shared();

    // Mirror the event stream into the log.
    let mut events = state
        .lock()
        .map_err(|e| anyhow::anyhow!("lock poisoned: {e}"))?
        .subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            info!(?event, "event");
        }
    });

    // Sign in and share a book.
    let session = cmd(
        auth::sign_in(&state, "john.doe@example.com".into(), "password".into()).await,
    )?;
    info!(user = %session.user.name, "signed in");

    let listed = cmd(
        books::add_book(
            &state,
            books::AddBookForm {
                title: "The Pragmatic Programmer".into(),
                author: "Andrew Hunt".into(),
                genre: "Non-fiction".into(),
                ..Default::default()
            },
        )
        .await,
    )?;
    info!(title = %listed.title, "listed a book");

    // Browse the catalog.
    let popular = cmd(books::explore(
        &state,
        BookFilter::default(),
        BookSort::MostPopular,
    ))?;
    for book in &popular {
        info!(
            title = %book.title,
            owner = %book.owner.name,
            likes = book.likes,
            "catalog"
        );
    }

    // Request the most popular seeded book.
    let wanted = popular
        .iter()
        .find(|b| b.owner.id != session.user.id)
        .context("no borrowable book in the catalog")?;
    let request = cmd(requests::send_request(
        &state,
        wanted.id,
        "Hi! I'd love to borrow this one.",
    ))?;
    info!(book = %request.book.title, owner = %request.owner.name, "request sent");

    // Switch to the owner's side and accept.
    let owner = request.owner.clone();
    {
        let mut guard = state
            .lock()
            .map_err(|e| anyhow::anyhow!("lock poisoned: {e}"))?;
        guard.store.login(owner);
    }
    let answered = cmd(requests::respond_to_request(
        &state,
        request.id,
        RequestDecision::Accepted,
    ))?;
    info!(status = ?answered.status, "request answered");

    // Chat about the handover.
    let open = cmd(chat::list_chats(&state))?;
    let conversation = open.first().context("accept did not open a chat")?;
    cmd(chat::send_message(
        &state,
        conversation.id,
        "Happy to lend it. Does Saturday work?",
    ))?;
    for message in cmd(chat::get_messages(&state, conversation.id))? {
        info!(from = %message.sender.name, text = %message.content, "chat");
    }

    cmd(notifications::set_notifications(&state, 0))?;
    info!("demo finished");
    Ok(())
}
