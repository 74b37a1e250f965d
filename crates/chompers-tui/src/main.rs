use anyhow::{Context, Result};
use chompers_core::{ChatClient, Config};

mod app;
mod handler;
mod tui;
mod ui;

use app::App;
use tui::{AppEvent, EventHandler, Tui};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    // Server resolution: environment first, then config file, then default.
    let config = Config::load().unwrap_or_else(|_| Config::new());
    let server_url = std::env::var("CHOMPERS_URL")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| config.server_url());

    tracing::info!("using chat server at {server_url}");
    let client = ChatClient::new(&server_url);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();
    let mut app = App::new(client);

    let result = run(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    result
}

async fn run(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    let sender = events.sender();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(AppEvent::Key(key)) => handler::handle_key(app, key, &sender),
            Some(AppEvent::Reply(outcome)) => app.apply_reply(outcome),
            Some(AppEvent::Tick) => app.tick_animation(),
            Some(AppEvent::Resize(_, _)) => {}
            None => break,
        }
    }

    Ok(())
}

/// Structured logging (controlled via RUST_LOG). The UI owns the terminal,
/// so diagnostics go to a file instead of stderr.
fn init_logging() -> Result<()> {
    let log_dir = dirs::cache_dir()
        .context("Could not determine cache directory")?
        .join("chompers");
    std::fs::create_dir_all(&log_dir)?;
    let log_file = std::fs::File::create(log_dir.join("chompers.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}
