// Guestbook entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the HTTP backend
// 4. Create the UI channel and the sink that feeds it
// 5. Build the client and run the TUI until the user quits

use std::sync::Arc;

use anyhow::Context;
use guestbook_core::backend::HttpBackend;
use guestbook_core::client::GuestbookClient;
use guestbook_core::config;
use guestbook_tui::sink::ChannelSink;
use guestbook_tui::tui;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Guestbook starting up");

    // 2. Load config
    let (config, source) = config::load_config().context("failed to load configuration")?;
    match &source {
        Some(path) => info!("Config loaded from {}", path.display()),
        None => info!("No config file found, using defaults"),
    }
    info!(
        "Backend {} key={:?}, refreshing every {} ms",
        config.backend.base_url, config.backend.list_key, config.refresh.interval_ms
    );

    // 3. Build the HTTP backend
    let backend = HttpBackend::from_config(&config.backend)
        .context("failed to set up the backend client")?;

    // 4. Create the UI channel
    let (ui_tx, ui_rx) = mpsc::channel(256);
    let sink = Arc::new(ChannelSink::new(ui_tx));

    // 5. Run the TUI (blocks until the user quits)
    let client = GuestbookClient::new(Arc::new(backend), sink, &config);
    if let Err(e) = tui::run(client, ui_rx).await {
        error!("TUI error: {}", e);
        return Err(e);
    }

    info!("Guestbook shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("guestbook.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("guestbook_core=info,guestbook_tui=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
