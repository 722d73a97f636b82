use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use mailsift_core::ExtractionClient;

mod action;
mod app;
mod backend;
mod config_file;
mod input;
mod model;
mod theme;
mod tui_event;
mod view;

use app::{App, UrlEntryState};
use model::settings::Settings;

/// Mailsift — submit URL batches to an extraction server and browse the
/// returned email records in a sortable, filterable table.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// URLs to extract from (max 10); prefills the URL editor
    urls: Vec<String>,

    /// Read URLs from a file, one per line
    #[arg(long)]
    urls_file: Option<PathBuf>,

    /// Extraction server base URL
    #[arg(long)]
    server: Option<String>,

    /// Scan mode: fast or deep
    #[arg(long)]
    scan_mode: Option<String>,

    /// Server-side result filter: valid, invalid or all
    #[arg(long)]
    filter: Option<String>,

    /// Table rows per page
    #[arg(long)]
    rows: Option<usize>,

    /// Color theme: hacker (default) or modern
    #[arg(long)]
    theme: Option<String>,
}

fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let dir = dirs::cache_dir()?.join("mailsift");
    std::fs::create_dir_all(&dir).ok()?;
    let appender = tracing_appender::rolling::never(dir, "mailsift.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("MAILSIFT_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Keep the guard alive for the process lifetime so logs flush on exit.
    let _tracing_guard = init_tracing();

    // Resolve settings: CLI flags > env vars > config file > defaults
    let mut settings = Settings::default();
    config_file::apply_to_settings(&config_file::load_config(), &mut settings);
    if let Ok(server) = std::env::var("MAILSIFT_SERVER") {
        settings.server_url = server;
    }
    if let Some(server) = args.server {
        settings.server_url = server;
    }
    if let Some(ref mode) = args.scan_mode {
        settings.scan_mode = config_file::parse_scan_mode(mode)
            .ok_or_else(|| anyhow::anyhow!("unknown scan mode: {mode}"))?;
    }
    if let Some(ref filter) = args.filter {
        settings.filter_mode = config_file::parse_filter_mode(filter)
            .ok_or_else(|| anyhow::anyhow!("unknown filter: {filter}"))?;
    }
    if let Some(rows) = args.rows {
        settings.rows_per_page = rows.max(1);
    }
    if let Some(theme) = args.theme {
        settings.theme_name = theme;
    }

    // Gather any URLs provided up front
    let mut initial_urls = args.urls.clone();
    if let Some(ref path) = args.urls_file {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?;
        initial_urls.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        );
    }

    let client = Arc::new(ExtractionClient::new(
        &settings.server_url,
        Duration::from_secs(settings.timeout_secs),
    )?);

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let mut app = App::new(settings);

    // Set up backend channels
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<tui_event::BackendCommand>();
    app.backend_cmd_tx = Some(cmd_tx);

    tokio::spawn(backend::run(client, cmd_rx, event_tx));

    // Prefill the editor and fire immediately when URLs came from the CLI
    if !initial_urls.is_empty() {
        app.url_entry = UrlEntryState::from_text(&initial_urls.join("\n"));
        app.submit_urls();
    }

    // Main event loop
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            // Backend events (non-blocking drain)
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    // Drain any additional queued backend events
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            // Terminal input events
            _ = async {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let action = input::map_event(&evt, &app.input_mode);
                        app.update(action);
                    }
                }
            } => {}
        }

        // Process tick
        app.update(action::Action::Tick);

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
