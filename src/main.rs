//! consult-tui — browse the records a Parse Server cloud function returns.
//!
//! ## Architecture overview
//!
//! ```text
//!  gateway ─► repository ─► requirement ─► fetch task
//!                                              │ FetchMsg (channel)
//!                                              ▼
//!  input ──handle_key_event()──► app (view_model, search) ──draw()──► ui
//!                                  │                                   ▲
//!                                  └──── toast (shared slot) ──────────┘
//! ```
//!
//! * **`record/`** — the `Record` trait and the two record shapes.
//! * **`gateway`** — Parse cloud-function calls and payload decoding.
//! * **`repository`** / **`requirement`** — the layers the view-model
//!   depends on instead of the gateway.
//! * **`view_model`** — loading / records / error state of one screen.
//! * **`toast`** — single-slot notification with auto-dismiss.
//! * **`fetch`** — runs a fetch on a task and sends the result back.
//! * **`app`** — view-model plus search text and list selection.
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` mutations.
//! * **`main`** — wires everything together: config, logging, the terminal,
//!   and the event loop.

mod app;
mod config;
mod error;
mod fetch;
mod gateway;
mod input;
mod record;
mod repository;
mod requirement;
mod toast;
mod ui;
mod view_model;

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use app::App;
use config::{Config, Variant};
use gateway::ParseGateway;
use record::{DataItem, HistoricalItem, Record};
use repository::{RemoteRepository, Repository};
use requirement::ConsultRequirement;
use toast::ToastManager;
use ui::RowView;
use view_model::ViewModel;

/// Redraw interval, so toasts disappear on time without any input.
const TICK_RATE: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Restore the terminal before the default panic output is printed.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        tracing::error!(%info, "panic");
        original_hook(info);
    }));
}

/// Log to a file; stdout belongs to the UI.
fn init_tracing(log_file: &Path) -> Result<WorkerGuard> {
    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .ok_or_else(|| anyhow!("log file path {} has no file name", log_file.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; flags and the real environment still apply.
    let _ = dotenvy::dotenv();
    let config = Config::parse();

    let _log_guard = init_tracing(&config.log_file)?;
    install_panic_hook();
    tracing::info!(
        server = %config.server_url,
        variant = ?config.variant,
        strict = config.strict,
        "starting"
    );

    let gateway = Arc::new(
        ParseGateway::new(
            config.server_url.as_str(),
            config.application_id.as_str(),
            config.client_key.as_str(),
        )
        .with_function(config.function.clone())
        .with_policy(config.malformed_policy()),
    );
    let toasts = ToastManager::new(config.toast_delay());

    match config.variant {
        Variant::Data => run::<DataItem>(gateway, toasts).await,
        Variant::Historical => run::<HistoricalItem>(gateway, toasts).await,
    }
}

async fn run<R: Record + RowView>(gateway: Arc<ParseGateway>, toasts: ToastManager) -> Result<()> {
    let repository: Arc<dyn Repository<R>> = Arc::new(RemoteRepository::<R>::new(gateway));
    let requirement = Arc::new(ConsultRequirement::new(repository));
    let view_model = ViewModel::<R>::new(requirement, toasts.clone());

    let (tx, mut rx) = fetch::channel();
    let mut app = App::new(view_model, toasts, tx);

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_RATE);

    app.refresh();

    // -- main event loop -----------------------------------------------------
    // Every iteration renders once, then waits for whichever comes first:
    // a tick, a fetch result, or a terminal event.
    loop {
        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        tokio::select! {
            _ = ticker.tick() => {}
            Some(msg) = rx.recv() => app.apply(msg),
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => input::handle_key_event(&mut app, key),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }

        if app.quit {
            break;
        }
    }

    tracing::info!("exiting");
    // `guard` is dropped here, restoring the terminal.
    Ok(())
}
