//! livescroll-news — a NewsAPI.org reader for the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐ Outcome ┌──────────────┐ watch  ┌──────────┐  draw()  ┌──────────┐
//! │ source/   │ ──────► │ repository + │ ─────► │  app.rs  │ ───────► │  ui.rs   │
//! │ (reqwest) │         │ coordinator  │        │ (view)   │          │ (render) │
//! └───────────┘         └──────────────┘        └──────────┘          └──────────┘
//!                              ▲                      ▲
//!                              │ intents              │ handle_key_event()
//!                              └──────────────── ┌──────────┐
//!                                                │ input.rs │
//!                                                └──────────┘
//! ```
//!
//! * **`source/`** — the `NewsSource` trait, article types and the NewsAPI
//!   client.
//! * **`repository`** — wraps a source and reports `Outcome`s.
//! * **`coordinator`** — owns the news state: loads, refreshes, debounced
//!   search, cancellation.
//! * **`state`** — the state snapshot and its transitions.
//! * **`app`** — view-side state (selection, input mode, retry target).
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` actions.
//! * **`main`** — wires everything together: parse args, set up the terminal,
//!   and run the event loop.

mod app;
mod config;
mod coordinator;
mod input;
mod logging;
mod repository;
mod source;
mod state;
mod ui;

#[cfg(test)]
mod testing;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use app::App;
use config::{Args, Config};
use coordinator::NewsCoordinator;
use repository::NewsRepository;
use source::NewsApiSource;

// ---------------------------------------------------------------------------
// RAII terminal guard
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.
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

/// Restore the terminal before printing a panic message, otherwise the
/// message lands on the alternate screen and vanishes.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // -- configuration -------------------------------------------------------
    let config = Config::try_from(Args::parse())?;
    logging::init(config.log_file.as_deref())?;
    info!(base_url = %config.base_url, country = %config.country, "starting");

    install_panic_hook();

    // -- data layer ----------------------------------------------------------
    let source = NewsApiSource::new(&config).context("building HTTP client")?;
    let repository = NewsRepository::new(Arc::new(source));
    let coordinator = NewsCoordinator::new(repository, config.debounce);

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new(coordinator);

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Pull the latest news state.
    //   2. Render the UI.
    //   3. Poll for keyboard input (up to tick_rate).
    // Requests run on runtime worker threads, so blocking here in
    // `event::poll` doesn't stall them.
    let tick_rate = Duration::from_millis(100);

    loop {
        app.sync();

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.quit {
            break;
        }
    }

    info!("shutting down");
    // `app` owns the coordinator; dropping it cancels any pending search.
    drop(app);
    Ok(())
}
