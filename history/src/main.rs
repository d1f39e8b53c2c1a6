//! Game history TUI application.
//!
//! A vim-style terminal interface for ranking favourite games per console
//! and seeing them laid out on a personal life timeline.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for scripting:
//!
//! ```bash
//! cargo run -p history -- --headless --user alice --data-dir ./history-data
//! ```

mod app;
mod config;
mod error;
mod events;
mod headless;
mod ui;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io::{self, stdout};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use app::App;
use config::Args;
use events::{handle_event, EventResult};
use ui::render::render;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_logging(&args)?;

    let catalog = args.load_catalog().await?;
    let history = args.open_history(catalog).await?;
    tracing::info!(
        user = history.user_id(),
        rankings = history.rankings().len(),
        "opened history"
    );

    if args.headless {
        return headless::run_headless(history, args.data_dir.clone())
            .await
            .map_err(|e| e.into());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, App::new(history, args.data_dir.clone())).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

/// Headless mode logs to stderr; the TUI owns the terminal, so it logs to a file.
fn init_logging(args: &Args) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if args.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        return Ok(());
    }

    fs::create_dir_all(&args.data_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(args.log_file())?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        // Render
        terminal.draw(|f| render(f, &app))?;

        // Store operations queued by commands run between frames
        if app.has_pending() {
            app.set_status("Working...");
            terminal.draw(|f| render(f, &app))?;
            app.run_pending().await;
            if app.should_quit {
                return Ok(());
            }
            continue;
        }

        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            if handle_event(&mut app, ev) == EventResult::Quit {
                return Ok(());
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
