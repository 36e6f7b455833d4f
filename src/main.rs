use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

use wikitable::app::{App, KeyAction};
use wikitable::render::{self, Theme};
use wikitable::wiki::{TableSource, WikiClient};

#[derive(Parser)]
#[command(version, about = "Browse and edit Wikipedia tables in the terminal")]
struct Args {
    /// User agent for Wikipedia API requests
    #[arg(long, default_value = "github.com/atye/wikitable-rs")]
    user_agent: String,

    /// Append logs to this file (logging is off when not set)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Initialize the terminal for TUI rendering.
/// Enables raw mode and enters the alternate screen.
fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn init_logging(path: &PathBuf) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    // Restore the terminal before the default panic output runs
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = init_terminal().context("initializing terminal")?;
    let mut app = App::new(WikiClient::new(args.user_agent));
    let size = terminal.size()?;
    app.handle_resize(size.width, size.height);

    let result = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    result
}

/// Event loop: draw, then process one event at a time. Every event is
/// handled to completion before the next is read.
fn run<S: TableSource>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> anyhow::Result<()> {
    let theme = Theme::default();
    loop {
        terminal.draw(|frame| render::draw(frame, app, &theme))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) == KeyAction::Quit {
                        return Ok(());
                    }
                }
                Event::Resize(width, height) => app.handle_resize(width, height),
                _ => {}
            }
        }
    }
}
