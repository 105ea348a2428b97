use std::fs::OpenOptions;
use std::io;
use std::process::Command;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use drugbot_db::DrugDb;
use drugbot_llm::OpenAiClient;
use drugbot_prompts::INITIALIZATION_COMMANDS;
use drugbot_service::BlockingWorkflow;
use drugbot_tui::app::App;
use drugbot_tui::config::AppConfig;
use ratatui::prelude::*;
use tracing::info;

fn main() -> Result<()> {
    let config = AppConfig::parse();
    init_logging(&config)?;
    info!("drugbot starting");

    let db = DrugDb::open(&config.db()).context("failed to open the drug database")?;
    if let Some(script) = &config.init_sql {
        info!("running {}", script.display());
        db.execute_file(script)
            .with_context(|| format!("failed to run {}", script.display()))?;
    }
    if config.skip_init {
        info!("skipping extension and graph initialization");
    } else {
        db.initialize(INITIALIZATION_COMMANDS)
            .context("failed to initialize the drug database")?;
    }

    let llm = OpenAiClient::new(config.openai()).context("failed to build the model client")?;
    info!("chat model: {}", config.chat_model);
    let workflow = BlockingWorkflow::new(Arc::new(llm), Arc::new(db), config.generator())?;

    run_tui(App::new(workflow))
}

/// The terminal belongs to the UI, so logs go to a file.
fn init_logging(config: &AppConfig) -> Result<()> {
    let path = config.log_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}

fn run_tui(app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e}");
    }

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if app.needs_processing() {
            app.process_pending();
            continue;
        }

        if let Some(req) = app.editor_request.clone() {
            match open_in_editor(terminal, &req.path) {
                Ok(()) => app.editor_done(),
                Err(e) => app.editor_failed(&e.to_string()),
            }
            continue;
        }

        if let Event::Key(key) = event::read()? {
            // Ctrl+C always quits
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }
            // q quits unless we're in an input mode
            if key.code == KeyCode::Char('q') && !app.is_input_mode() {
                break;
            }
            app.handle_key(key);
        }
    }

    info!("drugbot exiting");
    Ok(())
}

/// Leave TUI, open $EDITOR, then restore TUI.
fn open_in_editor(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    path: &std::path::Path,
) -> Result<()> {
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".into());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    let status = Command::new(&editor).arg(path).status();

    enable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        EnterAlternateScreen,
        EnableMouseCapture
    )?;
    terminal.clear()?;

    let status = status.with_context(|| format!("failed to start {editor}"))?;
    if !status.success() {
        bail!("editor exited with {status}");
    }

    Ok(())
}
