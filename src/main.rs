mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use klack::{
    config::{Config, ConfigStore, FileConfigStore},
    passage::PassageProvider,
    runtime::{CrosstermEventSource, Runner, TrainerEvent},
    session::SessionController,
    TICK_RATE_MS,
};

/// minimal typing-speed trainer with live diffing and session history
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A minimal typing trainer: transcribe the shown passage, watch errors live, and get WPM/accuracy plus improvement feedback against your recent runs."
)]
pub struct Cli {
    /// single custom passage to practice instead of the rotation
    #[clap(short = 'p', long)]
    passage: Option<String>,

    /// JSON file holding an array of passages to rotate through
    #[clap(long)]
    passages_file: Option<PathBuf>,

    /// explicit config file path (defaults to the platform config dir)
    #[clap(long)]
    config: Option<PathBuf>,
}

/// Picks the passage rotation: CLI one-shot passage wins, then a passages
/// file, then whatever the config carries (the embedded list by default).
fn resolve_passages(cli: &Cli, cfg: &Config) -> Result<Vec<String>, Box<dyn Error>> {
    if let Some(ref passage) = cli.passage {
        return Ok(vec![passage.clone()]);
    }
    if let Some(ref path) = cli.passages_file {
        let bytes = fs::read(path)?;
        let passages: Vec<String> = serde_json::from_slice(&bytes)?;
        return Ok(passages);
    }
    Ok(cfg.passages.clone())
}

pub struct App {
    pub controller: SessionController,
    pub history_display: usize,
}

impl App {
    pub fn new(controller: SessionController, history_display: usize) -> Self {
        Self {
            controller,
            history_display,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let store = match cli.config {
        Some(ref path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let cfg = store.load();

    let passages = resolve_passages(&cli, &cfg)?;
    let provider = PassageProvider::new(passages)
        .ok_or("passage list must contain at least one non-empty passage")?;

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(SessionController::new(provider), cfg.history_display);
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );
    let result = run_app(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<CrosstermEventSource>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            TrainerEvent::Tick => {
                app.controller.on_clock_tick();
            }
            TrainerEvent::Resize => {}
            TrainerEvent::Key(key) => match key.code {
                KeyCode::Esc => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Tab | KeyCode::Left => {
                    app.controller.on_restart_requested();
                }
                KeyCode::Backspace => {
                    let mut buffer = app.controller.typed().to_string();
                    buffer.pop();
                    app.controller.on_input_changed(&buffer);
                }
                KeyCode::Char(c) => {
                    if app.controller.is_input_enabled() {
                        let mut buffer = app.controller.typed().to_string();
                        buffer.push(c);
                        app.controller.on_input_changed(&buffer);
                    } else if c == 'r' {
                        // completed screen: plain r also restarts
                        app.controller.on_restart_requested();
                    }
                }
                _ => {}
            },
        }
    }

    Ok(())
}
