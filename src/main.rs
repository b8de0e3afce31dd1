pub mod config;
pub mod emotion;
pub mod present;
pub mod random;
pub mod runtime;
pub mod session;
pub mod summary;
pub mod timers;
pub mod trial;
pub mod ui;
pub mod util;

use crate::{
    config::{Difficulty, RawSettings, SessionConfig},
    emotion::EmotionCategory,
    random::RngPicker,
    runtime::{AppEvent, CrosstermEventSource, EventSource},
    session::Session,
    timers::MonotonicClock,
    ui::StageView,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::KeyCode,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

// Fine enough to honor the 30ms minimum phase duration.
const TICK_RATE_MS: u64 = 15;

/// terminal reaction trainer with flashed emoji stimuli
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Flashes an emotion emoji for a configurable duration, masks it, then asks you to classify the emotion under time pressure, scoring correctness and response latency across a session of rounds."
)]
pub struct Cli {
    /// difficulty preset for the flash duration
    #[clap(short, long, value_enum, default_value_t = Difficulty::Novice)]
    difficulty: Difficulty,

    /// flash duration in milliseconds, used with --difficulty custom
    /// (invalid values fall back to 250)
    #[clap(long)]
    flash_ms: Option<String>,

    /// mask duration in milliseconds, 0 disables the mask
    /// (invalid values fall back to 250)
    #[clap(long)]
    mask_ms: Option<String>,

    /// rounds per session (invalid values fall back to 12)
    #[clap(short, long)]
    rounds: Option<String>,
}

impl Cli {
    /// The raw configuration-source values the resolver reads once at
    /// session start.
    fn to_raw_settings(&self) -> RawSettings {
        RawSettings {
            difficulty: self.difficulty,
            flash_ms: self.flash_ms.clone(),
            mask_ms: self.mask_ms.clone(),
            rounds: self.rounds.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Welcome,
    Running,
    Summary,
}

pub struct App {
    pub config: SessionConfig,
    pub session: Session<RngPicker, MonotonicClock>,
    pub view: StageView,
    pub state: AppState,
}

impl App {
    pub fn new(cli: &Cli) -> Self {
        let config = SessionConfig::resolve(&cli.to_raw_settings());
        Self {
            config,
            session: Session::new(config, RngPicker::new(), MonotonicClock),
            view: StageView::default(),
            state: AppState::Welcome,
        }
    }

    /// Starts a fresh session; also the restart path, stale timers and
    /// all previous state included.
    pub fn start_session(&mut self) {
        self.view.summary = None;
        self.session.start(self.config, &mut self.view);
        self.state = AppState::Running;
    }

    pub fn on_tick(&mut self) {
        self.session.poll(&mut self.view);
        if self.session.is_finished() {
            self.state = AppState::Summary;
        }
    }

    pub fn on_choose(&mut self, category: EmotionCategory) {
        self.session.choose(category, &mut self.view);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&cli);
    run(&mut terminal, &mut app, &mut CrosstermEventSource)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn run<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut E,
) -> Result<(), Box<dyn Error>> {
    let tick = Duration::from_millis(TICK_RATE_MS);

    terminal.draw(|f| draw(app, f))?;

    loop {
        match events.next_event(tick)? {
            AppEvent::Tick => {
                if app.state == AppState::Running {
                    app.on_tick();
                    terminal.draw(|f| draw(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| draw(app, f))?;
            }
            AppEvent::Key(key) => {
                if !handle_key(app, key.code) {
                    break;
                }
                terminal.draw(|f| draw(app, f))?;
            }
        }
    }

    Ok(())
}

/// Applies one keypress; returns false when the app should quit.
/// This is the whole input collaborator: digits 1-6 map onto the
/// category set in canonical order, space and 'r' start or restart.
fn handle_key(app: &mut App, code: KeyCode) -> bool {
    match code {
        KeyCode::Esc => return false,
        KeyCode::Char(' ') => {
            if app.state != AppState::Running {
                app.start_session();
            }
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.start_session();
        }
        KeyCode::Char(c) => {
            if let Some(category) = EmotionCategory::from_digit(c) {
                app.on_choose(category);
            }
        }
        _ => {}
    }
    true
}

fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
