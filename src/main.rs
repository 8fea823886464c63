pub mod ui;

use chrono::Local;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{info, warn};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::{Duration, Instant},
};
use steakr::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    cooking::{Doneness, MAX_THICKNESS_MM, MIN_THICKNESS_MM},
    cue::{Bell, Cue, CueSink, Silent},
    history::{CookLog, CookRecord},
    logging::init_file_logger,
    runtime::{CrosstermEventSource, FixedTicker, Runner, SteakEvent},
    session::CookingSession,
    setup::SetupState,
    timer::TimerEvent,
};

const TICK_RATE_MS: u64 = 100;
const HISTORY_LINES: usize = 10;

/// terminal steak timer with synchronized finishes
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal steak timer: order steaks by thickness and doneness, then sear, flip and rest each one on its own countdown, optionally delaying starts so every steak is ready at the same moment."
)]
pub struct Cli {
    /// starting thickness in millimetres (10-60)
    #[clap(short = 't', long, value_parser = clap::value_parser!(u32).range((MIN_THICKNESS_MM as i64)..=(MAX_THICKNESS_MM as i64)))]
    thickness: Option<u32>,

    /// starting doneness
    #[clap(short = 'd', long, value_enum)]
    doneness: Option<Doneness>,

    /// silence the terminal bell cues
    #[clap(short = 'm', long)]
    mute: bool,

    /// print the most recent cooks and exit
    #[clap(long)]
    history: bool,

    /// don't record finished steaks in the cook log
    #[clap(long)]
    no_history: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Setup,
    SyncPrompt,
    Cooking,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub state: AppState,
    pub setup: SetupState,
    pub session: Option<CookingSession>,
    pub selected: usize,
    config_store: Option<FileConfigStore>,
    cook_log: Option<CookLog>,
}

impl App {
    pub fn new(
        cli: &Cli,
        mut config: Config,
        config_store: Option<FileConfigStore>,
        cook_log: Option<CookLog>,
    ) -> Self {
        if let Some(thickness) = cli.thickness {
            config.thickness_mm = thickness;
        }
        if let Some(doneness) = cli.doneness {
            config.doneness = doneness;
        }
        if cli.mute {
            config.sound = false;
        }
        if cli.no_history {
            config.record_history = false;
        }

        Self {
            setup: SetupState::new(config.thickness_mm, config.doneness),
            config,
            state: AppState::Setup,
            session: None,
            selected: 0,
            config_store,
            cook_log,
        }
    }

    /// Start, asking about synchronization first when it matters
    pub fn request_cooking(&mut self) {
        if !self.setup.can_start() {
            return;
        }
        if self.setup.needs_sync_prompt() {
            self.state = AppState::SyncPrompt;
        } else {
            self.start_cooking(false);
        }
    }

    pub fn start_cooking(&mut self, synchronize: bool) {
        self.remember_choices();
        let order = self.setup.take_order();
        self.session = Some(CookingSession::new(order, synchronize));
        self.selected = 0;
        self.state = AppState::Cooking;
    }

    pub fn finish_cooking(&mut self) {
        if let Some(session) = self.session.take() {
            info!(
                "left the dashboard with {} of {} steak(s) ready",
                session.timers().iter().filter(|t| t.is_finished()).count(),
                session.len()
            );
        }
        self.selected = 0;
        self.state = AppState::Setup;
    }

    fn remember_choices(&mut self) {
        self.config.thickness_mm = self.setup.thickness_mm;
        self.config.doneness = self.setup.doneness;
        if let Some(store) = &self.config_store {
            if let Err(err) = store.save(&self.config) {
                warn!("failed to save config to {}: {err}", store.path().display());
            }
        }
    }

    /// Advance the timers by wall time and route their events to cues and
    /// the cook log
    pub fn on_elapsed(&mut self, elapsed: Duration, cues: &mut dyn CueSink, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.advance(elapsed);

        let mut finished = Vec::new();
        for ev in session.drain_events() {
            if let Some(cue) = Cue::for_event(&ev.event) {
                cues.play(cue, now);
            }
            if ev.event == TimerEvent::SessionComplete {
                if let Some(timer) = session.timer(ev.index) {
                    info!("steak #{} is ready", ev.index + 1);
                    finished.push(CookRecord::from_timer(
                        timer,
                        session.is_synchronized(),
                        Local::now(),
                    ));
                }
            }
        }
        cues.poll(now);

        if self.config.record_history {
            if let Some(log) = &self.cook_log {
                if let Err(err) = log.append(&finished) {
                    warn!("{err}");
                }
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match self.state {
            AppState::Setup => self.on_setup_key(key),
            AppState::SyncPrompt => self.on_sync_prompt_key(key),
            AppState::Cooking => self.on_cooking_key(key),
        }
    }

    fn on_setup_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Left | KeyCode::Char('h') => self.setup.adjust_thickness(-1),
            KeyCode::Right | KeyCode::Char('l') => self.setup.adjust_thickness(1),
            KeyCode::PageDown => self.setup.adjust_thickness(-5),
            KeyCode::PageUp => self.setup.adjust_thickness(5),
            KeyCode::Up | KeyCode::Char('k') => self.setup.prev_doneness(),
            KeyCode::Down | KeyCode::Char('j') => self.setup.next_doneness(),
            KeyCode::Tab => self.setup.select_next(),
            KeyCode::BackTab => self.setup.select_prev(),
            KeyCode::Enter | KeyCode::Char('a') => {
                if let Err(err) = self.setup.add_steak() {
                    warn!("{err}");
                }
            }
            KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('d') => {
                self.setup.remove_selected();
            }
            KeyCode::Char('s') => self.request_cooking(),
            _ => {}
        }
        Flow::Continue
    }

    fn on_sync_prompt_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => self.start_cooking(true),
            KeyCode::Char('n') => self.start_cooking(false),
            KeyCode::Esc => self.state = AppState::Setup,
            _ => {}
        }
        Flow::Continue
    }

    fn on_cooking_key(&mut self, key: KeyEvent) -> Flow {
        let Some(session) = self.session.as_mut() else {
            self.state = AppState::Setup;
            return Flow::Continue;
        };
        let count = session.len();

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') if count > 0 => {
                self.selected = (self.selected + 1) % count;
            }
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') if count > 0 => {
                self.selected = (self.selected + count - 1) % count;
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if index < count {
                    self.selected = index;
                }
            }
            KeyCode::Char(' ') | KeyCode::Char('p') => session.toggle(self.selected),
            KeyCode::Char('s') => session.skip(self.selected),
            KeyCode::Char('f') => self.finish_cooking(),
            _ => {}
        }
        Flow::Continue
    }
}

fn print_history() -> Result<(), Box<dyn Error>> {
    let Some(path) = AppDirs::history_path() else {
        println!("no cook log location available");
        return Ok(());
    };
    let records = CookLog::new(&path).recent(HISTORY_LINES)?;
    if records.is_empty() {
        println!("no cooks recorded yet ({})", path.display());
        return Ok(());
    }

    let now = Local::now();
    for record in records.iter().rev() {
        println!("{}", record.describe(now));
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.history {
        return print_history();
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        if let Err(err) = init_file_logger(&path) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store = FileConfigStore::new();
    let config = store.load();
    let cook_log = AppDirs::history_path().map(CookLog::new);
    let mut app = App::new(&cli, config, Some(store), cook_log);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut cues: Box<dyn CueSink> = if app.config.sound {
        Box::new(Bell::new(io::stdout()))
    } else {
        Box::new(Silent)
    };

    let result = start_tui(&mut terminal, &mut app, cues.as_mut());

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    cues: &mut dyn CueSink,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let mut last = Instant::now();

    loop {
        terminal.draw(|f| ui(app, f))?;

        let event = runner.step();
        let now = Instant::now();
        app.on_elapsed(now.duration_since(last), cues, now);
        last = now;

        match event {
            SteakEvent::Tick | SteakEvent::Resize => {}
            SteakEvent::Key(key) => {
                if app.on_key(key) == Flow::Quit {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    ui::screen::current_screen(&app.state).render(app, f);
}
