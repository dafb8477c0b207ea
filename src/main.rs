use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use compose_drill::{
    app::{App, DrillSession},
    app_dirs::AppDirs,
    catalog::Deck,
    config::{Config, ConfigStore, FileConfigStore},
    countdown::{TickScheduler, TICK_RATE_MS},
    cue::{BeepCue, SilentCue, SuccessCue},
    logging,
    runtime::{CrosstermEventSource, DrillEvent, Runner, ThreadScheduler},
    session::{Mode, Session},
};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

/// drill the compose key sequences for accented letters and symbols
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Shows one special character at a time together with its compose key sequence. Type the character to move on; in challenge mode each character has a countdown and running out resets your streak."
)]
pub struct Cli {
    /// start in practice mode (no timer, no streak)
    #[clap(long)]
    practice: bool,

    /// start in challenge mode, overriding a saved practice preference
    #[clap(long, conflicts_with = "practice")]
    challenge: bool,

    /// milliseconds allowed per character in challenge mode
    #[clap(short = 'd', long, value_parser = clap::value_parser!(u64).range(100..))]
    duration_ms: Option<u64>,

    /// deck to start with disabled (repeatable)
    #[clap(long = "disable", value_enum)]
    disabled: Vec<Deck>,

    /// seed for the shuffle, for reproducible sessions
    #[clap(long)]
    seed: Option<u64>,

    /// do not play the success beep
    #[clap(long)]
    mute: bool,

    /// where to write logs (default: the state directory)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// do not save deck and mode choices on exit
    #[clap(long)]
    no_save: bool,
}

impl Cli {
    /// Saved preferences with command line overrides applied
    fn apply(&self, mut cfg: Config) -> Config {
        if self.practice {
            cfg.mode = Mode::Practice;
        } else if self.challenge {
            cfg.mode = Mode::Challenge;
        }
        if let Some(ms) = self.duration_ms {
            cfg.duration_ms = ms;
        }
        if !self.disabled.is_empty() {
            cfg.disabled_decks = self.disabled.clone();
        }
        cfg.muted |= self.mute;
        cfg
    }
}

fn make_cue(muted: bool) -> Box<dyn SuccessCue> {
    if muted {
        return Box::new(SilentCue);
    }
    match BeepCue::new() {
        Ok(cue) => Box::new(cue),
        Err(e) => {
            tracing::warn!(error = %e, "audio unavailable, continuing without sound");
            Box::new(SilentCue)
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let log_path = cli.log_file.clone().or_else(AppDirs::log_path);
    logging::init_logging(log_path.as_deref());

    let store = FileConfigStore::new();
    let cfg = cli.apply(store.load());
    tracing::info!(?cfg, "starting");

    let events = CrosstermEventSource::new();
    let scheduler: Box<dyn TickScheduler> = Box::new(ThreadScheduler::new(events.sender()));
    let session: DrillSession = Session::new(
        cfg.session_settings(cli.seed),
        scheduler,
        make_cue(cfg.muted),
    );
    let mut app = App::new(session);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app, Runner::new(events, Duration::from_millis(TICK_RATE_MS)));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if !cli.no_save {
        if let Err(e) = store.save(&app.preferences(&store.load())) {
            tracing::warn!(error = %e, path = %store.path().display(), "could not save preferences");
        }
    }

    res
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: Runner<CrosstermEventSource>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while !app.should_quit {
        let redraw = match runner.step() {
            Some(DrillEvent::Tick(token)) => app.on_tick(token),
            Some(DrillEvent::Key(key)) => {
                app.on_key(key);
                true
            }
            Some(DrillEvent::Resize) => true,
            None => false,
        };

        if redraw {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        }
    }

    Ok(())
}
