use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Config;
use crate::countdown::{TickScheduler, TickToken};
use crate::cue::SuccessCue;
use crate::session::Session;

pub type DrillSession = Session<Box<dyn TickScheduler>, Box<dyn SuccessCue>>;

/// Presentation-side state around one session
pub struct App {
    pub session: DrillSession,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: DrillSession) -> Self {
        Self {
            session,
            should_quit: false,
        }
    }

    /// Maps a key press onto a session operation.
    ///
    /// F1..F7 toggle decks in sidebar order, Tab switches mode, Esc and
    /// Ctrl+C quit. Anything printable goes into the input buffer.
    pub fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char(_)
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
            KeyCode::Char(c) => {
                self.session.push_char(c);
            }
            KeyCode::Backspace => {
                self.session.backspace();
            }
            KeyCode::Tab => self.session.toggle_mode(),
            KeyCode::F(n) if n >= 1 => {
                if let Some(deck) = self.session.enabled_decks().nth(usize::from(n) - 1) {
                    self.session.toggle_deck(deck);
                }
            }
            _ => {}
        }
    }

    pub fn on_tick(&mut self, token: TickToken) -> bool {
        self.session.on_tick(token)
    }

    /// Preferences to persist: the starting one with the current decks and mode
    pub fn preferences(&self, base: &Config) -> Config {
        Config {
            mode: self.session.mode(),
            disabled_decks: self.session.enabled_decks().disabled().collect(),
            ..base.clone()
        }
    }
}
