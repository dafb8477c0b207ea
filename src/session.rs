use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{self, CatalogEntry, Deck, CATALOG};
use crate::countdown::{Countdown, TickScheduler, TickToken, DEFAULT_DURATION_MS, TICK_RATE_MS};
use crate::cue::SuccessCue;
use crate::draw::DrawOrder;
use crate::pool::{active_pool, EnabledDecks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
pub enum Mode {
    /// No timer, no streak
    Practice,
    /// Per-target countdown; running out resets the streak
    Challenge,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Practice => Mode::Challenge,
            Mode::Challenge => Mode::Practice,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub duration_ms: u64,
    pub mode: Mode,
    pub disabled: Vec<Deck>,
    pub seed: Option<u64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            mode: Mode::Challenge,
            disabled: Vec::new(),
            seed: None,
        }
    }
}

/// Everything the UI needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub target: &'static CatalogEntry,
    pub user_input: String,
    pub success_streak: u32,
    pub time_remaining_ms: u64,
    pub duration_ms: u64,
    pub enabled: EnabledDecks,
    pub mode: Mode,
    pub matches_total: u32,
}

/// One drill session: the active pool, its draw order, the input buffer,
/// the streak and the challenge countdown.
///
/// At most one tick task is live at any time. Every restart cancels the
/// previous task first, and ticks from any other token are dropped.
pub struct Session<S: TickScheduler, C: SuccessCue> {
    catalog: &'static [CatalogEntry],
    enabled: EnabledDecks,
    order: DrawOrder<&'static CatalogEntry>,
    rng: StdRng,
    scheduler: S,
    cue: C,
    mode: Mode,
    duration_ms: u64,
    countdown: Countdown,
    active_tick: Option<TickToken>,
    user_input: String,
    success_streak: u32,
    matches_total: u32,
}

impl<S: TickScheduler, C: SuccessCue> Session<S, C> {
    pub fn new(settings: SessionSettings, scheduler: S, cue: C) -> Self {
        Self::with_catalog(CATALOG, settings, scheduler, cue)
    }

    pub fn with_catalog(
        catalog: &'static [CatalogEntry],
        settings: SessionSettings,
        scheduler: S,
        cue: C,
    ) -> Self {
        let mut enabled = EnabledDecks::all_enabled(catalog);
        for deck in &settings.disabled {
            enabled.set(*deck, false);
        }

        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let order = DrawOrder::new(active_pool(catalog, &enabled), &mut rng);

        let mut session = Self {
            catalog,
            enabled,
            order,
            rng,
            scheduler,
            cue,
            mode: settings.mode,
            duration_ms: settings.duration_ms,
            countdown: Countdown::Suspended {
                remaining_ms: settings.duration_ms,
            },
            active_tick: None,
            user_input: String::new(),
            success_streak: 0,
            matches_total: 0,
        };
        if session.mode == Mode::Challenge {
            session.restart_countdown();
        }
        debug!(pool = session.order.len(), mode = %session.mode, "session started");
        session
    }

    /// Target being drilled; the first catalog entry when the pool is empty
    pub fn current_target(&self) -> &'static CatalogEntry {
        match self.order.current() {
            Some(entry) => entry,
            None => self.catalog.first().unwrap_or_else(catalog::fallback),
        }
    }

    pub fn display_sequence(&self) -> Vec<&'static str> {
        catalog::display_sequence(self.current_target())
    }

    /// Replaces the input buffer with `text` and checks it against the
    /// target. Only an exact match counts. Returns true on a match.
    pub fn submit_input(&mut self, text: &str) -> bool {
        self.user_input.clear();
        self.user_input.push_str(text);

        let target = self.current_target();
        if text != target.character {
            return false;
        }

        if let Err(e) = self.cue.play() {
            warn!(error = %e, "failed to play success cue");
        }

        if self.mode == Mode::Challenge {
            // A match after the timer ran out moves on but earns nothing
            if self.countdown.is_counting() {
                self.success_streak += 1;
            }
            self.restart_countdown();
        }

        self.matches_total += 1;
        self.user_input.clear();
        if self.order.advance(&mut self.rng) {
            debug!("draw order exhausted, reshuffled");
        }
        debug!(
            matched = target.character,
            next = self.current_target().character,
            streak = self.success_streak,
            "target matched"
        );
        true
    }

    pub fn push_char(&mut self, c: char) -> bool {
        let mut text = self.user_input.clone();
        text.push(c);
        self.submit_input(&text)
    }

    pub fn backspace(&mut self) -> bool {
        let mut text = self.user_input.clone();
        text.pop();
        self.submit_input(&text)
    }

    pub fn clear_input(&mut self) {
        self.user_input.clear();
    }

    /// Flips one deck and starts over on a fresh shuffle of the new pool.
    /// The streak is kept.
    pub fn toggle_deck(&mut self, deck: Deck) {
        self.enabled.toggle(deck);
        self.order = DrawOrder::new(active_pool(self.catalog, &self.enabled), &mut self.rng);
        self.user_input.clear();
        if self.mode == Mode::Challenge {
            self.restart_countdown();
        }
        debug!(
            deck = %deck,
            enabled = self.enabled.is_enabled(deck),
            pool = self.order.len(),
            "deck toggled"
        );
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        match self.mode {
            Mode::Practice => {
                self.stop_countdown();
                self.countdown = self.countdown.suspend();
            }
            Mode::Challenge => self.restart_countdown(),
        }
        info!(mode = %self.mode, "mode switched");
    }

    /// Applies a tick from the task identified by `token`. Returns false
    /// when the tick was stale and ignored.
    pub fn on_tick(&mut self, token: TickToken) -> bool {
        if self.active_tick != Some(token) {
            return false;
        }

        self.countdown = self.countdown.tick(TICK_RATE_MS);
        if self.countdown.is_expired() {
            self.stop_countdown();
            if self.success_streak > 0 {
                debug!(streak = self.success_streak, "time ran out, streak reset");
            }
            self.success_streak = 0;
        }
        true
    }

    fn restart_countdown(&mut self) {
        self.stop_countdown();
        self.countdown = Countdown::full(self.duration_ms);
        self.active_tick = Some(self.scheduler.start(Duration::from_millis(TICK_RATE_MS)));
    }

    fn stop_countdown(&mut self) {
        if let Some(token) = self.active_tick.take() {
            self.scheduler.cancel(token);
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            target: self.current_target(),
            user_input: self.user_input.clone(),
            success_streak: self.success_streak,
            time_remaining_ms: self.time_remaining_ms(),
            duration_ms: self.duration_ms,
            enabled: self.enabled.clone(),
            mode: self.mode,
            matches_total: self.matches_total,
        }
    }

    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    pub fn success_streak(&self) -> u32 {
        self.success_streak
    }

    pub fn time_remaining_ms(&self) -> u64 {
        self.countdown.remaining_ms()
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn enabled_decks(&self) -> &EnabledDecks {
        &self.enabled
    }

    pub fn pool_size(&self) -> usize {
        self.order.len()
    }

    pub fn active_tick(&self) -> Option<TickToken> {
        self.active_tick
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<S: TickScheduler, C: SuccessCue> Drop for Session<S, C> {
    fn drop(&mut self) {
        self.stop_countdown();
    }
}
