use std::time::Duration;

pub const TICK_RATE_MS: u64 = 100;
pub const DEFAULT_DURATION_MS: u64 = 5000;

/// Identifies one started periodic task. Ticks carry the token of the
/// task that produced them so superseded tasks can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(pub u64);

/// Starts and cancels periodic tick tasks
pub trait TickScheduler {
    fn start(&mut self, period: Duration) -> TickToken;
    fn cancel(&mut self, token: TickToken);
}

/// Scheduler that never ticks on its own; tests deliver ticks by hand.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    pub started: Vec<TickToken>,
    pub cancelled: Vec<TickToken>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens started and not yet cancelled
    pub fn live(&self) -> Vec<TickToken> {
        self.started
            .iter()
            .filter(|t| !self.cancelled.contains(t))
            .copied()
            .collect()
    }
}

impl TickScheduler for ManualScheduler {
    fn start(&mut self, _period: Duration) -> TickToken {
        self.next += 1;
        let token = TickToken(self.next);
        self.started.push(token);
        token
    }

    fn cancel(&mut self, token: TickToken) {
        self.cancelled.push(token);
    }
}

impl<S: TickScheduler + ?Sized> TickScheduler for Box<S> {
    fn start(&mut self, period: Duration) -> TickToken {
        (**self).start(period)
    }

    fn cancel(&mut self, token: TickToken) {
        (**self).cancel(token)
    }
}

/// Per-target timer state in challenge mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Counting { remaining_ms: u64 },
    /// Ran out before a match; stays at zero until restarted.
    Expired,
    /// Practice mode: frozen where it was when the mode switched.
    Suspended { remaining_ms: u64 },
}

impl Countdown {
    pub fn full(duration_ms: u64) -> Self {
        Countdown::Counting {
            remaining_ms: duration_ms,
        }
    }

    pub fn remaining_ms(&self) -> u64 {
        match *self {
            Countdown::Counting { remaining_ms } | Countdown::Suspended { remaining_ms } => {
                remaining_ms
            }
            Countdown::Expired => 0,
        }
    }

    /// Applies one tick of `step_ms`. Only a counting timer moves.
    pub fn tick(self, step_ms: u64) -> Self {
        match self {
            Countdown::Counting { remaining_ms } if remaining_ms <= step_ms => Countdown::Expired,
            Countdown::Counting { remaining_ms } => Countdown::Counting {
                remaining_ms: remaining_ms - step_ms,
            },
            other => other,
        }
    }

    pub fn suspend(self) -> Self {
        Countdown::Suspended {
            remaining_ms: self.remaining_ms(),
        }
    }

    pub fn is_counting(&self) -> bool {
        matches!(self, Countdown::Counting { .. })
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Countdown::Expired)
    }
}
