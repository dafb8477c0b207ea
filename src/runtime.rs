use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

use crate::countdown::{TickScheduler, TickToken};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum DrillEvent {
    Key(KeyEvent),
    Resize,
    Tick(TickToken),
}

/// Source of events (keyboard, resize, countdown ticks)
pub trait DrillEventSource {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<DrillEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    tx: Sender<DrillEvent>,
    rx: Receiver<DrillEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        let key_tx = tx.clone();
        thread::spawn(move || loop {
            let evt = match event::read() {
                // Windows reports releases too
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => DrillEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => DrillEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    tracing::error!(error = %e, "terminal event stream failed");
                    break;
                }
            };
            if key_tx.send(evt).is_err() {
                break;
            }
        });

        Self { tx, rx }
    }

    /// Sender feeding the same queue, for tick tasks
    pub fn sender(&self) -> Sender<DrillEvent> {
        self.tx.clone()
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DrillEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<DrillEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<DrillEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<DrillEvent>) -> Self {
        Self { rx }
    }
}

impl DrillEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<DrillEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runs each countdown on its own thread, posting `DrillEvent::Tick` into
/// the event queue until cancelled.
pub struct ThreadScheduler {
    tx: Sender<DrillEvent>,
    next: u64,
    running: HashMap<TickToken, Arc<AtomicBool>>,
}

impl ThreadScheduler {
    pub fn new(tx: Sender<DrillEvent>) -> Self {
        Self {
            tx,
            next: 0,
            running: HashMap::new(),
        }
    }

    pub fn running(&self) -> usize {
        self.running.len()
    }
}

impl TickScheduler for ThreadScheduler {
    fn start(&mut self, period: Duration) -> TickToken {
        self.next += 1;
        let token = TickToken(self.next);
        let cancelled = Arc::new(AtomicBool::new(false));
        self.running.insert(token, cancelled.clone());

        let tx = self.tx.clone();
        thread::spawn(move || loop {
            thread::sleep(period);
            if cancelled.load(Ordering::SeqCst) || tx.send(DrillEvent::Tick(token)).is_err() {
                break;
            }
        });
        token
    }

    fn cancel(&mut self, token: TickToken) {
        if let Some(cancelled) = self.running.remove(&token) {
            cancelled.store(true, Ordering::SeqCst);
        }
    }
}

impl Drop for ThreadScheduler {
    fn drop(&mut self) {
        for (_, cancelled) in self.running.drain() {
            cancelled.store(true, Ordering::SeqCst);
        }
    }
}

/// Pulls one event at a time so the caller never handles two at once
pub struct Runner<E: DrillEventSource> {
    event_source: E,
    poll: Duration,
}

impl<E: DrillEventSource> Runner<E> {
    pub fn new(event_source: E, poll: Duration) -> Self {
        Self { event_source, poll }
    }

    /// Blocks up to the poll interval; `None` when nothing arrived
    pub fn step(&self) -> Option<DrillEvent> {
        self.event_source.recv_timeout(self.poll).ok()
    }

    pub fn source(&self) -> &E {
        &self.event_source
    }
}
