use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use rodio::Source;
use thiserror::Error;

const BEEP_HZ: f32 = 880.0;
const BEEP_MS: u64 = 120;
const BEEP_VOLUME: f32 = 0.2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CueError {
    #[error("no audio output device available: {0}")]
    NoOutputDevice(String),
    #[error("audio thread is no longer running")]
    Disconnected,
}

/// Confirmation played after a correct answer. Must not block.
pub trait SuccessCue {
    fn play(&self) -> Result<(), CueError>;
}

impl<C: SuccessCue + ?Sized> SuccessCue for Box<C> {
    fn play(&self) -> Result<(), CueError> {
        (**self).play()
    }
}

/// Muted cue
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCue;

impl SuccessCue for SilentCue {
    fn play(&self) -> Result<(), CueError> {
        Ok(())
    }
}

/// Short sine beep played on a dedicated audio thread.
///
/// The output stream is not `Send`, so it is opened on the player thread and
/// kept there; `play` only pushes a request onto the channel.
pub struct BeepCue {
    tx: Sender<()>,
}

impl BeepCue {
    pub fn new() -> Result<Self, CueError> {
        let (tx, rx) = mpsc::channel::<()>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), CueError>>();

        thread::spawn(move || {
            let (_stream, handle) = match rodio::OutputStream::try_default() {
                Ok(pair) => {
                    let _ = ready_tx.send(Ok(()));
                    pair
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(CueError::NoOutputDevice(e.to_string())));
                    return;
                }
            };

            while rx.recv().is_ok() {
                match rodio::Sink::try_new(&handle) {
                    Ok(sink) => {
                        let beep = rodio::source::SineWave::new(BEEP_HZ)
                            .take_duration(Duration::from_millis(BEEP_MS))
                            .amplify(BEEP_VOLUME);
                        sink.append(beep);
                        sink.detach();
                    }
                    Err(e) => tracing::warn!(error = %e, "could not open audio sink"),
                }
            }
        });

        ready_rx.recv().map_err(|_| CueError::Disconnected)??;
        Ok(Self { tx })
    }
}

impl SuccessCue for BeepCue {
    fn play(&self) -> Result<(), CueError> {
        self.tx.send(()).map_err(|_| CueError::Disconnected)
    }
}
