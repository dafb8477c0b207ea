// Library surface for headless/integration tests and reuse.
// main.rs only wires the terminal, the CLI and the audio device.
pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod config;
pub mod countdown;
pub mod cue;
pub mod draw;
pub mod logging;
pub mod pool;
pub mod runtime;
pub mod session;
pub mod ui;
