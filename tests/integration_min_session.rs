// Minimal integration test that drives the compiled binary through a PTY.
// This exercises the real event loop and crossterm input handling across
// the main boundaries without relying on internal modules.
//
// Notes:
// - Requires a TTY; runs muted so no audio device is needed.
// - Marked Unix-only and ignored by default to avoid CI/platform issues.
// - Run manually via: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_starts_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("compose-drill");
    let dir = tempfile::tempdir()?;
    let cmd = format!(
        "{} --mute --no-save --seed 1 --log-file {}",
        bin.display(),
        dir.path().join("drill.log").display()
    );

    let mut p = spawn(cmd)?;

    // Give the app a moment to initialize the terminal/alternate screen
    std::thread::sleep(Duration::from_millis(200));

    // Toggle a deck and the mode, then type something that never matches
    p.send("\x1bOP")?; // F1
    p.send("\t")?;
    p.send("zz")?;
    std::thread::sleep(Duration::from_millis(200));

    p.send("\x1b")?; // ESC

    p.expect(Eof)?;
    Ok(())
}
