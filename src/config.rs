use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Deck;
use crate::countdown::DEFAULT_DURATION_MS;
use crate::session::{Mode, SessionSettings};

/// User preferences. Progress (streaks) is never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub duration_ms: u64,
    pub mode: Mode,
    pub muted: bool,
    pub disabled_decks: Vec<Deck>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            mode: Mode::Challenge,
            muted: false,
            disabled_decks: Vec::new(),
        }
    }
}

impl Config {
    pub fn session_settings(&self, seed: Option<u64>) -> SessionSettings {
        SessionSettings {
            duration_ms: self.duration_ms,
            mode: self.mode,
            disabled: self.disabled_decks.clone(),
            seed,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "compose-drill") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("compose_drill_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable config");
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            duration_ms: 3000,
            mode: Mode::Practice,
            muted: true,
            disabled_decks: vec![Deck::Math, Deck::German],
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_gives_default() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn corrupt_file_gives_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{ not json").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{"muted": true}"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert!(cfg.muted);
        assert_eq!(cfg.duration_ms, DEFAULT_DURATION_MS);
        assert_eq!(cfg.mode, Mode::Challenge);
    }

    #[test]
    fn session_settings_carry_preferences() {
        let cfg = Config {
            duration_ms: 2000,
            disabled_decks: vec![Deck::Symbols],
            ..Default::default()
        };
        let settings = cfg.session_settings(Some(9));
        assert_eq!(settings.duration_ms, 2000);
        assert_eq!(settings.disabled, vec![Deck::Symbols]);
        assert_eq!(settings.seed, Some(9));
    }
}
