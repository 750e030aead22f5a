//! User settings stored as settings.json in the app data directory

use crate::constants::{INITIAL_VISIBLE_COUNT, LOAD_MORE_COUNT, MAX_CONCURRENT_FETCHES};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Initial window size
    pub window_w: f32,
    pub window_h: f32,

    // Header text
    pub title: String,
    pub subtitle: String,

    // Disclosure
    pub initial_visible_count: usize,
    pub load_more_count: usize,

    // Catalog location (defaults to catalog.json in the data dir)
    pub catalog_path: Option<String>,

    // Media loading
    pub max_concurrent_fetches: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_w: 1100.0,
            window_h: 800.0,
            title: "My Exclusive Packs".to_string(),
            subtitle: "Exclusive content".to_string(),
            initial_visible_count: INITIAL_VISIBLE_COUNT,
            load_more_count: LOAD_MORE_COUNT,
            catalog_path: None,
            max_concurrent_fetches: MAX_CONCURRENT_FETCHES,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str::<Settings>(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings.sanitized()
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, writing defaults");
                let settings = Self::default();
                settings.save(data_dir);
                settings
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    pub fn catalog_path_or_default(&self, data_dir: &Path) -> PathBuf {
        self.catalog_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("catalog.json"))
    }

    // A zero step would leave the "show more" tile stuck on screen
    fn sanitized(mut self) -> Self {
        if self.load_more_count == 0 {
            warn!("load_more_count must be positive, using default");
            self.load_more_count = LOAD_MORE_COUNT;
        }
        if self.max_concurrent_fetches == 0 {
            self.max_concurrent_fetches = MAX_CONCURRENT_FETCHES;
        }
        self.window_w = self.window_w.max(320.0);
        self.window_h = self.window_h.max(240.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings, Settings::default());
        assert!(dir.path().join("settings.json").exists());
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            initial_visible_count: 6,
            load_more_count: 3,
            catalog_path: Some("/srv/media/catalog.json".into()),
            ..Settings::default()
        };
        settings.save(dir.path());
        assert_eq!(Settings::load(dir.path()), settings);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), r#"{"title": "Vault"}"#).unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.title, "Vault");
        assert_eq!(settings.initial_visible_count, INITIAL_VISIBLE_COUNT);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{ nope").unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn zero_step_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"load_more_count": 0, "max_concurrent_fetches": 0}"#,
        )
        .unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.load_more_count, LOAD_MORE_COUNT);
        assert_eq!(settings.max_concurrent_fetches, MAX_CONCURRENT_FETCHES);
    }

    #[test]
    fn catalog_path_defaults_to_data_dir() {
        let settings = Settings::default();
        assert_eq!(
            settings.catalog_path_or_default(Path::new("/data")),
            PathBuf::from("/data/catalog.json")
        );
    }
}
