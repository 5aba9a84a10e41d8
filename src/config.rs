use anyhow::{Context, Result};
use chrono::Duration;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

use crate::engine::EngineConfig;
use crate::sim::Rules;
use crate::store::atomic_rename;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pet_key: String,
    pub history_key: String,
    pub history_cap: usize,
    pub decay_interval_secs: u64,
    pub xp_per_level: u64,
    pub enable_color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            pet_key: engine.pet_key,
            history_key: engine.history_key,
            history_cap: engine.history_cap,
            decay_interval_secs: 6 * 3600,
            xp_per_level: engine.rules.xp_per_level,
            enable_color: true,
        }
    }
}

impl Settings {
    pub fn engine_config(&self) -> EngineConfig {
        let secs = i64::try_from(self.decay_interval_secs.max(1)).unwrap_or(i64::MAX / 1000);
        EngineConfig {
            pet_key: self.pet_key.clone(),
            history_key: self.history_key.clone(),
            history_cap: self.history_cap,
            rules: Rules {
                decay_interval: Duration::try_seconds(secs).unwrap_or(Duration::MAX),
                xp_per_level: self.xp_per_level.max(1),
            },
        }
    }
}

pub struct Paths {
    pub data_dir: PathBuf,
    pub settings_path: PathBuf,
}

impl Paths {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let data_dir = dir.into();
        Self {
            settings_path: data_dir.join("settings.json"),
            data_dir,
        }
    }
}

pub fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "ecopet", "EcoPet")
        .context("could not resolve project directories")?;
    Ok(Paths::in_dir(proj.data_local_dir()))
}

/// Missing or unreadable settings fall back to defaults; missing fields default individually.
pub fn load_settings(path: &Path) -> Settings {
    let Ok(s) = fs::read_to_string(path) else {
        return Settings::default();
    };
    match serde_json::from_str::<Settings>(&s) {
        Ok(v) => v,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "settings unreadable, using defaults");
            Settings::default()
        }
    }
}

pub fn save_settings_atomic(path: &Path, s: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(&tmp, data)?;
    atomic_rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let s = load_settings(&temp_dir.path().join("settings.json"));
        assert_eq!(s, Settings::default());
        assert_eq!(s.pet_key, "pet_state_v2");
        assert_eq!(s.history_cap, 50);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, r#"{ "history_cap": 10, "enable_color": false }"#).unwrap();
        let s = load_settings(&path);
        assert_eq!(s.history_cap, 10);
        assert!(!s.enable_color);
        assert_eq!(s.xp_per_level, 20);
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::in_dir(temp_dir.path().join("nested"));
        let s = Settings {
            decay_interval_secs: 15,
            ..Settings::default()
        };
        save_settings_atomic(&paths.settings_path, &s).unwrap();
        assert_eq!(load_settings(&paths.settings_path), s);
    }

    #[test]
    fn engine_config_maps_units() {
        let s = Settings {
            decay_interval_secs: 15,
            xp_per_level: 0,
            ..Settings::default()
        };
        let cfg = s.engine_config();
        assert_eq!(cfg.rules.decay_interval, Duration::seconds(15));
        assert_eq!(cfg.rules.xp_per_level, 1);
    }
}
