use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncTuning {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_navigation_cooldown_ms")]
    pub navigation_cooldown_ms: u64,
    #[serde(default = "default_buffer_percent")]
    pub buffer_percent: f64,
    #[serde(default = "default_min_viewport_bp")]
    pub min_viewport_bp: u64,
    #[serde(default = "default_large_region_fraction")]
    pub large_region_fraction: f64,
    #[serde(default = "default_centered_window_percent")]
    pub centered_window_percent: f64,
    #[serde(default = "default_centered_window_cap_bp")]
    pub centered_window_cap_bp: u64,
    #[serde(default = "default_centering_min_region_bp")]
    pub centering_min_region_bp: u64,
    #[serde(default = "default_width_px")]
    pub default_width_px: f64,
    #[serde(default = "default_width_probe_bp")]
    pub width_probe_bp: u64,
}

const fn default_poll_interval_ms() -> u64 {
    200
}

const fn default_debounce_ms() -> u64 {
    2_000
}

const fn default_navigation_cooldown_ms() -> u64 {
    5_000
}

const fn default_buffer_percent() -> f64 {
    0.1
}

const fn default_min_viewport_bp() -> u64 {
    1_000
}

const fn default_large_region_fraction() -> f64 {
    0.5
}

const fn default_centered_window_percent() -> f64 {
    0.1
}

const fn default_centered_window_cap_bp() -> u64 {
    50_000
}

const fn default_centering_min_region_bp() -> u64 {
    10_000
}

const fn default_width_px() -> f64 {
    800.0
}

const fn default_width_probe_bp() -> u64 {
    10_000
}

impl Default for SyncTuning {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            debounce_ms: default_debounce_ms(),
            navigation_cooldown_ms: default_navigation_cooldown_ms(),
            buffer_percent: default_buffer_percent(),
            min_viewport_bp: default_min_viewport_bp(),
            large_region_fraction: default_large_region_fraction(),
            centered_window_percent: default_centered_window_percent(),
            centered_window_cap_bp: default_centered_window_cap_bp(),
            centering_min_region_bp: default_centering_min_region_bp(),
            default_width_px: default_width_px(),
            width_probe_bp: default_width_probe_bp(),
        }
    }
}

impl SyncTuning {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn navigation_cooldown(&self) -> Duration {
        Duration::from_millis(self.navigation_cooldown_ms)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTuning {
    pub path: PathBuf,
    pub tuning: SyncTuning,
}

fn config_directory() -> Option<PathBuf> {
    if let Some(path) = dirs::config_dir() {
        return Some(path.join("locusync"));
    }

    dirs::home_dir().map(|path| path.join(".config").join("locusync"))
}

pub fn config_path() -> Option<PathBuf> {
    config_directory().map(|path| path.join("config.toml"))
}

pub fn load() -> Result<LoadedTuning, String> {
    let path = config_path().ok_or_else(|| "cannot resolve config path".to_string())?;
    let tuning = load_from_path(&path)?;
    Ok(LoadedTuning { path, tuning })
}

pub fn load_from_path(path: &Path) -> Result<SyncTuning, String> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return Ok(SyncTuning::default());
        }
        Err(error) => return Err(format!("tuning read failed: {error}")),
    };

    toml::from_str::<SyncTuning>(&raw).map_err(|error| format!("tuning parse failed: {error}"))
}

pub fn save_to_path(path: &Path, tuning: &SyncTuning) -> Result<(), String> {
    let Some(parent) = path.parent() else {
        return Err("tuning path missing parent directory".to_string());
    };

    fs::create_dir_all(parent)
        .map_err(|error| format!("tuning directory create failed: {error}"))?;
    let encoded =
        toml::to_string_pretty(tuning).map_err(|error| format!("tuning encode failed: {error}"))?;
    fs::write(path, encoded).map_err(|error| format!("tuning write failed: {error}"))
}
