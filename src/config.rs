//! Configuration loading.
//!
//! Settings live in `<data dir>/config.toml`, next to the recent-file lists
//! and the log file. The data directory is `~/.media-deck` unless
//! `MEDIA_DECK_DIR` or `--data-dir` points elsewhere. A commented default
//! config is written on first run; any missing key falls back to its default.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::widgets::ZoomLimits;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

/// Top-level configuration object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(skip)] // Set at runtime from the resolved data directory
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    #[serde(default = "default_gesture_port")]
    pub port: u16,
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            port: default_gesture_port(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

fn default_gesture_port() -> u16 {
    9999
}

fn default_read_timeout_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_command")]
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_startup_grace_ms")]
    pub startup_grace_ms: u64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            command: default_camera_command(),
            args: Vec::new(),
            startup_grace_ms: default_startup_grace_ms(),
        }
    }
}

fn default_camera_command() -> String {
    "gesture_client".to_string()
}

fn default_startup_grace_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_seek_step")]
    pub seek_step_secs: i64,
    #[serde(default = "default_volume_step")]
    pub volume_step: i32,
    #[serde(default = "default_initial_volume")]
    pub initial_volume: u8, // 0..=100
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            seek_step_secs: default_seek_step(),
            volume_step: default_volume_step(),
            initial_volume: default_initial_volume(),
            sound_enabled: default_sound_enabled(),
        }
    }
}

fn default_seek_step() -> i64 {
    10
}

fn default_volume_step() -> i32 {
    5
}

fn default_initial_volume() -> u8 {
    100
}

fn default_sound_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_fit_ratio")]
    pub fit_ratio: f64,
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
    #[serde(default = "default_min_scale")]
    pub min_scale: f64,
    #[serde(default = "default_max_scale")]
    pub max_scale: f64,
    #[serde(default = "default_key_pan_step")]
    pub key_pan_step: f64,
    #[serde(default = "default_gesture_pan_step")]
    pub gesture_pan_step: f64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            fit_ratio: default_fit_ratio(),
            zoom_step: default_zoom_step(),
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
            key_pan_step: default_key_pan_step(),
            gesture_pan_step: default_gesture_pan_step(),
        }
    }
}

impl ImageConfig {
    /// Reject values that would make zoom or pan misbehave
    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.fit_ratio,
            self.zoom_step,
            self.min_scale,
            self.max_scale,
            self.key_pan_step,
            self.gesture_pan_step,
        ]
        .iter()
        .all(|v| v.is_finite());
        ensure!(finite, "[image] values must be finite numbers");
        ensure!(
            self.fit_ratio > 0.0 && self.fit_ratio <= 1.0,
            "[image] fit_ratio must be in (0, 1], got {}",
            self.fit_ratio
        );
        ensure!(
            self.min_scale > 0.0 && self.min_scale <= self.max_scale,
            "[image] needs 0 < min_scale <= max_scale, got {} and {}",
            self.min_scale,
            self.max_scale
        );
        ensure!(
            self.zoom_step > 0.0,
            "[image] zoom_step must be positive, got {}",
            self.zoom_step
        );
        Ok(())
    }

    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits {
            fit_ratio: self.fit_ratio,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
        }
    }
}

fn default_fit_ratio() -> f64 {
    0.9
}

fn default_zoom_step() -> f64 {
    1.25
}

fn default_min_scale() -> f64 {
    0.1
}

fn default_max_scale() -> f64 {
    10.0
}

fn default_key_pan_step() -> f64 {
    20.0
}

fn default_gesture_pan_step() -> f64 {
    50.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_timeout_ms: default_poll_timeout_ms(),
        }
    }
}

fn default_poll_timeout_ms() -> u64 {
    16 // ~60 FPS
}

impl Config {
    /// Resolve the data directory: explicit override, then `MEDIA_DECK_DIR`,
    /// then `~/.media-deck`
    pub fn resolve_data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = override_dir {
            return Ok(dir.to_path_buf());
        }

        if let Ok(custom_dir) = std::env::var("MEDIA_DECK_DIR") {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".media-deck"))
    }

    pub fn config_path(data_dir: &Path) -> PathBuf {
        data_dir.join("config.toml")
    }

    /// Write the default config on first run (only creates missing files)
    fn extract_defaults(data_dir: &Path) -> Result<()> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

        let config_path = Self::config_path(data_dir);
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write {:?}", config_path))?;
            tracing::info!("Extracted default config to {:?}", config_path);
        }
        Ok(())
    }

    /// Load `config_file` if given, else `<data_dir>/config.toml`
    pub fn load_with_options(data_dir: &Path, config_file: Option<&Path>) -> Result<Self> {
        let config_path = match config_file {
            Some(path) => path.to_path_buf(),
            None => {
                Self::extract_defaults(data_dir)?;
                Self::config_path(data_dir)
            }
        };

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
        let mut config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
        config.data_dir = data_dir.to_path_buf();

        tracing::debug!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.image.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn log_path(data_dir: &Path) -> PathBuf {
        data_dir.join("media-deck.log")
    }

    pub fn recent_text_path(&self) -> PathBuf {
        self.data_dir.join("recent_text.toml")
    }

    pub fn recent_images_path(&self) -> PathBuf {
        self.data_dir.join("recent_images.toml")
    }

    pub fn gesture_read_timeout(&self) -> Duration {
        Duration::from_millis(self.gesture.read_timeout_ms)
    }

    pub fn camera_startup_grace(&self) -> Duration {
        Duration::from_millis(self.camera.startup_grace_ms)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.ui.poll_timeout_ms)
    }
}
