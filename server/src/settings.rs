use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

pub const DEFAULT_SETTINGS_PATH: &str = "wheel.json";
pub const MIN_FRAME_RATE_HZ: f32 = 1.0;
pub const MAX_FRAME_RATE_HZ: f32 = 1000.0;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
    pub frame_rate_hz: f32,
    /// Comma-separated options the wheel starts with.
    pub labels: String,
    /// Fixed generator seed; spins are reproducible when set.
    pub seed: Option<u64>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:9001".to_string(),
            frame_rate_hz: 60.0,
            labels: "Yes, No, Maybe".to_string(),
            seed: None,
        }
    }
}

impl ServerSettings {
    /// Reads settings from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&data).with_context(|| format!("invalid settings in {}", path.display()))
    }

    pub fn from_json(data: &str) -> anyhow::Result<Self> {
        let settings: Self = serde_json::from_str(data)?;
        anyhow::ensure!(
            (MIN_FRAME_RATE_HZ..=MAX_FRAME_RATE_HZ).contains(&settings.frame_rate_hz),
            "frame_rate_hz must be between {MIN_FRAME_RATE_HZ} and {MAX_FRAME_RATE_HZ}, got {}",
            settings.frame_rate_hz
        );
        Ok(settings)
    }

    /// Time between animation frames; never zero.
    pub fn frame_period(&self) -> Duration {
        let hz = if self.frame_rate_hz.is_finite() {
            self.frame_rate_hz.clamp(MIN_FRAME_RATE_HZ, MAX_FRAME_RATE_HZ)
        } else {
            MAX_FRAME_RATE_HZ
        };
        Duration::from_secs_f64(1.0 / f64::from(hz))
    }
}
