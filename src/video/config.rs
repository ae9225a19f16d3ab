use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::paths;

use super::audio::LoudnessTarget;
use super::render::CaptionSpec;

/// Environment variable that overrides `default_font_path`.
pub const DEFAULT_FONT_ENV: &str = "DEFAULT_FONT_PATH";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Font used for the caption when a job does not name one
    pub default_font_path: PathBuf,
    /// Seconds the caption stays on screen
    pub caption_duration: f64,
    /// Caption font size in pixels
    pub font_size: u32,
    /// Integrated loudness target in LUFS
    pub loudness_target: f64,
    /// True-peak ceiling in dBTP
    pub true_peak_limit: f64,
    /// Run the FFT denoiser on the main segment
    pub denoise: bool,
    /// Encoder program name or path
    pub ffmpeg_program: String,
    /// Prober program name or path
    pub ffprobe_program: String,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            default_font_path: PathBuf::from(Self::DEFAULT_FONT_PATH),
            caption_duration: CaptionSpec::DEFAULT_DURATION,
            font_size: CaptionSpec::DEFAULT_FONT_SIZE,
            loudness_target: LoudnessTarget::DEFAULT_INTEGRATED,
            true_peak_limit: LoudnessTarget::DEFAULT_TRUE_PEAK,
            denoise: false,
            ffmpeg_program: "ffmpeg".to_string(),
            ffprobe_program: "ffprobe".to_string(),
        }
    }
}

impl AssemblerConfig {
    pub const DEFAULT_FONT_PATH: &'static str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

    /// Load the user config, writing the defaults on first use, and apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_path(paths::intercut_config_path()?)?;
        config.apply_env_overrides(std::env::var_os(DEFAULT_FONT_ENV).map(PathBuf::from));
        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults without writing
    /// anything.
    pub fn read() -> Result<Self> {
        let mut config = Self::read_from_path(paths::intercut_config_path()?)?;
        config.apply_env_overrides(std::env::var_os(DEFAULT_FONT_ENV).map(PathBuf::from));
        Ok(config)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::write_default_if_missing(path)?;
        Self::read_from_path(path)
    }

    pub fn write_default_if_missing(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if path.exists() {
            return Ok(());
        }
        Self::default().save_to_path(path)
    }

    pub fn read_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading intercut config from {}", path.display()))?;
        let mut config: Self = toml::from_str(&contents).context("parsing intercut config")?;
        config.sanitize();
        Ok(config)
    }

    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {}", parent.display()))?;
        }

        let toml = toml::to_string_pretty(self).context("serializing intercut config")?;
        fs::write(path, toml)
            .with_context(|| format!("writing intercut config to {}", path.display()))?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self, font_override: Option<PathBuf>) {
        if let Some(font) = font_override.filter(|p| !p.as_os_str().is_empty()) {
            self.default_font_path = font;
        }
    }

    pub fn loudness(&self) -> LoudnessTarget {
        LoudnessTarget {
            integrated: self.loudness_target,
            true_peak: self.true_peak_limit,
        }
    }

    fn sanitize(&mut self) {
        let defaults = Self::default();
        if !self.caption_duration.is_finite() || self.caption_duration <= 0.0 {
            self.caption_duration = defaults.caption_duration;
        }
        if self.font_size == 0 {
            self.font_size = defaults.font_size;
        }
        if !self.loudness_target.is_finite() {
            self.loudness_target = defaults.loudness_target;
        }
        if !self.true_peak_limit.is_finite() {
            self.true_peak_limit = defaults.true_peak_limit;
        }
        if self.ffmpeg_program.trim().is_empty() {
            self.ffmpeg_program = defaults.ffmpeg_program;
        }
        if self.ffprobe_program.trim().is_empty() {
            self.ffprobe_program = defaults.ffprobe_program;
        }
    }
}
