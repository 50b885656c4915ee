use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use circuitbg_core::LayoutConfig;
use circuitbg_renderer::MAX_PIXEL_DENSITY;

/// Smallest ground-stitch pitch accepted from a config file, in CSS pixels.
pub const MIN_STITCH_SPACING: f64 = 1.0;

// ── Errors ────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ── Settings ──────────────────────────────────────────────────────────

/// Surface and scheduling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Device pixel ratio cap.
    pub max_pixel_density: f64,
    /// Quiet period after the last resize before repainting.
    pub debounce_ms: u64,
    /// TrueType/OpenType face for silkscreen text. Text is skipped without one.
    pub font_path: Option<PathBuf>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            max_pixel_density: MAX_PIXEL_DENSITY,
            debounce_ms: 250,
            font_path: None,
        }
    }
}

/// A saved background configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub name: String,
    pub layout: LayoutConfig,
    pub render: RenderSettings,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            name: "pcb".to_string(),
            layout: LayoutConfig::default(),
            render: RenderSettings::default(),
        }
    }
}

impl BackgroundConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), ConfigError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::from_reader(BufReader::new(File::open(path)?))?;
        log::info!("loaded config '{}' from {}", config.name, path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        log::info!("saved config '{}' to {}", self.name, path.display());
        Ok(())
    }

    /// Reject settings that would make every frame empty or unbounded.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let density = self.render.max_pixel_density;
        if !(density.is_finite() && density > 0.0) {
            return Err(ConfigError::Invalid {
                field: "render.max_pixel_density",
                reason: format!("must be a positive number, got {density}"),
            });
        }
        let min_spacing = self.layout.stitch_min_spacing;
        if !(min_spacing.is_finite() && min_spacing >= MIN_STITCH_SPACING) {
            return Err(ConfigError::Invalid {
                field: "layout.stitch_min_spacing",
                reason: format!("must be at least {MIN_STITCH_SPACING}px, got {min_spacing}"),
            });
        }
        Ok(())
    }
}
