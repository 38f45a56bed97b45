//! Editor configuration
//!
//! Loaded from a JSON or TOML file (chosen by extension), by default from the
//! platform config directory. Sections:
//! - `defaults`: units and default dimensions of new elements
//! - `interaction`: hit radius and zoom limits
//! - `history`: undo depth
//! - `export`: vector drawing scale and padding, volumetric options
//! - `storage`: local save slot

use floorkit_core::Units;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};

/// Default dimensions for new floors, walls and openings (feet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsSettings {
    pub units: Units,
    pub wall_thickness: f64,
    pub floor_height: f64,
    pub door_width: f64,
    pub door_height: f64,
    pub door_sill: f64,
    pub window_width: f64,
    pub window_height: f64,
    pub window_sill: f64,
}

impl Default for DefaultsSettings {
    fn default() -> Self {
        Self {
            units: Units::Imperial,
            wall_thickness: 0.5,
            floor_height: 10.0,
            door_width: 3.0,
            door_height: 6.75,
            door_sill: 0.0,
            window_width: 4.0,
            window_height: 4.0,
            window_sill: 3.0,
        }
    }
}

/// Pointer interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Minimum click radius in screen pixels
    pub min_hit_radius_px: f64,
    /// Smallest allowed scale (pixels per foot)
    pub min_scale: f64,
    /// Largest allowed scale (pixels per foot)
    pub max_scale: f64,
    /// Zoom factor per wheel notch
    pub zoom_step: f64,
    /// Margin kept around the plan by fit-to-floor, in pixels
    pub fit_margin_px: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            min_hit_radius_px: 8.0,
            min_scale: 2.0,
            max_scale: 400.0,
            zoom_step: 1.1,
            fit_margin_px: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undo steps kept
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_depth: 200 }
    }
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Vector drawing scale in pixels per foot
    pub svg_scale: f64,
    /// Vector drawing padding in pixels
    pub svg_padding: f64,
    /// Height used for walls on floors whose height is zero
    pub fallback_floor_height: f64,
    /// Emit GLB instead of glTF JSON by default
    pub binary_gltf: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            svg_scale: 40.0,
            svg_padding: 40.0,
            fallback_floor_height: 10.0,
            binary_gltf: false,
        }
    }
}

/// Local save slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub slot: String,
    /// Overrides the platform data directory
    pub directory: Option<PathBuf>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            slot: "floorkit-project".to_string(),
            directory: None,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub defaults: DefaultsSettings,
    pub interaction: InteractionSettings,
    pub history: HistorySettings,
    pub export: ExportSettings,
    pub storage: StorageSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        _ => Err(SettingsError::LoadError(format!(
            "Config file must be .json or .toml: {}",
            path.display()
        ))),
    }
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<platform config dir>/floorkit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("floorkit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("No platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Loads the config at the default path, falling back to defaults when
    /// the file does not exist.
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let d = &self.defaults;
        for (key, value) in [
            ("defaults.wall_thickness", d.wall_thickness),
            ("defaults.floor_height", d.floor_height),
            ("defaults.door_width", d.door_width),
            ("defaults.door_height", d.door_height),
            ("defaults.window_width", d.window_width),
            ("defaults.window_height", d.window_height),
            ("interaction.min_hit_radius_px", self.interaction.min_hit_radius_px),
            ("interaction.min_scale", self.interaction.min_scale),
            ("export.svg_scale", self.export.svg_scale),
            ("export.fallback_floor_height", self.export.fallback_floor_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::invalid(key, "must be > 0"));
            }
        }

        for (key, value) in [
            ("defaults.door_sill", d.door_sill),
            ("defaults.window_sill", d.window_sill),
            ("export.svg_padding", self.export.svg_padding),
            ("interaction.fit_margin_px", self.interaction.fit_margin_px),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::invalid(key, "must be >= 0"));
            }
        }

        let (min_scale, max_scale) = (self.interaction.min_scale, self.interaction.max_scale);
        if !max_scale.is_finite() || max_scale <= min_scale {
            return Err(SettingsError::invalid(
                "interaction.max_scale",
                "must be greater than min_scale",
            ));
        }
        let step = self.interaction.zoom_step;
        if !step.is_finite() || step <= 1.0 {
            return Err(SettingsError::invalid("interaction.zoom_step", "must be > 1"));
        }
        if self.history.max_depth == 0 {
            return Err(SettingsError::invalid("history.max_depth", "must be at least 1"));
        }
        if self.storage.slot.trim().is_empty() {
            return Err(SettingsError::invalid("storage.slot", "must not be empty"));
        }
        Ok(())
    }
}
