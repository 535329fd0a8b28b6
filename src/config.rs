//! Configuration Management

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dataset::Category;
use crate::error::{RbfError, Result};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Plot rendering settings
    #[serde(default)]
    pub plot: PlotConfig,
    /// Interactive session settings
    #[serde(default)]
    pub session: SessionConfig,
}

/// Plot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Marker radius in pixels
    pub point_size: u32,
    /// Directory the PNG files are written to
    pub output_dir: PathBuf,
    /// RGB color of category 1
    pub light_color: [u8; 3],
    /// RGB color of category 0
    pub dark_color: [u8; 3],
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Prompt printed before each command
    pub prompt: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            point_size: 6,
            output_dir: PathBuf::from("plots"),
            light_color: [127, 255, 212], // aquamarine
            dark_color: [139, 0, 0],      // darkred
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt: "rbf> ".to_string(),
        }
    }
}

impl PlotConfig {
    pub fn color(&self, category: Category) -> RGBColor {
        let [r, g, b] = match category {
            Category::Light => self.light_color,
            Category::Dark => self.dark_color,
        };
        RGBColor(r, g, b)
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if self.plot.width == 0 || self.plot.height == 0 {
            return Err(RbfError::Config(format!(
                "plot size must be positive, got {}x{}",
                self.plot.width, self.plot.height
            )));
        }
        if self.plot.point_size == 0 {
            return Err(RbfError::Config("point_size must be > 0".to_string()));
        }
        if self.plot.output_dir.as_os_str().is_empty() {
            return Err(RbfError::Config("output_dir must not be empty".to_string()));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| RbfError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config path, relative to the working directory
    pub fn default_path() -> PathBuf {
        PathBuf::from("rbf.toml")
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| RbfError::Config(e.to_string()))
    }
}
