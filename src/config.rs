//! Tool configuration (`config.toml`).
//!
//! ```toml
//! [canvas]
//! width = 800
//! height = 400
//!
//! [fonts]
//! path = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ChartError, Result};
use crate::render::fonts::{SYSTEM_FONT_CANDIDATES, register_first_available, register_font_file};

pub const APP_DIR: &str = "chart-block";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub canvas: CanvasConfig,
    pub fonts: FontConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// TTF/OTF used for text on bitmap output.
    pub path: Option<PathBuf>,
}

impl ToolConfig {
    /// `~/.config/chart-block/config.toml` (platform equivalent).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, or from the default location when `None`.
    /// A missing file yields the defaults; an unreadable or invalid one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ToolConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ChartError::Config(format!(
                "canvas size must be positive, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        Ok(())
    }

    /// Register the configured font, falling back to well-known system fonts.
    /// Returns whether bitmap output will carry text.
    pub fn register_fonts(&self) -> bool {
        if let Some(path) = &self.fonts.path {
            match register_font_file(path) {
                Ok(()) => return true,
                Err(e) => log::warn!("{e}; trying system fonts"),
            }
        }
        register_first_available(SYSTEM_FONT_CANDIDATES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ToolConfig::from_toml("[canvas]\nwidth = 1024\n").unwrap();
        assert_eq!(c.canvas.width, 1024);
        assert_eq!(c.canvas.height, 400);
        assert!(c.fonts.path.is_none());
    }

    #[test]
    fn zero_canvas_is_rejected() {
        assert!(ToolConfig::from_toml("[canvas]\nheight = 0\n").is_err());
        assert!(matches!(
            ToolConfig::from_toml("[canvas]\nwidth = \"wide\"\n"),
            Err(ChartError::Toml(_))
        ));
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempdir().unwrap();
        let c = ToolConfig::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(c, ToolConfig::default());
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("config.toml");
        std::fs::write(&p, "[canvas]\nwidth = 640\nheight = 320\n[fonts]\npath = \"x.ttf\"\n").unwrap();
        let c = ToolConfig::load(Some(&p)).unwrap();
        assert_eq!(c.canvas, CanvasConfig { width: 640, height: 320 });
        assert_eq!(c.fonts.path, Some(PathBuf::from("x.ttf")));
    }
}
