//! Render configuration.
//!
//! YAML with precedence CLI > file > defaults. Every field has a default, so
//! an empty document is a valid configuration:
//!
//! ```yaml
//! canvas:
//!   width: 800
//!   height: 600
//!   background: "#1C1C1C"
//! viewport:
//!   scale: 1.0
//!   offset: [300, 300]
//! preview:
//!   enabled: false
//!   rows: 11
//!   cols: 11
//! gridlines:
//!   min_scale: 8.0
//!   color: "#FFFFFF26"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::ScreenPoint;
use crate::render::{Gridlines, RenderMode, Renderer, SampleGrid};
use crate::viewport::Viewport;

/// Output surface settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Background color as hex.
    #[serde(default = "default_background")]
    pub background: String,
}

fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    600
}
fn default_background() -> String {
    "#1C1C1C".to_string()
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_background(),
        }
    }
}

/// Initial pan and zoom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Zoom factor.
    #[serde(default = "default_scale")]
    pub scale: f32,

    /// Screen position of the model origin.
    #[serde(default = "default_offset")]
    pub offset: [f32; 2],
}

fn default_scale() -> f32 {
    1.0
}
fn default_offset() -> [f32; 2] {
    [300.0, 300.0]
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            offset: default_offset(),
        }
    }
}

/// Pixel-preview settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Start in pixel-preview mode.
    #[serde(default)]
    pub enabled: bool,

    /// Sample rows per pixel.
    #[serde(default = "default_samples")]
    pub rows: u32,

    /// Sample columns per pixel.
    #[serde(default = "default_samples")]
    pub cols: u32,
}

fn default_samples() -> u32 {
    11
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            rows: default_samples(),
            cols: default_samples(),
        }
    }
}

/// Gridline overlay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridlineConfig {
    /// Draw lines only above this zoom factor.
    #[serde(default = "default_min_scale")]
    pub min_scale: f32,

    /// Line color as hex, alpha included.
    #[serde(default = "default_grid_color")]
    pub color: String,
}

fn default_min_scale() -> f32 {
    8.0
}
fn default_grid_color() -> String {
    "#FFFFFF26".to_string()
}

impl Default for GridlineConfig {
    fn default() -> Self {
        Self {
            min_scale: default_min_scale(),
            color: default_grid_color(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Output surface.
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Initial view.
    #[serde(default)]
    pub viewport: ViewportConfig,

    /// Pixel-preview mode.
    #[serde(default)]
    pub preview: PreviewConfig,

    /// Gridline overlay.
    #[serde(default)]
    pub gridlines: GridlineConfig,
}

impl RenderConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| Error::from_yaml(&e))
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Check every value that the YAML types alone do not constrain.
    ///
    /// # Errors
    ///
    /// Returns the first invalid dimension, scale, sample grid or color.
    pub fn validate(&self) -> Result<()> {
        self.renderer()?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        Ok(())
    }

    /// Build the configured renderer.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid scale, sample grid or color.
    pub fn renderer(&self) -> Result<Renderer> {
        let [ox, oy] = self.viewport.offset;
        let viewport = Viewport::new(self.viewport.scale, ScreenPoint::new(ox, oy))?;
        let mode = if self.preview.enabled {
            RenderMode::PixelPreview
        } else {
            RenderMode::Vector
        };

        Ok(Renderer::new(viewport)
            .with_mode(mode)
            .with_sample_grid(SampleGrid::new(self.preview.rows, self.preview.cols)?)
            .with_background(Rgba::from_hex(&self.canvas.background)?)
            .with_gridlines(Gridlines {
                min_scale: self.gridlines.min_scale,
                color: Rgba::from_hex(&self.gridlines.color)?,
            }))
    }

    /// Allocate a framebuffer of the configured size.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero.
    pub fn framebuffer(&self) -> Result<Framebuffer> {
        Framebuffer::new(self.canvas.width, self.canvas.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RenderConfig::new();

        assert_eq!(config.canvas.width, 800);
        assert_eq!(config.preview.rows, 11);
        assert!(!config.preview.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_builds_default_renderer() {
        assert_eq!(RenderConfig::new().renderer().unwrap(), Renderer::default());
    }

    #[test]
    fn test_config_parse_partial() {
        let yaml = r##"
viewport:
  scale: 12
preview:
  enabled: true
  rows: 4
"##;
        let config = RenderConfig::parse(yaml).unwrap();
        let renderer = config.renderer().unwrap();

        assert_eq!(renderer.mode(), RenderMode::PixelPreview);
        assert_eq!(renderer.sample_grid(), SampleGrid::new(4, 11).unwrap());
        assert!((renderer.viewport().scale() - 12.0).abs() < f32::EPSILON);
        assert_eq!(renderer.viewport().offset(), ScreenPoint::new(300.0, 300.0));
    }

    #[test]
    fn test_config_parse_error_includes_line() {
        let yaml = r#"
canvas:
  width: 800
  height: not_a_number
"#;
        let err = RenderConfig::parse(yaml).unwrap_err();
        assert!(err.to_string().contains("line 4"), "{err}");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = RenderConfig::new();
        config.preview.cols = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidSampleGrid { .. })));

        let mut config = RenderConfig::new();
        config.preview.rows = 65_536;
        config.preview.cols = 65_536;
        assert!(matches!(config.validate(), Err(Error::InvalidSampleGrid { .. })));

        let mut config = RenderConfig::new();
        config.viewport.scale = 0.0;
        assert!(matches!(config.validate(), Err(Error::InvalidScale(_))));

        let mut config = RenderConfig::new();
        config.canvas.background = "dark".to_string();
        assert!(matches!(config.validate(), Err(Error::InvalidColor(_))));

        let mut config = RenderConfig::new();
        config.canvas.height = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = RenderConfig::load_or_default("/nonexistent/trueno-pixel.yaml");
        assert_eq!(config, RenderConfig::default());
    }
}
