//! Configuration types for diagram rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file by the CLI. Every field is optional; missing values fall back to
//! the fixed output settings (300 DPI, 0.1 inch crop padding, white
//! background, DejaVu Sans).
//!
//! - [`AppConfig`] - Top-level configuration combining export and style settings.
//! - [`ExportConfig`] - Raster resolution and crop padding.
//! - [`StyleConfig`] - Background color and font family.
//!
//! # Example
//!
//! ```
//! # use archsketch::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.export().dpi(), 300.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use archsketch_core::color::Color;

/// Resolution of the raster output, in dots per inch.
pub const DEFAULT_DPI: f32 = 300.0;

/// Padding kept around the tight content bounding box, in inches.
pub const DEFAULT_PAD_INCHES: f32 = 0.1;

/// Font family used for every label.
pub const DEFAULT_FONT_FAMILY: &str = "DejaVu Sans";

const DEFAULT_BACKGROUND: &str = "white";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(export: ExportConfig, style: StyleConfig) -> Self {
        Self { export, style }
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks every value that cannot be expressed by the type alone.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        let dpi = self.export.dpi();
        if !(dpi.is_finite() && dpi > 0.0) {
            return Err(format!("export.dpi must be a positive number, got {dpi}"));
        }
        let pad = self.export.pad_inches();
        if !(pad.is_finite() && pad >= 0.0) {
            return Err(format!(
                "export.pad_inches must be zero or positive, got {pad}"
            ));
        }
        self.style.background_color()?;
        Ok(())
    }
}

/// Raster export settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    dpi: f32,
    pad_inches: f32,
}

impl ExportConfig {
    pub fn new(dpi: f32, pad_inches: f32) -> Self {
        Self { dpi, pad_inches }
    }

    /// Dots per inch of the PNG output.
    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    /// Padding around the cropped content, in inches.
    pub fn pad_inches(&self) -> f32 {
        self.pad_inches
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            pad_inches: DEFAULT_PAD_INCHES,
        }
    }
}

/// Visual styling configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background color as a CSS color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Font family used for all text.
    #[serde(default)]
    font_family: Option<String>,
}

impl StyleConfig {
    pub fn new(background_color: Option<String>, font_family: Option<String>) -> Self {
        Self {
            background_color,
            font_family,
        }
    }

    /// Returns the parsed background [`Color`], white when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Color, String> {
        let value = self
            .background_color
            .as_deref()
            .unwrap_or(DEFAULT_BACKGROUND);
        Color::new(value).map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the configured font family, or [`DEFAULT_FONT_FAMILY`].
    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.export().dpi(), 300.0);
        assert!((config.export().pad_inches() - 0.1).abs() < f32::EPSILON);
        assert_eq!(config.style().font_family(), "DejaVu Sans");
        assert_eq!(
            config.style().background_color().unwrap(),
            Color::new("white").unwrap()
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r##"
            [export]
            dpi = 150

            [style]
            background_color = "#fafafa"
            "##,
        )
        .unwrap();

        assert_eq!(config.export().dpi(), 150.0);
        assert!((config.export().pad_inches() - 0.1).abs() < f32::EPSILON);
        assert_eq!(config.style().font_family(), "DejaVu Sans");
        assert_eq!(
            config.style().background_color().unwrap(),
            Color::new("#fafafa").unwrap()
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_dpi = AppConfig::new(ExportConfig::new(0.0, 0.1), StyleConfig::default());
        assert!(zero_dpi.validate().unwrap_err().contains("dpi"));

        let negative_pad = AppConfig::new(ExportConfig::new(300.0, -1.0), StyleConfig::default());
        assert!(negative_pad.validate().unwrap_err().contains("pad_inches"));

        let bad_color = AppConfig::new(
            ExportConfig::default(),
            StyleConfig::new(Some("not-a-color".to_string()), None),
        );
        assert!(bad_color.validate().unwrap_err().contains("background color"));
    }
}
