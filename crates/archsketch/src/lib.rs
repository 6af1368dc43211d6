//! archsketch - renders the Adoris Invest Group deployment architecture.
//!
//! The diagram is a fixed scene: source control, hosting, custom domain, the
//! three backing services, the environment variables panel and the
//! deployment steps. [`DiagramRenderer`] builds that scene, renders it to a
//! cropped SVG document and rasterises it to PNG.

pub mod config;
pub mod deployment;

mod error;
mod export;

pub use archsketch_core::{color, draw, geometry, scene};

pub use error::ArchsketchError;

use std::path::Path;

use log::{debug, info, trace};

use archsketch_core::scene::Scene;

use config::AppConfig;
use export::{Exporter, png::PngExporter, svg::SvgExporter};

/// Where the diagram is written when no output path is given.
pub const DEFAULT_OUTPUT_PATH: &str = "/home/ubuntu/ivdgroup_mvp/vercel_architecture_diagram.png";

/// The single line printed after a successful render.
pub const SUCCESS_MESSAGE: &str = "Deployment architecture diagram created successfully!";

/// Builds and renders the deployment diagram.
///
/// # Examples
///
/// ```rust,no_run
/// use archsketch::{DiagramRenderer, config::AppConfig};
///
/// let renderer = DiagramRenderer::new(AppConfig::default());
///
/// // Inspect the scene before drawing
/// let scene = renderer.scene().expect("Failed to build scene");
/// assert!(scene.labels().any(|label| label == "Port 6543"));
///
/// // Write the PNG
/// renderer
///     .render("vercel_architecture_diagram.png")
///     .expect("Failed to render");
/// ```
#[derive(Debug, Default)]
pub struct DiagramRenderer {
    config: AppConfig,
}

impl DiagramRenderer {
    /// Create a new renderer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Build the deployment scene without drawing it.
    ///
    /// # Errors
    ///
    /// Returns [`ArchsketchError::Color`] if a literal color fails to parse.
    pub fn scene(&self) -> Result<Scene, ArchsketchError> {
        let scene = deployment::scene(self.config.style().font_family())?;
        debug!(items = scene.items().len(); "Deployment scene built");
        trace!(scene:?; "Built scene");
        Ok(scene)
    }

    /// Render the diagram to an SVG string cropped to its content.
    ///
    /// # Errors
    ///
    /// Returns [`ArchsketchError`] for configuration or rendering errors.
    pub fn render_svg(&self) -> Result<String, ArchsketchError> {
        let scene = self.scene()?;
        let svg = self.svg_exporter()?.render_string(&scene)?;
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Render the diagram to PNG bytes at the configured DPI.
    ///
    /// # Errors
    ///
    /// Returns [`ArchsketchError`] for configuration, rendering or encoding
    /// errors.
    pub fn render_png(&self) -> Result<Vec<u8>, ArchsketchError> {
        let scene = self.scene()?;
        let png = self.png_exporter()?.render_bytes(&scene)?;
        info!(bytes = png.len(); "PNG rendered successfully");
        Ok(png)
    }

    /// Pixel dimensions of the PNG that [`render_png`](Self::render_png)
    /// produces.
    ///
    /// # Errors
    ///
    /// Returns [`ArchsketchError`] if the scene or configuration is invalid.
    pub fn raster_size(&self) -> Result<(u32, u32), ArchsketchError> {
        let scene = self.scene()?;
        Ok(self.png_exporter()?.raster_size(&scene)?)
    }

    /// Render the diagram and write it to `output_path`.
    ///
    /// A `.svg` extension writes the vector document, anything else writes
    /// PNG. Missing parent directories are not created.
    ///
    /// # Errors
    ///
    /// Returns [`ArchsketchError::Io`] if the file cannot be written, or
    /// another variant if the diagram cannot be rendered.
    pub fn render(&self, output_path: impl AsRef<Path>) -> Result<(), ArchsketchError> {
        let output_path = output_path.as_ref();
        let scene = self.scene()?;

        let exporter: Box<dyn Exporter> = if is_svg_path(output_path) {
            Box::new(self.svg_exporter()?)
        } else {
            Box::new(self.png_exporter()?)
        };

        info!(output_path:? = output_path; "Rendering diagram");
        exporter.export(&scene, output_path)?;
        info!(output_path:? = output_path; "Diagram written");
        Ok(())
    }

    fn svg_exporter(&self) -> Result<SvgExporter, ArchsketchError> {
        self.config.validate().map_err(ArchsketchError::Config)?;
        let background = self
            .config
            .style()
            .background_color()
            .map_err(ArchsketchError::Config)?;
        Ok(SvgExporter::new(self.config.export().pad_inches(), background))
    }

    fn png_exporter(&self) -> Result<PngExporter, ArchsketchError> {
        Ok(PngExporter::new(
            self.svg_exporter()?,
            self.config.export().dpi(),
            self.config.style().font_family(),
        ))
    }
}

fn is_svg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{ExportConfig, StyleConfig};

    #[test]
    fn test_is_svg_path() {
        assert!(is_svg_path(Path::new("diagram.svg")));
        assert!(is_svg_path(Path::new("out/diagram.SVG")));
        assert!(!is_svg_path(Path::new("diagram.png")));
        assert!(!is_svg_path(Path::new("diagram")));
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let renderer = DiagramRenderer::new(AppConfig::new(
            ExportConfig::new(-1.0, 0.1),
            StyleConfig::default(),
        ));
        assert!(matches!(renderer.raster_size(), Err(ArchsketchError::Config(_))));
    }
}
