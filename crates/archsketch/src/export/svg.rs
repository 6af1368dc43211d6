//! SVG document assembly and file output.

use std::{fs::File, io::Write, path::Path};

use log::{debug, error, info};
use svg::{Document, node::element::Rectangle};

use archsketch_core::{
    color::Color,
    draw::RenderLayer,
    geometry::{Bounds, Insets},
    scene::{POINTS_PER_INCH, RenderedScene, Scene},
};

use crate::export::{self, Exporter};

/// Renders scenes to layered SVG documents cropped to their content.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    pad_inches: f32,
    background: Color,
}

impl SvgExporter {
    pub fn new(pad_inches: f32, background: Color) -> Self {
        Self {
            pad_inches,
            background,
        }
    }

    /// The cropped drawing area in SVG points: the scene bounds grown by
    /// the padding on every side.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] for a scene with no items.
    pub fn view_bounds(&self, scene: &Scene) -> Result<Bounds, export::Error> {
        let bounds = scene
            .bounds()
            .ok_or_else(|| export::Error::Render("scene has no items".to_string()))?;
        Ok(bounds.add_padding(Insets::uniform(self.pad_inches * POINTS_PER_INCH)))
    }

    /// Builds the complete SVG document for `scene`.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] for a scene with no items.
    pub fn render_document(&self, scene: &Scene) -> Result<Document, export::Error> {
        let view = self.view_bounds(scene)?;
        let RenderedScene { mut layers, arrows } = scene.render_to_layers();

        let background = Rectangle::new()
            .set("x", view.min_x())
            .set("y", view.min_y())
            .set("width", view.width())
            .set("height", view.height())
            .set("fill", &self.background);
        layers.add_to_layer(RenderLayer::Background, Box::new(background));

        let mut doc = Document::new()
            .set(
                "viewBox",
                (view.min_x(), view.min_y(), view.width(), view.height()),
            )
            .set("width", view.width())
            .set("height", view.height());

        if arrows.marker_count() > 0 {
            doc = doc.add(arrows.draw_marker_definitions());
        }
        for group in layers.render() {
            doc = doc.add(group);
        }

        debug!(width = view.width(), height = view.height(); "SVG document rendered");
        Ok(doc)
    }

    /// Renders `scene` to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] for a scene with no items.
    pub fn render_string(&self, scene: &Scene) -> Result<String, export::Error> {
        Ok(self.render_document(scene)?.to_string())
    }
}

impl Exporter for SvgExporter {
    fn export(&self, scene: &Scene, path: &Path) -> Result<(), export::Error> {
        let doc = self.render_document(scene)?;

        info!(path:? = path; "Creating SVG file");
        let mut file = File::create(path).map_err(|err| {
            error!(path:? = path, err:err; "Failed to create SVG file");
            export::Error::Io(err)
        })?;

        write!(file, "{doc}").map_err(|err| {
            error!(path:? = path, err:err; "Failed to write SVG content");
            export::Error::Io(err)
        })
    }
}
