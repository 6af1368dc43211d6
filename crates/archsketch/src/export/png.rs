//! PNG rasterisation of the SVG document.
//!
//! The SVG is parsed with `usvg`, drawn with `resvg` at `dpi / 72` pixels per
//! point, and encoded with the `png` crate so the physical resolution lands
//! in the file's pHYs chunk.

use std::{fs, path::Path};

use log::{debug, error, info};
use resvg::{tiny_skia, usvg};

use archsketch_core::{
    geometry::Bounds,
    scene::{POINTS_PER_INCH, Scene},
};

use super::svg::SvgExporter;
use crate::export::{self, Exporter};

const METERS_PER_INCH: f32 = 0.0254;

/// Largest RGBA pixel buffer the exporter will allocate, in bytes.
const MAX_PIXMAP_BYTES: u64 = 1 << 30;

/// Rasterises scenes to PNG at a fixed resolution.
#[derive(Debug, Clone)]
pub struct PngExporter {
    svg: SvgExporter,
    dpi: f32,
    font_family: String,
}

impl PngExporter {
    pub fn new(svg: SvgExporter, dpi: f32, font_family: impl Into<String>) -> Self {
        Self {
            svg,
            dpi,
            font_family: font_family.into(),
        }
    }

    fn scale(&self) -> f32 {
        self.dpi / POINTS_PER_INCH
    }

    fn pixel_size(&self, view: Bounds) -> (u32, u32) {
        let scale = self.scale();
        let width = (view.width() * scale).ceil().max(1.0) as u32;
        let height = (view.height() * scale).ceil().max(1.0) as u32;
        (width, height)
    }

    /// Pixel dimensions of the PNG produced for `scene`.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] for a scene with no items.
    pub fn raster_size(&self, scene: &Scene) -> Result<(u32, u32), export::Error> {
        Ok(self.pixel_size(self.svg.view_bounds(scene)?))
    }

    /// Renders `scene` to encoded PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be built, parsed or encoded.
    /// Returns [`export::Error::Allocation`] when the pixel buffer would
    /// exceed [`MAX_PIXMAP_BYTES`].
    pub fn render_bytes(&self, scene: &Scene) -> Result<Vec<u8>, export::Error> {
        let view = self.svg.view_bounds(scene)?;
        let (width, height) = self.pixel_size(view);
        check_pixmap_budget(width, height)?;

        let svg = self.svg.render_string(scene)?;

        let pixmap = self.rasterize(&svg, width, height)?;
        debug!(width = width, height = height, dpi = self.dpi; "Scene rasterised");

        self.encode(&pixmap)
    }

    fn rasterize(
        &self,
        svg: &str,
        width: u32,
        height: u32,
    ) -> Result<tiny_skia::Pixmap, export::Error> {
        let mut opt = usvg::Options::default();
        opt.fontdb_mut().load_system_fonts();
        opt.font_family = self.font_family.clone();

        let tree = usvg::Tree::from_str(svg, &opt)
            .map_err(|err| export::Error::Rasterize(err.to_string()))?;

        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or(export::Error::Allocation { width, height })?;

        let scale = self.scale();
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );
        Ok(pixmap)
    }

    fn encode(&self, pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>, export::Error> {
        // tiny-skia stores premultiplied alpha, PNG expects straight alpha.
        let mut data = Vec::with_capacity(pixmap.data().len());
        for pixel in pixmap.pixels() {
            let color = pixel.demultiply();
            data.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
        }

        let pixels_per_meter = (self.dpi / METERS_PER_INCH).round() as u32;
        let mut bytes = Vec::new();
        {
            let mut encoder = ::png::Encoder::new(&mut bytes, pixmap.width(), pixmap.height());
            encoder.set_color(::png::ColorType::Rgba);
            encoder.set_depth(::png::BitDepth::Eight);
            encoder.set_pixel_dims(Some(::png::PixelDimensions {
                xppu: pixels_per_meter,
                yppu: pixels_per_meter,
                unit: ::png::Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;
            writer.write_image_data(&data)?;
            writer.finish()?;
        }
        Ok(bytes)
    }
}

fn check_pixmap_budget(width: u32, height: u32) -> Result<(), export::Error> {
    let bytes = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|pixels| pixels.checked_mul(4));
    match bytes {
        Some(bytes) if bytes <= MAX_PIXMAP_BYTES => Ok(()),
        _ => {
            error!(width = width, height = height; "Pixel buffer exceeds the allocation budget");
            Err(export::Error::Allocation { width, height })
        }
    }
}

impl Exporter for PngExporter {
    fn export(&self, scene: &Scene, path: &Path) -> Result<(), export::Error> {
        let bytes = self.render_bytes(scene)?;

        info!(path:? = path, bytes = bytes.len(); "Writing PNG file");
        fs::write(path, &bytes).map_err(|err| {
            error!(path:? = path, err:err; "Failed to write PNG file");
            export::Error::Io(err)
        })
    }
}
