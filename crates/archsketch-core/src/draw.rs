//! Drawable components for diagram rendering.
//!
//! Every drawable renders itself into a [`LayeredOutput`], tagging each SVG
//! node with the [`RenderLayer`] it belongs to. The exporter flattens the
//! layers in z-order when the document is assembled.

mod arrow;
mod layer;
mod rounded_box;
mod stroke;
mod text;

pub use arrow::{Arrow, ArrowDefinition, ArrowDirection, ArrowDrawer, DEFAULT_SHRINK};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use rounded_box::{RoundedBox, RoundedBoxDefinition};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle};
pub use text::{FontStyle, FontWeight, Text, TextAnchor, TextDefinition};

use crate::geometry::{Point, Size};

/// Trait for diagram elements that can be rendered to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable at `position` into one or more layers.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size of this drawable.
    fn size(&self) -> Size;
}
