//! Stroke and line-style definitions.
//!
//! - [`StrokeDefinition`]: color, width, style, cap and join of a line
//! - [`StrokeStyle`]: solid or patterned lines
//! - [`StrokeCap`] / [`StrokeJoin`]: endpoint and corner rendering
//! - [`apply_stroke!`](crate::apply_stroke!): applies a stroke to an SVG element
//!
//! Widths are in points. Dash patterns are proportional to the stroke width,
//! so a dashed 1.5 pt connector gets longer dashes than a dashed 1 pt one.
//!
//! ```
//! use archsketch_core::draw::{StrokeDefinition, StrokeJoin};
//! use archsketch_core::color::Color;
//! use svg::node::element as svg_element;
//!
//! let mut stroke = StrokeDefinition::dashed(Color::new("#3ECF8E").unwrap(), 1.5);
//! stroke.set_join(StrokeJoin::Round);
//!
//! let path = svg_element::Path::new().set("d", "M 0 0 L 10 10");
//! let path = archsketch_core::apply_stroke!(path, &stroke);
//! assert!(path.to_string().contains("stroke-dasharray"));
//! ```

use crate::color::Color;

/// Line pattern of a stroke.
///
/// # SVG Mapping
///
/// Patterns are emitted as `stroke-dasharray` values scaled by the stroke
/// width `w`:
/// - `Solid`: no dasharray
/// - `Dashed`: `3.7w, 1.6w`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for a stroke of `width`, or `None` for solid lines
    pub fn to_svg_value(&self, width: f32) -> Option<String> {
        let scaled = |pattern: &[f32]| {
            pattern
                .iter()
                .map(|len| format!("{}", len * width))
                .collect::<Vec<_>>()
                .join(",")
        };
        match self {
            Self::Solid => None,
            Self::Dashed => Some(scaled(&[3.7, 1.6])),
        }
    }
}

/// How line endpoints are rendered (`stroke-linecap`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    /// Returns the SVG stroke-linecap value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// How line corners are rendered (`stroke-linejoin`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl StrokeJoin {
    /// Returns the SVG stroke-linejoin value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

/// A stroke definition for rendering lines and borders.
///
/// ```
/// use archsketch_core::draw::{StrokeDefinition, StrokeStyle};
/// use archsketch_core::color::Color;
///
/// let border = StrokeDefinition::solid(Color::new("#24292e").unwrap(), 2.0);
/// assert_eq!(*border.style(), StrokeStyle::Solid);
/// assert_eq!(border.width(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
    join: StrokeJoin,
}

impl StrokeDefinition {
    /// Creates a new solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    /// Creates a solid stroke.
    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    /// Creates a dashed stroke.
    pub fn dashed(color: Color, width: f32) -> Self {
        let mut stroke = Self::new(color, width);
        stroke.set_style(StrokeStyle::Dashed);
        stroke
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn join(&self) -> StrokeJoin {
        self.join
    }

    /// Returns `true` for a dashed stroke.
    pub fn is_dashed(&self) -> bool {
        self.style != StrokeStyle::Solid
    }

    /// The `stroke-dasharray` value for this stroke, if patterned.
    pub fn dasharray(&self) -> Option<String> {
        self.style.to_svg_value(self.width)
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    pub fn set_join(&mut self, join: StrokeJoin) {
        self.join = join;
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
            style: StrokeStyle::default(),
            cap: StrokeCap::default(),
            join: StrokeJoin::default(),
        }
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets color, opacity, width, line cap, line join and, for patterned
/// strokes, the dash array.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", $stroke.cap().to_svg_value())
            .set("stroke-linejoin", $stroke.join().to_svg_value());

        if let Some(dasharray) = $stroke.dasharray() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element as svg_element;

    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(*stroke.style(), StrokeStyle::Solid);
        assert_eq!(stroke.cap(), StrokeCap::Butt);
        assert_eq!(stroke.join(), StrokeJoin::Miter);
        assert!(!stroke.is_dashed());
    }

    #[test]
    fn test_stroke_constructors() {
        let color = Color::new("#FF9900").unwrap();

        let solid = StrokeDefinition::solid(color, 2.0);
        assert_eq!(solid.width(), 2.0);
        assert_eq!(*solid.style(), StrokeStyle::Solid);
        assert_eq!(solid.dasharray(), None);

        let dashed = StrokeDefinition::dashed(color, 1.5);
        assert_eq!(*dashed.style(), StrokeStyle::Dashed);
        assert!(dashed.is_dashed());
    }

    #[test]
    fn test_stroke_style_dasharray_scales_with_width() {
        assert_eq!(StrokeStyle::Solid.to_svg_value(2.0), None);
        assert_eq!(StrokeStyle::Dashed.to_svg_value(1.0), Some("3.7,1.6".to_string()));
        assert_eq!(StrokeStyle::Dashed.to_svg_value(2.0), Some("7.4,3.2".to_string()));
    }

    #[test]
    fn test_stroke_setters() {
        let mut stroke = StrokeDefinition::new(Color::new("green").unwrap(), 2.5);

        stroke.set_style(StrokeStyle::Dashed);
        stroke.set_join(StrokeJoin::Bevel);

        assert_eq!(stroke.color().to_string(), "green");
        assert_eq!(stroke.width(), 2.5);
        assert_eq!(*stroke.style(), StrokeStyle::Dashed);
        assert_eq!(stroke.cap(), StrokeCap::Butt);
        assert_eq!(stroke.join(), StrokeJoin::Bevel);
    }

    #[test]
    fn test_apply_stroke_solid_omits_dasharray() {
        let stroke = StrokeDefinition::solid(Color::new("#000000").unwrap(), 2.0);
        let rect = crate::apply_stroke!(svg_element::Rectangle::new(), &stroke);
        let rendered = rect.to_string();
        assert!(rendered.contains("stroke-width=\"2\""));
        assert!(!rendered.contains("stroke-dasharray"));
    }
}
