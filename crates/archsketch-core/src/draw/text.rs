//! Text styling, measurement and rendering.
//!
//! - [`TextDefinition`] - Reusable text style (font, size, weight, slant, color, anchor)
//! - [`Text`] - A renderable text element combining content with a [`TextDefinition`]
//!
//! Text is positioned by its baseline anchor, the same way a plotting library
//! places annotations: the x coordinate is interpreted according to the
//! [`TextAnchor`], the y coordinate is the alphabetic baseline.
//!
//! ```
//! # use archsketch_core::draw::{FontWeight, Text, TextAnchor, TextDefinition};
//! let mut style = TextDefinition::new();
//! style.set_font_size(12.0);
//! style.set_weight(FontWeight::Bold);
//! style.set_anchor(TextAnchor::Middle);
//!
//! let text = Text::new(&style, "1. GitHub");
//! assert!(text.calculate_size().width() > 0.0);
//! ```

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, Weight};
use log::{info, warn};
use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Bounds, Point, Size},
};

/// Fraction of the font size above the baseline.
const ASCENT_RATIO: f32 = 0.93;
/// Fraction of the font size below the baseline.
const DESCENT_RATIO: f32 = 0.24;
/// Average advance used when no font could shape the text.
const FALLBACK_ADVANCE_RATIO: f32 = 0.6;

/// Font weight of a text element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

/// Font slant of a text element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
        }
    }
}

/// Horizontal alignment of text relative to its anchor x coordinate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor (left aligned)
    #[default]
    Start,
    /// Text is centered on the anchor
    Middle,
}

impl TextAnchor {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
        }
    }

    /// Offset from the anchor to the left edge of text of the given width.
    fn left_offset(self, width: f32) -> f32 {
        match self {
            Self::Start => 0.0,
            Self::Middle => -width / 2.0,
        }
    }
}

/// Visual style for text elements.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"DejaVu Sans"` |
/// | Font size | `10` pt |
/// | Weight | normal |
/// | Style | normal |
/// | Color | `None` (SVG default, black) |
/// | Anchor | start |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: f32,
    weight: FontWeight,
    style: FontStyle,
    color: Option<Color>,
    anchor: TextAnchor,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    /// Sets the font family name.
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    pub fn set_weight(&mut self, weight: FontWeight) {
        self.weight = weight;
    }

    pub fn set_style(&mut self, style: FontStyle) {
        self.style = style;
    }

    /// Sets the fill color. `None` leaves the SVG default (black).
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn set_anchor(&mut self, anchor: TextAnchor) {
        self.anchor = anchor;
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "DejaVu Sans".to_string(),
            font_size: 10.0,
            weight: FontWeight::default(),
            style: FontStyle::default(),
            color: None,
            anchor: TextAnchor::default(),
        }
    }
}

/// A renderable text element combining content with styling.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    /// Creates a new text element with the given definition and content.
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    /// Returns the text content of this element.
    pub fn content(&self) -> &str {
        self.content
    }

    /// Measures the rendered size: shaped advance width by ascent plus descent.
    pub fn calculate_size(&self) -> Size {
        if self.content.is_empty() {
            return Size::default();
        }
        let width = TEXT_MANAGER
            .get_or_init(TextManager::new)
            .measure_width(self.content, self.definition);
        let height = self.definition.font_size() * (ASCENT_RATIO + DESCENT_RATIO);
        Size::new(width, height)
    }

    /// Bounding box of this text when its anchor sits at `position`.
    pub fn bounds(&self, position: Point) -> Bounds {
        let size = self.calculate_size();
        let font_size = self.definition.font_size();
        let top_left = Point::new(
            position.x() + self.definition.anchor().left_offset(size.width()),
            position.y() - font_size * ASCENT_RATIO,
        );
        Bounds::new_from_top_left(top_left, size)
    }
}

impl<'a> Drawable for Text<'a> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let mut rendered_text = svg_element::Text::new(self.content)
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", self.definition.anchor().to_svg_value())
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size())
            .set("font-weight", self.definition.weight().to_svg_value())
            .set("font-style", self.definition.style().to_svg_value());

        if let Some(color) = self.definition.color() {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

/// Shapes text with a shared [`FontSystem`] to measure advance widths.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Width in points of `text` set in the style of `text_def`.
    ///
    /// Falls back to an average-advance estimate when no installed font
    /// produces layout runs.
    fn measure_width(&self, text: &str, text_def: &TextDefinition) -> f32 {
        let font_size = text_def.font_size();
        let fallback = text.chars().count() as f32 * font_size * FALLBACK_ADVANCE_RATIO;

        let Ok(mut font_system) = self.font_system.lock() else {
            warn!("FontSystem lock poisoned, using estimated text width");
            return fallback;
        };

        let metrics = Metrics::new(font_size, font_size * 1.2);
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let weight = match text_def.weight() {
            FontWeight::Normal => Weight::NORMAL,
            FontWeight::Bold => Weight::BOLD,
        };
        let style = match text_def.style() {
            FontStyle::Normal => Style::Normal,
            FontStyle::Italic => Style::Italic,
        };
        let attrs = Attrs::new()
            .family(Family::Name(text_def.font_family()))
            .weight(weight)
            .style(style);

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|glyph| glyph.x + glyph.w))
            .fold(0.0_f32, f32::max);

        if width > 0.0 { width } else { fallback }
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn centered(size: f32) -> TextDefinition {
        let mut def = TextDefinition::new();
        def.set_font_size(size);
        def.set_anchor(TextAnchor::Middle);
        def
    }

    #[test]
    fn test_text_definition_defaults() {
        let def = TextDefinition::default();
        assert_eq!(def.font_family(), "DejaVu Sans");
        assert_approx_eq!(f32, def.font_size(), 10.0);
        assert_eq!(def.weight(), FontWeight::Normal);
        assert_eq!(def.style(), FontStyle::Normal);
        assert_eq!(def.anchor(), TextAnchor::Start);
        assert!(def.color().is_none());
    }

    #[test]
    fn test_text_calculate_size_empty() {
        let def = TextDefinition::new();
        let size = Text::new(&def, "").calculate_size();
        assert!(size.is_zero());
    }

    #[test]
    fn test_text_larger_font_is_larger() {
        let small = centered(8.0);
        let large = centered(24.0);

        let small_size = Text::new(&small, "Port 6543").calculate_size();
        let large_size = Text::new(&large, "Port 6543").calculate_size();

        assert!(large_size.width() > small_size.width());
        assert!(large_size.height() > small_size.height());
    }

    #[test]
    fn test_text_bounds_follow_anchor() {
        let start = TextDefinition::new();
        let middle = centered(10.0);
        let position = Point::new(100.0, 50.0);

        let start_bounds = Text::new(&start, "deploy").bounds(position);
        let middle_bounds = Text::new(&middle, "deploy").bounds(position);

        assert_approx_eq!(f32, start_bounds.min_x(), 100.0);
        assert_approx_eq!(
            f32,
            middle_bounds.min_x() + middle_bounds.width() / 2.0,
            100.0,
            epsilon = 0.01
        );
        // Baseline sits between the top and bottom of the box
        assert!(start_bounds.min_y() < 50.0 && start_bounds.max_y() > 50.0);
    }

    #[test]
    fn test_text_render_sets_font_attributes() {
        let mut def = centered(12.0);
        def.set_weight(FontWeight::Bold);
        def.set_style(FontStyle::Italic);
        def.set_color(Some(Color::new("#0066cc").unwrap()));

        let text = Text::new(&def, "shop.adorisgroup.com");
        let output = text.render_to_layers(Point::new(10.0, 20.0));
        assert_eq!(output.layer_len(RenderLayer::Text), 1);

        let rendered: String = output.render().iter().map(|n| n.to_string()).collect();
        assert!(rendered.contains("shop.adorisgroup.com"));
        assert!(rendered.contains("font-weight=\"bold\""));
        assert!(rendered.contains("font-style=\"italic\""));
        assert!(rendered.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn test_text_content_accessor() {
        let def = TextDefinition::new();
        assert_eq!(Text::new(&def, "Port 587").content(), "Port 587");
    }
}
