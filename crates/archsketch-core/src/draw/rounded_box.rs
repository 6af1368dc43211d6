//! Rounded rectangles used for infrastructure nodes and panels.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Bounds, Insets, Point, Size},
};

/// Border, fill and corner rounding of a box.
///
/// Corner radii are given per axis because canvas units are not square once
/// mapped to points, so a uniform radius in canvas units becomes elliptical.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedBoxDefinition {
    stroke: StrokeDefinition,
    fill: Option<Color>,
    corner_radius: (f32, f32),
}

impl RoundedBoxDefinition {
    pub fn new(stroke: StrokeDefinition) -> Self {
        Self {
            stroke,
            fill: None,
            corner_radius: (0.0, 0.0),
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Sets horizontal and vertical corner radii in points.
    pub fn with_corner_radius(mut self, rx: f32, ry: f32) -> Self {
        self.corner_radius = (rx, ry);
        self
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn corner_radius(&self) -> (f32, f32) {
        self.corner_radius
    }
}

/// A box of a given outer size. Its render position is the top-left corner.
#[derive(Debug, Clone)]
pub struct RoundedBox<'a> {
    definition: &'a RoundedBoxDefinition,
    size: Size,
}

impl<'a> RoundedBox<'a> {
    pub fn new(definition: &'a RoundedBoxDefinition, size: Size) -> Self {
        Self { definition, size }
    }

    /// Painted extent when placed at `top_left`, including the half of the
    /// border stroke that falls outside the outline.
    pub fn bounds(&self, top_left: Point) -> Bounds {
        let half_stroke = self.definition.stroke().width() / 2.0;
        Bounds::new_from_top_left(top_left, self.size).add_padding(Insets::uniform(half_stroke))
    }
}

impl<'a> Drawable for RoundedBox<'a> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let (rx, ry) = self.definition.corner_radius();

        let rect = svg_element::Rectangle::new()
            .set("x", position.x())
            .set("y", position.y())
            .set("width", self.size.width())
            .set("height", self.size.height())
            .set("rx", rx)
            .set("ry", ry);

        let rect = match self.definition.fill() {
            Some(fill) => rect
                .set("fill", fill.to_string())
                .set("fill-opacity", fill.alpha()),
            None => rect.set("fill", "none"),
        };
        let rect = crate::apply_stroke!(rect, self.definition.stroke());

        output.add_to_layer(RenderLayer::Shape, Box::new(rect));
        output
    }

    fn size(&self) -> Size {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn definition() -> RoundedBoxDefinition {
        RoundedBoxDefinition::new(StrokeDefinition::solid(Color::new("#24292e").unwrap(), 2.0))
            .with_fill(Color::new("#f6f8fa").unwrap())
            .with_corner_radius(10.0, 7.0)
    }

    #[test]
    fn test_rounded_box_bounds_include_stroke() {
        let def = definition();
        let rounded = RoundedBox::new(&def, Size::new(100.0, 50.0));
        let bounds = rounded.bounds(Point::new(10.0, 20.0));

        assert_approx_eq!(f32, bounds.min_x(), 9.0);
        assert_approx_eq!(f32, bounds.min_y(), 19.0);
        assert_approx_eq!(f32, bounds.max_x(), 111.0);
        assert_approx_eq!(f32, bounds.max_y(), 71.0);
    }

    #[test]
    fn test_rounded_box_renders_on_shape_layer() {
        let def = definition();
        let rounded = RoundedBox::new(&def, Size::new(100.0, 50.0));
        let output = rounded.render_to_layers(Point::new(0.0, 0.0));
        assert_eq!(output.layer_len(RenderLayer::Shape), 1);

        let rendered: String = output.render().iter().map(|n| n.to_string()).collect();
        assert!(rendered.contains("rx=\"10\""));
        assert!(rendered.contains("ry=\"7\""));
        assert!(rendered.contains("stroke-width=\"2\""));
    }

    #[test]
    fn test_rounded_box_without_fill() {
        let def = RoundedBoxDefinition::new(StrokeDefinition::default());
        let rounded = RoundedBox::new(&def, Size::new(10.0, 10.0));
        let rendered: String = rounded
            .render_to_layers(Point::default())
            .render()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert!(rendered.contains("fill=\"none\""));
    }
}
