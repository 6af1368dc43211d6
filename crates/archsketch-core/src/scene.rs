//! Inspectable scene description.
//!
//! A [`Scene`] is a [`Canvas`] plus an ordered list of [`SceneItem`]s. Items
//! are authored in canvas units (origin bottom-left, Y up) and are never
//! mutated once pushed. Nothing ties a [`Connector`] to the [`Node`]s it is
//! drawn between; its endpoints are plain coordinates.
//!
//! The scene can be queried without rendering (labels, bounds) and rendered
//! into layered SVG nodes with [`Scene::render_to_layers`].
//!
//! ```
//! use archsketch_core::{
//!     color::Color,
//!     geometry::{Point, Size},
//!     scene::{Canvas, Node, Scene, TextBlock},
//! };
//!
//! let mut scene = Scene::new(Canvas::new(Size::new(10.0, 10.0), Size::new(14.0, 10.0)));
//! let node = Node::new(
//!     Point::new(0.5, 7.0),
//!     Size::new(2.0, 1.0),
//!     Color::new("#24292e").unwrap(),
//!     Color::new("#f6f8fa").unwrap(),
//! )
//! .with_label(TextBlock::new("1. GitHub", Point::new(1.5, 7.7)).centered().bold());
//! scene.push(node);
//!
//! assert!(scene.labels().any(|label| label == "1. GitHub"));
//! assert!(scene.bounds().is_some());
//! ```

use log::debug;

use crate::{
    color::Color,
    draw::{
        Arrow, ArrowDefinition, ArrowDirection, ArrowDrawer, Drawable, FontStyle, FontWeight,
        LayeredOutput, RoundedBox, RoundedBoxDefinition, StrokeDefinition, Text, TextAnchor,
        TextDefinition,
    },
    geometry::{Bounds, Point, Size},
};

/// Points per inch; SVG user units are points.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Default rounding pad of a node, in canvas units.
pub const DEFAULT_NODE_PAD: f32 = 0.1;

/// Default border width of a node, in points.
pub const DEFAULT_BORDER_WIDTH: f32 = 2.0;

/// Fixed drawing surface: an abstract extent mapped onto a physical figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    extent: Size,
    figure_size: Size,
}

impl Canvas {
    /// Creates a canvas spanning `extent` units drawn on a figure of
    /// `figure_size` inches.
    pub fn new(extent: Size, figure_size: Size) -> Self {
        Self {
            extent,
            figure_size,
        }
    }

    pub fn extent(&self) -> Size {
        self.extent
    }

    /// Figure size in inches.
    pub fn figure_size(&self) -> Size {
        self.figure_size
    }

    /// Figure size in points.
    pub fn size_in_points(&self) -> Size {
        self.figure_size.scale(POINTS_PER_INCH)
    }

    /// Points per canvas unit along X.
    pub fn x_scale(&self) -> f32 {
        self.size_in_points().width() / self.extent.width()
    }

    /// Points per canvas unit along Y.
    pub fn y_scale(&self) -> f32 {
        self.size_in_points().height() / self.extent.height()
    }

    /// Converts a canvas point (Y up) to an SVG point (Y down).
    pub fn to_svg_point(&self, point: Point) -> Point {
        Point::new(
            point.x() * self.x_scale(),
            (self.extent.height() - point.y()) * self.y_scale(),
        )
    }
}

/// Freestanding or attached text, anchored at its baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    content: String,
    position: Point,
    definition: TextDefinition,
}

impl TextBlock {
    /// Left-aligned, normal weight text at `position` (canvas units).
    pub fn new(content: impl Into<String>, position: Point) -> Self {
        Self {
            content: content.into(),
            position,
            definition: TextDefinition::default(),
        }
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.definition.set_font_size(size);
        self
    }

    pub fn with_font_family(mut self, family: &str) -> Self {
        self.definition.set_font_family(family);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.definition.set_color(Some(color));
        self
    }

    pub fn bold(mut self) -> Self {
        self.definition.set_weight(FontWeight::Bold);
        self
    }

    pub fn italic(mut self) -> Self {
        self.definition.set_style(FontStyle::Italic);
        self
    }

    /// Centers the text horizontally on its anchor.
    pub fn centered(mut self) -> Self {
        self.definition.set_anchor(TextAnchor::Middle);
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn definition(&self) -> &TextDefinition {
        &self.definition
    }

    /// Painted extent in SVG points.
    pub fn bounds(&self, canvas: &Canvas) -> Bounds {
        Text::new(&self.definition, &self.content).bounds(canvas.to_svg_point(self.position))
    }

    fn render(&self, canvas: &Canvas, output: &mut LayeredOutput) {
        let text = Text::new(&self.definition, &self.content);
        output.merge(text.render_to_layers(canvas.to_svg_point(self.position)));
    }
}

/// A rounded box standing for one infrastructure entity, with its labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    origin: Point,
    size: Size,
    border: StrokeDefinition,
    fill: Color,
    labels: Vec<TextBlock>,
}

impl Node {
    /// Creates a node whose un-padded rectangle starts at `origin` (lower-left
    /// corner, canvas units) and spans `size`.
    pub fn new(origin: Point, size: Size, border: Color, fill: Color) -> Self {
        Self {
            origin,
            size,
            border: StrokeDefinition::solid(border, DEFAULT_BORDER_WIDTH),
            fill,
            labels: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: TextBlock) -> Self {
        self.labels.push(label);
        self
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn border(&self) -> &StrokeDefinition {
        &self.border
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn labels(&self) -> &[TextBlock] {
        &self.labels
    }

    /// Painted extent of the box (labels included) in SVG points.
    pub fn bounds(&self, canvas: &Canvas) -> Bounds {
        let (definition, top_left, size) = self.outline(canvas);
        let box_bounds = RoundedBox::new(&definition, size).bounds(top_left);
        self.labels
            .iter()
            .fold(box_bounds, |acc, label| acc.merge(&label.bounds(canvas)))
    }

    /// The outline grows by [`DEFAULT_NODE_PAD`] on every side and its
    /// corners are rounded with the same radius.
    fn outline(&self, canvas: &Canvas) -> (RoundedBoxDefinition, Point, Size) {
        let pad = DEFAULT_NODE_PAD;
        let top_left = canvas.to_svg_point(Point::new(
            self.origin.x() - pad,
            self.origin.y() + self.size.height() + pad,
        ));
        let size = Size::new(
            (self.size.width() + 2.0 * pad) * canvas.x_scale(),
            (self.size.height() + 2.0 * pad) * canvas.y_scale(),
        );
        let definition = RoundedBoxDefinition::new(self.border.clone())
            .with_fill(self.fill)
            .with_corner_radius(pad * canvas.x_scale(), pad * canvas.y_scale());
        (definition, top_left, size)
    }

    fn render(&self, canvas: &Canvas, output: &mut LayeredOutput) {
        let (definition, top_left, size) = self.outline(canvas);
        output.merge(RoundedBox::new(&definition, size).render_to_layers(top_left));
        for label in &self.labels {
            label.render(canvas, output);
        }
    }
}

/// An arrow between two literal canvas points.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    from: Point,
    to: Point,
    direction: ArrowDirection,
    definition: ArrowDefinition,
    label: Option<TextBlock>,
}

impl Connector {
    pub fn new(
        from: Point,
        to: Point,
        direction: ArrowDirection,
        stroke: StrokeDefinition,
        head_scale: f32,
    ) -> Self {
        Self {
            from,
            to,
            direction,
            definition: ArrowDefinition::new(stroke, head_scale),
            label: None,
        }
    }

    pub fn with_label(mut self, label: TextBlock) -> Self {
        self.label = Some(label);
        self
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    pub fn direction(&self) -> ArrowDirection {
        self.direction
    }

    pub fn definition(&self) -> &ArrowDefinition {
        &self.definition
    }

    pub fn label(&self) -> Option<&TextBlock> {
        self.label.as_ref()
    }

    /// Painted extent of the arrow (label included) in SVG points.
    pub fn bounds(&self, canvas: &Canvas) -> Bounds {
        let arrow = Arrow::new(&self.definition, self.direction);
        let bounds = arrow.bounds(canvas.to_svg_point(self.from), canvas.to_svg_point(self.to));
        match &self.label {
            Some(label) => bounds.merge(&label.bounds(canvas)),
            None => bounds,
        }
    }

    fn render(&self, canvas: &Canvas, output: &mut LayeredOutput, arrows: &mut ArrowDrawer) {
        let arrow = Arrow::new(&self.definition, self.direction);
        let (layer, node) = arrows.draw_arrow(
            &arrow,
            canvas.to_svg_point(self.from),
            canvas.to_svg_point(self.to),
        );
        output.add_to_layer(layer, node);
        if let Some(label) = &self.label {
            label.render(canvas, output);
        }
    }
}

/// One record in the scene's paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneItem {
    Node(Node),
    Connector(Connector),
    Text(TextBlock),
}

impl SceneItem {
    /// Painted extent in SVG points.
    pub fn bounds(&self, canvas: &Canvas) -> Bounds {
        match self {
            Self::Node(node) => node.bounds(canvas),
            Self::Connector(connector) => connector.bounds(canvas),
            Self::Text(text) => text.bounds(canvas),
        }
    }

    /// Every text string carried by this item.
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Self::Node(node) => node.labels().iter().map(TextBlock::content).collect(),
            Self::Connector(connector) => {
                connector.label().map(TextBlock::content).into_iter().collect()
            }
            Self::Text(text) => vec![text.content()],
        }
    }
}

impl From<Node> for SceneItem {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<Connector> for SceneItem {
    fn from(connector: Connector) -> Self {
        Self::Connector(connector)
    }
}

impl From<TextBlock> for SceneItem {
    fn from(text: TextBlock) -> Self {
        Self::Text(text)
    }
}

/// Rendered scene: layered nodes plus the arrow markers they reference.
#[derive(Debug)]
pub struct RenderedScene {
    pub layers: LayeredOutput,
    pub arrows: ArrowDrawer,
}

/// A canvas and the ordered items placed on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    canvas: Canvas,
    items: Vec<SceneItem>,
}

impl Scene {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            items: Vec::new(),
        }
    }

    /// Appends an item to the paint order.
    pub fn push(&mut self, item: impl Into<SceneItem>) {
        self.items.push(item.into());
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.items.iter().filter_map(|item| match item {
            SceneItem::Node(node) => Some(node),
            _ => None,
        })
    }

    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.items.iter().filter_map(|item| match item {
            SceneItem::Connector(connector) => Some(connector),
            _ => None,
        })
    }

    pub fn text_blocks(&self) -> impl Iterator<Item = &TextBlock> {
        self.items.iter().filter_map(|item| match item {
            SceneItem::Text(text) => Some(text),
            _ => None,
        })
    }

    /// Every text string in paint order, node and connector labels included.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.items.iter().flat_map(SceneItem::labels)
    }

    /// Union of all item extents in SVG points, or `None` for an empty scene.
    pub fn bounds(&self) -> Option<Bounds> {
        self.items
            .iter()
            .map(|item| item.bounds(&self.canvas))
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// Renders every item into layers. Shapes, arrows and text are
    /// z-ordered by layer, and by insertion order within a layer.
    pub fn render_to_layers(&self) -> RenderedScene {
        let mut layers = LayeredOutput::new();
        let mut arrows = ArrowDrawer::new();

        for item in &self.items {
            match item {
                SceneItem::Node(node) => node.render(&self.canvas, &mut layers),
                SceneItem::Connector(connector) => {
                    connector.render(&self.canvas, &mut layers, &mut arrows)
                }
                SceneItem::Text(text) => text.render(&self.canvas, &mut layers),
            }
        }

        debug!(
            items = self.items.len(),
            markers = arrows.marker_count();
            "Scene rendered to layers"
        );
        RenderedScene { layers, arrows }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::draw::RenderLayer;

    fn canvas() -> Canvas {
        Canvas::new(Size::new(10.0, 10.0), Size::new(14.0, 10.0))
    }

    fn color(value: &str) -> Color {
        Color::new(value).unwrap()
    }

    #[test]
    fn test_canvas_scales() {
        let canvas = canvas();
        assert_approx_eq!(f32, canvas.x_scale(), 100.8);
        assert_approx_eq!(f32, canvas.y_scale(), 72.0);

        let top_left = canvas.to_svg_point(Point::new(0.0, 10.0));
        assert_approx_eq!(f32, top_left.x(), 0.0);
        assert_approx_eq!(f32, top_left.y(), 0.0);

        let bottom_right = canvas.to_svg_point(Point::new(10.0, 0.0));
        assert_approx_eq!(f32, bottom_right.x(), 1008.0);
        assert_approx_eq!(f32, bottom_right.y(), 720.0);
    }

    #[test]
    fn test_node_bounds_include_pad_and_stroke() {
        let canvas = canvas();
        let node = Node::new(
            Point::new(0.5, 7.0),
            Size::new(2.0, 1.0),
            color("black"),
            color("white"),
        );
        let bounds = node.bounds(&canvas);

        // 0.4 units * 100.8 - 1pt half stroke
        assert_approx_eq!(f32, bounds.min_x(), 0.4 * 100.8 - 1.0, epsilon = 0.01);
        // 2.6 units * 100.8 + 1pt
        assert_approx_eq!(f32, bounds.max_x(), 2.6 * 100.8 + 1.0, epsilon = 0.01);
        // top edge at y = 8.1 units -> (10 - 8.1) * 72 - 1
        assert_approx_eq!(f32, bounds.min_y(), 1.9 * 72.0 - 1.0, epsilon = 0.01);
    }

    #[test]
    fn test_scene_labels_in_paint_order() {
        let mut scene = Scene::new(canvas());
        scene.push(TextBlock::new("Title", Point::new(5.0, 9.5)));
        scene.push(
            Node::new(Point::new(1.0, 1.0), Size::new(1.0, 1.0), color("red"), color("white"))
                .with_label(TextBlock::new("Box", Point::new(1.5, 1.5)))
                .with_label(TextBlock::new("Caption", Point::new(1.5, 1.2))),
        );
        scene.push(
            Connector::new(
                Point::new(2.0, 1.5),
                Point::new(3.0, 1.5),
                ArrowDirection::Forward,
                StrokeDefinition::solid(color("black"), 2.0),
                20.0,
            )
            .with_label(TextBlock::new("push", Point::new(2.5, 1.7))),
        );

        let labels: Vec<&str> = scene.labels().collect();
        assert_eq!(labels, vec!["Title", "Box", "Caption", "push"]);
        assert_eq!(scene.nodes().count(), 1);
        assert_eq!(scene.connectors().count(), 1);
        assert_eq!(scene.text_blocks().count(), 1);
    }

    #[test]
    fn test_empty_scene_has_no_bounds() {
        let scene = Scene::new(canvas());
        assert!(scene.bounds().is_none());
        assert!(scene.render_to_layers().layers.is_empty());
    }

    #[test]
    fn test_render_to_layers_sorts_by_kind() {
        let mut scene = Scene::new(canvas());
        scene.push(TextBlock::new("Title", Point::new(5.0, 9.5)));
        scene.push(Node::new(
            Point::new(1.0, 1.0),
            Size::new(1.0, 1.0),
            color("red"),
            color("white"),
        ));
        scene.push(Connector::new(
            Point::new(2.0, 1.5),
            Point::new(3.0, 1.5),
            ArrowDirection::Bidirectional,
            StrokeDefinition::dashed(color("#FF9900"), 1.5),
            15.0,
        ));

        let rendered = scene.render_to_layers();
        assert_eq!(rendered.layers.layer_len(RenderLayer::Shape), 1);
        assert_eq!(rendered.layers.layer_len(RenderLayer::Arrow), 1);
        assert_eq!(rendered.layers.layer_len(RenderLayer::Text), 1);
        assert_eq!(rendered.arrows.marker_count(), 2);

        let groups: Vec<String> = rendered.layers.render().iter().map(|n| n.to_string()).collect();
        assert!(groups[0].contains("data-layer=\"shape\""));
        assert!(groups[1].contains("data-layer=\"arrow\""));
        assert!(groups[2].contains("data-layer=\"text\""));
    }

    #[test]
    fn test_connector_is_not_validated_against_nodes() {
        let mut scene = Scene::new(canvas());
        scene.push(Connector::new(
            Point::new(-3.0, 20.0),
            Point::new(42.0, -7.0),
            ArrowDirection::Forward,
            StrokeDefinition::default(),
            10.0,
        ));
        let bounds = scene.bounds().expect("scene has one item");
        assert!(bounds.min_x() < 0.0);
        assert!(bounds.max_x() > canvas().size_in_points().width());
    }
}
