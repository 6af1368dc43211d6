//! Arrow drawables and SVG marker generation.
//!
//! Arrow heads are open chevrons sized from a `mutation_scale`-style head
//! scale: the head is `0.4 × scale` long and `0.4 × scale` wide. Heads share
//! the line's stroke, so a dashed arrow gets dashed chevrons. Heads are
//! emitted as SVG markers; [`ArrowDrawer`] records every marker an arrow
//! references so the definitions can be written once per stroke and size.

use std::collections::BTreeMap;

use svg::node::element as svg_element;

use crate::{
    draw::{RenderLayer, StrokeDefinition, StrokeJoin, layer::SvgNode},
    geometry::{Bounds, Insets, Point},
};

/// Distance in points by which both endpoints are pulled towards each other.
pub const DEFAULT_SHRINK: f32 = 2.0;

const HEAD_LENGTH_RATIO: f32 = 0.4;
const HEAD_HALF_WIDTH_RATIO: f32 = 0.2;

/// Visual properties of an arrow: its stroke and head scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowDefinition {
    stroke: StrokeDefinition,
    head_scale: f32,
}

impl ArrowDefinition {
    /// Creates a definition with the given stroke and head scale (points).
    pub fn new(stroke: StrokeDefinition, head_scale: f32) -> Self {
        Self { stroke, head_scale }
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn head_scale(&self) -> f32 {
        self.head_scale
    }

    /// Length of an arrow head along the line, in points.
    pub fn head_length(&self) -> f32 {
        self.head_scale * HEAD_LENGTH_RATIO
    }

    /// Distance from the line to either barb of the head, in points.
    pub fn head_half_width(&self) -> f32 {
        self.head_scale * HEAD_HALF_WIDTH_RATIO
    }
}

/// Which ends of an arrow carry a head.
///
/// - `Forward`: `->`, head at the destination
/// - `Bidirectional`: `<->`, heads at both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    Forward,
    Bidirectional,
}

impl ArrowDirection {
    /// Returns `(head at source, head at destination)`.
    pub fn heads(self) -> (bool, bool) {
        match self {
            Self::Forward => (false, true),
            Self::Bidirectional => (true, true),
        }
    }
}

/// Marker end an arrow head is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MarkerEnd {
    Start,
    End,
}

/// A drawable arrow between two points.
#[derive(Debug, Clone)]
pub struct Arrow<'a> {
    definition: &'a ArrowDefinition,
    direction: ArrowDirection,
}

impl<'a> Arrow<'a> {
    pub fn new(definition: &'a ArrowDefinition, direction: ArrowDirection) -> Self {
        Self {
            definition,
            direction,
        }
    }

    /// Endpoints after shrinking both ends [`DEFAULT_SHRINK`] towards each other.
    pub fn endpoints(&self, source: Point, destination: Point) -> (Point, Point) {
        (
            source.towards(destination, DEFAULT_SHRINK),
            destination.towards(source, DEFAULT_SHRINK),
        )
    }

    /// Painted extent of the arrow, heads included.
    pub fn bounds(&self, source: Point, destination: Point) -> Bounds {
        let (start, end) = self.endpoints(source, destination);
        let reach = self.definition.head_half_width() + self.definition.stroke().width() / 2.0;
        Bounds::new_from_points(start, end).add_padding(Insets::uniform(reach))
    }

    fn render_to_svg(&self, source: Point, destination: Point) -> SvgNode {
        let (start, end) = self.endpoints(source, destination);
        let path_data = format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y());

        let path = svg_element::Path::new()
            .set("d", path_data)
            .set("fill", "none");
        let mut path = crate::apply_stroke!(path, self.definition.stroke());

        let (head_at_start, head_at_end) = self.direction.heads();
        if head_at_start {
            path = path.set(
                "marker-start",
                format!("url(#{})", self.marker_id(MarkerEnd::Start)),
            );
        }
        if head_at_end {
            path = path.set(
                "marker-end",
                format!("url(#{})", self.marker_id(MarkerEnd::End)),
            );
        }

        Box::new(path)
    }

    fn marker_id(&self, end: MarkerEnd) -> String {
        let side = match end {
            MarkerEnd::Start => "start",
            MarkerEnd::End => "end",
        };
        let stroke = self.definition.stroke();
        let pattern = if stroke.is_dashed() { "dashed" } else { "solid" };
        format!(
            "arrow-{side}-{}-{pattern}-{}-{}",
            stroke.color().to_id_safe_string(),
            (self.definition.head_scale() * 100.0).round() as i64,
            (stroke.width() * 100.0).round() as i64,
        )
    }

    fn create_marker(&self, end: MarkerEnd) -> svg_element::Marker {
        let length = self.definition.head_length();
        let half_width = self.definition.head_half_width();
        let stroke = self.definition.stroke();

        let (ref_x, chevron) = match end {
            MarkerEnd::End => (
                length,
                format!("M 0 0 L {length} {half_width} L 0 {}", half_width * 2.0),
            ),
            MarkerEnd::Start => (
                0.0,
                format!("M {length} 0 L 0 {half_width} L {length} {}", half_width * 2.0),
            ),
        };

        let mut head_stroke = stroke.clone();
        head_stroke.set_join(StrokeJoin::Round);
        let head = svg_element::Path::new()
            .set("d", chevron)
            .set("fill", "none");
        let head = crate::apply_stroke!(head, &head_stroke);

        svg_element::Marker::new()
            .set("id", self.marker_id(end))
            .set("markerUnits", "userSpaceOnUse")
            .set("viewBox", format!("0 0 {length} {}", half_width * 2.0))
            .set("refX", ref_x)
            .set("refY", half_width)
            .set("markerWidth", length)
            .set("markerHeight", half_width * 2.0)
            .set("orient", "auto")
            .set("overflow", "visible")
            .add(head)
    }
}

/// Draws arrows and collects the marker definitions they reference.
#[derive(Debug, Default)]
pub struct ArrowDrawer {
    markers: BTreeMap<String, svg_element::Marker>,
}

impl ArrowDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws an arrow and registers its head markers.
    pub fn draw_arrow(
        &mut self,
        arrow: &Arrow<'_>,
        source: Point,
        destination: Point,
    ) -> (RenderLayer, SvgNode) {
        let (head_at_start, head_at_end) = arrow.direction.heads();
        if head_at_start {
            self.register(arrow, MarkerEnd::Start);
        }
        if head_at_end {
            self.register(arrow, MarkerEnd::End);
        }
        (RenderLayer::Arrow, arrow.render_to_svg(source, destination))
    }

    /// Number of distinct markers registered so far.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Emits a `<defs>` element with every registered marker, ordered by id.
    pub fn draw_marker_definitions(self) -> SvgNode {
        let mut defs = svg_element::Definitions::new();
        for marker in self.markers.into_values() {
            defs = defs.add(marker);
        }
        Box::new(defs)
    }

    fn register(&mut self, arrow: &Arrow<'_>, end: MarkerEnd) {
        self.markers
            .entry(arrow.marker_id(end))
            .or_insert_with(|| arrow.create_marker(end));
    }
}
