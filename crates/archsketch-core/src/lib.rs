//! archsketch core types
//!
//! Foundational types for archsketch diagrams:
//!
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Geometry**: points, sizes, bounds and insets ([`geometry`] module)
//! - **Draw**: strokes, text, rounded boxes, arrows and render layers ([`draw`] module)
//! - **Scene**: the inspectable canvas and its ordered items ([`scene`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod scene;
