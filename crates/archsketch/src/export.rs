//! Export functionality for archsketch scenes.
//!
//! This module provides the [`Exporter`] trait that turns a [`Scene`] into a
//! file on disk. It is the last stage of the pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Deployment data
//!     ↓ build
//! Scene (canvas units)
//!     ↓ render to layers (SVG points)
//! SVG document
//!     ↓ rasterise (png backend only)
//! Output file
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - vector output via [`svg::SvgExporter`]
//! - [`png`] - raster output via [`png::PngExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. At the crate boundary it converts into
//! [`ArchsketchError`], with I/O failures kept as [`ArchsketchError::Io`].
//!
//! [`ArchsketchError`]: crate::ArchsketchError
//! [`ArchsketchError::Io`]: crate::ArchsketchError::Io

/// PNG export backend.
pub mod png;
/// SVG export backend.
pub mod svg;

use std::{fmt, path::Path};

use archsketch_core::scene::Scene;

/// Abstraction for scene export backends.
pub trait Exporter {
    /// Renders `scene` and writes exactly one file at `path`.
    ///
    /// Missing parent directories are not created.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written, or one of the
    /// rendering variants if the scene cannot be converted.
    fn export(&self, scene: &Scene, path: &Path) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// The scene cannot be turned into an SVG document.
    Render(String),
    /// The SVG document could not be parsed for rasterisation.
    Rasterize(String),
    /// The pixel buffer would exceed the allocation budget or could not be
    /// allocated.
    Allocation { width: u32, height: u32 },
    /// PNG encoding failed.
    Encode(::png::EncodingError),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Rasterize(msg) => write!(f, "Rasterize error: {msg}"),
            Self::Allocation { width, height } => {
                write!(f, "Cannot allocate a {width}x{height} pixel buffer")
            }
            Self::Encode(err) => write!(f, "PNG encoding error: {err}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) | Self::Rasterize(_) | Self::Allocation { .. } => None,
            Self::Encode(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<::png::EncodingError> for Error {
    fn from(err: ::png::EncodingError) -> Self {
        Self::Encode(err)
    }
}
