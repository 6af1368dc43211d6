//! Error types for archsketch operations.

use std::io;

use thiserror::Error;

use archsketch_core::color::ColorError;

/// The main error type for archsketch operations.
///
/// Nothing is recovered locally: every variant is terminal for a render.
#[derive(Debug, Error)]
pub enum ArchsketchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Color error: {0}")]
    Color(#[from] ColorError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for ArchsketchError {
    fn from(error: crate::export::Error) -> Self {
        match error {
            crate::export::Error::Io(err) => Self::Io(err),
            other => Self::Export(Box::new(other)),
        }
    }
}
