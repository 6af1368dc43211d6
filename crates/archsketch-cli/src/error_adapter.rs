//! Error adapter for converting ArchsketchError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI. None of the
//! errors carry source spans, so only the code and help text are filled in.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use archsketch::ArchsketchError;

/// Adapter that renders an [`ArchsketchError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a ArchsketchError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            ArchsketchError::Io(_) => "archsketch::io",
            ArchsketchError::Color(_) => "archsketch::color",
            ArchsketchError::Config(_) => "archsketch::config",
            ArchsketchError::Export(_) => "archsketch::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            ArchsketchError::Io(_) => "check that the output directory exists and is writable",
            ArchsketchError::Config(_) => {
                "check the [export] and [style] sections of the config file"
            }
            ArchsketchError::Color(_) | ArchsketchError::Export(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
