//! Error adapter for converting FretsheetError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Decoding errors
//! carry the sheet source and a byte span, so they render with a snippet of
//! the offending input.

use std::{fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use fretsheet::{FretsheetError, sheet::SheetError};

/// Adapter for a sheet decoding error with its source snippet.
pub struct SheetDiagnostic<'a> {
    message: &'a str,
    span: Option<Range<usize>>,
    src: &'a str,
}

impl<'a> SheetDiagnostic<'a> {
    pub fn new(message: &'a str, span: Option<Range<usize>>, src: &'a str) -> Self {
        Self { message, span, src }
    }
}

impl fmt::Debug for SheetDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetDiagnostic")
            .field("message", &self.message)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for SheetDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message.trim_end())
    }
}

impl std::error::Error for SheetDiagnostic<'_> {}

impl MietteDiagnostic for SheetDiagnostic<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("fretsheet::sheet"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span.clone()?;
        let label = LabeledSpan::new_primary_with_span(Some("here".to_string()), to_miette(span));
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`FretsheetError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a FretsheetError);

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
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            FretsheetError::Io(_) => "fretsheet::io",
            FretsheetError::Sheet { .. } => "fretsheet::sheet",
            FretsheetError::Invalid(_) => "fretsheet::invalid",
            FretsheetError::Config(_) => "fretsheet::config",
            FretsheetError::Export(_) => "fretsheet::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            FretsheetError::Invalid(SheetError::UnknownChord { name, .. }) => Some(Box::new(
                format!("add a [[chord]] table with name = \"{name}\""),
            )),
            FretsheetError::Invalid(SheetError::DuplicateChord(_)) => {
                Some(Box::new("give every [[chord]] table a unique name"))
            }
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A decoding error with source location information.
    Diagnostic(SheetDiagnostic<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn to_miette(span: Range<usize>) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.len())
}

/// Convert a [`FretsheetError`] into something miette can render.
pub fn to_reportable(err: &FretsheetError) -> Reportable<'_> {
    match err {
        FretsheetError::Sheet { message, span, src } => {
            Reportable::Diagnostic(SheetDiagnostic::new(message, span.clone(), src))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}
