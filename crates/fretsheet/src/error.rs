//! Error types for Fretsheet operations.
//!
//! This module provides the main error type [`FretsheetError`] which wraps
//! the error conditions that can occur while reading and rendering a sheet.

use std::{io, ops::Range};

use thiserror::Error;

use crate::sheet::SheetError;

/// The main error type for Fretsheet operations.
///
/// # Diagnostic Variants
///
/// The `Sheet` variant keeps the source text and the byte span reported by
/// the TOML decoder, so front ends can point at the offending input.
#[derive(Debug, Error)]
pub enum FretsheetError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{message}")]
    Sheet {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error(transparent)]
    Invalid(#[from] SheetError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),
}

impl FretsheetError {
    /// Create a new `Sheet` error from a decoder error and the decoded source.
    pub fn new_sheet_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Sheet {
            message: err.message().to_string(),
            span: err.span(),
            src: src.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_error_keeps_span_and_source() {
        let source = "title = ";
        let err = toml::from_str::<toml::Table>(source).unwrap_err();
        let err = FretsheetError::new_sheet_error(err, source);

        let FretsheetError::Sheet { span, src, .. } = &err else {
            panic!("expected a sheet error");
        };
        assert!(span.is_some());
        assert_eq!(src, source);
    }

    #[test]
    fn test_invalid_sheet_message_is_transparent() {
        let err = FretsheetError::from(SheetError::DuplicateChord("C".to_string()));
        assert_eq!(err.to_string(), "chord `C` is defined more than once");
    }
}
