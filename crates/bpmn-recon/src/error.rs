//! Error types for reconstruction operations.
//!
//! This module provides the main error type [`ReconError`]. The engine itself
//! never fails: unmapped labels, unresolvable arrows and empty pools are
//! handled by policy. Errors only come from the surfaces around it, that is
//! reading and decoding input, and writing the output document.

use std::io;

use thiserror::Error;

/// The main error type for reconstruction operations.
///
/// # Diagnostic Variants
///
/// The `Input` variant keeps the source text next to the decode error so the
/// failing line and column can be shown with context.
#[derive(Debug, Error)]
pub enum ReconError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid detection input: {err}")]
    Input { err: serde_json::Error, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for ReconError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl ReconError {
    /// Create a new `Input` error with the associated source text.
    pub fn new_input_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Input {
            err,
            src: src.into(),
        }
    }
}
