//! # Error Types
//!
//! The crate's error surface, collected in one place.
//!
//! Grammar construction fails with [`GrammarError`]; forest extraction over
//! a rejecting chart fails with [`ExtractError`]. Recognition itself never
//! fails: [`crate::engine::parse`] always returns a chart, and rejection is
//! a query on it.
//!
//! With the `diagnostics` feature enabled, errors additionally implement
//! [`miette::Diagnostic`] for rich reporting.

use thiserror::Error;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

pub use crate::grammar::{GrammarDiagnostic, GrammarError};

/// Errors from derivation-tree extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum ExtractError {
    /// The chart does not accept its input, so there is nothing to extract
    #[error("no derivation: recognition stalled after position {furthest}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(charta::no_derivation)))]
    NoDerivation {
        /// Highest input position a successful scan reached
        furthest: usize,
    },
}
