//! # Testing Utilities
//!
//! Grammar-aware helpers for exercising the engine in tests.
//!
//! - [`LanguageEnumerator`]: bounded exhaustive enumeration of a grammar's
//!   language, for acceptance/rejection cross-checks on small grammars.
//! - [`SentenceSampler`]: seeded random derivations, for property tests that
//!   need arbitrary valid inputs.

pub mod generators;

pub use generators::*;
