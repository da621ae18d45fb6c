//! # Charta
//!
//! An Earley chart parsing library: full context-free recognition with
//! ambiguity-aware derivation extraction.
//!
//! ## Overview
//!
//! Charta recognizes token sequences against *arbitrary* context-free
//! grammars, including ambiguous and left-recursive ones that LL/LR-family
//! parsers reject outright:
//!
//! - **Grammar definition**: typed builder API over user token and
//!   nonterminal types
//! - **Chart engine**: prediction / scanning / completion to a fixpoint per
//!   input position, cubic worst case
//! - **Rejection diagnostics**: the chart is always returned; acceptance and
//!   the furthest scanned position are queries on it
//! - **Derivation forests**: all parses packed with shared substructure,
//!   with lazy enumeration of individual trees
//!
//! ## Quick Start
//!
//! The fully ambiguous grammar `S -> S S | 'a'` has exactly two derivations
//! of `aaa` (the Catalan number C(2)):
//!
//! ```rust
//! use charta::{engine, Forest, GrammarBuilder, NonTerminal, Symbol, Token};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Tok {
//!     A,
//! }
//!
//! impl Token for Tok {
//!     type Kind = Tok;
//!
//!     fn kind(&self) -> Tok {
//!         *self
//!     }
//! }
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Nt {
//!     S,
//! }
//!
//! impl NonTerminal for Nt {
//!     fn name(&self) -> &str {
//!         "S"
//!     }
//! }
//!
//! let grammar = GrammarBuilder::<Tok, Nt>::new()
//!     .entry_point(Nt::S)
//!     .rule(Nt::S, [Symbol::rule(Nt::S), Symbol::rule(Nt::S)])
//!     .rule(Nt::S, [Symbol::terminal(Tok::A)])
//!     .build()?;
//!
//! let input = [Tok::A, Tok::A, Tok::A];
//! let chart = engine::parse(&grammar, &input);
//! assert!(chart.accepts());
//!
//! let forest = Forest::build(&grammar, &chart, &input)?;
//! assert_eq!(forest.tree_count(), 2);
//! for tree in forest.trees() {
//!     assert_eq!(tree.leaves().len(), 3);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `diagnostics`: derive [`miette::Diagnostic`] on error types for rich
//!   reporting.

#![forbid(unsafe_code)]

pub mod chart;
pub mod engine;
pub mod error;
pub mod forest;
pub mod grammar;
pub mod testing;

pub use chart::{Advance, Chart, History, Item, ItemId, ItemSet};
pub use engine::parse;
pub use error::{ExtractError, GrammarDiagnostic, GrammarError};
pub use forest::{Alternative, DerivationTree, Forest, ForestChild, ForestNode, NodeId, Trees};
pub use grammar::{
    DottedRule, Grammar, GrammarBuilder, NonTerminal, Production, ProductionId, Symbol, Token,
};
