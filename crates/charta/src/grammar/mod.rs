//! # Grammar Module
//!
//! Grammar definition and validation for context-free grammars.
//!
//! ## Overview
//!
//! A grammar is a set of productions over user-supplied terminal and
//! nonterminal types, built through [`GrammarBuilder`] and validated once at
//! [`GrammarBuilder::build`]. The built [`Grammar`] is immutable and is shared
//! by the chart engine and the forest extractor.
//!
//! - **Productions**: `head -> body`, where the body is a sequence of
//!   [`Symbol`]s; an empty body is an epsilon production.
//! - **Validation**: undefined nonterminal references are rejected at build
//!   time; weaker problems (unreachable rules, declared-but-empty
//!   nonterminals) surface as non-fatal [`GrammarDiagnostic`]s.
//!
//! ## Usage
//!
//! ```rust
//! use charta::grammar::{GrammarBuilder, NonTerminal, Symbol, Token};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Word {
//!     Number,
//!     Plus,
//! }
//!
//! impl Token for Word {
//!     type Kind = Word;
//!
//!     fn kind(&self) -> Word {
//!         *self
//!     }
//! }
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Nt {
//!     Sum,
//! }
//!
//! impl NonTerminal for Nt {
//!     fn name(&self) -> &str {
//!         "Sum"
//!     }
//! }
//!
//! let grammar = GrammarBuilder::<Word, Nt>::new()
//!     .entry_point(Nt::Sum)
//!     .rule(Nt::Sum, [
//!         Symbol::rule(Nt::Sum),
//!         Symbol::terminal(Word::Plus),
//!         Symbol::terminal(Word::Number),
//!     ])
//!     .rule(Nt::Sum, [Symbol::terminal(Word::Number)])
//!     .build()?;
//!
//! assert_eq!(grammar.production_count(), 2);
//! # Ok::<(), charta::GrammarError<Nt>>(())
//! ```
//!
//! Note the `GrammarBuilder::<Word, Nt>::new()` turbofish: the token type
//! cannot be inferred from its kind alone.

pub mod builder;
pub mod symbol;
pub mod validate;

pub use builder::*;
pub use symbol::*;
pub use validate::*;

/// Trait for token types
pub trait Token: Clone + std::fmt::Debug + std::hash::Hash + Eq + Send + Sync + 'static {
    /// The terminal kind type for this token
    ///
    /// Grammars match tokens by kind, never by value, so two tokens with the
    /// same kind are interchangeable during recognition.
    type Kind: Copy + std::fmt::Debug + std::hash::Hash + Eq + Send + Sync + 'static;

    /// Get the terminal kind of this token
    fn kind(&self) -> Self::Kind;

    /// Get the text representation of this token
    ///
    /// Used when rendering derivation trees. The default implementation uses
    /// Debug formatting; implementations should return the actual token text
    /// when they have one.
    fn text(&self) -> compact_str::CompactString {
        format!("{self:?}").into()
    }
}

/// Trait for non-terminal types
pub trait NonTerminal:
    Clone + std::fmt::Debug + std::hash::Hash + Eq + Send + Sync + 'static
{
    /// Get the name of this non-terminal
    fn name(&self) -> &str;
}
