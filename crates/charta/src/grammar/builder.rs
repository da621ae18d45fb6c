//! Grammar construction and the immutable [`Grammar`] itself.

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;
use thiserror::Error;

use super::validate::{validate, GrammarDiagnostic};
use super::{NonTerminal, Symbol, Token};

/// Index of a production inside its [`Grammar`]
///
/// Ids are assigned in the order productions were added to the builder and
/// are only meaningful for the grammar that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductionId(pub(crate) u32);

impl ProductionId {
    /// Position of this production in [`Grammar::productions`] order
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One rewrite rule `head -> body`
///
/// An empty body is an epsilon production: the head derives the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production<T, N>
where
    T: Token,
    N: NonTerminal,
{
    /// The non-terminal being defined
    pub head: N,
    /// The sequence of symbols the head rewrites to
    pub body: Vec<Symbol<T, N>>,
}

impl<T, N> Production<T, N>
where
    T: Token,
    N: NonTerminal,
{
    /// Returns true if this production has an empty body
    #[must_use]
    pub fn is_epsilon(&self) -> bool {
        self.body.is_empty()
    }
}

/// Errors that make a grammar unusable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError<N>
where
    N: NonTerminal,
{
    /// `build()` was called without `entry_point()`
    #[error("no entry point defined")]
    MissingEntryPoint,

    /// The entry point has no productions, so the grammar derives nothing
    #[error("entry point `{}` has no productions", .0.name())]
    EntryPointWithoutProductions(N),

    /// A production body references a nonterminal that has no productions
    /// and was not `declare()`d
    #[error("rule for `{}` references undefined nonterminal `{}`", head.name(), referenced.name())]
    UndefinedNonTerminal {
        /// Head of the production containing the reference
        head: N,
        /// The nonterminal with no definition
        referenced: N,
    },
}

/// An immutable, validated context-free grammar
///
/// Built through [`GrammarBuilder`]; the engine and the forest extractor only
/// ever read it.
#[derive(Debug, Clone)]
pub struct Grammar<T, N>
where
    T: Token,
    N: NonTerminal,
{
    productions: Vec<Production<T, N>>,
    by_head: HashMap<N, SmallVec<[ProductionId; 4]>>,
    start: N,
    diagnostics: Vec<GrammarDiagnostic<N>>,
}

impl<T, N> Grammar<T, N>
where
    T: Token,
    N: NonTerminal,
{
    /// The entry point every parse starts from
    #[must_use]
    pub const fn start(&self) -> &N {
        &self.start
    }

    /// Look up a production by id
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different grammar.
    #[must_use]
    pub fn production(&self, id: ProductionId) -> &Production<T, N> {
        &self.productions[id.index()]
    }

    /// All productions in id order
    pub fn productions(&self) -> impl Iterator<Item = (ProductionId, &Production<T, N>)> {
        self.productions
            .iter()
            .enumerate()
            .map(|(i, p)| (ProductionId(u32::try_from(i).unwrap_or(u32::MAX)), p))
    }

    /// Number of productions
    #[must_use]
    pub fn production_count(&self) -> usize {
        self.productions.len()
    }

    /// Ids of the productions whose head is `head`
    ///
    /// Empty for terminal-only or merely `declare()`d nonterminals.
    #[must_use]
    pub fn productions_of(&self, head: &N) -> &[ProductionId] {
        self.by_head.get(head).map_or(&[], SmallVec::as_slice)
    }

    /// Non-fatal problems found at build time
    #[must_use]
    pub fn diagnostics(&self) -> &[GrammarDiagnostic<N>] {
        &self.diagnostics
    }

    /// Render a production with a dot at `dot`, e.g. `S -> NP · VP`
    ///
    /// This is the traditional display of chart items; positions past the
    /// body length clamp to a trailing dot.
    #[must_use]
    pub fn dotted_rule(&self, id: ProductionId, dot: usize) -> DottedRule<'_, T, N> {
        DottedRule {
            production: self.production(id),
            dot,
        }
    }
}

/// Display adapter produced by [`Grammar::dotted_rule`]
pub struct DottedRule<'g, T, N>
where
    T: Token,
    N: NonTerminal,
{
    production: &'g Production<T, N>,
    dot: usize,
}

impl<T, N> std::fmt::Display for DottedRule<'_, T, N>
where
    T: Token,
    N: NonTerminal,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ->", self.production.head.name())?;
        let dot = self.dot.min(self.production.body.len());
        for (i, symbol) in self.production.body.iter().enumerate() {
            if i == dot {
                f.write_str(" ·")?;
            }
            write!(f, " {symbol}")?;
        }
        if dot == self.production.body.len() {
            f.write_str(" ·")?;
        }
        Ok(())
    }
}

/// Builder for [`Grammar`]
///
/// The token type cannot be inferred from terminal kinds, so instantiate the
/// builder with a turbofish: `GrammarBuilder::<MyToken, MyNt>::new()`.
#[derive(Debug, Clone)]
pub struct GrammarBuilder<T, N>
where
    T: Token,
    N: NonTerminal,
{
    start: Option<N>,
    productions: Vec<Production<T, N>>,
    declared: HashSet<N>,
}

impl<T, N> GrammarBuilder<T, N>
where
    T: Token,
    N: NonTerminal,
{
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: None,
            productions: Vec::new(),
            declared: HashSet::new(),
        }
    }

    /// Set the entry point of the grammar
    #[must_use]
    pub fn entry_point(mut self, start: N) -> Self {
        self.start = Some(start);
        self
    }

    /// Add a production `head -> body`
    ///
    /// An empty body adds an epsilon production. Repeated calls with the same
    /// head accumulate alternatives.
    #[must_use]
    pub fn rule(mut self, head: N, body: impl IntoIterator<Item = Symbol<T, N>>) -> Self {
        self.productions.push(Production {
            head,
            body: body.into_iter().collect(),
        });
        self
    }

    /// Declare a nonterminal without giving it productions
    ///
    /// References to a declared nonterminal are not build errors; they simply
    /// never derive anything. Useful for grammars assembled in stages.
    #[must_use]
    pub fn declare(mut self, nonterminal: N) -> Self {
        self.declared.insert(nonterminal);
        self
    }

    /// Validate and freeze the grammar
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`] if no entry point was set, the entry point
    /// has no productions, or a body references an undefined nonterminal.
    pub fn build(self) -> Result<Grammar<T, N>, GrammarError<N>> {
        let start = self.start.ok_or(GrammarError::MissingEntryPoint)?;
        let diagnostics = validate(&start, &self.productions, &self.declared)?;

        let mut by_head: HashMap<N, SmallVec<[ProductionId; 4]>> = HashMap::new();
        for (i, production) in self.productions.iter().enumerate() {
            by_head
                .entry(production.head.clone())
                .or_default()
                .push(ProductionId(u32::try_from(i).unwrap_or(u32::MAX)));
        }

        Ok(Grammar {
            productions: self.productions,
            by_head,
            start,
            diagnostics,
        })
    }
}

impl<T, N> Default for GrammarBuilder<T, N>
where
    T: Token,
    N: NonTerminal,
{
    fn default() -> Self {
        Self::new()
    }
}
