//! Grammar symbols: the alphabet of production bodies.

use super::{NonTerminal, Token};

/// A single position in a production body
///
/// Terminals carry a token *kind*, not a token value: the scanner compares
/// kinds, so token payloads (text, spans) never influence recognition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol<T, N>
where
    T: Token,
    N: NonTerminal,
{
    /// Matches one input token of this kind
    Terminal(T::Kind),
    /// Matches a derivation of this non-terminal
    NonTerminal(N),
}

impl<T, N> Symbol<T, N>
where
    T: Token,
    N: NonTerminal,
{
    /// Create a terminal symbol matching tokens of `kind`
    #[must_use]
    pub fn terminal(kind: T::Kind) -> Self {
        Self::Terminal(kind)
    }

    /// Create a non-terminal symbol referencing `nonterminal`'s rules
    #[must_use]
    pub fn rule(nonterminal: N) -> Self {
        Self::NonTerminal(nonterminal)
    }

    /// Returns true if this symbol is a terminal
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }
}

impl<T, N> std::fmt::Display for Symbol<T, N>
where
    T: Token,
    N: NonTerminal,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Terminal(kind) => write!(f, "'{kind:?}'"),
            Self::NonTerminal(nt) => f.write_str(nt.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Tok {
        Plus,
    }

    impl Token for Tok {
        type Kind = Tok;

        fn kind(&self) -> Tok {
            *self
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Nt {
        Expr,
    }

    impl NonTerminal for Nt {
        fn name(&self) -> &str {
            "Expr"
        }
    }

    #[test]
    fn display_terminal_and_nonterminal() {
        let t: Symbol<Tok, Nt> = Symbol::terminal(Tok::Plus);
        let n: Symbol<Tok, Nt> = Symbol::rule(Nt::Expr);
        assert_eq!(t.to_string(), "'Plus'");
        assert_eq!(n.to_string(), "Expr");
        assert!(t.is_terminal());
        assert!(!n.is_terminal());
    }
}
