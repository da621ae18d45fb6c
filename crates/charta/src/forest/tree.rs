//! Concrete derivation trees materialized out of the forest.

use crate::grammar::{NonTerminal, ProductionId, Token};

/// One complete derivation of the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivationTree<T, N>
where
    T: Token,
    N: NonTerminal,
{
    /// A consumed input token
    Leaf {
        /// The token itself
        token: T,
        /// Its index in the input
        position: usize,
    },
    /// An application of one production
    Node {
        /// The nonterminal derived here
        head: N,
        /// Which of its productions was applied
        production: ProductionId,
        /// One subtree per body symbol, in body order
        children: Vec<DerivationTree<T, N>>,
    },
}

impl<T, N> DerivationTree<T, N>
where
    T: Token,
    N: NonTerminal,
{
    /// The consumed tokens in input order
    #[must_use]
    pub fn leaves(&self) -> Vec<&T> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'t>(&'t self, out: &mut Vec<&'t T>) {
        match self {
            Self::Leaf { token, .. } => out.push(token),
            Self::Node { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

impl<T, N> std::fmt::Display for DerivationTree<T, N>
where
    T: Token,
    N: NonTerminal,
{
    /// S-expression rendering: `(S (NP they) (VP ...))`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leaf { token, .. } => f.write_str(&token.text()),
            Self::Node { head, children, .. } => {
                write!(f, "({}", head.name())?;
                for child in children {
                    write!(f, " {child}")?;
                }
                f.write_str(")")
            }
        }
    }
}
