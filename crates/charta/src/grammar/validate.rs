//! Build-time grammar validation.
//!
//! Fatal problems become [`GrammarError`]s and abort the build; weaker ones
//! are collected as [`GrammarDiagnostic`]s on the finished grammar so callers
//! can surface them as warnings.

use hashbrown::HashSet;
use std::collections::VecDeque;

use super::builder::{GrammarError, Production};
use super::{NonTerminal, Symbol, Token};

/// Non-fatal findings about a grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarDiagnostic<N>
where
    N: NonTerminal,
{
    /// A `declare()`d nonterminal has no productions and derives nothing
    NoProductions {
        /// The productionless nonterminal
        nonterminal: N,
    },
    /// A nonterminal with productions that no derivation from the entry
    /// point can reach
    Unreachable {
        /// The unreachable nonterminal
        nonterminal: N,
    },
}

impl<N> std::fmt::Display for GrammarDiagnostic<N>
where
    N: NonTerminal,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoProductions { nonterminal } => {
                write!(f, "nonterminal `{}` has no productions", nonterminal.name())
            }
            Self::Unreachable { nonterminal } => {
                write!(
                    f,
                    "nonterminal `{}` is unreachable from the entry point",
                    nonterminal.name()
                )
            }
        }
    }
}

pub(crate) fn validate<T, N>(
    start: &N,
    productions: &[Production<T, N>],
    declared: &HashSet<N>,
) -> Result<Vec<GrammarDiagnostic<N>>, GrammarError<N>>
where
    T: Token,
    N: NonTerminal,
{
    let heads: HashSet<&N> = productions.iter().map(|p| &p.head).collect();

    if !heads.contains(start) {
        return Err(GrammarError::EntryPointWithoutProductions(start.clone()));
    }

    for production in productions {
        for symbol in &production.body {
            if let Symbol::NonTerminal(referenced) = symbol {
                if !heads.contains(referenced) && !declared.contains(referenced) {
                    return Err(GrammarError::UndefinedNonTerminal {
                        head: production.head.clone(),
                        referenced: referenced.clone(),
                    });
                }
            }
        }
    }

    let mut diagnostics = Vec::new();

    for nonterminal in declared {
        if !heads.contains(nonterminal) {
            diagnostics.push(GrammarDiagnostic::NoProductions {
                nonterminal: nonterminal.clone(),
            });
        }
    }

    // Reachability walk over rule heads, starting from the entry point.
    let mut reached: HashSet<&N> = HashSet::new();
    let mut queue: VecDeque<&N> = VecDeque::new();
    reached.insert(start);
    queue.push_back(start);
    while let Some(current) = queue.pop_front() {
        for production in productions.iter().filter(|p| &p.head == current) {
            for symbol in &production.body {
                if let Symbol::NonTerminal(referenced) = symbol {
                    if reached.insert(referenced) {
                        queue.push_back(referenced);
                    }
                }
            }
        }
    }

    // Report each unreachable head once, in first-definition order.
    let mut seen: HashSet<&N> = HashSet::new();
    for production in productions {
        if !reached.contains(&production.head) && seen.insert(&production.head) {
            diagnostics.push(GrammarDiagnostic::Unreachable {
                nonterminal: production.head.clone(),
            });
        }
    }

    Ok(diagnostics)
}
