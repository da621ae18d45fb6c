//! Grammar-driven input generators for tests.

use std::collections::VecDeque;

use hashbrown::HashSet;

use crate::grammar::{Grammar, NonTerminal, Symbol, Token};

/// Bounds for [`LanguageEnumerator`]
#[derive(Debug, Clone)]
pub struct EnumeratorConfig {
    /// Sentences longer than this are discarded
    pub max_length: usize,
    /// Hard cap on expansion steps, so cyclic grammars terminate
    pub max_steps: usize,
}

impl Default for EnumeratorConfig {
    fn default() -> Self {
        Self {
            max_length: 8,
            max_steps: 100_000,
        }
    }
}

/// Exhaustive enumeration of the short sentences in a grammar's language
///
/// Breadth-first leftmost expansion of sentential forms, pruned as soon as a
/// form's terminal count exceeds `max_length`. Intended for completeness
/// cross-checks: every enumerated sentence must be accepted, and short
/// sequences outside the enumeration must be rejected.
pub struct LanguageEnumerator<'g, T, N>
where
    T: Token,
    N: NonTerminal,
{
    grammar: &'g Grammar<T, N>,
    config: EnumeratorConfig,
}

impl<'g, T, N> LanguageEnumerator<'g, T, N>
where
    T: Token,
    N: NonTerminal,
{
    /// Create an enumerator over `grammar`
    #[must_use]
    pub fn new(grammar: &'g Grammar<T, N>, config: EnumeratorConfig) -> Self {
        Self { grammar, config }
    }

    /// All distinct sentences of length at most `max_length`, as terminal
    /// kind sequences, in discovery order
    #[must_use]
    pub fn sentences(&self) -> Vec<Vec<T::Kind>> {
        let grammar = self.grammar;
        let mut out: Vec<Vec<T::Kind>> = Vec::new();
        let mut emitted: HashSet<Vec<T::Kind>> = HashSet::new();
        let mut visited: HashSet<Vec<Symbol<T, N>>> = HashSet::new();
        let mut queue: VecDeque<Vec<Symbol<T, N>>> = VecDeque::new();

        let initial = vec![Symbol::NonTerminal(grammar.start().clone())];
        visited.insert(initial.clone());
        queue.push_back(initial);

        let mut steps = 0;
        while let Some(form) = queue.pop_front() {
            if steps >= self.config.max_steps {
                break;
            }
            steps += 1;

            let rewrite = form
                .iter()
                .position(|symbol| matches!(symbol, Symbol::NonTerminal(_)));
            let Some(at) = rewrite else {
                let sentence: Vec<T::Kind> = form
                    .iter()
                    .filter_map(|symbol| match symbol {
                        Symbol::Terminal(kind) => Some(*kind),
                        Symbol::NonTerminal(_) => None,
                    })
                    .collect();
                if sentence.len() <= self.config.max_length && emitted.insert(sentence.clone()) {
                    out.push(sentence);
                }
                continue;
            };

            let Symbol::NonTerminal(head) = &form[at] else {
                continue;
            };
            for &pid in grammar.productions_of(head) {
                let body = &grammar.production(pid).body;
                let mut next: Vec<Symbol<T, N>> = Vec::with_capacity(form.len() + body.len());
                next.extend_from_slice(&form[..at]);
                next.extend(body.iter().cloned());
                next.extend_from_slice(&form[at + 1..]);

                let terminals = next.iter().filter(|s| s.is_terminal()).count();
                if terminals > self.config.max_length {
                    continue;
                }
                if visited.insert(next.clone()) {
                    queue.push_back(next);
                }
            }
        }

        out
    }
}

/// Bounds and seed for [`SentenceSampler`]
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Maximum depth of recursive rule expansion
    pub max_depth: usize,
    /// Seed for reproducible sampling
    pub seed: u64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_depth: 16,
            seed: 0x853c_49e6_748f_ea9b,
        }
    }
}

/// Seeded random derivations from a grammar
///
/// Each sample is a leftmost random expansion of the entry point; `None`
/// means the walk exceeded `max_depth` before terminating, which callers
/// should just skip.
pub struct SentenceSampler<'g, T, N>
where
    T: Token,
    N: NonTerminal,
{
    grammar: &'g Grammar<T, N>,
    config: SamplerConfig,
    rng: SimpleRng,
}

impl<'g, T, N> SentenceSampler<'g, T, N>
where
    T: Token,
    N: NonTerminal,
{
    /// Create a sampler over `grammar`
    #[must_use]
    pub fn new(grammar: &'g Grammar<T, N>, config: SamplerConfig) -> Self {
        let rng = SimpleRng::with_seed(config.seed);
        Self {
            grammar,
            config,
            rng,
        }
    }

    /// Draw one random sentence as a terminal kind sequence
    pub fn sample(&mut self) -> Option<Vec<T::Kind>> {
        let start = self.grammar.start().clone();
        let mut out = Vec::new();
        if self.expand(&start, 0, &mut out) {
            Some(out)
        } else {
            None
        }
    }

    fn expand(&mut self, head: &N, depth: usize, out: &mut Vec<T::Kind>) -> bool {
        if depth > self.config.max_depth {
            return false;
        }
        let grammar = self.grammar;
        let choices = grammar.productions_of(head);
        if choices.is_empty() {
            return false;
        }
        let pick = usize::try_from(self.rng.next_u64()).unwrap_or(0) % choices.len();
        let pid = choices[pick];
        for symbol in &grammar.production(pid).body {
            match symbol {
                Symbol::Terminal(kind) => out.push(*kind),
                Symbol::NonTerminal(nt) => {
                    if !self.expand(nt, depth + 1, out) {
                        return false;
                    }
                }
            }
        }
        true
    }
}

/// Simple RNG for deterministic testing
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn with_seed(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        // XorShift algorithm
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}
