//! # Engine Module
//!
//! The Earley recognition loop: one pass over input positions, with
//! prediction, scanning, and completion run to a fixpoint inside each
//! position before moving on.
//!
//! The driver keeps an explicit worklist per position instead of re-scanning
//! the growing item set. Two auxiliary indices make the closure linear in the
//! work done:
//!
//! - `waiting[k][n]`: items in set `k` whose dot sits before nonterminal `n`.
//!   Completion consults the waiting index of its origin set instead of
//!   walking every item there.
//! - `nullable[k][n]`: items completed in set `k` that also originated at
//!   `k`. A nonterminal completing in place (an epsilon derivation) may
//!   finish *before* some of its eventual parents are predicted; when such a
//!   parent later registers as waiting, the recorded completions are replayed
//!   so the parent still advances. This closes the classic ordering gap
//!   between same-position completion and prediction.
//!
//! Item-set membership is the only dedup guard, which is also what makes
//! left recursion converge: re-deriving an existing item merges a new
//! history and stops.

use std::collections::VecDeque;

use hashbrown::HashMap;

use crate::chart::{Advance, Chart, History, ItemId, ItemSet};
use crate::grammar::{Grammar, NonTerminal, ProductionId, Symbol, Token};

/// Run the recognizer over `tokens`
///
/// Always returns the chart, accepted or not; use [`Chart::accepts`] and
/// [`Chart::furthest_position`] for the verdict. Runtime is cubic in the
/// input length in the worst case and linear in chart size for the indices
/// above.
#[must_use]
pub fn parse<T, N>(grammar: &Grammar<T, N>, tokens: &[T]) -> Chart
where
    T: Token,
    N: NonTerminal,
{
    Driver::new(grammar, tokens).run()
}

struct Driver<'a, T, N>
where
    T: Token,
    N: NonTerminal,
{
    grammar: &'a Grammar<T, N>,
    tokens: &'a [T],
    sets: Vec<ItemSet>,
    waiting: Vec<HashMap<N, Vec<u32>>>,
    nullable: Vec<HashMap<N, Vec<u32>>>,
    furthest: usize,
}

impl<'a, T, N> Driver<'a, T, N>
where
    T: Token,
    N: NonTerminal,
{
    fn new(grammar: &'a Grammar<T, N>, tokens: &'a [T]) -> Self {
        let positions = tokens.len() + 1;
        Self {
            grammar,
            tokens,
            sets: vec![ItemSet::default(); positions],
            waiting: vec![HashMap::new(); positions],
            nullable: vec![HashMap::new(); positions],
            furthest: 0,
        }
    }

    fn run(mut self) -> Chart {
        let n = self.tokens.len();

        for &pid in self.grammar.productions_of(self.grammar.start()) {
            let _ = self.add_item(0, pid, 0, 0, None);
        }

        for k in 0..=n {
            let mut queue: VecDeque<u32> =
                (0..u32::try_from(self.sets[k].len()).unwrap_or(u32::MAX)).collect();
            while let Some(index) = queue.pop_front() {
                self.step(k, index, &mut queue);
            }
            // Nothing scanned into the next set: recognition has stalled and
            // every later set stays empty.
            if k < n && self.sets[k + 1].is_empty() {
                break;
            }
        }

        self.finish()
    }

    fn step(&mut self, k: usize, index: u32, queue: &mut VecDeque<u32>) {
        let grammar = self.grammar;
        let (pid, dot, origin) = {
            let item = &self.sets[k].items()[index as usize];
            (item.production(), item.dot(), item.origin())
        };
        let production = grammar.production(pid);

        match production.body.get(dot) {
            Some(Symbol::NonTerminal(next)) => {
                let next = next.clone();
                self.waiting[k].entry(next.clone()).or_default().push(index);

                for &predicted in grammar.productions_of(&next) {
                    if let Some(fresh) = self.add_item(k, predicted, 0, k, None) {
                        queue.push_back(fresh);
                    }
                }

                // Replay completions of `next` that already happened in this
                // set, so late-predicted parents of epsilon derivations are
                // not left behind.
                let replay: Vec<u32> = self.nullable[k].get(&next).cloned().unwrap_or_default();
                for child in replay {
                    let history = History {
                        predecessor: ItemId::new(k, index),
                        advance: Advance::Completed {
                            child: ItemId::new(k, child),
                        },
                    };
                    if let Some(fresh) = self.add_item(k, pid, dot + 1, origin, Some(history)) {
                        queue.push_back(fresh);
                    }
                }
            }
            Some(Symbol::Terminal(kind)) => {
                if k < self.tokens.len() && self.tokens[k].kind() == *kind {
                    let history = History {
                        predecessor: ItemId::new(k, index),
                        advance: Advance::Scanned { position: k },
                    };
                    let _ = self.add_item(k + 1, pid, dot + 1, origin, Some(history));
                    if k + 1 > self.furthest {
                        self.furthest = k + 1;
                    }
                }
            }
            None => {
                let head = production.head.clone();
                if origin == k {
                    self.nullable[k].entry(head.clone()).or_default().push(index);
                }

                let waiters: Vec<u32> = self.waiting[origin].get(&head).cloned().unwrap_or_default();
                for waiter in waiters {
                    let (wpid, wdot, worigin) = {
                        let w = &self.sets[origin].items()[waiter as usize];
                        (w.production(), w.dot(), w.origin())
                    };
                    let history = History {
                        predecessor: ItemId::new(origin, waiter),
                        advance: Advance::Completed {
                            child: ItemId::new(k, index),
                        },
                    };
                    if let Some(fresh) = self.add_item(k, wpid, wdot + 1, worigin, Some(history)) {
                        queue.push_back(fresh);
                    }
                }
            }
        }
    }

    /// Insert an item by identity triple, merging `history` either way.
    /// Returns the index only when the item is new.
    fn add_item(
        &mut self,
        set: usize,
        production: ProductionId,
        dot: usize,
        origin: usize,
        history: Option<History>,
    ) -> Option<u32> {
        let (index, fresh) = self.sets[set].insert(production, dot, origin);
        if let Some(history) = history {
            self.sets[set].item_mut(index).add_history(history);
        }
        fresh.then_some(index)
    }

    fn finish(self) -> Chart {
        let n = self.tokens.len();
        let grammar = self.grammar;
        let mut accepting = Vec::new();
        for (i, item) in self.sets[n].items().iter().enumerate() {
            let production = grammar.production(item.production());
            if item.dot() == production.body.len()
                && item.origin() == 0
                && production.head == *grammar.start()
            {
                accepting.push(ItemId::new(n, u32::try_from(i).unwrap_or(u32::MAX)));
            }
        }
        Chart::from_parts(self.sets, accepting, self.furthest)
    }
}
