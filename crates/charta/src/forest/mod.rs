//! # Forest Module
//!
//! Ambiguity-aware extraction of derivations from a finished chart.
//!
//! The forest packs every way to derive a `(nonterminal, origin, end)`
//! constituent into a single node holding one alternative per distinct
//! production application. Subtrees shared between ambiguous derivations are
//! stored once, so forest construction stays polynomial in chart size even
//! when the number of trees is exponential.
//!
//! Concrete trees are materialized lazily: [`Forest::trees`] decodes tree
//! number `i` against memoized per-node counts, so enumeration can stop, be
//! restarted, or skip ahead without ever holding more than one tree.

pub mod tree;

pub use tree::*;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::chart::{Advance, Chart, ItemId};
use crate::error::ExtractError;
use crate::grammar::{Grammar, NonTerminal, ProductionId, Token};

/// Index of a packed node inside its [`Forest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Position of this node in [`Forest::node_count`] order
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A child slot of an alternative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForestChild {
    /// A nested constituent
    Node(NodeId),
    /// The input token at `position`
    Leaf {
        /// Input index of the token
        position: usize,
    },
}

/// One production application deriving a node's constituent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternative {
    /// The production applied
    pub production: ProductionId,
    /// One child per body symbol, in body order
    pub children: SmallVec<[ForestChild; 4]>,
}

/// A packed constituent: every derivation of `head` over `origin..end`
#[derive(Debug, Clone)]
pub struct ForestNode<N>
where
    N: NonTerminal,
{
    head: N,
    origin: usize,
    end: usize,
    alternatives: SmallVec<[Alternative; 2]>,
}

impl<N> ForestNode<N>
where
    N: NonTerminal,
{
    /// The nonterminal derived by this node
    #[must_use]
    pub const fn head(&self) -> &N {
        &self.head
    }

    /// The input span covered, as `(origin, end)`
    #[must_use]
    pub const fn span(&self) -> (usize, usize) {
        (self.origin, self.end)
    }

    /// The distinct production applications deriving this constituent
    #[must_use]
    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }
}

/// The packed derivation forest of one accepted parse
#[derive(Debug, Clone)]
pub struct Forest<T, N>
where
    T: Token,
    N: NonTerminal,
{
    nodes: Vec<ForestNode<N>>,
    root: NodeId,
    tokens: Vec<T>,
}

impl<T, N> Forest<T, N>
where
    T: Token,
    N: NonTerminal,
{
    /// Extract the forest from a finished chart
    ///
    /// `tokens` must be the same input the chart was built from; token
    /// values end up in tree leaves.
    ///
    /// For grammars where a nonterminal can derive itself over the same span
    /// (`A =>+ A`), the infinite derivation family is cut back to a finite
    /// one by dropping re-entrant alternatives, keeping the forest a DAG.
    ///
    /// # Errors
    ///
    /// [`ExtractError::NoDerivation`] if the chart rejects the input.
    pub fn build(
        grammar: &Grammar<T, N>,
        chart: &Chart,
        tokens: &[T],
    ) -> Result<Self, ExtractError> {
        if !chart.accepts() {
            return Err(ExtractError::NoDerivation {
                furthest: chart.furthest_position(),
            });
        }

        let mut builder = Builder {
            grammar,
            chart,
            complete: HashMap::new(),
            states: HashMap::new(),
            nodes: Vec::new(),
        };

        // Index every complete item by the constituent it derives.
        for position in 0..chart.positions() {
            for (i, item) in chart.items_at(position).iter().enumerate() {
                let production = grammar.production(item.production());
                if item.dot() == production.body.len() {
                    let key = (production.head.clone(), item.origin(), position);
                    builder
                        .complete
                        .entry(key)
                        .or_default()
                        .push(ItemId::new(position, u32::try_from(i).unwrap_or(u32::MAX)));
                }
            }
        }

        let root_key = (grammar.start().clone(), 0, tokens.len());
        // Acceptance guarantees at least one complete entry-point item over
        // the full span, so the root always materializes.
        let root = builder
            .node_for(&root_key)
            .ok_or(ExtractError::NoDerivation {
                furthest: chart.furthest_position(),
            })?;

        Ok(Self {
            nodes: builder.nodes,
            root,
            tokens: tokens.to_vec(),
        })
    }

    /// Number of packed nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a packed node
    #[must_use]
    pub fn node(&self, id: NodeId) -> &ForestNode<N> {
        &self.nodes[id.index()]
    }

    /// The node covering the whole input from the entry point
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Total number of distinct derivation trees, saturating at `u64::MAX`
    #[must_use]
    pub fn tree_count(&self) -> u64 {
        self.counts()[self.root.index()]
    }

    /// Returns true if the input has more than one derivation
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.tree_count() > 1
    }

    /// One derivation tree, without enumerating the rest
    #[must_use]
    pub fn first_tree(&self) -> Option<DerivationTree<T, N>> {
        self.trees().next()
    }

    /// Lazily enumerate every distinct derivation tree
    ///
    /// The iterator is restartable: calling `trees()` again enumerates from
    /// the beginning in the same order.
    #[must_use]
    pub fn trees(&self) -> Trees<'_, T, N> {
        let counts = self.counts();
        let total = counts[self.root.index()];
        Trees {
            forest: self,
            counts,
            next: 0,
            total,
        }
    }

    /// Per-node derivation counts, in node-id order.
    ///
    /// Nodes are allocated children-first, so a single forward pass is a
    /// topological evaluation.
    fn counts(&self) -> Vec<u64> {
        let mut counts = vec![0u64; self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            let mut total = 0u64;
            for alternative in &node.alternatives {
                let mut product = 1u64;
                for child in &alternative.children {
                    if let ForestChild::Node(id) = child {
                        product = product.saturating_mul(counts[id.index()]);
                    }
                }
                total = total.saturating_add(product);
            }
            counts[i] = total;
        }
        counts
    }

    /// Materialize tree number `index` below `id`.
    ///
    /// The index is decoded mixed-radix: alternatives partition the range,
    /// then children consume digits left to right with their own counts as
    /// radices.
    fn decode(&self, id: NodeId, index: u64, counts: &[u64]) -> DerivationTree<T, N> {
        let node = &self.nodes[id.index()];
        let mut index = index;
        for alternative in &node.alternatives {
            let mut alternative_count = 1u64;
            for child in &alternative.children {
                if let ForestChild::Node(child_id) = child {
                    alternative_count = alternative_count.saturating_mul(counts[child_id.index()]);
                }
            }
            if index < alternative_count {
                let mut remaining = index;
                let mut children = Vec::with_capacity(alternative.children.len());
                for child in &alternative.children {
                    match child {
                        ForestChild::Leaf { position } => children.push(DerivationTree::Leaf {
                            token: self.tokens[*position].clone(),
                            position: *position,
                        }),
                        ForestChild::Node(child_id) => {
                            let child_count = counts[child_id.index()];
                            let child_index = remaining % child_count;
                            remaining /= child_count;
                            children.push(self.decode(*child_id, child_index, counts));
                        }
                    }
                }
                return DerivationTree::Node {
                    head: node.head.clone(),
                    production: alternative.production,
                    children,
                };
            }
            index -= alternative_count;
        }
        unreachable!("tree index out of range for node");
    }
}

/// Lazy iterator over a forest's derivation trees
///
/// Produced by [`Forest::trees`].
pub struct Trees<'f, T, N>
where
    T: Token,
    N: NonTerminal,
{
    forest: &'f Forest<T, N>,
    counts: Vec<u64>,
    next: u64,
    total: u64,
}

impl<T, N> Iterator for Trees<'_, T, N>
where
    T: Token,
    N: NonTerminal,
{
    type Item = DerivationTree<T, N>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }
        let tree = self
            .forest
            .decode(self.forest.root, self.next, &self.counts);
        self.next += 1;
        Some(tree)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.total - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

enum Slot {
    Building,
    Done(NodeId),
}

struct Builder<'a, T, N>
where
    T: Token,
    N: NonTerminal,
{
    grammar: &'a Grammar<T, N>,
    chart: &'a Chart,
    complete: HashMap<(N, usize, usize), Vec<ItemId>>,
    states: HashMap<(N, usize, usize), Slot>,
    nodes: Vec<ForestNode<N>>,
}

impl<T, N> Builder<'_, T, N>
where
    T: Token,
    N: NonTerminal,
{
    /// Resolve the packed node for a constituent, creating it on first use.
    ///
    /// Returns `None` while the same constituent is already being built
    /// higher up the call stack; the caller drops that alternative, which is
    /// exactly the cut that keeps cyclic grammars finite.
    fn node_for(&mut self, key: &(N, usize, usize)) -> Option<NodeId> {
        match self.states.get(key) {
            Some(Slot::Done(id)) => return Some(*id),
            Some(Slot::Building) => return None,
            None => {}
        }
        self.states.insert(key.clone(), Slot::Building);

        let items: Vec<ItemId> = self.complete.get(key).cloned().unwrap_or_default();
        let mut alternatives: SmallVec<[Alternative; 2]> = SmallVec::new();
        for item_id in items {
            let (production, dot) = {
                let item = self.chart.item(item_id);
                (item.production(), item.dot())
            };
            for children in self.child_sequences(item_id, dot) {
                let alternative = Alternative {
                    production,
                    children,
                };
                if !alternatives.contains(&alternative) {
                    alternatives.push(alternative);
                }
            }
        }

        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(ForestNode {
            head: key.0.clone(),
            origin: key.1,
            end: key.2,
            alternatives,
        });
        self.states.insert(key.clone(), Slot::Done(id));
        Some(id)
    }

    /// Every distinct child sequence for the first `dot` body symbols of an
    /// item, reconstructed by walking predecessor histories backwards.
    fn child_sequences(&mut self, id: ItemId, dot: usize) -> Vec<SmallVec<[ForestChild; 4]>> {
        if dot == 0 {
            return vec![SmallVec::new()];
        }
        let histories = self.chart.item(id).histories().to_vec();
        let mut out: Vec<SmallVec<[ForestChild; 4]>> = Vec::new();
        for history in histories {
            let last = match history.advance {
                Advance::Scanned { position } => Some(ForestChild::Leaf { position }),
                Advance::Completed { child } => {
                    let (head, origin) = {
                        let item = self.chart.item(child);
                        (
                            self.grammar.production(item.production()).head.clone(),
                            item.origin(),
                        )
                    };
                    self.node_for(&(head, origin, child.position()))
                        .map(ForestChild::Node)
                }
            };
            let Some(last) = last else {
                // Re-entrant constituent: this derivation path is cyclic.
                continue;
            };
            for mut prefix in self.child_sequences(history.predecessor, dot - 1) {
                prefix.push(last);
                if !out.contains(&prefix) {
                    out.push(prefix);
                }
            }
        }
        out
    }
}
