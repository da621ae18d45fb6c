//! Chart items and their provenance histories.

use smallvec::SmallVec;

use crate::grammar::ProductionId;

/// Arena reference to an item: position of its set, index within the set
///
/// Ids are plain data, so they can freely encode the cyclic sharing that
/// arises in ambiguous charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId {
    /// Chart position of the item's set
    pub set: u32,
    /// Index within that set
    pub index: u32,
}

impl ItemId {
    pub(crate) fn new(set: usize, index: u32) -> Self {
        Self {
            set: u32::try_from(set).unwrap_or(u32::MAX),
            index,
        }
    }

    /// Chart position of the item's set
    #[must_use]
    pub const fn position(self) -> usize {
        self.set as usize
    }
}

/// How an item advanced over its last pre-dot symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The dot moved over a terminal by consuming the token at `position`
    Scanned {
        /// Input index of the consumed token
        position: usize,
    },
    /// The dot moved over a nonterminal completed by `child`
    Completed {
        /// The complete item that derived the nonterminal
        child: ItemId,
    },
}

/// One way an item came to exist
///
/// `predecessor` is the same rule with the dot one step earlier; `advance`
/// says what the dot moved over. An item holding several histories is the
/// chart's record of ambiguity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct History {
    /// The item this one was advanced from
    pub predecessor: ItemId,
    /// What the dot moved over
    pub advance: Advance,
}

/// An Earley item: a production, a dot position, and an origin
///
/// Identity is exactly the `(production, dot, origin)` triple. Histories are
/// a side channel merged into the item when a duplicate derivation path is
/// found; they never participate in equality or hashing, which is what lets
/// left-recursive grammars converge.
#[derive(Debug, Clone)]
pub struct Item {
    production: ProductionId,
    dot: usize,
    origin: usize,
    histories: SmallVec<[History; 2]>,
}

impl Item {
    pub(crate) fn new(production: ProductionId, dot: usize, origin: usize) -> Self {
        Self {
            production,
            dot,
            origin,
            histories: SmallVec::new(),
        }
    }

    /// The production this item progresses through
    #[must_use]
    pub const fn production(&self) -> ProductionId {
        self.production
    }

    /// How many body symbols have been recognized
    #[must_use]
    pub const fn dot(&self) -> usize {
        self.dot
    }

    /// Chart position where recognition of this production began
    #[must_use]
    pub const fn origin(&self) -> usize {
        self.origin
    }

    /// Every recorded way this item was derived
    ///
    /// Empty exactly for predicted items (dot at the start).
    #[must_use]
    pub fn histories(&self) -> &[History] {
        &self.histories
    }

    /// Append a history unless an identical one is already recorded.
    ///
    /// Merging two completions that advanced over the same child would
    /// otherwise double-count derivations during extraction.
    pub(crate) fn add_history(&mut self, history: History) {
        if !self.histories.contains(&history) {
            self.histories.push(history);
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.production == other.production
            && self.dot == other.dot
            && self.origin == other.origin
    }
}

impl Eq for Item {}

impl std::hash::Hash for Item {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.production.hash(state);
        self.dot.hash(state);
        self.origin.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_ignores_histories() {
        let mut a = Item::new(ProductionId(0), 1, 0);
        let b = Item::new(ProductionId(0), 1, 0);
        a.add_history(History {
            predecessor: ItemId::new(0, 0),
            advance: Advance::Scanned { position: 0 },
        });
        assert_eq!(a, b);
    }

    #[test]
    fn add_history_deduplicates() {
        let mut item = Item::new(ProductionId(0), 1, 0);
        let h = History {
            predecessor: ItemId::new(0, 0),
            advance: Advance::Scanned { position: 0 },
        };
        item.add_history(h);
        item.add_history(h);
        assert_eq!(item.histories().len(), 1);
    }
}
