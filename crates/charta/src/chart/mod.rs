//! # Chart Module
//!
//! The chart is the engine's output: one item set per input position, plus
//! the acceptance verdict and the furthest position a scan reached. It is
//! append-only while the engine runs and read-only afterwards; the forest
//! extractor and external renderers walk it through [`Chart::items_at`] and
//! [`Item::histories`].

pub mod item;

pub use item::*;

use hashbrown::HashMap;

use crate::grammar::ProductionId;

/// All items recognized at one input position
#[derive(Debug, Clone, Default)]
pub struct ItemSet {
    items: Vec<Item>,
    index: HashMap<(ProductionId, usize, usize), u32>,
}

impl ItemSet {
    /// Items in insertion order
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items in this set
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no item was ever added at this position
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert by identity triple; returns the item's index and whether it
    /// was newly added.
    pub(crate) fn insert(
        &mut self,
        production: ProductionId,
        dot: usize,
        origin: usize,
    ) -> (u32, bool) {
        if let Some(&index) = self.index.get(&(production, dot, origin)) {
            return (index, false);
        }
        let index = u32::try_from(self.items.len()).unwrap_or(u32::MAX);
        self.items.push(Item::new(production, dot, origin));
        self.index.insert((production, dot, origin), index);
        (index, true)
    }

    pub(crate) fn item_mut(&mut self, index: u32) -> &mut Item {
        &mut self.items[index as usize]
    }
}

/// The finished parse chart
///
/// Always produced, accepted or not: rejection diagnostics are queries on
/// the chart rather than an error from the engine.
#[derive(Debug, Clone)]
pub struct Chart {
    sets: Vec<ItemSet>,
    accepting: Vec<ItemId>,
    furthest: usize,
}

impl Chart {
    pub(crate) fn from_parts(sets: Vec<ItemSet>, accepting: Vec<ItemId>, furthest: usize) -> Self {
        Self {
            sets,
            accepting,
            furthest,
        }
    }

    /// Number of item sets (input length plus one)
    #[must_use]
    pub fn positions(&self) -> usize {
        self.sets.len()
    }

    /// Items recognized at `position`
    ///
    /// # Panics
    ///
    /// Panics if `position` exceeds the input length.
    #[must_use]
    pub fn items_at(&self, position: usize) -> &[Item] {
        self.sets[position].items()
    }

    /// Resolve an [`ItemId`] issued by this chart
    ///
    /// # Panics
    ///
    /// Panics if `id` came from a different chart.
    #[must_use]
    pub fn item(&self, id: ItemId) -> &Item {
        &self.sets[id.set as usize].items()[id.index as usize]
    }

    /// Did the whole input derive from the entry point?
    #[must_use]
    pub fn accepts(&self) -> bool {
        !self.accepting.is_empty()
    }

    /// The complete entry-point items spanning the whole input
    #[must_use]
    pub fn accepting_items(&self) -> &[ItemId] {
        &self.accepting
    }

    /// Highest input position a successful scan reached
    ///
    /// On rejection this is where recognition stalled; on acceptance it
    /// equals the input length (or 0 for empty input).
    #[must_use]
    pub const fn furthest_position(&self) -> usize {
        self.furthest
    }
}
