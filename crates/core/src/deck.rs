//! Item deck - random draws without repeats until the catalogue is exhausted
//!
//! The deck remembers which item ids were shown in the current cycle. Each
//! draw picks uniformly among the items not yet shown. Once every item has
//! been shown the cycle restarts, so a non-empty catalogue never starves.

use std::collections::HashSet;

use tracing::debug;

use crate::rng::SimpleRng;
use crate::types::{Item, ItemId};

#[derive(Debug, Clone)]
pub struct ItemDeck {
    used: HashSet<ItemId>,
    rng: SimpleRng,
    /// Scratch buffer of candidate indices, reused across draws.
    candidates: Vec<usize>,
}

impl ItemDeck {
    pub fn new(seed: u32) -> Self {
        Self {
            used: HashSet::new(),
            rng: SimpleRng::new(seed),
            candidates: Vec::new(),
        }
    }

    /// Draw the index of an unused item in `items` and mark it used.
    ///
    /// Returns `None` only for an empty slice.
    pub fn draw(&mut self, items: &[Item]) -> Option<usize> {
        if items.is_empty() {
            return None;
        }

        if self.used.len() >= items.len() {
            debug!(used = self.used.len(), "every item shown, starting a new cycle");
            self.used.clear();
        }

        self.collect_candidates(items);
        if self.candidates.is_empty() {
            // Only reachable if `used` holds ids that are not in `items`.
            self.used.clear();
            self.collect_candidates(items);
        }

        let pick = self.candidates[self.rng.next_index(self.candidates.len())];
        self.used.insert(items[pick].id);
        Some(pick)
    }

    fn collect_candidates(&mut self, items: &[Item]) {
        let used = &self.used;
        self.candidates.clear();
        self.candidates.extend(
            items
                .iter()
                .enumerate()
                .filter(|(_, item)| !used.contains(&item.id))
                .map(|(i, _)| i),
        );
    }

    /// Mark an id as shown without drawing it.
    pub fn mark_used(&mut self, id: ItemId) {
        self.used.insert(id);
    }

    /// Forget every shown id.
    pub fn clear(&mut self) {
        self.used.clear();
    }

    pub fn is_used(&self, id: ItemId) -> bool {
        self.used.contains(&id)
    }

    pub fn used_len(&self) -> usize {
        self.used.len()
    }

    pub fn used_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.used.iter().copied()
    }
}

impl Default for ItemDeck {
    fn default() -> Self {
        Self::new(1)
    }
}
