//! In-memory order model: every item of the active account, held in canonical
//! display order.
//!
//! The canonical order is "priority ascending, ties broken by prior stable
//! order" — never map iteration order. The backing vector is kept in that
//! order; staged fractional priorities (mid-reconciliation) are the only time
//! vector order and priority order may briefly disagree, and
//! [`crate::reconcile::reindex`] restores agreement before anything is
//! persisted or displayed.

use crate::types::{Category, Item, ItemId};

/// Ordered collection of the account's items, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct OrderModel {
    items: Vec<Item>,
}

impl OrderModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the model contents with a freshly loaded item set.
    ///
    /// An absent source loads as an empty account, never an error. Input in
    /// any order is accepted; a stable sort by priority establishes the
    /// canonical order (equal priorities keep their input order).
    pub fn load(&mut self, mut items: Vec<Item>) {
        items.sort_by(|a, b| a.priority.total_cmp(&b.priority));
        self.items = items;
    }

    /// Lazy, restartable sequence of items in canonical order. Pure.
    pub fn sorted_view(&self) -> SortedView<'_> {
        let mut ordered: Vec<&Item> = self.items.iter().collect();
        ordered.sort_by(|a, b| a.priority.total_cmp(&b.priority));
        SortedView { ordered, pos: 0 }
    }

    /// Append an item to the given category: its priority becomes one past the
    /// category's current maximum, or 0 when the category is empty. Returns a
    /// reference to the stored item.
    ///
    /// The caller is expected to reindex before treating the result as stable
    /// (priorities may be non-contiguous until then).
    pub fn append(&mut self, mut item: Item, category: Category) -> &Item {
        item.category = category;
        item.priority = match self.max_priority_in(category) {
            Some(max) => max + 1.0,
            None => 0.0,
        };
        // Keep the vector canonical; the new priority decides the slot, and
        // ties land after their peers.
        let idx = self
            .items
            .partition_point(|i| i.priority.total_cmp(&item.priority).is_le());
        self.items.insert(idx, item);
        &self.items[idx]
    }

    /// Remove an item by id. Returns the removed item, or `None` when the id
    /// is unknown (a no-op). Survivors keep their priorities; gaps are
    /// tolerated until the next reconciliation.
    pub fn remove(&mut self, id: &ItemId) -> Option<Item> {
        let idx = self.items.iter().position(|i| &i.id == id)?;
        Some(self.items.remove(idx))
    }

    /// Look up an item by id
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Look up an item by id for a direct field edit. Edits made through this
    /// handle must not touch `priority` or `category`; those belong to the
    /// reconciliation engine.
    pub fn get_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| &i.id == id)
    }

    /// Position of an item in canonical order
    pub fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.sorted_view().position(|i| &i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items currently in the given category, in canonical order
    pub fn items_in(&self, category: Category) -> Vec<&Item> {
        self.sorted_view().filter(|i| i.category == category).collect()
    }

    /// Highest priority among items of the category, if any
    pub fn max_priority_in(&self, category: Category) -> Option<f64> {
        self.items
            .iter()
            .filter(|i| i.category == category)
            .map(|i| i.priority)
            .max_by(|a, b| a.total_cmp(b))
    }

    /// Lowest priority among items of the category, if any
    pub fn min_priority_in(&self, category: Category) -> Option<f64> {
        self.items
            .iter()
            .filter(|i| i.category == category)
            .map(|i| i.priority)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Raw access in stable order, for the reconciliation engine.
    pub(crate) fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.items
    }

    /// Items in stable (vector) order
    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

/// Restartable iterator over items in canonical order.
#[derive(Debug, Clone)]
pub struct SortedView<'a> {
    ordered: Vec<&'a Item>,
    pos: usize,
}

impl SortedView<'_> {
    /// Rewind to the first item
    pub fn restart(&mut self) {
        self.pos = 0;
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl<'a> Iterator for SortedView<'a> {
    type Item = &'a Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.ordered.get(self.pos).copied();
        self.pos += 1;
        item
    }
}
