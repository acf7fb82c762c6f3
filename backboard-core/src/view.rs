//! View projector: derives the filtered, per-category, display-ordered
//! projection of the order model.
//!
//! Holds no state of its own; callers recompute the projection after every
//! model or filter change.

use crate::model::OrderModel;
use crate::types::{Category, Item};
use std::collections::BTreeSet;

/// Current display filter: selected tags (OR semantics) and done visibility.
#[derive(Debug, Clone, Default)]
pub struct ViewFilter {
    /// Keep only items carrying at least one selected tag. Empty = no tag
    /// filtering.
    pub tags: BTreeSet<String>,
    /// Render the Done bucket. When false, Done items are dropped and the
    /// Done bucket is omitted entirely.
    pub show_done: bool,
}

impl ViewFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Set done visibility
    pub fn with_show_done(mut self, show_done: bool) -> Self {
        self.show_done = show_done;
        self
    }

    fn keeps(&self, item: &Item) -> bool {
        if !self.show_done && item.category == Category::Done {
            return false;
        }
        if self.tags.is_empty() {
            return true;
        }
        item.has_any_tag(self.tags.iter().map(String::as_str))
    }
}

/// One rendered category column. Present even when empty, so the renderer can
/// offer its drop zone.
#[derive(Debug)]
pub struct Bucket<'a> {
    pub category: Category,
    pub items: Vec<&'a Item>,
}

impl Bucket<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The full projected board: buckets in render order.
#[derive(Debug)]
pub struct BoardView<'a> {
    pub buckets: Vec<Bucket<'a>>,
}

impl<'a> BoardView<'a> {
    /// Bucket for a category, if it is rendered under the current filter
    pub fn bucket(&self, category: Category) -> Option<&Bucket<'a>> {
        self.buckets.iter().find(|b| b.category == category)
    }

    /// All projected items in display order (bucket order, then within-bucket
    /// order)
    pub fn items(&self) -> impl Iterator<Item = &'a Item> + '_ {
        self.buckets.iter().flat_map(|b| b.items.iter().copied())
    }
}

/// Project the model through the filter. Items keep their canonical relative
/// order inside each bucket.
pub fn project<'a>(model: &'a OrderModel, filter: &ViewFilter) -> BoardView<'a> {
    let kept: Vec<&Item> = model.sorted_view().filter(|i| filter.keeps(i)).collect();

    let buckets = Category::render_order(filter.show_done)
        .iter()
        .map(|&category| Bucket {
            category,
            items: kept
                .iter()
                .copied()
                .filter(|i| i.category == category)
                .collect(),
        })
        .collect();

    BoardView { buckets }
}
