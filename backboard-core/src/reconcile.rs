//! Reconciliation engine: applies a move intent to the order model and
//! restores the contiguous integer priority sequence.
//!
//! Every order- or category-changing mutation funnels through here and ends
//! with [`reindex`], which stable-sorts by the current (possibly fractional)
//! priorities and reassigns `priority = index`. Only reindexed priorities are
//! ever persisted.

use crate::error::{BoardError, Result};
use crate::model::OrderModel;
use crate::types::{Category, Item, ItemId};
use serde::{Deserialize, Serialize};

/// A move resolved by the drag controller, ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveIntent {
    /// Reorder within one category. Indices are positions in the full
    /// canonical list, not positions inside the category bucket.
    WithinCategory {
        source_index: usize,
        target_index: usize,
    },
    /// Drop onto an item that lives in a different category. The dragged item
    /// adopts `category` and lands at the target's slot.
    AcrossCategories {
        item: ItemId,
        category: Category,
        target: ItemId,
    },
    /// Drop onto an explicit empty-category zone. Only the category changes;
    /// the item's position among all items does not.
    ToEmptyCategory { item: ItemId, category: Category },
}

/// Where a quick-added item enters its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Top,
    Bottom,
}

/// One persisted priority write, produced by [`reindex`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityAssignment {
    pub id: ItemId,
    pub priority: f64,
}

/// Result of applying an intent: whether anything changed, and the full
/// priority batch to push to the store when it did.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOutcome {
    pub changed: bool,
    pub assignments: Vec<PriorityAssignment>,
}

impl ReconcileOutcome {
    fn unchanged() -> Self {
        Self::default()
    }

    fn changed(assignments: Vec<PriorityAssignment>) -> Self {
        Self {
            changed: true,
            assignments,
        }
    }
}

/// Apply a move intent. Fails only when a referenced id (or index) is
/// unknown; in that case the model is left untouched and the caller drops the
/// intent. Structural situations (emptied categories, single-item lists) are
/// never errors.
pub fn apply(model: &mut OrderModel, intent: &MoveIntent) -> Result<ReconcileOutcome> {
    match intent {
        MoveIntent::WithinCategory {
            source_index,
            target_index,
        } => move_within_category(model, *source_index, *target_index),
        MoveIntent::AcrossCategories {
            item,
            category,
            target,
        } => move_across_categories(model, item, *category, target),
        MoveIntent::ToEmptyCategory { item, category } => {
            move_to_empty_category(model, item, *category)
        }
    }
}

fn move_within_category(
    model: &mut OrderModel,
    source_index: usize,
    target_index: usize,
) -> Result<ReconcileOutcome> {
    let len = model.len();
    if source_index >= len {
        return Err(BoardError::item_not_found(format!("index {source_index}")));
    }
    if target_index >= len {
        return Err(BoardError::item_not_found(format!("index {target_index}")));
    }
    if source_index == target_index {
        return Ok(ReconcileOutcome::unchanged());
    }

    tracing::debug!(source_index, target_index, "reorder within category");

    // Stage a fractional priority just past the target, then let the reindex
    // sort settle it. Dragging downward lands after the target, dragging
    // upward lands before it.
    let items = model.items_mut();
    let target_priority = items[target_index].priority;
    let mut item = items.remove(source_index);
    item.priority = if source_index < target_index {
        target_priority + 0.5
    } else {
        target_priority - 0.5
    };
    items.push(item);

    Ok(ReconcileOutcome::changed(reindex(model)))
}

fn move_across_categories(
    model: &mut OrderModel,
    item_id: &ItemId,
    category: Category,
    target_id: &ItemId,
) -> Result<ReconcileOutcome> {
    if item_id == target_id {
        return Ok(ReconcileOutcome::unchanged());
    }
    let source_index = model
        .index_of(item_id)
        .ok_or_else(|| BoardError::item_not_found(item_id.as_str()))?;
    let target_index = model
        .index_of(target_id)
        .ok_or_else(|| BoardError::item_not_found(target_id.as_str()))?;

    tracing::debug!(
        item = %item_id,
        target = %target_id,
        category = %category,
        "move across categories"
    );

    // Same staging as a within-category move, plus the category swap.
    let items = model.items_mut();
    let target_priority = items[target_index].priority;
    let mut item = items.remove(source_index);
    item.category = category;
    item.priority = if source_index < target_index {
        target_priority + 0.5
    } else {
        target_priority - 0.5
    };
    item.touch();
    items.push(item);

    Ok(ReconcileOutcome::changed(reindex(model)))
}

fn move_to_empty_category(
    model: &mut OrderModel,
    item_id: &ItemId,
    category: Category,
) -> Result<ReconcileOutcome> {
    let item = model
        .get_mut(item_id)
        .ok_or_else(|| BoardError::item_not_found(item_id.as_str()))?;

    tracing::debug!(item = %item_id, category = %category, "drop into empty category");

    item.category = category;
    item.touch();

    // Position among all items is unchanged; the item owns its new bucket by
    // virtue of having no peers there.
    Ok(ReconcileOutcome::changed(reindex(model)))
}

/// Quick-add outside of a drag: stage a provisional fractional priority that
/// places the item at the top or bottom of its category, then immediately
/// reindex. The fractional key never survives into the outcome.
pub fn insert_with_position(
    model: &mut OrderModel,
    mut item: Item,
    category: Category,
    position: InsertPosition,
) -> ReconcileOutcome {
    item.category = category;
    item.priority = match position {
        InsertPosition::Top => model
            .min_priority_in(category)
            .map_or(0.0, |min| min - 0.5),
        InsertPosition::Bottom => model
            .max_priority_in(category)
            .map_or(0.0, |max| max + 1.0),
    };
    model.items_mut().push(item);
    ReconcileOutcome::changed(reindex(model))
}

/// Restore invariant: priorities form the contiguous sequence `0..n-1` in
/// canonical order. Stable sort, so equal priorities keep their prior order.
/// Returns the complete priority batch for the synchronizer.
pub fn reindex(model: &mut OrderModel) -> Vec<PriorityAssignment> {
    let items = model.items_mut();
    items.sort_by(|a, b| a.priority.total_cmp(&b.priority));
    items
        .iter_mut()
        .enumerate()
        .map(|(index, item)| {
            item.priority = index as f64;
            PriorityAssignment {
                id: item.id.clone(),
                priority: item.priority,
            }
        })
        .collect()
}
