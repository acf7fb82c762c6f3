//! Drag controller: a small state machine that classifies a finished drag
//! into a move intent.
//!
//! Modeled as a pure transition function over `(state, event)` so it can be
//! unit-tested without simulating pointer events. The controller never
//! mutates the order model; it only reads it to resolve the drop target, and
//! emits at most one intent per completed drag.

use crate::model::OrderModel;
use crate::reconcile::MoveIntent;
use crate::types::{Category, ItemId};

/// Controller state: either nothing is being dragged, or exactly one item is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        item: ItemId,
    },
}

/// Where a drag ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Dropped onto another item's card
    Item(ItemId),
    /// Dropped onto the explicit empty-category zone
    EmptyCategory(Category),
}

/// Pointer/keyboard-driven drag events, already mapped from the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Start { item: ItemId },
    End { target: DropTarget },
    Cancel,
}

/// Advance the state machine. Returns the next state and, for a valid
/// `Dragging --End--> Idle` transition, the single move intent it resolves to.
///
/// Cancelled drags, drops onto the dragged item itself, and events that
/// reference unknown ids all emit nothing.
pub fn transition(
    state: DragState,
    event: DragEvent,
    model: &OrderModel,
) -> (DragState, Option<MoveIntent>) {
    match (state, event) {
        (DragState::Idle, DragEvent::Start { item }) => {
            if model.get(&item).is_none() {
                tracing::debug!(item = %item, "drag start for unknown item ignored");
                return (DragState::Idle, None);
            }
            (DragState::Dragging { item }, None)
        }
        // A second start while dragging re-snapshots; the first drag is
        // abandoned without an intent.
        (DragState::Dragging { .. }, DragEvent::Start { item }) => {
            transition(DragState::Idle, DragEvent::Start { item }, model)
        }
        (DragState::Dragging { item }, DragEvent::End { target }) => {
            (DragState::Idle, classify(&item, &target, model))
        }
        (DragState::Dragging { .. }, DragEvent::Cancel) => (DragState::Idle, None),
        (DragState::Idle, DragEvent::End { .. }) | (DragState::Idle, DragEvent::Cancel) => {
            (DragState::Idle, None)
        }
    }
}

fn classify(item: &ItemId, target: &DropTarget, model: &OrderModel) -> Option<MoveIntent> {
    match target {
        DropTarget::Item(target_id) => {
            if target_id == item {
                return None;
            }
            let source = model.get(item)?;
            let target_item = model.get(target_id)?;

            if source.category == target_item.category {
                let source_index = model.index_of(item)?;
                let target_index = model.index_of(target_id)?;
                Some(MoveIntent::WithinCategory {
                    source_index,
                    target_index,
                })
            } else {
                Some(MoveIntent::AcrossCategories {
                    item: item.clone(),
                    category: target_item.category,
                    target: target_id.clone(),
                })
            }
        }
        DropTarget::EmptyCategory(category) => Some(MoveIntent::ToEmptyCategory {
            item: item.clone(),
            category: *category,
        }),
    }
}
