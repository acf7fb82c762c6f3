//! Ordering and reconciliation engine for the Backboard backlog tracker
//!
//! Backboard is a personal kanban-style backlog: items move through four
//! fixed workflow categories and are manually ordered by priority within an
//! account. This crate is the core of that system — the logic that maintains
//! a strict, persisted total order over items and reconciles it after every
//! drag.
//!
//! ## Overview
//!
//! - **Order model** — every item of the active account, in canonical order
//!   (priority ascending, ties broken by stable prior order)
//! - **View projector** — filtered, per-category, display-ordered projection;
//!   read-only, recomputed per render
//! - **Drag controller** — pure state machine turning drag events into move
//!   intents
//! - **Reconciliation engine** — applies an intent and always finishes with a
//!   full reindex to the contiguous integer sequence `0..n-1`
//! - **Import/export** — forgiving JSON boundary with defaulted fields
//!
//! ## Basic Usage
//!
//! ```rust
//! use backboard_core::{
//!     drag, reconcile, AccountId, Category, DragEvent, DragState, DropTarget, Item, OrderModel,
//! };
//!
//! let account = AccountId::from_string("me");
//! let mut model = OrderModel::new();
//! reconcile::insert_with_position(
//!     &mut model,
//!     Item::new(account.clone(), "Write the readme"),
//!     Category::Planned,
//!     reconcile::InsertPosition::Bottom,
//! );
//! reconcile::insert_with_position(
//!     &mut model,
//!     Item::new(account, "Fix the login bug"),
//!     Category::Planned,
//!     reconcile::InsertPosition::Top,
//! );
//!
//! // A drag resolves to an intent, and the engine reconciles it.
//! let first = model.sorted_view().next().unwrap().id.clone();
//! let last = model.sorted_view().last().unwrap().id.clone();
//! let state = drag::transition(DragState::Idle, DragEvent::Start { item: first }, &model).0;
//! let (_, intent) = drag::transition(
//!     state,
//!     DragEvent::End { target: DropTarget::Item(last) },
//!     &model,
//! );
//! if let Some(intent) = intent {
//!     reconcile::apply(&mut model, &intent).unwrap();
//! }
//!
//! let priorities: Vec<f64> = model.sorted_view().map(|i| i.priority).collect();
//! assert_eq!(priorities, [0.0, 1.0]);
//! ```
//!
//! The persistence side (storage contract, outbox synchronizer, session
//! context) lives in the `backboard-sync` crate; nothing in this crate blocks
//! on the network.

mod error;
pub mod types;

// Engine modules
pub mod drag;
pub mod model;
pub mod reconcile;
pub mod transfer;
pub mod view;

pub use error::{BoardError, Result};

// Re-export commonly used types
pub use drag::{DragEvent, DragState, DropTarget};
pub use model::{OrderModel, SortedView};
pub use reconcile::{InsertPosition, MoveIntent, PriorityAssignment, ReconcileOutcome};
pub use transfer::{export_json, import_json, ImportRecord, ImportSummary};
pub use types::{AccountId, Category, Item, ItemId};
pub use view::{project, BoardView, Bucket, ViewFilter};
