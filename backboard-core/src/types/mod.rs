//! Core types for the ordering engine

mod category;
mod ids;
mod item;

// Re-export all types
pub use category::Category;
pub use ids::{AccountId, ItemId};
pub use item::Item;
