//! Storage collaborator contract.
//!
//! The persistence backend is external; the synchronizer only assumes these
//! simple CRUD calls. `set_priorities` carries no atomicity guarantee — the
//! caller must assume partial application is possible.

use crate::error::Result;
use async_trait::async_trait;
use backboard_core::{AccountId, Category, Item, ItemId, PriorityAssignment};
use serde::{Deserialize, Serialize};

/// Partial update of a persisted item. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl ItemPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the tags
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Apply this patch to an item
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(title) = &self.title {
            item.title = title.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(priority) = self.priority {
            item.priority = priority;
        }
        if let Some(tags) = &self.tags {
            item.tags = tags.clone();
        }
        if let Some(comment_count) = self.comment_count {
            item.comment_count = comment_count;
        }
        if let Some(due_date) = &self.due_date {
            item.due_date = Some(due_date.clone());
        }
        item.touch();
    }
}

/// Per-item outcome of a priority batch write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityWriteResult {
    pub id: ItemId,
    pub ok: bool,
}

/// The external record store consumed by the persistence synchronizer.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items of the account, ordered by priority. An account with no
    /// items yields an empty list, not an error.
    async fn list_items(&self, account: &AccountId) -> Result<Vec<Item>>;

    /// Persist a new item. The store assigns the sequence label (and the id,
    /// when the caller left it empty). Fails on constraint violations such as
    /// an unknown account.
    async fn create_item(&self, item: &Item) -> Result<Item>;

    /// Apply a partial update. `None` when the id is unknown.
    async fn update_item(&self, id: &ItemId, patch: ItemPatch) -> Result<Option<Item>>;

    /// Delete by id. `false` when the id is unknown.
    async fn delete_item(&self, id: &ItemId) -> Result<bool>;

    /// Write a priority batch as independent per-item updates. Partial
    /// application is possible; the per-item results say what landed.
    async fn set_priorities(
        &self,
        updates: &[PriorityAssignment],
    ) -> Result<Vec<PriorityWriteResult>>;
}
