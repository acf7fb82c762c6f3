//! The backlog item record.

use super::category::Category;
use super::ids::{AccountId, ItemId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of backlog work.
///
/// `priority` is the account-wide sort key: sorting all of an account's items
/// by priority ascending yields the canonical display order. After a completed
/// reconciliation every priority is a zero-based integer matching the item's
/// position in that order; fractional values exist only transiently while a
/// move is being staged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub account: AccountId,
    /// Human-readable label minted from the store's per-account counter
    /// (e.g. `ISSUE-12`). Display only, never part of ordering. Empty until
    /// the store assigns it.
    #[serde(default)]
    pub sequence: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub priority: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Create a new item in the given account. Priority starts at 0; the
    /// order model assigns the real value on insertion.
    pub fn new(account: AccountId, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::new(),
            account,
            sequence: String::new(),
            title: title.into(),
            description: String::new(),
            category: Category::default(),
            priority: 0.0,
            tags: Vec::new(),
            comment_count: 0,
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Set the tags
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// True if this item carries at least one of the given tags.
    /// An empty selection matches nothing.
    pub fn has_any_tag<'a, I>(&self, selected: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        selected
            .into_iter()
            .any(|tag| self.tags.iter().any(|t| t.as_str() == tag))
    }

    /// Refresh the updated timestamp after a field edit.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
