//! JSON import/export boundary.
//!
//! File handling lives outside the engine; this module consumes and produces
//! JSON text. Import is forgiving by design: missing fields are defaulted,
//! never rejected. Malformed JSON is still an error.

use crate::error::Result;
use crate::model::OrderModel;
use crate::reconcile::{reindex, PriorityAssignment};
use crate::types::{AccountId, Category, Item, ItemId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Export payload: all items in canonical order plus the account's current
/// focus text.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Export<'a> {
    items: Vec<&'a Item>,
    current_focus_text: &'a str,
}

/// Serialize the full model for export.
pub fn export_json(model: &OrderModel, current_focus_text: &str) -> Result<String> {
    let export = Export {
        items: model.sorted_view().collect(),
        current_focus_text,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

/// A partial item record as it appears in import JSON. Every field may be
/// absent; defaults follow the import contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    /// Foreign id. Known ids act as upsert keys; unknown or absent ids create
    /// new items with freshly minted ids.
    #[serde(default)]
    pub id: Option<ItemId>,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub comment_count: u32,
    /// Absent priority appends the item after everything already in the model.
    #[serde(default)]
    pub priority: Option<f64>,
    #[serde(default)]
    pub due_date: Option<String>,
}

fn default_title() -> String {
    "Untitled Issue".to_string()
}

/// What an import did.
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    /// Priority batch from the post-import reindex, for the synchronizer.
    pub assignments: Vec<PriorityAssignment>,
}

/// Import a JSON array (or a single object, normalized to a one-element
/// array) of partial item records. New items are appended after existing
/// ones, then the whole model is reindexed to integrate them.
pub fn import_json(
    model: &mut OrderModel,
    account: &AccountId,
    json: &str,
) -> Result<ImportSummary> {
    let value: Value = serde_json::from_str(json)?;
    let normalized = match value {
        Value::Array(_) => value,
        other => Value::Array(vec![other]),
    };
    let records: Vec<ImportRecord> = serde_json::from_value(normalized)?;

    let mut summary = ImportSummary::default();
    // Items without an explicit priority land after everything currently
    // known, in record order.
    let mut next_append = model
        .items()
        .iter()
        .map(|i| i.priority)
        .fold(None::<f64>, |max, p| {
            Some(max.map_or(p, |m| if p > m { p } else { m }))
        })
        .map_or(0.0, |max| max + 1.0);

    for record in records {
        let known = record
            .id
            .as_ref()
            .and_then(|id| model.get(id))
            .is_some();

        if known {
            let id = record.id.as_ref().cloned().unwrap_or_default();
            if let Some(existing) = model.get_mut(&id) {
                existing.title = record.title;
                existing.description = record.description;
                existing.category = record.category;
                existing.tags = record.tags;
                existing.comment_count = record.comment_count;
                existing.due_date = record.due_date;
                if let Some(priority) = record.priority {
                    existing.priority = priority;
                }
                existing.touch();
            }
            summary.updated += 1;
        } else {
            let mut item = Item::new(account.clone(), record.title);
            item.description = record.description;
            item.category = record.category;
            item.tags = record.tags;
            item.comment_count = record.comment_count;
            item.due_date = record.due_date;
            item.created_at = Utc::now();
            item.updated_at = item.created_at;
            item.priority = match record.priority {
                Some(priority) => priority,
                None => {
                    let p = next_append;
                    next_append += 1.0;
                    p
                }
            };
            model.items_mut().push(item);
            summary.created += 1;
        }
    }

    summary.assignments = reindex(model);
    Ok(summary)
}
