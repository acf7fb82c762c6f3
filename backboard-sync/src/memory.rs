//! In-memory implementation of the store contract.
//!
//! Backs tests and offline sessions. Behaves like the remote store the
//! synchronizer expects: per-account item sets, a monotonic sequence counter
//! for `ISSUE-<n>` labels, and deliberately non-atomic priority batches — a
//! fault-injection knob can fail individual priority writes to exercise
//! partial application.

use crate::error::{Result, StoreError};
use crate::store::{ItemPatch, ItemStore, PriorityWriteResult};
use async_trait::async_trait;
use backboard_core::{AccountId, Item, ItemId, PriorityAssignment};
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct AccountState {
    items: HashMap<ItemId, Item>,
    next_seq: u64,
}

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<AccountId, AccountState>,
    failing_priority_ids: HashSet<ItemId>,
}

/// In-memory record store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account (creates on unknown accounts fail otherwise)
    pub async fn add_account(&self, account: AccountId) {
        let mut state = self.state.lock().await;
        state.accounts.entry(account).or_default();
    }

    /// Make subsequent priority writes for these ids fail, without failing
    /// the rest of the batch.
    pub async fn fail_priority_writes_for(&self, ids: impl IntoIterator<Item = ItemId>) {
        let mut state = self.state.lock().await;
        state.failing_priority_ids.extend(ids);
    }

    /// Clear fault injection
    pub async fn heal(&self) {
        let mut state = self.state.lock().await;
        state.failing_priority_ids.clear();
    }
}

#[async_trait]
impl ItemStore for InMemoryStore {
    async fn list_items(&self, account: &AccountId) -> Result<Vec<Item>> {
        let state = self.state.lock().await;
        let mut items: Vec<Item> = state
            .accounts
            .get(account)
            .map(|a| a.items.values().cloned().collect())
            .unwrap_or_default();
        // Ordered by priority; ties broken by id so the order never depends
        // on map iteration.
        items.sort_by(|a, b| {
            a.priority
                .total_cmp(&b.priority)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(items)
    }

    async fn create_item(&self, item: &Item) -> Result<Item> {
        let mut state = self.state.lock().await;
        let account = state.accounts.get_mut(&item.account).ok_or_else(|| {
            StoreError::AccountNotFound {
                id: item.account.to_string(),
            }
        })?;

        let mut stored = item.clone();
        if stored.id.as_str().is_empty() {
            stored.id = ItemId::new();
        }
        if account.items.contains_key(&stored.id) {
            return Err(StoreError::constraint(format!(
                "duplicate item id: {}",
                stored.id
            )));
        }
        if stored.sequence.is_empty() {
            account.next_seq += 1;
            stored.sequence = format!("ISSUE-{}", account.next_seq);
        }
        account.items.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn update_item(&self, id: &ItemId, patch: ItemPatch) -> Result<Option<Item>> {
        let mut state = self.state.lock().await;
        for account in state.accounts.values_mut() {
            if let Some(item) = account.items.get_mut(id) {
                patch.apply_to(item);
                return Ok(Some(item.clone()));
            }
        }
        Ok(None)
    }

    async fn delete_item(&self, id: &ItemId) -> Result<bool> {
        let mut state = self.state.lock().await;
        for account in state.accounts.values_mut() {
            if account.items.remove(id).is_some() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn set_priorities(
        &self,
        updates: &[PriorityAssignment],
    ) -> Result<Vec<PriorityWriteResult>> {
        let mut state = self.state.lock().await;
        let mut results = Vec::with_capacity(updates.len());
        for update in updates {
            if state.failing_priority_ids.contains(&update.id) {
                results.push(PriorityWriteResult {
                    id: update.id.clone(),
                    ok: false,
                });
                continue;
            }
            let mut applied = false;
            for account in state.accounts.values_mut() {
                if let Some(item) = account.items.get_mut(&update.id) {
                    item.priority = update.priority;
                    applied = true;
                    break;
                }
            }
            results.push(PriorityWriteResult {
                id: update.id.clone(),
                ok: applied,
            });
        }
        Ok(results)
    }
}
