//! Persistence synchronizer: pushes reconciled state to the store without
//! blocking the interaction loop.
//!
//! The in-memory model mutates first; writes land on an outbox and are
//! flushed asynchronously. A write stays queued until its attempt completes
//! (acknowledged or failed). Failures are logged and dropped — no retry, no
//! rollback — and the local model remains authoritative for the rest of the
//! session. Writes are unconditional overwrites, so concurrent sessions are
//! last-writer-wins. Divergence surfaces through [`Synchronizer::check_consistency`]
//! on the next load.

use crate::error::Result;
use crate::session::Session;
use crate::store::{ItemPatch, ItemStore, PriorityWriteResult};
use backboard_core::{Item, ItemId, OrderModel, PriorityAssignment};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One queued write-through.
#[derive(Debug, Clone)]
pub enum PendingWrite {
    Create(Item),
    Update { id: ItemId, patch: ItemPatch },
    Delete(ItemId),
    Priorities(Vec<PriorityAssignment>),
}

/// What a flush accomplished.
#[derive(Debug, Clone, Default)]
pub struct FlushReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Ids whose writes were not acknowledged by the store (missing targets,
    /// partial priority batch application)
    pub unacknowledged: Vec<ItemId>,
}

impl FlushReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.unacknowledged.is_empty()
    }
}

/// A detected difference between the local model and the persisted store.
#[derive(Debug, Clone, PartialEq)]
pub enum Divergence {
    /// Both sides know the item but disagree on its priority
    PriorityMismatch {
        id: ItemId,
        local: f64,
        remote: f64,
    },
    /// The local model has an item the store does not
    MissingRemotely { id: ItemId },
    /// The store has an item the local model does not
    UnknownLocally { id: ItemId },
}

/// Write-through queue between the order model and the external store.
pub struct Synchronizer<S: ItemStore> {
    store: Arc<S>,
    outbox: Mutex<VecDeque<PendingWrite>>,
}

impl<S: ItemStore> Synchronizer<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            outbox: Mutex::new(VecDeque::new()),
        }
    }

    /// The store behind this synchronizer
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Queue a write. Synchronous and non-blocking: safe to call from the
    /// interaction loop.
    pub fn enqueue(&self, write: PendingWrite) {
        self.lock_outbox().push_back(write);
    }

    /// Writes queued but not yet attempted
    pub fn pending(&self) -> usize {
        self.lock_outbox().len()
    }

    fn lock_outbox(&self) -> std::sync::MutexGuard<'_, VecDeque<PendingWrite>> {
        // The outbox is only ever held for a push/pop; a poisoned lock still
        // holds a structurally valid queue.
        match self.outbox.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Sorted load of the session's account into a fresh order model.
    pub async fn load_account(&self, session: &Session) -> Result<OrderModel> {
        let items = self.store.list_items(session.account()).await?;
        let mut model = OrderModel::new();
        model.load(items);
        Ok(model)
    }

    /// Drain the outbox against the store. Each entry is attempted exactly
    /// once; failures are logged and reported, never retried or rolled back.
    pub async fn flush(&self, session: &Session) -> FlushReport {
        let mut report = FlushReport::default();

        loop {
            let write = match self.lock_outbox().pop_front() {
                Some(write) => write,
                None => break,
            };
            report.attempted += 1;

            match self.dispatch(write).await {
                Ok(unacknowledged) if unacknowledged.is_empty() => report.succeeded += 1,
                Ok(mut unacknowledged) => {
                    tracing::warn!(
                        account = %session.account(),
                        count = unacknowledged.len(),
                        "write acknowledged only partially; store order may be inconsistent \
                         until the next full reload"
                    );
                    report.failed += 1;
                    report.unacknowledged.append(&mut unacknowledged);
                }
                Err(error) => {
                    tracing::warn!(
                        account = %session.account(),
                        %error,
                        "write-through failed; keeping local state authoritative"
                    );
                    report.failed += 1;
                }
            }
        }

        report
    }

    async fn dispatch(&self, write: PendingWrite) -> Result<Vec<ItemId>> {
        match write {
            PendingWrite::Create(item) => {
                self.store.create_item(&item).await?;
                Ok(Vec::new())
            }
            PendingWrite::Update { id, patch } => {
                match self.store.update_item(&id, patch).await? {
                    Some(_) => Ok(Vec::new()),
                    None => {
                        tracing::warn!(item = %id, "update targeted an item the store does not know");
                        Ok(vec![id])
                    }
                }
            }
            PendingWrite::Delete(id) => {
                if !self.store.delete_item(&id).await? {
                    tracing::warn!(item = %id, "delete targeted an item the store does not know");
                }
                Ok(Vec::new())
            }
            PendingWrite::Priorities(batch) => {
                let results = self.store.set_priorities(&batch).await?;
                Ok(results
                    .into_iter()
                    .filter_map(|PriorityWriteResult { id, ok }| (!ok).then_some(id))
                    .collect())
            }
        }
    }

    /// Flush on a background task so the interaction loop never waits on the
    /// network.
    pub fn spawn_flush(self: &Arc<Self>, session: Session) -> tokio::task::JoinHandle<FlushReport>
    where
        S: 'static,
    {
        let sync = Arc::clone(self);
        tokio::spawn(async move { sync.flush(&session).await })
    }

    /// Compare the local model against the persisted store and report every
    /// difference. Divergence is logged, never auto-healed; the local model
    /// stays authoritative.
    pub async fn check_consistency(
        &self,
        session: &Session,
        model: &OrderModel,
    ) -> Result<Vec<Divergence>> {
        let remote = self.store.list_items(session.account()).await?;
        let mut divergences = Vec::new();

        for local in model.sorted_view() {
            match remote.iter().find(|r| r.id == local.id) {
                Some(r) if r.priority != local.priority => {
                    divergences.push(Divergence::PriorityMismatch {
                        id: local.id.clone(),
                        local: local.priority,
                        remote: r.priority,
                    });
                }
                Some(_) => {}
                None => divergences.push(Divergence::MissingRemotely {
                    id: local.id.clone(),
                }),
            }
        }
        for r in &remote {
            if model.get(&r.id).is_none() {
                divergences.push(Divergence::UnknownLocally { id: r.id.clone() });
            }
        }

        if !divergences.is_empty() {
            tracing::warn!(
                account = %session.account(),
                count = divergences.len(),
                "local and persisted order diverge"
            );
        }
        Ok(divergences)
    }
}
