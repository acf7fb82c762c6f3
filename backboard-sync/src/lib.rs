//! Persistence boundary for the Backboard backlog tracker
//!
//! The ordering engine (`backboard-core`) mutates its in-memory model
//! synchronously; this crate gets those mutations to the external record
//! store without ever blocking the interaction loop.
//!
//! - [`ItemStore`] — the storage collaborator contract: simple CRUD plus a
//!   non-atomic priority batch write
//! - [`Synchronizer`] — an explicit outbox: mutations enqueue, a background
//!   flush writes through, failures are logged and the local model stays
//!   authoritative
//! - [`Session`] — the active account as an explicit value threaded into
//!   every call
//! - [`InMemoryStore`] — a full contract implementation for tests and
//!   offline use
//!
//! ## Basic Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use backboard_core::{AccountId, Item};
//! use backboard_sync::{InMemoryStore, PendingWrite, Session, Synchronizer};
//!
//! # async fn example() {
//! let account = AccountId::from_string("me");
//! let store = Arc::new(InMemoryStore::new());
//! store.add_account(account.clone()).await;
//!
//! let sync = Arc::new(Synchronizer::new(store));
//! let session = Session::new(account.clone());
//!
//! // Optimistic: the model already changed; the write goes on the outbox.
//! sync.enqueue(PendingWrite::Create(Item::new(account, "New issue")));
//! let report = sync.flush(&session).await;
//! assert!(report.is_clean());
//! # }
//! ```

mod error;
mod memory;
mod session;
mod store;
mod sync;

pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use session::Session;
pub use store::{ItemPatch, ItemStore, PriorityWriteResult};
pub use sync::{Divergence, FlushReport, PendingWrite, Synchronizer};
