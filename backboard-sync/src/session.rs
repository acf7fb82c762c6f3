//! Session context: the account a synchronizer call operates on.
//!
//! The active account is an explicit value threaded into every call, never
//! ambient state readable from anywhere.

use backboard_core::AccountId;

/// One account session. Cheap to clone; carries identity, not logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    account: AccountId,
}

impl Session {
    /// Create a session for the given account
    pub fn new(account: AccountId) -> Self {
        Self { account }
    }

    /// The account this session operates on
    pub fn account(&self) -> &AccountId {
        &self.account
    }
}
