//! In-memory table of transfers awaiting confirmation.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// An uncommitted transfer intent awaiting an explicit confirmation.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingTransfer {
    pub amount: i64,
    pub from_account: String,
    pub to_account: String,
}

/// Single-slot pending transfers, keyed by phone number.
///
/// The table lives for the lifetime of the process and is never persisted:
/// a restart drops every unconfirmed transfer. Each phone holds at most one
/// entry; initiating again overwrites the previous intent.
#[derive(Debug, Default)]
pub struct PendingTransfers {
    entries: Mutex<HashMap<String, PendingTransfer>>,
}

impl PendingTransfers {
    fn entries(&self) -> MutexGuard<'_, HashMap<String, PendingTransfer>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `transfer` for `phone`, returning any intent it replaced.
    pub fn put(&self, phone: &str, transfer: PendingTransfer) -> Option<PendingTransfer> {
        self.entries().insert(phone.to_string(), transfer)
    }

    pub fn get(&self, phone: &str) -> Option<PendingTransfer> {
        self.entries().get(phone).cloned()
    }

    pub fn remove(&self, phone: &str) -> Option<PendingTransfer> {
        self.entries().remove(phone)
    }
}
