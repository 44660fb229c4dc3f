//! Transaction primitives.
//!
//! A `Transaction` is the immutable record of one completed transfer. The
//! ledger only ever grows: records are appended and never rewritten.

use serde::{Deserialize, Serialize};

/// One completed transfer, as stored in the ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sequential identifier, strictly increasing across the whole ledger.
    pub transaction_id: u64,
    pub phone: String,
    pub amount: i64,
    pub from_account: String,
    pub to_account: String,
    /// Human-readable creation time, stamped when the transfer completed.
    pub timestamp: String,
}
