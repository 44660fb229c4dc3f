use std::path::PathBuf;

use tokio::sync::Mutex;

pub use accounts::{Account, NewAccount, SAVINGS, WALLET};
pub use credentials::{CredentialVerifier, PlaintextVerifier};
pub use error::EngineError;
pub use ops::TransferOutcome;
pub use pending::{PendingTransfer, PendingTransfers};
pub use store::Store;
pub use transactions::Transaction;

mod accounts;
mod credentials;
mod error;
mod ops;
mod pending;
pub mod store;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;

/// The ledger engine.
///
/// Owns the record store, the pending-transfer table and the credential
/// verifier, and exposes every domain operation the server routes to. All
/// methods take `&self`; writers are serialized internally (see the field
/// docs), so the engine is shared behind an `Arc` without outer locking.
pub struct Engine {
    store: Store,
    pending: PendingTransfers,
    verifier: Box<dyn CredentialVerifier>,
    /// Single-writer gate for the accounts collection. Every
    /// read-modify-write on accounts runs under this lock so concurrent
    /// confirmations cannot double-apply a balance change.
    accounts_writer: Mutex<()>,
    /// Single-writer gate for the transaction ledger.
    ledger_writer: Mutex<()>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    data_dir: Option<PathBuf>,
    verifier: Option<Box<dyn CredentialVerifier>>,
    pending: Option<PendingTransfers>,
}

impl EngineBuilder {
    /// Pass the required data directory backing the record store.
    pub fn data_dir(mut self, data_dir: impl Into<PathBuf>) -> EngineBuilder {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Replace the default plaintext credential verifier.
    pub fn verifier(mut self, verifier: Box<dyn CredentialVerifier>) -> EngineBuilder {
        self.verifier = Some(verifier);
        self
    }

    /// Provide a pending-transfer table, pre-populated or shared for tests.
    pub fn pending(mut self, pending: PendingTransfers) -> EngineBuilder {
        self.pending = Some(pending);
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> ResultEngine<Engine> {
        let data_dir = self
            .data_dir
            .ok_or_else(|| EngineError::MissingFields(String::from("data_dir")))?;

        Ok(Engine {
            store: Store::new(data_dir),
            pending: self.pending.unwrap_or_default(),
            verifier: self
                .verifier
                .unwrap_or_else(|| Box::new(PlaintextVerifier)),
            accounts_writer: Mutex::new(()),
            ledger_writer: Mutex::new(()),
        })
    }
}
