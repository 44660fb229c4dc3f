//! The two-phase transfer workflow.
//!
//! Per phone the workflow loops through two states: no pending transfer,
//! then one pending confirmation, then back. Initiation validates the
//! request and parks the intent in the pending table; resolution either
//! applies it against the account balances and the ledger, or discards it.

use crate::{Account, Engine, EngineError, PendingTransfer, ResultEngine, Transaction, store};

/// The affirmative confirmation token, compared case-insensitively.
const CONFIRM_TOKEN: &str = "yes";

/// Result of resolving a pending transfer.
#[derive(Clone, Debug, PartialEq)]
pub enum TransferOutcome {
    /// The transfer was applied: balances moved and a ledger record exists.
    Completed {
        account: Account,
        transfer: PendingTransfer,
        transaction: Transaction,
    },
    /// The pending intent (if any) was discarded without touching balances.
    Cancelled,
}

impl Engine {
    /// Validate a transfer request and park it for confirmation.
    ///
    /// Nothing moves yet: the caller must come back with an explicit
    /// confirmation decision. A previous unconfirmed intent for the same
    /// phone is silently replaced.
    pub async fn initiate_transfer(
        &self,
        phone: &str,
        voice_password: Option<&str>,
        amount: Option<&str>,
        from_account: Option<&str>,
        to_account: Option<&str>,
    ) -> ResultEngine<PendingTransfer> {
        let account = self.account_by_phone(phone)?;

        let fields = [voice_password, amount, from_account, to_account];
        if fields.iter().any(|field| field.is_none_or(str::is_empty)) {
            return Err(EngineError::MissingFields(String::from(
                "voicePassword, amount, fromAccount, toAccount",
            )));
        }
        let (voice_password, amount, from_account, to_account) = (
            voice_password.unwrap_or_default(),
            amount.unwrap_or_default(),
            from_account.unwrap_or_default(),
            to_account.unwrap_or_default(),
        );

        if !self.verifier.verify(voice_password, &account.voice_password) {
            return Err(EngineError::Unauthorized(String::from(
                "incorrect voice password",
            )));
        }

        let amount: i64 = amount
            .trim()
            .parse()
            .map_err(|_| EngineError::InvalidAmount(amount.to_string()))?;
        if amount <= 0 {
            return Err(EngineError::InvalidAmount(amount.to_string()));
        }

        let transfer = PendingTransfer {
            amount,
            from_account: from_account.to_string(),
            to_account: to_account.to_string(),
        };
        if self.pending.put(phone, transfer.clone()).is_some() {
            tracing::info!(phone, "replacing unconfirmed transfer");
        }

        tracing::info!(
            phone,
            amount,
            from = %transfer.from_account,
            to = %transfer.to_account,
            "transfer initiated"
        );
        Ok(transfer)
    }

    /// Resolve the pending transfer for `phone` with a confirmation
    /// decision.
    ///
    /// Only a case-insensitive `"yes"` confirms. Any other decision
    /// discards whatever is pending and reports [`TransferOutcome::Cancelled`],
    /// even when nothing was pending at all. A confirmation that fails on
    /// funds keeps the intent parked so the caller may retry or cancel
    /// explicitly.
    pub async fn resolve_transfer(
        &self,
        phone: &str,
        confirm: &str,
    ) -> ResultEngine<TransferOutcome> {
        // Unknown phones fail the same way on both phases.
        self.account_by_phone(phone)?;

        if !confirm.trim().eq_ignore_ascii_case(CONFIRM_TOKEN) {
            if self.pending.remove(phone).is_some() {
                tracing::info!(phone, "transfer cancelled");
            }
            return Ok(TransferOutcome::Cancelled);
        }

        // The pending entry is consumed under the accounts lock, so of two
        // racing confirmations exactly one applies; the other finds the
        // slot empty. A failed apply parks the intent again.
        let (account, transfer) = {
            let _guard = self.accounts_writer.lock().await;
            let transfer = self
                .pending
                .remove(phone)
                .ok_or_else(|| EngineError::NoPendingTransfer(phone.to_string()))?;

            let mut accounts: Vec<Account> = self.store.load_all(store::ACCOUNTS);
            let Some(position) = accounts.iter().position(|account| account.phone == phone)
            else {
                self.pending.put(phone, transfer);
                return Err(EngineError::KeyNotFound(phone.to_string()));
            };

            if let Err(err) =
                accounts[position].apply_transfer(&transfer.from_account, transfer.amount)
            {
                self.pending.put(phone, transfer);
                return Err(err);
            }
            if let Err(err) = self.store.save_all(store::ACCOUNTS, &accounts) {
                self.pending.put(phone, transfer);
                return Err(err);
            }
            (accounts.swap_remove(position), transfer)
        };

        let transaction = self.append_transaction(phone, &transfer).await?;

        tracing::info!(
            phone,
            amount = transfer.amount,
            from = %transfer.from_account,
            to = %transfer.to_account,
            "transfer completed"
        );
        Ok(TransferOutcome::Completed {
            account,
            transfer,
            transaction,
        })
    }

    /// Return the unconfirmed transfer parked for `phone`, if any.
    pub fn pending_for(&self, phone: &str) -> Option<PendingTransfer> {
        self.pending.get(phone)
    }
}
