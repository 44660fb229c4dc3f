use chrono::Utc;

use crate::{Engine, PendingTransfer, ResultEngine, Transaction, store};

impl Engine {
    /// Append one completed transfer to the ledger.
    pub(crate) async fn append_transaction(
        &self,
        phone: &str,
        transfer: &PendingTransfer,
    ) -> ResultEngine<Transaction> {
        let _guard = self.ledger_writer.lock().await;
        let mut transactions: Vec<Transaction> = self.store.load_all(store::TRANSACTIONS);

        let transaction_id = transactions
            .iter()
            .map(|transaction| transaction.transaction_id)
            .max()
            .unwrap_or(0)
            + 1;
        let transaction = Transaction {
            transaction_id,
            phone: phone.to_string(),
            amount: transfer.amount,
            from_account: transfer.from_account.clone(),
            to_account: transfer.to_account.clone(),
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        };

        transactions.push(transaction.clone());
        self.store.save_all(store::TRANSACTIONS, &transactions)?;
        Ok(transaction)
    }

    /// List the completed transfers for one phone, in insertion order.
    pub fn transactions_for(&self, phone: &str) -> Vec<Transaction> {
        self.store
            .load_all::<Transaction>(store::TRANSACTIONS)
            .into_iter()
            .filter(|transaction| transaction.phone == phone)
            .collect()
    }
}
