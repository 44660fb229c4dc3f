//! Transaction history handler.

use api_types::transaction::{TransactionView, TransactionsResponse};
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{ServerError, server::ServerState};

/// List the transactions recorded for a phone, oldest first.
///
/// A phone with no history, registered or not, gets an empty list.
pub async fn list(
    State(state): State<ServerState>,
    Path(phone): Path<String>,
) -> Result<Json<TransactionsResponse>, ServerError> {
    if phone.trim().is_empty() {
        return Err(ServerError::Generic("phone number is required".to_string()));
    }

    let transactions = state
        .engine
        .transactions_for(&phone)
        .into_iter()
        .map(|transaction| TransactionView {
            transaction_id: transaction.transaction_id,
            phone: transaction.phone,
            amount: transaction.amount,
            from_account: transaction.from_account,
            to_account: transaction.to_account,
            timestamp: transaction.timestamp,
        })
        .collect();

    Ok(Json(TransactionsResponse { transactions }))
}
