//! The single transfer endpoint driving both workflow phases.
//!
//! A request without `confirm` (or with an empty one) initiates a
//! transfer and answers with a confirmation prompt. A request carrying a
//! `confirm` decision resolves the pending transfer for that phone.

use api_types::transfer::{TransferRequest, TransferResponse};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState, user::account_view};
use engine::TransferOutcome;

pub async fn transfer(
    State(state): State<ServerState>,
    Json(payload): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, ServerError> {
    let phone = payload.phone.as_deref().unwrap_or_default();
    if phone.trim().is_empty() {
        return Err(ServerError::Generic("phone number is required".to_string()));
    }

    match payload.confirm.as_deref() {
        None | Some("") => {
            let transfer = state
                .engine
                .initiate_transfer(
                    phone,
                    payload.voice_password.as_deref(),
                    payload.amount.as_deref(),
                    payload.from_account.as_deref(),
                    payload.to_account.as_deref(),
                )
                .await?;

            Ok(Json(TransferResponse {
                message: format!(
                    "Do you confirm transferring {} from {} to {}? Reply with 'yes' or 'no'.",
                    transfer.amount, transfer.from_account, transfer.to_account
                ),
                account: None,
            }))
        }
        Some(confirm) => {
            let outcome = state.engine.resolve_transfer(phone, confirm).await?;

            let response = match outcome {
                TransferOutcome::Completed {
                    account, transfer, ..
                } => TransferResponse {
                    message: format!(
                        "{} transferred from {} to {}",
                        transfer.amount, transfer.from_account, transfer.to_account
                    ),
                    account: Some(account_view(account)),
                },
                TransferOutcome::Cancelled => TransferResponse {
                    message: "transfer cancelled".to_string(),
                    account: None,
                },
            };

            Ok(Json(response))
        }
    }
}
