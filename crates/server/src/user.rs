//! Signup and login handlers.

use api_types::account::{AccountResponse, AccountView, SignupNew};
use api_types::auth::LoginRequest;
use axum::{Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState};
use engine::NewAccount;

/// Strip the secrets off an account before it goes back over the wire.
pub(crate) fn account_view(account: engine::Account) -> AccountView {
    AccountView {
        id: account.id,
        name: account.name,
        email: account.email,
        phone: account.phone,
        voice_text: account.voice_text,
        savings_balance: account.savings_balance,
        wallet_balance: account.wallet_balance,
    }
}

pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<SignupNew>,
) -> Result<(StatusCode, Json<AccountResponse>), ServerError> {
    let account = state
        .engine
        .create_account(NewAccount {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            password: payload.password,
            voice_password: payload.voice_password,
            voice_text: payload.voice_text,
            savings_balance: payload.savings_balance,
            wallet_balance: payload.wallet_balance,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse {
            message: "account created".to_string(),
            account: account_view(account),
        }),
    ))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AccountResponse>, ServerError> {
    let account = state
        .engine
        .verify_credentials(&payload.phone, &payload.password)
        .await?;

    Ok(Json(AccountResponse {
        message: "login successful".to_string(),
        account: account_view(account),
    }))
}
