use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{router, run, run_with_listener, spawn_with_listener};
pub use server::ServerState;

mod server;
mod transactions;
mod transfer;
mod user;

pub mod types {
    pub mod account {
        pub use api_types::account::{AccountResponse, AccountView, SignupNew};
    }

    pub mod auth {
        pub use api_types::auth::LoginRequest;
    }

    pub mod transfer {
        pub use api_types::transfer::{TransferRequest, TransferResponse};
    }

    pub mod transaction {
        pub use api_types::transaction::{TransactionView, TransactionsResponse};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::MissingFields(_) | EngineError::NoPendingTransfer(_) => {
            StatusCode::BAD_REQUEST
        }
        EngineError::InsufficientFunds(_)
        | EngineError::InvalidAmount(_)
        | EngineError::InvalidAccountType(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Store(_) | EngineError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Store(_) | EngineError::Io(_) => {
            tracing::error!("store error: {err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
