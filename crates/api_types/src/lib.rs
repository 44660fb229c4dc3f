//! Request and response bodies shared between the server and its clients.
//!
//! All JSON fields use camelCase on the wire. Account views never carry
//! the login or voice secrets back to the caller.

use serde::{Deserialize, Deserializer, Serialize};

pub mod account {
    use super::*;

    /// Body of a signup request.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SignupNew {
        pub name: String,
        pub email: String,
        pub phone: String,
        pub password: String,
        pub voice_password: String,
        pub voice_text: String,
        pub savings_balance: Option<i64>,
        pub wallet_balance: Option<i64>,
    }

    /// Account as returned to clients, without any secret.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountView {
        pub id: u64,
        pub name: String,
        pub email: String,
        pub phone: String,
        pub voice_text: String,
        pub savings_balance: i64,
        pub wallet_balance: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountResponse {
        pub message: String,
        pub account: AccountView,
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub phone: String,
        pub password: String,
    }
}

pub mod transfer {
    use super::*;

    /// Body of a transfer request.
    ///
    /// The same body drives both phases: without `confirm` it initiates a
    /// transfer, with `confirm` it resolves the pending one. Clients send
    /// `amount` either as a JSON string or as a number.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransferRequest {
        pub phone: Option<String>,
        pub voice_password: Option<String>,
        #[serde(default, deserialize_with = "option_string_or_number")]
        pub amount: Option<String>,
        pub from_account: Option<String>,
        pub to_account: Option<String>,
        pub confirm: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransferResponse {
        pub message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub account: Option<account::AccountView>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub transaction_id: u64,
        pub phone: String,
        pub amount: i64,
        pub from_account: String,
        pub to_account: String,
        pub timestamp: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionsResponse {
        pub transactions: Vec<TransactionView>,
    }
}

/// Accept a JSON string or number and keep it as a string.
///
/// Validation of the value itself happens server side; this only smooths
/// over clients that send `"amount": 40` instead of `"amount": "40"`.
fn option_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Int(i64),
        Float(f64),
    }

    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|value| match value {
        StringOrNumber::String(s) => s,
        StringOrNumber::Int(n) => n.to_string(),
        StringOrNumber::Float(n) => n.to_string(),
    }))
}
