//! The module contains the error the engine can throw.
//!
//! Most variants map one-to-one onto a request outcome: a lookup miss is
//! [`KeyNotFound`], a duplicate phone number is [`ExistingKey`], a source
//! balance below the requested amount is [`InsufficientFunds`].
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`InsufficientFunds`]: EngineError::InsufficientFunds
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid account type: {0}")]
    InvalidAccountType(String),
    #[error("Missing fields: {0}")]
    MissingFields(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("No pending transfer for \"{0}\"")]
    NoPendingTransfer(String),
    #[error(transparent)]
    Store(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InsufficientFunds(a), Self::InsufficientFunds(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidAccountType(a), Self::InvalidAccountType(b)) => a == b,
            (Self::MissingFields(a), Self::MissingFields(b)) => a == b,
            (Self::Unauthorized(a), Self::Unauthorized(b)) => a == b,
            (Self::NoPendingTransfer(a), Self::NoPendingTransfer(b)) => a == b,
            (Self::Store(a), Self::Store(b)) => a.to_string() == b.to_string(),
            (Self::Io(a), Self::Io(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
