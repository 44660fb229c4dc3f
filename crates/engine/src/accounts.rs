//! The module contains the `Account` struct and its implementation.

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Account kind the funds are drawn from.
pub const SAVINGS: &str = "savings";
/// Account kind the funds land in when drawn from savings.
pub const WALLET: &str = "wallet";

/// A user account.
///
/// An account carries a user's identity, the secrets used for login and
/// voice authorization, and the two balances transfers move money between.
/// The phone number is the natural key; at most one account exists per
/// phone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Sequential identifier, assigned as `max(existing) + 1` at creation.
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub voice_password: String,
    pub voice_text: String,
    pub savings_balance: i64,
    pub wallet_balance: i64,
}

impl Account {
    /// Move `amount` between the two balances, driven by the source side:
    /// drawing from savings credits the wallet and vice versa.
    ///
    /// Balances never go negative; a source balance below `amount` leaves
    /// the account untouched.
    pub fn apply_transfer(&mut self, from_account: &str, amount: i64) -> ResultEngine<()> {
        match from_account {
            SAVINGS => {
                if self.savings_balance < amount {
                    return Err(EngineError::InsufficientFunds(self.phone.clone()));
                }
                let wallet = self
                    .wallet_balance
                    .checked_add(amount)
                    .ok_or_else(|| EngineError::InvalidAmount(amount.to_string()))?;
                self.savings_balance -= amount;
                self.wallet_balance = wallet;
            }
            WALLET => {
                if self.wallet_balance < amount {
                    return Err(EngineError::InsufficientFunds(self.phone.clone()));
                }
                let savings = self
                    .savings_balance
                    .checked_add(amount)
                    .ok_or_else(|| EngineError::InvalidAmount(amount.to_string()))?;
                self.wallet_balance -= amount;
                self.savings_balance = savings;
            }
            other => return Err(EngineError::InvalidAccountType(other.to_string())),
        }

        Ok(())
    }
}

/// Fields required to create an [`Account`].
#[derive(Clone, Debug)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub voice_password: String,
    pub voice_text: String,
    pub savings_balance: Option<i64>,
    pub wallet_balance: Option<i64>,
}

impl NewAccount {
    pub(crate) fn validate(&self) -> ResultEngine<()> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("password", &self.password),
            ("voicePassword", &self.voice_password),
            ("voiceText", &self.voice_text),
        ];

        let missing: Vec<&str> = required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| label)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(EngineError::MissingFields(missing.join(", ")))
        }
    }
}
