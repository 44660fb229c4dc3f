use crate::{Account, Engine, EngineError, NewAccount, ResultEngine, store};

impl Engine {
    /// Create a new account.
    ///
    /// The phone number must not be registered yet; the new id is
    /// `max(existing) + 1` and absent balances default to zero.
    pub async fn create_account(&self, new: NewAccount) -> ResultEngine<Account> {
        new.validate()?;

        let _guard = self.accounts_writer.lock().await;
        let mut accounts: Vec<Account> = self.store.load_all(store::ACCOUNTS);

        if accounts.iter().any(|account| account.phone == new.phone) {
            return Err(EngineError::ExistingKey(new.phone));
        }

        let id = accounts.iter().map(|account| account.id).max().unwrap_or(0) + 1;
        let account = Account {
            id,
            name: new.name,
            email: new.email,
            phone: new.phone,
            password: new.password,
            voice_password: new.voice_password,
            voice_text: new.voice_text,
            savings_balance: new.savings_balance.unwrap_or(0),
            wallet_balance: new.wallet_balance.unwrap_or(0),
        };

        accounts.push(account.clone());
        self.store.save_all(store::ACCOUNTS, &accounts)?;

        tracing::info!(phone = %account.phone, id = account.id, "account created");
        Ok(account)
    }

    /// Return the account matching both phone and password.
    ///
    /// A missing phone and a wrong password are indistinguishable to the
    /// caller on purpose; both come back as the same `Unauthorized` error.
    pub async fn verify_credentials(&self, phone: &str, password: &str) -> ResultEngine<Account> {
        if phone.is_empty() || password.is_empty() {
            return Err(EngineError::MissingFields(String::from("phone, password")));
        }

        self.store
            .load_all::<Account>(store::ACCOUNTS)
            .into_iter()
            .find(|account| {
                account.phone == phone && self.verifier.verify(password, &account.password)
            })
            .ok_or_else(|| {
                EngineError::Unauthorized(String::from("invalid phone number or password"))
            })
    }

    /// Look up an account by its phone number.
    pub fn account_by_phone(&self, phone: &str) -> ResultEngine<Account> {
        self.store
            .load_all::<Account>(store::ACCOUNTS)
            .into_iter()
            .find(|account| account.phone == phone)
            .ok_or_else(|| EngineError::KeyNotFound(phone.to_string()))
    }
}
