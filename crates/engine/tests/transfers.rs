use std::path::PathBuf;

use engine::{Engine, EngineError, NewAccount, TransferOutcome};
use uuid::Uuid;

fn test_data_dir() -> PathBuf {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_data");
    std::fs::create_dir_all(&root).unwrap();
    root.join(Uuid::new_v4().to_string())
}

fn test_engine() -> (Engine, PathBuf) {
    let data_dir = test_data_dir();
    let engine = Engine::builder().data_dir(&data_dir).build().unwrap();
    (engine, data_dir)
}

fn new_account(phone: &str, savings: i64, wallet: i64) -> NewAccount {
    NewAccount {
        name: String::from("Asha Rao"),
        email: format!("{phone}@example.com"),
        phone: phone.to_string(),
        password: String::from("secret"),
        voice_password: String::from("open sesame"),
        voice_text: String::from("my voice is my password"),
        savings_balance: Some(savings),
        wallet_balance: Some(wallet),
    }
}

async fn initiate(engine: &Engine, phone: &str, amount: &str) {
    engine
        .initiate_transfer(
            phone,
            Some("open sesame"),
            Some(amount),
            Some("savings"),
            Some("wallet"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn duplicate_phone_is_rejected() {
    let (engine, _) = test_engine();

    let first = engine
        .create_account(new_account("9999999999", 100, 0))
        .await
        .unwrap();
    assert_eq!(first.id, 1);

    let err = engine
        .create_account(new_account("9999999999", 50, 0))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ExistingKey(String::from("9999999999")));

    // The rejected attempt did not grow the collection.
    let second = engine
        .create_account(new_account("8888888888", 0, 0))
        .await
        .unwrap();
    assert_eq!(second.id, 2);
}

#[tokio::test]
async fn missing_balances_default_to_zero() {
    let (engine, _) = test_engine();

    let mut new = new_account("9999999999", 0, 0);
    new.savings_balance = None;
    new.wallet_balance = None;

    let account = engine.create_account(new).await.unwrap();
    assert_eq!(account.savings_balance, 0);
    assert_eq!(account.wallet_balance, 0);
}

#[tokio::test]
async fn login_is_exact_match_only() {
    let (engine, _) = test_engine();
    engine
        .create_account(new_account("9999999999", 100, 0))
        .await
        .unwrap();

    let account = engine
        .verify_credentials("9999999999", "secret")
        .await
        .unwrap();
    assert_eq!(account.phone, "9999999999");

    // Wrong password and unknown phone are indistinguishable.
    let wrong_password = engine
        .verify_credentials("9999999999", "Secret")
        .await
        .unwrap_err();
    let unknown_phone = engine
        .verify_credentials("0000000000", "secret")
        .await
        .unwrap_err();
    assert_eq!(wrong_password, unknown_phone);
    assert!(matches!(wrong_password, EngineError::Unauthorized(_)));
}

#[tokio::test]
async fn confirmed_transfer_moves_between_balances() {
    let (engine, _) = test_engine();
    engine
        .create_account(new_account("9999999999", 100, 0))
        .await
        .unwrap();

    initiate(&engine, "9999999999", "40").await;
    assert!(engine.pending_for("9999999999").is_some());

    let outcome = engine.resolve_transfer("9999999999", "yes").await.unwrap();
    let TransferOutcome::Completed {
        account,
        transfer,
        transaction,
    } = outcome
    else {
        panic!("expected a completed transfer");
    };

    assert_eq!(account.savings_balance, 60);
    assert_eq!(account.wallet_balance, 40);
    assert_eq!(transfer.amount, 40);
    assert_eq!(transaction.transaction_id, 1);

    let history = engine.transactions_for("9999999999");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].amount, 40);
    assert_eq!(history[0].from_account, "savings");
    assert_eq!(history[0].to_account, "wallet");

    // The pending slot was consumed; confirming again has nothing to apply.
    let err = engine
        .resolve_transfer("9999999999", "yes")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NoPendingTransfer(String::from("9999999999")));
}

#[tokio::test]
async fn wallet_to_savings_direction() {
    let (engine, _) = test_engine();
    engine
        .create_account(new_account("9999999999", 0, 100))
        .await
        .unwrap();

    engine
        .initiate_transfer(
            "9999999999",
            Some("open sesame"),
            Some("40"),
            Some("wallet"),
            Some("savings"),
        )
        .await
        .unwrap();
    let outcome = engine.resolve_transfer("9999999999", "YES").await.unwrap();

    let TransferOutcome::Completed { account, .. } = outcome else {
        panic!("expected a completed transfer");
    };
    assert_eq!(account.savings_balance, 40);
    assert_eq!(account.wallet_balance, 60);
}

#[tokio::test]
async fn insufficient_funds_keeps_the_pending_entry() {
    let (engine, _) = test_engine();
    engine
        .create_account(new_account("9999999999", 100, 0))
        .await
        .unwrap();

    initiate(&engine, "9999999999", "1000").await;
    let err = engine
        .resolve_transfer("9999999999", "yes")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds(_)));

    // Balances untouched, intent still parked.
    let account = engine.account_by_phone("9999999999").unwrap();
    assert_eq!(account.savings_balance, 100);
    assert_eq!(account.wallet_balance, 0);
    assert!(engine.pending_for("9999999999").is_some());
    assert!(engine.transactions_for("9999999999").is_empty());

    // An explicit cancel clears it.
    let outcome = engine.resolve_transfer("9999999999", "no").await.unwrap();
    assert_eq!(outcome, TransferOutcome::Cancelled);
    assert!(engine.pending_for("9999999999").is_none());
}

#[tokio::test]
async fn cancellation_never_touches_balances() {
    let (engine, _) = test_engine();
    engine
        .create_account(new_account("9999999999", 100, 0))
        .await
        .unwrap();

    initiate(&engine, "9999999999", "40").await;

    // Anything but "yes" cancels, garbled input included.
    let outcome = engine
        .resolve_transfer("9999999999", "maybe later")
        .await
        .unwrap();
    assert_eq!(outcome, TransferOutcome::Cancelled);
    assert!(engine.pending_for("9999999999").is_none());

    let account = engine.account_by_phone("9999999999").unwrap();
    assert_eq!(account.savings_balance, 100);
    assert_eq!(account.wallet_balance, 0);

    // Cancelling with nothing pending is still a cancellation, not an error.
    let outcome = engine.resolve_transfer("9999999999", "no").await.unwrap();
    assert_eq!(outcome, TransferOutcome::Cancelled);
}

#[tokio::test]
async fn second_initiation_overwrites_the_first() {
    let (engine, _) = test_engine();
    engine
        .create_account(new_account("9999999999", 100, 0))
        .await
        .unwrap();

    initiate(&engine, "9999999999", "40").await;
    initiate(&engine, "9999999999", "25").await;

    let pending = engine.pending_for("9999999999").unwrap();
    assert_eq!(pending.amount, 25);

    let outcome = engine.resolve_transfer("9999999999", "yes").await.unwrap();
    let TransferOutcome::Completed { account, .. } = outcome else {
        panic!("expected a completed transfer");
    };
    assert_eq!(account.savings_balance, 75);
    assert_eq!(account.wallet_balance, 25);
}

#[tokio::test]
async fn transaction_ids_increase_across_the_whole_ledger() {
    let (engine, _) = test_engine();
    engine
        .create_account(new_account("1111111111", 100, 0))
        .await
        .unwrap();
    engine
        .create_account(new_account("2222222222", 100, 0))
        .await
        .unwrap();

    initiate(&engine, "1111111111", "10").await;
    engine.resolve_transfer("1111111111", "yes").await.unwrap();
    initiate(&engine, "2222222222", "20").await;
    engine.resolve_transfer("2222222222", "yes").await.unwrap();
    initiate(&engine, "1111111111", "30").await;
    engine.resolve_transfer("1111111111", "yes").await.unwrap();

    let first = engine.transactions_for("1111111111");
    let second = engine.transactions_for("2222222222");
    assert_eq!(
        first.iter().map(|t| t.transaction_id).collect::<Vec<_>>(),
        vec![1, 3]
    );
    assert_eq!(second[0].transaction_id, 2);
}

#[tokio::test]
async fn initiation_validates_the_request() {
    let (engine, _) = test_engine();
    engine
        .create_account(new_account("9999999999", 100, 0))
        .await
        .unwrap();

    let err = engine
        .initiate_transfer("0000000000", Some("open sesame"), Some("40"), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let err = engine
        .initiate_transfer("9999999999", Some("open sesame"), None, Some("savings"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::MissingFields(_)));

    let err = engine
        .initiate_transfer(
            "9999999999",
            Some("wrong words"),
            Some("40"),
            Some("savings"),
            Some("wallet"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Unauthorized(_)));

    for amount in ["0", "-5", "forty", "4.5"] {
        let err = engine
            .initiate_transfer(
                "9999999999",
                Some("open sesame"),
                Some(amount),
                Some("savings"),
                Some("wallet"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)), "{amount}");
    }

    // Nothing was parked by any of the rejected attempts.
    assert!(engine.pending_for("9999999999").is_none());
}

#[tokio::test]
async fn unknown_account_kind_fails_at_apply_time() {
    let (engine, _) = test_engine();
    engine
        .create_account(new_account("9999999999", 100, 0))
        .await
        .unwrap();

    // The kind is checked when the transfer is applied, not when parked.
    engine
        .initiate_transfer(
            "9999999999",
            Some("open sesame"),
            Some("40"),
            Some("checking"),
            Some("wallet"),
        )
        .await
        .unwrap();

    let err = engine
        .resolve_transfer("9999999999", "yes")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::InvalidAccountType(String::from("checking")));
    assert!(engine.pending_for("9999999999").is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn racing_confirmations_apply_exactly_once() {
    let (engine, _) = test_engine();
    engine
        .create_account(new_account("9999999999", 100, 0))
        .await
        .unwrap();
    initiate(&engine, "9999999999", "40").await;

    let engine = std::sync::Arc::new(engine);
    let barrier = std::sync::Arc::new(std::sync::Barrier::new(2));
    let handle = tokio::runtime::Handle::current();

    let threads: Vec<_> = (0..2)
        .map(|_| {
            let engine = std::sync::Arc::clone(&engine);
            let barrier = std::sync::Arc::clone(&barrier);
            let handle = handle.clone();
            std::thread::spawn(move || {
                barrier.wait();
                handle.block_on(engine.resolve_transfer("9999999999", "yes"))
            })
        })
        .collect();

    let results: Vec<_> = threads
        .into_iter()
        .map(|thread| thread.join().unwrap())
        .collect();

    // One confirmation wins, the other finds the slot already consumed.
    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
    assert!(results.iter().any(|result| {
        matches!(result, Err(EngineError::NoPendingTransfer(_)))
    }));

    let account = engine.account_by_phone("9999999999").unwrap();
    assert_eq!(account.savings_balance, 60);
    assert_eq!(account.wallet_balance, 40);
    assert_eq!(engine.transactions_for("9999999999").len(), 1);
}

#[tokio::test]
async fn accounts_survive_a_restart_but_pending_transfers_do_not() {
    let (engine, data_dir) = test_engine();
    engine
        .create_account(new_account("9999999999", 100, 0))
        .await
        .unwrap();
    initiate(&engine, "9999999999", "40").await;
    drop(engine);

    let engine = Engine::builder().data_dir(&data_dir).build().unwrap();
    let account = engine.account_by_phone("9999999999").unwrap();
    assert_eq!(account.savings_balance, 100);
    assert!(engine.pending_for("9999999999").is_none());

    let err = engine
        .resolve_transfer("9999999999", "yes")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NoPendingTransfer(String::from("9999999999")));
}
