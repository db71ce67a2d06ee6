use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::testing::{account, nft, FakeGenerator, FakeLedger, FakeStore, Harness};
use super::input::Command;
use super::{dispatch, App, Mode, Phase, Stage};
use crate::error::{Field, MintError};
use crate::hedera::LedgerQuery;
use crate::wallet::MockWallet;

#[tokio::test]
async fn pairing_connects_and_preselects_first_collection() {
    let h = Harness::standard();
    h.connect().await;

    let app = h.app.lock().await;
    assert_eq!(app.workflow.phase(), Phase::Idle);
    assert_eq!(app.mode(), Mode::Form);
    assert_eq!(app.account_label(), "0.0.1001");
    let names: Vec<_> = app.collections.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
    assert_eq!(app.selected_collection().map(|c| c.name.as_str()), Some("Alpha"));
    assert_eq!(app.balance_label(), "42.00 ℏ");
}

#[tokio::test]
async fn empty_prompt_never_reaches_the_generator() {
    let h = Harness::standard();
    h.connect().await;

    let err = App::submit_generation(&h.app).await.unwrap_err();
    assert!(matches!(err, MintError::Validation(_)));

    let app = h.app.lock().await;
    assert_eq!(app.workflow.phase(), Phase::Idle);
    assert!(app.form.error_for(Field::Prompt).is_some());
    assert_eq!(h.generator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn generate_then_mint_records_transaction() {
    let h = Harness::standard();
    h.connect().await;
    h.type_prompt("a dragon").await;

    App::submit_generation(&h.app).await.unwrap().await.unwrap();
    {
        let app = h.app.lock().await;
        assert_eq!(app.workflow.phase(), Phase::Previewing);
        let artifact = app.workflow.artifact().unwrap();
        assert_eq!(artifact.name, "image_7.png");
        assert!(artifact.content_id.is_some());
        assert!(artifact.saved_path.is_some());
    }

    App::submit_mint(&h.app).await.unwrap().await.unwrap();
    let app = h.app.lock().await;
    assert_eq!(app.workflow.phase(), Phase::Minted);
    let tx = app.workflow.transaction_id().unwrap();
    assert_eq!(tx.account(), account());
    assert_eq!(h.store.uploads.load(Ordering::SeqCst), 1);
    assert!(app
        .explorer_url()
        .unwrap()
        .starts_with("https://hashscan.io/testnet/transaction/0.0.1001@"));
}

#[tokio::test]
async fn explorer_link_embeds_exact_transaction_id() {
    let h = Harness::new(
        FakeGenerator::succeeding(1),
        FakeStore::new(),
        FakeLedger::with(vec![nft(5, "Gallery", "GAL")]),
        MockWallet::new(account()).with_transaction_id("0.0.123@456.789".parse().unwrap()),
    );
    h.connect().await;
    h.type_prompt("a dragon").await;
    App::submit_generation(&h.app).await.unwrap().await.unwrap();
    App::submit_mint(&h.app).await.unwrap().await.unwrap();

    let app = h.app.lock().await;
    assert_eq!(
        app.explorer_url().as_deref(),
        Some("https://hashscan.io/testnet/transaction/0.0.123@456.789")
    );
}

#[tokio::test]
async fn mint_without_signer_fails_without_transaction_id() {
    let h = Harness::new(
        FakeGenerator::succeeding(1),
        FakeStore::new(),
        FakeLedger::with(vec![nft(5, "Gallery", "GAL")]),
        MockWallet::new(account()).without_signer(),
    );
    h.connect().await;
    h.type_prompt("a dragon").await;
    App::submit_generation(&h.app).await.unwrap().await.unwrap();
    App::submit_mint(&h.app).await.unwrap().await.unwrap();

    let app = h.app.lock().await;
    assert_eq!(app.workflow.phase(), Phase::Failed(Stage::Mint));
    assert!(app.workflow.transaction_id().is_none());
    assert_eq!(
        app.error_message.as_deref(),
        Some("No signer available for account 0.0.1001")
    );
    assert!(app.workflow.artifact().is_some());
}

#[tokio::test]
async fn generation_failure_is_shown_verbatim() {
    let h = Harness::new(
        FakeGenerator::failing("Invalid API key"),
        FakeStore::new(),
        FakeLedger::with(Vec::new()),
        MockWallet::new(account()),
    );
    h.connect().await;
    h.type_prompt("a dragon").await;
    App::submit_generation(&h.app).await.unwrap().await.unwrap();

    let mut app = h.app.lock().await;
    assert_eq!(app.workflow.phase(), Phase::Failed(Stage::Generation));
    assert!(app.workflow.artifact().is_none());
    assert_eq!(app.error_message.as_deref(), Some("Invalid API key"));
    assert_eq!(app.mode(), Mode::Form);

    app.dismiss_error();
    assert_eq!(app.workflow.phase(), Phase::Idle);
    assert!(app.error_message.is_none());
}

#[tokio::test]
async fn upload_is_deferred_to_mint_when_storage_fails_early() {
    let mut store = FakeStore::new();
    store.fail = true;
    let h = Harness::new(
        FakeGenerator::succeeding(3),
        store,
        FakeLedger::with(vec![nft(5, "Gallery", "GAL")]),
        MockWallet::new(account()),
    );
    h.connect().await;
    h.type_prompt("a dragon").await;
    App::submit_generation(&h.app).await.unwrap().await.unwrap();

    let app = h.app.lock().await;
    assert_eq!(app.workflow.phase(), Phase::Previewing);
    assert!(app.workflow.artifact().unwrap().content_id.is_none());
    drop(app);

    App::submit_mint(&h.app).await.unwrap().await.unwrap();
    let app = h.app.lock().await;
    assert_eq!(app.workflow.phase(), Phase::Failed(Stage::Mint));
    assert_eq!(app.error_message.as_deref(), Some("storage offline"));
    assert!(h.wallet.submitted().is_empty());
}

#[tokio::test]
async fn rejected_signature_keeps_the_deferred_upload() {
    let h = Harness::new(
        FakeGenerator::succeeding(3),
        FakeStore::new(),
        FakeLedger::with(vec![nft(5, "Gallery", "GAL")]),
        MockWallet::new(account()).rejecting("User rejected the request"),
    );
    h.app.lock().await.config.storage.upload_on_generate = false;
    h.connect().await;
    h.type_prompt("a dragon").await;
    App::submit_generation(&h.app).await.unwrap().await.unwrap();
    {
        let app = h.app.lock().await;
        assert_eq!(app.workflow.phase(), Phase::Previewing);
        assert!(app.workflow.artifact().unwrap().content_id.is_none());
        assert_eq!(h.store.uploads.load(Ordering::SeqCst), 0);
    }

    App::submit_mint(&h.app).await.unwrap().await.unwrap();
    {
        let app = h.app.lock().await;
        assert_eq!(app.workflow.phase(), Phase::Failed(Stage::Mint));
        assert_eq!(app.error_message.as_deref(), Some("User rejected the request"));
        assert!(app.workflow.transaction_id().is_none());
        let artifact = app.workflow.artifact().unwrap();
        assert_eq!(artifact.content_id.as_ref().map(|c| c.as_str()), Some("bafytest0"));
        assert_eq!(
            artifact.source_url.as_deref(),
            Some("https://nftstorage.link/ipfs/bafytest0/image_3.png")
        );
    }
    assert_eq!(h.store.uploads.load(Ordering::SeqCst), 1);
    assert_eq!(h.wallet.submitted().len(), 1);

    // A retry reuses the stored content instead of uploading again.
    App::submit_mint(&h.app).await.unwrap().await.unwrap();
    assert_eq!(h.app.lock().await.workflow.phase(), Phase::Failed(Stage::Mint));
    assert_eq!(h.store.uploads.load(Ordering::SeqCst), 1);
    assert_eq!(h.wallet.submitted().len(), 2);
}

#[tokio::test]
async fn cancelled_generation_ignores_late_response() {
    let (generator, gate) = FakeGenerator::succeeding(9).gated();
    let h = Harness::new(
        generator,
        FakeStore::new(),
        FakeLedger::with(Vec::new()),
        MockWallet::new(account()),
    );
    h.connect().await;
    h.type_prompt("a dragon").await;

    let handle = App::submit_generation(&h.app).await.unwrap();
    assert_eq!(h.app.lock().await.workflow.phase(), Phase::Generating);
    assert!(matches!(
        App::submit_generation(&h.app).await,
        Err(MintError::Busy)
    ));

    dispatch(&h.app, Command::Cancel).await;
    assert_eq!(h.app.lock().await.workflow.phase(), Phase::Idle);

    gate.notify_one();
    handle.await.unwrap();

    let app = h.app.lock().await;
    assert_eq!(app.workflow.phase(), Phase::Idle);
    assert!(app.workflow.artifact().is_none());
    assert_eq!(
        app.activity_log.last().map(String::as_str),
        Some("Discarded a late generation result")
    );
}

#[tokio::test]
async fn cancel_after_mint_returns_to_idle() {
    let h = Harness::standard();
    h.connect().await;
    h.type_prompt("a dragon").await;
    App::submit_generation(&h.app).await.unwrap().await.unwrap();
    App::submit_mint(&h.app).await.unwrap().await.unwrap();

    dispatch(&h.app, Command::Cancel).await;
    dispatch(&h.app, Command::Cancel).await;

    let app = h.app.lock().await;
    assert_eq!(app.workflow.phase(), Phase::Idle);
    assert!(app.workflow.artifact().is_none());
    assert!(app.workflow.transaction_id().is_none());
    assert_eq!(app.form.prompt, "a dragon");
}

#[tokio::test]
async fn create_collection_selects_the_new_collection() {
    let h = Harness::standard();
    h.connect().await;
    h.type_prompt("a dragon").await;
    App::submit_generation(&h.app).await.unwrap().await.unwrap();

    dispatch(&h.app, Command::OpenCreate).await;
    assert_eq!(h.app.lock().await.mode(), Mode::CreateCollection);

    App::submit_create_collection(&h.app).await.unwrap().await.unwrap();
    h.wait_for(|app| !app.collections_loading).await;

    let app = h.app.lock().await;
    assert!(app.create_dialog.is_none());
    let selected = app.selected_collection().unwrap();
    assert_eq!(selected.symbol, "CMART");
    assert_eq!(selected.id.to_string(), "0.0.9000");
    assert_eq!(app.collections.len(), 3);
    assert_eq!(h.wallet.submitted().len(), 1);
}

#[tokio::test]
async fn create_collection_reuses_existing_symbol() {
    let h = Harness::new(
        FakeGenerator::succeeding(1),
        FakeStore::new(),
        FakeLedger::with(vec![nft(2, "Beta", "BETA"), nft(8, "Zeta Art", "CMART")]),
        MockWallet::new(account()),
    );
    h.connect().await;
    h.type_prompt("a dragon").await;
    App::submit_generation(&h.app).await.unwrap().await.unwrap();

    h.app.lock().await.open_create_dialog().unwrap();
    App::submit_create_collection(&h.app).await.unwrap().await.unwrap();
    h.wait_for(|app| !app.collections_loading).await;

    let app = h.app.lock().await;
    assert_eq!(app.selected_collection().map(|c| c.name.as_str()), Some("Zeta Art"));
    assert!(h.wallet.submitted().is_empty());
}

#[tokio::test]
async fn invalid_collection_fields_stay_in_the_dialog() {
    let h = Harness::standard();
    h.connect().await;
    h.type_prompt("a dragon").await;
    App::submit_generation(&h.app).await.unwrap().await.unwrap();

    {
        let mut app = h.app.lock().await;
        app.open_create_dialog().unwrap();
        let dialog = app.create_dialog.as_mut().unwrap();
        dialog.name.clear();
    }
    dispatch(&h.app, Command::CreateSubmit).await;

    let app = h.app.lock().await;
    let dialog = app.create_dialog.as_ref().unwrap();
    assert!(dialog.error_for(Field::CollectionName).is_some());
    assert!(!app.creating_collection);
    assert_eq!(app.error_message.as_deref(), Some("Collection name is required"));
}

#[tokio::test]
async fn disconnect_returns_to_connect_view() {
    let h = Harness::standard();
    h.connect().await;
    h.type_prompt("a dragon").await;
    App::submit_generation(&h.app).await.unwrap().await.unwrap();

    dispatch(&h.app, Command::Disconnect).await;
    h.wait_for(|app| app.session.is_none()).await;

    let app = h.app.lock().await;
    assert_eq!(app.mode(), Mode::Connect);
    assert!(app.workflow.artifact().is_none());
    assert!(app.collections.is_empty());
    assert!(app.balance.is_none());
}

#[tokio::test]
async fn network_can_only_change_while_disconnected() {
    let h = Harness::standard();
    h.app.lock().await.cycle_network().unwrap();
    assert_eq!(
        h.app.lock().await.network_state.get_current_network(),
        "mainnet"
    );

    // Put the fake ledger back after the network switch rebuilt it.
    let ledger: Arc<dyn LedgerQuery> = h.ledger.clone();
    h.app.lock().await.services.ledger = ledger;
    h.connect().await;
    assert!(matches!(
        h.app.lock().await.cycle_network(),
        Err(MintError::InvalidState(_))
    ));
}

#[tokio::test]
async fn activity_log_is_bounded() {
    let h = Harness::standard();
    let mut app = h.app.lock().await;
    for i in 0..(crate::constants::ACTIVITY_LOG_MAX_LINES + 10) {
        app.log(format!("line {}", i));
    }
    assert_eq!(app.activity_log.len(), crate::constants::ACTIVITY_LOG_MAX_LINES);
    assert_eq!(app.activity_log.first().map(String::as_str), Some("line 10"));
}
