//! In-memory collaborators for driving the app without a network.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use tokio::sync::{Mutex, Notify};

use super::core::App;
use super::services::Services;
use crate::config::Config;
use crate::error::{MintError, MintResult};
use crate::generation::{GenerationRequest, ImageGenerator, RenderedImage};
use crate::hedera::{AccountId, Hbar, LedgerQuery, TokenRecord, TokenType};
use crate::storage::{ContentId, ContentStore, TokenMetadata};
use crate::wallet::{MockWallet, WalletConnector};

pub struct FakeGenerator {
    pub result: StdMutex<MintResult<RenderedImage>>,
    pub gate: Option<Arc<Notify>>,
    pub calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn succeeding(seed: u64) -> Self {
        Self {
            result: StdMutex::new(Ok(RenderedImage {
                seed,
                png: vec![0x89, 0x50, 0x4E, 0x47],
            })),
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: StdMutex::new(Err(MintError::Generation(message.to_string()))),
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Hold every response until the returned handle is notified.
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }
}

#[async_trait]
impl ImageGenerator for FakeGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> MintResult<RenderedImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &*self.result.lock().unwrap() {
            Ok(image) => Ok(image.clone()),
            Err(e) => Err(MintError::Generation(e.to_string())),
        }
    }
}

pub struct FakeStore {
    pub uploads: AtomicUsize,
    pub fail: bool,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            uploads: AtomicUsize::new(0),
            fail: false,
        }
    }
}

#[async_trait]
impl ContentStore for FakeStore {
    async fn store(&self, _file_name: &str, _image: &[u8], _metadata: &TokenMetadata) -> MintResult<ContentId> {
        if self.fail {
            return Err(MintError::Storage("storage offline".to_string()));
        }
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        ContentId::new(&format!("bafytest{}", n))
    }

    fn gateway(&self) -> &str {
        "nftstorage.link"
    }
}

pub struct FakeLedger {
    pub tokens: StdMutex<Vec<TokenRecord>>,
}

impl FakeLedger {
    pub fn with(tokens: Vec<TokenRecord>) -> Self {
        Self {
            tokens: StdMutex::new(tokens),
        }
    }
}

#[async_trait]
impl LedgerQuery for FakeLedger {
    async fn account_tokens(&self, _account: &AccountId) -> MintResult<Vec<TokenRecord>> {
        Ok(self.tokens.lock().unwrap().clone())
    }

    async fn account_balance(&self, _account: &AccountId) -> MintResult<Hbar> {
        Ok(Hbar::from_hbar(42))
    }
}

pub fn nft(num: u64, name: &str, symbol: &str) -> TokenRecord {
    TokenRecord {
        id: format!("0.0.{}", num).parse().unwrap(),
        name: name.to_string(),
        symbol: symbol.to_string(),
        token_type: TokenType::NonFungibleUnique,
    }
}

pub fn account() -> AccountId {
    "0.0.1001".parse().unwrap()
}

pub struct Harness {
    pub app: Arc<Mutex<App>>,
    pub generator: Arc<FakeGenerator>,
    pub store: Arc<FakeStore>,
    pub ledger: Arc<FakeLedger>,
    pub wallet: MockWallet,
    _output: tempfile::TempDir,
}

impl Harness {
    pub fn new(generator: FakeGenerator, store: FakeStore, ledger: FakeLedger, wallet: MockWallet) -> Self {
        let output = tempfile::tempdir().unwrap();
        let mut config = Config::resolve(Vec::new(), |_| None).unwrap();
        config.output_dir = output.path().to_path_buf();

        let generator = Arc::new(generator);
        let store = Arc::new(store);
        let ledger = Arc::new(ledger);
        let services = Services {
            generator: generator.clone(),
            store: store.clone(),
            ledger: ledger.clone(),
            wallet: Arc::new(wallet.clone()),
        };

        Self {
            app: Arc::new(Mutex::new(App::new(config, services))),
            generator,
            store,
            ledger,
            wallet,
            _output: output,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            FakeGenerator::succeeding(7),
            FakeStore::new(),
            FakeLedger::with(vec![nft(2, "Beta", "BETA"), nft(1, "Alpha", "ALPHA")]),
            MockWallet::new(account()),
        )
    }

    /// Pair through the wallet's event channels and wait until collections load.
    pub async fn connect(&self) {
        let events = self.wallet.init().await.unwrap();
        super::spawn_wallet_listener(Arc::clone(&self.app), events);
        App::pair_wallet(&self.app).await.unwrap();
        self.wait_for(|app| app.session.is_some() && !app.collections_loading && app.balance.is_some())
            .await;
    }

    pub async fn wait_for<F>(&self, condition: F)
    where
        F: Fn(&App) -> bool,
    {
        for _ in 0..400 {
            if condition(&*self.app.lock().await) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not reached");
    }

    pub async fn type_prompt(&self, prompt: &str) {
        let mut app = self.app.lock().await;
        for c in prompt.chars() {
            app.form.insert_char(c);
        }
    }
}
