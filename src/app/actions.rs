//! Workflow actions that call out to the collaborators.
//!
//! Each `submit_*` validates and advances the state machine while holding the
//! app lock, then runs the network calls in a spawned task that re-locks the
//! app to publish the result.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::core::{App, MessageType};
use super::form::CollectionForm;
use super::services::Services;
use super::workflow::{Phase, RequestToken, Stage};
use crate::error::{Field, FieldError, MintError, MintResult};
use crate::generation::{GeneratedArtifact, GenerationRequest};
use crate::hedera::{nft_collections, AccountId, TokenId, TokenRecord, TokenType, TransactionId};
use crate::storage::{ContentId, TokenMetadata};
use crate::transactions::TransactionExecutor;
use crate::utils::shorten_id;

async fn upload_artifact(services: &Services, artifact: &GeneratedArtifact) -> MintResult<ContentId> {
    let metadata = TokenMetadata::for_artifact(artifact);
    let content_id = services
        .store
        .store(&artifact.name, &artifact.image_data, &metadata)
        .await?;
    info!(%content_id, name = %artifact.name, "artwork stored");
    Ok(content_id)
}

/// Render the image, keep a local copy and optionally upload it right away.
/// A failed upload only defers storage to the mint step.
async fn generate_artwork(
    services: &Services,
    request: &GenerationRequest,
    upload: bool,
    output_dir: &Path,
) -> MintResult<GeneratedArtifact> {
    let image = services.generator.generate(request).await?;
    let mut artifact = GeneratedArtifact::new(request.clone(), image);
    artifact.save_to(output_dir);

    if upload {
        match upload_artifact(services, &artifact).await {
            Ok(content_id) => artifact.attach_content(content_id, services.store.gateway()),
            Err(e) => warn!(error = %e, "upload after generation failed, retrying at mint"),
        }
    }
    Ok(artifact)
}

struct MintOutcome {
    uploaded: Option<ContentId>,
    result: MintResult<TransactionId>,
}

async fn mint_artwork(
    services: &Services,
    account: AccountId,
    artifact: &GeneratedArtifact,
    token_id: TokenId,
) -> MintOutcome {
    let Some(signer) = services.wallet.signer(&account) else {
        return MintOutcome {
            uploaded: None,
            result: Err(MintError::NoSigner(account)),
        };
    };

    let (content_id, uploaded) = match &artifact.content_id {
        Some(content_id) => (content_id.clone(), None),
        None => match upload_artifact(services, artifact).await {
            Ok(content_id) => (content_id.clone(), Some(content_id)),
            Err(e) => {
                return MintOutcome {
                    uploaded: None,
                    result: Err(e),
                }
            }
        },
    };

    let result = TransactionExecutor::new(signer)
        .mint_nft(token_id, &content_id)
        .await;
    MintOutcome { uploaded, result }
}

/// Reuse a collection with the same symbol, otherwise create one through the wallet.
async fn create_collection(
    services: &Services,
    account: AccountId,
    name: &str,
    symbol: &str,
) -> MintResult<(TokenRecord, Option<TransactionId>)> {
    let existing = services.ledger.account_tokens(&account).await?;
    if let Some(found) = nft_collections(existing)
        .into_iter()
        .find(|t| t.symbol == symbol)
    {
        info!(token_id = %found.id, symbol, "reusing existing collection");
        return Ok((found, None));
    }

    let signer = services
        .wallet
        .signer(&account)
        .ok_or(MintError::NoSigner(account))?;
    let (token_id, transaction_id) = TransactionExecutor::new(signer)
        .create_collection(name, symbol)
        .await?;

    let record = TokenRecord {
        id: token_id,
        name: name.to_string(),
        symbol: symbol.to_string(),
        token_type: TokenType::NonFungibleUnique,
    };
    Ok((record, Some(transaction_id)))
}

impl App {
    fn connected_account(&self) -> MintResult<AccountId> {
        self.session
            .as_ref()
            .map(|s| s.account_id)
            .ok_or(MintError::NotConnected)
    }

    fn is_session_for(&self, account: AccountId) -> bool {
        self.session.as_ref().map(|s| s.account_id) == Some(account)
    }

    /// Validate the prompt form and start generating in the background.
    pub async fn submit_generation(app: &Arc<Mutex<App>>) -> MintResult<JoinHandle<()>> {
        let (token, request, services, upload, output_dir) = {
            let mut guard = app.lock().await;
            let request = guard.form.to_request()?;
            let token = guard.workflow.begin_generation(request.clone())?;
            guard.clear_error();
            guard.log(format!("Generating artwork for \"{}\"", request.prompt()));
            (
                token,
                request,
                guard.services.clone(),
                guard.config.storage.upload_on_generate,
                guard.config.output_dir.clone(),
            )
        };

        let app = Arc::clone(app);
        Ok(tokio::spawn(async move {
            let result = generate_artwork(&services, &request, upload, &output_dir).await;
            app.lock().await.finish_generation(token, result);
        }))
    }

    fn finish_generation(&mut self, token: RequestToken, result: MintResult<GeneratedArtifact>) {
        let summary = result
            .as_ref()
            .ok()
            .map(|a| (a.name.clone(), a.content_id.clone(), a.saved_path.clone()));

        if !self.workflow.complete_generation(token, result) {
            self.log("Discarded a late generation result");
            return;
        }

        match summary {
            Some((name, content_id, saved_path)) => {
                self.log(format!("Generated {}", name));
                if let Some(path) = saved_path {
                    self.log(format!("Saved to {}", path.display()));
                }
                match content_id {
                    Some(cid) => self.log(format!("Stored on IPFS as {}", shorten_id(cid.as_str()))),
                    None => self.log("Not stored yet, the image is uploaded when minting"),
                }
                self.set_message(
                    MessageType::Success,
                    "Artwork ready. Pick a collection and press M to mint.".to_string(),
                );
            }
            None => {
                let message = self
                    .workflow
                    .last_error()
                    .unwrap_or("Generation failed")
                    .to_string();
                self.log(format!("Generation failed: {}", message));
                self.set_message(MessageType::Error, message);
            }
        }
    }

    /// Mint the current artwork into the selected collection.
    pub async fn submit_mint(app: &Arc<Mutex<App>>) -> MintResult<JoinHandle<()>> {
        let (token, services, account, artifact, collection) = {
            let mut guard = app.lock().await;
            let account = guard.connected_account()?;
            let collection = guard.selected_collection().cloned().ok_or_else(|| {
                MintError::Validation(vec![FieldError::new(
                    Field::Collection,
                    "Select a collection to mint into",
                )])
            })?;
            let artifact = guard.workflow.artifact().cloned();
            let token = guard.workflow.begin_mint()?;
            let Some(artifact) = artifact else {
                return Err(MintError::InvalidState("no artwork is loaded"));
            };
            guard.clear_error();
            guard.log(format!("Minting {} into {}", artifact.name, collection.label()));
            (token, guard.services.clone(), account, artifact, collection)
        };

        let app = Arc::clone(app);
        Ok(tokio::spawn(async move {
            let outcome = mint_artwork(&services, account, &artifact, collection.id).await;
            App::finish_mint(&app, token, collection.id, outcome).await;
        }))
    }

    async fn finish_mint(app: &Arc<Mutex<App>>, token: RequestToken, collection: TokenId, outcome: MintOutcome) {
        let minted = {
            let mut guard = app.lock().await;
            if let Some(cid) = outcome.uploaded {
                let gateway = guard.services.store.gateway().to_string();
                if guard.workflow.record_content(token, cid.clone(), &gateway) {
                    guard.log(format!("Stored on IPFS as {}", shorten_id(cid.as_str())));
                }
            }

            if !guard.workflow.complete_mint(token, outcome.result) {
                guard.log("Discarded a late mint result");
                return;
            }

            match guard.workflow.transaction_id().cloned() {
                Some(transaction_id) => {
                    info!(%transaction_id, payer = %transaction_id.account(), token_id = %collection, "nft minted");
                    guard.log(format!("Minted in transaction {}", transaction_id));
                    if let Some(url) = guard.explorer_url() {
                        guard.log(url);
                    }
                    guard.set_message(
                        MessageType::Success,
                        format!("Minted! Transaction {}", transaction_id),
                    );
                    true
                }
                None => {
                    let message = guard.workflow.last_error().unwrap_or("Mint failed").to_string();
                    guard.log(format!("Mint failed: {}", message));
                    guard.set_message(MessageType::Error, message);
                    false
                }
            }
        };

        if minted {
            App::load_collections(app, Some(collection)).await;
            App::refresh_balance(app).await;
        }
    }

    /// Fetch the account's NFT collections, selecting `preselect` when present.
    pub async fn load_collections(app: &Arc<Mutex<App>>, preselect: Option<TokenId>) -> Option<JoinHandle<()>> {
        let (account, ledger) = {
            let mut guard = app.lock().await;
            let account = guard.session.as_ref()?.account_id;
            guard.collections_loading = true;
            (account, Arc::clone(&guard.services.ledger))
        };

        let app = Arc::clone(app);
        Some(tokio::spawn(async move {
            let result = ledger.account_tokens(&account).await;
            let mut guard = app.lock().await;
            if !guard.is_session_for(account) {
                return;
            }
            guard.collections_loading = false;
            match result {
                Ok(tokens) => {
                    guard.set_collections(tokens, preselect);
                    let count = guard.collections.len();
                    guard.log(format!("Loaded {} NFT collection(s)", count));
                }
                Err(e) => {
                    warn!(error = %e, "failed to load collections");
                    guard.log(format!("Could not load collections: {}", e));
                    guard.set_message(MessageType::Error, e.to_string());
                }
            }
        }))
    }

    pub async fn refresh_balance(app: &Arc<Mutex<App>>) -> Option<JoinHandle<()>> {
        let (account, ledger) = {
            let mut guard = app.lock().await;
            let account = guard.session.as_ref()?.account_id;
            guard.last_balance_refresh = Some(Instant::now());
            (account, Arc::clone(&guard.services.ledger))
        };

        let app = Arc::clone(app);
        Some(tokio::spawn(async move {
            let result = ledger.account_balance(&account).await;
            let mut guard = app.lock().await;
            if !guard.is_session_for(account) {
                return;
            }
            match result {
                Ok(balance) => guard.balance = Some(balance),
                Err(e) => {
                    warn!(error = %e, "failed to refresh balance");
                    guard.log(format!("Could not refresh balance: {}", e));
                }
            }
        }))
    }

    pub fn open_create_dialog(&mut self) -> MintResult<()> {
        match self.workflow.phase() {
            Phase::Previewing | Phase::Failed(Stage::Mint) => {}
            Phase::Disconnected => return Err(MintError::NotConnected),
            _ => return Err(MintError::InvalidState("no artwork is ready to mint")),
        }
        if self.creating_collection {
            return Err(MintError::Busy);
        }
        self.create_dialog = Some(CollectionForm::new(
            &self.config.collection.default_name,
            &self.config.collection.default_symbol,
        ));
        Ok(())
    }

    pub async fn submit_create_collection(app: &Arc<Mutex<App>>) -> MintResult<JoinHandle<()>> {
        let (services, account, name, symbol) = {
            let mut guard = app.lock().await;
            if guard.creating_collection {
                return Err(MintError::Busy);
            }
            let account = guard.connected_account()?;
            let dialog = guard
                .create_dialog
                .as_mut()
                .ok_or(MintError::InvalidState("the create dialog is closed"))?;
            let (name, symbol) = dialog.validate()?;
            guard.creating_collection = true;
            guard.clear_error();
            guard.log(format!("Creating collection {} ({})", name, symbol));
            (guard.services.clone(), account, name, symbol)
        };

        let app = Arc::clone(app);
        Ok(tokio::spawn(async move {
            let result = create_collection(&services, account, &name, &symbol).await;
            App::finish_create_collection(&app, account, result).await;
        }))
    }

    async fn finish_create_collection(
        app: &Arc<Mutex<App>>,
        account: AccountId,
        result: MintResult<(TokenRecord, Option<TransactionId>)>,
    ) {
        let created = {
            let mut guard = app.lock().await;
            guard.creating_collection = false;
            if !guard.is_session_for(account) {
                return;
            }

            match result {
                Ok((record, transaction_id)) => {
                    match &transaction_id {
                        Some(tx) => guard.log(format!("Created collection {} in transaction {}", record.id, tx)),
                        None => guard.log(format!("Reusing collection {} with symbol {}", record.id, record.symbol)),
                    }
                    guard.create_dialog = None;

                    let mut collections = guard.collections.clone();
                    if !collections.iter().any(|t| t.id == record.id) {
                        collections.push(record.clone());
                    }
                    guard.set_collections(collections, Some(record.id));
                    guard.set_message(
                        MessageType::Success,
                        format!("Collection {} ready", record.label()),
                    );
                    Some(record.id)
                }
                Err(e) => {
                    guard.log(format!("Collection creation failed: {}", e));
                    guard.set_message(MessageType::Error, e.to_string());
                    None
                }
            }
        };

        if let Some(id) = created {
            App::load_collections(app, Some(id)).await;
        }
    }

    /// Ask the wallet to pair. The result arrives as wallet events.
    pub async fn pair_wallet(app: &Arc<Mutex<App>>) -> MintResult<()> {
        let wallet = {
            let mut guard = app.lock().await;
            if guard.session.is_some() {
                return Ok(());
            }
            let network = guard.network_state.get_current_network();
            guard.log(format!("Requesting wallet pairing on {}", network.to_uppercase()));
            Arc::clone(&guard.services.wallet)
        };

        let app = Arc::clone(app);
        tokio::spawn(async move {
            if let Err(e) = wallet.open_pairing().await {
                warn!(error = %e, "pairing failed");
                let mut guard = app.lock().await;
                guard.log(format!("Pairing failed: {}", e));
                guard.set_message(MessageType::Error, e.to_string());
            }
        });
        Ok(())
    }

    pub async fn disconnect_wallet(app: &Arc<Mutex<App>>) -> MintResult<()> {
        let wallet = {
            let mut guard = app.lock().await;
            if guard.session.is_none() {
                return Ok(());
            }
            guard.log("Disconnecting wallet");
            Arc::clone(&guard.services.wallet)
        };

        let app = Arc::clone(app);
        tokio::spawn(async move {
            if let Err(e) = wallet.disconnect().await {
                warn!(error = %e, "wallet disconnect failed, dropping the session locally");
                app.lock().await.on_disconnect(Some(e.to_string()));
            }
        });
        Ok(())
    }

    pub fn cancel_workflow(&mut self) -> MintResult<()> {
        let phase = self.workflow.phase();
        self.workflow.cancel()?;
        self.form.clear_errors();
        self.clear_error();
        match phase {
            Phase::Generating => self.log("Generation cancelled, a late result will be ignored"),
            Phase::Minted => self.log("Mint acknowledged"),
            Phase::Previewing | Phase::Failed(_) => self.log("Artwork discarded"),
            _ => {}
        }
        Ok(())
    }

    pub fn dismiss_error(&mut self) {
        self.workflow.dismiss_error();
        self.form.clear_errors();
        self.clear_error();
    }
}
