//! Wallet bridge client.
//!
//! The bridge is a small local service that holds the WalletConnect session
//! with the user's wallet app. Pairing and signing requests are forwarded to the
//! wallet and block until the user answers there.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, warn};

use super::{ConnectionStatus, EventSenders, Signer, WalletConnector, WalletEvents};
use crate::constants::HTTP_TIMEOUT_SECS;
use crate::error::{MintError, MintResult};
use crate::hedera::{AccountId, TokenId, TransactionId};
use crate::transactions::{Receipt, Transaction};

const SIGNER_UNAVAILABLE: &str = "signer_unavailable";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PairingResponse {
    #[serde(default)]
    account_ids: Vec<AccountId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRequest<'a> {
    account_id: AccountId,
    transaction: &'a Transaction,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionResponse {
    transaction_id: TransactionId,
    token_id: Option<TokenId>,
}

#[derive(Debug, Deserialize)]
struct BridgeError {
    error: Option<String>,
    message: Option<String>,
}

async fn error_message(response: reqwest::Response) -> (StatusCode, Option<String>, String) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let parsed = serde_json::from_str::<BridgeError>(&body).ok();
    let code = parsed.as_ref().and_then(|b| b.error.clone());
    let message = parsed
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Wallet bridge error").to_string());
    (status, code, message)
}

struct BridgeInner {
    client: Client,
    base_url: String,
    senders: EventSenders,
    events: Mutex<Option<WalletEvents>>,
    accounts: Mutex<Vec<AccountId>>,
}

#[derive(Clone)]
pub struct BridgeWallet {
    inner: Arc<BridgeInner>,
}

impl BridgeWallet {
    pub fn new(base_url: &str) -> MintResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        let (senders, events) = EventSenders::channel();
        Ok(Self {
            inner: Arc::new(BridgeInner {
                client,
                base_url: base_url.trim_end_matches('/').to_string(),
                senders,
                events: Mutex::new(Some(events)),
                accounts: Mutex::new(Vec::new()),
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    fn set_accounts(&self, accounts: Vec<AccountId>) {
        if let Ok(mut guard) = self.inner.accounts.lock() {
            *guard = accounts;
        }
    }

    async fn announce(&self, accounts: Vec<AccountId>) {
        self.set_accounts(accounts.clone());
        self.inner.senders.status(ConnectionStatus::Connected).await;
        self.inner.senders.paired(accounts).await;
    }
}

#[async_trait]
impl WalletConnector for BridgeWallet {
    async fn init(&self) -> MintResult<WalletEvents> {
        let events = self
            .inner
            .events
            .lock()
            .ok()
            .and_then(|mut guard| guard.take())
            .ok_or_else(|| MintError::Wallet("Wallet bridge already initialised".to_string()))?;

        // Resume a pairing the bridge still holds from an earlier run.
        match self.inner.client.get(self.url("/pairing")).send().await {
            Ok(response) if response.status().is_success() => {
                let pairing: PairingResponse = response.json().await?;
                if !pairing.account_ids.is_empty() {
                    info!(accounts = pairing.account_ids.len(), "resuming wallet pairing");
                    self.announce(pairing.account_ids).await;
                }
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "wallet bridge not reachable"),
        }

        Ok(events)
    }

    async fn open_pairing(&self) -> MintResult<()> {
        self.inner.senders.status(ConnectionStatus::Connecting).await;

        let response = match self.inner.client.post(self.url("/pairing")).send().await {
            Ok(response) => response,
            Err(e) => {
                self.inner.senders.status(ConnectionStatus::Disconnected).await;
                return Err(MintError::Wallet(format!("Wallet bridge not reachable: {}", e)));
            }
        };

        if !response.status().is_success() {
            let (_, _, message) = error_message(response).await;
            self.inner.senders.status(ConnectionStatus::Disconnected).await;
            return Err(MintError::Wallet(message));
        }

        let pairing: PairingResponse = response.json().await?;
        if pairing.account_ids.is_empty() {
            self.inner.senders.status(ConnectionStatus::Disconnected).await;
            return Err(MintError::Wallet("Wallet returned no accounts".to_string()));
        }
        info!(account = %pairing.account_ids[0], "wallet paired");
        self.announce(pairing.account_ids).await;
        Ok(())
    }

    async fn disconnect(&self) -> MintResult<()> {
        let result = self.inner.client.delete(self.url("/pairing")).send().await;
        self.set_accounts(Vec::new());
        self.inner.senders.status(ConnectionStatus::Disconnected).await;
        self.inner.senders.disconnected(None).await;
        if let Err(e) = result {
            warn!(error = %e, "wallet bridge did not acknowledge disconnect");
        }
        Ok(())
    }

    fn signer(&self, account: &AccountId) -> Option<Arc<dyn Signer>> {
        let paired = self
            .inner
            .accounts
            .lock()
            .map(|accounts| accounts.contains(account))
            .unwrap_or(false);
        if !paired {
            return None;
        }
        Some(Arc::new(BridgeSigner {
            wallet: self.clone(),
            account: *account,
        }))
    }
}

pub struct BridgeSigner {
    wallet: BridgeWallet,
    account: AccountId,
}

#[async_trait]
impl Signer for BridgeSigner {
    fn account_id(&self) -> AccountId {
        self.account
    }

    async fn execute(&self, transaction: &Transaction) -> MintResult<Receipt> {
        let body = TransactionRequest {
            account_id: self.account,
            transaction,
        };
        let response = self
            .wallet
            .inner
            .client
            .post(self.wallet.url("/transactions"))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let (status, code, message) = error_message(response).await;
            if code.as_deref() == Some(SIGNER_UNAVAILABLE)
                || matches!(status, StatusCode::NOT_FOUND)
            {
                return Err(MintError::NoSigner(self.account));
            }
            return Err(MintError::Transaction(message));
        }

        let receipt: TransactionResponse = response.json().await?;
        Ok(Receipt {
            transaction_id: receipt.transaction_id,
            token_id: receipt.token_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ContentId;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn mint() -> Transaction {
        Transaction::token_mint("0.0.700".parse().unwrap(), &ContentId::new("bafy").unwrap()).unwrap()
    }

    #[tokio::test]
    async fn pairing_emits_status_and_accounts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pairing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/pairing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accountIds": ["0.0.123", "0.0.456"]
            })))
            .mount(&server)
            .await;

        let wallet = BridgeWallet::new(&server.uri()).unwrap();
        let mut events = wallet.init().await.unwrap();
        wallet.open_pairing().await.unwrap();

        assert_eq!(events.status.recv().await, Some(ConnectionStatus::Connecting));
        assert_eq!(events.status.recv().await, Some(ConnectionStatus::Connected));
        let pairing = events.pairing.recv().await.unwrap();
        assert_eq!(pairing.account_ids.len(), 2);

        assert!(wallet.signer(&"0.0.123".parse().unwrap()).is_some());
        assert!(wallet.signer(&"0.0.999".parse().unwrap()).is_none());
        assert!(wallet.init().await.is_err());
    }

    #[tokio::test]
    async fn signer_posts_transaction_and_reads_receipt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pairing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accountIds": ["0.0.123"]})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/transactions"))
            .and(body_partial_json(json!({
                "accountId": "0.0.123",
                "transaction": {"type": "tokenMint", "tokenId": "0.0.700"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transactionId": "0.0.123@456.789"
            })))
            .mount(&server)
            .await;

        let wallet = BridgeWallet::new(&server.uri()).unwrap();
        let _events = wallet.init().await.unwrap();
        let signer = wallet.signer(&"0.0.123".parse().unwrap()).unwrap();
        let receipt = signer.execute(&mint()).await.unwrap();
        assert_eq!(receipt.transaction_id.to_string(), "0.0.123@456.789");
        assert_eq!(receipt.token_id, None);
    }

    #[tokio::test]
    async fn unavailable_signer_maps_to_no_signer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pairing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accountIds": ["0.0.123"]})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/transactions"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "error": "signer_unavailable",
                "message": "No signer for account"
            })))
            .mount(&server)
            .await;

        let wallet = BridgeWallet::new(&server.uri()).unwrap();
        let _events = wallet.init().await.unwrap();
        let signer = wallet.signer(&"0.0.123".parse().unwrap()).unwrap();
        let err = signer.execute(&mint()).await.unwrap_err();
        assert!(matches!(err, MintError::NoSigner(_)));
    }

    #[tokio::test]
    async fn rejected_transaction_keeps_wallet_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pairing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accountIds": ["0.0.123"]})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/transactions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "rejected",
                "message": "User rejected the request"
            })))
            .mount(&server)
            .await;

        let wallet = BridgeWallet::new(&server.uri()).unwrap();
        let _events = wallet.init().await.unwrap();
        let signer = wallet.signer(&"0.0.123".parse().unwrap()).unwrap();
        let err = signer.execute(&mint()).await.unwrap_err();
        assert_eq!(err.to_string(), "User rejected the request");
    }

    #[tokio::test]
    async fn disconnect_clears_accounts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pairing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accountIds": ["0.0.123"]})))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/pairing"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let wallet = BridgeWallet::new(&server.uri()).unwrap();
        let mut events = wallet.init().await.unwrap();
        wallet.disconnect().await.unwrap();

        assert!(events.disconnect.recv().await.is_some());
        assert!(wallet.signer(&"0.0.123".parse().unwrap()).is_none());
    }
}
