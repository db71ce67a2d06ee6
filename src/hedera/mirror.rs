use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::{AccountId, Hbar, TokenId, TokenRecord, TokenType};
use crate::constants::{HTTP_TIMEOUT_SECS, MIRROR_PAGE_LIMIT};
use crate::error::{MintError, MintResult};

/// Read-only view of the ledger for the connected account.
#[async_trait]
pub trait LedgerQuery: Send + Sync {
    /// Every token associated with the account, in response order.
    async fn account_tokens(&self, account: &AccountId) -> MintResult<Vec<TokenRecord>>;

    async fn account_balance(&self, account: &AccountId) -> MintResult<Hbar>;
}

#[derive(Debug, Deserialize)]
struct AccountTokensPage {
    #[serde(default)]
    tokens: Vec<AccountTokenEntry>,
    links: Option<Links>,
}

#[derive(Debug, Deserialize)]
struct AccountTokenEntry {
    token_id: TokenId,
}

#[derive(Debug, Deserialize)]
struct Links {
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenInfoResponse {
    token_id: TokenId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    symbol: String,
    #[serde(rename = "type")]
    token_type: TokenType,
}

#[derive(Debug, Deserialize)]
struct AccountInfoResponse {
    balance: BalanceEntry,
}

#[derive(Debug, Deserialize)]
struct BalanceEntry {
    balance: u64,
}

#[derive(Debug, Deserialize)]
struct MirrorErrorBody {
    #[serde(rename = "_status")]
    status: MirrorStatus,
}

#[derive(Debug, Deserialize)]
struct MirrorStatus {
    #[serde(default)]
    messages: Vec<MirrorMessage>,
}

#[derive(Debug, Deserialize)]
struct MirrorMessage {
    message: String,
}

/// Hedera mirror node REST client
pub struct MirrorNodeClient {
    client: Client,
    base_url: String,
}

impl MirrorNodeClient {
    pub fn new(base_url: &str) -> MintResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> MintResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "mirror node request");
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<MirrorErrorBody>(&body)
                .ok()
                .and_then(|b| b.status.messages.into_iter().next())
                .map(|m| m.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Mirror node request failed")
                        .to_string()
                });
            return Err(MintError::Ledger(message));
        }

        Ok(response.json::<T>().await?)
    }

    async fn token_info(&self, token_id: TokenId) -> MintResult<TokenRecord> {
        let info: TokenInfoResponse = self.get(&format!("/api/v1/tokens/{}", token_id)).await?;
        Ok(TokenRecord {
            id: info.token_id,
            name: info.name,
            symbol: info.symbol,
            token_type: info.token_type,
        })
    }
}

#[async_trait]
impl LedgerQuery for MirrorNodeClient {
    async fn account_tokens(&self, account: &AccountId) -> MintResult<Vec<TokenRecord>> {
        let mut token_ids = Vec::new();
        let mut next = Some(format!(
            "/api/v1/accounts/{}/tokens?limit={}",
            account, MIRROR_PAGE_LIMIT
        ));

        while let Some(path) = next.take() {
            let page: AccountTokensPage = self.get(&path).await?;
            token_ids.extend(page.tokens.into_iter().map(|t| t.token_id));
            next = page.links.and_then(|l| l.next).filter(|n| !n.is_empty());
        }

        let tokens = try_join_all(token_ids.into_iter().map(|id| self.token_info(id))).await?;
        info!(account = %account, count = tokens.len(), "loaded account tokens");
        Ok(tokens)
    }

    async fn account_balance(&self, account: &AccountId) -> MintResult<Hbar> {
        let info: AccountInfoResponse = self.get(&format!("/api/v1/accounts/{}", account)).await?;
        Ok(Hbar::from_tinybars(info.balance.balance))
    }
}
