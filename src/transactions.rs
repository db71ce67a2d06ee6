use base64::Engine as _;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    constants::{
        COLLECTION_FIELD_MAX_LEN,
        CREATE_MAX_FEE_HBAR,
        MINT_MAX_FEE_HBAR,
        NFT_METADATA_MAX_BYTES,
    },
    error::{Field, FieldError, MintError, MintResult},
    hedera::{AccountId, Hbar, TokenId, TokenType, TransactionId},
    storage::ContentId,
    wallet::Signer,
};

fn serialize_metadata<S: Serializer>(metadata: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
    let engine = base64::engine::general_purpose::STANDARD;
    serializer.collect_seq(metadata.iter().map(|m| engine.encode(m)))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMintTransaction {
    pub token_id: TokenId,
    #[serde(serialize_with = "serialize_metadata")]
    pub metadata: Vec<Vec<u8>>,
    pub max_transaction_fee: Hbar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupplyType {
    Infinite,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCreateTransaction {
    pub name: String,
    pub symbol: String,
    pub treasury_account_id: AccountId,
    pub token_type: TokenType,
    pub decimals: u32,
    pub initial_supply: u64,
    pub supply_type: SupplyType,
    /// The supply key is the treasury account's own key.
    pub supply_key: AccountId,
    pub max_transaction_fee: Hbar,
}

/// Unsigned transaction handed to the wallet for signing and submission
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Transaction {
    TokenMint(TokenMintTransaction),
    TokenCreate(TokenCreateTransaction),
}

impl Transaction {
    /// Mint one NFT whose metadata points at `ipfs://<cid>/metadata.json`.
    pub fn token_mint(token_id: TokenId, content_id: &ContentId) -> MintResult<Self> {
        let uri = content_id.metadata_uri();
        if uri.len() > NFT_METADATA_MAX_BYTES {
            return Err(MintError::Transaction(format!(
                "NFT metadata is {} bytes, the ledger accepts at most {}",
                uri.len(),
                NFT_METADATA_MAX_BYTES
            )));
        }
        Ok(Transaction::TokenMint(TokenMintTransaction {
            token_id,
            metadata: vec![uri.into_bytes()],
            max_transaction_fee: Hbar::from_hbar(MINT_MAX_FEE_HBAR),
        }))
    }

    /// A new, infinitely-suppliable NFT collection treasured by `treasury`.
    pub fn token_create(name: &str, symbol: &str, treasury: AccountId) -> MintResult<Self> {
        validate_collection(name, symbol)?;
        let name = name.trim();
        let symbol = symbol.trim();

        Ok(Transaction::TokenCreate(TokenCreateTransaction {
            name: name.to_string(),
            symbol: symbol.to_string(),
            treasury_account_id: treasury,
            token_type: TokenType::NonFungibleUnique,
            decimals: 0,
            initial_supply: 0,
            supply_type: SupplyType::Infinite,
            supply_key: treasury,
            max_transaction_fee: Hbar::from_hbar(CREATE_MAX_FEE_HBAR),
        }))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Transaction::TokenMint(_) => "token mint",
            Transaction::TokenCreate(_) => "token create",
        }
    }
}

/// Name and symbol rules for a new collection. All field errors are reported together.
pub fn validate_collection(name: &str, symbol: &str) -> MintResult<()> {
    let mut errors = Vec::new();
    let name = name.trim();
    let symbol = symbol.trim();

    if name.is_empty() {
        errors.push(FieldError::new(Field::CollectionName, "Collection name is required"));
    } else if name.chars().count() > COLLECTION_FIELD_MAX_LEN {
        errors.push(FieldError::new(Field::CollectionName, "Collection name is too long"));
    }
    if symbol.is_empty() {
        errors.push(FieldError::new(Field::CollectionSymbol, "Collection symbol is required"));
    } else if symbol.chars().count() > COLLECTION_FIELD_MAX_LEN {
        errors.push(FieldError::new(Field::CollectionSymbol, "Collection symbol is too long"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(MintError::Validation(errors))
    }
}

/// What the wallet reports once the ledger accepted a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_id: TransactionId,
    pub token_id: Option<TokenId>,
}

/// Handles transaction signing and execution through the connected wallet
pub struct TransactionExecutor {
    signer: Arc<dyn Signer>,
}

impl TransactionExecutor {
    pub fn new(signer: Arc<dyn Signer>) -> Self {
        Self { signer }
    }

    async fn execute(&self, transaction: Transaction) -> MintResult<Receipt> {
        let account = self.signer.account_id();
        info!(%account, kind = transaction.kind(), "submitting transaction");
        match self.signer.execute(&transaction).await {
            Ok(receipt) => {
                info!(transaction_id = %receipt.transaction_id, "transaction accepted");
                Ok(receipt)
            }
            Err(e) => {
                warn!(%account, error = %e, "transaction failed");
                Err(e)
            }
        }
    }

    pub async fn mint_nft(&self, token_id: TokenId, content_id: &ContentId) -> MintResult<TransactionId> {
        let transaction = Transaction::token_mint(token_id, content_id)?;
        Ok(self.execute(transaction).await?.transaction_id)
    }

    pub async fn create_collection(&self, name: &str, symbol: &str) -> MintResult<(TokenId, TransactionId)> {
        let transaction = Transaction::token_create(name, symbol, self.signer.account_id())?;
        let receipt = self.execute(transaction).await?;
        let token_id = receipt.token_id.ok_or_else(|| {
            MintError::Transaction("Receipt did not include the new token id".to_string())
        })?;
        Ok((token_id, receipt.transaction_id))
    }
}
