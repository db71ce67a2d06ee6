use serde::{Deserialize, Serialize};
use std::fmt;

use super::TokenId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    FungibleCommon,
    NonFungibleUnique,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TokenType::FungibleCommon => "FUNGIBLE_COMMON",
            TokenType::NonFungibleUnique => "NON_FUNGIBLE_UNIQUE",
            TokenType::Unknown => "UNKNOWN",
        };
        write!(f, "{}", label)
    }
}

/// A token held by the connected account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub id: TokenId,
    pub name: String,
    pub symbol: String,
    pub token_type: TokenType,
}

impl TokenRecord {
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }
}

/// Keep only NFT collections, ordered by name.
///
/// The sort is stable, so equal names stay in response order.
pub fn nft_collections(tokens: Vec<TokenRecord>) -> Vec<TokenRecord> {
    let mut collections: Vec<TokenRecord> = tokens
        .into_iter()
        .filter(|token| token.token_type == TokenType::NonFungibleUnique)
        .collect();
    collections.sort_by(|a, b| a.name.cmp(&b.name));
    collections
}
