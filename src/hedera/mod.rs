mod hbar;
mod ids;
mod mirror;
mod token;

pub use hbar::Hbar;
pub use ids::{AccountId, EntityId, TokenId, TransactionId};
pub use mirror::{LedgerQuery, MirrorNodeClient};
pub use token::{nft_collections, TokenRecord, TokenType};
