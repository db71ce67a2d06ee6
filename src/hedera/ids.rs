use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::constants::EXPLORER_URL;
use crate::error::MintError;

/// `shard.realm.num`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    pub shard: u64,
    pub realm: u64,
    pub num: u64,
}

impl FromStr for EntityId {
    type Err = MintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MintError::InvalidId(s.to_string());
        let mut parts = s.trim().split('.');
        let mut next = || -> Result<u64, MintError> {
            parts
                .next()
                .filter(|p| !p.is_empty())
                .and_then(|p| p.parse::<u64>().ok())
                .ok_or_else(invalid)
        };
        let id = EntityId {
            shard: next()?,
            realm: next()?,
            num: next()?,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub EntityId);

        impl FromStr for $name {
            type Err = MintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

entity_id!(AccountId);
entity_id!(TokenId);

/// `shard.realm.num@seconds.nanos`, kept exactly as the ledger returned it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionId {
    account: AccountId,
    raw: String,
}

impl TransactionId {
    /// Payer account the transaction was issued for
    pub fn account(&self) -> AccountId {
        self.account
    }

    pub fn explorer_url(&self, network: &str) -> String {
        format!("{}/{}/transaction/{}", EXPLORER_URL, network, self.raw)
    }
}

impl FromStr for TransactionId {
    type Err = MintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MintError::InvalidId(s.to_string());
        let (account, valid_start) = s.trim().split_once('@').ok_or_else(invalid)?;
        let account: AccountId = account.parse().map_err(|_| invalid())?;
        let (secs, nanos) = valid_start.split_once('.').ok_or_else(invalid)?;
        let all_digits = |p: &str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());
        if !all_digits(secs) || !all_digits(nanos) {
            return Err(invalid());
        }
        Ok(TransactionId {
            account,
            raw: s.trim().to_string(),
        })
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for TransactionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_account_ids() {
        let id: AccountId = "0.0.4512".parse().unwrap();
        assert_eq!(id.0.num, 4512);
        assert_eq!(id.to_string(), "0.0.4512");
        assert!("0.0".parse::<AccountId>().is_err());
        assert!("0.0.1.2".parse::<AccountId>().is_err());
        assert!("0.0.x".parse::<AccountId>().is_err());
        assert!("".parse::<TokenId>().is_err());
    }

    #[test]
    fn transaction_id_is_kept_verbatim() {
        let tx: TransactionId = "0.0.123@456.789".parse().unwrap();
        assert_eq!(tx.to_string(), "0.0.123@456.789");
        assert_eq!(tx.account().to_string(), "0.0.123");

        let padded: TransactionId = "0.0.123@1700000000.000000789".parse().unwrap();
        assert_eq!(padded.to_string(), "0.0.123@1700000000.000000789");
    }

    #[test]
    fn explorer_url_embeds_exact_transaction_id() {
        let tx: TransactionId = "0.0.123@456.789".parse().unwrap();
        assert_eq!(
            tx.explorer_url("testnet"),
            "https://hashscan.io/testnet/transaction/0.0.123@456.789"
        );
    }

    #[test]
    fn rejects_malformed_transaction_ids() {
        for raw in ["0.0.123", "0.0.123@456", "0.0.123@.1", "x@1.2", "0.0.1@1.2a"] {
            assert!(raw.parse::<TransactionId>().is_err(), "{} should be rejected", raw);
        }
    }

    #[test]
    fn token_ids_round_trip_through_json() {
        let id: TokenId = serde_json::from_str("\"0.0.77\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"0.0.77\"");
    }
}
