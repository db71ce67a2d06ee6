use std::fmt;

use super::PairingEvent;
use crate::hedera::AccountId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConnectionStatus::Disconnected => "DISCONNECTED",
            ConnectionStatus::Connecting => "CONNECTING",
            ConnectionStatus::Connected => "CONNECTED",
        };
        f.write_str(label)
    }
}

/// The paired account for the lifetime of one connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSession {
    pub account_id: AccountId,
    pub status: ConnectionStatus,
}

impl WalletSession {
    /// Only the first account of a pairing is used.
    pub fn from_pairing(event: &PairingEvent) -> Option<Self> {
        event.account_ids.first().map(|account_id| WalletSession {
            account_id: *account_id,
            status: ConnectionStatus::Connected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_account_wins() {
        let event = PairingEvent {
            account_ids: vec!["0.0.11".parse().unwrap(), "0.0.22".parse().unwrap()],
        };
        let session = WalletSession::from_pairing(&event).unwrap();
        assert_eq!(session.account_id.to_string(), "0.0.11");
        assert_eq!(session.status, ConnectionStatus::Connected);
    }

    #[test]
    fn empty_pairing_has_no_session() {
        assert!(WalletSession::from_pairing(&PairingEvent { account_ids: vec![] }).is_none());
    }
}
