mod bridge;
mod mock;
mod session;

pub use bridge::BridgeWallet;
pub use mock::MockWallet;
pub use session::{ConnectionStatus, WalletSession};

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::error::MintResult;
use crate::hedera::AccountId;
use crate::transactions::{Receipt, Transaction};

pub const EVENT_CHANNEL_CAPACITY: usize = 16;

/// The wallet approved a pairing for one or more accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingEvent {
    pub account_ids: Vec<AccountId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectEvent {
    pub reason: Option<String>,
}

/// One inbound channel per wallet event type
pub struct WalletEvents {
    pub pairing: mpsc::Receiver<PairingEvent>,
    pub status: mpsc::Receiver<ConnectionStatus>,
    pub disconnect: mpsc::Receiver<DisconnectEvent>,
}

/// Sending halves kept by a wallet implementation
#[derive(Clone)]
pub(crate) struct EventSenders {
    pairing: mpsc::Sender<PairingEvent>,
    status: mpsc::Sender<ConnectionStatus>,
    disconnect: mpsc::Sender<DisconnectEvent>,
}

impl EventSenders {
    pub(crate) fn channel() -> (EventSenders, WalletEvents) {
        let (pairing_tx, pairing_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (status_tx, status_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (disconnect_tx, disconnect_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        (
            EventSenders {
                pairing: pairing_tx,
                status: status_tx,
                disconnect: disconnect_tx,
            },
            WalletEvents {
                pairing: pairing_rx,
                status: status_rx,
                disconnect: disconnect_rx,
            },
        )
    }

    // A closed receiver only means nobody is listening any more.
    pub(crate) async fn paired(&self, account_ids: Vec<AccountId>) {
        let _ = self.pairing.send(PairingEvent { account_ids }).await;
    }

    pub(crate) async fn status(&self, status: ConnectionStatus) {
        let _ = self.status.send(status).await;
    }

    pub(crate) async fn disconnected(&self, reason: Option<String>) {
        let _ = self.disconnect.send(DisconnectEvent { reason }).await;
    }
}

/// Signs and submits transactions for one account
#[async_trait]
pub trait Signer: Send + Sync {
    fn account_id(&self) -> AccountId;

    async fn execute(&self, transaction: &Transaction) -> MintResult<Receipt>;
}

/// Pairing collaborator: the wallet that owns the user's ledger account.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Start the connector and hand over its event channels. Only the first
    /// call returns the receivers.
    async fn init(&self) -> MintResult<WalletEvents>;

    /// Ask the wallet to pair. The outcome arrives on the event channels.
    async fn open_pairing(&self) -> MintResult<()>;

    async fn disconnect(&self) -> MintResult<()>;

    fn signer(&self, account: &AccountId) -> Option<Arc<dyn Signer>>;
}
