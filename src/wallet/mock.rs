use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use super::{ConnectionStatus, EventSenders, Signer, WalletConnector, WalletEvents};
use crate::error::{MintError, MintResult};
use crate::hedera::{AccountId, EntityId, TokenId, TransactionId};
use crate::transactions::{Receipt, Transaction};

/// What the mock signer answers with
#[derive(Debug, Clone)]
enum SignerBehaviour {
    Accept,
    #[cfg(test)]
    Fixed(TransactionId),
    #[cfg(test)]
    Reject(String),
    #[cfg(test)]
    Missing,
}

struct MockState {
    senders: EventSenders,
    events: Mutex<Option<WalletEvents>>,
    paired: Mutex<bool>,
    next_token: AtomicU64,
    submitted: Mutex<Vec<Transaction>>,
}

/// In-process wallet that pairs a fixed account and fabricates receipts.
#[derive(Clone)]
pub struct MockWallet {
    account: AccountId,
    behaviour: SignerBehaviour,
    state: Arc<MockState>,
}

impl MockWallet {
    pub fn new(account: AccountId) -> Self {
        let (senders, events) = EventSenders::channel();
        Self {
            account,
            behaviour: SignerBehaviour::Accept,
            state: Arc::new(MockState {
                senders,
                events: Mutex::new(Some(events)),
                paired: Mutex::new(false),
                next_token: AtomicU64::new(9000),
                submitted: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Pair but never offer a signer for the account.
    #[cfg(test)]
    pub fn without_signer(mut self) -> Self {
        self.behaviour = SignerBehaviour::Missing;
        self
    }

    /// Refuse every transaction with `message`.
    #[cfg(test)]
    pub fn rejecting(mut self, message: &str) -> Self {
        self.behaviour = SignerBehaviour::Reject(message.to_string());
        self
    }

    #[cfg(test)]
    pub fn with_transaction_id(mut self, transaction_id: TransactionId) -> Self {
        self.behaviour = SignerBehaviour::Fixed(transaction_id);
        self
    }

    /// Transactions the signer accepted or rejected, in submission order
    #[cfg(test)]
    pub fn submitted(&self) -> Vec<Transaction> {
        self.state
            .submitted
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    fn is_paired(&self) -> bool {
        self.state.paired.lock().map(|p| *p).unwrap_or(false)
    }

    fn set_paired(&self, paired: bool) {
        if let Ok(mut guard) = self.state.paired.lock() {
            *guard = paired;
        }
    }
}

#[async_trait]
impl WalletConnector for MockWallet {
    async fn init(&self) -> MintResult<WalletEvents> {
        self.state
            .events
            .lock()
            .ok()
            .and_then(|mut guard| guard.take())
            .ok_or_else(|| MintError::Wallet("Mock wallet already initialised".to_string()))
    }

    async fn open_pairing(&self) -> MintResult<()> {
        self.state.senders.status(ConnectionStatus::Connecting).await;
        self.set_paired(true);
        info!(account = %self.account, "mock wallet paired");
        self.state.senders.status(ConnectionStatus::Connected).await;
        self.state.senders.paired(vec![self.account]).await;
        Ok(())
    }

    async fn disconnect(&self) -> MintResult<()> {
        self.set_paired(false);
        self.state.senders.status(ConnectionStatus::Disconnected).await;
        self.state.senders.disconnected(None).await;
        Ok(())
    }

    fn signer(&self, account: &AccountId) -> Option<Arc<dyn Signer>> {
        if !self.is_paired() || *account != self.account {
            return None;
        }
        #[cfg(test)]
        if matches!(self.behaviour, SignerBehaviour::Missing) {
            return None;
        }
        Some(Arc::new(self.clone()))
    }
}

#[async_trait]
impl Signer for MockWallet {
    fn account_id(&self) -> AccountId {
        self.account
    }

    async fn execute(&self, transaction: &Transaction) -> MintResult<Receipt> {
        if let Ok(mut submitted) = self.state.submitted.lock() {
            submitted.push(transaction.clone());
        }

        let transaction_id: TransactionId = match &self.behaviour {
            #[cfg(test)]
            SignerBehaviour::Reject(message) => return Err(MintError::Transaction(message.clone())),
            #[cfg(test)]
            SignerBehaviour::Missing => return Err(MintError::NoSigner(self.account)),
            #[cfg(test)]
            SignerBehaviour::Fixed(id) => id.clone(),
            SignerBehaviour::Accept => {
                let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
                format!("{}@{}.{}", self.account, now.as_secs(), now.subsec_nanos()).parse()?
            }
        };

        let token_id = match transaction {
            Transaction::TokenCreate(_) => {
                let num = self.state.next_token.fetch_add(1, Ordering::SeqCst);
                Some(TokenId(EntityId { shard: 0, realm: 0, num }))
            }
            Transaction::TokenMint(_) => None,
        };

        Ok(Receipt {
            transaction_id,
            token_id,
        })
    }
}
