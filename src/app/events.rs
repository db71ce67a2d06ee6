use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::core::{App, MessageType};
use crate::wallet::{ConnectionStatus, PairingEvent, WalletEvents, WalletSession};

/// Consume the wallet's event channels until all of them close.
pub fn spawn_wallet_listener(app: Arc<Mutex<App>>, events: WalletEvents) -> JoinHandle<()> {
    tokio::spawn(async move {
        let WalletEvents {
            mut pairing,
            mut status,
            mut disconnect,
        } = events;

        loop {
            tokio::select! {
                Some(event) = pairing.recv() => App::on_pairing(&app, event).await,
                Some(next) = status.recv() => app.lock().await.on_connection_status(next),
                Some(event) = disconnect.recv() => app.lock().await.on_disconnect(event.reason),
                else => break,
            }
        }
        debug!("wallet event channels closed");
    })
}

impl App {
    pub async fn on_pairing(app: &Arc<Mutex<App>>, event: PairingEvent) {
        let connected = {
            let mut guard = app.lock().await;
            match WalletSession::from_pairing(&event) {
                None => {
                    warn!("pairing event carried no accounts");
                    guard.log("Wallet paired without any account");
                    false
                }
                Some(session) => {
                    let account = session.account_id;
                    let switched = guard.session.as_ref().is_some_and(|s| s.account_id != account);
                    if switched {
                        guard.workflow.disconnect();
                        guard.clear_collections();
                        guard.balance = None;
                    }

                    info!(%account, "wallet paired");
                    guard.session = Some(session);
                    guard.connection_status = ConnectionStatus::Connected;
                    guard.workflow.connect();
                    guard.log(format!("Paired account {}", account));
                    if event.account_ids.len() > 1 {
                        guard.log(format!(
                            "Wallet offered {} accounts, using the first",
                            event.account_ids.len()
                        ));
                    }
                    guard.set_message(MessageType::Success, format!("Connected as {}", account));
                    true
                }
            }
        };

        if connected {
            App::load_collections(app, None).await;
            App::refresh_balance(app).await;
        }
    }

    pub fn on_connection_status(&mut self, status: ConnectionStatus) {
        debug!(%status, "wallet connection status");
        let was_connecting = self.connection_status == ConnectionStatus::Connecting;
        self.connection_status = status;
        if let Some(session) = self.session.as_mut() {
            session.status = status;
        }

        match status {
            ConnectionStatus::Connecting => self.log("Waiting for wallet approval..."),
            ConnectionStatus::Disconnected if was_connecting && self.session.is_none() => {
                self.log("Pairing was not completed")
            }
            _ => {}
        }
    }

    /// Forget the session and everything that belonged to it.
    pub fn on_disconnect(&mut self, reason: Option<String>) {
        let had_session = self.session.take().is_some();
        self.connection_status = ConnectionStatus::Disconnected;
        self.workflow.disconnect();
        self.clear_collections();
        self.collections_loading = false;
        self.balance = None;
        self.last_balance_refresh = None;
        self.create_dialog = None;
        self.creating_collection = false;
        self.form.clear_errors();

        if had_session {
            info!(reason = reason.as_deref().unwrap_or("none"), "wallet disconnected");
            let message = reason.unwrap_or_else(|| "Wallet disconnected".to_string());
            self.log(message.clone());
            self.set_message(MessageType::Info, message);
        }
    }
}
