use tracing::info;

use super::core::{App, MessageType};
use super::services::Services;
use crate::error::{MintError, MintResult};

impl App {
    /// Move to the next network. Only allowed before pairing, since the
    /// session belongs to one network.
    pub fn cycle_network(&mut self) -> MintResult<()> {
        if self.session.is_some() {
            return Err(MintError::InvalidState("a wallet is connected"));
        }

        let mut next = self.network_state.clone();
        next.next_network();
        self.services.ledger = Services::ledger_for(&next)?;
        self.network_state = next;

        let network = self.network_state.get_current_network();
        info!(network, "switched network");
        self.log(format!("Network set to {}", network.to_uppercase()));
        self.set_message(
            MessageType::Info,
            format!("Network: {}", network.to_uppercase()),
        );
        Ok(())
    }

    pub fn explorer_url(&self) -> Option<String> {
        self.workflow
            .transaction_id()
            .map(|tx| tx.explorer_url(self.network_state.get_current_network()))
    }
}
