use ratatui::widgets::ListState;
use std::time::Instant;

use super::form::{CollectionForm, PromptForm};
use super::services::Services;
use super::workflow::{Phase, Stage, Workflow};
use crate::config::Config;
use crate::constants::ACTIVITY_LOG_MAX_LINES;
use crate::hedera::{Hbar, TokenRecord};
use crate::utils::NetworkState;
use crate::wallet::{ConnectionStatus, WalletSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Error,
    Info,
    Success,
}

/// Which screen and key map is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Connect,
    Form,
    Generating,
    Preview,
    CreateCollection,
    Minting,
    Minted,
}

pub struct App {
    pub config: Config,
    pub services: Services,
    pub network_state: NetworkState,
    pub workflow: Workflow,
    pub session: Option<WalletSession>,
    pub connection_status: ConnectionStatus,
    pub balance: Option<Hbar>,
    pub last_balance_refresh: Option<Instant>,
    pub form: PromptForm,
    pub collections: Vec<TokenRecord>,
    pub collections_state: ListState,
    pub collections_loading: bool,
    pub create_dialog: Option<CollectionForm>,
    pub creating_collection: bool,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub message_type: MessageType,
    pub activity_log: Vec<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, services: Services) -> App {
        let network_state = NetworkState::from_name(&config.network).unwrap_or_default();
        App {
            config,
            services,
            network_state,
            workflow: Workflow::new(),
            session: None,
            connection_status: ConnectionStatus::Disconnected,
            balance: None,
            last_balance_refresh: None,
            form: PromptForm::new(),
            collections: Vec::new(),
            collections_state: ListState::default(),
            collections_loading: false,
            create_dialog: None,
            creating_collection: false,
            error_message: None,
            success_message: None,
            message_type: MessageType::Info,
            activity_log: Vec::new(),
            should_quit: false,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.create_dialog.is_some() {
            return Mode::CreateCollection;
        }
        match self.workflow.phase() {
            Phase::Disconnected => Mode::Connect,
            Phase::Idle | Phase::Failed(Stage::Generation) => Mode::Form,
            Phase::Generating => Mode::Generating,
            Phase::Previewing | Phase::Failed(Stage::Mint) => Mode::Preview,
            Phase::Minting => Mode::Minting,
            Phase::Minted => Mode::Minted,
        }
    }

    // clear error and success message
    pub fn clear_error(&mut self) {
        self.error_message = None;
        self.success_message = None;
    }

    pub fn set_message(&mut self, message_type: MessageType, message: String) {
        self.message_type = message_type;
        match message_type {
            MessageType::Success => {
                self.success_message = Some(message);
                self.error_message = None;
            }
            MessageType::Error | MessageType::Info => {
                self.error_message = Some(message);
                self.success_message = None;
            }
        }
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some() && self.message_type == MessageType::Error
    }

    /// Append a line to the activity panel, dropping the oldest past capacity.
    pub fn log(&mut self, line: impl Into<String>) {
        self.activity_log.push(line.into());
        if self.activity_log.len() > ACTIVITY_LOG_MAX_LINES {
            let excess = self.activity_log.len() - ACTIVITY_LOG_MAX_LINES;
            self.activity_log.drain(..excess);
        }
    }

    pub fn account_label(&self) -> String {
        match &self.session {
            Some(session) => session.account_id.to_string(),
            None => "Not connected".to_string(),
        }
    }

    pub fn balance_label(&self) -> String {
        self.balance
            .map(|b| b.to_string())
            .unwrap_or_else(|| "--".to_string())
    }
}
