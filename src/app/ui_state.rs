use std::time::{SystemTime, UNIX_EPOCH};

use super::core::App;
use super::workflow::{Phase, Stage};
use crate::hedera::{nft_collections, TokenId, TokenRecord};

impl App {
    pub fn next_item(&mut self) {
        let items_len = self.collections.len();
        if items_len == 0 {
            return;
        }
        let i = match self.collections_state.selected() {
            Some(i) => {
                if i >= items_len - 1 {
                    i
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.collections_state.select(Some(i));
    }

    pub fn previous_item(&mut self) {
        if self.collections.is_empty() {
            return;
        }
        let i = match self.collections_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.collections_state.select(Some(i));
    }

    pub fn selected_collection(&self) -> Option<&TokenRecord> {
        self.collections_state
            .selected()
            .and_then(|i| self.collections.get(i))
    }

    /// Replace the collection list and select `preselect`, or the first entry.
    ///
    /// A preselected collection the mirror node does not know about yet is kept
    /// from the previous list.
    pub fn set_collections(&mut self, tokens: Vec<TokenRecord>, preselect: Option<TokenId>) {
        let mut tokens = tokens;
        if let Some(id) = preselect {
            if !tokens.iter().any(|t| t.id == id) {
                if let Some(known) = self.collections.iter().find(|t| t.id == id) {
                    tokens.push(known.clone());
                }
            }
        }

        self.collections = nft_collections(tokens);
        let index = preselect
            .and_then(|id| self.collections.iter().position(|t| t.id == id))
            .or(if self.collections.is_empty() { None } else { Some(0) });
        self.collections_state.select(index);
    }

    pub fn clear_collections(&mut self) {
        self.collections.clear();
        self.collections_state.select(None);
    }

    pub fn get_status_animation(&self) -> String {
        let time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let frame = (time % 3) as usize;

        if self.creating_collection {
            return "║▒▓░ CREATING COLLECTION ░▓▒║".to_string();
        }

        match self.workflow.phase() {
            Phase::Disconnected => "║░▓▒ AWAITING WALLET ▒▓░║".to_string(),
            Phase::Idle => match frame {
                0 => "║▓▒░ READY ░▒▓║".to_string(),
                1 => "║▒▓░ READY ░▓▒║".to_string(),
                _ => "║░▓▒ READY ▒▓░║".to_string(),
            },
            Phase::Generating => match frame {
                0 => "║▓▒░ RENDERING. ░▒▓║".to_string(),
                1 => "║▒▓░ RENDERING.. ░▓▒║".to_string(),
                _ => "║░▓▒ RENDERING... ▒▓░║".to_string(),
            },
            Phase::Previewing => "║▓▒░ ARTWORK READY ░▒▓║".to_string(),
            Phase::Minting => match frame {
                0 => "║▓▒░ MINTING. ░▒▓║".to_string(),
                1 => "║▒▓░ MINTING.. ░▓▒║".to_string(),
                _ => "║░▓▒ MINTING... ▒▓░║".to_string(),
            },
            Phase::Minted => "║▓▒░ MINT COMPLETE ░▒▓║".to_string(),
            Phase::Failed(Stage::Generation) => "║▒▓░ GENERATION ERROR ░▓▒║".to_string(),
            Phase::Failed(Stage::Mint) => "║▒▓░ MINT ERROR ░▓▒║".to_string(),
        }
    }
}
