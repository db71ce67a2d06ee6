use crate::constants::NETWORKS;

/// Shorten long identifiers such as CIDs: `bafybeig...q4xlxe3u`
pub fn shorten_id(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() > 20 {
        let head: String = chars[..8].iter().collect();
        let tail: String = chars[chars.len() - 8..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        id.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkState {
    pub current_network: usize,
}

impl Default for NetworkState {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkState {
    pub fn new() -> Self {
        NetworkState {
            current_network: 0, // testnet
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        NETWORKS
            .iter()
            .position(|(n, _)| *n == name)
            .map(|current_network| NetworkState { current_network })
    }

    pub fn next_network(&mut self) {
        self.current_network = (self.current_network + 1) % NETWORKS.len();
    }

    pub fn get_current_network(&self) -> &'static str {
        NETWORKS[self.current_network].0
    }

    pub fn get_current_mirror(&self) -> &'static str {
        NETWORKS[self.current_network].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_ids_are_untouched() {
        assert_eq!(shorten_id("0.0.1001"), "0.0.1001");
    }

    #[test]
    fn long_ids_keep_both_ends() {
        let cid = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";
        assert_eq!(shorten_id(cid), "bafybeig...y55fbzdi");
    }

    #[test]
    fn networks_cycle_back_to_testnet() {
        let mut state = NetworkState::new();
        assert_eq!(state.get_current_network(), "testnet");
        state.next_network();
        assert_eq!(state.get_current_network(), "mainnet");
        state.next_network();
        state.next_network();
        assert_eq!(state.get_current_network(), "testnet");
        assert_eq!(
            NetworkState::from_name("previewnet").map(|s| s.get_current_mirror()),
            Some("https://previewnet.mirrornode.hedera.com")
        );
        assert!(NetworkState::from_name("devnet").is_none());
    }
}
