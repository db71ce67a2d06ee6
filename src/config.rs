//! Layered configuration.
//!
//! Precedence, highest wins:
//! 1. Command line flags (`--network`, `--mock-wallet`)
//! 2. Environment variables (`STABILITY_API_KEY`, `NFT_STORAGE_API_KEY`, ...)
//! 3. The file passed with `--config`
//! 4. Global: `~/.civicminter/config.toml`
//! 5. Built-in defaults from `constants.rs`

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_COLLECTION_NAME, DEFAULT_COLLECTION_SYMBOL, IPFS_GATEWAY, MOCK_ACCOUNT_ID, NETWORKS,
    NFT_STORAGE_API_URL, STABILITY_API_URL, STABILITY_ENGINE, WALLET_BRIDGE_URL,
};
use crate::error::{MintError, MintResult};
use crate::hedera::AccountId;

const APP_DIR: &str = "civicminter";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StabilitySection {
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub engine: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSection {
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub gateway: Option<String>,
    pub upload_on_generate: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletSection {
    pub bridge_url: Option<String>,
    pub mock: Option<bool>,
    pub mock_account: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionSection {
    pub default_name: Option<String>,
    pub default_symbol: Option<String>,
}

/// One `config.toml` as written on disk. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub network: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub stability: StabilitySection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub wallet: WalletSection,
    #[serde(default)]
    pub collection: CollectionSection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StabilityConfig {
    pub api_key: String,
    pub api_url: String,
    pub engine: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub api_key: String,
    pub api_url: String,
    pub gateway: String,
    pub upload_on_generate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    pub bridge_url: String,
    pub mock: bool,
    pub mock_account: AccountId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionConfig {
    pub default_name: String,
    pub default_symbol: String,
}

/// Resolved configuration with every layer applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub network: String,
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
    pub stability: StabilityConfig,
    pub storage: StorageConfig,
    pub wallet: WalletConfig,
    pub collection: CollectionConfig,
}

impl Config {
    /// Load global config, then `explicit` if given, then the environment.
    pub fn load(explicit: Option<&Path>) -> MintResult<Self> {
        let mut layers = Vec::new();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                layers.push(Self::load_file(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(MintError::Config(format!(
                    "Config file {} does not exist",
                    path.display()
                )));
            }
            layers.push(Self::load_file(path)?);
        }

        Self::resolve(layers, |key| std::env::var(key).ok())
    }

    /// Merge file layers in order and apply overrides read through `env`.
    pub fn resolve<F>(layers: Vec<ConfigFile>, env: F) -> MintResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut merged = ConfigFile::default();
        for layer in layers {
            Self::merge_into(&mut merged, layer);
        }
        Self::apply_env_overrides(&mut merged, env);

        let network = merged.network.unwrap_or_else(|| NETWORKS[0].0.to_string());
        validate_network(&network)?;

        let mock_account = merged
            .wallet
            .mock_account
            .as_deref()
            .unwrap_or(MOCK_ACCOUNT_ID)
            .parse::<AccountId>()
            .map_err(|e: MintError| MintError::Config(format!("wallet.mock_account: {}", e)))?;

        Ok(Config {
            network,
            output_dir: merged.output_dir.unwrap_or_else(|| data_dir().join("images")),
            log_file: merged
                .log_file
                .unwrap_or_else(|| data_dir().join(format!("{}.log", APP_DIR))),
            stability: StabilityConfig {
                api_key: merged.stability.api_key.unwrap_or_default(),
                api_url: merged
                    .stability
                    .api_url
                    .unwrap_or_else(|| STABILITY_API_URL.to_string()),
                engine: merged
                    .stability
                    .engine
                    .unwrap_or_else(|| STABILITY_ENGINE.to_string()),
            },
            storage: StorageConfig {
                api_key: merged.storage.api_key.unwrap_or_default(),
                api_url: merged
                    .storage
                    .api_url
                    .unwrap_or_else(|| NFT_STORAGE_API_URL.to_string()),
                gateway: merged
                    .storage
                    .gateway
                    .unwrap_or_else(|| IPFS_GATEWAY.to_string()),
                upload_on_generate: merged.storage.upload_on_generate.unwrap_or(true),
            },
            wallet: WalletConfig {
                bridge_url: merged
                    .wallet
                    .bridge_url
                    .unwrap_or_else(|| WALLET_BRIDGE_URL.to_string()),
                mock: merged.wallet.mock.unwrap_or(false),
                mock_account,
            },
            collection: CollectionConfig {
                default_name: merged
                    .collection
                    .default_name
                    .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string()),
                default_symbol: merged
                    .collection
                    .default_symbol
                    .unwrap_or_else(|| DEFAULT_COLLECTION_SYMBOL.to_string()),
            },
        })
    }

    /// Command line flags win over every other layer.
    pub fn apply_cli(&mut self, network: Option<&str>, mock_wallet: bool) -> MintResult<()> {
        if let Some(network) = network {
            validate_network(network)?;
            self.network = network.to_string();
        }
        if mock_wallet {
            self.wallet.mock = true;
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(format!(".{}", APP_DIR)).join("config.toml"))
    }

    fn load_file(path: &Path) -> MintResult<ConfigFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            MintError::Config(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn merge_into(base: &mut ConfigFile, overlay: ConfigFile) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        take(&mut base.network, overlay.network);
        take(&mut base.output_dir, overlay.output_dir);
        take(&mut base.log_file, overlay.log_file);

        take(&mut base.stability.api_key, overlay.stability.api_key);
        take(&mut base.stability.api_url, overlay.stability.api_url);
        take(&mut base.stability.engine, overlay.stability.engine);

        take(&mut base.storage.api_key, overlay.storage.api_key);
        take(&mut base.storage.api_url, overlay.storage.api_url);
        take(&mut base.storage.gateway, overlay.storage.gateway);
        take(&mut base.storage.upload_on_generate, overlay.storage.upload_on_generate);

        take(&mut base.wallet.bridge_url, overlay.wallet.bridge_url);
        take(&mut base.wallet.mock, overlay.wallet.mock);
        take(&mut base.wallet.mock_account, overlay.wallet.mock_account);

        take(&mut base.collection.default_name, overlay.collection.default_name);
        take(&mut base.collection.default_symbol, overlay.collection.default_symbol);
    }

    fn apply_env_overrides<F>(config: &mut ConfigFile, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = var("STABILITY_API_KEY") {
            config.stability.api_key = Some(key);
        }
        if let Some(key) = var("NFT_STORAGE_API_KEY") {
            config.storage.api_key = Some(key);
        }
        if let Some(network) = var("HEDERA_NETWORK") {
            config.network = Some(network.to_lowercase());
        }
        if let Some(url) = var("CIVICMINTER_WALLET_BRIDGE") {
            config.wallet.bridge_url = Some(url);
        }
        if let Some(name) = var("NFT_NAME") {
            config.collection.default_name = Some(name);
        }
        if let Some(symbol) = var("NFT_SYMBOL") {
            config.collection.default_symbol = Some(symbol);
        }
    }
}

fn validate_network(network: &str) -> MintResult<()> {
    if NETWORKS.iter().any(|(name, _)| *name == network) {
        Ok(())
    } else {
        let known: Vec<_> = NETWORKS.iter().map(|(name, _)| *name).collect();
        Err(MintError::Config(format!(
            "Unknown network \"{}\" (expected one of {})",
            network,
            known.join(", ")
        )))
    }
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_DIR)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn parse(content: &str) -> ConfigFile {
        toml::from_str(content).unwrap()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_when_nothing_is_configured() {
        let config = Config::resolve(Vec::new(), no_env).unwrap();
        assert_eq!(config.network, "testnet");
        assert_eq!(config.stability.engine, STABILITY_ENGINE);
        assert_eq!(config.storage.gateway, IPFS_GATEWAY);
        assert!(config.storage.upload_on_generate);
        assert!(!config.wallet.mock);
        assert_eq!(config.collection.default_symbol, DEFAULT_COLLECTION_SYMBOL);
        assert!(config.stability.api_key.is_empty());
    }

    #[test]
    fn later_layers_override_earlier_ones() {
        let global = parse(
            r#"
network = "mainnet"

[stability]
api_key = "global-key"
engine = "custom-engine"

[storage]
upload_on_generate = false
"#,
        );
        let local = parse(
            r#"
[stability]
api_key = "local-key"

[collection]
default_name = "Local Art"
"#,
        );

        let config = Config::resolve(vec![global, local], no_env).unwrap();
        assert_eq!(config.network, "mainnet");
        assert_eq!(config.stability.api_key, "local-key");
        assert_eq!(config.stability.engine, "custom-engine");
        assert!(!config.storage.upload_on_generate);
        assert_eq!(config.collection.default_name, "Local Art");
    }

    #[test]
    fn environment_overrides_files() {
        let file = parse(
            r#"
[stability]
api_key = "file-key"
"#,
        );
        let env: HashMap<&str, &str> = [
            ("STABILITY_API_KEY", "env-key"),
            ("NFT_STORAGE_API_KEY", "storage-key"),
            ("HEDERA_NETWORK", "PreviewNet"),
            ("NFT_SYMBOL", "ENV"),
            ("NFT_NAME", "  "),
        ]
        .into_iter()
        .collect();

        let config = Config::resolve(vec![file], |k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.stability.api_key, "env-key");
        assert_eq!(config.storage.api_key, "storage-key");
        assert_eq!(config.network, "previewnet");
        assert_eq!(config.collection.default_symbol, "ENV");
        assert_eq!(config.collection.default_name, DEFAULT_COLLECTION_NAME);
    }

    #[test]
    fn unknown_network_is_rejected() {
        let file = parse("network = \"devnet\"");
        assert!(matches!(
            Config::resolve(vec![file], no_env),
            Err(MintError::Config(_))
        ));

        let mut config = Config::resolve(Vec::new(), no_env).unwrap();
        assert!(config.apply_cli(Some("localnet"), false).is_err());
        config.apply_cli(Some("mainnet"), true).unwrap();
        assert_eq!(config.network, "mainnet");
        assert!(config.wallet.mock);
    }

    #[test]
    fn invalid_mock_account_is_a_config_error() {
        let file = parse(
            r#"
[wallet]
mock_account = "not-an-account"
"#,
        );
        assert!(matches!(
            Config::resolve(vec![file], no_env),
            Err(MintError::Config(_))
        ));
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"[wallet]\nmock = true\nmock_account = \"0.0.42\"\n").unwrap();

        let file = Config::load_file(&path).unwrap();
        let config = Config::resolve(vec![file], no_env).unwrap();
        assert!(config.wallet.mock);
        assert_eq!(config.wallet.mock_account.to_string(), "0.0.42");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(MintError::Config(_))
        ));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "network = [").unwrap();
        assert!(matches!(Config::load_file(&path), Err(MintError::Config(_))));
    }
}
