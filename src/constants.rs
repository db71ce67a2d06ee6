// Stability AI
pub const STABILITY_API_URL: &str = "https://api.stability.ai";
pub const STABILITY_ENGINE: &str = "stable-diffusion-xl-1024-v1-0";
pub const GENERATION_STEPS: u32 = 40;
pub const GENERATION_WIDTH: u32 = 1024;
pub const GENERATION_HEIGHT: u32 = 1024;
pub const GENERATION_SEED: u64 = 0;
pub const GENERATION_CFG_SCALE: u32 = 5;
pub const GENERATION_SAMPLES: u32 = 1;
pub const PROMPT_WEIGHT: f32 = 1.0;
pub const NSFW_PROMPT: &str = "nsfw";
pub const NSFW_WEIGHT: f32 = -2.0;
pub const NEGATIVE_PROMPT_WEIGHT: f32 = -1.0;

// nft.storage
pub const NFT_STORAGE_API_URL: &str = "https://api.nft.storage";
pub const IPFS_GATEWAY: &str = "nftstorage.link";
pub const METADATA_FILE_NAME: &str = "metadata.json";

// Wallet bridge
pub const WALLET_BRIDGE_URL: &str = "http://127.0.0.1:8787";
pub const MOCK_ACCOUNT_ID: &str = "0.0.1001";

// Ledger limits and fee caps
pub const NFT_METADATA_MAX_BYTES: usize = 100;
pub const MINT_MAX_FEE_HBAR: u64 = 20;
pub const CREATE_MAX_FEE_HBAR: u64 = 30;
pub const TINYBARS_PER_HBAR: u64 = 100_000_000;

pub const HTTP_TIMEOUT_SECS: u64 = 120;
pub const MIRROR_PAGE_LIMIT: u32 = 100;
pub const ACTIVITY_LOG_MAX_LINES: usize = 500;
pub const BALANCE_REFRESH_SECS: u64 = 30;

pub const DEFAULT_COLLECTION_NAME: &str = "CivicMinter Art";
pub const DEFAULT_COLLECTION_SYMBOL: &str = "CMART";

// Input limits
pub const PROMPT_MAX_LEN: usize = 2000;
pub const COLLECTION_FIELD_MAX_LEN: usize = 100;

pub const EXPLORER_URL: &str = "https://hashscan.io";

/// (name, mirror node base url)
pub const NETWORKS: [(&str, &str); 3] = [
    ("testnet", "https://testnet.mirrornode.hedera.com"),
    ("mainnet", "https://mainnet-public.mirrornode.hedera.com"),
    ("previewnet", "https://previewnet.mirrornode.hedera.com"),
];
