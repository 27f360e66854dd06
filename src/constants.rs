/// Application constants

// Asset metadata fallbacks
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/400x400?text=NFT";
pub const PLACEHOLDER_COLLECTION: &str = "Unknown Collection";

// Content-addressed metadata
pub const IPFS_SCHEME: &str = "ipfs://";
pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

// Reward display defaults (presentation-only, no backing ledger)
pub const DEFAULT_DAILY_RATE_PER_ASSET: &str = "10";
pub const DEFAULT_MIN_CLAIM: &str = "0.01";

// Network call budgets
pub const DISCOVERY_TIMEOUT_MS: u64 = 10_000;
pub const METADATA_TIMEOUT_MS: u64 = 3_500;

// Direct enumeration guard: stop iterating a single collection past this
// many tokens so one pathological contract cannot stall discovery.
pub const MAX_TOKENS_PER_COLLECTION: u64 = 200;

// Address display: 0x + 4 head bytes, 4 tail chars
pub const ADDRESS_HEAD_CHARS: usize = 6;
pub const ADDRESS_TAIL_CHARS: usize = 4;
