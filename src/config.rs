use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::str::FromStr;
use url::Url;

use crate::constants::{
    DEFAULT_DAILY_RATE_PER_ASSET, DEFAULT_IPFS_GATEWAY, DEFAULT_MIN_CLAIM, DISCOVERY_TIMEOUT_MS,
    METADATA_TIMEOUT_MS,
};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Blockchain
    pub eth_rpc_url: String,

    // Indexing service; a present API key selects the indexed discovery
    // strategy, otherwise assets are enumerated directly on-chain.
    pub indexer_api_url: String,
    pub indexer_api_key: Option<String>,

    // Contracts scanned by the direct-enumeration strategy
    pub collection_contracts: Vec<String>,

    // Metadata resolution
    pub ipfs_gateway: String,

    // Network call budgets (milliseconds)
    pub discovery_timeout_ms: u64,
    pub metadata_timeout_ms: u64,

    // Reward display knobs
    pub daily_rate_per_asset: Decimal,
    pub min_claim: Decimal,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            eth_rpc_url: env::var("ETHEREUM_RPC_URL")?,

            indexer_api_url: env::var("INDEXER_API_URL").unwrap_or_default(),
            indexer_api_key: env::var("INDEXER_API_KEY").ok().filter(|k| !k.trim().is_empty()),

            collection_contracts: env::var("COLLECTION_CONTRACTS")
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),

            ipfs_gateway: env::var("IPFS_GATEWAY")
                .unwrap_or_else(|_| DEFAULT_IPFS_GATEWAY.to_string()),

            discovery_timeout_ms: env::var("DISCOVERY_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DISCOVERY_TIMEOUT_MS),
            metadata_timeout_ms: env::var("METADATA_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(METADATA_TIMEOUT_MS),

            daily_rate_per_asset: env::var("REWARD_DAILY_RATE")
                .ok()
                .and_then(|s| Decimal::from_str(&s).ok())
                .unwrap_or_else(|| Decimal::from_str(DEFAULT_DAILY_RATE_PER_ASSET).unwrap()),
            min_claim: env::var("REWARD_MIN_CLAIM")
                .ok()
                .and_then(|s| Decimal::from_str(&s).ok())
                .unwrap_or_else(|| Decimal::from_str(DEFAULT_MIN_CLAIM).unwrap()),
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.eth_rpc_url.trim().is_empty() {
            anyhow::bail!("ETHEREUM_RPC_URL is empty");
        }
        Url::parse(&self.eth_rpc_url)
            .map_err(|e| anyhow::anyhow!("ETHEREUM_RPC_URL is not a valid URL: {e}"))?;

        if self.indexer_api_key.is_some() && self.indexer_api_url.trim().is_empty() {
            anyhow::bail!("INDEXER_API_KEY is set but INDEXER_API_URL is empty");
        }
        if !self.indexer_api_url.trim().is_empty() {
            Url::parse(&self.indexer_api_url)
                .map_err(|e| anyhow::anyhow!("INDEXER_API_URL is not a valid URL: {e}"))?;
        }

        if self.indexer_api_key.is_none() && self.collection_contracts.is_empty() {
            tracing::warn!(
                "No indexer credential and no COLLECTION_CONTRACTS; discovery will find nothing"
            );
        }
        for contract in &self.collection_contracts {
            if contract.starts_with("0x0000") {
                tracing::warn!("Using placeholder collection contract address {}", contract);
            }
        }

        if self.daily_rate_per_asset < Decimal::ZERO {
            anyhow::bail!("REWARD_DAILY_RATE must not be negative");
        }
        if self.min_claim < Decimal::ZERO {
            anyhow::bail!("REWARD_MIN_CLAIM must not be negative");
        }

        Ok(())
    }

    /// An indexing-service credential switches discovery to the single-call
    /// indexed strategy.
    pub fn has_indexer_credential(&self) -> bool {
        self.indexer_api_key.is_some()
    }
}
