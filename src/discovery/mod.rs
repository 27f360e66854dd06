//! Asset discovery: turns (account, chain) into the normalized list of
//! owned assets. Two interchangeable strategies exist; configuration picks
//! one at startup and the rest of the crate only sees the trait.

pub mod indexed;
pub mod onchain;

pub use indexed::IndexedApiDiscovery;
pub use onchain::OnchainDiscovery;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::Result;
use crate::models::Asset;

#[async_trait]
pub trait DiscoveryStrategy: Send + Sync {
    /// Produces the ordered, de-duplicated assets `account` owns on
    /// `chain_id`. A top-level failure must leave nothing half-applied:
    /// implementations either return the full list or an error.
    async fn discover(&self, account: &str, chain_id: u64) -> Result<Vec<Asset>>;
}

/// Picks the strategy once from configuration: an indexing-service
/// credential selects the single-call indexed lookup, otherwise assets are
/// enumerated contract-by-contract on-chain.
pub fn strategy_from_config(config: &Config) -> Result<Arc<dyn DiscoveryStrategy>> {
    if config.has_indexer_credential() {
        tracing::info!("using indexed-API asset discovery");
        Ok(Arc::new(IndexedApiDiscovery::new(config)?))
    } else {
        tracing::info!(
            "using direct on-chain asset discovery over {} contracts",
            config.collection_contracts.len()
        );
        Ok(Arc::new(OnchainDiscovery::new(config)?))
    }
}

/// First occurrence wins; discovery output must be stable under indexer
/// hiccups that repeat records.
pub(crate) fn dedup_by_id(assets: Vec<Asset>) -> Vec<Asset> {
    let mut seen: HashSet<String> = HashSet::with_capacity(assets.len());
    assets
        .into_iter()
        .filter(|asset| seen.insert(asset.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence() {
        let mut a = Asset::new("0xc1", "1");
        a.display_name = "first".to_string();
        let mut dup = Asset::new("0xc1", "1");
        dup.display_name = "second".to_string();
        let b = Asset::new("0xc1", "2");

        let out = dedup_by_id(vec![a, dup, b]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].display_name, "first");
        assert_eq!(out[1].id, "0xc1-2");
    }
}
