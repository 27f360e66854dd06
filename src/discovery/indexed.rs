//! Indexed-API discovery: one call to a chain-scoped indexing service that
//! already knows which tokens an owner holds.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::time::{timeout, Duration};

use crate::config::Config;
use crate::constants::{PLACEHOLDER_COLLECTION, PLACEHOLDER_IMAGE};
use crate::error::{Result, VaultError};
use crate::models::Asset;
use crate::utils::rewrite_content_uri;

use super::{dedup_by_id, DiscoveryStrategy};

pub struct IndexedApiDiscovery {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    ipfs_gateway: String,
    timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
struct IndexedResponse {
    #[serde(default)]
    assets: Vec<IndexedRecord>,
}

/// One record from the indexer. Everything beyond the contract/token pair
/// is best-effort; absent fields degrade to placeholders.
#[derive(Debug, Deserialize)]
struct IndexedRecord {
    contract_address: String,
    token_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    collection: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl IndexedApiDiscovery {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .indexer_api_key
            .clone()
            .ok_or_else(|| VaultError::BadConfig("indexer API key is required".to_string()))?;
        if config.indexer_api_url.trim().is_empty() {
            return Err(VaultError::BadConfig("indexer API URL is empty".to_string()));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.indexer_api_url.trim_end_matches('/').to_string(),
            api_key,
            ipfs_gateway: config.ipfs_gateway.clone(),
            timeout_ms: config.discovery_timeout_ms,
        })
    }

    fn map_record(&self, record: IndexedRecord) -> Option<Asset> {
        if record.contract_address.trim().is_empty() || record.token_id.trim().is_empty() {
            return None;
        }
        let mut asset = Asset::new(record.contract_address.trim(), record.token_id.trim());
        asset.collection_name = record
            .collection
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER_COLLECTION.to_string());
        asset.display_name = record
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| format!("{} #{}", asset.collection_name, asset.token_id));
        asset.image_uri = record
            .image_url
            .filter(|u| !u.trim().is_empty())
            .map(|u| rewrite_content_uri(&u, &self.ipfs_gateway))
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
        asset.description = record.description.unwrap_or_default();
        Some(asset)
    }
}

#[async_trait]
impl DiscoveryStrategy for IndexedApiDiscovery {
    async fn discover(&self, account: &str, chain_id: u64) -> Result<Vec<Asset>> {
        let url = format!("{}/assets", self.base_url);
        tracing::debug!("indexer lookup for {} on chain {}", account, chain_id);

        let chain = chain_id.to_string();
        let request = self
            .http
            .get(&url)
            .header("x-api-key", &self.api_key)
            .query(&[("owner", account), ("chain_id", chain.as_str())])
            .send();

        let response = timeout(Duration::from_millis(self.timeout_ms), request)
            .await
            .map_err(|_| VaultError::Indexer("indexer request timed out".to_string()))??;

        let response = response
            .error_for_status()
            .map_err(|e| VaultError::Indexer(format!("indexer returned {}", e)))?;

        let payload: IndexedResponse = response.json().await?;
        let assets: Vec<Asset> = payload
            .assets
            .into_iter()
            .filter_map(|record| self.map_record(record))
            .collect();

        Ok(dedup_by_id(assets))
    }
}
