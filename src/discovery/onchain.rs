//! Direct-enumeration discovery: walks each configured ERC-721 contract
//! with `balanceOf` / `tokenOfOwnerByIndex` / `tokenURI`, then fetches the
//! metadata document behind each URI. Every per-item failure degrades that
//! item to placeholders; it never aborts the rest of the run.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use ethers::providers::{Http, Provider};
use ethers::types::{Address, U256};
use futures_util::future::join_all;
use serde::Deserialize;
use tokio::time::{timeout, Duration};

use crate::config::Config;
use crate::constants::{MAX_TOKENS_PER_COLLECTION, PLACEHOLDER_COLLECTION, PLACEHOLDER_IMAGE};
use crate::error::{Result, VaultError};
use crate::models::Asset;
use crate::utils::rewrite_content_uri;

use super::{dedup_by_id, DiscoveryStrategy};

ethers::contract::abigen!(
    Erc721Enumerable,
    r#"[
        function balanceOf(address owner) view returns (uint256)
        function tokenOfOwnerByIndex(address owner, uint256 index) view returns (uint256)
        function tokenURI(uint256 tokenId) view returns (string)
        function name() view returns (string)
    ]"#
);

pub struct OnchainDiscovery {
    provider: Arc<Provider<Http>>,
    http: reqwest::Client,
    contracts: Vec<String>,
    ipfs_gateway: String,
    metadata_timeout_ms: u64,
}

/// The slice of an ERC-721 metadata document we render.
#[derive(Debug, Deserialize)]
struct TokenMetadata {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl OnchainDiscovery {
    pub fn new(config: &Config) -> Result<Self> {
        let provider = Provider::<Http>::try_from(config.eth_rpc_url.as_str())
            .map_err(|e| VaultError::BadConfig(format!("invalid EVM RPC URL: {e}")))?;
        Ok(Self {
            provider: Arc::new(provider),
            http: reqwest::Client::new(),
            contracts: config.collection_contracts.clone(),
            ipfs_gateway: config.ipfs_gateway.clone(),
            metadata_timeout_ms: config.metadata_timeout_ms,
        })
    }

    /// Enumerates the token ids `owner` holds in one collection.
    async fn enumerate_contract(
        &self,
        contract: &Erc721Enumerable<Provider<Http>>,
        owner: Address,
    ) -> Result<Vec<U256>> {
        let balance = contract
            .balance_of(owner)
            .call()
            .await
            .map_err(|e| VaultError::Rpc(e.to_string()))?;

        let count = balance.min(U256::from(MAX_TOKENS_PER_COLLECTION)).as_u64();
        if balance > U256::from(count) {
            tracing::warn!(
                "collection {:?} holds {} tokens, enumerating first {}",
                contract.address(),
                balance,
                count
            );
        }

        let mut token_ids = Vec::with_capacity(count as usize);
        for index in 0..count {
            match contract
                .token_of_owner_by_index(owner, U256::from(index))
                .call()
                .await
            {
                Ok(token_id) => token_ids.push(token_id),
                Err(e) => {
                    // One bad index must not hide the rest of the holding
                    tracing::warn!(
                        "tokenOfOwnerByIndex({}) failed on {:?}: {}",
                        index,
                        contract.address(),
                        e
                    );
                }
            }
        }
        Ok(token_ids)
    }

    /// Builds the asset for one token, degrading to placeholders whenever
    /// the URI or the metadata document is unusable.
    async fn resolve_token(
        &self,
        contract: &Erc721Enumerable<Provider<Http>>,
        contract_address: &str,
        collection_name: &str,
        token_id: U256,
    ) -> Asset {
        let token = token_id.to_string();
        let mut asset = Asset::new(contract_address, &token);
        asset.collection_name = collection_name.to_string();
        asset.display_name = format!("{} #{}", collection_name, token);
        asset.image_uri = PLACEHOLDER_IMAGE.to_string();

        let uri = match contract.token_uri(token_id).call().await {
            Ok(uri) => rewrite_content_uri(&uri, &self.ipfs_gateway),
            Err(e) => {
                tracing::warn!("tokenURI({}) failed on {}: {}", token, contract_address, e);
                return asset;
            }
        };

        match self.fetch_metadata(&uri).await {
            Ok(metadata) => {
                if let Some(name) = metadata.name.filter(|n| !n.trim().is_empty()) {
                    asset.display_name = name;
                }
                if let Some(image) = metadata.image.filter(|i| !i.trim().is_empty()) {
                    asset.image_uri = rewrite_content_uri(&image, &self.ipfs_gateway);
                }
                asset.description = metadata.description.unwrap_or_default();
            }
            Err(e) => {
                tracing::warn!("metadata fetch failed for {}: {}", asset.id, e);
            }
        }
        asset
    }

    async fn fetch_metadata(&self, uri: &str) -> Result<TokenMetadata> {
        let request = self.http.get(uri).send();
        let response = timeout(Duration::from_millis(self.metadata_timeout_ms), request)
            .await
            .map_err(|_| VaultError::Internal(format!("metadata fetch timed out: {uri}")))??;
        let metadata = response
            .error_for_status()
            .map_err(VaultError::Http)?
            .json::<TokenMetadata>()
            .await?;
        Ok(metadata)
    }
}

#[async_trait]
impl DiscoveryStrategy for OnchainDiscovery {
    async fn discover(&self, account: &str, chain_id: u64) -> Result<Vec<Asset>> {
        let owner = Address::from_str(account)
            .map_err(|_| VaultError::InvalidAddress(account.to_string()))?;
        tracing::debug!("on-chain enumeration for {} on chain {}", account, chain_id);

        let mut assets = Vec::new();
        for contract_address in &self.contracts {
            let Ok(address) = Address::from_str(contract_address) else {
                tracing::warn!("skipping invalid collection contract {}", contract_address);
                continue;
            };
            let contract = Erc721Enumerable::new(address, self.provider.clone());

            let token_ids = match self.enumerate_contract(&contract, owner).await {
                Ok(ids) => ids,
                Err(e) => {
                    // Per-contract isolation: one unreachable collection
                    // must not blank out the others
                    tracing::warn!("enumeration failed for {}: {}", contract_address, e);
                    continue;
                }
            };
            if token_ids.is_empty() {
                continue;
            }

            let collection_name = contract
                .name()
                .call()
                .await
                .unwrap_or_else(|_| PLACEHOLDER_COLLECTION.to_string());

            let resolved = join_all(token_ids.into_iter().map(|token_id| {
                self.resolve_token(&contract, contract_address, &collection_name, token_id)
            }))
            .await;
            assets.extend(resolved);
        }

        Ok(dedup_by_id(assets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_document_tolerates_missing_fields() {
        let metadata: TokenMetadata = serde_json::from_str(r#"{"name":"Ape #1"}"#).unwrap();
        assert_eq!(metadata.name.as_deref(), Some("Ape #1"));
        assert!(metadata.image.is_none());
        assert!(metadata.description.is_none());

        let empty: TokenMetadata = serde_json::from_str("{}").unwrap();
        assert!(empty.name.is_none());
    }

    #[test]
    fn metadata_document_ignores_extra_fields() {
        let metadata: TokenMetadata = serde_json::from_str(
            r#"{"name":"x","image":"ipfs://Qm/1.png","attributes":[{"trait_type":"fur"}]}"#,
        )
        .unwrap();
        assert_eq!(metadata.image.as_deref(), Some("ipfs://Qm/1.png"));
    }
}
