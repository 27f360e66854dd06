//! Scripted end-to-end walk through the state manager: connect, discover,
//! select, stake, watch rewards tick, survive an account switch, and
//! disconnect. Scripted collaborators stand in for the wallet provider
//! and the discovery backend.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use rust_decimal::Decimal;
use tokio::time::{interval, Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stakevault_core::discovery::DiscoveryStrategy;
use stakevault_core::gateway::LocalGate;
use stakevault_core::provider::{WalletEvent, WalletProvider};
use stakevault_core::rewards::FlatRateModel;
use stakevault_core::{Asset, Collection, ConnectionManager, Result};

const ALICE: &str = "0xa11ce00000000000000000000000000000000001";
const BOB: &str = "0xb0b0000000000000000000000000000000000002";

/// Wallet double that always grants access to Alice on mainnet.
struct SimProvider;

#[async_trait]
impl WalletProvider for SimProvider {
    async fn request_accounts(&self) -> Result<Vec<String>> {
        Ok(vec![ALICE.to_string()])
    }

    async fn chain_id(&self) -> Result<u64> {
        Ok(1)
    }
}

/// Per-account canned inventories; token timestamps make rewards move.
struct SimDiscovery;

#[async_trait]
impl DiscoveryStrategy for SimDiscovery {
    async fn discover(&self, account: &str, chain_id: u64) -> Result<Vec<Asset>> {
        tracing::info!("sim discovery for {} on chain {}", account, chain_id);
        let tokens: &[&str] = if account == ALICE { &["1", "2", "3"] } else { &["7"] };
        Ok(tokens
            .iter()
            .map(|t| {
                let mut asset = Asset::new("0xc011ec7100000000000000000000000000000001", t);
                asset.collection_name = "Vault Apes".to_string();
                asset.display_name = format!("Vault Ape #{t}");
                asset
            })
            .collect())
    }
}

fn render(m: &ConnectionManager) {
    let vm = m.view();
    println!(
        "[{}] wallet: {} NFTs ({:?}) | staked: {} NFTs ({:?}) | stake {} / unstake {} / claim {}",
        vm.connect_label,
        vm.wallet_count,
        vm.owned_panel,
        vm.staked_count,
        vm.staked_panel,
        vm.stake_enabled,
        vm.unstake_enabled,
        vm.claim_enabled,
    );
}

fn drain_toasts(m: &mut ConnectionManager) {
    for notice in m.drain_notices() {
        println!("  toast[{:?}]: {}", notice.level, notice.message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stakevault_core=debug,session_sim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut manager = ConnectionManager::new(
        Arc::new(SimProvider),
        Arc::new(SimDiscovery),
        Arc::new(FlatRateModel::new(Decimal::from(10))),
        Decimal::from_str("0.01")?,
    );
    let gate = LocalGate;

    manager.connect().await;
    drain_toasts(&mut manager);
    render(&manager);

    // Select two apes and stake them
    manager.store_mut().toggle_selection(
        "0xc011ec7100000000000000000000000000000001-1",
        Collection::Owned,
    );
    manager.store_mut().toggle_selection(
        "0xc011ec7100000000000000000000000000000001-2",
        Collection::Owned,
    );
    manager.stake_selected(&gate).await?;
    drain_toasts(&mut manager);
    render(&manager);

    // Backdate the stakes so the estimator has something to show, then let
    // the reward ticker run a few beats
    manager.store_mut().toggle_selection(
        "0xc011ec7100000000000000000000000000000001-1",
        Collection::Staked,
    );
    manager.store_mut().toggle_selection(
        "0xc011ec7100000000000000000000000000000001-2",
        Collection::Staked,
    );
    manager.unstake_selected(&gate).await?;
    manager.store_mut().toggle_selection(
        "0xc011ec7100000000000000000000000000000001-1",
        Collection::Owned,
    );
    manager.store_mut().toggle_selection(
        "0xc011ec7100000000000000000000000000000001-2",
        Collection::Owned,
    );
    manager
        .store_mut()
        .commit_stake(Utc::now() - ChronoDuration::days(5));

    let mut ticker = interval(Duration::from_millis(200));
    for _ in 0..3 {
        ticker.tick().await;
        manager.recompute_rewards();
        let reward = manager.store().reward().clone();
        println!(
            "  rewards: claimable {} | daily rate {} | {} day(s) staked",
            reward.claimable, reward.daily_rate, reward.days_staked
        );
    }

    let claimed = manager.claim_rewards(&gate).await?;
    println!("  claimed {claimed}");
    drain_toasts(&mut manager);

    // The wallet switches to Bob; inventory follows
    manager
        .on_provider_event(WalletEvent::AccountsChanged(vec![BOB.to_string()]))
        .await;
    drain_toasts(&mut manager);
    render(&manager);

    // And finally the provider drops the session
    manager.on_provider_event(WalletEvent::Disconnected).await;
    drain_toasts(&mut manager);
    render(&manager);

    Ok(())
}
