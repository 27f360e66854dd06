//! Connection lifecycle. `ConnectionManager` is the single owner of the
//! connection state and of the inventory store; every transition, whether
//! a user intent or an externally-raised provider event, funnels through
//! its methods, one logical transition at a time.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::chains::chain_label;
use crate::config::Config;
use crate::discovery::{self, DiscoveryStrategy};
use crate::error::{Result, VaultError};
use crate::gateway::TransactionGate;
use crate::models::{Asset, ConnectionState, ConnectionStatus};
use crate::notify::{Notice, Notifier};
use crate::provider::{WalletEvent, WalletProvider};
use crate::rewards::RewardModel;
use crate::store::{Collection, InventoryStore};
use crate::utils::{normalize_address, shorten_address};
use crate::view::{self, ViewModel};

/// Identity captured when a discovery run starts. The run's result is only
/// applied if the epoch still matches at completion; anything else is a
/// stale result and is silently discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryTicket {
    epoch: u64,
    account: String,
    chain_id: u64,
}

pub struct ConnectionManager {
    provider: Arc<dyn WalletProvider>,
    strategy: Arc<dyn DiscoveryStrategy>,
    state: ConnectionState,
    store: InventoryStore,
    notifier: Notifier,
    // Bumped on every identity change; see DiscoveryTicket
    epoch: u64,
    discovering: bool,
    min_claim: Decimal,
}

impl ConnectionManager {
    pub fn new(
        provider: Arc<dyn WalletProvider>,
        strategy: Arc<dyn DiscoveryStrategy>,
        reward_model: Arc<dyn RewardModel>,
        min_claim: Decimal,
    ) -> Self {
        Self {
            provider,
            strategy,
            state: ConnectionState::disconnected(),
            store: InventoryStore::new(reward_model),
            notifier: Notifier::new(),
            epoch: 0,
            discovering: false,
            min_claim,
        }
    }

    /// Wires a manager from configuration: discovery strategy per the
    /// indexer credential, flat-rate reward model.
    pub fn from_config(config: &Config, provider: Arc<dyn WalletProvider>) -> Result<Self> {
        let strategy = discovery::strategy_from_config(config)?;
        let model = Arc::new(crate::rewards::FlatRateModel::new(
            config.daily_rate_per_asset,
        ));
        Ok(Self::new(provider, strategy, model, config.min_claim))
    }

    // ---- accessors ----

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut InventoryStore {
        &mut self.store
    }

    pub fn is_discovering(&self) -> bool {
        self.discovering
    }

    /// Hands pending notices to the presentation layer.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notifier.drain()
    }

    /// Pure projection of the current state for rendering.
    pub fn view(&self) -> ViewModel {
        view::project(&self.state, &self.store, self.discovering, self.min_claim)
    }

    // ---- connection transitions ----

    /// Requests account access from the wallet. No-op while a connection
    /// attempt is already in flight or a session is established; allowed
    /// from `Error` so a rejected attempt stays retryable.
    pub async fn connect(&mut self) -> ConnectionStatus {
        if matches!(
            self.state.status,
            ConnectionStatus::Connecting | ConnectionStatus::Connected
        ) {
            tracing::debug!("connect ignored in state {:?}", self.state.status);
            return self.state.status;
        }

        self.state.status = ConnectionStatus::Connecting;
        self.state.last_error = None;
        self.notifier.info("Connecting wallet…");

        let accounts = match self.provider.request_accounts().await {
            Ok(accounts) => accounts,
            Err(VaultError::UserRejected) => {
                self.state.status = ConnectionStatus::Error;
                self.state.last_error = Some(VaultError::UserRejected.to_string());
                self.notifier.error("Connection rejected");
                return self.state.status;
            }
            Err(VaultError::ProviderUnavailable(detail)) => {
                self.state.status = ConnectionStatus::Disconnected;
                self.notifier
                    .error("No wallet found. Please install one to continue");
                tracing::warn!("wallet provider unavailable: {}", detail);
                return self.state.status;
            }
            Err(e) => {
                self.state.status = ConnectionStatus::Error;
                self.state.last_error = Some(e.to_string());
                self.notifier.error(format!("Connection failed: {e}"));
                return self.state.status;
            }
        };

        let Some(first) = accounts.first() else {
            self.state.status = ConnectionStatus::Disconnected;
            self.notifier.error("No accounts found");
            return self.state.status;
        };

        let account = match normalize_address(first) {
            Ok(account) => account,
            Err(e) => {
                self.state.status = ConnectionStatus::Error;
                self.state.last_error = Some(e.to_string());
                self.notifier.error("Wallet returned an unusable account");
                return self.state.status;
            }
        };

        let chain_id = match self.provider.chain_id().await {
            Ok(chain_id) => chain_id,
            Err(e) => {
                self.state.status = ConnectionStatus::Error;
                self.state.last_error = Some(e.to_string());
                self.notifier.error("Could not read the wallet's network");
                return self.state.status;
            }
        };

        self.state.status = ConnectionStatus::Connected;
        self.state.account = Some(account.clone());
        self.state.chain_id = Some(chain_id);
        self.epoch += 1;

        tracing::info!("connected {} on {}", account, chain_label(chain_id));
        self.notifier
            .success(format!("Connected: {}", shorten_address(&account)));

        self.run_discovery().await;
        self.state.status
    }

    /// Clears all connection, inventory, and selection state. Idempotent.
    pub fn disconnect(&mut self) {
        if self.state.status == ConnectionStatus::Disconnected && self.state.account.is_none() {
            return;
        }
        self.epoch += 1;
        self.discovering = false;
        self.state = ConnectionState::disconnected();
        self.store.clear();
        self.notifier.info("Wallet disconnected");
    }

    /// Entry point for the provider's subscription surface.
    pub async fn on_provider_event(&mut self, event: WalletEvent) {
        match event {
            WalletEvent::AccountsChanged(accounts) => self.on_accounts_changed(accounts).await,
            WalletEvent::ChainChanged(chain_id) => self.on_chain_changed(chain_id).await,
            WalletEvent::Disconnected => self.disconnect(),
        }
    }

    pub async fn on_accounts_changed(&mut self, accounts: Vec<String>) {
        if accounts.is_empty() {
            self.disconnect();
            return;
        }
        if !self.state.is_connected() {
            tracing::debug!("accounts-changed ignored while not connected");
            return;
        }
        let account = match normalize_address(&accounts[0]) {
            Ok(account) => account,
            Err(e) => {
                tracing::warn!("ignoring unusable account from provider: {}", e);
                return;
            }
        };
        if self.state.account.as_deref() == Some(account.as_str()) {
            return;
        }

        self.state.account = Some(account.clone());
        self.epoch += 1;
        // Both collections are scoped to the old identity
        self.store.clear();
        self.notifier
            .info(format!("Account changed: {}", shorten_address(&account)));
        self.run_discovery().await;
    }

    /// Asset sets are chain-scoped: a network switch keeps the session but
    /// invalidates the inventory and re-discovers in place.
    pub async fn on_chain_changed(&mut self, chain_id: u64) {
        if !self.state.is_connected() {
            tracing::debug!("chain-changed ignored while not connected");
            return;
        }
        if self.state.chain_id == Some(chain_id) {
            return;
        }
        self.state.chain_id = Some(chain_id);
        self.epoch += 1;
        // Asset sets are not valid across chains, staked ones included
        self.store.clear();
        self.notifier
            .info(format!("Network changed to {}", chain_label(chain_id)));
        self.run_discovery().await;
    }

    /// Manual refresh of the current account's inventory.
    pub async fn refresh(&mut self) {
        if !self.state.is_connected() {
            return;
        }
        self.run_discovery().await;
    }

    // ---- discovery coordination ----

    /// Captures the current identity for a discovery run. `None` unless a
    /// session with account and chain is established.
    pub fn begin_discovery(&mut self) -> Option<DiscoveryTicket> {
        let account = self.state.account.clone()?;
        let chain_id = self.state.chain_id?;
        if !self.state.is_connected() {
            return None;
        }
        self.discovering = true;
        Some(DiscoveryTicket {
            epoch: self.epoch,
            account,
            chain_id,
        })
    }

    /// Applies a completed discovery run. Results from a superseded epoch
    /// are discarded without touching the inventory; a failed run installs
    /// an empty inventory rather than leaving stale assets on display.
    pub fn apply_discovery(&mut self, ticket: DiscoveryTicket, result: Result<Vec<Asset>>) {
        if ticket.epoch != self.epoch {
            tracing::debug!(
                "discarding stale discovery for {} (epoch {} < {})",
                ticket.account,
                ticket.epoch,
                self.epoch
            );
            return;
        }
        self.discovering = false;

        match result {
            Ok(assets) => {
                tracing::info!(
                    "discovered {} assets for {} on {}",
                    assets.len(),
                    ticket.account,
                    chain_label(ticket.chain_id)
                );
                self.store.replace_owned(assets);
                self.store.recompute_rewards(Utc::now());
            }
            Err(e) => {
                tracing::warn!("discovery failed for {}: {}", ticket.account, e);
                self.store.replace_owned(Vec::new());
                self.notifier.error("Could not load your NFTs");
            }
        }
    }

    async fn run_discovery(&mut self) {
        let Some(ticket) = self.begin_discovery() else {
            return;
        };
        let result = self
            .strategy
            .discover(&ticket.account, ticket.chain_id)
            .await;
        self.apply_discovery(ticket, result);
    }

    // ---- gated inventory transitions ----

    /// Moves the selected owned assets into the staked collection, once the
    /// gate confirms the authoritative transaction. Local state is only
    /// committed after the gate resolves.
    pub async fn stake_selected(&mut self, gate: &dyn TransactionGate) -> Result<usize> {
        if !self.state.is_connected() {
            return Err(VaultError::NotConnected);
        }
        let ids = self.store.selected_ids(Collection::Owned);
        if ids.is_empty() {
            return Ok(0);
        }
        if let Err(e) = gate.confirm_stake(&ids).await {
            self.notifier.error(format!("Staking failed: {e}"));
            return Err(e);
        }
        let moved = self.store.commit_stake(Utc::now());
        self.notifier.success(format!("Staked {} NFT(s)", moved));
        Ok(moved)
    }

    pub async fn unstake_selected(&mut self, gate: &dyn TransactionGate) -> Result<usize> {
        if !self.state.is_connected() {
            return Err(VaultError::NotConnected);
        }
        let ids = self.store.selected_ids(Collection::Staked);
        if ids.is_empty() {
            return Ok(0);
        }
        if let Err(e) = gate.confirm_unstake(&ids).await {
            self.notifier.error(format!("Unstaking failed: {e}"));
            return Err(e);
        }
        let moved = self.store.commit_unstake(Utc::now());
        self.notifier.success(format!("Unstaked {} NFT(s)", moved));
        Ok(moved)
    }

    /// Consumes the current claimable estimate once the gate confirms the
    /// claim. Amounts under the dust threshold are a no-op.
    pub async fn claim_rewards(&mut self, gate: &dyn TransactionGate) -> Result<Decimal> {
        if !self.state.is_connected() {
            return Err(VaultError::NotConnected);
        }
        self.store.recompute_rewards(Utc::now());
        let claimable = self.store.reward().claimable;
        if claimable <= self.min_claim {
            return Ok(Decimal::ZERO);
        }
        if let Err(e) = gate.confirm_claim(claimable).await {
            self.notifier.error(format!("Claim failed: {e}"));
            return Err(e);
        }
        self.store.commit_claim(claimable, Utc::now());
        self.notifier
            .success(format!("Claimed {} tokens", claimable));
        Ok(claimable)
    }

    /// Re-derives the reward display from the staked set; hosts typically
    /// drive this from a timer.
    pub fn recompute_rewards(&mut self) {
        self.store.recompute_rewards(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::LocalGate;
    use crate::notify::NoticeLevel;
    use crate::rewards::FlatRateModel;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const ACCOUNT: &str = "0xa000000000000000000000000000000000000001";

    struct ScriptedProvider {
        responses: Mutex<VecDeque<Result<Vec<String>>>>,
        chain: u64,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<Result<Vec<String>>>, chain: u64) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                chain,
                calls: AtomicUsize::new(0),
            })
        }

        fn granting(chain: u64) -> Arc<Self> {
            Self::new(vec![Ok(vec![ACCOUNT.to_string()])], chain)
        }
    }

    #[async_trait]
    impl WalletProvider for ScriptedProvider {
        async fn request_accounts(&self) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(vec![ACCOUNT.to_string()]))
        }

        async fn chain_id(&self) -> Result<u64> {
            Ok(self.chain)
        }
    }

    type DiscoverFn = dyn Fn(&str, u64) -> Result<Vec<Asset>> + Send + Sync;

    struct StubStrategy(Box<DiscoverFn>);

    impl StubStrategy {
        fn returning(assets: Vec<Asset>) -> Arc<Self> {
            Arc::new(Self(Box::new(move |_, _| Ok(assets.clone()))))
        }

        fn per_chain() -> Arc<Self> {
            // Chain-scoped inventories: token id encodes the chain
            Arc::new(Self(Box::new(|_, chain| {
                Ok(vec![Asset::new("0xc1", &format!("{chain}"))])
            })))
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self(Box::new(|_, _| {
                Err(VaultError::Indexer("boom".to_string()))
            })))
        }
    }

    #[async_trait]
    impl DiscoveryStrategy for StubStrategy {
        async fn discover(&self, account: &str, chain_id: u64) -> Result<Vec<Asset>> {
            (self.0)(account, chain_id)
        }
    }

    struct RefusingGate;

    #[async_trait]
    impl TransactionGate for RefusingGate {
        async fn confirm_stake(&self, _: &[String]) -> Result<()> {
            Err(VaultError::GateRefused("stake reverted".to_string()))
        }
        async fn confirm_unstake(&self, _: &[String]) -> Result<()> {
            Err(VaultError::GateRefused("unstake reverted".to_string()))
        }
        async fn confirm_claim(&self, _: Decimal) -> Result<()> {
            Err(VaultError::GateRefused("claim reverted".to_string()))
        }
    }

    fn manager(
        provider: Arc<dyn WalletProvider>,
        strategy: Arc<dyn DiscoveryStrategy>,
    ) -> ConnectionManager {
        ConnectionManager::new(
            provider,
            strategy,
            Arc::new(FlatRateModel::new(Decimal::from(10))),
            Decimal::from_str("0.01").unwrap(),
        )
    }

    fn assets(tokens: &[&str]) -> Vec<Asset> {
        tokens.iter().map(|t| Asset::new("0xc1", t)).collect()
    }

    #[tokio::test]
    async fn connect_populates_state_and_inventory() {
        let mut m = manager(
            ScriptedProvider::granting(1),
            StubStrategy::returning(assets(&["1", "2"])),
        );

        let status = m.connect().await;

        assert_eq!(status, ConnectionStatus::Connected);
        assert_eq!(m.state().account.as_deref(), Some(ACCOUNT));
        assert_eq!(m.state().chain_id, Some(1));
        assert_eq!(m.store().owned().len(), 2);
        assert!(m
            .drain_notices()
            .iter()
            .any(|n| n.level == NoticeLevel::Success));
    }

    #[tokio::test]
    async fn rejected_connection_is_retryable() {
        let provider = ScriptedProvider::new(
            vec![Err(VaultError::UserRejected), Ok(vec![ACCOUNT.to_string()])],
            1,
        );
        let mut m = manager(provider, StubStrategy::returning(assets(&["1"])));

        assert_eq!(m.connect().await, ConnectionStatus::Error);
        assert!(m.state().last_error.is_some());
        let notices = m.drain_notices();
        assert!(notices.iter().any(|n| n.level == NoticeLevel::Error));

        // A second click succeeds
        assert_eq!(m.connect().await, ConnectionStatus::Connected);
    }

    #[tokio::test]
    async fn zero_accounts_leaves_disconnected() {
        let provider = ScriptedProvider::new(vec![Ok(vec![])], 1);
        let mut m = manager(provider, StubStrategy::returning(vec![]));

        assert_eq!(m.connect().await, ConnectionStatus::Disconnected);
        assert!(m.state().account.is_none());
    }

    #[tokio::test]
    async fn missing_provider_surfaces_install_notice() {
        let provider = ScriptedProvider::new(
            vec![Err(VaultError::ProviderUnavailable("no backend".to_string()))],
            1,
        );
        let mut m = manager(provider, StubStrategy::returning(vec![]));

        assert_eq!(m.connect().await, ConnectionStatus::Disconnected);
        assert!(m
            .drain_notices()
            .iter()
            .any(|n| n.level == NoticeLevel::Error && n.message.contains("install")));
    }

    #[tokio::test]
    async fn connect_while_connected_is_noop() {
        let provider = ScriptedProvider::granting(1);
        let mut m = manager(provider.clone(), StubStrategy::returning(vec![]));

        m.connect().await;
        m.connect().await;

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_accounts_event_clears_everything() {
        let mut m = manager(
            ScriptedProvider::granting(1),
            StubStrategy::returning(assets(&["1", "2"])),
        );
        m.connect().await;
        m.store_mut().toggle_selection("0xc1-1", Collection::Owned);

        m.on_accounts_changed(vec![]).await;

        assert_eq!(m.state().status, ConnectionStatus::Disconnected);
        assert!(m.store().owned().is_empty());
        assert!(m.store().staked().is_empty());
        assert_eq!(m.store().selection_count(Collection::Owned), 0);
    }

    #[tokio::test]
    async fn account_change_swaps_identity_and_rediscovers() {
        let strategy: Arc<StubStrategy> = Arc::new(StubStrategy(Box::new(|account, _| {
            let token = if account == ACCOUNT { "1" } else { "2" };
            Ok(vec![Asset::new("0xc1", token)])
        })));
        let mut m = manager(ScriptedProvider::granting(1), strategy);
        m.connect().await;
        assert_eq!(m.store().owned()[0].id, "0xc1-1");

        let other = "0xB000000000000000000000000000000000000002";
        m.on_accounts_changed(vec![other.to_string()]).await;

        assert_eq!(m.state().account.as_deref(), Some(other.to_lowercase().as_str()));
        assert_eq!(m.store().owned()[0].id, "0xc1-2");
    }

    #[tokio::test]
    async fn account_change_does_not_leak_staked_assets() {
        let mut m = manager(
            ScriptedProvider::granting(1),
            StubStrategy::returning(assets(&["1", "2"])),
        );
        m.connect().await;
        m.store_mut().toggle_selection("0xc1-1", Collection::Owned);
        m.stake_selected(&LocalGate).await.unwrap();
        assert_eq!(m.store().staked().len(), 1);

        let other = "0xB000000000000000000000000000000000000002";
        m.on_accounts_changed(vec![other.to_string()]).await;

        // The new account starts from its own discovery, nothing staked
        assert!(m.store().staked().is_empty());
        assert_eq!(m.store().owned().len(), 2);
    }

    #[tokio::test]
    async fn chain_change_rediscovers_in_place() {
        let mut m = manager(ScriptedProvider::granting(1), StubStrategy::per_chain());
        m.connect().await;
        assert_eq!(m.store().owned()[0].id, "0xc1-1");

        m.on_chain_changed(137).await;

        assert_eq!(m.state().status, ConnectionStatus::Connected);
        assert_eq!(m.state().chain_id, Some(137));
        assert_eq!(m.store().owned()[0].id, "0xc1-137");
    }

    #[tokio::test]
    async fn stale_discovery_result_is_discarded() {
        let mut m = manager(ScriptedProvider::granting(1), StubStrategy::per_chain());
        m.connect().await;

        // R1 starts for chain 1 and is still in flight…
        let r1 = m.begin_discovery().expect("connected");

        // …when the wallet switches chains; R2 runs to completion inside.
        m.on_chain_changed(137).await;
        assert_eq!(m.store().owned()[0].id, "0xc1-137");

        // R1 finally lands with chain-1 data; it must not win.
        m.apply_discovery(r1, Ok(assets(&["1"])));

        assert_eq!(m.store().owned().len(), 1);
        assert_eq!(m.store().owned()[0].id, "0xc1-137");
    }

    #[tokio::test]
    async fn discovery_failure_degrades_to_empty_with_notice() {
        let mut m = manager(ScriptedProvider::granting(1), StubStrategy::failing());
        m.connect().await;

        assert_eq!(m.state().status, ConnectionStatus::Connected);
        assert!(m.store().owned().is_empty());
        assert!(!m.is_discovering());
        assert!(m
            .drain_notices()
            .iter()
            .any(|n| n.level == NoticeLevel::Error));
    }

    #[tokio::test]
    async fn stake_and_unstake_roundtrip_through_gate() {
        let mut m = manager(
            ScriptedProvider::granting(1),
            StubStrategy::returning(assets(&["1", "2"])),
        );
        m.connect().await;
        m.store_mut().toggle_selection("0xc1-1", Collection::Owned);

        let moved = m.stake_selected(&LocalGate).await.unwrap();
        assert_eq!(moved, 1);
        assert_eq!(m.store().owned().len(), 1);
        assert_eq!(m.store().staked().len(), 1);
        assert!(m.store().staked()[0].staked_at.is_some());

        m.store_mut().toggle_selection("0xc1-1", Collection::Staked);
        let back = m.unstake_selected(&LocalGate).await.unwrap();
        assert_eq!(back, 1);
        assert_eq!(m.store().owned().len(), 2);
        assert!(m.store().staked().is_empty());
    }

    #[tokio::test]
    async fn gate_refusal_leaves_state_untouched() {
        let mut m = manager(
            ScriptedProvider::granting(1),
            StubStrategy::returning(assets(&["1"])),
        );
        m.connect().await;
        m.store_mut().toggle_selection("0xc1-1", Collection::Owned);

        let result = m.stake_selected(&RefusingGate).await;

        assert!(matches!(result, Err(VaultError::GateRefused(_))));
        assert_eq!(m.store().owned().len(), 1);
        assert!(m.store().staked().is_empty());
        assert!(m.store().is_selected("0xc1-1", Collection::Owned));
    }

    #[tokio::test]
    async fn stake_without_connection_is_rejected() {
        let mut m = manager(ScriptedProvider::granting(1), StubStrategy::returning(vec![]));
        assert!(matches!(
            m.stake_selected(&LocalGate).await,
            Err(VaultError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn dust_claim_is_a_noop() {
        let mut m = manager(
            ScriptedProvider::granting(1),
            StubStrategy::returning(assets(&["1"])),
        );
        m.connect().await;

        // Nothing staked, nothing claimable; the refusing gate proves the
        // gate is never consulted for dust.
        let claimed = m.claim_rewards(&RefusingGate).await.unwrap();
        assert_eq!(claimed, Decimal::ZERO);
    }

    #[tokio::test]
    async fn claim_consumes_the_estimate() {
        let mut m = manager(
            ScriptedProvider::granting(1),
            StubStrategy::returning(assets(&["1"])),
        );
        m.connect().await;
        m.store_mut().toggle_selection("0xc1-1", Collection::Owned);
        // Stake three days in the past so rewards have accrued
        m.store_mut()
            .commit_stake(Utc::now() - chrono::Duration::days(3));

        let claimed = m.claim_rewards(&LocalGate).await.unwrap();
        assert_eq!(claimed, Decimal::from(30));
        assert_eq!(m.store().reward().claimable, Decimal::ZERO);
    }

    #[tokio::test]
    async fn provider_disconnect_event_tears_down() {
        let mut m = manager(
            ScriptedProvider::granting(1),
            StubStrategy::returning(assets(&["1"])),
        );
        m.connect().await;

        m.on_provider_event(WalletEvent::Disconnected).await;

        assert_eq!(m.state().status, ConnectionStatus::Disconnected);
        assert!(m.store().owned().is_empty());
    }
}
