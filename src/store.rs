//! Inventory & selection bookkeeping: the two asset collections, the two
//! selection sets scoped to them, and the transitions between collections.
//!
//! Invariants held here:
//! - an asset id appears in at most one of `owned` / `staked`;
//! - `staked_at` is set exactly while the asset sits in `staked`;
//! - each selection set is a subset of its collection's current ids.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{Asset, RewardSnapshot};
use crate::rewards::RewardModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Owned,
    Staked,
}

pub struct InventoryStore {
    owned: Vec<Asset>,
    staked: Vec<Asset>,
    owned_selection: HashSet<String>,
    staked_selection: HashSet<String>,
    claimed_total: Decimal,
    reward: RewardSnapshot,
    model: Arc<dyn RewardModel>,
}

impl InventoryStore {
    pub fn new(model: Arc<dyn RewardModel>) -> Self {
        Self {
            owned: Vec::new(),
            staked: Vec::new(),
            owned_selection: HashSet::new(),
            staked_selection: HashSet::new(),
            claimed_total: Decimal::ZERO,
            reward: RewardSnapshot::zero(),
            model,
        }
    }

    // ---- accessors ----

    pub fn owned(&self) -> &[Asset] {
        &self.owned
    }

    pub fn staked(&self) -> &[Asset] {
        &self.staked
    }

    pub fn reward(&self) -> &RewardSnapshot {
        &self.reward
    }

    pub fn is_selected(&self, asset_id: &str, collection: Collection) -> bool {
        self.selection(collection).contains(asset_id)
    }

    pub fn selection_count(&self, collection: Collection) -> usize {
        self.selection(collection).len()
    }

    pub fn selected_ids(&self, collection: Collection) -> Vec<String> {
        let inventory = match collection {
            Collection::Owned => &self.owned,
            Collection::Staked => &self.staked,
        };
        // Inventory order, not hash order, so gate calls and logs are stable
        inventory
            .iter()
            .filter(|a| self.selection(collection).contains(&a.id))
            .map(|a| a.id.clone())
            .collect()
    }

    fn selection(&self, collection: Collection) -> &HashSet<String> {
        match collection {
            Collection::Owned => &self.owned_selection,
            Collection::Staked => &self.staked_selection,
        }
    }

    // ---- mutations ----

    /// Installs a fresh discovery result. Assets that were locally moved to
    /// the staked collection stay there even if the chain still reports
    /// them as owned; stale selection ids are pruned.
    pub fn replace_owned(&mut self, assets: Vec<Asset>) {
        let staked_ids: HashSet<&str> = self.staked.iter().map(|a| a.id.as_str()).collect();
        self.owned = assets
            .into_iter()
            .filter(|a| !staked_ids.contains(a.id.as_str()))
            .map(|mut a| {
                a.staked_at = None;
                a
            })
            .collect();

        let live: HashSet<&str> = self.owned.iter().map(|a| a.id.as_str()).collect();
        self.owned_selection.retain(|id| live.contains(id.as_str()));
    }

    /// Tears everything down (disconnect / zero-accounts).
    pub fn clear(&mut self) {
        self.owned.clear();
        self.staked.clear();
        self.owned_selection.clear();
        self.staked_selection.clear();
        self.claimed_total = Decimal::ZERO;
        self.reward = RewardSnapshot::zero();
    }

    /// Flips selection membership. Silently ignores ids that are not in the
    /// target collection's inventory, so selection can never diverge from
    /// what is actually displayed.
    pub fn toggle_selection(&mut self, asset_id: &str, collection: Collection) {
        let (inventory, selection) = match collection {
            Collection::Owned => (&self.owned, &mut self.owned_selection),
            Collection::Staked => (&self.staked, &mut self.staked_selection),
        };
        if !inventory.iter().any(|a| a.id == asset_id) {
            tracing::debug!("ignoring selection of unknown asset {}", asset_id);
            return;
        }
        if !selection.remove(asset_id) {
            selection.insert(asset_id.to_string());
        }
    }

    /// Moves every selected owned asset into the staked collection,
    /// stamping `staked_at`. Returns the number of assets moved. The
    /// caller is responsible for gating this behind an authoritative
    /// transaction first.
    pub fn commit_stake(&mut self, now: DateTime<Utc>) -> usize {
        let selected = std::mem::take(&mut self.owned_selection);
        let mut moved = 0;
        let mut remaining = Vec::with_capacity(self.owned.len());
        for mut asset in self.owned.drain(..) {
            if selected.contains(&asset.id) {
                asset.staked_at = Some(now);
                self.staked.push(asset);
                moved += 1;
            } else {
                remaining.push(asset);
            }
        }
        self.owned = remaining;
        self.recompute_rewards(now);
        moved
    }

    /// Inverse of [`commit_stake`]: clears `staked_at` on the way back.
    pub fn commit_unstake(&mut self, now: DateTime<Utc>) -> usize {
        let selected = std::mem::take(&mut self.staked_selection);
        let mut moved = 0;
        let mut remaining = Vec::with_capacity(self.staked.len());
        for mut asset in self.staked.drain(..) {
            if selected.contains(&asset.id) {
                asset.staked_at = None;
                self.owned.push(asset);
                moved += 1;
            } else {
                remaining.push(asset);
            }
        }
        self.staked = remaining;
        self.recompute_rewards(now);
        moved
    }

    /// Consumes a confirmed claim amount from the running estimate.
    pub fn commit_claim(&mut self, amount: Decimal, now: DateTime<Utc>) {
        self.claimed_total += amount;
        self.recompute_rewards(now);
    }

    pub fn recompute_rewards(&mut self, now: DateTime<Utc>) {
        self.reward = self.model.snapshot(&self.staked, self.claimed_total, now);
    }

    #[cfg(test)]
    fn assert_invariants(&self) {
        let owned_ids: HashSet<&str> = self.owned.iter().map(|a| a.id.as_str()).collect();
        let staked_ids: HashSet<&str> = self.staked.iter().map(|a| a.id.as_str()).collect();
        assert!(owned_ids.is_disjoint(&staked_ids), "collections overlap");
        assert!(self.owned.iter().all(|a| a.staked_at.is_none()));
        assert!(self.staked.iter().all(|a| a.staked_at.is_some()));
        assert!(self
            .owned_selection
            .iter()
            .all(|id| owned_ids.contains(id.as_str())));
        assert!(self
            .staked_selection
            .iter()
            .all(|id| staked_ids.contains(id.as_str())));
    }
}
