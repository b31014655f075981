//! Where a fighter's rarity comes from.
//!
//! `LedgerEntropy` resolves during the mint itself. `OracleRequest` defers
//! the roll to an external oracle that later calls `fulfill_rarity`. The
//! ledger and the mint entry point work the same either way; only the
//! `RarityDraw` they get back differs.

use soroban_sdk::{Address, Env};

use crate::events::FighterEvents;
use crate::rarity::RarityTier;
use crate::storage::{DataKey, RECORD_TTL_EXTEND, RECORD_TTL_THRESHOLD};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RarityDraw {
    /// Tier known now; the fighter is stored finalized.
    Ready(RarityTier),
    /// Tier arrives later through the oracle callback.
    Deferred,
}

pub trait RaritySource {
    fn draw(&self, env: &Env, token_id: u64) -> RarityDraw;
}

/// Host PRNG, seeded per invocation by the network.
pub struct LedgerEntropy;

impl RaritySource for LedgerEntropy {
    fn draw(&self, env: &Env, _token_id: u64) -> RarityDraw {
        let entropy: u64 = env.prng().gen();
        RarityDraw::Ready(RarityTier::from_entropy(entropy))
    }
}

/// Asks `oracle` for a random word; the request is the published event.
/// The oracle is pinned per token, so later changes to the contract's oracle
/// setting do not strand pending fighters.
pub struct OracleRequest {
    pub oracle: Address,
}

impl RaritySource for OracleRequest {
    fn draw(&self, env: &Env, token_id: u64) -> RarityDraw {
        let key = DataKey::PendingRarity(token_id);
        env.storage().persistent().set(&key, &self.oracle);
        env.storage()
            .persistent()
            .extend_ttl(&key, RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND);

        FighterEvents::rarity_requested(env, token_id, &self.oracle);
        RarityDraw::Deferred
    }
}

/// Oracle a pending roll for `token_id` was requested from.
pub fn pending_oracle(env: &Env, token_id: u64) -> Option<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::PendingRarity(token_id))
}

pub fn clear_pending(env: &Env, token_id: u64) {
    env.storage()
        .persistent()
        .remove(&DataKey::PendingRarity(token_id));
}

/// Source selected by the contract's current oracle setting.
pub enum ConfiguredSource {
    Ledger(LedgerEntropy),
    Oracle(OracleRequest),
}

impl ConfiguredSource {
    pub fn load(env: &Env) -> Self {
        match env.storage().instance().get::<_, Address>(&DataKey::RarityOracle) {
            Some(oracle) => ConfiguredSource::Oracle(OracleRequest { oracle }),
            None => ConfiguredSource::Ledger(LedgerEntropy),
        }
    }
}

impl RaritySource for ConfiguredSource {
    fn draw(&self, env: &Env, token_id: u64) -> RarityDraw {
        match self {
            ConfiguredSource::Ledger(source) => source.draw(env, token_id),
            ConfiguredSource::Oracle(source) => source.draw(env, token_id),
        }
    }
}
