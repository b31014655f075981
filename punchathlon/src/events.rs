use soroban_sdk::{symbol_short, Address, Env};

use crate::rarity::RarityTier;
use crate::stats::FighterClass;

/// Events published by the Punchathlon contract.
pub struct FighterEvents;

impl FighterEvents {
    /// A new fighter was issued to `owner`.
    pub fn minted(env: &Env, token_id: u64, class: FighterClass, owner: &Address) {
        let topics = (symbol_short!("minted"), token_id);
        env.events().publish(topics, (class, owner.clone()));
    }

    /// Rarity for `token_id` is waiting on the oracle.
    pub fn rarity_requested(env: &Env, token_id: u64, oracle: &Address) {
        let topics = (symbol_short!("rarity"), symbol_short!("request"));
        env.events().publish(topics, (token_id, oracle.clone()));
    }

    /// Oracle delivered rarity for a pending fighter.
    pub fn rarity_resolved(env: &Env, token_id: u64, tier: RarityTier) {
        let topics = (symbol_short!("rarity"), symbol_short!("resolved"));
        env.events().publish(topics, (token_id, tier));
    }

    pub fn fees_withdrawn(env: &Env, to: &Address, amount: i128) {
        let topics = (symbol_short!("fees"), symbol_short!("withdrawn"));
        env.events().publish(topics, (to.clone(), amount));
    }
}
