//! Issuance ledger: the running token count, the supply cap and the
//! token id -> fighter table.
//!
//! Every write here happens inside the calling contract invocation, so a
//! failed mint leaves neither the count nor the table touched.

use soroban_sdk::{contracttype, Address, Env, String};

use crate::error::PunchError;
use crate::rarity::{Rarity, RarityTier};
use crate::stats::{FighterClass, StatVector};
use crate::storage::{DataKey, MAX_SUPPLY, RECORD_TTL_EXTEND, RECORD_TTL_THRESHOLD};

/// Minted fighter record.
///
/// `rarity` is `Pending` only while an oracle roll is outstanding; in that
/// window `stats` holds the unadjusted base stats.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fighter {
    pub token_id: u64,
    pub class: FighterClass,
    pub nickname: String,
    pub rarity: Rarity,
    pub stats: StatVector,
    pub owner: Address,
    pub minted_at: u64,
}

impl Fighter {
    pub fn is_finalized(&self) -> bool {
        self.rarity != Rarity::Pending
    }
}

pub fn current_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::TokenCount)
        .unwrap_or(0)
}

/// Id the next allocation will receive, or `SupplyExhausted`.
pub fn next_token_id(env: &Env) -> Result<u64, PunchError> {
    let count = current_count(env);
    if count >= MAX_SUPPLY {
        return Err(PunchError::SupplyExhausted);
    }
    count.checked_add(1).ok_or(PunchError::Overflow)
}

pub fn record(env: &Env, token_id: u64) -> Result<Fighter, PunchError> {
    if token_id == 0 || token_id > current_count(env) {
        return Err(PunchError::NotFound);
    }
    env.storage()
        .persistent()
        .get(&DataKey::Fighter(token_id))
        .ok_or(PunchError::StorageCorrupted)
}

/// Issue the next token id and store its fighter.
///
/// With `rarity` rolled the stats are finalized now; with `Pending` the record
/// waits for `finalize`.
pub fn allocate(
    env: &Env,
    class: FighterClass,
    nickname: String,
    rarity: Rarity,
    owner: Address,
    minted_at: u64,
) -> Result<Fighter, PunchError> {
    let token_id = next_token_id(env)?;

    let base = class.base_stats();
    let stats = match rarity {
        Rarity::Rolled(tier) => base.with_bonus(tier.adjustment())?,
        Rarity::Pending => base,
    };

    let fighter = Fighter {
        token_id,
        class,
        nickname,
        rarity,
        stats,
        owner,
        minted_at,
    };

    store(env, &fighter);
    env.storage().instance().set(&DataKey::TokenCount, &token_id);

    Ok(fighter)
}

/// Apply the rolled tier to a pending fighter.
///
/// Returns `false` without touching the record if it was already finalized.
pub fn finalize(env: &Env, token_id: u64, tier: RarityTier) -> Result<bool, PunchError> {
    let mut fighter = record(env, token_id)?;
    if fighter.is_finalized() {
        return Ok(false);
    }

    fighter.stats = fighter.class.base_stats().with_bonus(tier.adjustment())?;
    fighter.rarity = Rarity::Rolled(tier);
    store(env, &fighter);

    Ok(true)
}

fn store(env: &Env, fighter: &Fighter) {
    let key = DataKey::Fighter(fighter.token_id);
    let storage = env.storage().persistent();
    storage.set(&key, fighter);
    storage.extend_ttl(&key, RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Punchathlon;
    use soroban_sdk::testutils::Address as _;

    const NICKNAMES: [&str; 5] = ["fighter-1", "fighter-2", "fighter-3", "fighter-4", "fighter-5"];

    fn setup() -> (Env, Address) {
        let env = Env::default();
        let admin = Address::generate(&env);
        let fee_token = Address::generate(&env);
        let contract_id = env.register(Punchathlon, (admin, fee_token));
        (env, contract_id)
    }

    #[test]
    fn test_allocate_assigns_sequential_ids() {
        let (env, contract_id) = setup();
        let owner = Address::generate(&env);
        env.as_contract(&contract_id, || {
            assert_eq!(current_count(&env), 0);
            for (i, class) in FighterClass::ALL.iter().enumerate() {
                let fighter = allocate(
                    &env,
                    *class,
                    String::from_str(&env, NICKNAMES[i]),
                    Rarity::Rolled(RarityTier::Common),
                    owner.clone(),
                    42,
                )
                .unwrap();
                assert_eq!(fighter.token_id, i as u64 + 1);
            }
            assert_eq!(current_count(&env), 5);
            for (i, class) in FighterClass::ALL.iter().enumerate() {
                let fighter = record(&env, i as u64 + 1).unwrap();
                assert_eq!(fighter.class, *class);
                assert_eq!(fighter.nickname, String::from_str(&env, NICKNAMES[i]));
            }
        });
    }

    #[test]
    fn test_allocate_applies_rarity_to_primary_slots() {
        let (env, contract_id) = setup();
        let owner = Address::generate(&env);
        env.as_contract(&contract_id, || {
            let fighter = allocate(
                &env,
                FighterClass::KickBoxing,
                String::from_str(&env, "Rocky"),
                Rarity::Rolled(RarityTier::Legendary),
                owner.clone(),
                42,
            )
            .unwrap();
            assert_eq!(fighter.stats.as_array(), [100, 80, 60, 0, 1, 0]);
            assert!(fighter.is_finalized());
        });
    }

    #[test]
    fn test_record_out_of_range() {
        let (env, contract_id) = setup();
        env.as_contract(&contract_id, || {
            assert_eq!(record(&env, 0), Err(PunchError::NotFound));
            assert_eq!(record(&env, 1), Err(PunchError::NotFound));
        });
    }

    #[test]
    fn test_allocate_at_cap() {
        let (env, contract_id) = setup();
        let owner = Address::generate(&env);
        env.as_contract(&contract_id, || {
            env.storage().instance().set(&DataKey::TokenCount, &MAX_SUPPLY);
            let result = allocate(
                &env,
                FighterClass::Judo,
                String::from_str(&env, "late"),
                Rarity::Pending,
                owner.clone(),
                0,
            );
            assert_eq!(result, Err(PunchError::SupplyExhausted));
            assert_eq!(current_count(&env), MAX_SUPPLY);
        });
    }

    #[test]
    fn test_finalize_runs_once() {
        let (env, contract_id) = setup();
        let owner = Address::generate(&env);
        env.as_contract(&contract_id, || {
            let pending = allocate(
                &env,
                FighterClass::MuayThai,
                String::from_str(&env, "pending"),
                Rarity::Pending,
                owner.clone(),
                7,
            )
            .unwrap();
            assert!(!pending.is_finalized());
            assert_eq!(pending.stats, FighterClass::MuayThai.base_stats());

            assert_eq!(finalize(&env, 1, RarityTier::Rare), Ok(true));
            assert_eq!(finalize(&env, 1, RarityTier::Legendary), Ok(false));

            let fighter = record(&env, 1).unwrap();
            assert_eq!(fighter.rarity, Rarity::Rolled(RarityTier::Rare));
            assert_eq!(fighter.stats.as_array(), [50, 90, 70, 0, 4, 0]);
        });
    }
}
