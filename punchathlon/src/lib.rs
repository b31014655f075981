#![no_std]

mod error;
mod events;
mod ledger;
mod randomness;
mod rarity;
mod stats;
mod storage;

pub use error::PunchError;
pub use ledger::Fighter;
pub use rarity::{Rarity, RarityTier};
pub use stats::{FighterClass, StatVector};

use events::FighterEvents;
use randomness::{ConfiguredSource, OracleRequest, RarityDraw, RaritySource};
use soroban_sdk::{contract, contractimpl, log, token, Address, Bytes, Env, String};
use storage::{DataKey, MAX_SUPPLY, MINT_FEE, RECORD_TTL_EXTEND, RECORD_TTL_THRESHOLD};
#[cfg(test)]
use storage::SCALE_FACTOR;

/// Punchathlon Fighter Contract
///
/// Mints collectible fighters against a fixed fee, up to a hard supply cap.
///
/// Key features:
/// - Five fighter classes, each with a fixed base stat vector
/// - Rarity rolled at mint time adds a bonus to the primary stats
/// - Rarity comes from ledger entropy, or from an external oracle when one
///   is configured (the fighter is finalized when the oracle answers)
/// - Fees are retained by the contract until the admin withdraws them
#[contract]
pub struct Punchathlon;

#[contractimpl]
impl Punchathlon {
    /// Constructor: called once at deployment.
    ///
    /// # Arguments
    /// * `admin` - Address that can withdraw fees and configure the rarity oracle
    /// * `fee_token` - Token contract the mint fee is paid in (e.g., native XLM SAC)
    pub fn __constructor(env: Env, admin: Address, fee_token: Address) {
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::FeeToken, &fee_token);
        env.storage().instance().set(&DataKey::TokenCount, &0u64);
        env.storage().instance().set(&DataKey::FeesCollected, &0i128);
    }

    /// Mint a new fighter.
    ///
    /// # Arguments
    /// * `caller` - Minter and owner of the new fighter (must authorize)
    /// * `class` - Fighter class name, e.g. "JiuJitsu" (case-sensitive)
    /// * `nickname` - Free-form name stored with the fighter
    /// * `payment` - Amount the caller offers. Only `MINT_FEE` is pulled;
    ///               any excess stays with the caller.
    ///
    /// # Returns
    /// Token id of the new fighter
    pub fn mint(
        env: Env,
        caller: Address,
        class: String,
        nickname: String,
        payment: i128,
    ) -> Result<u64, PunchError> {
        let class = stats::parse_class(&class)?;
        if payment < MINT_FEE {
            return Err(PunchError::InsufficientPayment);
        }
        let token_id = ledger::next_token_id(&env)?;

        caller.require_auth();

        // Note: token_client.transfer() panics if the caller cannot cover the fee.
        // The panic rolls back the whole mint, so nothing is issued unpaid.
        let fee_token = Self::stored_fee_token(&env)?;
        let token_client = token::Client::new(&env, &fee_token);
        token_client.transfer(&caller, &env.current_contract_address(), &MINT_FEE);

        let collected = Self::stored_fees_collected(&env)?
            .checked_add(MINT_FEE)
            .ok_or(PunchError::Overflow)?;
        env.storage()
            .instance()
            .set(&DataKey::FeesCollected, &collected);

        let rarity = match ConfiguredSource::load(&env).draw(&env, token_id) {
            RarityDraw::Ready(tier) => Rarity::Rolled(tier),
            RarityDraw::Deferred => Rarity::Pending,
        };

        let fighter = ledger::allocate(
            &env,
            class,
            nickname,
            rarity,
            caller.clone(),
            env.ledger().timestamp(),
        )?;

        env.storage()
            .instance()
            .extend_ttl(RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND);

        log!(&env, "fighter minted", fighter.token_id, caller);
        FighterEvents::minted(&env, fighter.token_id, class, &caller);

        Ok(fighter.token_id)
    }

    /// Deliver the oracle's random word for a pending fighter.
    ///
    /// Safe to call more than once: a fighter that is already finalized is
    /// left as it is and the call succeeds.
    ///
    /// # Arguments
    /// * `oracle` - Must match the oracle the roll was requested from
    /// * `token_id` - Fighter awaiting rarity
    /// * `random_word` - Entropy supplied by the oracle
    pub fn fulfill_rarity(
        env: Env,
        oracle: Address,
        token_id: u64,
        random_word: u64,
    ) -> Result<(), PunchError> {
        let fighter = ledger::record(&env, token_id)?;
        if fighter.is_finalized() {
            return Ok(());
        }

        let requested =
            randomness::pending_oracle(&env, token_id).ok_or(PunchError::StorageCorrupted)?;
        if oracle != requested {
            return Err(PunchError::Unauthorized);
        }
        oracle.require_auth();

        let tier = RarityTier::from_entropy(random_word);
        ledger::finalize(&env, token_id, tier)?;
        randomness::clear_pending(&env, token_id);

        log!(&env, "rarity resolved", token_id, random_word);
        FighterEvents::rarity_resolved(&env, token_id, tier);

        Ok(())
    }

    /// Re-issue a pending roll to another oracle (admin only).
    ///
    /// Covers an oracle that stopped answering: the fighter stays pending
    /// and only `oracle` can fulfill it from now on.
    ///
    /// # Arguments
    /// * `admin` - Must match the admin set at deployment
    /// * `token_id` - Fighter still awaiting rarity
    /// * `oracle` - Oracle that takes over the roll
    pub fn reassign_pending_oracle(
        env: Env,
        admin: Address,
        token_id: u64,
        oracle: Address,
    ) -> Result<(), PunchError> {
        Self::require_admin(&env, &admin)?;
        admin.require_auth();

        let fighter = ledger::record(&env, token_id)?;
        if fighter.is_finalized() {
            return Err(PunchError::NotPending);
        }

        OracleRequest { oracle }.draw(&env, token_id);
        log!(&env, "rarity request reassigned", token_id);

        Ok(())
    }

    /// Set or clear the rarity oracle (admin only).
    ///
    /// With an oracle set, new mints wait for `fulfill_rarity`; with `None`
    /// they roll from ledger entropy. Pending fighters keep the oracle they
    /// were requested from.
    pub fn set_rarity_oracle(
        env: Env,
        admin: Address,
        oracle: Option<Address>,
    ) -> Result<(), PunchError> {
        Self::require_admin(&env, &admin)?;
        admin.require_auth();

        match oracle {
            Some(oracle) => env.storage().instance().set(&DataKey::RarityOracle, &oracle),
            None => env.storage().instance().remove(&DataKey::RarityOracle),
        }

        Ok(())
    }

    /// Withdraw every retained mint fee (admin only).
    ///
    /// # Arguments
    /// * `admin` - Must match the admin set at deployment
    /// * `to` - Recipient of the fees
    ///
    /// # Returns
    /// Amount withdrawn
    pub fn withdraw_fees(env: Env, admin: Address, to: Address) -> Result<i128, PunchError> {
        Self::require_admin(&env, &admin)?;
        admin.require_auth();

        let collected = Self::stored_fees_collected(&env)?;
        if collected <= 0 {
            return Err(PunchError::NothingToWithdraw);
        }

        env.storage().instance().set(&DataKey::FeesCollected, &0i128);

        let fee_token = Self::stored_fee_token(&env)?;
        let token_client = token::Client::new(&env, &fee_token);
        token_client.transfer(&env.current_contract_address(), &to, &collected);

        log!(&env, "fees withdrawn", to, collected);
        FighterEvents::fees_withdrawn(&env, &to, collected);

        Ok(collected)
    }

    /// Hard cap on issued fighters.
    pub fn get_max_supply(_env: Env) -> u64 {
        MAX_SUPPLY
    }

    /// Mint fee, scaled by 10^7 (100_000 = 0.01).
    pub fn get_mint_fee(_env: Env) -> i128 {
        MINT_FEE
    }

    /// Number of fighters issued so far; also the highest token id.
    pub fn get_token_count(env: Env) -> u64 {
        ledger::current_count(&env)
    }

    /// Base stats of a class, looked up by name.
    pub fn get_base_stats(_env: Env, class: String) -> Result<StatVector, PunchError> {
        Ok(stats::parse_class(&class)?.base_stats())
    }

    /// Stat adjustment for a wire-encoded rarity tier name.
    /// Unrecognized identifiers get the fallback adjustment.
    pub fn get_rarity_adjustment(_env: Env, tier: Bytes) -> u32 {
        rarity::adjustment_for(&tier)
    }

    /// Get a minted fighter.
    pub fn get_fighter(env: Env, token_id: u64) -> Result<Fighter, PunchError> {
        ledger::record(&env, token_id)
    }

    /// Get the admin address.
    pub fn get_admin(env: Env) -> Result<Address, PunchError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(PunchError::StorageCorrupted)
    }

    /// Get the fee token address.
    pub fn get_fee_token(env: Env) -> Result<Address, PunchError> {
        Self::stored_fee_token(&env)
    }

    /// Get the rarity oracle, if one is configured.
    pub fn get_rarity_oracle(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::RarityOracle)
    }

    /// Fees held by the contract and not yet withdrawn.
    pub fn get_fees_collected(env: Env) -> Result<i128, PunchError> {
        Self::stored_fees_collected(&env)
    }

    // --- Internal helpers ---

    fn stored_fee_token(env: &Env) -> Result<Address, PunchError> {
        env.storage()
            .instance()
            .get(&DataKey::FeeToken)
            .ok_or(PunchError::StorageCorrupted)
    }

    fn stored_fees_collected(env: &Env) -> Result<i128, PunchError> {
        env.storage()
            .instance()
            .get(&DataKey::FeesCollected)
            .ok_or(PunchError::StorageCorrupted)
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), PunchError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(PunchError::StorageCorrupted)?;
        if *caller != admin {
            return Err(PunchError::Unauthorized);
        }
        Ok(())
    }
}
