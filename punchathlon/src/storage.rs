use soroban_sdk::contracttype;

/// Storage keys for the contract.
/// Instance keys hold the contract-wide settings and counters,
/// `Fighter` entries live in persistent storage.
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// Admin address (can withdraw fees and configure the rarity oracle)
    Admin,
    /// Token contract the mint fee is paid in (e.g., native XLM SAC)
    FeeToken,
    /// Oracle that resolves rarity asynchronously; absent means ledger entropy
    RarityOracle,
    /// Number of fighters issued so far
    TokenCount,
    /// Mint fees held by the contract and not yet withdrawn (scaled)
    FeesCollected,
    /// Minted fighter record: Fighter(token_id)
    Fighter(u64),
    /// Oracle asked to roll rarity for a pending fighter: PendingRarity(token_id)
    PendingRarity(u64),
}

/// Scale factor of the fee token.
/// Stellar assets, including native XLM, carry 7 decimal places.
pub const SCALE_FACTOR: i128 = 10_000_000; // 10^7

/// Hard cap on issued fighters.
pub const MAX_SUPPLY: u64 = 1_000;

/// Mint fee: 0.01 of the fee token (scaled).
pub const MINT_FEE: i128 = SCALE_FACTOR / 100;

/// Ledgers in a day, at ~5 seconds per ledger.
pub const DAY_IN_LEDGERS: u32 = 17_280;

/// Fighter records are bumped back to ~120 days of TTL whenever they drop
/// under 30 days remaining. Kept below the network's max entry TTL.
pub const RECORD_TTL_THRESHOLD: u32 = 30 * DAY_IN_LEDGERS;
pub const RECORD_TTL_EXTEND: u32 = 120 * DAY_IN_LEDGERS;
