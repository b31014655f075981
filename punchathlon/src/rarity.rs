//! Rarity tiers, their stat adjustments, and the mapping from raw entropy
//! to a tier.
//!
//! Tier identifiers arrive as opaque bytes. Both the bare UTF-8 name and the
//! name wrapped in an ABI `bytes` envelope are accepted. Lookup never fails:
//! anything unrecognised gets `FALLBACK_ADJUSTMENT`.

use soroban_sdk::{contracttype, Bytes};

/// ABI word size.
const WORD: u32 = 32;

/// Longest known tier name is "Legendary"; the buffer leaves some slack.
const MAX_TIER_NAME: usize = 16;

/// Adjustment returned for identifiers outside the known tiers.
pub const FALLBACK_ADJUSTMENT: u32 = 0;

/// Entropy is reduced modulo this before being bucketed.
pub const ROLL_SPAN: u64 = 100;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RarityTier {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Legendary = 3,
}

/// Rarity state of a minted fighter.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rarity {
    /// Oracle roll outstanding.
    Pending,
    Rolled(RarityTier),
}

impl Rarity {
    pub fn tier(self) -> Option<RarityTier> {
        match self {
            Rarity::Pending => None,
            Rarity::Rolled(tier) => Some(tier),
        }
    }
}

impl RarityTier {
    /// Case-sensitive lookup by display name.
    pub fn from_name(name: &[u8]) -> Option<RarityTier> {
        match name {
            b"Common" => Some(RarityTier::Common),
            b"Uncommon" => Some(RarityTier::Uncommon),
            b"Rare" => Some(RarityTier::Rare),
            b"Legendary" => Some(RarityTier::Legendary),
            _ => None,
        }
    }

    /// Additive bonus applied to every primary stat.
    pub fn adjustment(self) -> u32 {
        match self {
            RarityTier::Common => 0,
            RarityTier::Uncommon => 5,
            RarityTier::Rare => 10,
            RarityTier::Legendary => 20,
        }
    }

    /// Exclusive upper bound of this tier's bucket in `0..ROLL_SPAN`.
    /// Common 60%, Uncommon 25%, Rare 10%, Legendary 5%.
    fn roll_ceiling(self) -> u64 {
        match self {
            RarityTier::Common => 60,
            RarityTier::Uncommon => 85,
            RarityTier::Rare => 95,
            RarityTier::Legendary => ROLL_SPAN,
        }
    }

    /// Deterministic entropy -> tier mapping.
    pub fn from_entropy(entropy: u64) -> RarityTier {
        let roll = entropy % ROLL_SPAN;
        [RarityTier::Common, RarityTier::Uncommon, RarityTier::Rare]
            .into_iter()
            .find(|tier| roll < tier.roll_ceiling())
            .unwrap_or(RarityTier::Legendary)
    }
}

/// Adjustment for a wire-encoded tier identifier.
pub fn adjustment_for(identifier: &Bytes) -> u32 {
    decode_tier(identifier)
        .map(RarityTier::adjustment)
        .unwrap_or(FALLBACK_ADJUSTMENT)
}

/// Decode a tier identifier, unwrapping an ABI `bytes` envelope if present.
pub fn decode_tier(identifier: &Bytes) -> Option<RarityTier> {
    let name = abi_payload(identifier).unwrap_or_else(|| identifier.clone());
    let len = name.len() as usize;
    if len > MAX_TIER_NAME {
        return None;
    }
    let mut buf = [0u8; MAX_TIER_NAME];
    name.copy_into_slice(&mut buf[..len]);
    RarityTier::from_name(&buf[..len])
}

/// Payload of `abi.encode(bytes)`: offset word (0x20), length word, then the
/// zero-padded data. Returns `None` when the input is not such an envelope.
fn abi_payload(raw: &Bytes) -> Option<Bytes> {
    if raw.len() < 2 * WORD || raw.len() % WORD != 0 {
        return None;
    }
    if read_word(raw, 0)? != WORD {
        return None;
    }
    let len = read_word(raw, WORD)?;
    let start = 2 * WORD;
    let end = start.checked_add(len)?;
    if end > raw.len() {
        return None;
    }
    Some(raw.slice(start..end))
}

/// Big-endian word at `at`, if it fits in a u32.
fn read_word(raw: &Bytes, at: u32) -> Option<u32> {
    let mut value: u32 = 0;
    for i in at..at + WORD {
        let byte = raw.get(i)?;
        if i < at + WORD - 4 {
            if byte != 0 {
                return None;
            }
        } else {
            value = (value << 8) | byte as u32;
        }
    }
    Some(value)
}
