//! Fighter classes and their base stat table.
//!
//! The table is compiled into the contract, so every deployment and every
//! invocation sees the same vectors.

use soroban_sdk::{contracttype, String};

use crate::error::PunchError;

/// Longest accepted class name. Anything longer cannot match and is
/// rejected before it is copied out of the host.
const MAX_CLASS_NAME: usize = 16;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum FighterClass {
    JiuJitsu = 0,
    KickBoxing = 1,
    Judo = 2,
    Wrestling = 3,
    MuayThai = 4,
}

/// Six-slot stat vector: three primary attributes, a reserved slot,
/// the class ordinal and a second reserved slot.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatVector {
    pub strength: u32,
    pub speed: u32,
    pub technique: u32,
    pub reserved_a: u32,
    pub class_ordinal: u32,
    pub reserved_b: u32,
}

impl FighterClass {
    pub const ALL: [FighterClass; 5] = [
        FighterClass::JiuJitsu,
        FighterClass::KickBoxing,
        FighterClass::Judo,
        FighterClass::Wrestling,
        FighterClass::MuayThai,
    ];

    /// Case-sensitive lookup by display name.
    pub fn from_name(name: &[u8]) -> Option<FighterClass> {
        match name {
            b"JiuJitsu" => Some(FighterClass::JiuJitsu),
            b"KickBoxing" => Some(FighterClass::KickBoxing),
            b"Judo" => Some(FighterClass::Judo),
            b"Wrestling" => Some(FighterClass::Wrestling),
            b"MuayThai" => Some(FighterClass::MuayThai),
            _ => None,
        }
    }

    /// Position in the class ordering (0-based).
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    pub fn base_stats(self) -> StatVector {
        let (strength, speed, technique) = match self {
            FighterClass::JiuJitsu => (60, 60, 60),
            FighterClass::KickBoxing => (80, 60, 40),
            FighterClass::Judo => (40, 60, 80),
            FighterClass::Wrestling => (100, 40, 40),
            FighterClass::MuayThai => (40, 80, 60),
        };
        StatVector {
            strength,
            speed,
            technique,
            reserved_a: 0,
            class_ordinal: self.ordinal(),
            reserved_b: 0,
        }
    }
}

impl StatVector {
    /// Slots in table order.
    pub fn as_array(&self) -> [u32; 6] {
        [
            self.strength,
            self.speed,
            self.technique,
            self.reserved_a,
            self.class_ordinal,
            self.reserved_b,
        ]
    }

    /// Add `bonus` to each primary attribute. Reserved and ordinal slots
    /// are copied unchanged.
    pub fn with_bonus(&self, bonus: u32) -> Result<StatVector, PunchError> {
        Ok(StatVector {
            strength: self.strength.checked_add(bonus).ok_or(PunchError::Overflow)?,
            speed: self.speed.checked_add(bonus).ok_or(PunchError::Overflow)?,
            technique: self.technique.checked_add(bonus).ok_or(PunchError::Overflow)?,
            ..*self
        })
    }
}

/// Parse a class name received as contract input.
pub fn parse_class(name: &String) -> Result<FighterClass, PunchError> {
    let len = name.len() as usize;
    if len == 0 || len > MAX_CLASS_NAME {
        return Err(PunchError::UnknownClass);
    }
    let mut buf = [0u8; MAX_CLASS_NAME];
    name.copy_into_slice(&mut buf[..len]);
    FighterClass::from_name(&buf[..len]).ok_or(PunchError::UnknownClass)
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::Env;

    #[test]
    fn test_base_stats_table() {
        assert_eq!(FighterClass::JiuJitsu.base_stats().as_array(), [60, 60, 60, 0, 0, 0]);
        assert_eq!(FighterClass::KickBoxing.base_stats().as_array(), [80, 60, 40, 0, 1, 0]);
        assert_eq!(FighterClass::Judo.base_stats().as_array(), [40, 60, 80, 0, 2, 0]);
        assert_eq!(FighterClass::Wrestling.base_stats().as_array(), [100, 40, 40, 0, 3, 0]);
        assert_eq!(FighterClass::MuayThai.base_stats().as_array(), [40, 80, 60, 0, 4, 0]);
    }

    #[test]
    fn test_class_profiles_are_distinct() {
        for (i, a) in FighterClass::ALL.iter().enumerate() {
            for b in FighterClass::ALL.iter().skip(i + 1) {
                let (sa, sb) = (a.base_stats(), b.base_stats());
                assert_ne!(
                    (sa.strength, sa.speed, sa.technique),
                    (sb.strength, sb.speed, sb.technique)
                );
            }
        }
    }

    #[test]
    fn test_from_name_is_case_sensitive() {
        assert_eq!(FighterClass::from_name(b"Judo"), Some(FighterClass::Judo));
        assert_eq!(FighterClass::from_name(b"judo"), None);
        assert_eq!(FighterClass::from_name(b"JUDO"), None);
        assert_eq!(FighterClass::from_name(b""), None);
    }

    #[test]
    fn test_parse_class() {
        let env = Env::default();
        assert_eq!(
            parse_class(&String::from_str(&env, "MuayThai")),
            Ok(FighterClass::MuayThai)
        );
        assert_eq!(
            parse_class(&String::from_str(&env, "Boxing")),
            Err(PunchError::UnknownClass)
        );
        assert_eq!(
            parse_class(&String::from_str(&env, "")),
            Err(PunchError::UnknownClass)
        );
        assert_eq!(
            parse_class(&String::from_str(&env, "KickBoxingKickBoxingKickBoxing")),
            Err(PunchError::UnknownClass)
        );
    }

    #[test]
    fn test_bonus_only_touches_primary_slots() {
        let boosted = FighterClass::Wrestling.base_stats().with_bonus(10).unwrap();
        assert_eq!(boosted.as_array(), [110, 50, 50, 0, 3, 0]);
    }

    #[test]
    fn test_bonus_overflow() {
        let mut stats = FighterClass::Judo.base_stats();
        stats.technique = u32::MAX;
        assert_eq!(stats.with_bonus(1), Err(PunchError::Overflow));
    }
}
