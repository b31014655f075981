use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PunchError {
    /// Class name is not one of the five fighter classes
    UnknownClass = 1,
    /// Every token up to MAX_SUPPLY has been issued
    SupplyExhausted = 2,
    /// Offered payment is below the mint fee
    InsufficientPayment = 3,
    /// No fighter has been issued under this token id
    NotFound = 4,
    /// Caller is not the admin, or not the oracle a roll was requested from
    Unauthorized = 5,
    /// No retained fees to withdraw
    NothingToWithdraw = 6,
    /// Arithmetic overflow
    Overflow = 7,
    /// Critical storage data missing (contract state corrupted)
    StorageCorrupted = 8,
    /// Fighter already has its rarity; there is no roll to reassign
    NotPending = 9,
}
