use soroban_sdk::{contracterror, contracttype, Address, String};

/// Storage keys for contract data
#[contracttype]
pub enum DataKey {
    Owner,                         // Contract owner
    Admin(Address),                // Address -> admin flag
    Tokens,                        // Vec<Token> accepted for contributions
    Levels,                        // Vec<Level> ordered tier table
    Status,                        // Current lifecycle status
    Start,                         // Contribution window opening timestamp
    End,                           // Contribution window closing timestamp
    Collaborator(CollaboratorKey), // (token, wallet) -> Collaborator
    CollaboratorCount,             // Counter for collaborator ids
    TotalUsd,                      // Total USD raised across all tokens
}

/// Key for a collaborator record: (token address, wallet address)
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollaboratorKey(pub Address, pub Address);

/// A token accepted for contributions
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub address: Address,
    pub usd_price: i128, // USD units per whole token
    pub amount: i128,    // Cumulative contributed token units
}

/// A funding tier
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Level {
    pub order: u32,    // Opaque sort/display key, strictly increasing
    pub name: String,
    pub threshold: i128, // Cumulative USD at which the tier is filled
    pub minimum: i128,   // Per-transaction USD floor
    pub maximum: i128,   // USD ceiling
    pub reward: i128,    // Payout scalar in basis points
}

/// A contributor's record against a single token
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Collaborator {
    pub id: u32, // Assigned at first contribution, never reused
    pub token: Address,
    pub address: Address,
    pub amount: i128,    // Cumulative token units contributed
    pub usd_value: i128, // Cumulative USD value contributed
}

/// Lifecycle status of the collaboration
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CollaborationStatus {
    Pending, // Configured but not open
    Active,  // Accepting contributions (inside the time window)
    Paused,  // Temporarily closed
    Ended,   // Closed
}

/// Contract error types
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,      // Contract not initialized
    AlreadyInitialized = 2,  // Contract already setup
    Unauthorized = 3,        // Caller lacks required role
    ConfigError = 4,         // Invalid construction or update parameters
    NotActive = 5,           // Contribution outside status/time window
    InvalidToken = 6,        // Token not registered
    OutOfTierBounds = 7,     // Amount outside the qualifying tier's bounds
    TransferFailed = 8,      // Escrow pull failed
    InsufficientReserve = 9, // Update would under-fund committed rewards
    NotFound = 10,           // Token/level/collaborator lookup failed
}
