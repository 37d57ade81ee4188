use soroban_sdk::{contracterror, contracttype, Address, BytesN};

/// Number of random words requested per round. One word picks one winner.
pub const NUM_WORDS: u32 = 1;

/// Basis points denominator (100% = 10000 bp).
pub const BPS_DENOMINATOR: i128 = 10_000;

/// The Stellar ed25519 account with an all-zero key. Treated as the null address.
pub const ZERO_ADDRESS: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[contracttype]
pub enum RaffleState {
    Open = 0,
    Calculating = 1,
    Paused = 2,
}

/// Shares of the pot paid to the fixed beneficiaries, in basis points.
/// The winner receives whatever is left.
#[derive(Clone, PartialEq, Eq, Debug)]
#[contracttype]
pub struct PayoutShares {
    pub admin_bp: u32,
    pub developer_bp: u32,
}

/// Parameters forwarded to the VRF coordinator on every request.
#[derive(Clone, PartialEq, Eq, Debug)]
#[contracttype]
pub struct RandomnessConfig {
    pub coordinator: Address,
    pub key_hash: BytesN<32>,
    pub subscription_id: u64,
    pub request_confirmations: u32,
    pub callback_gas_limit: u32,
}

#[derive(Clone, PartialEq, Eq, Debug)]
#[contracttype]
pub struct RaffleConfig {
    pub admin: Address,
    pub developer: Address,
    pub payment_token: Address,
    /// Admin-mutable through `update_price_feed_address`.
    pub price_feed: Address,
    /// USD target of one entry, in payment token base units.
    pub entrance_fee_usd: i128,
    /// Minimum seconds between two settlements.
    pub interval: u64,
    /// Admin-mutable through `set_minimum_players`. Never zero.
    pub minimum_players: u32,
    pub shares: PayoutShares,
    pub randomness: RandomnessConfig,
}

#[derive(Clone, PartialEq, Eq, Debug)]
#[contracttype]
pub struct Round {
    pub number: u32,
    pub state: RaffleState,
    pub last_timestamp: u64,
    pub entrance_fee: i128,
    pub pending_request: Option<u64>,
    pub recent_winner: Option<Address>,
}

/// Answer of a price feed: `price / 10^decimals` USD per whole token.
#[derive(Clone, PartialEq, Eq, Debug)]
#[contracttype]
pub struct PriceData {
    pub price: i128,
    pub decimals: u32,
    /// Informational only. The fee is priced from the latest answer
    /// whatever its age.
    pub updated_at: u64,
}

#[derive(Clone, PartialEq, Eq, Debug)]
#[contracttype]
pub struct Payout {
    pub winner: i128,
    pub admin: i128,
    pub developer: i128,
}

#[derive(Clone, PartialEq, Eq, Debug)]
#[contracttype]
pub struct RoundResult {
    pub round: u32,
    pub winner: Address,
    pub winner_index: u32,
    pub pot: i128,
    pub payout: Payout,
    pub players: u32,
    pub settled_at: u64,
}

#[derive(Clone, PartialEq, Eq, Debug)]
#[contracttype]
pub struct UpkeepStatus {
    pub is_open: bool,
    pub time_passed: bool,
    pub has_players: bool,
    pub has_balance: bool,
    pub upkeep_needed: bool,
}

// --- Error Types ---

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidParameters = 3,
    RaffleNotOpen = 4,
    InsufficientEntryFee = 5,
    AddressNotAuthorized = 6,
    UpkeepNotNeeded = 7,
    UnknownRequest = 8,
    NoPlayers = 9,
    InvalidPriceFeed = 10,
    InvalidAddress = 11,
    InvalidRandomness = 12,
    InvalidStateTransition = 13,
    ArithmeticOverflow = 14,
    PlayerNotFound = 15,
}
