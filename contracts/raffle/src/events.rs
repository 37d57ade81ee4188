use soroban_sdk::{contracttype, Address, BytesN, Env, IntoVal, Symbol, Val};

use crate::types::{Payout, RaffleState};

/// Publishes `event` under the `("raffle", event_name)` topic pair.
pub(crate) fn publish_event<T>(env: &Env, event_name: &str, event: T)
where
    T: IntoVal<Env, Val>,
{
    env.events().publish(
        (Symbol::new(env, "raffle"), Symbol::new(env, event_name)),
        event,
    );
}

// ============================================================================
// ROUND LIFECYCLE EVENTS
// ============================================================================

/// Emitted once, when the raffle is initialized
#[derive(Clone)]
#[contracttype]
pub struct RaffleInitialized {
    pub admin: Address,
    pub developer: Address,
    pub payment_token: Address,
    pub price_feed: Address,
    pub entrance_fee: i128,
    pub interval: u64,
    pub timestamp: u64,
}

/// Emitted when a player buys an entry
#[derive(Clone)]
#[contracttype]
pub struct EntryRecorded {
    pub player: Address,
    pub amount: i128,
    pub round: u32,
    pub timestamp: u64,
}

/// Emitted when a round closes and randomness is requested
#[derive(Clone)]
#[contracttype]
pub struct UpkeepPerformed {
    pub request_id: u64,
    pub round: u32,
    pub players: u32,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct WinnerPicked {
    pub winner: Address,
    pub round: u32,
    pub winner_index: u32,
    pub request_id: u64,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct PayoutDistributed {
    pub round: u32,
    pub pot: i128,
    pub payout: Payout,
    pub timestamp: u64,
}

/// Emitted whenever the entrance fee is repriced from the price feed
#[derive(Clone)]
#[contracttype]
pub struct EntranceFeeUpdated {
    pub old_fee: i128,
    pub new_fee: i128,
    pub price: i128,
    pub price_decimals: u32,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct StatusChanged {
    pub old_status: RaffleState,
    pub new_status: RaffleState,
    pub timestamp: u64,
}

// ============================================================================
// ADMIN EVENTS
// ============================================================================

#[derive(Clone)]
#[contracttype]
pub struct LotteryPaused {
    pub paused_by: Address,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct LotteryUnpaused {
    pub unpaused_by: Address,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct AggregatorAddressUpdated {
    pub old_feed: Address,
    pub new_feed: Address,
    pub updated_by: Address,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct MinimumPlayersUpdated {
    pub old_minimum: u32,
    pub new_minimum: u32,
    pub updated_by: Address,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct ContractUpgraded {
    pub new_wasm_hash: BytesN<32>,
    pub upgraded_by: Address,
    pub timestamp: u64,
}

pub(crate) fn status_changed(env: &Env, old_status: RaffleState, new_status: RaffleState) {
    publish_event(
        env,
        "status_changed",
        StatusChanged {
            old_status,
            new_status,
            timestamp: env.ledger().timestamp(),
        },
    );
}
