use crate::types::{RaffleState, UpkeepStatus};

/// Inputs of the upkeep predicate, read from storage and the payment token.
pub(crate) struct UpkeepInputs {
    pub state: RaffleState,
    pub now: u64,
    pub last_timestamp: u64,
    pub interval: u64,
    pub players: u32,
    pub minimum_players: u32,
    pub balance: i128,
}

/// A round may close once it is open, the interval has elapsed, enough
/// players joined and the pot is not empty.
pub(crate) fn evaluate(inputs: &UpkeepInputs) -> UpkeepStatus {
    let is_open = inputs.state == RaffleState::Open;
    let time_passed = inputs.now.saturating_sub(inputs.last_timestamp) >= inputs.interval;
    let has_players = inputs.players > 0 && inputs.players >= inputs.minimum_players;
    let has_balance = inputs.balance > 0;

    UpkeepStatus {
        is_open,
        time_passed,
        has_players,
        has_balance,
        upkeep_needed: is_open && time_passed && has_players && has_balance,
    }
}
