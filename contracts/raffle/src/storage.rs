use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{Error, RaffleConfig, Round, RoundResult};

const DAY_IN_LEDGERS: u32 = 17_280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_BUMP_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    Round,
    Players,
    /// Rounds an address has entered: PlayerHistory(player)
    PlayerHistory(Address),
    RoundResult(u32),
}

pub(crate) fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub(crate) fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub(crate) fn read_config(env: &Env) -> Result<RaffleConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub(crate) fn write_config(env: &Env, config: &RaffleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub(crate) fn read_round(env: &Env) -> Result<Round, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Round)
        .ok_or(Error::NotInitialized)
}

pub(crate) fn write_round(env: &Env, round: &Round) {
    env.storage().instance().set(&DataKey::Round, round);
}

pub(crate) fn read_players(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::Players)
        .unwrap_or_else(|| Vec::new(env))
}

pub(crate) fn write_players(env: &Env, players: &Vec<Address>) {
    env.storage().instance().set(&DataKey::Players, players);
}

pub(crate) fn read_player_history(env: &Env, player: &Address) -> Vec<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::PlayerHistory(player.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

/// Appends `round` to the player's history unless it is already the last entry.
pub(crate) fn record_participation(env: &Env, player: &Address, round: u32) {
    let mut history = read_player_history(env, player);
    if history.last() == Some(round) {
        return;
    }
    history.push_back(round);

    let key = DataKey::PlayerHistory(player.clone());
    env.storage().persistent().set(&key, &history);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub(crate) fn read_round_result(env: &Env, round: u32) -> Option<RoundResult> {
    env.storage().persistent().get(&DataKey::RoundResult(round))
}

pub(crate) fn write_round_result(env: &Env, result: &RoundResult) {
    let key = DataKey::RoundResult(result.round);
    env.storage().persistent().set(&key, result);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}
