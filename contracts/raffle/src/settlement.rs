use soroban_sdk::{Env, U256};

use crate::types::Error;

/// Maps a random word onto an index in `0..players`.
pub(crate) fn winner_index(env: &Env, random_word: &U256, players: u32) -> Result<u32, Error> {
    if players == 0 {
        return Err(Error::NoPlayers);
    }
    let index = random_word
        .rem_euclid(&U256::from_u32(env, players))
        .to_u128()
        .ok_or(Error::ArithmeticOverflow)?;
    u32::try_from(index).map_err(|_| Error::ArithmeticOverflow)
}
