#![no_std]
use soroban_sdk::{contract, contractimpl, log, token, Address, BytesN, Env, Vec, U256};

mod admin;
mod events;
mod fee;
mod oracle;
mod payout;
mod settlement;
mod storage;
mod types;
mod upkeep;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use oracle::{PriceFeedClient, VrfCoordinatorClient};
pub use types::{
    Error, Payout, PayoutShares, PriceData, RaffleConfig, RaffleState, RandomnessConfig, Round,
    RoundResult, UpkeepStatus, BPS_DENOMINATOR, NUM_WORDS,
};

use events::{
    publish_event, status_changed, AggregatorAddressUpdated, ContractUpgraded, EntranceFeeUpdated,
    EntryRecorded, LotteryPaused, LotteryUnpaused, MinimumPlayersUpdated, PayoutDistributed,
    RaffleInitialized, UpkeepPerformed, WinnerPicked,
};
use storage::{
    bump_instance, is_initialized, read_config, read_player_history, read_players, read_round,
    read_round_result, record_participation, write_config, write_players, write_round,
    write_round_result,
};
use upkeep::UpkeepInputs;

#[contract]
pub struct Raffle;

fn pot_balance(env: &Env, config: &RaffleConfig) -> i128 {
    token::Client::new(env, &config.payment_token).balance(&env.current_contract_address())
}

/// Entry ledger of the current round; `NotInitialized` before `init`.
fn read_ledger(env: &Env) -> Result<Vec<Address>, Error> {
    if !is_initialized(env) {
        return Err(Error::NotInitialized);
    }
    Ok(read_players(env))
}

fn upkeep_status(env: &Env, config: &RaffleConfig, round: &Round) -> UpkeepStatus {
    upkeep::evaluate(&UpkeepInputs {
        state: round.state,
        now: env.ledger().timestamp(),
        last_timestamp: round.last_timestamp,
        interval: config.interval,
        players: read_players(env).len(),
        minimum_players: config.minimum_players,
        balance: pot_balance(env, config),
    })
}

fn fee_updated(env: &Env, old_fee: i128, new_fee: i128, data: &PriceData) {
    publish_event(
        env,
        "entrance_fee_updated",
        EntranceFeeUpdated {
            old_fee,
            new_fee,
            price: data.price,
            price_decimals: data.decimals,
            timestamp: env.ledger().timestamp(),
        },
    );
}

#[contractimpl]
impl Raffle {
    pub fn init(env: Env, config: RaffleConfig) -> Result<(), Error> {
        if is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        config.admin.require_auth();

        for address in [
            &config.admin,
            &config.developer,
            &config.payment_token,
            &config.price_feed,
            &config.randomness.coordinator,
        ] {
            admin::ensure_valid_address(&env, address)?;
        }
        if config.entrance_fee_usd <= 0 {
            return Err(Error::InvalidParameters);
        }
        if config.minimum_players == 0 {
            return Err(Error::InvalidParameters);
        }
        if config.randomness.request_confirmations == 0 {
            return Err(Error::InvalidParameters);
        }
        payout::validate_shares(&config.shares)?;

        let (entrance_fee, _) = fee::current_entrance_fee(&env, &config)?;
        let now = env.ledger().timestamp();

        write_config(&env, &config);
        write_round(
            &env,
            &Round {
                number: 1,
                state: RaffleState::Open,
                last_timestamp: now,
                entrance_fee,
                pending_request: None,
                recent_winner: None,
            },
        );
        write_players(&env, &Vec::new(&env));
        bump_instance(&env);

        log!(&env, "raffle initialized", entrance_fee, config.interval);
        publish_event(
            &env,
            "raffle_initialized",
            RaffleInitialized {
                admin: config.admin,
                developer: config.developer,
                payment_token: config.payment_token,
                price_feed: config.price_feed,
                entrance_fee,
                interval: config.interval,
                timestamp: now,
            },
        );

        Ok(())
    }

    // --- Entry ledger ---

    /// Buys one entry for `player`. The whole `payment` goes to the pot.
    /// Returns the number of entries in the current round.
    pub fn enter(env: Env, player: Address, payment: i128) -> Result<u32, Error> {
        player.require_auth();
        let config = read_config(&env)?;
        let round = read_round(&env)?;

        if round.state != RaffleState::Open {
            return Err(Error::RaffleNotOpen);
        }
        if payment < round.entrance_fee {
            return Err(Error::InsufficientEntryFee);
        }

        let token_client = token::Client::new(&env, &config.payment_token);
        let contract_address = env.current_contract_address();
        token_client.transfer(&player, &contract_address, &payment);

        let mut players = read_players(&env);
        players.push_back(player.clone());
        write_players(&env, &players);
        record_participation(&env, &player, round.number);
        bump_instance(&env);

        log!(&env, "entry recorded", player, payment, round.number);
        publish_event(
            &env,
            "entry_recorded",
            EntryRecorded {
                player,
                amount: payment,
                round: round.number,
                timestamp: env.ledger().timestamp(),
            },
        );

        Ok(players.len())
    }

    // --- Upkeep trigger ---

    pub fn check_upkeep(env: Env) -> Result<bool, Error> {
        let config = read_config(&env)?;
        let round = read_round(&env)?;
        Ok(upkeep_status(&env, &config, &round).upkeep_needed)
    }

    pub fn get_upkeep_status(env: Env) -> Result<UpkeepStatus, Error> {
        let config = read_config(&env)?;
        let round = read_round(&env)?;
        Ok(upkeep_status(&env, &config, &round))
    }

    /// Closes the round and requests randomness. Anyone may call this once
    /// `check_upkeep` holds. Returns the randomness request id.
    pub fn perform_upkeep(env: Env) -> Result<u64, Error> {
        let config = read_config(&env)?;
        let mut round = read_round(&env)?;

        if !upkeep_status(&env, &config, &round).upkeep_needed {
            return Err(Error::UpkeepNotNeeded);
        }
        if round.pending_request.is_some() {
            return Err(Error::UpkeepNotNeeded);
        }
        // A round is not closed against a broken price feed.
        fee::current_entrance_fee(&env, &config)?;

        let randomness = &config.randomness;
        let coordinator = VrfCoordinatorClient::new(&env, &randomness.coordinator);
        let request_id = coordinator.request_random_words(
            &env.current_contract_address(),
            &randomness.key_hash,
            &randomness.subscription_id,
            &randomness.request_confirmations,
            &randomness.callback_gas_limit,
            &NUM_WORDS,
        );

        round.state = RaffleState::Calculating;
        round.pending_request = Some(request_id);
        write_round(&env, &round);
        bump_instance(&env);

        let players = read_players(&env).len();
        log!(&env, "upkeep performed", request_id, players);
        status_changed(&env, RaffleState::Open, RaffleState::Calculating);
        publish_event(
            &env,
            "upkeep_performed",
            UpkeepPerformed {
                request_id,
                round: round.number,
                players,
                timestamp: env.ledger().timestamp(),
            },
        );

        Ok(request_id)
    }

    // --- Randomness settlement ---

    /// Callback of the VRF coordinator. Picks the winner, pays out and opens
    /// the next round. Only the pending request is accepted, once.
    pub fn fulfill_random_words(
        env: Env,
        request_id: u64,
        random_words: Vec<U256>,
    ) -> Result<Address, Error> {
        let config = read_config(&env)?;
        config.randomness.coordinator.require_auth();
        let mut round = read_round(&env)?;

        if round.state != RaffleState::Calculating || round.pending_request != Some(request_id) {
            return Err(Error::UnknownRequest);
        }
        let random_word = random_words.get(0).ok_or(Error::InvalidRandomness)?;

        let players = read_players(&env);
        let winner_index = settlement::winner_index(&env, &random_word, players.len())?;
        let winner = players.get(winner_index).ok_or(Error::PlayerNotFound)?;

        let pot = pot_balance(&env, &config);
        let payout = payout::split(pot, &config.shares)?;
        payout::distribute(
            &env,
            &config.payment_token,
            &winner,
            &config.admin,
            &config.developer,
            &payout,
        );

        let (entrance_fee, price) = fee::current_entrance_fee(&env, &config)?;
        let now = env.ledger().timestamp();
        let settled_round = round.number;

        write_round_result(
            &env,
            &RoundResult {
                round: settled_round,
                winner: winner.clone(),
                winner_index,
                pot,
                payout: payout.clone(),
                players: players.len(),
                settled_at: now,
            },
        );

        let old_fee = round.entrance_fee;
        round.number = round
            .number
            .checked_add(1)
            .ok_or(Error::ArithmeticOverflow)?;
        round.state = RaffleState::Open;
        round.last_timestamp = now;
        round.entrance_fee = entrance_fee;
        round.pending_request = None;
        round.recent_winner = Some(winner.clone());
        write_round(&env, &round);
        write_players(&env, &Vec::new(&env));
        bump_instance(&env);

        log!(&env, "winner picked", winner, winner_index, pot);
        publish_event(
            &env,
            "winner_picked",
            WinnerPicked {
                winner: winner.clone(),
                round: settled_round,
                winner_index,
                request_id,
                timestamp: now,
            },
        );
        publish_event(
            &env,
            "payout_distributed",
            PayoutDistributed {
                round: settled_round,
                pot,
                payout,
                timestamp: now,
            },
        );
        fee_updated(&env, old_fee, entrance_fee, &price);
        status_changed(&env, RaffleState::Calculating, RaffleState::Open);

        Ok(winner)
    }

    // --- Admin ---

    pub fn pause_lottery(env: Env, caller: Address) -> Result<(), Error> {
        let config = read_config(&env)?;
        admin::require_admin(&config, &caller)?;
        let mut round = read_round(&env)?;

        // An in-flight randomness request must settle before the raffle can stop.
        if round.state != RaffleState::Open {
            return Err(Error::InvalidStateTransition);
        }
        round.state = RaffleState::Paused;
        write_round(&env, &round);
        bump_instance(&env);

        log!(&env, "lottery paused", caller);
        status_changed(&env, RaffleState::Open, RaffleState::Paused);
        publish_event(
            &env,
            "lottery_paused",
            LotteryPaused {
                paused_by: caller,
                timestamp: env.ledger().timestamp(),
            },
        );
        Ok(())
    }

    pub fn unpause_lottery(env: Env, caller: Address) -> Result<(), Error> {
        let config = read_config(&env)?;
        admin::require_admin(&config, &caller)?;
        let mut round = read_round(&env)?;

        if round.state != RaffleState::Paused {
            return Err(Error::InvalidStateTransition);
        }
        round.state = RaffleState::Open;
        write_round(&env, &round);
        bump_instance(&env);

        log!(&env, "lottery unpaused", caller);
        status_changed(&env, RaffleState::Paused, RaffleState::Open);
        publish_event(
            &env,
            "lottery_unpaused",
            LotteryUnpaused {
                unpaused_by: caller,
                timestamp: env.ledger().timestamp(),
            },
        );
        Ok(())
    }

    /// Points the raffle at a new price feed and reprices the entrance fee from it.
    pub fn update_price_feed_address(
        env: Env,
        caller: Address,
        new_feed: Address,
    ) -> Result<(), Error> {
        let mut config = read_config(&env)?;
        admin::require_admin(&config, &caller)?;
        admin::ensure_valid_address(&env, &new_feed)?;

        let old_feed = config.price_feed.clone();
        config.price_feed = new_feed.clone();
        let (entrance_fee, price) = fee::current_entrance_fee(&env, &config)?;

        let mut round = read_round(&env)?;
        let old_fee = round.entrance_fee;
        round.entrance_fee = entrance_fee;
        write_config(&env, &config);
        write_round(&env, &round);
        bump_instance(&env);

        log!(&env, "price feed updated", new_feed, entrance_fee);
        publish_event(
            &env,
            "aggregator_address_updated",
            AggregatorAddressUpdated {
                old_feed,
                new_feed,
                updated_by: caller,
                timestamp: env.ledger().timestamp(),
            },
        );
        fee_updated(&env, old_fee, entrance_fee, &price);
        Ok(())
    }

    pub fn set_minimum_players(env: Env, caller: Address, minimum: u32) -> Result<(), Error> {
        let mut config = read_config(&env)?;
        admin::require_admin(&config, &caller)?;
        if minimum == 0 {
            return Err(Error::InvalidParameters);
        }

        let old_minimum = config.minimum_players;
        config.minimum_players = minimum;
        write_config(&env, &config);
        bump_instance(&env);

        publish_event(
            &env,
            "minimum_players_updated",
            MinimumPlayersUpdated {
                old_minimum,
                new_minimum: minimum,
                updated_by: caller,
                timestamp: env.ledger().timestamp(),
            },
        );
        Ok(())
    }

    /// Replaces the contract code. Storage is left untouched, so the round,
    /// its players and the configuration carry over to the new code.
    pub fn upgrade(env: Env, caller: Address, new_wasm_hash: BytesN<32>) -> Result<(), Error> {
        let config = read_config(&env)?;
        admin::require_admin(&config, &caller)?;

        publish_event(
            &env,
            "contract_upgraded",
            ContractUpgraded {
                new_wasm_hash: new_wasm_hash.clone(),
                upgraded_by: caller,
                timestamp: env.ledger().timestamp(),
            },
        );
        env.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }

    // --- Getters ---

    pub fn get_raffle_state(env: Env) -> Result<RaffleState, Error> {
        Ok(read_round(&env)?.state)
    }

    pub fn get_entrance_fee(env: Env) -> Result<i128, Error> {
        Ok(read_round(&env)?.entrance_fee)
    }

    pub fn get_number_of_players(env: Env) -> Result<u32, Error> {
        Ok(read_ledger(&env)?.len())
    }

    pub fn get_player(env: Env, index: u32) -> Result<Address, Error> {
        read_ledger(&env)?.get(index).ok_or(Error::PlayerNotFound)
    }

    pub fn get_players(env: Env) -> Result<Vec<Address>, Error> {
        read_ledger(&env)
    }

    pub fn get_recent_winner(env: Env) -> Result<Option<Address>, Error> {
        Ok(read_round(&env)?.recent_winner)
    }

    pub fn get_last_timestamp(env: Env) -> Result<u64, Error> {
        Ok(read_round(&env)?.last_timestamp)
    }

    pub fn get_interval(env: Env) -> Result<u64, Error> {
        Ok(read_config(&env)?.interval)
    }

    pub fn get_num_words(_env: Env) -> u32 {
        NUM_WORDS
    }

    pub fn get_request_confirmations(env: Env) -> Result<u32, Error> {
        Ok(read_config(&env)?.randomness.request_confirmations)
    }

    pub fn get_minimum_players(env: Env) -> Result<u32, Error> {
        Ok(read_config(&env)?.minimum_players)
    }

    pub fn get_price_feed_address(env: Env) -> Result<Address, Error> {
        Ok(read_config(&env)?.price_feed)
    }

    /// Fixed beneficiaries, admin first.
    pub fn get_payees(env: Env) -> Result<Vec<Address>, Error> {
        let config = read_config(&env)?;
        let mut payees = Vec::new(&env);
        payees.push_back(config.admin);
        payees.push_back(config.developer);
        Ok(payees)
    }

    pub fn get_shares(env: Env) -> Result<PayoutShares, Error> {
        Ok(read_config(&env)?.shares)
    }

    pub fn get_pending_request(env: Env) -> Result<Option<u64>, Error> {
        Ok(read_round(&env)?.pending_request)
    }

    pub fn get_round_number(env: Env) -> Result<u32, Error> {
        Ok(read_round(&env)?.number)
    }

    pub fn get_round_result(env: Env, round: u32) -> Option<RoundResult> {
        read_round_result(&env, round)
    }

    /// Round numbers `player` has entered, oldest first.
    pub fn get_player_history(env: Env, player: Address) -> Vec<u32> {
        read_player_history(&env, &player)
    }

    pub fn get_config(env: Env) -> Result<RaffleConfig, Error> {
        read_config(&env)
    }
}
