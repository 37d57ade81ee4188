#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use raffle::testutils::RaffleFixture;
use raffle::{PayoutShares, RaffleState};
use soroban_sdk::Env;

#[derive(Arbitrary, Debug)]
enum Op {
    Enter { overpay: u16 },
    Advance { seconds: u32 },
    Upkeep,
    Fulfill { word: u128 },
    StaleFulfill { word: u128 },
    Pause,
    Unpause,
}

#[derive(Arbitrary, Debug)]
struct Input {
    minimum_players: u8,
    admin_bp: u16,
    developer_bp: u16,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    if input.ops.len() > 128 {
        return;
    }
    let shares = PayoutShares {
        admin_bp: (input.admin_bp % 5_001) as u32,
        developer_bp: (input.developer_bp % 5_001) as u32,
    };
    let minimum_players = (input.minimum_players % 8).max(1) as u32;

    let env = Env::default();
    env.mock_all_auths();
    let f = RaffleFixture::with_shares(&env, minimum_players, shares);

    let mut pot = 0i128;
    let mut pending: Option<u64> = None;

    for op in input.ops {
        match op {
            Op::Enter { overpay } => {
                let payment = f.raffle.get_entrance_fee() + overpay as i128;
                let player = f.funded_player(payment);
                if f.raffle.try_enter(&player, &payment).is_ok() {
                    pot += payment;
                }
            }
            Op::Advance { seconds } => f.advance_time(seconds as u64),
            Op::Upkeep => {
                let needed = f.raffle.check_upkeep();
                match f.raffle.try_perform_upkeep() {
                    Ok(Ok(request_id)) => {
                        assert!(needed);
                        pending = Some(request_id);
                    }
                    _ => assert!(!needed),
                }
            }
            Op::Fulfill { word } => {
                let Some(request_id) = pending else {
                    continue;
                };
                let players = f.raffle.get_number_of_players();
                let admin_before = f.token.balance(&f.admin);
                let developer_before = f.token.balance(&f.developer);

                let winner = f
                    .coordinator
                    .fulfill_random_words(&request_id, &f.random_words(word));
                pending = None;

                let result = f.raffle.get_round_result(&(f.raffle.get_round_number() - 1)).unwrap();
                assert_eq!(result.winner, winner);
                assert_eq!(result.players, players);
                assert_eq!(result.winner_index as u128, word % players as u128);
                assert_eq!(result.pot, pot);
                assert_eq!(
                    result.payout.winner + result.payout.admin + result.payout.developer,
                    pot
                );
                assert_eq!(f.token.balance(&f.admin) - admin_before, result.payout.admin);
                assert_eq!(
                    f.token.balance(&f.developer) - developer_before,
                    result.payout.developer
                );

                assert_eq!(f.raffle.get_raffle_state(), RaffleState::Open);
                assert_eq!(f.raffle.get_number_of_players(), 0);
                pot = 0;
            }
            Op::StaleFulfill { word } => {
                let stale = pending.map(|id| id + 1).unwrap_or(1);
                assert!(f
                    .raffle
                    .try_fulfill_random_words(&stale, &f.random_words(word))
                    .is_err());
            }
            Op::Pause => {
                let _ = f.raffle.try_pause_lottery(&f.admin);
            }
            Op::Unpause => {
                let _ = f.raffle.try_unpause_lottery(&f.admin);
            }
        }

        let state = f.raffle.get_raffle_state();
        assert_eq!(state == RaffleState::Calculating, pending.is_some());
        assert_eq!(f.raffle.get_pending_request(), pending);
        assert_eq!(f.pot(), pot);
        assert!(f.raffle.get_entrance_fee() > 0);
    }
});
