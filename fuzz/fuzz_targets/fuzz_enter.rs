#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use raffle::testutils::RaffleFixture;
use raffle::{Error, RaffleState};
use soroban_sdk::Env;

#[derive(Arbitrary, Debug)]
struct EntryAttempt {
    /// Payment relative to the current fee
    offset: i32,
    toggle_pause: bool,
}

fuzz_target!(|attempts: Vec<EntryAttempt>| {
    if attempts.len() > 64 {
        return;
    }
    let env = Env::default();
    env.mock_all_auths();
    let f = RaffleFixture::new(&env, 1);

    let mut accepted = 0u32;
    let mut pot = 0i128;

    for attempt in attempts {
        if attempt.toggle_pause {
            match f.raffle.get_raffle_state() {
                RaffleState::Open => f.raffle.pause_lottery(&f.admin),
                _ => f.raffle.unpause_lottery(&f.admin),
            }
        }

        let fee = f.raffle.get_entrance_fee();
        let payment = fee + attempt.offset as i128;
        let player = f.funded_player(payment.max(0));
        let open = f.raffle.get_raffle_state() == RaffleState::Open;

        match f.raffle.try_enter(&player, &payment) {
            Ok(Ok(count)) => {
                assert!(open && payment >= fee);
                accepted += 1;
                pot += payment;
                assert_eq!(count, accepted);
            }
            Err(Ok(Error::RaffleNotOpen)) => assert!(!open),
            Err(Ok(Error::InsufficientEntryFee)) => assert!(open && payment < fee),
            other => panic!("unexpected enter result: {:?}", other),
        }

        assert_eq!(f.raffle.get_number_of_players(), accepted);
        assert_eq!(f.pot(), pot);
    }
});
