//! Interfaces of the external oracles the raffle consumes.
//!
//! Both oracles are untrusted: every answer is validated before it touches
//! raffle state.

use soroban_sdk::{contractclient, Address, BytesN, Env};

use crate::types::PriceData;

/// USD price feed for the payment token.
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    fn latest_price(env: Env) -> PriceData;
}

/// Verifiable randomness coordinator.
///
/// A request returns immediately with an id. The coordinator later invokes
/// `fulfill_random_words(request_id, random_words)` on `consumer`.
#[contractclient(name = "VrfCoordinatorClient")]
pub trait VrfCoordinator {
    fn request_random_words(
        env: Env,
        consumer: Address,
        key_hash: BytesN<32>,
        subscription_id: u64,
        request_confirmations: u32,
        callback_gas_limit: u32,
        num_words: u32,
    ) -> u64;
}
