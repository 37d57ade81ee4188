//! Oracle doubles and a ready-made raffle for tests and fuzzing.
#![cfg(any(test, feature = "testutils"))]

use soroban_sdk::{
    contract, contractimpl, contracttype,
    testutils::{Address as _, Ledger},
    token, Address, BytesN, Env, Vec, U256,
};

use crate::{PayoutShares, PriceData, RaffleClient, RaffleConfig, RandomnessConfig};

/// $10 in 7-decimal token units.
pub const ENTRANCE_FEE_USD: i128 = 100_000_000;
/// $1.50 on an 8-decimal feed.
pub const START_PRICE: i128 = 150_000_000;
pub const PRICE_DECIMALS: u32 = 8;
/// `ENTRANCE_FEE_USD` converted at `START_PRICE`.
pub const START_ENTRANCE_FEE: i128 = 66_666_666;
pub const INTERVAL: u64 = 86_400;
pub const REQUEST_CONFIRMATIONS: u32 = 3;
pub const ADMIN_BP: u32 = 500;
pub const DEVELOPER_BP: u32 = 500;

#[derive(Clone)]
#[contracttype]
enum MockKey {
    Price,
    NextRequestId,
    Consumer(u64),
}

/// Price feed whose answer is set by the test.
#[contract]
pub struct MockPriceFeed;

#[contractimpl]
impl MockPriceFeed {
    pub fn set_price(env: Env, price: i128, decimals: u32) {
        let data = PriceData {
            price,
            decimals,
            updated_at: env.ledger().timestamp(),
        };
        env.storage().instance().set(&MockKey::Price, &data);
    }

    pub fn latest_price(env: Env) -> PriceData {
        env.storage()
            .instance()
            .get(&MockKey::Price)
            .unwrap_or_else(|| panic!("price not set"))
    }
}

/// VRF coordinator that hands out sequential request ids and delivers the
/// words chosen by the test.
#[contract]
pub struct MockVrfCoordinator;

#[contractimpl]
impl MockVrfCoordinator {
    pub fn request_random_words(
        env: Env,
        consumer: Address,
        _key_hash: BytesN<32>,
        _subscription_id: u64,
        _request_confirmations: u32,
        _callback_gas_limit: u32,
        _num_words: u32,
    ) -> u64 {
        consumer.require_auth();
        let request_id = env
            .storage()
            .instance()
            .get(&MockKey::NextRequestId)
            .unwrap_or(1u64);
        env.storage()
            .instance()
            .set(&MockKey::NextRequestId, &(request_id + 1));
        env.storage()
            .instance()
            .set(&MockKey::Consumer(request_id), &consumer);
        request_id
    }

    /// Calls the consumer back with `random_words`. Each request is delivered once.
    pub fn fulfill_random_words(env: Env, request_id: u64, random_words: Vec<U256>) -> Address {
        let consumer: Address = env
            .storage()
            .instance()
            .get(&MockKey::Consumer(request_id))
            .unwrap_or_else(|| panic!("unknown request"));
        env.storage()
            .instance()
            .remove(&MockKey::Consumer(request_id));
        RaffleClient::new(&env, &consumer).fulfill_random_words(&request_id, &random_words)
    }
}

pub struct RaffleFixture<'a> {
    pub env: &'a Env,
    pub raffle: RaffleClient<'a>,
    pub token: token::Client<'a>,
    pub token_admin: token::StellarAssetClient<'a>,
    pub price_feed: MockPriceFeedClient<'a>,
    pub coordinator: MockVrfCoordinatorClient<'a>,
    pub admin: Address,
    pub developer: Address,
}

impl<'a> RaffleFixture<'a> {
    /// Deploys the token, both oracles and an initialized raffle.
    /// Auths must already be mocked on `env`.
    pub fn new(env: &'a Env, minimum_players: u32) -> Self {
        Self::with_shares(
            env,
            minimum_players,
            PayoutShares {
                admin_bp: ADMIN_BP,
                developer_bp: DEVELOPER_BP,
            },
        )
    }

    pub fn with_shares(env: &'a Env, minimum_players: u32, shares: PayoutShares) -> Self {
        let admin = Address::generate(env);
        let developer = Address::generate(env);
        let issuer = Address::generate(env);

        let token_contract = env.register_stellar_asset_contract_v2(issuer);
        let token_id = token_contract.address();

        let price_feed_id = env.register(MockPriceFeed, ());
        let price_feed = MockPriceFeedClient::new(env, &price_feed_id);
        price_feed.set_price(&START_PRICE, &PRICE_DECIMALS);

        let coordinator_id = env.register(MockVrfCoordinator, ());
        let coordinator = MockVrfCoordinatorClient::new(env, &coordinator_id);

        let raffle_id = env.register(crate::Raffle, ());
        let raffle = RaffleClient::new(env, &raffle_id);
        raffle.init(&RaffleConfig {
            admin: admin.clone(),
            developer: developer.clone(),
            payment_token: token_id.clone(),
            price_feed: price_feed_id,
            entrance_fee_usd: ENTRANCE_FEE_USD,
            interval: INTERVAL,
            minimum_players,
            shares,
            randomness: RandomnessConfig {
                coordinator: coordinator_id,
                key_hash: BytesN::from_array(env, &[7u8; 32]),
                subscription_id: 588,
                request_confirmations: REQUEST_CONFIRMATIONS,
                callback_gas_limit: 500_000,
            },
        });

        RaffleFixture {
            env,
            raffle,
            token: token::Client::new(env, &token_id),
            token_admin: token::StellarAssetClient::new(env, &token_id),
            price_feed,
            coordinator,
            admin,
            developer,
        }
    }

    /// A fresh address holding `amount` payment tokens.
    pub fn funded_player(&self, amount: i128) -> Address {
        let player = Address::generate(self.env);
        self.token_admin.mint(&player, &amount);
        player
    }

    /// Enters `count` fresh players at the current fee, in order.
    pub fn enter_players(&self, count: u32) -> Vec<Address> {
        let fee = self.raffle.get_entrance_fee();
        let mut players = Vec::new(self.env);
        for _ in 0..count {
            let player = self.funded_player(fee);
            self.raffle.enter(&player, &fee);
            players.push_back(player);
        }
        players
    }

    pub fn advance_time(&self, seconds: u64) {
        self.env.ledger().with_mut(|l| {
            l.timestamp += seconds;
        });
    }

    pub fn random_words(&self, word: u128) -> Vec<U256> {
        let mut words = Vec::new(self.env);
        words.push_back(U256::from_u128(self.env, word));
        words
    }

    pub fn pot(&self) -> i128 {
        self.token.balance(&self.raffle.address)
    }
}
