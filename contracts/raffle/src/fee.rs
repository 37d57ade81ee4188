use soroban_sdk::{Address, Env};

use crate::oracle::PriceFeedClient;
use crate::types::{Error, PriceData, RaffleConfig};

/// Reads the latest answer of `feed`. A feed that cannot be called counts as invalid.
pub(crate) fn read_price(env: &Env, feed: &Address) -> Result<PriceData, Error> {
    match PriceFeedClient::new(env, feed).try_latest_price() {
        Ok(Ok(data)) => Ok(data),
        _ => Err(Error::InvalidPriceFeed),
    }
}

/// Converts the USD target into payment token units: `usd * 10^decimals / price`.
///
/// Truncates toward zero. A non-positive price, an unrepresentable scale or a
/// fee that truncates to zero are all rejected as `InvalidPriceFeed`.
pub(crate) fn entrance_fee_from_price(
    entrance_fee_usd: i128,
    data: &PriceData,
) -> Result<i128, Error> {
    if data.price <= 0 {
        return Err(Error::InvalidPriceFeed);
    }
    let scale = 10i128
        .checked_pow(data.decimals)
        .ok_or(Error::InvalidPriceFeed)?;
    let fee = entrance_fee_usd
        .checked_mul(scale)
        .ok_or(Error::ArithmeticOverflow)?
        / data.price;
    if fee <= 0 {
        return Err(Error::InvalidPriceFeed);
    }
    Ok(fee)
}

pub(crate) fn current_entrance_fee(
    env: &Env,
    config: &RaffleConfig,
) -> Result<(i128, PriceData), Error> {
    let data = read_price(env, &config.price_feed)?;
    let fee = entrance_fee_from_price(config.entrance_fee_usd, &data)?;
    Ok((fee, data))
}
