use soroban_sdk::{token, Address, Env};

use crate::types::{Error, Payout, PayoutShares, BPS_DENOMINATOR};

pub(crate) fn validate_shares(shares: &PayoutShares) -> Result<(), Error> {
    let total = shares.admin_bp as i128 + shares.developer_bp as i128;
    if total > BPS_DENOMINATOR {
        return Err(Error::InvalidParameters);
    }
    Ok(())
}

fn share_of(total: i128, bp: u32) -> Result<i128, Error> {
    total
        .checked_mul(bp as i128)
        .ok_or(Error::ArithmeticOverflow)?
        .checked_div(BPS_DENOMINATOR)
        .ok_or(Error::ArithmeticOverflow)
}

/// Splits `total` between admin, developer and winner.
///
/// Beneficiary shares are floored; the winner takes the remainder, so the
/// three amounts always add up to `total`.
pub(crate) fn split(total: i128, shares: &PayoutShares) -> Result<Payout, Error> {
    if total < 0 {
        return Err(Error::InvalidParameters);
    }
    let admin = share_of(total, shares.admin_bp)?;
    let developer = share_of(total, shares.developer_bp)?;
    let winner = total
        .checked_sub(admin)
        .and_then(|rest| rest.checked_sub(developer))
        .ok_or(Error::ArithmeticOverflow)?;
    if winner < 0 {
        return Err(Error::InvalidParameters);
    }

    Ok(Payout {
        winner,
        admin,
        developer,
    })
}

/// Transfers every non-zero share out of the contract.
///
/// A rejected transfer traps inside the token contract and takes the whole
/// settlement down with it, so a partial payout is never committed.
pub(crate) fn distribute(
    env: &Env,
    payment_token: &Address,
    winner: &Address,
    admin: &Address,
    developer: &Address,
    payout: &Payout,
) {
    let token_client = token::Client::new(env, payment_token);
    let contract_address = env.current_contract_address();

    for (recipient, amount) in [
        (winner, payout.winner),
        (admin, payout.admin),
        (developer, payout.developer),
    ] {
        if amount > 0 {
            token_client.transfer(&contract_address, recipient, &amount);
        }
    }
}
