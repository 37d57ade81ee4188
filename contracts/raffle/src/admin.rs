use soroban_sdk::{Address, Env, String};

use crate::types::{Error, RaffleConfig, ZERO_ADDRESS};

/// Authenticates `caller` and checks it holds the admin capability.
/// Runs before any effect of an admin operation.
pub(crate) fn require_admin(config: &RaffleConfig, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if *caller != config.admin {
        return Err(Error::AddressNotAuthorized);
    }
    Ok(())
}

/// Rejects the null account and the raffle's own address.
pub(crate) fn ensure_valid_address(env: &Env, address: &Address) -> Result<(), Error> {
    let zero = Address::from_string(&String::from_str(env, ZERO_ADDRESS));
    if *address == zero || *address == env.current_contract_address() {
        return Err(Error::InvalidAddress);
    }
    Ok(())
}
