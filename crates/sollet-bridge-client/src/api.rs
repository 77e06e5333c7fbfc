use crate::{
    connection::Connection,
    constants::{CONFIRMED, SYSVAR_CLOCK_ID},
    types::{ClockInfo, TokenFromApi},
    BridgeError, BridgeResult,
};
use solana_sdk::{account::from_account, clock::Clock, pubkey::Pubkey};

/// SPL token accounts owned by `owner` under `program_id`
pub async fn fetch_token_accounts(
    connection: &dyn Connection,
    owner: &Pubkey,
    program_id: &Pubkey,
) -> BridgeResult<Vec<TokenFromApi>> {
    connection
        .get_parsed_token_accounts_by_owner(owner, program_id, CONFIRMED)
        .await
}

/// The clock sysvar, or `None` if the node doesn't return it
pub async fn get_clock_account(connection: &dyn Connection) -> BridgeResult<Option<ClockInfo>> {
    let Some(account) = connection.get_account_info(&SYSVAR_CLOCK_ID, CONFIRMED).await? else {
        return Ok(None);
    };

    let clock: Clock = from_account(&account).ok_or_else(|| {
        BridgeError::InvalidAccountData("Failed to deserialize clock sysvar".to_string())
    })?;
    Ok(Some(clock.into()))
}
