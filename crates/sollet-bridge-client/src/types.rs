/*!
# Bridge Data Types

Decoded RPC payloads shared by the read operations and the application state.
*/

use serde::{Deserialize, Serialize};
use solana_sdk::{clock::Clock, pubkey::Pubkey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenAccountState {
    Initialized,
    Uninitialized,
    Frozen,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmount {
    pub amount: String,
    pub decimals: u8,
    pub ui_amount: Option<f64>,
    pub ui_amount_string: String,
}

/// The `parsed.info` section of a `jsonParsed` SPL token account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAccountInfo {
    #[serde(default)]
    pub is_native: bool,
    pub mint: String,
    pub owner: String,
    pub state: TokenAccountState,
    pub token_amount: TokenAmount,
}

/// A token account as returned by `getTokenAccountsByOwner`
#[derive(Debug, Clone, PartialEq)]
pub struct TokenFromApi {
    pub pubkey: Pubkey,
    pub lamports: u64,
    pub info: TokenAccountInfo,
}

/// Snapshot of the clock sysvar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockInfo {
    pub epoch: u64,
    pub epoch_start_timestamp: i64,
    pub leader_schedule_epoch: u64,
    pub slot: u64,
    pub unix_timestamp: i64,
}

impl From<Clock> for ClockInfo {
    fn from(clock: Clock) -> Self {
        Self {
            epoch: clock.epoch,
            epoch_start_timestamp: clock.epoch_start_timestamp,
            leader_schedule_epoch: clock.leader_schedule_epoch,
            slot: clock.slot,
            unix_timestamp: clock.unix_timestamp,
        }
    }
}

/// Payload of a signature subscription notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureNotification {
    /// Present when the transaction landed but failed
    pub err: Option<String>,
}
