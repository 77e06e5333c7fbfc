/*!
# Sollet Bridge Client

Connects a wallet adapter to a Solana RPC endpoint: reads token balances and
the clock, stages token account creation, signs and sends transactions, and
tracks their confirmation in an observable status table.

## Quick Start

```rust,no_run
use sollet_bridge_client::{
    get_or_create_token_account, sign_and_send_transaction, AppState, BridgeConfig,
    KeypairWallet, RpcConnection, WalletAdapter,
};
use solana_sdk::{pubkey::Pubkey, signature::Keypair};
use std::sync::Arc;

# async fn example() -> Result<(), Box<dyn std::error::Error>> {
let config = BridgeConfig::default();
let connection = Arc::new(RpcConnection::new(&config)?);
let state = AppState::new(config.rpc_url.clone());

let wallet = Arc::new(KeypairWallet::new(Keypair::new()));
state.connect_wallet(wallet.clone()).await?;
let payer = wallet.public_key().unwrap();

// Stage the associated token account, if it doesn't exist yet
let mint = Pubkey::new_unique();
let staged = get_or_create_token_account(connection.as_ref(), &mint, wallet.as_ref()).await?;

if !staged.is_empty() {
    let tx = staged.unsigned_transaction(&payer, true);
    let signature =
        sign_and_send_transaction(connection.as_ref(), tx, wallet.as_ref(), &staged.signer_refs())
            .await?;

    // Resolved in the background; observers see Unknown until then
    state.transactions().await_confirmation(
        signature,
        "create token account",
        connection.clone(),
        config.confirmation_timeout,
    );
}
# Ok(())
# }
```
*/

mod address_finder;
mod api;
mod config;
mod connection;
mod constants;
mod errors;
mod registry;
mod result;
mod state;
mod token_accounts;
mod tracker;
mod transaction;
mod types;
mod utils;
mod wallet;

#[cfg(test)]
mod test_utils;

pub use address_finder::{derive_associated_address, AddressFinder};
pub use api::{fetch_token_accounts, get_clock_account};
pub use config::{BridgeConfig, DEFAULT_CONFIRMATION_TIMEOUT};
pub use connection::{websocket_url_for, Connection, RpcConnection, SignatureSubscription};
pub use constants::*;
pub use errors::BridgeError;
pub use registry::{
    build_token_map, filter_token_list, ChainId, TokenMap, TokenRegistry, TokenRegistryEntry,
    DEFAULT_EXCLUDED_TAGS,
};
pub use result::{failure, success, BridgeResult};
pub use state::{Adapter, AppState, UserToken};
pub use token_accounts::{
    create_account, get_or_create_native_token_account, get_or_create_token_account,
    CustomInstructionResult,
};
pub use tracker::{TransactionTracker, TxInfo, TxMap, TxStatus};
pub use transaction::{serialize_transaction, sign_and_send_transaction};
pub use types::*;
pub use utils::{abbreviate_address, for_humans, ui_amount};
pub use wallet::{KeypairWallet, WalletAdapter, WalletEvents};

// Re-export key Solana types for convenience
pub use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::Transaction,
};
