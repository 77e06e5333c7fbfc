/*!
# Application State

Everything a UI observes: the wallet adapter, the user's token balances, the
clock snapshot, the token registry, the selected network and the transaction
status table. Each value sits behind a `watch` channel; the setters on
[`AppState`] are the only writers and always replace the whole value.
*/

use crate::{
    api::{fetch_token_accounts, get_clock_account},
    connection::Connection,
    constants::{DEFAULT_NETWORK, TOKEN_PROGRAM_ID},
    registry::{build_token_map, ChainId, TokenMap, TokenRegistry, TokenRegistryEntry},
    tracker::TransactionTracker,
    types::{ClockInfo, TokenFromApi},
    utils::abbreviate_address,
    wallet::WalletAdapter,
    BridgeError, BridgeResult,
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

pub type Adapter = Option<Arc<dyn WalletAdapter>>;

/// A token balance with registry metadata attached
#[derive(Debug, Clone, PartialEq)]
pub struct UserToken {
    pub account: TokenFromApi,
    pub name: String,
    pub symbol: String,
    pub icon: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    adapter: Arc<watch::Sender<Adapter>>,
    clock: Arc<watch::Sender<Option<ClockInfo>>>,
    user_tokens: Arc<watch::Sender<Vec<UserToken>>>,
    token_map: Arc<watch::Sender<TokenMap>>,
    network: Arc<watch::Sender<String>>,
    transactions: TransactionTracker,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_NETWORK)
    }
}

impl AppState {
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            adapter: Arc::new(watch::channel(None).0),
            clock: Arc::new(watch::channel(None).0),
            user_tokens: Arc::new(watch::channel(Vec::new()).0),
            token_map: Arc::new(watch::channel(TokenMap::new()).0),
            network: Arc::new(watch::channel(network.into()).0),
            transactions: TransactionTracker::new(),
        }
    }

    // ================================================================================================
    // Wallet
    // ================================================================================================

    pub fn set_wallet(&self, adapter: Arc<dyn WalletAdapter>) {
        self.adapter.send_replace(Some(adapter));
    }

    pub fn clear_wallet(&self) {
        self.adapter.send_replace(None);
    }

    /// Connect `adapter` and make it the current wallet.
    pub async fn connect_wallet(&self, adapter: Arc<dyn WalletAdapter>) -> BridgeResult<()> {
        adapter.connect().await?;
        self.set_wallet(adapter);
        Ok(())
    }

    pub fn wallet(&self) -> Adapter {
        self.adapter.borrow().clone()
    }

    /// A wallet is set and exposes a public key
    pub fn connected(&self) -> bool {
        self.adapter
            .borrow()
            .as_ref()
            .is_some_and(|adapter| adapter.public_key().is_some())
    }

    pub fn watch_wallet(&self) -> watch::Receiver<Adapter> {
        self.adapter.subscribe()
    }

    // ================================================================================================
    // Chain data
    // ================================================================================================

    pub fn set_clock(&self, clock: Option<ClockInfo>) {
        self.clock.send_replace(clock);
    }

    pub fn clock(&self) -> Option<ClockInfo> {
        *self.clock.borrow()
    }

    pub fn watch_clock(&self) -> watch::Receiver<Option<ClockInfo>> {
        self.clock.subscribe()
    }

    pub async fn refresh_clock(
        &self,
        connection: &dyn Connection,
    ) -> BridgeResult<Option<ClockInfo>> {
        let clock = get_clock_account(connection).await?;
        self.set_clock(clock);
        Ok(clock)
    }

    // ================================================================================================
    // Tokens
    // ================================================================================================

    pub fn set_token_map(&self, tokens: Vec<TokenRegistryEntry>) {
        self.token_map.send_replace(build_token_map(tokens));
    }

    pub fn token_map(&self) -> TokenMap {
        self.token_map.borrow().clone()
    }

    pub fn watch_token_map(&self) -> watch::Receiver<TokenMap> {
        self.token_map.subscribe()
    }

    pub async fn load_token_registry(
        &self,
        registry: &TokenRegistry,
        chain: ChainId,
    ) -> BridgeResult<usize> {
        let tokens = registry.fetch(chain).await?;
        let count = tokens.len();
        self.set_token_map(tokens);
        Ok(count)
    }

    /// Replace the user's balances, attaching registry metadata by mint.
    pub fn update_user_tokens(&self, accounts: Vec<TokenFromApi>) {
        let user_tokens = {
            let token_map = self.token_map.borrow();
            accounts
                .into_iter()
                .map(|account| {
                    let known = token_map.get(&account.info.mint);
                    let fallback = abbreviate_address(&account.info.mint);
                    UserToken {
                        name: known.map_or_else(|| fallback.clone(), |t| t.name.clone()),
                        symbol: known.map_or_else(|| fallback.clone(), |t| t.symbol.clone()),
                        icon: known.and_then(|t| t.logo_uri.clone()),
                        account,
                    }
                })
                .collect()
        };
        self.user_tokens.send_replace(user_tokens);
    }

    pub fn user_tokens(&self) -> Vec<UserToken> {
        self.user_tokens.borrow().clone()
    }

    pub fn watch_user_tokens(&self) -> watch::Receiver<Vec<UserToken>> {
        self.user_tokens.subscribe()
    }

    /// Fetch the connected wallet's token accounts and store them.
    pub async fn refresh_user_tokens(&self, connection: &dyn Connection) -> BridgeResult<usize> {
        let owner = self
            .wallet()
            .and_then(|adapter| adapter.public_key())
            .ok_or(BridgeError::WalletNotConnected)?;

        let accounts = fetch_token_accounts(connection, &owner, &TOKEN_PROGRAM_ID).await?;
        let count = accounts.len();
        self.update_user_tokens(accounts);
        info!("Loaded {} token accounts for {}", count, owner);
        Ok(count)
    }

    // ================================================================================================
    // Network & transactions
    // ================================================================================================

    pub fn set_network(&self, network: impl Into<String>) {
        self.network.send_replace(network.into());
    }

    pub fn network(&self) -> String {
        self.network.borrow().clone()
    }

    pub fn transactions(&self) -> &TransactionTracker {
        &self.transactions
    }
}
