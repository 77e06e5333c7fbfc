pub mod balances;
pub mod clock;
pub mod create_account;
pub mod ensure_token_account;
pub mod wrap_sol;

use crate::error::{CliError, CliResult};
use sollet_bridge_client::{
    sign_and_send_transaction, AppState, BridgeConfig, Connection, CustomInstructionResult,
    KeypairWallet, RpcConnection, TxStatus, WalletAdapter, WalletEvents,
};
use solana_sdk::signature::Keypair;
use std::{sync::Arc, time::Duration};
use tracing::warn;

/// How long past the fallback poll we keep waiting for a status
const STATUS_GRACE: Duration = Duration::from_secs(10);

pub struct Session {
    pub config: BridgeConfig,
    pub connection: Arc<RpcConnection>,
    pub state: AppState,
}

impl Session {
    pub fn open(config: BridgeConfig) -> CliResult<Self> {
        let connection = Arc::new(RpcConnection::new(&config)?);
        let state = AppState::new(config.rpc_url.clone());
        Ok(Self {
            config,
            connection,
            state,
        })
    }

    /// Connect a keypair-backed wallet; disconnecting clears it from the state.
    pub async fn connect(&self, keypair: Keypair) -> CliResult<Arc<KeypairWallet>> {
        let events = WalletEvents::new()
            .on_connect(|public_key| println!("🔑 Wallet: {}", public_key))
            .on_disconnect({
                let state = self.state.clone();
                move || state.clear_wallet()
            });
        let wallet = Arc::new(KeypairWallet::with_events(keypair, events));
        self.state.connect_wallet(wallet.clone()).await?;
        Ok(wallet)
    }

    /// Sign, send and track a staged unit of work until it resolves.
    pub async fn submit(
        &self,
        wallet: &KeypairWallet,
        staged: &CustomInstructionResult,
        name: &str,
        with_cleanup: bool,
    ) -> CliResult<TxStatus> {
        let payer = wallet.public_key().ok_or_else(|| {
            CliError::CommandExecution("wallet disconnected before submission".to_string())
        })?;
        let transaction = staged.unsigned_transaction(&payer, with_cleanup);

        let signature = sign_and_send_transaction(
            self.connection.as_ref(),
            transaction,
            wallet,
            &staged.signer_refs(),
        )
        .await?;
        println!("📤 Sent: https://explorer.solana.com/tx/{}", signature);

        let connection: Arc<dyn Connection> = self.connection.clone();
        let tracker = self.state.transactions();
        let _ = tracker.await_confirmation(
            signature,
            name,
            connection,
            self.config.confirmation_timeout,
        );

        let key = signature.to_string();
        let wait = self.config.confirmation_timeout + STATUS_GRACE;
        match tokio::time::timeout(wait, tracker.wait_for_status(&key)).await {
            Ok(Some(status)) => Ok(status),
            Ok(None) => Err(CliError::CommandExecution(format!(
                "transaction {} is not tracked",
                key
            ))),
            Err(_) => {
                warn!("No status for {} after {:?}", key, wait);
                Ok(TxStatus::Unknown)
            }
        }
    }
}

pub fn report(name: &str, status: TxStatus) -> CliResult<()> {
    match status {
        TxStatus::Success => {
            println!("✅ {} confirmed", name);
            Ok(())
        }
        TxStatus::Fail => Err(CliError::CommandExecution(format!("{} failed", name))),
        TxStatus::Unknown => {
            println!("⚠️  {} status unknown; check the explorer link above", name);
            Ok(())
        }
    }
}
