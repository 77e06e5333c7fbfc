/*!
# Wallet Adapter

Anything that can expose a public key and sign transactions on the user's
behalf. Signing is a suspension point: an adapter may wait on an external
approval for as long as it likes, or reject.
*/

use crate::{BridgeError, BridgeResult};
use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

#[async_trait]
pub trait WalletAdapter: Send + Sync {
    /// `None` until connected
    fn public_key(&self) -> Option<Pubkey>;

    fn connected(&self) -> bool {
        self.public_key().is_some()
    }

    /// Whether signing proceeds without an approval prompt
    fn auto_approve(&self) -> bool;

    async fn connect(&self) -> BridgeResult<Pubkey>;

    async fn disconnect(&self);

    async fn sign_transaction(&self, transaction: Transaction) -> BridgeResult<Transaction>;

    async fn sign_all_transactions(
        &self,
        transactions: Vec<Transaction>,
    ) -> BridgeResult<Vec<Transaction>> {
        let mut signed = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            signed.push(self.sign_transaction(transaction).await?);
        }
        Ok(signed)
    }
}

type ConnectCallback = Box<dyn Fn(Pubkey) + Send + Sync>;
type DisconnectCallback = Box<dyn Fn() + Send + Sync>;
type ApprovalGate = Box<dyn Fn(&Transaction) -> bool + Send + Sync>;

/// The two events a wallet reports, each with one callback slot
#[derive(Default)]
pub struct WalletEvents {
    on_connect: Option<ConnectCallback>,
    on_disconnect: Option<DisconnectCallback>,
}

impl WalletEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_connect(mut self, callback: impl Fn(Pubkey) + Send + Sync + 'static) -> Self {
        self.on_connect = Some(Box::new(callback));
        self
    }

    pub fn on_disconnect(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_disconnect = Some(Box::new(callback));
        self
    }

    pub fn emit_connect(&self, public_key: Pubkey) {
        if let Some(callback) = &self.on_connect {
            callback(public_key);
        }
    }

    pub fn emit_disconnect(&self) {
        if let Some(callback) = &self.on_disconnect {
            callback();
        }
    }
}

/// Wallet adapter backed by a local keypair
pub struct KeypairWallet {
    keypair: Keypair,
    connected: AtomicBool,
    events: WalletEvents,
    approval: Option<ApprovalGate>,
}

impl KeypairWallet {
    /// Create a wallet that approves every signing request
    pub fn new(keypair: Keypair) -> Self {
        Self::with_events(keypair, WalletEvents::default())
    }

    pub fn with_events(keypair: Keypair, events: WalletEvents) -> Self {
        Self {
            keypair,
            connected: AtomicBool::new(false),
            events,
            approval: None,
        }
    }

    /// Ask `gate` before every signature; `false` rejects the request.
    pub fn with_approval(
        mut self,
        gate: impl Fn(&Transaction) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.approval = Some(Box::new(gate));
        self
    }
}

#[async_trait]
impl WalletAdapter for KeypairWallet {
    fn public_key(&self) -> Option<Pubkey> {
        self.connected
            .load(Ordering::Acquire)
            .then(|| self.keypair.pubkey())
    }

    fn auto_approve(&self) -> bool {
        self.approval.is_none()
    }

    async fn connect(&self) -> BridgeResult<Pubkey> {
        let public_key = self.keypair.pubkey();
        if !self.connected.swap(true, Ordering::AcqRel) {
            info!("Connected to {}", public_key);
            self.events.emit_connect(public_key);
        }
        Ok(public_key)
    }

    async fn disconnect(&self) {
        if self.connected.swap(false, Ordering::AcqRel) {
            info!("Disconnected");
            self.events.emit_disconnect();
        }
    }

    async fn sign_transaction(&self, mut transaction: Transaction) -> BridgeResult<Transaction> {
        if !self.connected() {
            return Err(BridgeError::WalletNotConnected);
        }
        if let Some(gate) = &self.approval {
            if !gate(&transaction) {
                return Err(BridgeError::Signing(
                    "Transaction rejected by user".to_string(),
                ));
            }
        }

        let recent_blockhash = transaction.message.recent_blockhash;
        transaction.try_partial_sign(&[&self.keypair], recent_blockhash)?;
        Ok(transaction)
    }
}
