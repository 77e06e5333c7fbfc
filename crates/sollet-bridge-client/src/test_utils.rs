//! In-memory `Connection` for unit tests.

use crate::{
    connection::{Connection, SignatureSubscription},
    types::{SignatureNotification, TokenFromApi},
    BridgeError, BridgeResult,
};
use async_trait::async_trait;
use solana_sdk::{
    account::Account,
    commitment_config::{CommitmentConfig, CommitmentLevel},
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::TransactionError,
};
use std::{collections::HashMap, sync::Mutex};
use tokio::sync::oneshot;

pub const RENT_EXEMPT_LAMPORTS: u64 = 2_039_280;

pub enum SubscriptionMode {
    /// `on_signature` itself fails
    Unavailable,
    /// Subscribes, then closes without a notification
    Closed,
    /// Notifies right away
    Immediate(SignatureNotification),
    /// Notifies when the test sends on the paired sender
    Manual(oneshot::Receiver<SignatureNotification>),
}

pub enum StatusReply {
    Status(Option<Result<(), TransactionError>>),
    NetworkError,
}

pub struct MockConnection {
    pub accounts: Mutex<HashMap<Pubkey, Account>>,
    pub token_accounts: Vec<TokenFromApi>,
    pub account_info_error: Option<String>,
    pub rent_error: Option<String>,
    pub blockhash: Hash,
    pub blockhash_error: Option<String>,
    pub send_error: Option<String>,
    pub subscription: Mutex<Option<SubscriptionMode>>,
    pub status_reply: Mutex<Option<StatusReply>>,
    pub calls: Mutex<Vec<&'static str>>,
    pub sent: Mutex<Vec<Vec<u8>>>,
}

impl Default for MockConnection {
    fn default() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            token_accounts: Vec::new(),
            account_info_error: None,
            rent_error: None,
            blockhash: Hash::new_unique(),
            blockhash_error: None,
            send_error: None,
            subscription: Mutex::new(Some(SubscriptionMode::Unavailable)),
            status_reply: Mutex::new(Some(StatusReply::Status(Some(Ok(()))))),
            calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, address: Pubkey, account: Account) -> Self {
        self.accounts.lock().unwrap().insert(address, account);
        self
    }

    pub fn with_subscription(self, mode: SubscriptionMode) -> Self {
        *self.subscription.lock().unwrap() = Some(mode);
        self
    }

    pub fn with_status(self, reply: StatusReply) -> Self {
        *self.status_reply.lock().unwrap() = Some(reply);
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Connection for MockConnection {
    fn commitment(&self) -> CommitmentConfig {
        CommitmentConfig::confirmed()
    }

    async fn get_parsed_token_accounts_by_owner(
        &self,
        _owner: &Pubkey,
        _program_id: &Pubkey,
        _commitment: CommitmentConfig,
    ) -> BridgeResult<Vec<TokenFromApi>> {
        self.record("get_parsed_token_accounts_by_owner");
        Ok(self.token_accounts.clone())
    }

    async fn get_account_info(
        &self,
        address: &Pubkey,
        _commitment: CommitmentConfig,
    ) -> BridgeResult<Option<Account>> {
        self.record("get_account_info");
        if let Some(msg) = &self.account_info_error {
            return Err(BridgeError::Network(msg.clone()));
        }
        Ok(self.accounts.lock().unwrap().get(address).cloned())
    }

    async fn get_minimum_balance_for_rent_exemption(&self, _data_len: usize) -> BridgeResult<u64> {
        self.record("get_minimum_balance_for_rent_exemption");
        match &self.rent_error {
            Some(msg) => Err(BridgeError::Network(msg.clone())),
            None => Ok(RENT_EXEMPT_LAMPORTS),
        }
    }

    async fn get_latest_blockhash(&self, _commitment: CommitmentConfig) -> BridgeResult<Hash> {
        self.record("get_latest_blockhash");
        match &self.blockhash_error {
            Some(msg) => Err(BridgeError::Network(msg.clone())),
            None => Ok(self.blockhash),
        }
    }

    async fn send_raw_transaction(
        &self,
        raw_transaction: &[u8],
        _preflight_commitment: CommitmentLevel,
    ) -> BridgeResult<Signature> {
        self.record("send_raw_transaction");
        if let Some(msg) = &self.send_error {
            return Err(BridgeError::Network(msg.clone()));
        }
        self.sent.lock().unwrap().push(raw_transaction.to_vec());
        Ok(Signature::new_unique())
    }

    async fn get_signature_status(
        &self,
        _signature: &Signature,
    ) -> BridgeResult<Option<Result<(), TransactionError>>> {
        self.record("get_signature_status");
        match self.status_reply.lock().unwrap().take() {
            Some(StatusReply::Status(status)) => Ok(status),
            Some(StatusReply::NetworkError) | None => {
                Err(BridgeError::Network("connection reset".to_string()))
            }
        }
    }

    async fn on_signature(
        &self,
        _signature: &Signature,
        _commitment: CommitmentConfig,
    ) -> BridgeResult<SignatureSubscription> {
        self.record("on_signature");
        match self.subscription.lock().unwrap().take() {
            Some(SubscriptionMode::Unavailable) | None => {
                Err(BridgeError::Pubsub("websocket unavailable".to_string()))
            }
            Some(SubscriptionMode::Closed) => Ok(Box::pin(async { None })),
            Some(SubscriptionMode::Immediate(notification)) => {
                Ok(Box::pin(async move { Some(notification) }))
            }
            Some(SubscriptionMode::Manual(receiver)) => {
                Ok(Box::pin(async move { receiver.await.ok() }))
            }
        }
    }
}
