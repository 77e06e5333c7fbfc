/*!
# Transaction Confirmation Tracker

Every tracked signature starts as `Unknown` and moves exactly once to
`Success` or `Fail`. Resolution comes from a signature subscription, or, when
subscribing isn't possible, from a single status poll after a timeout.

The status table lives behind a `watch` channel: writers go through
[`TransactionTracker::add_transaction`] and
[`TransactionTracker::update_transaction`], observers hold receivers and see
whole-map snapshots.
*/

use crate::connection::Connection;
use serde::{Deserialize, Serialize};
use solana_sdk::signature::Signature;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxStatus {
    Unknown,
    Success,
    Fail,
}

impl TxStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TxStatus::Unknown)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInfo {
    pub name: String,
    pub status: TxStatus,
}

/// Tracked transactions by signature
pub type TxMap = HashMap<String, TxInfo>;

#[derive(Clone)]
pub struct TransactionTracker {
    transactions: Arc<watch::Sender<TxMap>>,
}

impl Default for TransactionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionTracker {
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(TxMap::new());
        Self {
            transactions: Arc::new(sender),
        }
    }

    /// Register `signature` as `Unknown`. An already tracked signature is left untouched.
    pub fn add_transaction(&self, signature: &str, name: &str) -> bool {
        self.transactions.send_if_modified(|map| {
            if map.contains_key(signature) {
                return false;
            }
            map.insert(
                signature.to_string(),
                TxInfo {
                    name: name.to_string(),
                    status: TxStatus::Unknown,
                },
            );
            true
        })
    }

    /// Resolve a tracked signature.
    ///
    /// Only the first transition out of `Unknown` is applied; unknown
    /// signatures, `Unknown` targets and already resolved entries are ignored.
    pub fn update_transaction(&self, signature: &str, status: TxStatus) -> bool {
        self.transactions.send_if_modified(|map| match map.get_mut(signature) {
            Some(info) if !info.status.is_terminal() && status.is_terminal() => {
                info.status = status;
                true
            }
            _ => false,
        })
    }

    pub fn get(&self, signature: &str) -> Option<TxInfo> {
        self.transactions.borrow().get(signature).cloned()
    }

    pub fn snapshot(&self) -> TxMap {
        self.transactions.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TxMap> {
        self.transactions.subscribe()
    }

    /// Wait until `signature` is resolved. `None` if it isn't tracked.
    pub async fn wait_for_status(&self, signature: &str) -> Option<TxStatus> {
        let mut receiver = self.subscribe();
        let map = receiver
            .wait_for(|map| map.get(signature).map_or(true, |info| info.status.is_terminal()))
            .await
            .ok()?;
        map.get(signature).map(|info| info.status)
    }

    /// Register `signature` and resolve it in the background.
    ///
    /// If the subscription can't be set up, or closes without a notification,
    /// the status is polled once after `timeout`. A failed poll leaves the entry
    /// `Unknown`; nothing retries it.
    pub fn await_confirmation(
        &self,
        signature: Signature,
        name: &str,
        connection: Arc<dyn Connection>,
        timeout: Duration,
    ) -> JoinHandle<()> {
        let key = signature.to_string();
        if self.add_transaction(&key, name) {
            info!("Tracking transaction {} ({})", key, name);
        }

        let tracker = self.clone();
        tokio::spawn(async move {
            let commitment = connection.commitment();
            match connection.on_signature(&signature, commitment).await {
                Ok(subscription) => match subscription.await {
                    Some(notification) => {
                        let status = match notification.err {
                            Some(err) => {
                                debug!("Transaction {} failed: {}", key, err);
                                TxStatus::Fail
                            }
                            None => TxStatus::Success,
                        };
                        tracker.resolve(&key, status);
                        return;
                    }
                    None => warn!(
                        "Subscription for {} closed early, polling in {:?}",
                        key, timeout
                    ),
                },
                Err(e) => warn!(
                    "Cannot subscribe to {}: {}, polling in {:?}",
                    key, e, timeout
                ),
            }

            tokio::time::sleep(timeout).await;
            match connection.get_signature_status(&signature).await {
                Ok(Some(Ok(()))) => tracker.resolve(&key, TxStatus::Success),
                Ok(_) => tracker.resolve(&key, TxStatus::Fail),
                Err(e) => warn!("Status poll for {} failed, leaving it Unknown: {}", key, e),
            }
        })
    }

    fn resolve(&self, signature: &str, status: TxStatus) {
        if self.update_transaction(signature, status) {
            info!("Transaction {} resolved: {:?}", signature, status);
        } else {
            debug!("Ignoring late {:?} for {}", status, signature);
        }
    }
}
