/*!
# RPC Connection

The network capability set the bridge depends on. `RpcConnection` drives a real
cluster through the nonblocking `solana-client` RPC and pubsub clients; tests
substitute their own implementation.
*/

use crate::{
    config::BridgeConfig,
    types::{SignatureNotification, TokenAccountInfo, TokenFromApi},
    BridgeError, BridgeResult,
};
use async_trait::async_trait;
use futures::{future::BoxFuture, Stream, StreamExt};
use serde_json::{json, Value};
use solana_client::{
    nonblocking::{pubsub_client::PubsubClient, rpc_client::RpcClient},
    rpc_config::RpcSignatureSubscribeConfig,
    rpc_request::{RpcRequest, TokenAccountsFilter},
    rpc_response::{Response, RpcSignatureResult},
};
use solana_sdk::{
    account::Account,
    commitment_config::{CommitmentConfig, CommitmentLevel},
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::TransactionError,
};
use std::{str::FromStr, sync::Arc};
use tokio::sync::oneshot;
use tracing::debug;

/// Resolves with the first notification, or `None` if the subscription closed first
pub type SignatureSubscription = BoxFuture<'static, Option<SignatureNotification>>;

#[async_trait]
pub trait Connection: Send + Sync {
    /// Commitment used for subscriptions when the caller doesn't pick one
    fn commitment(&self) -> CommitmentConfig;

    async fn get_parsed_token_accounts_by_owner(
        &self,
        owner: &Pubkey,
        program_id: &Pubkey,
        commitment: CommitmentConfig,
    ) -> BridgeResult<Vec<TokenFromApi>>;

    async fn get_account_info(
        &self,
        address: &Pubkey,
        commitment: CommitmentConfig,
    ) -> BridgeResult<Option<Account>>;

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> BridgeResult<u64>;

    async fn get_latest_blockhash(&self, commitment: CommitmentConfig) -> BridgeResult<Hash>;

    async fn send_raw_transaction(
        &self,
        raw_transaction: &[u8],
        preflight_commitment: CommitmentLevel,
    ) -> BridgeResult<Signature>;

    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> BridgeResult<Option<Result<(), TransactionError>>>;

    /// Subscribe to the processing notification for `signature`.
    ///
    /// An `Err` means the subscription could not be established at all.
    async fn on_signature(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> BridgeResult<SignatureSubscription>;
}

/// `Connection` over a JSON-RPC endpoint and its websocket companion
pub struct RpcConnection {
    rpc_client: Arc<RpcClient>,
    ws_url: String,
}

impl RpcConnection {
    pub fn new(config: &BridgeConfig) -> BridgeResult<Self> {
        let ws_url = match &config.ws_url {
            Some(url) => url.clone(),
            None => websocket_url_for(&config.rpc_url)?,
        };
        let rpc_client = RpcClient::new_with_commitment(config.rpc_url.clone(), config.commitment);

        Ok(Self {
            rpc_client: Arc::new(rpc_client),
            ws_url,
        })
    }

    pub fn rpc_client(&self) -> &RpcClient {
        &self.rpc_client
    }

    pub fn ws_url(&self) -> &str {
        &self.ws_url
    }
}

#[async_trait]
impl Connection for RpcConnection {
    fn commitment(&self) -> CommitmentConfig {
        self.rpc_client.commitment()
    }

    async fn get_parsed_token_accounts_by_owner(
        &self,
        owner: &Pubkey,
        program_id: &Pubkey,
        commitment: CommitmentConfig,
    ) -> BridgeResult<Vec<TokenFromApi>> {
        let keyed_accounts = self
            .rpc_client
            .get_token_accounts_by_owner_with_commitment(
                owner,
                TokenAccountsFilter::ProgramId(*program_id),
                commitment,
            )
            .await?
            .value;

        keyed_accounts
            .into_iter()
            .map(|keyed| {
                let data = serde_json::to_value(&keyed.account.data)
                    .map_err(|e| BridgeError::InvalidAccountData(e.to_string()))?;
                parse_token_account(&keyed.pubkey, keyed.account.lamports, &data)
            })
            .collect()
    }

    async fn get_account_info(
        &self,
        address: &Pubkey,
        commitment: CommitmentConfig,
    ) -> BridgeResult<Option<Account>> {
        Ok(self
            .rpc_client
            .get_account_with_commitment(address, commitment)
            .await?
            .value)
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> BridgeResult<u64> {
        Ok(self
            .rpc_client
            .get_minimum_balance_for_rent_exemption(data_len)
            .await?)
    }

    async fn get_latest_blockhash(&self, commitment: CommitmentConfig) -> BridgeResult<Hash> {
        let (blockhash, _last_valid_height) = self
            .rpc_client
            .get_latest_blockhash_with_commitment(commitment)
            .await?;
        Ok(blockhash)
    }

    async fn send_raw_transaction(
        &self,
        raw_transaction: &[u8],
        preflight_commitment: CommitmentLevel,
    ) -> BridgeResult<Signature> {
        let encoded = bs58::encode(raw_transaction).into_string();
        let signature: String = self
            .rpc_client
            .send(
                RpcRequest::SendTransaction,
                json!([encoded, {
                    "encoding": "base58",
                    "preflightCommitment": preflight_commitment,
                }]),
            )
            .await?;

        Signature::from_str(&signature).map_err(|e| {
            BridgeError::Network(format!("RPC returned invalid signature {signature}: {e}"))
        })
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> BridgeResult<Option<Result<(), TransactionError>>> {
        Ok(self.rpc_client.get_signature_status(signature).await?)
    }

    async fn on_signature(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> BridgeResult<SignatureSubscription> {
        let ws_url = self.ws_url.clone();
        let signature = *signature;
        let (ready_tx, ready_rx) = oneshot::channel::<BridgeResult<()>>();
        let (notify_tx, notify_rx) = oneshot::channel::<SignatureNotification>();

        // The pubsub stream borrows its client, so both live in one task.
        tokio::spawn(async move {
            let client = match PubsubClient::new(&ws_url).await {
                Ok(client) => client,
                Err(e) => {
                    let _ = ready_tx.send(Err(BridgeError::Pubsub(e.to_string())));
                    return;
                }
            };

            let config = RpcSignatureSubscribeConfig {
                commitment: Some(commitment),
                enable_received_notification: Some(false),
            };
            let (mut stream, unsubscribe) =
                match client.signature_subscribe(&signature, Some(config)).await {
                    Ok(subscription) => subscription,
                    Err(e) => {
                        let _ = ready_tx.send(Err(BridgeError::Pubsub(e.to_string())));
                        return;
                    }
                };
            let _ = ready_tx.send(Ok(()));

            forward_signature_result(&mut stream, notify_tx).await;

            drop(stream);
            unsubscribe().await;
            debug!("Signature subscription for {} closed", signature);
        });

        ready_rx
            .await
            .map_err(|_| BridgeError::Pubsub("subscription task ended early".to_string()))??;

        Ok(Box::pin(async move { notify_rx.await.ok() }))
    }
}

/// Forward the first processed result to `notify_tx`.
///
/// Returns `false` without notifying once the receiver is dropped or the
/// stream ends.
async fn forward_signature_result<S>(
    stream: &mut S,
    mut notify_tx: oneshot::Sender<SignatureNotification>,
) -> bool
where
    S: Stream<Item = Response<RpcSignatureResult>> + Unpin,
{
    loop {
        tokio::select! {
            _ = notify_tx.closed() => return false,
            response = stream.next() => match response {
                Some(Response {
                    value: RpcSignatureResult::ProcessedSignature(processed),
                    ..
                }) => {
                    return notify_tx
                        .send(SignatureNotification {
                            err: processed.err.map(|e| e.to_string()),
                        })
                        .is_ok();
                }
                Some(_) => {}
                None => return false,
            },
        }
    }
}

/// Decode one `jsonParsed` token account payload.
pub(crate) fn parse_token_account(
    pubkey: &str,
    lamports: u64,
    data: &Value,
) -> BridgeResult<TokenFromApi> {
    let pubkey = Pubkey::from_str(pubkey)
        .map_err(|e| BridgeError::InvalidAccountData(format!("bad pubkey {pubkey}: {e}")))?;

    let info = data
        .get("parsed")
        .and_then(|parsed| parsed.get("info"))
        .ok_or_else(|| {
            BridgeError::InvalidAccountData(format!("account {pubkey} is not jsonParsed"))
        })?;
    let info: TokenAccountInfo = serde_json::from_value(info.clone()).map_err(|e| {
        BridgeError::InvalidAccountData(format!("Failed to decode token account {pubkey}: {e}"))
    })?;

    Ok(TokenFromApi {
        pubkey,
        lamports,
        info,
    })
}

/// `http(s)://host:port` -> `ws(s)://host:port+1`, the way the solana CLI pairs them.
pub fn websocket_url_for(rpc_url: &str) -> BridgeResult<String> {
    let mut url = url::Url::parse(rpc_url)
        .map_err(|e| BridgeError::InvalidConfig(format!("invalid RPC URL {rpc_url}: {e}")))?;

    let scheme = match url.scheme() {
        "https" => "wss",
        "http" => "ws",
        other => {
            return Err(BridgeError::InvalidConfig(format!(
                "unsupported RPC URL scheme: {other}"
            )))
        }
    };
    url.set_scheme(scheme).map_err(|_| {
        BridgeError::InvalidConfig(format!("cannot derive websocket URL from {rpc_url}"))
    })?;

    if let Some(port) = url.port() {
        url.set_port(Some(port.saturating_add(1)))
            .map_err(|_| BridgeError::InvalidConfig(format!("cannot set port on {rpc_url}")))?;
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_client::rpc_response::{
        ProcessedSignatureResult, ReceivedSignatureResult, RpcResponseContext,
    };

    fn signature_response(value: RpcSignatureResult) -> Response<RpcSignatureResult> {
        Response {
            context: RpcResponseContext::new(1),
            value,
        }
    }

    #[tokio::test]
    async fn test_forward_skips_received_notification() {
        let (notify_tx, notify_rx) = oneshot::channel();
        let mut stream = futures::stream::iter(vec![
            signature_response(RpcSignatureResult::ReceivedSignature(
                ReceivedSignatureResult::ReceivedSignature,
            )),
            signature_response(RpcSignatureResult::ProcessedSignature(
                ProcessedSignatureResult {
                    err: Some(TransactionError::AccountNotFound),
                },
            )),
        ]);

        assert!(forward_signature_result(&mut stream, notify_tx).await);
        let notification = notify_rx.await.unwrap();
        assert!(notification.err.is_some());
    }

    #[tokio::test]
    async fn test_forward_stops_when_subscriber_dropped() {
        let (notify_tx, notify_rx) = oneshot::channel();
        let mut stream = futures::stream::pending::<Response<RpcSignatureResult>>();
        drop(notify_rx);

        assert!(!forward_signature_result(&mut stream, notify_tx).await);
    }

    #[tokio::test]
    async fn test_forward_ends_with_stream() {
        let (notify_tx, notify_rx) = oneshot::channel();
        let mut stream = futures::stream::empty::<Response<RpcSignatureResult>>();

        assert!(!forward_signature_result(&mut stream, notify_tx).await);
        assert!(notify_rx.await.is_err());
    }

    #[test]
    fn test_websocket_url_for_https() {
        assert_eq!(
            websocket_url_for("https://api.mainnet-beta.solana.com").unwrap(),
            "wss://api.mainnet-beta.solana.com/"
        );
    }

    #[test]
    fn test_websocket_url_for_local_validator() {
        assert_eq!(
            websocket_url_for("http://127.0.0.1:8899").unwrap(),
            "ws://127.0.0.1:8900/"
        );
    }

    #[test]
    fn test_websocket_url_rejects_other_schemes() {
        assert!(matches!(
            websocket_url_for("ftp://example.com"),
            Err(BridgeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_parse_token_account() {
        let pubkey = Pubkey::new_unique();
        let data = json!({
            "program": "spl-token",
            "space": 165,
            "parsed": {
                "type": "account",
                "info": {
                    "isNative": false,
                    "mint": Pubkey::new_unique().to_string(),
                    "owner": Pubkey::new_unique().to_string(),
                    "state": "frozen",
                    "tokenAmount": {
                        "amount": "42",
                        "decimals": 0,
                        "uiAmount": 42.0,
                        "uiAmountString": "42"
                    }
                }
            }
        });

        let account = parse_token_account(&pubkey.to_string(), 2_039_280, &data).unwrap();
        assert_eq!(account.pubkey, pubkey);
        assert_eq!(account.lamports, 2_039_280);
        assert_eq!(account.info.token_amount.amount, "42");
    }

    #[test]
    fn test_parse_token_account_rejects_binary_data() {
        let data = json!(["AAAA", "base64"]);
        let result = parse_token_account(&Pubkey::new_unique().to_string(), 0, &data);
        assert!(matches!(result, Err(BridgeError::InvalidAccountData(_))));
    }

    #[test]
    fn test_rpc_connection_derives_ws_url() {
        let config = BridgeConfig {
            rpc_url: "http://localhost:8899".to_string(),
            ..Default::default()
        };
        let connection = RpcConnection::new(&config).unwrap();
        assert_eq!(connection.ws_url(), "ws://localhost:8900/");
        assert_eq!(connection.commitment(), config.commitment);
    }
}
