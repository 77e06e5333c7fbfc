use crate::{
    constants::{CONFIRMED, DEFAULT_NETWORK, DEFAULT_TOKEN_LIST_URL},
    registry::ChainId,
    BridgeError, BridgeResult,
};
use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::CommitmentConfig;
use std::time::Duration;

/// How long the tracker waits before polling a signature it couldn't subscribe to
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_millis(50_000);

/// Connection and tracking settings for the bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// JSON-RPC endpoint
    pub rpc_url: String,

    /// Websocket endpoint; derived from `rpc_url` when absent
    pub ws_url: Option<String>,

    /// Default commitment for reads and subscriptions
    pub commitment: CommitmentConfig,

    /// Delay before the one-shot status poll when subscribing fails
    #[serde(with = "duration_millis")]
    pub confirmation_timeout: Duration,

    /// Static token list consumed by the registry
    pub token_list_url: String,

    /// Which cluster's tokens to keep from the registry
    pub chain_id: ChainId,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_NETWORK.to_string(),
            ws_url: None,
            commitment: CONFIRMED,
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
            token_list_url: DEFAULT_TOKEN_LIST_URL.to_string(),
            chain_id: ChainId::MainnetBeta,
        }
    }
}

impl BridgeConfig {
    pub fn validate(&self) -> BridgeResult<()> {
        for (name, value) in [
            ("rpc_url", &self.rpc_url),
            ("token_list_url", &self.token_list_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| BridgeError::InvalidConfig(format!("{name} {value}: {e}")))?;
        }
        if let Some(ws_url) = &self.ws_url {
            url::Url::parse(ws_url)
                .map_err(|e| BridgeError::InvalidConfig(format!("ws_url {ws_url}: {e}")))?;
        }
        if self.confirmation_timeout.is_zero() {
            return Err(BridgeError::InvalidConfig(
                "confirmation_timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
