use thiserror::Error;

/// Errors surfaced by every fallible bridge operation
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("RPC client error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    #[error("Pubsub error: {0}")]
    Pubsub(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Can't create wrapped SOL account")]
    WrappedSolNotSupported,

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Instruction build error: {0}")]
    InstructionBuild(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    #[error("Token registry error: {0}")]
    Registry(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<solana_sdk::signer::SignerError> for BridgeError {
    fn from(err: solana_sdk::signer::SignerError) -> Self {
        BridgeError::Signing(err.to_string())
    }
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        BridgeError::Registry(err.to_string())
    }
}
