use sollet_bridge_client::BridgeError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read keypair: {0}")]
    Keypair(String),

    #[error("Command execution failed: {0}")]
    CommandExecution(String),
}
