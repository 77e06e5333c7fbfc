use crate::error::{CliError, CliResult};
use solana_sdk::signature::{read_keypair_file, Keypair};
use sollet_bridge_client::BridgeConfig;
use std::path::{Path, PathBuf};

/// Load the bridge configuration from an optional YAML file, then apply flag overrides.
pub fn load_config(path: Option<&Path>, rpc_url: Option<String>) -> CliResult<BridgeConfig> {
    let mut config = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            serde_yaml::from_str(&contents)?
        }
        None => BridgeConfig::default(),
    };

    if let Some(rpc_url) = rpc_url {
        config.rpc_url = rpc_url;
    }

    config
        .validate()
        .map_err(|e| CliError::InvalidConfig(e.to_string()))?;
    Ok(config)
}

pub fn load_keypair(path: &PathBuf) -> CliResult<Keypair> {
    read_keypair_file(path).map_err(|e| CliError::Keypair(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config(None, None).unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_yaml_file_with_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "rpc_url: https://api.devnet.solana.com\nchain_id: devnet\nconfirmation_timeout: 20000"
        )
        .unwrap();

        let config = load_config(
            Some(file.path()),
            Some("http://127.0.0.1:8899".to_string()),
        )
        .unwrap();
        assert_eq!(config.rpc_url, "http://127.0.0.1:8899");
        assert_eq!(config.confirmation_timeout, Duration::from_secs(20));
        assert_eq!(config.chain_id, sollet_bridge_client::ChainId::Devnet);
    }

    #[test]
    fn test_invalid_rpc_url_is_rejected() {
        let result = load_config(None, Some("localhost".to_string()));
        assert!(matches!(result, Err(CliError::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_keypair_file() {
        let result = load_keypair(&PathBuf::from("/nonexistent/id.json"));
        assert!(matches!(result, Err(CliError::Keypair(_))));
    }
}
