/*!
# Token Registry

Static token metadata (name, symbol, icon) keyed by address, fetched from a
token-list JSON document and narrowed to one cluster.
*/

use crate::BridgeResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Tags whose tokens are never shown as user balances
pub const DEFAULT_EXCLUDED_TAGS: [&str; 6] = [
    "lp-token",
    "leveraged",
    "bull",
    "bear",
    "nft",
    "security-token",
];

/// Known tokens by address
pub type TokenMap = HashMap<String, TokenRegistryEntry>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainId {
    MainnetBeta,
    Testnet,
    Devnet,
}

impl ChainId {
    /// Numeric id used in token-list documents
    pub fn id(self) -> u64 {
        match self {
            ChainId::MainnetBeta => 101,
            ChainId::Testnet => 102,
            ChainId::Devnet => 103,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRegistryEntry {
    pub chain_id: u64,
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(rename = "logoURI", default)]
    pub logo_uri: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TokenListDocument {
    tokens: Vec<TokenRegistryEntry>,
}

/// Drop entries carrying any excluded tag or belonging to another cluster.
pub fn filter_token_list(
    tokens: Vec<TokenRegistryEntry>,
    excluded_tags: &[&str],
    chain: ChainId,
) -> Vec<TokenRegistryEntry> {
    tokens
        .into_iter()
        .filter(|token| token.chain_id == chain.id())
        .filter(|token| {
            !token
                .tags
                .iter()
                .any(|tag| excluded_tags.contains(&tag.as_str()))
        })
        .collect()
}

pub fn build_token_map(tokens: Vec<TokenRegistryEntry>) -> TokenMap {
    tokens
        .into_iter()
        .map(|token| (token.address.clone(), token))
        .collect()
}

/// Fetches the static token list over HTTP
pub struct TokenRegistry {
    http: reqwest::Client,
    url: String,
}

impl TokenRegistry {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Fetch the list and keep `chain`'s tokens minus the default excluded tags.
    pub async fn fetch(&self, chain: ChainId) -> BridgeResult<Vec<TokenRegistryEntry>> {
        debug!("Fetching token list from {}", self.url);
        let document: TokenListDocument = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let fetched = document.tokens.len();
        let tokens = filter_token_list(document.tokens, &DEFAULT_EXCLUDED_TAGS, chain);
        info!(
            "Token registry: kept {} of {} entries for {:?}",
            tokens.len(),
            fetched,
            chain
        );
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(address: &str, chain_id: u64, tags: &[&str]) -> TokenRegistryEntry {
        TokenRegistryEntry {
            chain_id,
            address: address.to_string(),
            symbol: address.to_uppercase(),
            name: format!("{address} token"),
            decimals: 6,
            logo_uri: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_filter_excludes_tags_and_other_chains() {
        let tokens = vec![
            entry("usdc", 101, &["stablecoin"]),
            entry("lp", 101, &["lp-token"]),
            entry("ape", 101, &["nft"]),
            entry("devusdc", 103, &[]),
            entry("ray", 101, &[]),
        ];

        let kept = filter_token_list(tokens, &DEFAULT_EXCLUDED_TAGS, ChainId::MainnetBeta);
        let addresses: Vec<_> = kept.iter().map(|t| t.address.as_str()).collect();
        assert_eq!(addresses, vec!["usdc", "ray"]);
    }

    #[test]
    fn test_build_token_map_keys_by_address() {
        let map = build_token_map(vec![entry("a", 101, &[]), entry("b", 101, &[])]);
        assert_eq!(map.len(), 2);
        assert_eq!(map["b"].symbol, "B");
    }

    #[test]
    fn test_token_list_document_parsing() {
        let document: TokenListDocument = serde_json::from_str(
            r#"{
                "name": "Solana Token List",
                "tokens": [{
                    "chainId": 101,
                    "address": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                    "symbol": "USDC",
                    "name": "USD Coin",
                    "decimals": 6,
                    "logoURI": "https://example.com/usdc.png",
                    "tags": ["stablecoin"],
                    "extensions": {"website": "https://www.centre.io/"}
                }]
            }"#,
        )
        .unwrap();

        let usdc = &document.tokens[0];
        assert_eq!(usdc.logo_uri.as_deref(), Some("https://example.com/usdc.png"));
        assert_eq!(usdc.tags, vec!["stablecoin"]);
    }

    #[test]
    fn test_chain_ids() {
        assert_eq!(ChainId::MainnetBeta.id(), 101);
        assert_eq!(ChainId::Testnet.id(), 102);
        assert_eq!(ChainId::Devnet.id(), 103);
    }
}
