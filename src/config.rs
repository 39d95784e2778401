use alloy::primitives::Address;
use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::{ConnectError, ConnectResult};
use crate::types::Token;

/// Overrides the injected wallet endpoint.
pub const ENV_WALLET_PROVIDER_URL: &str = "WALLET_PROVIDER_URL";
/// Overrides the remote endpoint base URL.
pub const ENV_REMOTE_BASE_URL: &str = "REMOTE_RPC_BASE_URL";
/// Overrides the remote endpoint identifier appended to the base URL.
pub const ENV_REMOTE_PROJECT_ID: &str = "REMOTE_PROJECT_ID";
/// Overrides the ERC-20 contract whose balance is read.
pub const ENV_TOKEN_ADDRESS: &str = "TOKEN_CONTRACT_ADDRESS";

/// Connector configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub injected: InjectedConfig,
    pub remote: RemoteConfig,
    pub token: TokenInfo,
}

/// Wallet endpoint standing in for a browser-injected provider
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InjectedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Checked when `url` is unset.
    #[serde(rename = "legacyUrl", default, skip_serializing_if = "Option::is_none")]
    pub legacy_url: Option<String>,
}

/// Remote node reached without a wallet
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    #[serde(rename = "projectId", default)]
    pub project_id: String,
}

/// Token information from config
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenInfo {
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Config {
    /// Load configuration from embedded JSON
    pub fn load() -> Result<Self> {
        Self::from_json(include_str!("../config.json"))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(raw)?;
        Ok(config)
    }

    /// Embedded configuration with process environment overrides applied
    pub fn from_env() -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides looked up by variable name. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_WALLET_PROVIDER_URL) {
            self.injected.url = Some(url);
        }
        if let Some(base) = get(ENV_REMOTE_BASE_URL) {
            self.remote.base_url = base;
        }
        if let Some(id) = get(ENV_REMOTE_PROJECT_ID) {
            self.remote.project_id = id;
        }
        if let Some(address) = get(ENV_TOKEN_ADDRESS) {
            self.token.address = address;
        }
    }

    /// First usable injected endpoint, if a wallet is configured at all
    pub fn injected_url(&self) -> Option<&str> {
        [&self.injected.url, &self.injected.legacy_url]
            .into_iter()
            .flatten()
            .map(|url| url.trim())
            .find(|url| !url.is_empty())
    }

    /// The token to query
    pub fn token(&self) -> ConnectResult<Token> {
        let address: Address = self.token.address.parse().map_err(|e| {
            ConnectError::InvalidEndpoint(format!(
                "token address '{}': {}",
                self.token.address, e
            ))
        })?;
        Ok(Token::Erc20 {
            address,
            symbol: self.token.symbol.clone(),
            decimals: self.token.decimals,
        })
    }
}
