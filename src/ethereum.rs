use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::BlockNumberOrTag;
use alloy::sol;
use async_trait::async_trait;
use url::Url;

use crate::chain::WalletProvider;
use crate::error::{ConnectError, ConnectResult};
use crate::types::Token;

// ERC-20 ABI for balanceOf
sol! {
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
    }
}

/// How the endpoint grants account access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    /// A wallet that prompts the user on `eth_requestAccounts`.
    Prompt,
    /// A plain node; accounts are read without a prompt.
    Implicit,
}

/// Wallet provider speaking Ethereum JSON-RPC over HTTP
#[derive(Debug, Clone)]
pub struct EthereumProvider {
    rpc_url: Url,
    authorization: Authorization,
}

impl EthereumProvider {
    /// An injected wallet endpoint that asks the user before exposing accounts.
    pub fn injected(rpc_url: &str) -> ConnectResult<Self> {
        Ok(Self {
            rpc_url: parse_url(rpc_url)?,
            authorization: Authorization::Prompt,
        })
    }

    /// A remote node at `base_url` followed directly by `project_id`.
    pub fn remote(base_url: &str, project_id: &str) -> ConnectResult<Self> {
        let rpc_url = format!("{}{}", base_url, project_id);
        Ok(Self {
            rpc_url: parse_url(&rpc_url)?,
            authorization: Authorization::Implicit,
        })
    }

    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    pub fn authorization(&self) -> Authorization {
        self.authorization
    }
}

fn parse_url(raw: &str) -> ConnectResult<Url> {
    raw.parse()
        .map_err(|e| ConnectError::InvalidEndpoint(format!("'{}': {}", raw, e)))
}

#[async_trait]
impl WalletProvider for EthereumProvider {
    async fn authorize(&self) -> ConnectResult<()> {
        match self.authorization {
            Authorization::Prompt => {
                let provider = ProviderBuilder::new().on_http(self.rpc_url.clone());
                let granted: Vec<Address> = provider
                    .raw_request("eth_requestAccounts".into(), ())
                    .await?;
                tracing::debug!(granted = granted.len(), "Wallet granted account access");
            }
            Authorization::Implicit => {
                tracing::debug!(rpc_url = %self.rpc_url, "Remote node, skipping authorization");
            }
        }
        Ok(())
    }

    async fn accounts(&self) -> ConnectResult<Vec<Address>> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url.clone());
        Ok(provider.get_accounts().await?)
    }

    async fn native_balance(&self, account: Address) -> ConnectResult<U256> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url.clone());

        let balance = provider
            .get_balance(account)
            .block_id(BlockNumberOrTag::Latest.into())
            .await?;

        Ok(balance)
    }

    async fn token_balance(&self, account: Address, token: &Token) -> ConnectResult<U256> {
        let Token::Erc20 {
            address: token_address,
            ..
        } = token;

        let provider = ProviderBuilder::new().on_http(self.rpc_url.clone());

        let contract = IERC20::new(*token_address, provider);
        let balance: U256 = contract.balanceOf(account).call().await?._0;

        Ok(balance)
    }
}
