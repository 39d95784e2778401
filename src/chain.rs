use alloy::primitives::{Address, U256};
use async_trait::async_trait;

use crate::error::ConnectResult;
use crate::types::{Balance, Token};

/// Trait for wallet providers - the seam between the connector and the chain
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the wallet for access to its accounts. May wait on the user.
    async fn authorize(&self) -> ConnectResult<()>;

    /// Accounts the provider exposes, in the order it reports them.
    async fn accounts(&self) -> ConnectResult<Vec<Address>>;

    /// Native balance in wei at the latest block
    async fn native_balance(&self, account: Address) -> ConnectResult<U256>;

    /// Raw `balanceOf` result for an ERC-20 token
    async fn token_balance(&self, account: Address, token: &Token) -> ConnectResult<U256>;

    /// Token balance scaled by the token's decimals
    async fn get_token_balance(&self, account: Address, token: &Token) -> ConnectResult<Balance> {
        let raw = self.token_balance(account, token).await?;
        let Token::Erc20 {
            symbol, decimals, ..
        } = token;
        Ok(Balance::new(symbol.clone(), raw, *decimals))
    }
}
