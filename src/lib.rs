mod chain;
mod config;
mod connector;
mod error;
mod ethereum;
mod render;
mod state;
mod types;

pub use chain::WalletProvider;
pub use config::{Config, InjectedConfig, RemoteConfig, TokenInfo};
pub use connector::{connect, fetch_snapshot, resolve_provider, NATIVE_SYMBOL};
pub use error::{ConnectError, ConnectResult, USER_REJECTED_CODE};
pub use ethereum::{Authorization, EthereumProvider};
pub use render::{render, render_detailed, render_provider_choice};
pub use state::{ConnectionState, Session};
pub use types::{
    format_balance, format_native, Balance, BalanceSnapshot, ProviderChoice, Token,
    ACCOUNT_DISPLAY_LEN,
};

use anyhow::Result;

/// Connect with `choice` using the embedded configuration and environment overrides
pub async fn get_balances(choice: ProviderChoice) -> Result<BalanceSnapshot> {
    let config = Config::from_env()?;
    Ok(connect(&config, choice).await?)
}
