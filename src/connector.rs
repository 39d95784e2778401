//! The connection chain: resolve a provider, authorize, pick the first
//! account, then read the native and token balances one after another.

use crate::chain::WalletProvider;
use crate::config::Config;
use crate::error::{ConnectError, ConnectResult};
use crate::ethereum::EthereumProvider;
use crate::types::{Balance, BalanceSnapshot, ProviderChoice, Token};

/// Symbol shown next to the native balance.
pub const NATIVE_SYMBOL: &str = "ETH";

/// Pick the endpoint for `choice`. The remote choice never falls back to the
/// injected wallet, and a missing wallet is an error rather than a fallback
/// to the remote node.
pub fn resolve_provider(
    config: &Config,
    choice: ProviderChoice,
) -> ConnectResult<EthereumProvider> {
    let provider = match choice {
        ProviderChoice::Remote => {
            EthereumProvider::remote(&config.remote.base_url, &config.remote.project_id)?
        }
        ProviderChoice::Injected => {
            let url = config
                .injected_url()
                .ok_or(ConnectError::NoProviderAvailable)?;
            EthereumProvider::injected(url)?
        }
    };
    tracing::info!(provider = %choice, "Resolved wallet provider");
    Ok(provider)
}

/// Authorize and read both balances for the first account `provider` reports.
pub async fn fetch_snapshot(
    provider: &dyn WalletProvider,
    token: &Token,
) -> ConnectResult<BalanceSnapshot> {
    provider.authorize().await?;

    let accounts = provider.accounts().await?;
    let account = *accounts.first().ok_or(ConnectError::NoAccountsFound)?;
    tracing::info!(%account, available = accounts.len(), "Using first account");

    let wei = provider.native_balance(account).await?;
    let native = Balance::native(NATIVE_SYMBOL, wei);
    tracing::debug!(%account, wei = %wei, "Fetched native balance");

    let token_balance = provider.get_token_balance(account, token).await?;
    tracing::debug!(
        %account,
        token = %token_balance.token,
        amount = %token_balance.amount,
        "Fetched token balance"
    );

    Ok(BalanceSnapshot {
        account,
        native,
        token: token_balance,
    })
}

/// Run the whole chain against the provider selected by `choice`.
pub async fn connect(config: &Config, choice: ProviderChoice) -> ConnectResult<BalanceSnapshot> {
    let provider = resolve_provider(config, choice)?;
    let token = config.token()?;
    fetch_snapshot(&provider, &token).await
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloy::primitives::{address, Address, U256};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio_test::{assert_err, assert_ok};

    pub(crate) const ALICE: Address = address!("78697a9cfc48C1e9d1040172d51833EF78083b10");
    pub(crate) const BOB: Address = address!("1c7D4B196Cb0C7B01d743Fbc6116a902379C7238");

    pub(crate) fn usdt() -> Token {
        Token::Erc20 {
            address: address!("dAC17F958D2ee523a2206206994597C13D831ec7"),
            symbol: "USDT".to_string(),
            decimals: 6,
        }
    }

    /// In-memory wallet that records which calls were made.
    pub(crate) struct ScriptedWallet {
        pub authorize: ConnectResult<()>,
        pub accounts: Vec<Address>,
        pub wei: ConnectResult<U256>,
        pub token_units: ConnectResult<U256>,
        pub calls: Mutex<Vec<String>>,
    }

    impl ScriptedWallet {
        pub(crate) fn with_balances(accounts: Vec<Address>, wei: u128, token_units: u64) -> Self {
            Self {
                authorize: Ok(()),
                accounts,
                wei: Ok(U256::from(wei)),
                token_units: Ok(U256::from(token_units)),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl WalletProvider for ScriptedWallet {
        async fn authorize(&self) -> ConnectResult<()> {
            self.record("authorize".to_string());
            self.authorize.clone()
        }

        async fn accounts(&self) -> ConnectResult<Vec<Address>> {
            self.record("accounts".to_string());
            Ok(self.accounts.clone())
        }

        async fn native_balance(&self, account: Address) -> ConnectResult<U256> {
            self.record(format!("native {}", account));
            self.wei.clone()
        }

        async fn token_balance(&self, account: Address, _token: &Token) -> ConnectResult<U256> {
            self.record(format!("token {}", account));
            self.token_units.clone()
        }
    }

    #[tokio::test]
    async fn test_fetch_snapshot() {
        let wallet =
            ScriptedWallet::with_balances(vec![ALICE], 1_500_000_000_000_000_000, 2_500_000);
        let snapshot = assert_ok!(fetch_snapshot(&wallet, &usdt()).await);

        assert_eq!(snapshot.account, ALICE);
        assert_eq!(snapshot.native.formatted, "1.500");
        assert_eq!(snapshot.native.token, "ETH");
        assert_eq!(snapshot.token.formatted, "2.5");
        assert_eq!(snapshot.token.token, "USDT");
    }

    #[tokio::test]
    async fn test_steps_run_in_order_for_first_account() {
        let wallet = ScriptedWallet::with_balances(vec![ALICE, BOB], 0, 0);
        let snapshot = assert_ok!(fetch_snapshot(&wallet, &usdt()).await);

        assert_eq!(snapshot.account, ALICE);
        assert_eq!(
            wallet.calls(),
            vec![
                "authorize".to_string(),
                "accounts".to_string(),
                format!("native {}", ALICE),
                format!("token {}", ALICE),
            ]
        );
    }

    #[tokio::test]
    async fn test_no_accounts_stops_before_balances() {
        let wallet = ScriptedWallet::with_balances(vec![], 1, 1);
        let err = assert_err!(fetch_snapshot(&wallet, &usdt()).await);

        assert_eq!(err, ConnectError::NoAccountsFound);
        assert_eq!(wallet.calls(), vec!["authorize", "accounts"]);
    }

    #[tokio::test]
    async fn test_rejection_stops_chain() {
        let mut wallet = ScriptedWallet::with_balances(vec![ALICE], 1, 1);
        wallet.authorize = Err(ConnectError::UserRejected(
            "User rejected the request.".to_string(),
        ));
        let err = assert_err!(fetch_snapshot(&wallet, &usdt()).await);

        assert!(matches!(err, ConnectError::UserRejected(_)));
        assert_eq!(wallet.calls(), vec!["authorize"]);
    }

    #[tokio::test]
    async fn test_token_failure_discards_native_balance() {
        let mut wallet = ScriptedWallet::with_balances(vec![ALICE], 1, 1);
        wallet.token_units = Err(ConnectError::Provider("execution reverted".to_string()));
        let err = assert_err!(fetch_snapshot(&wallet, &usdt()).await);

        assert_eq!(err, ConnectError::Provider("execution reverted".to_string()));
    }

    #[test]
    fn test_injected_without_wallet_is_guarded() {
        let config = Config::load().unwrap();
        let err = resolve_provider(&config, ProviderChoice::Injected).unwrap_err();
        assert_eq!(err, ConnectError::NoProviderAvailable);
    }

    #[test]
    fn test_remote_choice_uses_base_and_identifier() {
        let mut config = Config::load().unwrap();
        config.injected.url = Some("http://127.0.0.1:1248".to_string());
        config.remote.project_id = "abc123".to_string();

        let provider = resolve_provider(&config, ProviderChoice::Remote).unwrap();
        assert_eq!(
            provider.rpc_url().as_str(),
            "https://mainnet.infura.io/v3/abc123"
        );
    }

    #[test]
    fn test_injected_choice_uses_wallet_url() {
        let mut config = Config::load().unwrap();
        config.injected.url = Some("http://127.0.0.1:1248".to_string());

        let provider = resolve_provider(&config, ProviderChoice::Injected).unwrap();
        assert_eq!(provider.rpc_url().as_str(), "http://127.0.0.1:1248/");
    }

    #[tokio::test]
    async fn test_connect_without_wallet_makes_no_calls() {
        let config = Config::load().unwrap();
        let err = assert_err!(connect(&config, ProviderChoice::Injected).await);
        assert_eq!(err, ConnectError::NoProviderAvailable);
    }
}
