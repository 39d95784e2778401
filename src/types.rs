use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decimals of the chain's native currency (wei per ether).
pub const NATIVE_DECIMALS: u8 = 18;

/// Fractional digits kept when displaying the native balance.
pub const NATIVE_DISPLAY_PLACES: u8 = 3;

/// Characters of the account address shown in the result view.
pub const ACCOUNT_DISPLAY_LEN: usize = 8;

/// Represents a token balance with amount and decimals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub token: String,
    pub amount: String,
    pub decimals: u8,
    pub formatted: String,
}

impl Balance {
    /// Token balance scaled by `decimals`, trailing zeros trimmed.
    pub fn new(token: String, amount: U256, decimals: u8) -> Self {
        let formatted = format_balance(amount, decimals);
        Self {
            token,
            amount: amount.to_string(),
            decimals,
            formatted,
        }
    }

    /// Native balance, truncated to a fixed number of fractional digits.
    pub fn native(symbol: &str, wei: U256) -> Self {
        Self {
            token: symbol.to_string(),
            amount: wei.to_string(),
            decimals: NATIVE_DECIMALS,
            formatted: format_native(wei),
        }
    }
}

/// Represents the token whose balance is queried
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Erc20 {
        address: Address,
        symbol: String,
        decimals: u8,
    },
}

impl Token {
    pub fn symbol(&self) -> &str {
        let Token::Erc20 { symbol, .. } = self;
        symbol
    }
}

/// Where RPC calls are sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderChoice {
    /// A wallet endpoint discovered from the environment.
    #[default]
    Injected,
    /// A remote node reached through `base_url + project_id`.
    Remote,
}

impl fmt::Display for ProviderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderChoice::Injected => write!(f, "injected"),
            ProviderChoice::Remote => write!(f, "remote"),
        }
    }
}

impl FromStr for ProviderChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "injected" | "wallet" => Ok(ProviderChoice::Injected),
            "remote" | "infura" => Ok(ProviderChoice::Remote),
            _ => Err(format!("Unsupported provider: {}", s)),
        }
    }
}

/// Balances read for one account in a single connection attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub account: Address,
    pub native: Balance,
    pub token: Balance,
}

impl BalanceSnapshot {
    /// Display-only prefix of the checksummed account address.
    pub fn short_account(&self) -> String {
        self.account
            .to_checksum(None)
            .chars()
            .take(ACCOUNT_DISPLAY_LEN)
            .collect()
    }
}

/// Format balance with proper decimal places
pub fn format_balance(amount: U256, decimals: u8) -> String {
    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let fractional = amount % divisor;

    if fractional.is_zero() {
        format!("{}", whole)
    } else {
        let frac_str = format!(
            "{:0>width$}",
            fractional.to_string(),
            width = decimals as usize
        );
        let trimmed = frac_str.trim_end_matches('0');
        format!("{}.{}", whole, trimmed)
    }
}

/// Wei to ether, truncated (not rounded) to `NATIVE_DISPLAY_PLACES` digits.
pub fn format_native(wei: U256) -> String {
    format_truncated(wei, NATIVE_DECIMALS, NATIVE_DISPLAY_PLACES)
}

fn format_truncated(amount: U256, decimals: u8, places: u8) -> String {
    let places = places.min(decimals);
    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let dropped = U256::from(10u64).pow(U256::from(decimals - places));
    let whole = amount / divisor;
    if places == 0 {
        return whole.to_string();
    }
    let kept = (amount % divisor) / dropped;
    format!(
        "{}.{:0>width$}",
        whole,
        kept.to_string(),
        width = places as usize
    )
}
