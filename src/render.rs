//! Text presentation of a [`ConnectionState`]. Nothing here touches the
//! network or mutates state.

use crate::state::ConnectionState;
use crate::types::{BalanceSnapshot, ProviderChoice};

pub const CONNECT_PROMPT: &str = "[ Connect Wallet ]";
pub const BUSY_INDICATOR: &str = "Connecting to wallet...";

/// Provider selection line shown above the connect affordance.
pub fn render_provider_choice(choice: ProviderChoice) -> String {
    let mark = |c: ProviderChoice| if c == choice { "(x)" } else { "( )" };
    format!(
        "{} Wallet   {} Remote endpoint",
        mark(ProviderChoice::Injected),
        mark(ProviderChoice::Remote)
    )
}

pub fn render(state: &ConnectionState) -> String {
    match state {
        ConnectionState::Disconnected => CONNECT_PROMPT.to_string(),
        ConnectionState::Connecting => BUSY_INDICATOR.to_string(),
        ConnectionState::Errored(message) => message.clone(),
        ConnectionState::Connected(snapshot) => render_snapshot(snapshot),
    }
}

fn render_snapshot(snapshot: &BalanceSnapshot) -> String {
    format!(
        "{} {}  {}\n{}  {}",
        snapshot.native.formatted,
        snapshot.native.token,
        snapshot.short_account(),
        snapshot.token.token,
        snapshot.token.formatted
    )
}

/// Balance table with raw amounts, for the terminal front-end.
pub fn render_detailed(snapshot: &BalanceSnapshot) -> String {
    let rule = "=".repeat(60);
    let mut out = format!("Account: {}\n{}\n", snapshot.account, rule);
    for balance in [&snapshot.native, &snapshot.token] {
        out.push_str(&format!(
            "{:6} | {:>20} (raw: {})\n",
            balance.token, balance.formatted, balance.amount
        ));
    }
    out.push_str(&rule);
    out
}
