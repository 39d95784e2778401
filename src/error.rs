//! Errors surfaced by a connection attempt.

use alloy::transports::TransportError;
use thiserror::Error;

/// EIP-1193 error code a wallet returns when the user declines a request.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Errors that can occur while connecting to a wallet and reading balances.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// No injected wallet was detected and the remote endpoint was not selected.
    #[error("No wallet provider detected, install a wallet or select the remote endpoint!")]
    NoProviderAvailable,

    /// The user declined the authorization prompt.
    #[error("Request rejected by user: {0}")]
    UserRejected(String),

    /// Any other RPC or contract call failure, message kept as reported.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Authorization succeeded but the provider returned no accounts.
    #[error("No accounts found, check connection!")]
    NoAccountsFound,

    /// A configured endpoint URL or address could not be parsed.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The session is not in a state that allows this step.
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

impl From<TransportError> for ConnectError {
    fn from(err: TransportError) -> Self {
        match err.as_error_resp() {
            Some(payload) if payload.code == USER_REJECTED_CODE => {
                ConnectError::UserRejected(payload.message.to_string())
            }
            _ => ConnectError::Provider(err.to_string()),
        }
    }
}

impl From<alloy::contract::Error> for ConnectError {
    fn from(err: alloy::contract::Error) -> Self {
        match err {
            alloy::contract::Error::TransportError(e) => e.into(),
            other => ConnectError::Provider(other.to_string()),
        }
    }
}

/// Result type for connection operations.
pub type ConnectResult<T> = Result<T, ConnectError>;
