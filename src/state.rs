use std::future::Future;

use crate::chain::WalletProvider;
use crate::config::Config;
use crate::connector;
use crate::error::{ConnectError, ConnectResult};
use crate::types::{BalanceSnapshot, ProviderChoice, Token};

/// Where a session is in its single connection attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected(BalanceSnapshot),
    /// Terminal: holds the message shown to the user.
    Errored(String),
}

impl ConnectionState {
    pub fn name(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected(_) => "connected",
            ConnectionState::Errored(_) => "errored",
        }
    }

    /// The busy indicator is shown exactly while an attempt is pending.
    pub fn is_busy(&self) -> bool {
        matches!(self, ConnectionState::Connecting)
    }
}

/// Owns the state shown by the presentation layer. Only the transition
/// methods below mutate it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    choice: ProviderChoice,
    state: ConnectionState,
}

impl Session {
    pub fn new(choice: ProviderChoice) -> Self {
        Self {
            choice,
            state: ConnectionState::Disconnected,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn choice(&self) -> ProviderChoice {
        self.choice
    }

    /// Change the provider before connecting.
    pub fn select_provider(&mut self, choice: ProviderChoice) -> ConnectResult<()> {
        self.expect(ConnectionState::Disconnected, "select a provider")?;
        self.choice = choice;
        Ok(())
    }

    /// Disconnected -> Connecting
    pub fn begin(&mut self) -> ConnectResult<()> {
        self.expect(ConnectionState::Disconnected, "connect")?;
        self.state = ConnectionState::Connecting;
        Ok(())
    }

    /// Connecting -> Connected
    pub fn complete(&mut self, snapshot: BalanceSnapshot) -> ConnectResult<()> {
        self.expect(ConnectionState::Connecting, "complete")?;
        self.state = ConnectionState::Connected(snapshot);
        Ok(())
    }

    /// Connecting -> Errored
    pub fn fail(&mut self, err: &ConnectError) -> ConnectResult<()> {
        self.expect(ConnectionState::Connecting, "fail")?;
        tracing::error!(error = %err, provider = %self.choice, "Connection failed");
        self.state = ConnectionState::Errored(err.to_string());
        Ok(())
    }

    /// Connect with the configured provider for this session's choice.
    /// `on_change` sees every state the session passes through.
    pub async fn connect<F>(
        &mut self,
        config: &Config,
        on_change: F,
    ) -> ConnectResult<BalanceSnapshot>
    where
        F: FnMut(&ConnectionState),
    {
        let attempt = connector::connect(config, self.choice);
        self.drive(attempt, on_change).await
    }

    /// Connect through an already resolved provider.
    pub async fn connect_with<F>(
        &mut self,
        provider: &dyn WalletProvider,
        token: &Token,
        on_change: F,
    ) -> ConnectResult<BalanceSnapshot>
    where
        F: FnMut(&ConnectionState),
    {
        let attempt = connector::fetch_snapshot(provider, token);
        self.drive(attempt, on_change).await
    }

    async fn drive<Fut, F>(
        &mut self,
        attempt: Fut,
        mut on_change: F,
    ) -> ConnectResult<BalanceSnapshot>
    where
        Fut: Future<Output = ConnectResult<BalanceSnapshot>>,
        F: FnMut(&ConnectionState),
    {
        self.begin()?;
        on_change(&self.state);

        let outcome = attempt.await;
        match &outcome {
            Ok(snapshot) => self.complete(snapshot.clone())?,
            Err(err) => self.fail(err)?,
        }
        on_change(&self.state);

        outcome
    }

    fn expect(&self, wanted: ConnectionState, action: &'static str) -> ConnectResult<()> {
        if std::mem::discriminant(&self.state) == std::mem::discriminant(&wanted) {
            Ok(())
        } else {
            Err(ConnectError::InvalidTransition {
                action,
                state: self.state.name(),
            })
        }
    }
}
