//! Database connection lifecycle bound to server startup and shutdown
//!
//! [`ConnectionLifecycle::startup`] keeps retrying until the database both
//! accepts a connection and answers the readiness probe, then opens the
//! [`ReadinessGate`]. [`ConnectionLifecycle::shutdown`] closes the gate first
//! and releases the connection under a deadline.

use crate::readiness::ReadinessGate;
use db_pool::{is_transient, record_connect_attempt, DatabaseClient};
use resilience::{with_retry_if, with_timeout_result, RetryConfig, TimeoutError};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("startup already ran")]
    AlreadyStarted,

    #[error("shutdown requested before startup")]
    NotStarted,

    #[error("shutdown already ran")]
    AlreadyStopped,

    #[error("database not ready after {attempts} attempts: {source}")]
    Connect {
        attempts: u32,
        #[source]
        source: TimeoutError<sqlx::Error>,
    },
}

enum State<H> {
    Idle,
    Running(H),
    Stopped,
}

pub struct ConnectionLifecycle<C: DatabaseClient> {
    client: C,
    retry: RetryConfig,
    attempt_timeout: Duration,
    shutdown_timeout: Duration,
    gate: ReadinessGate,
    state: State<C::Handle>,
}

impl<C: DatabaseClient> ConnectionLifecycle<C> {
    pub fn new(client: C, retry: RetryConfig, shutdown_timeout: Duration) -> Self {
        let attempt_timeout = resilience::database_connect_config().timeout.duration;
        Self {
            client,
            retry,
            attempt_timeout,
            shutdown_timeout,
            gate: ReadinessGate::new(),
            state: State::Idle,
        }
    }

    /// Bound each individual connect and probe attempt
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    pub fn gate(&self) -> ReadinessGate {
        self.gate.clone()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running(_))
    }

    /// Connections currently open through the managed handle
    pub fn open_connections(&self) -> u32 {
        match &self.state {
            State::Running(handle) => self.client.open_connections(handle),
            State::Idle | State::Stopped => 0,
        }
    }

    /// Connect with bounded retry and open the readiness gate.
    ///
    /// Only transient failures are retried; a misconfigured connection fails
    /// on the first attempt.
    ///
    /// Returns a clone of the handle for the handler set; the lifecycle keeps
    /// its own copy and is the only one that closes it.
    pub async fn startup(&mut self) -> Result<C::Handle, LifecycleError> {
        match self.state {
            State::Idle => {}
            State::Running(_) | State::Stopped => return Err(LifecycleError::AlreadyStarted),
        }

        let client = &self.client;
        let attempt_timeout = self.attempt_timeout;
        let service = client.name().to_string();

        info!(
            service = %service,
            max_attempts = self.retry.max_attempts(),
            "Connecting to database"
        );

        let handle = with_retry_if(
            self.retry.clone(),
            || {
                let service = service.as_str();
                async move {
                    let result =
                        with_timeout_result(attempt_timeout, connect_ready(client)).await;
                    record_connect_attempt(service, result.is_ok());
                    result
                }
            },
            worth_retrying,
        )
        .await
        .map_err(|e| LifecycleError::Connect {
            attempts: e.attempts(),
            source: e.into_inner(),
        })?;

        self.client.on_ready(&handle);
        self.state = State::Running(handle.clone());
        self.gate.open();
        info!(service = %service, "Database ready, accepting traffic");

        Ok(handle)
    }

    /// Close the readiness gate and release the connection.
    ///
    /// A failing or slow disconnect is logged and never blocks termination.
    pub async fn shutdown(&mut self) -> Result<(), LifecycleError> {
        let handle = match std::mem::replace(&mut self.state, State::Stopped) {
            State::Running(handle) => handle,
            State::Idle => {
                self.state = State::Idle;
                return Err(LifecycleError::NotStarted);
            }
            State::Stopped => return Err(LifecycleError::AlreadyStopped),
        };

        self.gate.close();
        let service = self.client.name();

        match with_timeout_result(self.shutdown_timeout, self.client.disconnect(handle)).await {
            Ok(()) => info!(service = %service, "Database connection closed"),
            Err(TimeoutError::Failed(e)) => {
                warn!(service = %service, error = %e, "Database disconnect failed")
            }
            Err(TimeoutError::Elapsed(after)) => warn!(
                service = %service,
                timeout = ?after,
                "Database disconnect timed out"
            ),
        }

        Ok(())
    }
}

fn worth_retrying(err: &TimeoutError<sqlx::Error>) -> bool {
    match err {
        TimeoutError::Elapsed(_) => true,
        TimeoutError::Failed(e) => is_transient(e),
    }
}

/// One attempt: a handle only counts once the readiness probe succeeds
async fn connect_ready<C: DatabaseClient>(client: &C) -> Result<C::Handle, sqlx::Error> {
    let handle = client.connect().await?;

    match client.ping(&handle).await {
        Ok(()) => Ok(handle),
        Err(e) => {
            if let Err(close_err) = client.disconnect(handle).await {
                warn!(
                    service = %client.name(),
                    error = %close_err,
                    "Failed to release connection after failed probe"
                );
            }
            Err(e)
        }
    }
}
