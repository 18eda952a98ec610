//! Probe context
//!
//! Carries the caller's cancellation token and optional deadline into a
//! health sweep. Every probe races its instance against both, so a single
//! hanging instance cannot hold the sweep past the deadline.

use std::future::Future;
use std::time::Duration;

use bms_domain::error::{Error, Result};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation and deadline for one health sweep
///
/// Cloning shares the token: cancelling any clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct ProbeContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl ProbeContext {
    /// Context with a fresh token and no deadline
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deadline `timeout` from now
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Set an absolute deadline
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Use an externally owned token (e.g. a shutdown signal)
    #[must_use]
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether the deadline has already passed
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Run one instance's probe under this context
    ///
    /// Probe failures come back as `HealthCheck { name, .. }`; cancellation
    /// and deadline outcomes are reported as by [`ProbeContext::guard`].
    pub async fn probe<F>(&self, name: &str, probe: F) -> Result<()>
    where
        F: Future<Output = Result<()>>,
    {
        self.guard(name, async {
            probe.await.map_err(|err| Error::health_check(name, err))
        })
        .await
    }

    /// Race `operation` against this context
    ///
    /// Cancellation wins over the deadline, which wins over the operation.
    /// The operation is not polled at all when the context is already
    /// cancelled or expired, and is dropped when it loses the race.
    pub async fn guard<F, T>(&self, name: &str, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_cancelled() {
            return Err(Error::cancelled(name));
        }
        if self.is_expired() {
            return Err(Error::deadline_exceeded(name));
        }

        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(Error::cancelled(name)),
            () = sleep_until(self.deadline) => Err(Error::deadline_exceeded(name)),
            outcome = operation => outcome,
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
