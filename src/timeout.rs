//! # Timeout Guard
//!
//! Bounds the latency of slow asynchronous lookups (weather services, tide
//! tables, remote trip logs) so a stalled call turns into a distinguishable
//! error instead of hanging the statistics view.
//!
//! The guarded operation runs as its own tokio task. When the deadline wins
//! the task is left running detached and its eventual result is dropped;
//! operations that must really stop need their own cancellation.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum GuardError<E> {
    /// The deadline elapsed before the operation settled
    #[error("{label} timed out")]
    TimedOut { label: String },

    /// The operation failed on its own; its error is passed through untouched
    #[error(transparent)]
    Operation(E),

    /// The operation task panicked or was cancelled by the runtime
    #[error("operation task aborted: {0}")]
    Aborted(#[source] JoinError),
}

impl<E> GuardError<E> {
    pub fn is_timeout(&self) -> bool {
        matches!(self, GuardError::TimedOut { .. })
    }

    /// The operation's own error, if that is what ended the call.
    pub fn into_operation(self) -> Option<E> {
        match self {
            GuardError::Operation(e) => Some(e),
            _ => None,
        }
    }
}

/// Race `operation` against a `limit` deadline.
///
/// Resolves with the operation's value or error when it settles first.
/// Otherwise fails with [`GuardError::TimedOut`], whose message is
/// `"<label> timed out"`. The deadline timer is released on every path.
///
/// Must be called from within a tokio runtime.
pub async fn with_timeout<F, T, E>(
    operation: F,
    limit: Duration,
    label: &str,
) -> Result<T, GuardError<E>>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    let task = tokio::spawn(operation);

    match tokio::time::timeout(limit, task).await {
        Ok(Ok(Ok(value))) => Ok(value),
        Ok(Ok(Err(e))) => {
            debug!(label, "guarded operation failed before the deadline");
            Err(GuardError::Operation(e))
        }
        Ok(Err(join_error)) => Err(GuardError::Aborted(join_error)),
        Err(_elapsed) => {
            warn!(label, limit_ms = limit.as_millis() as u64, "operation timed out");
            Err(GuardError::TimedOut {
                label: label.to_string(),
            })
        }
    }
}

/// [`with_timeout`] with the deadline given in milliseconds.
pub async fn with_timeout_ms<F, T, E>(
    operation: F,
    millis: u64,
    label: &str,
) -> Result<T, GuardError<E>>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    with_timeout(operation, Duration::from_millis(millis), label).await
}
