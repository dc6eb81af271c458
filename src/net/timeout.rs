//! Bounded waits for in-flight requests.
//!
//! wasm32 builds race the request against a `gloo-timers` sleep; every
//! other build uses `tokio::time::timeout`, which needs a Tokio runtime with
//! timers enabled.

use std::future::Future;
use std::time::Duration;

use crate::error::TransportError;

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Resolve `fut`, or fail with `TransportError::Timeout` after `duration`.
///
/// # Errors
///
/// Returns `TransportError::Timeout` when the deadline passes first.
pub async fn with_timeout<F>(duration: Duration, fut: F) -> Result<F::Output, TransportError>
where
    F: Future,
{
    #[cfg(target_arch = "wasm32")]
    {
        use futures::future::{Either, select};

        let fut = std::pin::pin!(fut);
        let sleep = std::pin::pin!(gloo_timers::future::sleep(duration));
        match select(fut, sleep).await {
            Either::Left((output, _)) => Ok(output),
            Either::Right(_) => Err(TransportError::Timeout(millis(duration))),
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::timeout(duration, fut)
            .await
            .map_err(|_| TransportError::Timeout(millis(duration)))
    }
}
