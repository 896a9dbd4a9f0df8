//! Bounded retry for cache store operations
//!
//! Every cache operation shares the same resilience discipline: a fixed
//! number of attempts with a fixed pause, retrying only connection-class
//! failures. Logical failures (an absent entry, a failed command on a
//! live connection) are not transient and terminate the loop at once.

use crate::error::BundleError;
use std::future::Future;
use std::time::Duration;
use tracing::error;

/// Run `op` up to `attempts` times, pausing `pause` between attempts.
///
/// Retries only while `op` fails with a transient error; any other
/// failure terminates the loop. Returns the value of the first
/// successful attempt, or `None` once the budget is exhausted. Every
/// failure is logged here so callers don't have to.
pub(crate) async fn bounded<T, F, Fut>(attempts: u32, pause: Duration, mut op: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, BundleError>>,
{
    for attempt in 1..=attempts {
        match op().await {
            Ok(value) => return Some(value),
            Err(err) if err.is_transient() => {
                error!("{err} (attempt {attempt}/{attempts})");
                if attempt < attempts {
                    tokio::time::sleep(pause).await;
                }
            }
            Err(err) => {
                error!("{err}");
                return None;
            }
        }
    }
    None
}
