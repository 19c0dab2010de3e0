//! Upper bound on the duration of a single store call

use std::future::Future;
use std::time::Duration;

use cm_core::errors::DomainError;

/// Run a store operation, failing with an internal error if it exceeds `limit`
pub async fn with_timeout<T, F>(
    limit: Duration,
    operation: &'static str,
    future: F,
) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!(
                operation,
                timeout_ms = limit.as_millis() as u64,
                "Store call timed out"
            );
            Err(DomainError::internal(format!("{} timed out", operation)))
        }
    }
}
