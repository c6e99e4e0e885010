//! Retry driver and per-domain orchestration.
//!
//! State machine per domain: attempt, and on failure wait the flat retry
//! delay and try again, up to the configured attempt count. Exhausted retries
//! are reported to the caller; the overall run never aborts because one
//! domain kept failing.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::browser::BrowserSession;
use crate::config::LookupConfig;
use crate::errors::Result;
use crate::output::FilingRecord;
use crate::scrape::scrape_domain;

/// Invoke `op` up to `max_attempts` times with a flat `delay` between failed
/// attempts, returning the first success or the last error. `op` receives the
/// 1-based attempt number.
pub async fn run_with_retry<T, F, Fut>(max_attempts: u32, delay: Duration, mut op: F) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    debug_assert!(max_attempts >= 1);
    let mut last_err = None;

    for attempt in 1..=max_attempts {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                last_err = Some(e);
                if attempt < max_attempts {
                    sleep(delay).await;
                }
            }
        }
    }

    Err(last_err.expect("at least one attempt was made"))
}

/// Look up one domain, retrying per the configured policy. Every attempt
/// runs on a fresh page so no state carries over between attempts or
/// domains.
pub async fn lookup_with_retry(
    session: &BrowserSession,
    domain: &str,
    config: &LookupConfig,
) -> Result<FilingRecord> {
    run_with_retry(config.retries, config.retry_delay, move |attempt| {
        let (session, domain, config) = (session, domain, config);
        async move {
            if config.debug {
                eprintln!("[{domain}] attempt {attempt}/{}", config.retries);
            }
            let page = session.open_page().await?;
            let result = scrape_domain(&page, domain, config).await;
            if let Err(ref e) = result {
                if config.debug {
                    eprintln!("[{domain}] attempt {attempt} failed ({}): {e}", e.category());
                }
            }
            let _ = page.close().await;
            result
        }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::IcpLookupError;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn always_failing_op_is_attempted_exactly_retry_count_times() {
        let attempts = AtomicU32::new(0);
        let result: Result<()> = run_with_retry(3, Duration::ZERO, |_| {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(IcpLookupError::link_not_found("example.com")) }
        })
        .await;

        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        assert!(matches!(
            result.unwrap_err(),
            IcpLookupError::LinkNotFound { .. }
        ));
    }

    #[tokio::test]
    async fn stops_at_first_success() {
        let attempts = AtomicU32::new(0);
        let result = run_with_retry(5, Duration::ZERO, |attempt| {
            attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 2 {
                    Err(IcpLookupError::missing_field("td#license"))
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn single_attempt_returns_immediately() {
        let result = run_with_retry(1, Duration::from_secs(60), |attempt| async move {
            Ok::<u32, IcpLookupError>(attempt)
        })
        .await;
        assert_eq!(result.unwrap(), 1);
    }

    #[tokio::test]
    async fn passes_one_based_attempt_numbers() {
        let mut seen = Vec::new();
        let result: Result<()> = run_with_retry(3, Duration::ZERO, |attempt| {
            seen.push(attempt);
            async { Err(IcpLookupError::link_not_found("x")) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(seen, vec![1, 2, 3]);
    }
}
