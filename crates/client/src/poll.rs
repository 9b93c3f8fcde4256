//! Poll-until-terminal loop for exploration results.
//!
//! The protocol is a fixed-interval status poll: no backoff, no transport
//! retry. A transport error from any iteration ends the loop immediately.

use scry_common::config::PollSettings;
use scry_common::models::QueryResult;
use scry_error::{ErrorCode, ErrorContext, Result, ScryError};
use std::future::Future;
use tracing::info;

/// Execute `fetch` repeatedly until the returned status is terminal.
pub(crate) async fn poll_until_terminal<F, Fut>(
    target: &str,
    settings: &PollSettings,
    fetch: F,
) -> Result<QueryResult>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<QueryResult>>,
{
    let mut polls: u32 = 0;
    info!("Polling results for {}", target);
    loop {
        polls += 1;
        let result = fetch().await?;

        if result.status.is_terminal() {
            info!("Done after {} polls, status \"{}\"", polls, result.status);
            return Ok(result);
        }
        info!("poll {}: status is \"{}\"", polls, result.status);

        if let Some(max) = settings.max_polls {
            if polls >= max {
                return Err(ScryError::new(
                    ErrorCode::PollDeadlineExceeded,
                    format!("No terminal status for {} after {} polls", target, polls),
                )
                .with_context(ErrorContext::PollBudget {
                    polls,
                    max_polls: settings.max_polls,
                    deadline_secs: settings.deadline_secs,
                })
                .with_hint("Raise poll.max_polls or check the exploration service"));
            }
        }

        tokio::time::sleep(settings.interval()).await;
    }
}

/// Bound a poll future by the configured wall-clock deadline, if any.
pub(crate) async fn with_deadline<T>(
    target: &str,
    settings: &PollSettings,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    match settings.deadline() {
        Some(deadline) => match tokio::time::timeout(deadline, fut).await {
            Ok(result) => result,
            Err(_) => Err(ScryError::new(
                ErrorCode::PollDeadlineExceeded,
                format!(
                    "Deadline of {}s exceeded waiting on {}",
                    deadline.as_secs(),
                    target
                ),
            )
            .with_context(ErrorContext::PollBudget {
                polls: 0,
                max_polls: settings.max_polls,
                deadline_secs: settings.deadline_secs,
            })
            .with_hint("Raise poll.deadline_secs or check the exploration service")),
        },
        None => fut.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scry_common::models::QueryStatus;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn result_with_status(status: QueryStatus) -> QueryResult {
        QueryResult {
            status,
            description: None,
            metrics: vec![],
            extra: serde_json::Map::new(),
        }
    }

    fn fast_settings(max_polls: Option<u32>) -> PollSettings {
        PollSettings {
            interval_ms: 1,
            max_polls,
            deadline_secs: None,
        }
    }

    #[tokio::test]
    async fn test_polls_until_complete() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = poll_until_terminal("t", &fast_settings(None), move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Ok(result_with_status(QueryStatus::Processing))
                } else {
                    Ok(result_with_status(QueryStatus::Complete))
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(result.status, QueryStatus::Complete);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_stops_on_error_status() {
        let result = poll_until_terminal("t", &fast_settings(None), || async {
            Ok(result_with_status(QueryStatus::Error))
        })
        .await
        .unwrap();

        assert_eq!(result.status, QueryStatus::Error);
    }

    #[tokio::test]
    async fn test_max_polls_exceeded() {
        let err = poll_until_terminal("t", &fast_settings(Some(3)), || async {
            Ok(result_with_status(QueryStatus::Processing))
        })
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::PollDeadlineExceeded);
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let err = poll_until_terminal("t", &fast_settings(None), || async {
            Err(ScryError::new(ErrorCode::RequestFailed, "boom"))
        })
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::RequestFailed);
    }
}
