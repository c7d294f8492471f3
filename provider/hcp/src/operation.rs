//! Waiting on long-running remote work.
//!
//! `poll_until` is the generic retry-with-backoff loop; `wait_for_operation`
//! specializes it to the operation-status endpoint. Neither keeps state
//! between calls, so concurrent waits on independent operations are safe.

use crate::config::ProviderContext;
use crate::error::ProviderError;
use hcp_client::{ExponentialBackoff, Location, OperationState};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Repeatedly run `probe` until it yields a value or `timeout` elapses.
///
/// The first probe runs immediately. Delays between probes follow
/// `ExponentialBackoff` on the context clock, and both the delays and each
/// in-flight probe are cut off at the deadline. A timeout too large to
/// represent as an instant means no deadline. An error from `probe` ends the
/// wait at once.
pub async fn poll_until<T, F, Fut>(
    ctx: &ProviderContext,
    human_name: &str,
    tracking_id: &str,
    timeout: Duration,
    mut probe: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, ProviderError>>,
{
    let clock = ctx.clock();
    let deadline = clock.now().checked_add(timeout);
    let timed_out = || ProviderError::OperationTimeout {
        name: human_name.to_string(),
        operation_id: tracking_id.to_string(),
        timeout,
    };
    let mut backoff = ExponentialBackoff::default();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let outcome = match deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(clock.now());
                tokio::select! {
                    biased;
                    outcome = probe() => outcome?,
                    () = clock.sleep(remaining) => {
                        debug!("{} ({}) status check still running at the deadline", human_name, tracking_id);
                        return Err(timed_out());
                    }
                }
            }
            None => probe().await?,
        };
        if let Some(value) = outcome {
            debug!("{} ({}) finished after {} poll(s)", human_name, tracking_id, attempts);
            return Ok(value);
        }

        let mut delay = backoff.next_backoff();
        if let Some(deadline) = deadline {
            let now = clock.now();
            if now >= deadline {
                return Err(timed_out());
            }
            delay = delay.min(deadline - now);
        }
        debug!("{} ({}) not finished, polling again in {:?}", human_name, tracking_id, delay);
        clock.sleep(delay).await;
    }
}

/// Wait until an operation reports `DONE`.
///
/// A `DONE` operation carrying an error becomes `OperationFailed` with the
/// remote message. Reaching the deadline yields `OperationTimeout`; the
/// remote operation is not cancelled.
pub async fn wait_for_operation(
    ctx: &ProviderContext,
    location: &Location,
    human_name: &str,
    operation_id: &str,
    timeout: Duration,
) -> Result<(), ProviderError> {
    info!("Waiting for {} (operation {})", human_name, operation_id);

    poll_until(ctx, human_name, operation_id, timeout, || async move {
        let operation = ctx.client().get_operation(location, operation_id).await?;
        match operation.state {
            OperationState::Done => match operation.error {
                Some(error) => Err(ProviderError::OperationFailed {
                    name: human_name.to_string(),
                    operation_id: operation_id.to_string(),
                    message: error.message,
                }),
                None => Ok(Some(())),
            },
            _ => Ok(None),
        }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use hcp_client::{MockHcpClient, OperationBehavior};
    use std::sync::Arc;

    fn setup(behavior: OperationBehavior) -> (MockHcpClient, ManualClock, ProviderContext, Location) {
        let mock = MockHcpClient::new("http://mock");
        mock.set_operation_behavior(behavior);
        let clock = ManualClock::new();
        let location = Location::new("org-1", "proj-1");
        let ctx = ProviderContext::new(Arc::new(mock.clone()), location.clone())
            .with_clock(Arc::new(clock.clone()));
        (mock, clock, ctx, location)
    }

    #[tokio::test]
    async fn test_done_after_n_polls() {
        let (mock, clock, ctx, location) = setup(OperationBehavior::DoneAfter(3));
        let op = mock.start_operation(&location);

        wait_for_operation(&ctx, &location, "HVN creation", &op.id, Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(mock.operation_polls(&op.id), 4);
        assert_eq!(clock.sleeps().len(), 3);
    }

    #[tokio::test]
    async fn test_already_done_does_not_sleep() {
        let (mock, clock, ctx, location) = setup(OperationBehavior::DoneAfter(0));
        let op = mock.start_operation(&location);

        wait_for_operation(&ctx, &location, "HVN deletion", &op.id, Duration::from_secs(1))
            .await
            .unwrap();

        assert!(clock.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_failure_embeds_remote_message() {
        let (mock, _clock, ctx, location) =
            setup(OperationBehavior::FailAfter(1, "quota exceeded".to_string()));
        let op = mock.start_operation(&location);

        let err = wait_for_operation(&ctx, &location, "Vault cluster creation", &op.id, Duration::from_secs(60))
            .await
            .unwrap_err();

        match err {
            ProviderError::OperationFailed { message, operation_id, .. } => {
                assert_eq!(message, "quota exceeded");
                assert_eq!(operation_id, op.id);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_never_done_times_out_at_deadline() {
        let (mock, clock, ctx, location) = setup(OperationBehavior::Never);
        let op = mock.start_operation(&location);
        let timeout = Duration::from_secs(30);

        let err = wait_for_operation(&ctx, &location, "peering creation", &op.id, timeout)
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::OperationTimeout { .. }));
        assert_eq!(clock.elapsed(), timeout);
        assert!(clock.sleeps().iter().all(|d| *d <= Duration::from_secs(10)));
    }

    #[tokio::test]
    async fn test_unknown_operation_propagates_immediately() {
        let (_mock, clock, ctx, location) = setup(OperationBehavior::Never);

        let err = wait_for_operation(&ctx, &location, "route creation", "op-missing", Duration::from_secs(30))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(clock.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_waits_are_independent() {
        let (mock, _clock, ctx, location) = setup(OperationBehavior::DoneAfter(2));
        let first = mock.start_operation(&location);
        mock.set_operation_behavior(OperationBehavior::DoneAfter(5));
        let second = mock.start_operation(&location);

        let (a, b) = tokio::join!(
            wait_for_operation(&ctx, &location, "first", &first.id, Duration::from_secs(300)),
            wait_for_operation(&ctx, &location, "second", &second.id, Duration::from_secs(300)),
        );

        assert!(a.is_ok());
        assert!(b.is_ok());
        assert_eq!(mock.operation_polls(&first.id), 3);
        assert_eq!(mock.operation_polls(&second.id), 6);
    }

    #[tokio::test]
    async fn test_stalled_check_is_cut_off_at_deadline() {
        let (_mock, clock, ctx, _location) = setup(OperationBehavior::Never);
        let timeout = Duration::from_millis(300);

        let err = poll_until(&ctx, "HVN creation", "op-slow", timeout, || async {
            std::future::pending::<Result<Option<()>, ProviderError>>().await
        })
        .await
        .unwrap_err();

        assert!(matches!(err, ProviderError::OperationTimeout { .. }));
        assert_eq!(clock.elapsed(), timeout);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_check_on_tokio_clock_returns_at_deadline() {
        let mock = MockHcpClient::new("http://mock");
        let ctx = ProviderContext::new(Arc::new(mock), Location::new("org-1", "proj-1"));
        let started = tokio::time::Instant::now();

        let err = poll_until(&ctx, "HVN creation", "op-slow", Duration::from_millis(300), || async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Ok::<Option<()>, ProviderError>(None)
        })
        .await
        .unwrap_err();

        assert!(matches!(err, ProviderError::OperationTimeout { .. }));
        assert!(started.elapsed() >= Duration::from_millis(300));
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_unbounded_timeout_does_not_overflow() {
        let (_mock, clock, ctx, _location) = setup(OperationBehavior::Never);
        let mut calls = 0;

        let value = poll_until(&ctx, "state wait", "x", Duration::MAX, || {
            calls += 1;
            let current = calls;
            async move { Ok((current >= 2).then_some(current)) }
        })
        .await
        .unwrap();

        assert_eq!(value, 2);
        assert_eq!(clock.sleeps().len(), 1);
    }

    #[tokio::test]
    async fn test_poll_until_returns_probe_value() {
        let (_mock, clock, ctx, _location) = setup(OperationBehavior::Never);
        let mut calls = 0;

        let value = poll_until(&ctx, "state wait", "x", Duration::from_secs(60), || {
            calls += 1;
            let current = calls;
            async move { Ok(if current >= 3 { Some(current * 10) } else { None }) }
        })
        .await
        .unwrap();

        assert_eq!(value, 30);
        assert_eq!(clock.sleeps().len(), 2);
    }
}
