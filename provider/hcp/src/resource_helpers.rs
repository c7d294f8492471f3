//! Helper functions for common handler patterns
//!
//! This module provides the read / delete / wait building blocks shared by
//! every resource so each handler only contains its field mapping.

use crate::config::ProviderContext;
use crate::error::ProviderError;
use crate::operation::wait_for_operation;
use chrono::{DateTime, SecondsFormat, Utc};
use hcp_client::{HcpError, Location, Operation};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Default wait for creates, updates and deletes
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(20 * 60);

/// Per-operation wait limits of one resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::uniform(DEFAULT_OPERATION_TIMEOUT)
    }
}

impl Timeouts {
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            create: timeout,
            update: timeout,
            delete: timeout,
        }
    }
}

/// Fetch a resource, mapping not-found to `None`
///
/// Returns:
/// - `Ok(Some(resource))` if the resource exists
/// - `Ok(None)` if it was deleted outside the provider
/// - `Err(e)` for any other failure
pub async fn read_or_absent<T, Fut>(resource_name: &str, id: &str, fetch: Fut) -> Result<Option<T>, ProviderError>
where
    Fut: Future<Output = Result<T, HcpError>>,
{
    match fetch.await {
        Ok(resource) => Ok(Some(resource)),
        Err(e) if e.is_not_found() => {
            warn!("{} {} not found remotely, removing from state", resource_name, id);
            Ok(None)
        }
        Err(e) => {
            error!("Failed to read {} {}: {}", resource_name, id, e);
            Err(ProviderError::Client(e))
        }
    }
}

/// Issue a delete and wait for it; an already absent resource is success
pub async fn delete_or_absent<Fut>(
    ctx: &ProviderContext,
    location: &Location,
    resource_name: &str,
    id: &str,
    timeout: Duration,
    delete: Fut,
) -> Result<(), ProviderError>
where
    Fut: Future<Output = Result<Operation, HcpError>>,
{
    match delete.await {
        Ok(operation) => {
            wait_for_operation(ctx, location, &format!("{} {} deletion", resource_name, id), &operation.id, timeout).await?;
            info!("Deleted {} {}", resource_name, id);
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            info!("{} {} already deleted", resource_name, id);
            Ok(())
        }
        Err(e) => {
            error!("Failed to delete {} {}: {}", resource_name, id, e);
            Err(ProviderError::Client(e))
        }
    }
}

/// Wait on an operation when the API returned one
pub async fn wait_for_optional_operation(
    ctx: &ProviderContext,
    location: &Location,
    human_name: &str,
    operation: Option<&Operation>,
    timeout: Duration,
) -> Result<(), ProviderError> {
    match operation {
        Some(operation) => wait_for_operation(ctx, location, human_name, &operation.id, timeout).await,
        None => {
            debug!("{} completed synchronously", human_name);
            Ok(())
        }
    }
}

/// RFC 3339 timestamp, or empty when unknown
pub fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

/// Project requested by a state field, ignoring empty strings
pub fn project_override(project_id: &str) -> Option<&str> {
    if project_id.is_empty() { None } else { Some(project_id) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::TimeZone;
    use hcp_client::{MockHcpClient, OperationBehavior};
    use std::sync::Arc;

    fn context(mock: &MockHcpClient) -> ProviderContext {
        ProviderContext::new(Arc::new(mock.clone()), Location::new("org-1", "proj-1"))
            .with_clock(Arc::new(ManualClock::new()))
    }

    #[tokio::test]
    async fn test_read_or_absent() {
        let found = read_or_absent("HVN", "a", async { Ok::<_, HcpError>(7) }).await.unwrap();
        assert_eq!(found, Some(7));

        let absent: Option<u32> = read_or_absent("HVN", "a", async {
            Err(HcpError::NotFound("gone".to_string()))
        })
        .await
        .unwrap();
        assert_eq!(absent, None);

        let failed = read_or_absent::<u32, _>("HVN", "a", async {
            Err(HcpError::Api {
                status: 500,
                message: "boom".to_string(),
            })
        })
        .await;
        assert!(failed.is_err());
    }

    #[tokio::test]
    async fn test_delete_or_absent_waits_for_operation() {
        let mock = MockHcpClient::new("http://mock");
        mock.set_operation_behavior(OperationBehavior::DoneAfter(2));
        let ctx = context(&mock);
        let location = ctx.default_location().clone();
        let operation = mock.start_operation(&location);
        let id = operation.id.clone();

        delete_or_absent(&ctx, &location, "HVN", "a", Duration::from_secs(60), async { Ok(operation) })
            .await
            .unwrap();

        assert_eq!(mock.operation_polls(&id), 3);
    }

    #[tokio::test]
    async fn test_delete_or_absent_tolerates_not_found() {
        let mock = MockHcpClient::new("http://mock");
        let ctx = context(&mock);
        let location = ctx.default_location().clone();

        let result = delete_or_absent(&ctx, &location, "HVN", "a", Duration::from_secs(60), async {
            Err(HcpError::NotFound("gone".to_string()))
        })
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_wait_for_optional_operation_without_operation() {
        let mock = MockHcpClient::new("http://mock");
        let ctx = context(&mock);

        wait_for_optional_operation(&ctx, ctx.default_location(), "sync", None, Duration::from_secs(1))
            .await
            .unwrap();
    }

    #[test]
    fn test_format_time() {
        let time = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_time(Some(time)), "2023-01-02T03:04:05Z");
        assert_eq!(format_time(None), "");
    }
}
