//! Test utilities for unit testing handlers
//!
//! This module provides helpers for creating test data and setting up test scenarios.

use crate::clock::ManualClock;
use crate::config::ProviderContext;
use hcp_client::{Hvn, Location, MockHcpClient};
use std::sync::Arc;

pub const TEST_ORG: &str = "org-1";
pub const TEST_PROJECT: &str = "proj-1";

/// Mock client, virtual clock and a context defaulting to `org-1/proj-1`
pub fn mock_context() -> (MockHcpClient, ManualClock, ProviderContext) {
    let mock = MockHcpClient::new("http://mock");
    let clock = ManualClock::new();
    let ctx = ProviderContext::new(Arc::new(mock.clone()), Location::new(TEST_ORG, TEST_PROJECT))
        .with_clock(Arc::new(clock.clone()));
    (mock, clock, ctx)
}

/// Helper to create a test HVN in AWS us-west-2
pub fn create_test_hvn(project_id: &str, hvn_id: &str) -> Hvn {
    Hvn {
        id: hvn_id.to_string(),
        location: Location::new(TEST_ORG, project_id).with_region("aws", "us-west-2"),
        cidr_block: "172.25.16.0/20".to_string(),
        provider_account_id: "123456789012".to_string(),
        state: "STABLE".to_string(),
        created_at: None,
    }
}

/// Self link string of a test HVN
pub fn hvn_link(project_id: &str, hvn_id: &str) -> String {
    format!("/project/{}/hvn/{}", project_id, hvn_id)
}
