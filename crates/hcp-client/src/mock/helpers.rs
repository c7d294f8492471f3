//! Fixture builders and operation bookkeeping for the mock

use super::{MockHcpClient, OperationBehavior};
use crate::error::HcpError;
use crate::models::*;
use chrono::{DateTime, Utc};

/// Build an organization for test setup
pub fn organization_fixture(id: &str, created_at: DateTime<Utc>) -> Organization {
    Organization {
        id: id.to_string(),
        name: format!("Organization {}", id),
        state: Some("ACTIVE".to_string()),
        created_at,
    }
}

/// Build a project owned by an organization for test setup
pub fn project_fixture(id: &str, organization_id: &str, created_at: DateTime<Utc>) -> Project {
    Project {
        id: id.to_string(),
        name: format!("Project {}", id),
        description: String::new(),
        parent: ProjectParent {
            parent_type: "ORGANIZATION".to_string(),
            id: organization_id.to_string(),
        },
        created_at,
    }
}

pub(crate) fn not_found(kind: &str, id: &str) -> HcpError {
    HcpError::NotFound(format!("{} {} not found", kind, id))
}

pub(crate) fn already_exists(kind: &str, id: &str) -> HcpError {
    HcpError::Api {
        status: 409,
        message: format!("{} {} already exists", kind, id),
    }
}

/// Advance an operation by one poll and report its state
pub(crate) fn poll_operation(client: &MockHcpClient, location: &Location, id: &str) -> Result<Operation, HcpError> {
    let mut operations = client.operations.lock().unwrap();
    let op = operations
        .get_mut(id)
        .filter(|op| op.location.project_id == location.project_id)
        .ok_or_else(|| not_found("Operation", id))?;

    op.polls += 1;
    let (state, error) = match &op.behavior {
        OperationBehavior::DoneAfter(n) if op.polls > *n => (OperationState::Done, None),
        OperationBehavior::FailAfter(n, message) if op.polls > *n => (
            OperationState::Done,
            Some(OperationError {
                code: 13,
                message: message.clone(),
            }),
        ),
        _ => (OperationState::Running, None),
    };

    Ok(Operation {
        id: id.to_string(),
        state,
        error,
        location: Some(op.location.clone()),
    })
}
