//! Resource-manager operations for MockHcpClient

use super::MockHcpClient;
use super::helpers::not_found;
use crate::error::HcpError;
use crate::models::*;

pub async fn list_organizations(client: &MockHcpClient) -> Result<Vec<Organization>, HcpError> {
    Ok(client.organizations.lock().unwrap().clone())
}

pub async fn get_organization(client: &MockHcpClient, id: &str) -> Result<Organization, HcpError> {
    client.organizations
        .lock()
        .unwrap()
        .iter()
        .find(|o| o.id == id)
        .cloned()
        .ok_or_else(|| not_found("Organization", id))
}

pub async fn list_projects(client: &MockHcpClient, organization_id: &str) -> Result<Vec<Project>, HcpError> {
    Ok(client.projects
        .lock()
        .unwrap()
        .iter()
        .filter(|p| p.parent.id == organization_id)
        .cloned()
        .collect())
}

pub async fn get_project(client: &MockHcpClient, id: &str) -> Result<Project, HcpError> {
    client.projects
        .lock()
        .unwrap()
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .ok_or_else(|| not_found("Project", id))
}
