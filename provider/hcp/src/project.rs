//! Default project resolution.
//!
//! Order: explicit argument, provider default, environment value, the only
//! project of the only organization, and finally the oldest project of that
//! organization (with a warning).

use crate::error::ProviderError;
use hcp_client::{HcpClientTrait, Location, Project};
use tracing::{debug, info, warn};

/// Resolve the location (organization + project) handlers default to
pub async fn resolve_location(
    client: &dyn HcpClientTrait,
    explicit: Option<&str>,
    provider_default: Option<&str>,
    env: Option<&str>,
) -> Result<Location, ProviderError> {
    let configured = [("explicit", explicit), ("provider", provider_default), ("environment", env)]
        .into_iter()
        .find_map(|(source, value)| value.filter(|v| !v.is_empty()).map(|v| (source, v)));

    if let Some((source, project_id)) = configured {
        debug!("Using {} project {}", source, project_id);
        let project = client.get_project(project_id).await.map_err(|e| {
            if e.is_not_found() {
                ProviderError::InvalidConfig(format!("project {} ({} setting) does not exist", project_id, source))
            } else {
                ProviderError::Client(e)
            }
        })?;
        return Ok(Location::new(project.parent.id, project.id));
    }

    let organizations = client.list_organizations().await?;
    let organization = match organizations.as_slice() {
        [only] => only,
        [] => {
            return Err(ProviderError::InvalidConfig(
                "credentials have access to no organization".to_string(),
            ));
        }
        _ => {
            return Err(ProviderError::InvalidConfig(format!(
                "credentials have access to {} organizations; set a project_id",
                organizations.len()
            )));
        }
    };

    let projects = client.list_projects(&organization.id).await?;
    let project = match projects.len() {
        0 => {
            return Err(ProviderError::InvalidConfig(format!(
                "organization {} has no projects",
                organization.id
            )));
        }
        1 => &projects[0],
        n => {
            let oldest = oldest_project(&projects).ok_or_else(|| {
                ProviderError::InvalidConfig(format!("organization {} has no projects", organization.id))
            })?;
            warn!(
                "No project_id configured and organization {} has {} projects; defaulting to the oldest, {} ({})",
                organization.id, n, oldest.name, oldest.id
            );
            oldest
        }
    };

    info!("Resolved default project {} in organization {}", project.id, organization.id);
    Ok(Location::new(organization.id.clone(), project.id.clone()))
}

/// Earliest `created_at`, ties broken by project ID
fn oldest_project(projects: &[Project]) -> Option<&Project> {
    projects
        .iter()
        .min_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)))
}
