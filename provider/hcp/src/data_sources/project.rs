//! `hcp_project` data source.

use crate::config::ProviderContext;
use crate::error::ProviderError;
use crate::resource::DataSource;
use crate::resource_helpers::project_override;
use crate::schema::{Attribute, Schema};
use chrono::SecondsFormat;
use hcp_client::Project;
use serde::{Deserialize, Serialize};

pub const TYPE_NAME: &str = "hcp_project";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectState {
    pub project_id: String,
    pub name: String,
    pub description: String,
    pub organization_id: String,
    pub created_at: String,
}

impl ProjectState {
    fn from_model(project: &Project) -> Self {
        Self {
            project_id: project.id.clone(),
            name: project.name.clone(),
            description: project.description.clone(),
            organization_id: project.parent.id.clone(),
            created_at: project.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Looks up `project_id`, or the provider default project when unset
#[derive(Debug, Clone, Default)]
pub struct ProjectDataSource;

#[async_trait::async_trait]
impl DataSource for ProjectDataSource {
    type State = ProjectState;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new(
            TYPE_NAME,
            vec![
                Attribute::optional_computed("project_id", "The ID of the HCP project. Defaults to the provider project."),
                Attribute::computed("name", "The project name."),
                Attribute::computed("description", "The project description."),
                Attribute::computed("organization_id", "The ID of the organization the project belongs to."),
                Attribute::computed("created_at", "The time that the project was created."),
            ],
        )
    }

    async fn read(&self, ctx: &ProviderContext, config: ProjectState) -> Result<ProjectState, ProviderError> {
        let project_id = ctx.location(project_override(&config.project_id)).project_id;

        match ctx.client().get_project(&project_id).await {
            Ok(project) => Ok(ProjectState::from_model(&project)),
            Err(e) if e.is_not_found() => Err(ProviderError::NotFound(format!("project {}", project_id))),
            Err(e) => Err(e.into()),
        }
    }
}
