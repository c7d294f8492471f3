//! `hcp_organization` data source: the organization of the provider project.

use crate::config::ProviderContext;
use crate::error::ProviderError;
use crate::resource::DataSource;
use crate::schema::{Attribute, Schema};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

pub const TYPE_NAME: &str = "hcp_organization";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationState {
    pub organization_id: String,
    pub name: String,
    pub state: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Default)]
pub struct OrganizationDataSource;

#[async_trait::async_trait]
impl DataSource for OrganizationDataSource {
    type State = OrganizationState;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new(
            TYPE_NAME,
            vec![
                Attribute::computed("organization_id", "The ID of the HCP organization."),
                Attribute::computed("name", "The organization name."),
                Attribute::computed("state", "The state of the organization."),
                Attribute::computed("created_at", "The time that the organization was created."),
            ],
        )
    }

    async fn read(&self, ctx: &ProviderContext, _config: OrganizationState) -> Result<OrganizationState, ProviderError> {
        let id = ctx.organization_id();
        let organization = match ctx.client().get_organization(id).await {
            Ok(organization) => organization,
            Err(e) if e.is_not_found() => return Err(ProviderError::NotFound(format!("organization {}", id))),
            Err(e) => return Err(e.into()),
        };

        Ok(OrganizationState {
            organization_id: organization.id,
            name: organization.name,
            state: organization.state.unwrap_or_default(),
            created_at: organization.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TEST_ORG, mock_context};
    use chrono::Utc;
    use hcp_client::mock::organization_fixture;

    #[tokio::test]
    async fn test_reads_context_organization() {
        let (mock, _clock, ctx) = mock_context();
        mock.add_organization(organization_fixture(TEST_ORG, Utc::now()));

        let state = OrganizationDataSource.read(&ctx, OrganizationState::default()).await.unwrap();

        assert_eq!(state.organization_id, TEST_ORG);
        assert!(!state.name.is_empty());
    }

    #[tokio::test]
    async fn test_missing_organization_is_an_error() {
        let (_mock, _clock, ctx) = mock_context();

        let err = OrganizationDataSource.read(&ctx, OrganizationState::default()).await.unwrap_err();

        assert!(err.is_not_found());
    }
}
