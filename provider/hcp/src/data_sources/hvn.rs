//! `hcp_hvn` data source: looks up an existing HVN by ID.

use crate::config::ProviderContext;
use crate::error::ProviderError;
use crate::resource::DataSource;
use crate::resource_helpers::project_override;
use crate::resources::hvn::{HvnState, TYPE_NAME};
use crate::schema::{Attribute, Schema};
use crate::validation::validate_slug_id;

#[derive(Debug, Clone, Default)]
pub struct HvnDataSource;

#[async_trait::async_trait]
impl DataSource for HvnDataSource {
    type State = HvnState;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new(
            TYPE_NAME,
            vec![
                Attribute::required("hvn_id", "The ID of the HashiCorp Virtual Network (HVN)."),
                Attribute::optional_computed("project_id", "The ID of the HCP project where the HVN is located."),
                Attribute::computed("cloud_provider", "The provider where the HVN is located."),
                Attribute::computed("region", "The region where the HVN is located."),
                Attribute::computed("cidr_block", "The CIDR range of the HVN."),
                Attribute::computed("organization_id", "The ID of the organization this HVN belongs to."),
                Attribute::computed("provider_account_id", "The provider account ID where the HVN is located."),
                Attribute::computed("state", "The state of the HVN."),
                Attribute::computed("created_at", "The time that the HVN was created."),
                Attribute::computed("self_link", "A unique URL identifying the HVN."),
            ],
        )
    }

    async fn read(&self, ctx: &ProviderContext, config: HvnState) -> Result<HvnState, ProviderError> {
        validate_slug_id("hvn_id", &config.hvn_id)?;
        let location = ctx.location(project_override(&config.project_id));

        match ctx.client().get_hvn(&location, &config.hvn_id).await {
            Ok(hvn) => Ok(HvnState::from_model(&hvn)),
            Err(e) if e.is_not_found() => Err(ProviderError::NotFound(format!(
                "HVN {} in project {}",
                config.hvn_id, location.project_id
            ))),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TEST_PROJECT, create_test_hvn, mock_context};

    #[tokio::test]
    async fn test_read_existing_hvn() {
        let (mock, _clock, ctx) = mock_context();
        mock.add_hvn(create_test_hvn(TEST_PROJECT, "hvn-1"));

        let state = HvnDataSource
            .read(
                &ctx,
                HvnState {
                    hvn_id: "hvn-1".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(state.region, "us-west-2");
        assert_eq!(state.provider_account_id, "123456789012");
        assert_eq!(state.self_link, "/project/proj-1/hvn/hvn-1");
    }

    #[tokio::test]
    async fn test_missing_hvn_is_an_error() {
        let (_mock, _clock, ctx) = mock_context();

        let err = HvnDataSource
            .read(
                &ctx,
                HvnState {
                    hvn_id: "hvn-1".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }
}
