//! `hcp_hvn_route`: route from an HVN to a peering or transit gateway attachment.

use crate::config::ProviderContext;
use crate::error::ProviderError;
use crate::import::ImportIdFormat;
use crate::link::{decode_link, decode_link_any, self_link};
use crate::resource::Resource;
use crate::resource_helpers::{Timeouts, delete_or_absent, format_time, read_or_absent, wait_for_optional_operation};
use crate::schema::{Attribute, Schema};
use crate::validation::{validate_cidr_block, validate_slug_id};
use hcp_client::{Location, Route, RouteCreate, RouteTarget, resource_types};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const TYPE_NAME: &str = "hcp_hvn_route";

/// Link types a route may target
pub const TARGET_TYPES: [&str; 2] = [resource_types::PEERING, resource_types::TGW_ATTACHMENT];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HvnRouteState {
    pub hvn_link: String,
    pub hvn_route_id: String,
    pub destination_cidr: String,
    pub target_link: String,
    pub project_id: String,
    pub state: String,
    pub created_at: String,
    pub self_link: String,
}

impl HvnRouteState {
    fn from_model(route: &Route) -> Self {
        let target = &route.target.hvn_connection;
        Self {
            hvn_link: self_link(&route.hvn.location, resource_types::HVN, &route.hvn.id),
            hvn_route_id: route.id.clone(),
            destination_cidr: route.destination.clone(),
            target_link: self_link(&target.location, &target.resource_type, &target.id),
            project_id: route.hvn.location.project_id.clone(),
            state: route.state.clone(),
            created_at: format_time(route.created_at),
            self_link: self_link(&route.hvn.location, resource_types::ROUTE, &route.id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HvnRouteResource {
    pub timeouts: Timeouts,
}

impl HvnRouteResource {
    async fn fetch(ctx: &ProviderContext, location: &Location, hvn_id: &str, route_id: &str) -> Result<Option<HvnRouteState>, ProviderError> {
        let route = read_or_absent("HVN route", route_id, ctx.client().get_route(location, hvn_id, route_id)).await?;
        Ok(route.as_ref().map(HvnRouteState::from_model))
    }
}

#[async_trait::async_trait]
impl Resource for HvnRouteResource {
    type State = HvnRouteState;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new(
            TYPE_NAME,
            vec![
                Attribute::required("hvn_link", "The self_link of the HashiCorp Virtual Network (HVN).").force_new(),
                Attribute::required("hvn_route_id", "The ID of the HVN route.").force_new(),
                Attribute::required("destination_cidr", "The destination CIDR of the HVN route.").force_new(),
                Attribute::required("target_link", "A unique URL identifying the target of the HVN route. Examples of the target: peering connection, transit gateway attachment.").force_new(),
                Attribute::computed("project_id", "The ID of the HCP project where the HVN route is located."),
                Attribute::computed("state", "The state of the HVN route."),
                Attribute::computed("created_at", "The time that the HVN route was created."),
                Attribute::computed("self_link", "A unique URL identifying the HVN route."),
            ],
        )
    }

    fn import_format(&self) -> ImportIdFormat {
        ImportIdFormat::new(&["hvn_id", "route_id"])
    }

    async fn create(&self, ctx: &ProviderContext, planned: HvnRouteState) -> Result<HvnRouteState, ProviderError> {
        validate_slug_id("hvn_route_id", &planned.hvn_route_id)?;
        validate_cidr_block("destination_cidr", &planned.destination_cidr)?;
        let hvn = decode_link(&planned.hvn_link, resource_types::HVN, ctx.organization_id())?;
        let target = decode_link_any(&planned.target_link, &TARGET_TYPES, ctx.organization_id())?;
        let location = hvn.location.clone();

        match ctx.client().get_hvn(&location, &hvn.id).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                return Err(ProviderError::NotFound(format!("HVN {} (hvn_link) in project {}", hvn.id, location.project_id)));
            }
            Err(e) => return Err(e.into()),
        }

        let response = ctx
            .client()
            .create_route(
                &location,
                &hvn.id,
                &RouteCreate {
                    id: planned.hvn_route_id.clone(),
                    destination: planned.destination_cidr.clone(),
                    target: RouteTarget { hvn_connection: target },
                },
            )
            .await?;
        info!("Created route {} on HVN {}", planned.hvn_route_id, hvn.id);

        wait_for_optional_operation(
            ctx,
            &location,
            &format!("HVN route {} creation", planned.hvn_route_id),
            response.operation.as_ref(),
            self.timeouts.create,
        )
        .await?;

        Self::fetch(ctx, &location, &hvn.id, &planned.hvn_route_id)
            .await?
            .ok_or_else(|| ProviderError::NotFound(format!("HVN route {} disappeared after creation", planned.hvn_route_id)))
    }

    async fn read(&self, ctx: &ProviderContext, current: &HvnRouteState) -> Result<Option<HvnRouteState>, ProviderError> {
        let hvn = decode_link(&current.hvn_link, resource_types::HVN, ctx.organization_id())?;
        Self::fetch(ctx, &hvn.location, &hvn.id, &current.hvn_route_id).await
    }

    async fn delete(&self, ctx: &ProviderContext, current: &HvnRouteState) -> Result<(), ProviderError> {
        let hvn = decode_link(&current.hvn_link, resource_types::HVN, ctx.organization_id())?;
        delete_or_absent(
            ctx,
            &hvn.location,
            "HVN route",
            &current.hvn_route_id,
            self.timeouts.delete,
            ctx.client().delete_route(&hvn.location, &hvn.id, &current.hvn_route_id),
        )
        .await
    }

    async fn import_state(&self, ctx: &ProviderContext, id: &str) -> Result<HvnRouteState, ProviderError> {
        let import = self.import_format().parse(id)?;
        let location = ctx.location(import.project_id.as_deref());
        let (hvn_id, route_id) = (import.get("hvn_id"), import.get("route_id"));

        Self::fetch(ctx, &location, hvn_id, route_id)
            .await?
            .ok_or_else(|| ProviderError::NotFound(format!("HVN route {} on HVN {}", route_id, hvn_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TEST_PROJECT, create_test_hvn, hvn_link, mock_context};

    fn planned() -> HvnRouteState {
        HvnRouteState {
            hvn_link: hvn_link(TEST_PROJECT, "hvn-1"),
            hvn_route_id: "peering-route".to_string(),
            destination_cidr: "10.0.0.0/16".to_string(),
            target_link: "/project/proj-1/peering/peer-1".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_route_to_peering() {
        let (mock, _clock, ctx) = mock_context();
        mock.add_hvn(create_test_hvn(TEST_PROJECT, "hvn-1"));
        let resource = HvnRouteResource::default();

        let state = resource.create(&ctx, planned()).await.unwrap();

        assert_eq!(state.hvn_link, "/project/proj-1/hvn/hvn-1");
        assert_eq!(state.target_link, "/project/proj-1/peering/peer-1");
        assert_eq!(state.state, "ACTIVE");
        assert_eq!(state.self_link, "/project/proj-1/route/peering-route");
    }

    #[tokio::test]
    async fn test_tgw_attachment_target_accepted_hvn_target_rejected() {
        let (mock, _clock, ctx) = mock_context();
        mock.add_hvn(create_test_hvn(TEST_PROJECT, "hvn-1"));
        let resource = HvnRouteResource::default();

        let tgw = HvnRouteState {
            target_link: "/project/proj-1/tgw-attachment/att-1".to_string(),
            ..planned()
        };
        assert!(resource.create(&ctx, tgw).await.is_ok());

        let wrong = HvnRouteState {
            hvn_route_id: "other-route".to_string(),
            target_link: hvn_link(TEST_PROJECT, "hvn-1"),
            ..planned()
        };
        let err = resource.create(&ctx, wrong).await.unwrap_err();
        assert!(matches!(err, ProviderError::LinkTypeMismatch { .. }));
    }

    #[tokio::test]
    async fn test_invalid_destination_rejected_before_remote_call() {
        let (mock, _clock, ctx) = mock_context();
        let resource = HvnRouteResource::default();

        let config = HvnRouteState {
            destination_cidr: "10.0.0.0/40".to_string(),
            ..planned()
        };
        assert!(resource.create(&ctx, config).await.is_err());
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_read_after_delete_and_import() {
        let (mock, _clock, ctx) = mock_context();
        mock.add_hvn(create_test_hvn(TEST_PROJECT, "hvn-1"));
        let resource = HvnRouteResource::default();
        let state = resource.create(&ctx, planned()).await.unwrap();

        let imported = resource.import_state(&ctx, "proj-1:hvn-1:peering-route").await.unwrap();
        assert_eq!(imported, state);

        resource.delete(&ctx, &state).await.unwrap();
        assert_eq!(resource.read(&ctx, &state).await.unwrap(), None);
        resource.delete(&ctx, &state).await.unwrap();
    }
}
