//! `hcp_hvn_peering_connection`: peering between two HVNs.

use crate::config::ProviderContext;
use crate::error::ProviderError;
use crate::import::ImportIdFormat;
use crate::link::{decode_link, self_link};
use crate::operation::poll_until;
use crate::resource::Resource;
use crate::resource_helpers::{Timeouts, delete_or_absent, format_time, read_or_absent, wait_for_optional_operation};
use crate::schema::{Attribute, Schema};
use hcp_client::{Link, Location, Peering, PeeringCreate, PeeringState, PeeringTarget, resource_types};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const TYPE_NAME: &str = "hcp_hvn_peering_connection";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeeringConnectionState {
    pub hvn_1: String,
    pub hvn_2: String,
    pub peering_id: String,
    pub organization_id: String,
    pub project_id: String,
    pub state: String,
    pub created_at: String,
    pub expires_at: String,
    pub self_link: String,
}

impl PeeringConnectionState {
    fn from_model(peering: &Peering) -> Self {
        let location = &peering.hvn.location;
        Self {
            hvn_1: self_link(location, resource_types::HVN, &peering.hvn.id),
            hvn_2: self_link(&peering.target.hvn.location, resource_types::HVN, &peering.target.hvn.id),
            peering_id: peering.id.clone(),
            organization_id: location.organization_id.clone(),
            project_id: location.project_id.clone(),
            state: peering.state.as_str().to_string(),
            created_at: format_time(peering.created_at),
            expires_at: format_time(peering.expires_at),
            self_link: self_link(location, resource_types::PEERING, &peering.id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PeeringConnectionResource {
    pub timeouts: Timeouts,
}

impl PeeringConnectionResource {
    fn hvn_link(ctx: &ProviderContext, field: &str, value: &str) -> Result<Link, ProviderError> {
        if value.is_empty() {
            return Err(ProviderError::validation(field, "is required"));
        }
        decode_link(value, resource_types::HVN, ctx.organization_id())
    }

    /// Existence of an HVN is a precondition here, so absence is an error
    async fn require_hvn(ctx: &ProviderContext, field: &str, link: &Link) -> Result<(), ProviderError> {
        match ctx.client().get_hvn(&link.location, &link.id).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => Err(ProviderError::NotFound(format!(
                "HVN {} ({}) in project {}",
                link.id, field, link.location.project_id
            ))),
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch(
        ctx: &ProviderContext,
        location: &Location,
        hvn_id: &str,
        peering_id: &str,
    ) -> Result<Option<PeeringConnectionState>, ProviderError> {
        let peering = read_or_absent("Peering", peering_id, ctx.client().get_peering(location, hvn_id, peering_id)).await?;
        Ok(peering.as_ref().map(PeeringConnectionState::from_model))
    }

    async fn wait_until_active(
        &self,
        ctx: &ProviderContext,
        location: &Location,
        hvn_id: &str,
        peering_id: &str,
    ) -> Result<Peering, ProviderError> {
        let name = format!("peering {} to become ACTIVE", peering_id);
        poll_until(ctx, &name, peering_id, self.timeouts.create, || async move {
            let peering = ctx.client().get_peering(location, hvn_id, peering_id).await?;
            debug!("Peering {} is {}", peering_id, peering.state.as_str());
            match peering.state {
                PeeringState::Active => Ok(Some(peering)),
                PeeringState::Failed | PeeringState::Rejected | PeeringState::Expired => {
                    Err(ProviderError::OperationFailed {
                        name: format!("peering {}", peering_id),
                        operation_id: peering_id.to_string(),
                        message: format!("peering entered state {}", peering.state.as_str()),
                    })
                }
                _ => Ok(None),
            }
        })
        .await
    }
}

#[async_trait::async_trait]
impl Resource for PeeringConnectionResource {
    type State = PeeringConnectionState;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new(
            TYPE_NAME,
            vec![
                Attribute::required("hvn_1", "The unique URL of one of the HVNs being peered.").force_new(),
                Attribute::required("hvn_2", "The unique URL of one of the HVNs being peered.").force_new(),
                Attribute::computed("peering_id", "The ID of the peering connection."),
                Attribute::computed("organization_id", "The ID of the HCP organization where the peering connection is located."),
                Attribute::computed("project_id", "The ID of the HCP project where the peering connection is located."),
                Attribute::computed("state", "The state of the HVN peering connection."),
                Attribute::computed("created_at", "The time that the peering connection was created."),
                Attribute::computed("expires_at", "The time after which the peering connection will be considered expired if it hasn't transitioned into ACCEPTED or ACTIVE state."),
                Attribute::computed("self_link", "A unique URL identifying the peering connection."),
            ],
        )
    }

    fn import_format(&self) -> ImportIdFormat {
        ImportIdFormat::new(&["hvn_id", "peering_id"])
    }

    async fn create(&self, ctx: &ProviderContext, planned: PeeringConnectionState) -> Result<PeeringConnectionState, ProviderError> {
        let hvn_1 = Self::hvn_link(ctx, "hvn_1", &planned.hvn_1)?;
        let hvn_2 = Self::hvn_link(ctx, "hvn_2", &planned.hvn_2)?;
        if hvn_1 == hvn_2 {
            return Err(ProviderError::validation("hvn_2", "an HVN cannot be peered with itself"));
        }

        Self::require_hvn(ctx, "hvn_1", &hvn_1).await?;
        Self::require_hvn(ctx, "hvn_2", &hvn_2).await?;

        let location = hvn_1.location.clone();
        let response = ctx
            .client()
            .create_peering(
                &location,
                &hvn_1.id,
                &PeeringCreate {
                    hvn: hvn_1.clone(),
                    target: PeeringTarget { hvn: hvn_2.clone() },
                },
            )
            .await?;
        let peering_id = response.peering.id.clone();
        info!("Created peering {} between HVN {} and HVN {}", peering_id, hvn_1.id, hvn_2.id);

        wait_for_optional_operation(
            ctx,
            &location,
            &format!("peering {} creation", peering_id),
            response.operation.as_ref(),
            self.timeouts.create,
        )
        .await?;

        let peering = self.wait_until_active(ctx, &location, &hvn_1.id, &peering_id).await?;
        Ok(PeeringConnectionState::from_model(&peering))
    }

    async fn read(&self, ctx: &ProviderContext, current: &PeeringConnectionState) -> Result<Option<PeeringConnectionState>, ProviderError> {
        let hvn_1 = Self::hvn_link(ctx, "hvn_1", &current.hvn_1)?;
        Self::fetch(ctx, &hvn_1.location, &hvn_1.id, &current.peering_id).await
    }

    async fn delete(&self, ctx: &ProviderContext, current: &PeeringConnectionState) -> Result<(), ProviderError> {
        let hvn_1 = Self::hvn_link(ctx, "hvn_1", &current.hvn_1)?;
        delete_or_absent(
            ctx,
            &hvn_1.location,
            "Peering",
            &current.peering_id,
            self.timeouts.delete,
            ctx.client().delete_peering(&hvn_1.location, &hvn_1.id, &current.peering_id),
        )
        .await
    }

    async fn import_state(&self, ctx: &ProviderContext, id: &str) -> Result<PeeringConnectionState, ProviderError> {
        let import = self.import_format().parse(id)?;
        let location = ctx.location(import.project_id.as_deref());
        let (hvn_id, peering_id) = (import.get("hvn_id"), import.get("peering_id"));

        Self::fetch(ctx, &location, hvn_id, peering_id)
            .await?
            .ok_or_else(|| ProviderError::NotFound(format!("peering {} on HVN {}", peering_id, hvn_id)))
    }
}
