//! `hcp_hvn`: HashiCorp Virtual Network.
//!
//! Every configurable attribute forces replacement; there is no update.

use crate::config::ProviderContext;
use crate::error::ProviderError;
use crate::import::ImportIdFormat;
use crate::link::self_link;
use crate::operation::wait_for_operation;
use crate::resource::Resource;
use crate::resource_helpers::{Timeouts, delete_or_absent, format_time, project_override, read_or_absent};
use crate::schema::{Attribute, Schema};
use crate::validation::{required, validate_one_of, validate_private_cidr_block, validate_slug_id};
use hcp_client::{Hvn, HvnCreate, Location, resource_types};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const TYPE_NAME: &str = "hcp_hvn";
pub const DEFAULT_CIDR_BLOCK: &str = "172.25.16.0/20";
pub const CLOUD_PROVIDERS: [&str; 2] = ["aws", "azure"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HvnState {
    pub hvn_id: String,
    pub cloud_provider: String,
    pub region: String,
    pub cidr_block: String,
    pub project_id: String,
    pub organization_id: String,
    pub provider_account_id: String,
    pub state: String,
    pub created_at: String,
    pub self_link: String,
}

impl HvnState {
    pub(crate) fn from_model(hvn: &Hvn) -> Self {
        let (cloud_provider, region) = hvn
            .location
            .region
            .as_ref()
            .map(|r| (r.provider.clone(), r.region.clone()))
            .unwrap_or_default();

        Self {
            hvn_id: hvn.id.clone(),
            cloud_provider,
            region,
            cidr_block: hvn.cidr_block.clone(),
            project_id: hvn.location.project_id.clone(),
            organization_id: hvn.location.organization_id.clone(),
            provider_account_id: hvn.provider_account_id.clone(),
            state: hvn.state.clone(),
            created_at: format_time(hvn.created_at),
            self_link: self_link(&hvn.location, resource_types::HVN, &hvn.id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HvnResource {
    pub timeouts: Timeouts,
}

impl HvnResource {
    async fn fetch(&self, ctx: &ProviderContext, location: &Location, hvn_id: &str) -> Result<Option<HvnState>, ProviderError> {
        let hvn = read_or_absent("HVN", hvn_id, ctx.client().get_hvn(location, hvn_id)).await?;
        Ok(hvn.as_ref().map(HvnState::from_model))
    }
}

#[async_trait::async_trait]
impl Resource for HvnResource {
    type State = HvnState;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new(
            TYPE_NAME,
            vec![
                Attribute::required("hvn_id", "The ID of the HashiCorp Virtual Network (HVN).").force_new(),
                Attribute::required("cloud_provider", "The provider where the HVN is located. Only 'aws' and 'azure' are available.").force_new(),
                Attribute::required("region", "The region where the HVN is located.").force_new(),
                Attribute::optional_computed("cidr_block", "The CIDR range of the HVN. Defaults to 172.25.16.0/20.").force_new(),
                Attribute::optional_computed("project_id", "The ID of the project to create the HVN in.").force_new(),
                Attribute::computed("organization_id", "The ID of the organization this HVN belongs to."),
                Attribute::computed("provider_account_id", "The provider account ID where the HVN is located."),
                Attribute::computed("state", "The state of the HVN."),
                Attribute::computed("created_at", "The time that the HVN was created."),
                Attribute::computed("self_link", "A unique URL identifying the HVN."),
            ],
        )
    }

    fn import_format(&self) -> ImportIdFormat {
        ImportIdFormat::new(&["hvn_id"])
    }

    async fn create(&self, ctx: &ProviderContext, planned: HvnState) -> Result<HvnState, ProviderError> {
        validate_slug_id("hvn_id", &planned.hvn_id)?;
        let cloud_provider = validate_one_of("cloud_provider", &planned.cloud_provider, &CLOUD_PROVIDERS, true)?;
        required("region", &planned.region)?;
        let cidr_block = if planned.cidr_block.is_empty() {
            DEFAULT_CIDR_BLOCK.to_string()
        } else {
            planned.cidr_block.clone()
        };
        validate_private_cidr_block("cidr_block", &cidr_block)?;

        let location = ctx
            .location(project_override(&planned.project_id))
            .with_region(cloud_provider, planned.region.clone());

        if self.fetch(ctx, &location, &planned.hvn_id).await?.is_some() {
            return Err(ProviderError::validation(
                "hvn_id",
                format!("HVN {} already exists in project {}", planned.hvn_id, location.project_id),
            ));
        }

        let response = ctx
            .client()
            .create_hvn(
                &location,
                &HvnCreate {
                    id: planned.hvn_id.clone(),
                    location: location.clone(),
                    cidr_block,
                },
            )
            .await?;
        info!("Created HVN {} in project {}", response.network.id, location.project_id);

        if let Some(operation) = &response.operation {
            wait_for_operation(
                ctx,
                &location,
                &format!("HVN {} creation", planned.hvn_id),
                &operation.id,
                self.timeouts.create,
            )
            .await?;
        }

        self.fetch(ctx, &location, &planned.hvn_id)
            .await?
            .ok_or_else(|| ProviderError::NotFound(format!("HVN {} disappeared after creation", planned.hvn_id)))
    }

    async fn read(&self, ctx: &ProviderContext, current: &HvnState) -> Result<Option<HvnState>, ProviderError> {
        let location = ctx.location(project_override(&current.project_id));
        self.fetch(ctx, &location, &current.hvn_id).await
    }

    async fn delete(&self, ctx: &ProviderContext, current: &HvnState) -> Result<(), ProviderError> {
        let location = ctx.location(project_override(&current.project_id));
        delete_or_absent(
            ctx,
            &location,
            "HVN",
            &current.hvn_id,
            self.timeouts.delete,
            ctx.client().delete_hvn(&location, &current.hvn_id),
        )
        .await
    }

    async fn import_state(&self, ctx: &ProviderContext, id: &str) -> Result<HvnState, ProviderError> {
        let import = self.import_format().parse(id)?;
        let location = ctx.location(import.project_id.as_deref());
        let hvn_id = import.get("hvn_id");

        self.fetch(ctx, &location, hvn_id)
            .await?
            .ok_or_else(|| ProviderError::NotFound(format!("HVN {} in project {}", hvn_id, location.project_id)))
    }
}
