//! `hcp_vault_cluster`: managed Vault cluster attached to an HVN.
//!
//! Tier, public endpoint, major-version upgrade policy and metrics streaming
//! can change in place; each changed group is its own remote call and
//! operation. Everything else forces replacement.

use crate::config::ProviderContext;
use crate::error::ProviderError;
use crate::import::ImportIdFormat;
use crate::link::{new_link, self_link};
use crate::resource::Resource;
use crate::resource_helpers::{
    Timeouts, delete_or_absent, format_time, project_override, read_or_absent, wait_for_optional_operation,
};
use crate::schema::{Attribute, Schema};
use crate::validation::{validate_one_of, validate_slug_id};
use hcp_client::{
    DatadogConfig, Location, MaintenanceWindow, MajorVersionUpgradeConfig, MetricsConfig, Operation, VaultCluster,
    VaultClusterConfig, VaultClusterCreate, VaultNetworkConfig, resource_types,
};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const TYPE_NAME: &str = "hcp_vault_cluster";

pub const TIERS: [&str; 8] = [
    "dev",
    "starter_small",
    "standard_small",
    "standard_medium",
    "standard_large",
    "plus_small",
    "plus_medium",
    "plus_large",
];
const DEV_TIER: &str = "dev";

pub const UPGRADE_TYPES: [&str; 3] = ["AUTOMATIC", "SCHEDULED", "MANUAL"];
const SCHEDULED: &str = "SCHEDULED";
pub const MAINTENANCE_DAYS: [&str; 7] = [
    "MONDAY", "TUESDAY", "WEDNESDAY", "THURSDAY", "FRIDAY", "SATURDAY", "SUNDAY",
];
pub const MAINTENANCE_WINDOWS: [&str; 4] = [
    "WINDOW_12AM_4AM",
    "WINDOW_6AM_10AM",
    "WINDOW_12PM_4PM",
    "WINDOW_6PM_10PM",
];
pub const DATADOG_REGIONS: [&str; 4] = ["us1", "us3", "us5", "eu1"];

const VAULT_PORT: u16 = 8200;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeConfigState {
    pub upgrade_type: String,
    pub maintenance_window_day: String,
    pub maintenance_window_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfigState {
    pub datadog_api_key: String,
    pub datadog_region: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultClusterState {
    pub cluster_id: String,
    pub hvn_id: String,
    pub tier: String,
    pub public_endpoint: bool,
    pub min_vault_version: String,
    pub project_id: String,
    pub major_version_upgrade_config: Option<UpgradeConfigState>,
    pub metrics_config: Option<MetricsConfigState>,
    pub organization_id: String,
    pub cloud_provider: String,
    pub region: String,
    pub vault_version: String,
    pub vault_public_endpoint_url: String,
    pub vault_private_endpoint_url: String,
    pub state: String,
    pub created_at: String,
    pub self_link: String,
}

impl VaultClusterState {
    /// Map the remote cluster, keeping values the API never returns.
    ///
    /// The Datadog API key is write-only: when the remote side omits it the
    /// local value is kept.
    fn from_model(cluster: &VaultCluster, local: Option<&VaultClusterState>) -> Self {
        let config = &cluster.config;
        let (cloud_provider, region) = cluster
            .location
            .region
            .as_ref()
            .map(|r| (r.provider.clone(), r.region.clone()))
            .unwrap_or_default();

        let local_api_key = local
            .and_then(|l| l.metrics_config.as_ref())
            .map(|m| m.datadog_api_key.clone())
            .unwrap_or_default();
        let metrics_config = config
            .metrics_config
            .as_ref()
            .and_then(|m| m.datadog.as_ref())
            .map(|datadog| MetricsConfigState {
                datadog_api_key: datadog.api_key.clone().unwrap_or(local_api_key),
                datadog_region: datadog.region.clone(),
            });

        let major_version_upgrade_config = config.major_version_upgrade_config.as_ref().map(|upgrade| {
            let window = upgrade.maintenance_window.as_ref();
            UpgradeConfigState {
                upgrade_type: upgrade.upgrade_type.clone(),
                maintenance_window_day: window.map(|w| w.day_of_week.clone()).unwrap_or_default(),
                maintenance_window_time: window.map(|w| w.time_window.clone()).unwrap_or_default(),
            }
        });

        let min_vault_version = local
            .map(|l| l.min_vault_version.clone())
            .unwrap_or_else(|| config.initial_version.clone());

        Self {
            cluster_id: cluster.id.clone(),
            hvn_id: config.network_config.network.id.clone(),
            tier: config.tier.to_lowercase(),
            public_endpoint: config.network_config.public_endpoint,
            min_vault_version,
            project_id: cluster.location.project_id.clone(),
            major_version_upgrade_config,
            metrics_config,
            organization_id: cluster.location.organization_id.clone(),
            cloud_provider,
            region,
            vault_version: cluster.current_version.clone(),
            vault_public_endpoint_url: endpoint_url(&cluster.dns_names.public),
            vault_private_endpoint_url: endpoint_url(&cluster.dns_names.private),
            state: cluster.state.as_str().to_string(),
            created_at: format_time(cluster.created_at),
            self_link: self_link(&cluster.location, resource_types::VAULT_CLUSTER, &cluster.id),
        }
    }
}

fn endpoint_url(host: &str) -> String {
    if host.is_empty() {
        String::new()
    } else {
        format!("https://{}:{}", host, VAULT_PORT)
    }
}

/// Validate the upgrade block into its wire form
fn upgrade_config(tier: &str, state: Option<&UpgradeConfigState>) -> Result<Option<MajorVersionUpgradeConfig>, ProviderError> {
    let Some(state) = state else {
        return Ok(None);
    };
    if tier == DEV_TIER {
        return Err(ProviderError::validation(
            "major_version_upgrade_config",
            "is not supported for the dev tier",
        ));
    }

    let upgrade_type = validate_one_of("upgrade_type", &state.upgrade_type, &UPGRADE_TYPES, true)?;
    let has_day = !state.maintenance_window_day.is_empty();
    let has_time = !state.maintenance_window_time.is_empty();

    let maintenance_window = if upgrade_type == SCHEDULED {
        if !has_day || !has_time {
            return Err(ProviderError::ConflictingConfig {
                first: "maintenance_window_day".to_string(),
                second: "maintenance_window_time".to_string(),
                message: "both are required when upgrade_type is SCHEDULED".to_string(),
            });
        }
        Some(MaintenanceWindow {
            day_of_week: validate_one_of("maintenance_window_day", &state.maintenance_window_day, &MAINTENANCE_DAYS, true)?,
            time_window: validate_one_of("maintenance_window_time", &state.maintenance_window_time, &MAINTENANCE_WINDOWS, true)?,
        })
    } else {
        if has_day || has_time {
            return Err(ProviderError::ConflictingConfig {
                first: "maintenance_window_day".to_string(),
                second: "maintenance_window_time".to_string(),
                message: format!("only allowed when upgrade_type is SCHEDULED, not {}", upgrade_type),
            });
        }
        None
    };

    Ok(Some(MajorVersionUpgradeConfig {
        upgrade_type,
        maintenance_window,
    }))
}

/// Validate the metrics block into its wire form
fn metrics_config(state: Option<&MetricsConfigState>) -> Result<Option<MetricsConfig>, ProviderError> {
    let Some(state) = state else {
        return Ok(None);
    };
    if state.datadog_api_key.is_empty() || state.datadog_region.is_empty() {
        return Err(ProviderError::ConflictingConfig {
            first: "datadog_api_key".to_string(),
            second: "datadog_region".to_string(),
            message: "both are required to stream metrics to Datadog".to_string(),
        });
    }

    Ok(Some(MetricsConfig {
        datadog: Some(DatadogConfig {
            api_key: Some(state.datadog_api_key.clone()),
            region: validate_one_of("datadog_region", &state.datadog_region, &DATADOG_REGIONS, true)?,
        }),
    }))
}

#[derive(Debug, Clone, Default)]
pub struct VaultClusterResource {
    pub timeouts: Timeouts,
}

impl VaultClusterResource {
    async fn fetch(
        ctx: &ProviderContext,
        location: &Location,
        cluster_id: &str,
        local: Option<&VaultClusterState>,
    ) -> Result<Option<VaultClusterState>, ProviderError> {
        let cluster = read_or_absent("Vault cluster", cluster_id, ctx.client().get_vault_cluster(location, cluster_id)).await?;
        Ok(cluster.as_ref().map(|c| VaultClusterState::from_model(c, local)))
    }

    async fn wait(&self, ctx: &ProviderContext, location: &Location, what: String, operation: Operation) -> Result<(), ProviderError> {
        wait_for_optional_operation(ctx, location, &what, Some(&operation), self.timeouts.update).await
    }
}

#[async_trait::async_trait]
impl Resource for VaultClusterResource {
    type State = VaultClusterState;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new(
            TYPE_NAME,
            vec![
                Attribute::required("cluster_id", "The ID of the HCP Vault cluster.").force_new(),
                Attribute::required("hvn_id", "The ID of the HVN this HCP Vault cluster is associated to.").force_new(),
                Attribute::optional_computed("tier", "Tier of the HCP Vault cluster."),
                Attribute::optional("public_endpoint", "Denotes that the cluster has a public endpoint."),
                Attribute::optional_computed("min_vault_version", "The minimum Vault version to use when creating the cluster.").force_new(),
                Attribute::optional_computed("project_id", "The ID of the HCP project where the Vault cluster is located.").force_new(),
                Attribute::optional_computed("major_version_upgrade_config", "The Major Version Upgrade configuration."),
                Attribute::optional("metrics_config", "The metrics configuration for export.").sensitive(),
                Attribute::computed("organization_id", "The ID of the organization this HCP Vault cluster is located in."),
                Attribute::computed("cloud_provider", "The provider where the HCP Vault cluster is located."),
                Attribute::computed("region", "The region where the HCP Vault cluster is located."),
                Attribute::computed("vault_version", "The Vault version of the cluster."),
                Attribute::computed("vault_public_endpoint_url", "The public URL for the Vault cluster."),
                Attribute::computed("vault_private_endpoint_url", "The private URL for the Vault cluster."),
                Attribute::computed("state", "The state of the Vault cluster."),
                Attribute::computed("created_at", "The time that the Vault cluster was created."),
                Attribute::computed("self_link", "A unique URL identifying the Vault cluster."),
            ],
        )
    }

    fn import_format(&self) -> ImportIdFormat {
        ImportIdFormat::new(&["cluster_id"])
    }

    async fn create(&self, ctx: &ProviderContext, planned: VaultClusterState) -> Result<VaultClusterState, ProviderError> {
        validate_slug_id("cluster_id", &planned.cluster_id)?;
        validate_slug_id("hvn_id", &planned.hvn_id)?;
        let tier = if planned.tier.is_empty() {
            DEV_TIER.to_string()
        } else {
            validate_one_of("tier", &planned.tier, &TIERS, true)?
        };
        let upgrade = upgrade_config(&tier, planned.major_version_upgrade_config.as_ref())?;
        let metrics = metrics_config(planned.metrics_config.as_ref())?;

        let location = ctx.location(project_override(&planned.project_id));
        let hvn = match ctx.client().get_hvn(&location, &planned.hvn_id).await {
            Ok(hvn) => hvn,
            Err(e) if e.is_not_found() => {
                return Err(ProviderError::NotFound(format!(
                    "HVN {} (hvn_id) in project {}",
                    planned.hvn_id, location.project_id
                )));
            }
            Err(e) => return Err(e.into()),
        };
        let cluster_location = Location {
            region: hvn.location.region.clone(),
            ..location.clone()
        };

        if Self::fetch(ctx, &location, &planned.cluster_id, None).await?.is_some() {
            return Err(ProviderError::validation(
                "cluster_id",
                format!("Vault cluster {} already exists in project {}", planned.cluster_id, location.project_id),
            ));
        }

        let request = VaultClusterCreate {
            id: planned.cluster_id.clone(),
            location: cluster_location.clone(),
            config: VaultClusterConfig {
                tier: tier.to_uppercase(),
                network_config: VaultNetworkConfig {
                    network: new_link(location.clone(), resource_types::HVN, &planned.hvn_id),
                    public_endpoint: planned.public_endpoint,
                },
                initial_version: planned.min_vault_version.clone(),
                major_version_upgrade_config: upgrade,
                metrics_config: metrics,
            },
        };
        let response = ctx.client().create_vault_cluster(&location, &request).await?;
        info!("Created Vault cluster {} on HVN {}", planned.cluster_id, planned.hvn_id);

        wait_for_optional_operation(
            ctx,
            &location,
            &format!("Vault cluster {} creation", planned.cluster_id),
            response.operation.as_ref(),
            self.timeouts.create,
        )
        .await?;

        Self::fetch(ctx, &location, &planned.cluster_id, Some(&planned))
            .await?
            .ok_or_else(|| ProviderError::NotFound(format!("Vault cluster {} disappeared after creation", planned.cluster_id)))
    }

    async fn read(&self, ctx: &ProviderContext, current: &VaultClusterState) -> Result<Option<VaultClusterState>, ProviderError> {
        let location = ctx.location(project_override(&current.project_id));
        Self::fetch(ctx, &location, &current.cluster_id, Some(current)).await
    }

    async fn update(
        &self,
        ctx: &ProviderContext,
        prior: &VaultClusterState,
        planned: VaultClusterState,
    ) -> Result<Option<VaultClusterState>, ProviderError> {
        let prior_tier = prior.tier.to_lowercase();
        let tier = if planned.tier.is_empty() {
            prior_tier.clone()
        } else {
            validate_one_of("tier", &planned.tier, &TIERS, true)?
        };
        if tier != prior_tier && (tier == DEV_TIER || prior_tier == DEV_TIER) {
            return Err(ProviderError::validation(
                "tier",
                format!("cannot change tier from {} to {}: dev clusters cannot be scaled", prior_tier, tier),
            ));
        }
        let upgrade_changed = planned.major_version_upgrade_config != prior.major_version_upgrade_config;
        let upgrade = upgrade_config(&tier, planned.major_version_upgrade_config.as_ref())?;
        let metrics_changed = planned.metrics_config != prior.metrics_config;
        let metrics = metrics_config(planned.metrics_config.as_ref())?;

        let location = ctx.location(project_override(&prior.project_id));
        let cluster_id = prior.cluster_id.as_str();
        let client = ctx.client();

        if Self::fetch(ctx, &location, cluster_id, Some(prior)).await?.is_none() {
            return Ok(None);
        }

        if tier != prior_tier {
            info!("Scaling Vault cluster {} from {} to {}", cluster_id, prior_tier, tier);
            let operation = client.update_vault_cluster_tier(&location, cluster_id, &tier.to_uppercase()).await?;
            self.wait(ctx, &location, format!("Vault cluster {} tier update", cluster_id), operation).await?;
        }

        if planned.public_endpoint != prior.public_endpoint {
            info!("Setting public endpoint of Vault cluster {} to {}", cluster_id, planned.public_endpoint);
            let operation = client
                .update_vault_cluster_public_endpoint(&location, cluster_id, planned.public_endpoint)
                .await?;
            self.wait(ctx, &location, format!("Vault cluster {} public endpoint update", cluster_id), operation).await?;
        }

        if upgrade_changed {
            if let Some(upgrade) = &upgrade {
                let operation = client.update_vault_cluster_upgrade_config(&location, cluster_id, upgrade).await?;
                self.wait(ctx, &location, format!("Vault cluster {} upgrade config update", cluster_id), operation).await?;
            }
        }

        if metrics_changed {
            let metrics = metrics.unwrap_or_default();
            let operation = client.update_vault_cluster_metrics(&location, cluster_id, &metrics).await?;
            self.wait(ctx, &location, format!("Vault cluster {} metrics update", cluster_id), operation).await?;
        }

        Self::fetch(ctx, &location, cluster_id, Some(&planned)).await
    }

    async fn delete(&self, ctx: &ProviderContext, current: &VaultClusterState) -> Result<(), ProviderError> {
        let location = ctx.location(project_override(&current.project_id));
        delete_or_absent(
            ctx,
            &location,
            "Vault cluster",
            &current.cluster_id,
            self.timeouts.delete,
            ctx.client().delete_vault_cluster(&location, &current.cluster_id),
        )
        .await
    }

    async fn import_state(&self, ctx: &ProviderContext, id: &str) -> Result<VaultClusterState, ProviderError> {
        let import = self.import_format().parse(id)?;
        let location = ctx.location(import.project_id.as_deref());
        let cluster_id = import.get("cluster_id");

        Self::fetch(ctx, &location, cluster_id, None)
            .await?
            .ok_or_else(|| ProviderError::NotFound(format!("Vault cluster {} in project {}", cluster_id, location.project_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TEST_PROJECT, create_test_hvn, mock_context};
    use hcp_client::MockHcpClient;

    fn planned() -> VaultClusterState {
        VaultClusterState {
            cluster_id: "vault-1".to_string(),
            hvn_id: "hvn-1".to_string(),
            tier: "Standard_Small".to_string(),
            ..Default::default()
        }
    }

    fn update_calls(mock: &MockHcpClient) -> Vec<String> {
        mock.calls()
            .into_iter()
            .filter(|c| c.starts_with("update_"))
            .collect()
    }

    #[tokio::test]
    async fn test_create_normalizes_tier_and_maps_computed() {
        let (mock, _clock, ctx) = mock_context();
        mock.add_hvn(create_test_hvn(TEST_PROJECT, "hvn-1"));
        let resource = VaultClusterResource::default();

        let state = resource.create(&ctx, planned()).await.unwrap();

        assert_eq!(state.tier, "standard_small");
        assert_eq!(state.cloud_provider, "aws");
        assert_eq!(state.region, "us-west-2");
        assert_eq!(state.state, "RUNNING");
        assert_eq!(state.vault_public_endpoint_url, "");
        assert_eq!(state.vault_private_endpoint_url, "https://vault-1-private-vault.hashicorp.cloud:8200");
        assert_eq!(state.self_link, "/project/proj-1/vault-cluster/vault-1");
        assert!(!state.vault_version.is_empty());
    }

    #[tokio::test]
    async fn test_missing_hvn_is_not_found() {
        let (mock, _clock, ctx) = mock_context();
        let resource = VaultClusterResource::default();

        let err = resource.create(&ctx, planned()).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_scheduled_upgrade_requires_window() {
        let (mock, _clock, ctx) = mock_context();
        mock.add_hvn(create_test_hvn(TEST_PROJECT, "hvn-1"));
        let resource = VaultClusterResource::default();

        let missing_window = VaultClusterState {
            major_version_upgrade_config: Some(UpgradeConfigState {
                upgrade_type: "scheduled".to_string(),
                maintenance_window_day: "MONDAY".to_string(),
                ..Default::default()
            }),
            ..planned()
        };
        let err = resource.create(&ctx, missing_window).await.unwrap_err();
        assert!(err.to_string().contains("maintenance_window_time"));

        let manual_with_window = VaultClusterState {
            major_version_upgrade_config: Some(UpgradeConfigState {
                upgrade_type: "Manual".to_string(),
                maintenance_window_day: "MONDAY".to_string(),
                maintenance_window_time: "WINDOW_12AM_4AM".to_string(),
            }),
            ..planned()
        };
        assert!(resource.create(&ctx, manual_with_window).await.is_err());
        assert!(mock.calls().is_empty());

        let scheduled = VaultClusterState {
            major_version_upgrade_config: Some(UpgradeConfigState {
                upgrade_type: "scheduled".to_string(),
                maintenance_window_day: "friday".to_string(),
                maintenance_window_time: "window_6pm_10pm".to_string(),
            }),
            ..planned()
        };
        let state = resource.create(&ctx, scheduled).await.unwrap();
        assert_eq!(
            state.major_version_upgrade_config,
            Some(UpgradeConfigState {
                upgrade_type: "SCHEDULED".to_string(),
                maintenance_window_day: "FRIDAY".to_string(),
                maintenance_window_time: "WINDOW_6PM_10PM".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_datadog_key_kept_when_api_omits_it() {
        let (mock, _clock, ctx) = mock_context();
        mock.add_hvn(create_test_hvn(TEST_PROJECT, "hvn-1"));
        let resource = VaultClusterResource::default();
        let config = VaultClusterState {
            metrics_config: Some(MetricsConfigState {
                datadog_api_key: "dd-secret".to_string(),
                datadog_region: "US1".to_string(),
            }),
            ..planned()
        };

        let state = resource.create(&ctx, config).await.unwrap();
        let metrics = state.metrics_config.clone().unwrap();
        assert_eq!(metrics.datadog_api_key, "dd-secret");
        assert_eq!(metrics.datadog_region, "us1");

        let refreshed = resource.read(&ctx, &state).await.unwrap().unwrap();
        assert_eq!(refreshed, state);
    }

    #[tokio::test]
    async fn test_update_issues_one_call_per_changed_group() {
        let (mock, _clock, ctx) = mock_context();
        mock.add_hvn(create_test_hvn(TEST_PROJECT, "hvn-1"));
        let resource = VaultClusterResource::default();
        let prior = resource.create(&ctx, planned()).await.unwrap();

        let planned = VaultClusterState {
            tier: "PLUS_MEDIUM".to_string(),
            public_endpoint: true,
            ..prior.clone()
        };
        let updated = resource.update(&ctx, &prior, planned).await.unwrap().unwrap();

        assert_eq!(
            update_calls(&mock),
            vec!["update_vault_cluster_tier", "update_vault_cluster_public_endpoint"]
        );
        assert_eq!(updated.tier, "plus_medium");
        assert!(updated.public_endpoint);
        assert_eq!(updated.vault_public_endpoint_url, "https://vault-1-public-vault.hashicorp.cloud:8200");
    }

    #[tokio::test]
    async fn test_update_metrics_removal() {
        let (mock, _clock, ctx) = mock_context();
        mock.add_hvn(create_test_hvn(TEST_PROJECT, "hvn-1"));
        let resource = VaultClusterResource::default();
        let prior = resource
            .create(
                &ctx,
                VaultClusterState {
                    metrics_config: Some(MetricsConfigState {
                        datadog_api_key: "dd-secret".to_string(),
                        datadog_region: "us1".to_string(),
                    }),
                    ..planned()
                },
            )
            .await
            .unwrap();

        let planned = VaultClusterState {
            metrics_config: None,
            ..prior.clone()
        };
        let updated = resource.update(&ctx, &prior, planned).await.unwrap().unwrap();

        assert_eq!(update_calls(&mock), vec!["update_vault_cluster_metrics"]);
        assert_eq!(updated.metrics_config, None);
    }

    #[tokio::test]
    async fn test_dev_tier_cannot_be_scaled() {
        let (mock, _clock, ctx) = mock_context();
        mock.add_hvn(create_test_hvn(TEST_PROJECT, "hvn-1"));
        let resource = VaultClusterResource::default();
        let prior = resource
            .create(
                &ctx,
                VaultClusterState {
                    tier: "DEV".to_string(),
                    ..planned()
                },
            )
            .await
            .unwrap();

        let planned = VaultClusterState {
            tier: "standard_small".to_string(),
            ..prior.clone()
        };
        let err = resource.update(&ctx, &prior, planned).await.unwrap_err();

        assert!(err.to_string().contains("dev"));
        assert!(update_calls(&mock).is_empty());
    }

    #[tokio::test]
    async fn test_absent_cluster_is_not_an_error() {
        let (mock, _clock, ctx) = mock_context();
        mock.add_hvn(create_test_hvn(TEST_PROJECT, "hvn-1"));
        let resource = VaultClusterResource::default();
        let state = resource.create(&ctx, planned()).await.unwrap();

        mock.remove_vault_cluster(TEST_PROJECT, "vault-1");

        assert_eq!(resource.read(&ctx, &state).await.unwrap(), None);
        let planned = VaultClusterState {
            public_endpoint: true,
            ..state.clone()
        };
        assert_eq!(resource.update(&ctx, &state, planned).await.unwrap(), None);
        resource.delete(&ctx, &state).await.unwrap();
        resource.delete(&ctx, &state).await.unwrap();
    }

    #[tokio::test]
    async fn test_import() {
        let (mock, _clock, ctx) = mock_context();
        mock.add_hvn(create_test_hvn(TEST_PROJECT, "hvn-1"));
        let resource = VaultClusterResource::default();
        let created = resource.create(&ctx, planned()).await.unwrap();

        let imported = resource.import_state(&ctx, "vault-1").await.unwrap();

        assert_eq!(imported.cluster_id, created.cluster_id);
        assert_eq!(imported.tier, created.tier);
        assert_eq!(imported.hvn_id, "hvn-1");
        assert!(resource.import_state(&ctx, "proj-1:missing").await.unwrap_err().is_not_found());
    }
}
