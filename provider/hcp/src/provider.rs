//! Provider entry point: configuration and the registry of handlers.

use crate::config::{Credentials, ProviderConfig, ProviderContext};
use crate::data_sources::{HvnDataSource, OrganizationDataSource, ProjectDataSource};
use crate::error::ProviderError;
use crate::project::resolve_location;
use crate::resource::{DataSourceAdapter, DynDataSource, DynResource, ResourceAdapter};
use crate::resources::{
    DnsForwardingResource, DnsForwardingRuleResource, HvnResource, HvnRouteResource, PeeringConnectionResource,
    VaultClusterResource,
};
use crate::schema::Schema;
use hcp_client::HcpClient;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Every resource and data source, keyed by host type name
#[derive(Clone)]
pub struct Provider {
    ctx: ProviderContext,
    resources: BTreeMap<&'static str, Arc<dyn DynResource>>,
    data_sources: BTreeMap<&'static str, Arc<dyn DynDataSource>>,
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("ctx", &self.ctx)
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .field("data_sources", &self.data_sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Provider {
    pub fn new(ctx: ProviderContext) -> Self {
        let resources: Vec<Arc<dyn DynResource>> = vec![
            Arc::new(ResourceAdapter(HvnResource::default())),
            Arc::new(ResourceAdapter(PeeringConnectionResource::default())),
            Arc::new(ResourceAdapter(HvnRouteResource::default())),
            Arc::new(ResourceAdapter(VaultClusterResource::default())),
            Arc::new(ResourceAdapter(DnsForwardingResource::default())),
            Arc::new(ResourceAdapter(DnsForwardingRuleResource::default())),
        ];
        let data_sources: Vec<Arc<dyn DynDataSource>> = vec![
            Arc::new(DataSourceAdapter(HvnDataSource)),
            Arc::new(DataSourceAdapter(ProjectDataSource)),
            Arc::new(DataSourceAdapter(OrganizationDataSource)),
        ];

        Self {
            ctx,
            resources: resources.into_iter().map(|r| (r.type_name(), r)).collect(),
            data_sources: data_sources.into_iter().map(|d| (d.type_name(), d)).collect(),
        }
    }

    /// Build the API client from `config`, resolve the default project and
    /// register every handler.
    pub async fn configure(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = match &config.credentials {
            Credentials::Token(token) => {
                HcpClient::with_timeout(config.api_address.clone(), token.clone(), config.request_timeout)?
            }
            Credentials::ServicePrincipal {
                client_id,
                client_secret,
            } => {
                HcpClient::from_service_principal(
                    config.api_address.clone(),
                    &config.auth_url,
                    client_id,
                    client_secret,
                    config.request_timeout,
                )
                .await?
            }
        }
        .with_max_retries(config.max_retries);

        let location = resolve_location(
            &client,
            None,
            config.project_id.as_deref(),
            config.env_project_id.as_deref(),
        )
        .await?;
        info!(
            "Configured HCP provider for organization {} project {}",
            location.organization_id, location.project_id
        );

        Ok(Self::new(ProviderContext::new(Arc::new(client), location)))
    }

    pub fn context(&self) -> &ProviderContext {
        &self.ctx
    }

    pub fn resource(&self, type_name: &str) -> Option<Arc<dyn DynResource>> {
        self.resources.get(type_name).cloned()
    }

    pub fn data_source(&self, type_name: &str) -> Option<Arc<dyn DynDataSource>> {
        self.data_sources.get(type_name).cloned()
    }

    pub fn resource_types(&self) -> Vec<&'static str> {
        self.resources.keys().copied().collect()
    }

    pub fn data_source_types(&self) -> Vec<&'static str> {
        self.data_sources.keys().copied().collect()
    }

    /// Schemas of all resources, ordered by type name
    pub fn resource_schemas(&self) -> Vec<Schema> {
        self.resources.values().map(|r| r.schema()).collect()
    }

    pub fn data_source_schemas(&self) -> Vec<Schema> {
        self.data_sources.values().map(|d| d.schema()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_context;

    #[test]
    fn test_registers_every_type() {
        let (_mock, _clock, ctx) = mock_context();
        let provider = Provider::new(ctx);

        assert_eq!(
            provider.resource_types(),
            vec![
                "hcp_dns_forwarding",
                "hcp_dns_forwarding_rule",
                "hcp_hvn",
                "hcp_hvn_peering_connection",
                "hcp_hvn_route",
                "hcp_vault_cluster",
            ]
        );
        assert_eq!(provider.data_source_types(), vec!["hcp_hvn", "hcp_organization", "hcp_project"]);
        assert!(provider.resource("hcp_consul_cluster").is_none());
        assert_eq!(provider.resource_schemas().len(), 6);
    }

    #[test]
    fn test_datadog_key_is_sensitive() {
        let (_mock, _clock, ctx) = mock_context();
        let provider = Provider::new(ctx);

        let schema = provider.resource("hcp_vault_cluster").map(|r| r.schema());

        assert_eq!(
            schema.map(|s| s.sensitive_attributes()),
            Some(vec!["metrics_config"])
        );
    }
}
