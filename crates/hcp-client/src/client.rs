//! HCP API client
//!
//! Implements the HCP REST API client for the resource-manager, operation,
//! network and vault services.

use crate::common::{HttpClient, paths};
use crate::error::HcpError;
use crate::hcp_trait::HcpClientTrait;
use crate::models::*;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Audience requested for service-principal tokens
pub const TOKEN_AUDIENCE: &str = "https://api.hashicorp.cloud";

/// HCP API client
pub struct HcpClient {
    http: HttpClient,
}

impl HcpClient {
    /// Create a new HCP client from an already-issued bearer token
    ///
    /// # Arguments
    /// * `base_url` - HCP API base URL (e.g., "https://api.cloud.hashicorp.com")
    /// * `token` - Bearer token for authentication
    pub fn new(base_url: String, token: String) -> Result<Self, HcpError> {
        Self::with_timeout(base_url, token, Duration::from_secs(30))
    }

    /// Create a new HCP client with a per-request timeout
    pub fn with_timeout(base_url: String, token: String, timeout: Duration) -> Result<Self, HcpError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http: HttpClient::new(client, base_url, token),
        })
    }

    /// Create a client by exchanging service-principal credentials for a token
    ///
    /// Uses the OAuth2 client-credentials grant against `{auth_url}/oauth2/token`.
    pub async fn from_service_principal(
        base_url: String,
        auth_url: &str,
        client_id: &str,
        client_secret: &str,
        timeout: Duration,
    ) -> Result<Self, HcpError> {
        let client = Client::builder().timeout(timeout).build()?;
        let token_url = format!("{}/oauth2/token", auth_url.trim_end_matches('/'));
        debug!("Requesting service principal token from {}", token_url);

        let response = client
            .post(&token_url)
            .header("Accept", "application/json")
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("audience", TOKEN_AUDIENCE),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HcpError::Authentication(format!(
                "Failed to obtain token for client {}: {} - {}",
                client_id, status, body
            )));
        }

        let token: TokenResponse = response.json().await?;
        info!("Obtained HCP access token for client {}", client_id);

        Ok(Self {
            http: HttpClient::new(client, base_url, token.access_token),
        })
    }

    /// Override the number of retries for transient failures
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.http = self.http.with_max_retries(max_retries);
        self
    }

    /// Override the delays between transient-failure retries
    pub fn with_retry_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.http = self.http.with_retry_backoff(initial, max);
        self
    }
}

#[async_trait::async_trait]
impl HcpClientTrait for HcpClient {
    fn base_url(&self) -> &str {
        self.http.base_url()
    }

    async fn list_organizations(&self) -> Result<Vec<Organization>, HcpError> {
        debug!("Listing organizations");
        self.http
            .fetch_all_pages::<ListOrganizationsResponse>(&paths::organizations())
            .await
    }

    async fn get_organization(&self, id: &str) -> Result<Organization, HcpError> {
        let response: GetOrganizationResponse = self.http.get(&paths::organization(id)).await?;
        Ok(response.organization)
    }

    async fn list_projects(&self, organization_id: &str) -> Result<Vec<Project>, HcpError> {
        debug!("Listing projects in organization {}", organization_id);
        self.http
            .fetch_all_pages::<ListProjectsResponse>(&paths::projects(organization_id))
            .await
    }

    async fn get_project(&self, id: &str) -> Result<Project, HcpError> {
        let response: GetProjectResponse = self.http.get(&paths::project(id)).await?;
        Ok(response.project)
    }

    async fn get_operation(&self, location: &Location, id: &str) -> Result<Operation, HcpError> {
        let response: GetOperationResponse = self.http.get(&paths::operation(location, id)).await?;
        Ok(response.operation)
    }

    // Network: HVNs

    async fn create_hvn(&self, location: &Location, hvn: &HvnCreate) -> Result<HvnResponse, HcpError> {
        debug!("Creating HVN {} in project {}", hvn.id, location.project_id);
        let body = serde_json::json!({ "network": serde_json::to_value(hvn)? });
        self.http.post(&paths::networks(location), &body).await
    }

    async fn get_hvn(&self, location: &Location, hvn_id: &str) -> Result<Hvn, HcpError> {
        let response: GetHvnResponse = self.http.get(&paths::network(location, hvn_id)).await?;
        Ok(response.network)
    }

    async fn delete_hvn(&self, location: &Location, hvn_id: &str) -> Result<Operation, HcpError> {
        let response: DeleteResponse = self.http.delete(&paths::network(location, hvn_id)).await?;
        Ok(response.operation)
    }

    // Network: peerings

    async fn create_peering(&self, location: &Location, hvn_id: &str, peering: &PeeringCreate) -> Result<PeeringResponse, HcpError> {
        debug!("Creating peering from HVN {} to HVN {}", hvn_id, peering.target.hvn.id);
        let body = serde_json::json!({ "peering": serde_json::to_value(peering)? });
        self.http.post(&paths::peerings(location, hvn_id), &body).await
    }

    async fn get_peering(&self, location: &Location, hvn_id: &str, peering_id: &str) -> Result<Peering, HcpError> {
        let response: GetPeeringResponse = self.http.get(&paths::peering(location, hvn_id, peering_id)).await?;
        Ok(response.peering)
    }

    async fn delete_peering(&self, location: &Location, hvn_id: &str, peering_id: &str) -> Result<Operation, HcpError> {
        let response: DeleteResponse = self.http.delete(&paths::peering(location, hvn_id, peering_id)).await?;
        Ok(response.operation)
    }

    // Network: routes

    async fn create_route(&self, location: &Location, hvn_id: &str, route: &RouteCreate) -> Result<RouteResponse, HcpError> {
        debug!("Creating route {} on HVN {}", route.id, hvn_id);
        let body = serde_json::json!({ "route": serde_json::to_value(route)? });
        self.http.post(&paths::routes(location, hvn_id), &body).await
    }

    async fn get_route(&self, location: &Location, hvn_id: &str, route_id: &str) -> Result<Route, HcpError> {
        let response: GetRouteResponse = self.http.get(&paths::route(location, hvn_id, route_id)).await?;
        Ok(response.route)
    }

    async fn delete_route(&self, location: &Location, hvn_id: &str, route_id: &str) -> Result<Operation, HcpError> {
        let response: DeleteResponse = self.http.delete(&paths::route(location, hvn_id, route_id)).await?;
        Ok(response.operation)
    }

    // Network: DNS forwarding

    async fn create_dns_forwarding(&self, location: &Location, hvn_id: &str, forwarding: &DnsForwardingCreate) -> Result<DnsForwardingResponse, HcpError> {
        debug!("Creating DNS forwarding {} on HVN {}", forwarding.id, hvn_id);
        let body = serde_json::json!({ "dns_forwarding": serde_json::to_value(forwarding)? });
        self.http.post(&paths::dns_forwardings(location, hvn_id), &body).await
    }

    async fn get_dns_forwarding(&self, location: &Location, hvn_id: &str, forwarding_id: &str) -> Result<DnsForwarding, HcpError> {
        let response: GetDnsForwardingResponse = self.http.get(&paths::dns_forwarding(location, hvn_id, forwarding_id)).await?;
        Ok(response.dns_forwarding)
    }

    async fn delete_dns_forwarding(&self, location: &Location, hvn_id: &str, forwarding_id: &str) -> Result<Operation, HcpError> {
        let response: DeleteResponse = self.http.delete(&paths::dns_forwarding(location, hvn_id, forwarding_id)).await?;
        Ok(response.operation)
    }

    async fn create_dns_forwarding_rule(&self, location: &Location, hvn_id: &str, forwarding_id: &str, rule: &DnsForwardingRuleCreate) -> Result<DnsForwardingRuleResponse, HcpError> {
        debug!("Creating DNS forwarding rule {} on {}/{}", rule.id, hvn_id, forwarding_id);
        let body = serde_json::json!({ "rule": serde_json::to_value(rule)? });
        self.http.post(&paths::dns_forwarding_rules(location, hvn_id, forwarding_id), &body).await
    }

    async fn get_dns_forwarding_rule(&self, location: &Location, hvn_id: &str, forwarding_id: &str, rule_id: &str) -> Result<DnsForwardingRule, HcpError> {
        let response: GetDnsForwardingRuleResponse = self.http.get(&paths::dns_forwarding_rule(location, hvn_id, forwarding_id, rule_id)).await?;
        Ok(response.rule)
    }

    async fn delete_dns_forwarding_rule(&self, location: &Location, hvn_id: &str, forwarding_id: &str, rule_id: &str) -> Result<Operation, HcpError> {
        let response: DeleteResponse = self.http.delete(&paths::dns_forwarding_rule(location, hvn_id, forwarding_id, rule_id)).await?;
        Ok(response.operation)
    }

    // Vault clusters

    async fn create_vault_cluster(&self, location: &Location, cluster: &VaultClusterCreate) -> Result<VaultClusterResponse, HcpError> {
        debug!("Creating Vault cluster {} in project {}", cluster.id, location.project_id);
        let body = serde_json::json!({ "cluster": serde_json::to_value(cluster)? });
        self.http.post(&paths::vault_clusters(location), &body).await
    }

    async fn get_vault_cluster(&self, location: &Location, cluster_id: &str) -> Result<VaultCluster, HcpError> {
        let response: GetVaultClusterResponse = self.http.get(&paths::vault_cluster(location, cluster_id)).await?;
        Ok(response.cluster)
    }

    async fn update_vault_cluster_tier(&self, location: &Location, cluster_id: &str, tier: &str) -> Result<Operation, HcpError> {
        let body = serde_json::json!({ "tier": tier });
        let path = format!("{}/tier", paths::vault_cluster(location, cluster_id));
        let response: OperationResponse = self.http.post(&path, &body).await?;
        Ok(response.operation)
    }

    async fn update_vault_cluster_public_endpoint(&self, location: &Location, cluster_id: &str, public_endpoint: bool) -> Result<Operation, HcpError> {
        let body = serde_json::json!({
            "cluster": { "config": { "network_config": { "public_endpoint": public_endpoint } } },
            "update_mask": "config.network_config.public_endpoint",
        });
        let response: OperationResponse = self.http.patch(&paths::vault_cluster(location, cluster_id), &body).await?;
        Ok(response.operation)
    }

    async fn update_vault_cluster_upgrade_config(&self, location: &Location, cluster_id: &str, config: &MajorVersionUpgradeConfig) -> Result<Operation, HcpError> {
        let body = serde_json::to_value(config)?;
        let path = format!("{}/major-version-upgrade-config", paths::vault_cluster(location, cluster_id));
        let response: OperationResponse = self.http.post(&path, &body).await?;
        Ok(response.operation)
    }

    async fn update_vault_cluster_metrics(&self, location: &Location, cluster_id: &str, metrics: &MetricsConfig) -> Result<Operation, HcpError> {
        let body = serde_json::json!({ "metrics_config": serde_json::to_value(metrics)? });
        let path = format!("{}/metrics", paths::vault_cluster(location, cluster_id));
        let response: OperationResponse = self.http.post(&path, &body).await?;
        Ok(response.operation)
    }

    async fn delete_vault_cluster(&self, location: &Location, cluster_id: &str) -> Result<Operation, HcpError> {
        let response: DeleteResponse = self.http.delete(&paths::vault_cluster(location, cluster_id)).await?;
        Ok(response.operation)
    }
}
