//! HcpClient trait for mocking
//!
//! This trait abstracts the HcpClient to enable mocking in unit tests.
//! The concrete HcpClient implements this trait, and tests can use mock implementations.

use crate::error::HcpError;
use crate::models::*;

/// Trait for HCP API client operations
///
/// Every mutating call that is asynchronous on the remote side returns the
/// `Operation` tracking it. All async methods must be `Send` to work with
/// Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait HcpClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    // Resource manager
    async fn list_organizations(&self) -> Result<Vec<Organization>, HcpError>;
    async fn get_organization(&self, id: &str) -> Result<Organization, HcpError>;
    async fn list_projects(&self, organization_id: &str) -> Result<Vec<Project>, HcpError>;
    async fn get_project(&self, id: &str) -> Result<Project, HcpError>;

    // Operations
    async fn get_operation(&self, location: &Location, id: &str) -> Result<Operation, HcpError>;

    // Network: HVNs
    async fn create_hvn(&self, location: &Location, hvn: &HvnCreate) -> Result<HvnResponse, HcpError>;
    async fn get_hvn(&self, location: &Location, hvn_id: &str) -> Result<Hvn, HcpError>;
    async fn delete_hvn(&self, location: &Location, hvn_id: &str) -> Result<Operation, HcpError>;

    // Network: peerings
    async fn create_peering(&self, location: &Location, hvn_id: &str, peering: &PeeringCreate) -> Result<PeeringResponse, HcpError>;
    async fn get_peering(&self, location: &Location, hvn_id: &str, peering_id: &str) -> Result<Peering, HcpError>;
    async fn delete_peering(&self, location: &Location, hvn_id: &str, peering_id: &str) -> Result<Operation, HcpError>;

    // Network: routes
    async fn create_route(&self, location: &Location, hvn_id: &str, route: &RouteCreate) -> Result<RouteResponse, HcpError>;
    async fn get_route(&self, location: &Location, hvn_id: &str, route_id: &str) -> Result<Route, HcpError>;
    async fn delete_route(&self, location: &Location, hvn_id: &str, route_id: &str) -> Result<Operation, HcpError>;

    // Network: DNS forwarding
    async fn create_dns_forwarding(&self, location: &Location, hvn_id: &str, forwarding: &DnsForwardingCreate) -> Result<DnsForwardingResponse, HcpError>;
    async fn get_dns_forwarding(&self, location: &Location, hvn_id: &str, forwarding_id: &str) -> Result<DnsForwarding, HcpError>;
    async fn delete_dns_forwarding(&self, location: &Location, hvn_id: &str, forwarding_id: &str) -> Result<Operation, HcpError>;
    async fn create_dns_forwarding_rule(&self, location: &Location, hvn_id: &str, forwarding_id: &str, rule: &DnsForwardingRuleCreate) -> Result<DnsForwardingRuleResponse, HcpError>;
    async fn get_dns_forwarding_rule(&self, location: &Location, hvn_id: &str, forwarding_id: &str, rule_id: &str) -> Result<DnsForwardingRule, HcpError>;
    async fn delete_dns_forwarding_rule(&self, location: &Location, hvn_id: &str, forwarding_id: &str, rule_id: &str) -> Result<Operation, HcpError>;

    // Vault clusters
    async fn create_vault_cluster(&self, location: &Location, cluster: &VaultClusterCreate) -> Result<VaultClusterResponse, HcpError>;
    async fn get_vault_cluster(&self, location: &Location, cluster_id: &str) -> Result<VaultCluster, HcpError>;
    async fn update_vault_cluster_tier(&self, location: &Location, cluster_id: &str, tier: &str) -> Result<Operation, HcpError>;
    async fn update_vault_cluster_public_endpoint(&self, location: &Location, cluster_id: &str, public_endpoint: bool) -> Result<Operation, HcpError>;
    async fn update_vault_cluster_upgrade_config(&self, location: &Location, cluster_id: &str, config: &MajorVersionUpgradeConfig) -> Result<Operation, HcpError>;
    async fn update_vault_cluster_metrics(&self, location: &Location, cluster_id: &str, metrics: &MetricsConfig) -> Result<Operation, HcpError>;
    async fn delete_vault_cluster(&self, location: &Location, cluster_id: &str) -> Result<Operation, HcpError>;
}
