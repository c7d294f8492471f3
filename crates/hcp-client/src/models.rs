//! HCP API models
//!
//! These models match the JSON shapes of the HCP resource-manager, operation,
//! network and vault services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resource type names used in links and link URLs
pub mod resource_types {
    pub const HVN: &str = "hvn";
    pub const PEERING: &str = "peering";
    pub const TGW_ATTACHMENT: &str = "tgw-attachment";
    pub const ROUTE: &str = "route";
    pub const VAULT_CLUSTER: &str = "vault-cluster";
    pub const DNS_FORWARDING: &str = "dns-forwarding";
    pub const DNS_FORWARDING_RULE: &str = "dns-forwarding-rule";
}

/// Cloud provider and region a resource is placed in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Region {
    pub provider: String,
    pub region: String,
}

/// Scope in which resources live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Location {
    pub organization_id: String,
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
}

impl Location {
    pub fn new(organization_id: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            project_id: project_id.into(),
            region: None,
        }
    }

    pub fn with_region(mut self, provider: impl Into<String>, region: impl Into<String>) -> Self {
        self.region = Some(Region {
            provider: provider.into(),
            region: region.into(),
        });
        self
    }
}

/// Structured reference to a specific remote resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Link {
    pub location: Location,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Link {
    pub fn new(location: Location, resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            location,
            resource_type: resource_type.into(),
            id: id.into(),
            uuid: None,
            description: None,
        }
    }
}

// Resource manager

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProjectParent {
    #[serde(rename = "type")]
    pub parent_type: String,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub parent: ProjectParent,
    pub created_at: DateTime<Utc>,
}

/// Cursor returned by list endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Pagination {
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOrganizationsResponse {
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProjectsResponse {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetOrganizationResponse {
    pub organization: Organization,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetProjectResponse {
    pub project: Project,
}

// Operations

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationState {
    Pending,
    Running,
    Done,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OperationError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// Long-running operation handle and status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Operation {
    pub id: String,
    pub state: OperationState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetOperationResponse {
    pub operation: Operation,
}

/// Response body of every asynchronous delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub operation: Operation,
}

/// Response body of asynchronous updates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResponse {
    pub operation: Operation,
}

// Network: HVNs

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Hvn {
    pub id: String,
    pub location: Location,
    pub cidr_block: String,
    #[serde(default)]
    pub provider_account_id: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HvnCreate {
    pub id: String,
    pub location: Location,
    pub cidr_block: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HvnResponse {
    pub network: Hvn,
    #[serde(default)]
    pub operation: Option<Operation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetHvnResponse {
    pub network: Hvn,
}

// Network: peerings

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeeringState {
    Creating,
    PendingAcceptance,
    Accepted,
    Active,
    Failed,
    Rejected,
    Expired,
    Deleting,
    #[serde(other)]
    Unknown,
}

impl PeeringState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeeringState::Creating => "CREATING",
            PeeringState::PendingAcceptance => "PENDING_ACCEPTANCE",
            PeeringState::Accepted => "ACCEPTED",
            PeeringState::Active => "ACTIVE",
            PeeringState::Failed => "FAILED",
            PeeringState::Rejected => "REJECTED",
            PeeringState::Expired => "EXPIRED",
            PeeringState::Deleting => "DELETING",
            PeeringState::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PeeringTarget {
    pub hvn: Link,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Peering {
    pub id: String,
    pub hvn: Link,
    pub target: PeeringTarget,
    pub state: PeeringState,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PeeringCreate {
    pub hvn: Link,
    pub target: PeeringTarget,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeeringResponse {
    pub peering: Peering,
    #[serde(default)]
    pub operation: Option<Operation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPeeringResponse {
    pub peering: Peering,
}

// Network: routes

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RouteTarget {
    pub hvn_connection: Link,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Route {
    pub id: String,
    pub hvn: Link,
    pub destination: String,
    pub target: RouteTarget,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RouteCreate {
    pub id: String,
    pub destination: String,
    pub target: RouteTarget,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    pub route: Route,
    #[serde(default)]
    pub operation: Option<Operation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRouteResponse {
    pub route: Route,
}

// Network: DNS forwarding

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DnsForwardingRule {
    pub id: String,
    pub domain_name: String,
    #[serde(default)]
    pub inbound_endpoint_ips: Vec<String>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DnsForwarding {
    pub id: String,
    pub hvn: Link,
    pub peering_id: String,
    pub connection_type: String,
    #[serde(default)]
    pub rules: Vec<DnsForwardingRule>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DnsForwardingRuleCreate {
    pub id: String,
    pub domain_name: String,
    pub inbound_endpoint_ips: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DnsForwardingCreate {
    pub id: String,
    pub peering_id: String,
    pub connection_type: String,
    pub rule: DnsForwardingRuleCreate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsForwardingResponse {
    pub dns_forwarding: DnsForwarding,
    #[serde(default)]
    pub operation: Option<Operation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDnsForwardingResponse {
    pub dns_forwarding: DnsForwarding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsForwardingRuleResponse {
    pub rule: DnsForwardingRule,
    #[serde(default)]
    pub operation: Option<Operation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDnsForwardingRuleResponse {
    pub rule: DnsForwardingRule,
}

// Vault clusters

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterState {
    Creating,
    Running,
    Updating,
    Restoring,
    Deleting,
    Failed,
    #[serde(other)]
    Unknown,
}

impl ClusterState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterState::Creating => "CREATING",
            ClusterState::Running => "RUNNING",
            ClusterState::Updating => "UPDATING",
            ClusterState::Restoring => "RESTORING",
            ClusterState::Deleting => "DELETING",
            ClusterState::Failed => "FAILED",
            ClusterState::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MaintenanceWindow {
    pub day_of_week: String,
    pub time_window: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MajorVersionUpgradeConfig {
    pub upgrade_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_window: Option<MaintenanceWindow>,
}

/// Datadog metrics streaming.
///
/// The API omits `api_key` on reads; it is only ever sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatadogConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MetricsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datadog: Option<DatadogConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VaultNetworkConfig {
    pub network: Link,
    #[serde(default)]
    pub public_endpoint: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VaultClusterConfig {
    pub tier: String,
    pub network_config: VaultNetworkConfig,
    #[serde(default)]
    pub initial_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_version_upgrade_config: Option<MajorVersionUpgradeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics_config: Option<MetricsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClusterDnsNames {
    #[serde(default)]
    pub public: String,
    #[serde(default)]
    pub private: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VaultCluster {
    pub id: String,
    pub location: Location,
    pub config: VaultClusterConfig,
    #[serde(default)]
    pub current_version: String,
    pub state: ClusterState,
    #[serde(default)]
    pub dns_names: ClusterDnsNames,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VaultClusterCreate {
    pub id: String,
    pub location: Location,
    pub config: VaultClusterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultClusterResponse {
    pub cluster: VaultCluster,
    #[serde(default)]
    pub operation: Option<Operation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetVaultClusterResponse {
    pub cluster: VaultCluster,
}

// Auth

/// OAuth2 client-credentials token response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}
