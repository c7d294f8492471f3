//! Mock HcpClient for unit testing
//!
//! This module provides a mock implementation of HcpClientTrait that can be used
//! in unit tests without a reachable HCP API.
//!
//! The mock is organized into domain-specific modules:
//! - `resource_manager.rs` - Organizations and projects
//! - `network.rs` - HVNs, peerings, routes, DNS forwarding
//! - `vault.rs` - Vault clusters
//! - `helpers.rs` - Fixture builders and operation bookkeeping

mod helpers;
mod network;
mod resource_manager;
mod vault;

pub use helpers::{organization_fixture, project_fixture};

use crate::error::HcpError;
use crate::hcp_trait::HcpClientTrait;
use crate::models::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// How operations started by the mock progress when polled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationBehavior {
    /// Report `DONE` once polled this many times while running
    DoneAfter(u32),
    /// Report `DONE` with an error after this many running polls
    FailAfter(u32, String),
    /// Never reach `DONE`
    Never,
}

/// Bookkeeping for one operation started by the mock
#[derive(Debug, Clone)]
pub(crate) struct MockOperation {
    pub(crate) location: Location,
    pub(crate) behavior: OperationBehavior,
    pub(crate) polls: u32,
}

pub(crate) type ProjectKey = (String, String);
pub(crate) type HvnChildKey = (String, String, String);

/// Mock HcpClient for testing
///
/// This mock stores resources in memory and can be configured to return
/// specific responses for testing different scenarios.
#[derive(Clone)]
pub struct MockHcpClient {
    pub(crate) base_url: String,
    // In-memory storage for resources
    pub(crate) organizations: Arc<Mutex<Vec<Organization>>>,
    pub(crate) projects: Arc<Mutex<Vec<Project>>>,
    pub(crate) hvns: Arc<Mutex<HashMap<ProjectKey, Hvn>>>,
    pub(crate) peerings: Arc<Mutex<HashMap<HvnChildKey, Peering>>>,
    pub(crate) routes: Arc<Mutex<HashMap<HvnChildKey, Route>>>,
    pub(crate) dns_forwardings: Arc<Mutex<HashMap<HvnChildKey, DnsForwarding>>>,
    pub(crate) dns_forwarding_rules: Arc<Mutex<HashMap<(String, String, String, String), DnsForwardingRule>>>,
    pub(crate) vault_clusters: Arc<Mutex<HashMap<ProjectKey, VaultCluster>>>,
    pub(crate) operations: Arc<Mutex<HashMap<String, MockOperation>>>,
    pub(crate) operation_behavior: Arc<Mutex<OperationBehavior>>,
    pub(crate) peering_state: Arc<Mutex<PeeringState>>,
    // Names of mutating calls, in order
    pub(crate) calls: Arc<Mutex<Vec<String>>>,
    // Counter for generating IDs
    pub(crate) next_id: Arc<Mutex<u64>>,
}

impl MockHcpClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            organizations: Arc::new(Mutex::new(Vec::new())),
            projects: Arc::new(Mutex::new(Vec::new())),
            hvns: Arc::new(Mutex::new(HashMap::new())),
            peerings: Arc::new(Mutex::new(HashMap::new())),
            routes: Arc::new(Mutex::new(HashMap::new())),
            dns_forwardings: Arc::new(Mutex::new(HashMap::new())),
            dns_forwarding_rules: Arc::new(Mutex::new(HashMap::new())),
            vault_clusters: Arc::new(Mutex::new(HashMap::new())),
            operations: Arc::new(Mutex::new(HashMap::new())),
            operation_behavior: Arc::new(Mutex::new(OperationBehavior::DoneAfter(0))),
            peering_state: Arc::new(Mutex::new(PeeringState::Active)),
            calls: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    /// Add an organization to the mock store (for test setup)
    pub fn add_organization(&self, organization: Organization) {
        self.organizations.lock().unwrap().push(organization);
    }

    /// Add a project to the mock store (for test setup)
    pub fn add_project(&self, project: Project) {
        self.projects.lock().unwrap().push(project);
    }

    /// Add an HVN to the mock store (for test setup)
    pub fn add_hvn(&self, hvn: Hvn) {
        let key = (hvn.location.project_id.clone(), hvn.id.clone());
        self.hvns.lock().unwrap().insert(key, hvn);
    }

    /// Remove an HVN out-of-band (simulates deletion outside the provider)
    pub fn remove_hvn(&self, project_id: &str, hvn_id: &str) {
        self.hvns
            .lock()
            .unwrap()
            .remove(&(project_id.to_string(), hvn_id.to_string()));
    }

    /// Remove a Vault cluster out-of-band
    pub fn remove_vault_cluster(&self, project_id: &str, cluster_id: &str) {
        self.vault_clusters
            .lock()
            .unwrap()
            .remove(&(project_id.to_string(), cluster_id.to_string()));
    }

    /// Set how operations started from now on progress
    pub fn set_operation_behavior(&self, behavior: OperationBehavior) {
        *self.operation_behavior.lock().unwrap() = behavior;
    }

    /// Set the state newly created peerings report
    pub fn set_peering_state(&self, state: PeeringState) {
        *self.peering_state.lock().unwrap() = state;
    }

    /// Start a standalone operation (for poller tests)
    pub fn start_operation(&self, location: &Location) -> Operation {
        self.new_operation(location)
    }

    /// Names of the mutating calls made so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of times an operation has been polled
    pub fn operation_polls(&self, id: &str) -> u32 {
        self.operations
            .lock()
            .unwrap()
            .get(id)
            .map(|op| op.polls)
            .unwrap_or(0)
    }

    /// Generate next ID
    pub(crate) fn next_id(&self) -> u64 {
        let mut id = self.next_id.lock().unwrap();
        let current = *id;
        *id += 1;
        current
    }

    pub(crate) fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    /// Register a new operation using the current behavior
    pub(crate) fn new_operation(&self, location: &Location) -> Operation {
        let id = format!("op-{}", self.next_id());
        let behavior = self.operation_behavior.lock().unwrap().clone();
        self.operations.lock().unwrap().insert(
            id.clone(),
            MockOperation {
                location: location.clone(),
                behavior,
                polls: 0,
            },
        );
        Operation {
            id,
            state: OperationState::Pending,
            error: None,
            location: Some(location.clone()),
        }
    }
}

#[async_trait::async_trait]
impl HcpClientTrait for MockHcpClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn list_organizations(&self) -> Result<Vec<Organization>, HcpError> {
        resource_manager::list_organizations(self).await
    }

    async fn get_organization(&self, id: &str) -> Result<Organization, HcpError> {
        resource_manager::get_organization(self, id).await
    }

    async fn list_projects(&self, organization_id: &str) -> Result<Vec<Project>, HcpError> {
        resource_manager::list_projects(self, organization_id).await
    }

    async fn get_project(&self, id: &str) -> Result<Project, HcpError> {
        resource_manager::get_project(self, id).await
    }

    async fn get_operation(&self, location: &Location, id: &str) -> Result<Operation, HcpError> {
        helpers::poll_operation(self, location, id)
    }

    async fn create_hvn(&self, location: &Location, hvn: &HvnCreate) -> Result<HvnResponse, HcpError> {
        network::create_hvn(self, location, hvn).await
    }

    async fn get_hvn(&self, location: &Location, hvn_id: &str) -> Result<Hvn, HcpError> {
        network::get_hvn(self, location, hvn_id).await
    }

    async fn delete_hvn(&self, location: &Location, hvn_id: &str) -> Result<Operation, HcpError> {
        network::delete_hvn(self, location, hvn_id).await
    }

    async fn create_peering(&self, location: &Location, hvn_id: &str, peering: &PeeringCreate) -> Result<PeeringResponse, HcpError> {
        network::create_peering(self, location, hvn_id, peering).await
    }

    async fn get_peering(&self, location: &Location, hvn_id: &str, peering_id: &str) -> Result<Peering, HcpError> {
        network::get_peering(self, location, hvn_id, peering_id).await
    }

    async fn delete_peering(&self, location: &Location, hvn_id: &str, peering_id: &str) -> Result<Operation, HcpError> {
        network::delete_peering(self, location, hvn_id, peering_id).await
    }

    async fn create_route(&self, location: &Location, hvn_id: &str, route: &RouteCreate) -> Result<RouteResponse, HcpError> {
        network::create_route(self, location, hvn_id, route).await
    }

    async fn get_route(&self, location: &Location, hvn_id: &str, route_id: &str) -> Result<Route, HcpError> {
        network::get_route(self, location, hvn_id, route_id).await
    }

    async fn delete_route(&self, location: &Location, hvn_id: &str, route_id: &str) -> Result<Operation, HcpError> {
        network::delete_route(self, location, hvn_id, route_id).await
    }

    async fn create_dns_forwarding(&self, location: &Location, hvn_id: &str, forwarding: &DnsForwardingCreate) -> Result<DnsForwardingResponse, HcpError> {
        network::create_dns_forwarding(self, location, hvn_id, forwarding).await
    }

    async fn get_dns_forwarding(&self, location: &Location, hvn_id: &str, forwarding_id: &str) -> Result<DnsForwarding, HcpError> {
        network::get_dns_forwarding(self, location, hvn_id, forwarding_id).await
    }

    async fn delete_dns_forwarding(&self, location: &Location, hvn_id: &str, forwarding_id: &str) -> Result<Operation, HcpError> {
        network::delete_dns_forwarding(self, location, hvn_id, forwarding_id).await
    }

    async fn create_dns_forwarding_rule(&self, location: &Location, hvn_id: &str, forwarding_id: &str, rule: &DnsForwardingRuleCreate) -> Result<DnsForwardingRuleResponse, HcpError> {
        network::create_dns_forwarding_rule(self, location, hvn_id, forwarding_id, rule).await
    }

    async fn get_dns_forwarding_rule(&self, location: &Location, hvn_id: &str, forwarding_id: &str, rule_id: &str) -> Result<DnsForwardingRule, HcpError> {
        network::get_dns_forwarding_rule(self, location, hvn_id, forwarding_id, rule_id).await
    }

    async fn delete_dns_forwarding_rule(&self, location: &Location, hvn_id: &str, forwarding_id: &str, rule_id: &str) -> Result<Operation, HcpError> {
        network::delete_dns_forwarding_rule(self, location, hvn_id, forwarding_id, rule_id).await
    }

    async fn create_vault_cluster(&self, location: &Location, cluster: &VaultClusterCreate) -> Result<VaultClusterResponse, HcpError> {
        vault::create_vault_cluster(self, location, cluster).await
    }

    async fn get_vault_cluster(&self, location: &Location, cluster_id: &str) -> Result<VaultCluster, HcpError> {
        vault::get_vault_cluster(self, location, cluster_id).await
    }

    async fn update_vault_cluster_tier(&self, location: &Location, cluster_id: &str, tier: &str) -> Result<Operation, HcpError> {
        vault::update_tier(self, location, cluster_id, tier).await
    }

    async fn update_vault_cluster_public_endpoint(&self, location: &Location, cluster_id: &str, public_endpoint: bool) -> Result<Operation, HcpError> {
        vault::update_public_endpoint(self, location, cluster_id, public_endpoint).await
    }

    async fn update_vault_cluster_upgrade_config(&self, location: &Location, cluster_id: &str, config: &MajorVersionUpgradeConfig) -> Result<Operation, HcpError> {
        vault::update_upgrade_config(self, location, cluster_id, config).await
    }

    async fn update_vault_cluster_metrics(&self, location: &Location, cluster_id: &str, metrics: &MetricsConfig) -> Result<Operation, HcpError> {
        vault::update_metrics(self, location, cluster_id, metrics).await
    }

    async fn delete_vault_cluster(&self, location: &Location, cluster_id: &str) -> Result<Operation, HcpError> {
        vault::delete_vault_cluster(self, location, cluster_id).await
    }
}
