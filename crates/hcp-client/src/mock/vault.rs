//! Vault cluster operations for MockHcpClient

use super::MockHcpClient;
use super::helpers::{already_exists, not_found};
use crate::error::HcpError;
use crate::models::*;

const DEFAULT_VAULT_VERSION: &str = "1.15.4";

fn cluster_key(location: &Location, cluster_id: &str) -> (String, String) {
    (location.project_id.clone(), cluster_id.to_string())
}

fn dns_names(cluster_id: &str, public_endpoint: bool) -> ClusterDnsNames {
    ClusterDnsNames {
        public: if public_endpoint {
            format!("{}-public-vault.hashicorp.cloud", cluster_id)
        } else {
            String::new()
        },
        private: format!("{}-private-vault.hashicorp.cloud", cluster_id),
    }
}

/// Apply a change to a stored cluster and start an operation for it
fn modify_cluster<F>(client: &MockHcpClient, location: &Location, cluster_id: &str, call: &str, change: F) -> Result<Operation, HcpError>
where
    F: FnOnce(&mut VaultCluster),
{
    client.record(call);
    {
        let mut clusters = client.vault_clusters.lock().unwrap();
        let cluster = clusters
            .get_mut(&cluster_key(location, cluster_id))
            .ok_or_else(|| not_found("Vault cluster", cluster_id))?;
        change(cluster);
    }
    Ok(client.new_operation(location))
}

pub async fn create_vault_cluster(client: &MockHcpClient, location: &Location, request: &VaultClusterCreate) -> Result<VaultClusterResponse, HcpError> {
    client.record("create_vault_cluster");
    let network = &request.config.network_config.network;
    let hvn = client.hvns
        .lock()
        .unwrap()
        .get(&(network.location.project_id.clone(), network.id.clone()))
        .cloned()
        .ok_or_else(|| not_found("HVN", &network.id))?;

    let key = cluster_key(location, &request.id);
    if client.vault_clusters.lock().unwrap().contains_key(&key) {
        return Err(already_exists("Vault cluster", &request.id));
    }

    let mut config = request.config.clone();
    // Secrets are write-only
    if let Some(datadog) = config.metrics_config.as_mut().and_then(|m| m.datadog.as_mut()) {
        datadog.api_key = None;
    }

    let cluster = VaultCluster {
        id: request.id.clone(),
        location: hvn.location.clone(),
        current_version: if config.initial_version.is_empty() {
            DEFAULT_VAULT_VERSION.to_string()
        } else {
            config.initial_version.clone()
        },
        dns_names: dns_names(&request.id, config.network_config.public_endpoint),
        config,
        state: ClusterState::Running,
        created_at: Some(chrono::Utc::now()),
    };
    client.vault_clusters.lock().unwrap().insert(key, cluster.clone());

    Ok(VaultClusterResponse {
        cluster,
        operation: Some(client.new_operation(location)),
    })
}

pub async fn get_vault_cluster(client: &MockHcpClient, location: &Location, cluster_id: &str) -> Result<VaultCluster, HcpError> {
    client.vault_clusters
        .lock()
        .unwrap()
        .get(&cluster_key(location, cluster_id))
        .cloned()
        .ok_or_else(|| not_found("Vault cluster", cluster_id))
}

pub async fn update_tier(client: &MockHcpClient, location: &Location, cluster_id: &str, tier: &str) -> Result<Operation, HcpError> {
    modify_cluster(client, location, cluster_id, "update_vault_cluster_tier", |cluster| {
        cluster.config.tier = tier.to_string();
    })
}

pub async fn update_public_endpoint(client: &MockHcpClient, location: &Location, cluster_id: &str, public_endpoint: bool) -> Result<Operation, HcpError> {
    modify_cluster(client, location, cluster_id, "update_vault_cluster_public_endpoint", |cluster| {
        cluster.config.network_config.public_endpoint = public_endpoint;
        cluster.dns_names = dns_names(&cluster.id, public_endpoint);
    })
}

pub async fn update_upgrade_config(client: &MockHcpClient, location: &Location, cluster_id: &str, config: &MajorVersionUpgradeConfig) -> Result<Operation, HcpError> {
    modify_cluster(client, location, cluster_id, "update_vault_cluster_upgrade_config", |cluster| {
        cluster.config.major_version_upgrade_config = Some(config.clone());
    })
}

pub async fn update_metrics(client: &MockHcpClient, location: &Location, cluster_id: &str, metrics: &MetricsConfig) -> Result<Operation, HcpError> {
    modify_cluster(client, location, cluster_id, "update_vault_cluster_metrics", |cluster| {
        let mut stored = metrics.clone();
        if let Some(datadog) = stored.datadog.as_mut() {
            datadog.api_key = None;
        }
        cluster.config.metrics_config = if stored.datadog.is_some() { Some(stored) } else { None };
    })
}

pub async fn delete_vault_cluster(client: &MockHcpClient, location: &Location, cluster_id: &str) -> Result<Operation, HcpError> {
    client.record("delete_vault_cluster");
    client.vault_clusters
        .lock()
        .unwrap()
        .remove(&cluster_key(location, cluster_id))
        .ok_or_else(|| not_found("Vault cluster", cluster_id))?;
    Ok(client.new_operation(location))
}
