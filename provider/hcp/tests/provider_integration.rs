//! End-to-end tests through the provider registry
//!
//! Handlers are driven with host-shaped JSON against the in-memory mock, and
//! `Provider::configure` is exercised against a wiremock API.

use hcp_client::mock::{organization_fixture, project_fixture};
use hcp_client::{Location, MockHcpClient};
use hcp_provider::{Credentials, ManualClock, Provider, ProviderConfig, ProviderContext, ProviderError};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{bearer_token, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider() -> (MockHcpClient, Provider) {
    let mock = MockHcpClient::new("http://mock");
    let ctx = ProviderContext::new(Arc::new(mock.clone()), Location::new("org-1", "proj-1"))
        .with_clock(Arc::new(ManualClock::new()));
    (mock, Provider::new(ctx))
}

#[tokio::test]
async fn test_network_stack_through_json() -> anyhow::Result<()> {
    let (mock, provider) = provider();
    let ctx = provider.context();
    let hvn = provider.resource("hcp_hvn").ok_or_else(|| anyhow::anyhow!("hcp_hvn missing"))?;
    let route = provider
        .resource("hcp_hvn_route")
        .ok_or_else(|| anyhow::anyhow!("hcp_hvn_route missing"))?;

    let created = hvn
        .create(ctx, json!({ "hvn_id": "main-hvn", "cloud_provider": "aws", "region": "us-west-2" }))
        .await?;
    assert_eq!(created["self_link"], "/project/proj-1/hvn/main-hvn");
    assert_eq!(created["cidr_block"], "172.25.16.0/20");

    let route_state = route
        .create(
            ctx,
            json!({
                "hvn_link": created["self_link"],
                "hvn_route_id": "to-peer",
                "destination_cidr": "10.10.0.0/16",
                "target_link": "/project/proj-1/peering/peer-1",
            }),
        )
        .await?;
    assert_eq!(route_state["state"], "ACTIVE");

    let imported = hvn.import_state(ctx, "proj-1:main-hvn").await?;
    assert_eq!(imported, created);

    mock.remove_hvn("proj-1", "main-hvn");
    assert_eq!(hvn.read(ctx, created.clone()).await?, None);
    hvn.delete(ctx, created).await?;
    Ok(())
}

#[tokio::test]
async fn test_force_new_change_is_not_updated_in_place() -> anyhow::Result<()> {
    let (mock, provider) = provider();
    let ctx = provider.context();
    let hvn = provider.resource("hcp_hvn").ok_or_else(|| anyhow::anyhow!("hcp_hvn missing"))?;
    let prior = hvn
        .create(ctx, json!({ "hvn_id": "main-hvn", "cloud_provider": "aws", "region": "us-west-2" }))
        .await?;

    let mut planned = prior.clone();
    planned["region"] = json!("eu-west-1");
    assert_eq!(hvn.requires_replace(&prior, &planned), vec!["region"]);

    let err = hvn.update(ctx, prior, planned).await.unwrap_err();
    assert!(matches!(err, ProviderError::UpdateNotSupported { .. }));
    assert_eq!(mock.calls(), vec!["create_hvn"]);
    Ok(())
}

#[tokio::test]
async fn test_vault_cluster_update_through_json() -> anyhow::Result<()> {
    let (mock, provider) = provider();
    let ctx = provider.context();
    let hvn = provider.resource("hcp_hvn").ok_or_else(|| anyhow::anyhow!("hcp_hvn missing"))?;
    let vault = provider
        .resource("hcp_vault_cluster")
        .ok_or_else(|| anyhow::anyhow!("hcp_vault_cluster missing"))?;

    hvn.create(ctx, json!({ "hvn_id": "main-hvn", "cloud_provider": "aws", "region": "us-west-2" }))
        .await?;
    let prior = vault
        .create(ctx, json!({ "cluster_id": "vault-1", "hvn_id": "main-hvn", "tier": "standard_small" }))
        .await?;

    let mut planned = prior.clone();
    planned["public_endpoint"] = json!(true);
    assert!(vault.requires_replace(&prior, &planned).is_empty());

    let updated = vault
        .update(ctx, prior, planned)
        .await?
        .ok_or_else(|| anyhow::anyhow!("cluster vanished"))?;
    assert_eq!(updated["public_endpoint"], true);
    assert_eq!(
        updated["vault_public_endpoint_url"],
        "https://vault-1-public-vault.hashicorp.cloud:8200"
    );
    assert_eq!(mock.calls().last().map(String::as_str), Some("update_vault_cluster_public_endpoint"));
    Ok(())
}

#[tokio::test]
async fn test_malformed_state_is_a_wire_error() {
    let (_mock, provider) = provider();
    let hvn = provider.resource("hcp_hvn").expect("hcp_hvn registered");

    let err = hvn
        .create(provider.context(), json!({ "hvn_id": 42 }))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Wire { .. }));
}

#[tokio::test]
async fn test_data_sources_through_json() -> anyhow::Result<()> {
    let (mock, provider) = provider();
    let created = chrono::Utc::now();
    mock.add_organization(organization_fixture("org-1", created));
    mock.add_project(project_fixture("proj-1", "org-1", created));

    let project = provider
        .data_source("hcp_project")
        .ok_or_else(|| anyhow::anyhow!("hcp_project missing"))?
        .read(provider.context(), json!({}))
        .await?;
    assert_eq!(project["project_id"], "proj-1");

    let organization = provider
        .data_source("hcp_organization")
        .ok_or_else(|| anyhow::anyhow!("hcp_organization missing"))?
        .read(provider.context(), json!({}))
        .await?;
    assert_eq!(organization["organization_id"], "org-1");
    Ok(())
}

#[tokio::test]
async fn test_configure_resolves_single_project() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resource-manager/2019-12-10/organizations"))
        .and(bearer_token("test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organizations": [
                { "id": "org-1", "name": "Acme", "created_at": "2022-01-01T00:00:00Z" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resource-manager/2019-12-10/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "projects": [{
                "id": "proj-1",
                "name": "default",
                "parent": { "type": "ORGANIZATION", "id": "org-1" },
                "created_at": "2022-01-01T00:00:00Z"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = ProviderConfig::new(Credentials::Token("test-token".to_string())).with_api_address(server.uri());
    config.request_timeout = Duration::from_secs(5);
    let provider = Provider::configure(&config).await?;

    assert_eq!(provider.context().default_location(), &Location::new("org-1", "proj-1"));
    Ok(())
}

#[tokio::test]
async fn test_configure_with_unknown_project_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resource-manager/2019-12-10/projects/proj-404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "code": 5, "message": "project not found" })))
        .mount(&server)
        .await;

    let config = ProviderConfig::new(Credentials::Token("test-token".to_string()))
        .with_api_address(server.uri())
        .with_project_id("proj-404");

    let err = Provider::configure(&config).await.unwrap_err();

    assert!(matches!(err, ProviderError::InvalidConfig(_)), "got {:?}", err);
}
