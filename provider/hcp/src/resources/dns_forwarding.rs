//! `hcp_dns_forwarding`: forwards DNS queries from an HVN over a peering or
//! transit gateway attachment. Created together with its first rule.

use crate::config::ProviderContext;
use crate::error::ProviderError;
use crate::import::ImportIdFormat;
use crate::link::self_link;
use crate::resource::Resource;
use crate::resource_helpers::{
    Timeouts, delete_or_absent, format_time, project_override, read_or_absent, wait_for_optional_operation,
};
use crate::schema::{Attribute, Schema};
use crate::validation::{required, validate_one_of, validate_slug_id};
use hcp_client::{DnsForwarding, DnsForwardingCreate, DnsForwardingRule, DnsForwardingRuleCreate, Location, resource_types};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use tracing::info;

pub const TYPE_NAME: &str = "hcp_dns_forwarding";
pub const CONNECTION_TYPES: [&str; 2] = ["hvn-peering", "tgw-attachment"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwardingRuleState {
    pub rule_id: String,
    pub domain_name: String,
    pub inbound_endpoint_ips: Vec<String>,
}

impl ForwardingRuleState {
    pub(crate) fn from_model(rule: &DnsForwardingRule) -> Self {
        Self {
            rule_id: rule.id.clone(),
            domain_name: rule.domain_name.clone(),
            inbound_endpoint_ips: rule.inbound_endpoint_ips.clone(),
        }
    }

    /// Validate into the create request shape
    pub(crate) fn to_request(&self, id_field: &str) -> Result<DnsForwardingRuleCreate, ProviderError> {
        validate_slug_id(id_field, &self.rule_id)?;
        required("domain_name", &self.domain_name)?;
        validate_endpoint_ips(&self.inbound_endpoint_ips)?;
        Ok(DnsForwardingRuleCreate {
            id: self.rule_id.clone(),
            domain_name: self.domain_name.clone(),
            inbound_endpoint_ips: self.inbound_endpoint_ips.clone(),
        })
    }
}

/// At least one address, each a plain IPv4 address
fn validate_endpoint_ips(ips: &[String]) -> Result<(), ProviderError> {
    if ips.is_empty() {
        return Err(ProviderError::validation("inbound_endpoint_ips", "at least one address is required"));
    }
    for ip in ips {
        ip.parse::<Ipv4Addr>()
            .map_err(|_| ProviderError::validation("inbound_endpoint_ips", format!("{:?} is not a valid IPv4 address", ip)))?;
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsForwardingState {
    pub hvn_id: String,
    pub dns_forwarding_id: String,
    pub peering_id: String,
    pub connection_type: String,
    pub forwarding_rule: ForwardingRuleState,
    pub project_id: String,
    pub state: String,
    pub created_at: String,
    pub self_link: String,
}

impl DnsForwardingState {
    /// `rule_id` selects which remote rule backs `forwarding_rule`; the first
    /// rule is used when it is not among them.
    fn from_model(forwarding: &DnsForwarding, rule_id: &str) -> Self {
        let forwarding_rule = forwarding
            .rules
            .iter()
            .find(|r| r.id == rule_id)
            .or_else(|| forwarding.rules.first())
            .map(ForwardingRuleState::from_model)
            .unwrap_or_default();

        Self {
            hvn_id: forwarding.hvn.id.clone(),
            dns_forwarding_id: forwarding.id.clone(),
            peering_id: forwarding.peering_id.clone(),
            connection_type: forwarding.connection_type.clone(),
            forwarding_rule,
            project_id: forwarding.hvn.location.project_id.clone(),
            state: forwarding.state.clone(),
            created_at: format_time(forwarding.created_at),
            self_link: self_link(&forwarding.hvn.location, resource_types::DNS_FORWARDING, &forwarding.id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DnsForwardingResource {
    pub timeouts: Timeouts,
}

impl DnsForwardingResource {
    async fn fetch(
        ctx: &ProviderContext,
        location: &Location,
        hvn_id: &str,
        forwarding_id: &str,
        rule_id: &str,
    ) -> Result<Option<DnsForwardingState>, ProviderError> {
        let forwarding = read_or_absent(
            "DNS forwarding",
            forwarding_id,
            ctx.client().get_dns_forwarding(location, hvn_id, forwarding_id),
        )
        .await?;
        Ok(forwarding.as_ref().map(|f| DnsForwardingState::from_model(f, rule_id)))
    }
}

#[async_trait::async_trait]
impl Resource for DnsForwardingResource {
    type State = DnsForwardingState;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new(
            TYPE_NAME,
            vec![
                Attribute::required("hvn_id", "The ID of the HashiCorp Virtual Network (HVN).").force_new(),
                Attribute::required("dns_forwarding_id", "The ID of the DNS forwarding.").force_new(),
                Attribute::required("peering_id", "The ID of the peering connection or transit gateway attachment.").force_new(),
                Attribute::required("connection_type", "The connection type: 'hvn-peering' or 'tgw-attachment'.").force_new(),
                Attribute::required("forwarding_rule", "The first forwarding rule of the DNS forwarding.").force_new(),
                Attribute::optional_computed("project_id", "The ID of the HCP project where the DNS forwarding is located.").force_new(),
                Attribute::computed("state", "The state of the DNS forwarding."),
                Attribute::computed("created_at", "The time that the DNS forwarding was created."),
                Attribute::computed("self_link", "A unique URL identifying the DNS forwarding."),
            ],
        )
    }

    fn import_format(&self) -> ImportIdFormat {
        ImportIdFormat::new(&["hvn_id", "dns_forwarding_id"])
    }

    async fn create(&self, ctx: &ProviderContext, planned: DnsForwardingState) -> Result<DnsForwardingState, ProviderError> {
        validate_slug_id("hvn_id", &planned.hvn_id)?;
        validate_slug_id("dns_forwarding_id", &planned.dns_forwarding_id)?;
        required("peering_id", &planned.peering_id)?;
        let connection_type = validate_one_of("connection_type", &planned.connection_type, &CONNECTION_TYPES, true)?;
        let rule = planned.forwarding_rule.to_request("forwarding_rule.rule_id")?;

        let location = ctx.location(project_override(&planned.project_id));
        let response = ctx
            .client()
            .create_dns_forwarding(
                &location,
                &planned.hvn_id,
                &DnsForwardingCreate {
                    id: planned.dns_forwarding_id.clone(),
                    peering_id: planned.peering_id.clone(),
                    connection_type,
                    rule,
                },
            )
            .await?;
        info!("Created DNS forwarding {} on HVN {}", planned.dns_forwarding_id, planned.hvn_id);

        wait_for_optional_operation(
            ctx,
            &location,
            &format!("DNS forwarding {} creation", planned.dns_forwarding_id),
            response.operation.as_ref(),
            self.timeouts.create,
        )
        .await?;

        Self::fetch(ctx, &location, &planned.hvn_id, &planned.dns_forwarding_id, &planned.forwarding_rule.rule_id)
            .await?
            .ok_or_else(|| ProviderError::NotFound(format!("DNS forwarding {} disappeared after creation", planned.dns_forwarding_id)))
    }

    async fn read(&self, ctx: &ProviderContext, current: &DnsForwardingState) -> Result<Option<DnsForwardingState>, ProviderError> {
        let location = ctx.location(project_override(&current.project_id));
        Self::fetch(
            ctx,
            &location,
            &current.hvn_id,
            &current.dns_forwarding_id,
            &current.forwarding_rule.rule_id,
        )
        .await
    }

    async fn delete(&self, ctx: &ProviderContext, current: &DnsForwardingState) -> Result<(), ProviderError> {
        let location = ctx.location(project_override(&current.project_id));
        delete_or_absent(
            ctx,
            &location,
            "DNS forwarding",
            &current.dns_forwarding_id,
            self.timeouts.delete,
            ctx.client().delete_dns_forwarding(&location, &current.hvn_id, &current.dns_forwarding_id),
        )
        .await
    }

    async fn import_state(&self, ctx: &ProviderContext, id: &str) -> Result<DnsForwardingState, ProviderError> {
        let import = self.import_format().parse(id)?;
        let location = ctx.location(import.project_id.as_deref());
        let (hvn_id, forwarding_id) = (import.get("hvn_id"), import.get("dns_forwarding_id"));

        Self::fetch(ctx, &location, hvn_id, forwarding_id, "")
            .await?
            .ok_or_else(|| ProviderError::NotFound(format!("DNS forwarding {} on HVN {}", forwarding_id, hvn_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TEST_PROJECT, create_test_hvn, mock_context};

    fn planned() -> DnsForwardingState {
        DnsForwardingState {
            hvn_id: "hvn-1".to_string(),
            dns_forwarding_id: "corp-dns".to_string(),
            peering_id: "peer-1".to_string(),
            connection_type: "HVN-Peering".to_string(),
            forwarding_rule: ForwardingRuleState {
                rule_id: "corp-rule".to_string(),
                domain_name: "corp.example.com".to_string(),
                inbound_endpoint_ips: vec!["10.1.0.10".to_string(), "10.1.0.11".to_string()],
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_with_first_rule() {
        let (mock, _clock, ctx) = mock_context();
        mock.add_hvn(create_test_hvn(TEST_PROJECT, "hvn-1"));
        let resource = DnsForwardingResource::default();

        let state = resource.create(&ctx, planned()).await.unwrap();

        assert_eq!(state.connection_type, "hvn-peering");
        assert_eq!(state.forwarding_rule, planned().forwarding_rule);
        assert_eq!(state.state, "ACTIVE");
        assert_eq!(state.project_id, TEST_PROJECT);
        assert_eq!(state.self_link, "/project/proj-1/dns-forwarding/corp-dns");
        assert_eq!(mock.calls(), vec!["create_dns_forwarding"]);
    }

    #[tokio::test]
    async fn test_invalid_rule_rejected_before_remote_call() {
        let (mock, _clock, ctx) = mock_context();
        mock.add_hvn(create_test_hvn(TEST_PROJECT, "hvn-1"));
        let resource = DnsForwardingResource::default();

        let mut bad_ip = planned();
        bad_ip.forwarding_rule.inbound_endpoint_ips = vec!["10.1.0.300".to_string()];
        assert!(resource.create(&ctx, bad_ip).await.is_err());

        let mut no_ips = planned();
        no_ips.forwarding_rule.inbound_endpoint_ips.clear();
        assert!(resource.create(&ctx, no_ips).await.is_err());

        let mut bad_type = planned();
        bad_type.connection_type = "vpn".to_string();
        assert!(resource.create(&ctx, bad_type).await.is_err());

        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_import_then_delete() {
        let (mock, _clock, ctx) = mock_context();
        mock.add_hvn(create_test_hvn(TEST_PROJECT, "hvn-1"));
        let resource = DnsForwardingResource::default();
        let state = resource.create(&ctx, planned()).await.unwrap();

        let imported = resource.import_state(&ctx, "hvn-1:corp-dns").await.unwrap();
        assert_eq!(imported, state);

        resource.delete(&ctx, &state).await.unwrap();
        assert_eq!(resource.read(&ctx, &state).await.unwrap(), None);
        resource.delete(&ctx, &state).await.unwrap();
        assert!(resource.import_state(&ctx, "hvn-1:corp-dns").await.unwrap_err().is_not_found());
    }
}
