//! `hcp_dns_forwarding_rule`: an additional rule on an existing DNS forwarding.

use super::dns_forwarding::ForwardingRuleState;
use crate::config::ProviderContext;
use crate::error::ProviderError;
use crate::import::ImportIdFormat;
use crate::link::self_link;
use crate::resource::Resource;
use crate::resource_helpers::{
    Timeouts, delete_or_absent, format_time, project_override, read_or_absent, wait_for_optional_operation,
};
use crate::schema::{Attribute, Schema};
use crate::validation::validate_slug_id;
use hcp_client::{DnsForwardingRule, Location, resource_types};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const TYPE_NAME: &str = "hcp_dns_forwarding_rule";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsForwardingRuleState {
    pub hvn_id: String,
    pub dns_forwarding_id: String,
    pub rule_id: String,
    pub domain_name: String,
    pub inbound_endpoint_ips: Vec<String>,
    pub project_id: String,
    pub state: String,
    pub created_at: String,
    pub self_link: String,
}

impl DnsForwardingRuleState {
    fn from_model(location: &Location, hvn_id: &str, forwarding_id: &str, rule: &DnsForwardingRule) -> Self {
        Self {
            hvn_id: hvn_id.to_string(),
            dns_forwarding_id: forwarding_id.to_string(),
            rule_id: rule.id.clone(),
            domain_name: rule.domain_name.clone(),
            inbound_endpoint_ips: rule.inbound_endpoint_ips.clone(),
            project_id: location.project_id.clone(),
            state: rule.state.clone(),
            created_at: format_time(rule.created_at),
            self_link: self_link(location, resource_types::DNS_FORWARDING_RULE, &rule.id),
        }
    }

    fn rule(&self) -> ForwardingRuleState {
        ForwardingRuleState {
            rule_id: self.rule_id.clone(),
            domain_name: self.domain_name.clone(),
            inbound_endpoint_ips: self.inbound_endpoint_ips.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DnsForwardingRuleResource {
    pub timeouts: Timeouts,
}

impl DnsForwardingRuleResource {
    async fn fetch(
        ctx: &ProviderContext,
        location: &Location,
        hvn_id: &str,
        forwarding_id: &str,
        rule_id: &str,
    ) -> Result<Option<DnsForwardingRuleState>, ProviderError> {
        let rule = read_or_absent(
            "DNS forwarding rule",
            rule_id,
            ctx.client().get_dns_forwarding_rule(location, hvn_id, forwarding_id, rule_id),
        )
        .await?;
        Ok(rule
            .as_ref()
            .map(|r| DnsForwardingRuleState::from_model(location, hvn_id, forwarding_id, r)))
    }
}

#[async_trait::async_trait]
impl Resource for DnsForwardingRuleResource {
    type State = DnsForwardingRuleState;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new(
            TYPE_NAME,
            vec![
                Attribute::required("hvn_id", "The ID of the HashiCorp Virtual Network (HVN).").force_new(),
                Attribute::required("dns_forwarding_id", "The ID of the DNS forwarding this rule belongs to.").force_new(),
                Attribute::required("rule_id", "The ID of the DNS forwarding rule.").force_new(),
                Attribute::required("domain_name", "The domain name to forward queries for.").force_new(),
                Attribute::required("inbound_endpoint_ips", "IP addresses of the target inbound endpoints.").force_new(),
                Attribute::optional_computed("project_id", "The ID of the HCP project where the rule is located.").force_new(),
                Attribute::computed("state", "The state of the DNS forwarding rule."),
                Attribute::computed("created_at", "The time that the DNS forwarding rule was created."),
                Attribute::computed("self_link", "A unique URL identifying the DNS forwarding rule."),
            ],
        )
    }

    fn import_format(&self) -> ImportIdFormat {
        ImportIdFormat::new(&["hvn_id", "dns_forwarding_id", "rule_id"])
    }

    async fn create(&self, ctx: &ProviderContext, planned: DnsForwardingRuleState) -> Result<DnsForwardingRuleState, ProviderError> {
        validate_slug_id("hvn_id", &planned.hvn_id)?;
        validate_slug_id("dns_forwarding_id", &planned.dns_forwarding_id)?;
        let rule = planned.rule().to_request("rule_id")?;

        let location = ctx.location(project_override(&planned.project_id));
        let (hvn_id, forwarding_id) = (planned.hvn_id.as_str(), planned.dns_forwarding_id.as_str());

        match ctx.client().get_dns_forwarding(&location, hvn_id, forwarding_id).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                return Err(ProviderError::NotFound(format!(
                    "DNS forwarding {} (dns_forwarding_id) on HVN {}",
                    forwarding_id, hvn_id
                )));
            }
            Err(e) => return Err(e.into()),
        }

        let response = ctx
            .client()
            .create_dns_forwarding_rule(&location, hvn_id, forwarding_id, &rule)
            .await?;
        info!("Created DNS forwarding rule {} on {}", rule.id, forwarding_id);

        wait_for_optional_operation(
            ctx,
            &location,
            &format!("DNS forwarding rule {} creation", rule.id),
            response.operation.as_ref(),
            self.timeouts.create,
        )
        .await?;

        Self::fetch(ctx, &location, hvn_id, forwarding_id, &rule.id)
            .await?
            .ok_or_else(|| ProviderError::NotFound(format!("DNS forwarding rule {} disappeared after creation", rule.id)))
    }

    async fn read(&self, ctx: &ProviderContext, current: &DnsForwardingRuleState) -> Result<Option<DnsForwardingRuleState>, ProviderError> {
        let location = ctx.location(project_override(&current.project_id));
        Self::fetch(ctx, &location, &current.hvn_id, &current.dns_forwarding_id, &current.rule_id).await
    }

    async fn delete(&self, ctx: &ProviderContext, current: &DnsForwardingRuleState) -> Result<(), ProviderError> {
        let location = ctx.location(project_override(&current.project_id));
        delete_or_absent(
            ctx,
            &location,
            "DNS forwarding rule",
            &current.rule_id,
            self.timeouts.delete,
            ctx.client()
                .delete_dns_forwarding_rule(&location, &current.hvn_id, &current.dns_forwarding_id, &current.rule_id),
        )
        .await
    }

    async fn import_state(&self, ctx: &ProviderContext, id: &str) -> Result<DnsForwardingRuleState, ProviderError> {
        let import = self.import_format().parse(id)?;
        let location = ctx.location(import.project_id.as_deref());
        let (hvn_id, forwarding_id, rule_id) = (import.get("hvn_id"), import.get("dns_forwarding_id"), import.get("rule_id"));

        Self::fetch(ctx, &location, hvn_id, forwarding_id, rule_id)
            .await?
            .ok_or_else(|| ProviderError::NotFound(format!("DNS forwarding rule {} on {}/{}", rule_id, hvn_id, forwarding_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::dns_forwarding::{DnsForwardingResource, DnsForwardingState};
    use crate::test_utils::{TEST_PROJECT, create_test_hvn, mock_context};

    fn forwarding() -> DnsForwardingState {
        DnsForwardingState {
            hvn_id: "hvn-1".to_string(),
            dns_forwarding_id: "corp-dns".to_string(),
            peering_id: "peer-1".to_string(),
            connection_type: "hvn-peering".to_string(),
            forwarding_rule: ForwardingRuleState {
                rule_id: "corp-rule".to_string(),
                domain_name: "corp.example.com".to_string(),
                inbound_endpoint_ips: vec!["10.1.0.10".to_string()],
            },
            ..Default::default()
        }
    }

    fn planned() -> DnsForwardingRuleState {
        DnsForwardingRuleState {
            hvn_id: "hvn-1".to_string(),
            dns_forwarding_id: "corp-dns".to_string(),
            rule_id: "lab-rule".to_string(),
            domain_name: "lab.example.com".to_string(),
            inbound_endpoint_ips: vec!["10.2.0.10".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_rule_on_existing_forwarding() {
        let (mock, _clock, ctx) = mock_context();
        mock.add_hvn(create_test_hvn(TEST_PROJECT, "hvn-1"));
        DnsForwardingResource::default().create(&ctx, forwarding()).await.unwrap();
        let resource = DnsForwardingRuleResource::default();

        let state = resource.create(&ctx, planned()).await.unwrap();

        assert_eq!(state.domain_name, "lab.example.com");
        assert_eq!(state.state, "ACTIVE");
        assert_eq!(state.self_link, "/project/proj-1/dns-forwarding-rule/lab-rule");
        assert_eq!(mock.calls(), vec!["create_dns_forwarding", "create_dns_forwarding_rule"]);
    }

    #[tokio::test]
    async fn test_missing_forwarding_is_not_found() {
        let (mock, _clock, ctx) = mock_context();
        let resource = DnsForwardingRuleResource::default();

        let err = resource.create(&ctx, planned()).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_import_three_and_four_segments() {
        let (mock, _clock, ctx) = mock_context();
        mock.add_hvn(create_test_hvn(TEST_PROJECT, "hvn-1"));
        DnsForwardingResource::default().create(&ctx, forwarding()).await.unwrap();
        let resource = DnsForwardingRuleResource::default();
        let state = resource.create(&ctx, planned()).await.unwrap();

        assert_eq!(resource.import_state(&ctx, "hvn-1:corp-dns:lab-rule").await.unwrap(), state);
        assert_eq!(resource.import_state(&ctx, "proj-1:hvn-1:corp-dns:lab-rule").await.unwrap(), state);
        assert!(matches!(
            resource.import_state(&ctx, "hvn-1:lab-rule").await,
            Err(ProviderError::InvalidImportId { .. })
        ));

        resource.delete(&ctx, &state).await.unwrap();
        assert_eq!(resource.read(&ctx, &state).await.unwrap(), None);
    }
}
