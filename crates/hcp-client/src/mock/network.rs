//! Network operations for MockHcpClient
//!
//! Handles HVNs, peerings, routes and DNS forwarding

use super::MockHcpClient;
use super::helpers::{already_exists, not_found};
use crate::error::HcpError;
use crate::models::*;

fn key(location: &Location, hvn_id: &str, id: &str) -> (String, String, String) {
    (location.project_id.clone(), hvn_id.to_string(), id.to_string())
}

fn ensure_hvn(client: &MockHcpClient, location: &Location, hvn_id: &str) -> Result<Hvn, HcpError> {
    client.hvns
        .lock()
        .unwrap()
        .get(&(location.project_id.clone(), hvn_id.to_string()))
        .cloned()
        .ok_or_else(|| not_found("HVN", hvn_id))
}

pub async fn create_hvn(client: &MockHcpClient, location: &Location, request: &HvnCreate) -> Result<HvnResponse, HcpError> {
    client.record("create_hvn");
    let hvn_key = (location.project_id.clone(), request.id.clone());
    if client.hvns.lock().unwrap().contains_key(&hvn_key) {
        return Err(already_exists("HVN", &request.id));
    }

    let hvn = Hvn {
        id: request.id.clone(),
        location: request.location.clone(),
        cidr_block: request.cidr_block.clone(),
        provider_account_id: format!("{:012}", client.next_id()),
        state: "STABLE".to_string(),
        created_at: Some(chrono::Utc::now()),
    };
    client.hvns.lock().unwrap().insert(hvn_key, hvn.clone());

    Ok(HvnResponse {
        network: hvn,
        operation: Some(client.new_operation(location)),
    })
}

pub async fn get_hvn(client: &MockHcpClient, location: &Location, hvn_id: &str) -> Result<Hvn, HcpError> {
    ensure_hvn(client, location, hvn_id)
}

pub async fn delete_hvn(client: &MockHcpClient, location: &Location, hvn_id: &str) -> Result<Operation, HcpError> {
    client.record("delete_hvn");
    client.hvns
        .lock()
        .unwrap()
        .remove(&(location.project_id.clone(), hvn_id.to_string()))
        .ok_or_else(|| not_found("HVN", hvn_id))?;
    Ok(client.new_operation(location))
}

pub async fn create_peering(client: &MockHcpClient, location: &Location, hvn_id: &str, request: &PeeringCreate) -> Result<PeeringResponse, HcpError> {
    client.record("create_peering");
    ensure_hvn(client, location, hvn_id)?;

    let id = format!("peer-{}", client.next_id());
    let state = *client.peering_state.lock().unwrap();
    let peering = Peering {
        id: id.clone(),
        hvn: request.hvn.clone(),
        target: request.target.clone(),
        state,
        created_at: Some(chrono::Utc::now()),
        expires_at: None,
    };
    client.peerings.lock().unwrap().insert(key(location, hvn_id, &id), peering.clone());

    Ok(PeeringResponse {
        peering,
        operation: Some(client.new_operation(location)),
    })
}

pub async fn get_peering(client: &MockHcpClient, location: &Location, hvn_id: &str, peering_id: &str) -> Result<Peering, HcpError> {
    client.peerings
        .lock()
        .unwrap()
        .get(&key(location, hvn_id, peering_id))
        .cloned()
        .ok_or_else(|| not_found("Peering", peering_id))
}

pub async fn delete_peering(client: &MockHcpClient, location: &Location, hvn_id: &str, peering_id: &str) -> Result<Operation, HcpError> {
    client.record("delete_peering");
    client.peerings
        .lock()
        .unwrap()
        .remove(&key(location, hvn_id, peering_id))
        .ok_or_else(|| not_found("Peering", peering_id))?;
    Ok(client.new_operation(location))
}

pub async fn create_route(client: &MockHcpClient, location: &Location, hvn_id: &str, request: &RouteCreate) -> Result<RouteResponse, HcpError> {
    client.record("create_route");
    let hvn = ensure_hvn(client, location, hvn_id)?;

    let route_key = key(location, hvn_id, &request.id);
    if client.routes.lock().unwrap().contains_key(&route_key) {
        return Err(already_exists("Route", &request.id));
    }

    let route = Route {
        id: request.id.clone(),
        hvn: Link::new(hvn.location.clone(), resource_types::HVN, hvn_id),
        destination: request.destination.clone(),
        target: request.target.clone(),
        state: "ACTIVE".to_string(),
        created_at: Some(chrono::Utc::now()),
    };
    client.routes.lock().unwrap().insert(route_key, route.clone());

    Ok(RouteResponse {
        route,
        operation: Some(client.new_operation(location)),
    })
}

pub async fn get_route(client: &MockHcpClient, location: &Location, hvn_id: &str, route_id: &str) -> Result<Route, HcpError> {
    client.routes
        .lock()
        .unwrap()
        .get(&key(location, hvn_id, route_id))
        .cloned()
        .ok_or_else(|| not_found("Route", route_id))
}

pub async fn delete_route(client: &MockHcpClient, location: &Location, hvn_id: &str, route_id: &str) -> Result<Operation, HcpError> {
    client.record("delete_route");
    client.routes
        .lock()
        .unwrap()
        .remove(&key(location, hvn_id, route_id))
        .ok_or_else(|| not_found("Route", route_id))?;
    Ok(client.new_operation(location))
}

pub async fn create_dns_forwarding(client: &MockHcpClient, location: &Location, hvn_id: &str, request: &DnsForwardingCreate) -> Result<DnsForwardingResponse, HcpError> {
    client.record("create_dns_forwarding");
    let hvn = ensure_hvn(client, location, hvn_id)?;

    let forwarding_key = key(location, hvn_id, &request.id);
    if client.dns_forwardings.lock().unwrap().contains_key(&forwarding_key) {
        return Err(already_exists("DNS forwarding", &request.id));
    }

    let now = chrono::Utc::now();
    let forwarding = DnsForwarding {
        id: request.id.clone(),
        hvn: Link::new(hvn.location.clone(), resource_types::HVN, hvn_id),
        peering_id: request.peering_id.clone(),
        connection_type: request.connection_type.clone(),
        rules: vec![DnsForwardingRule {
            id: request.rule.id.clone(),
            domain_name: request.rule.domain_name.clone(),
            inbound_endpoint_ips: request.rule.inbound_endpoint_ips.clone(),
            state: "ACTIVE".to_string(),
            created_at: Some(now),
        }],
        state: "ACTIVE".to_string(),
        created_at: Some(now),
    };
    client.dns_forwardings.lock().unwrap().insert(forwarding_key, forwarding.clone());

    Ok(DnsForwardingResponse {
        dns_forwarding: forwarding,
        operation: Some(client.new_operation(location)),
    })
}

pub async fn get_dns_forwarding(client: &MockHcpClient, location: &Location, hvn_id: &str, forwarding_id: &str) -> Result<DnsForwarding, HcpError> {
    client.dns_forwardings
        .lock()
        .unwrap()
        .get(&key(location, hvn_id, forwarding_id))
        .cloned()
        .ok_or_else(|| not_found("DNS forwarding", forwarding_id))
}

pub async fn delete_dns_forwarding(client: &MockHcpClient, location: &Location, hvn_id: &str, forwarding_id: &str) -> Result<Operation, HcpError> {
    client.record("delete_dns_forwarding");
    client.dns_forwardings
        .lock()
        .unwrap()
        .remove(&key(location, hvn_id, forwarding_id))
        .ok_or_else(|| not_found("DNS forwarding", forwarding_id))?;
    Ok(client.new_operation(location))
}

fn rule_key(location: &Location, hvn_id: &str, forwarding_id: &str, rule_id: &str) -> (String, String, String, String) {
    (
        location.project_id.clone(),
        hvn_id.to_string(),
        forwarding_id.to_string(),
        rule_id.to_string(),
    )
}

pub async fn create_dns_forwarding_rule(client: &MockHcpClient, location: &Location, hvn_id: &str, forwarding_id: &str, request: &DnsForwardingRuleCreate) -> Result<DnsForwardingRuleResponse, HcpError> {
    client.record("create_dns_forwarding_rule");
    get_dns_forwarding(client, location, hvn_id, forwarding_id).await?;

    let key = rule_key(location, hvn_id, forwarding_id, &request.id);
    if client.dns_forwarding_rules.lock().unwrap().contains_key(&key) {
        return Err(already_exists("DNS forwarding rule", &request.id));
    }

    let rule = DnsForwardingRule {
        id: request.id.clone(),
        domain_name: request.domain_name.clone(),
        inbound_endpoint_ips: request.inbound_endpoint_ips.clone(),
        state: "ACTIVE".to_string(),
        created_at: Some(chrono::Utc::now()),
    };
    client.dns_forwarding_rules.lock().unwrap().insert(key, rule.clone());

    Ok(DnsForwardingRuleResponse {
        rule,
        operation: Some(client.new_operation(location)),
    })
}

pub async fn get_dns_forwarding_rule(client: &MockHcpClient, location: &Location, hvn_id: &str, forwarding_id: &str, rule_id: &str) -> Result<DnsForwardingRule, HcpError> {
    client.dns_forwarding_rules
        .lock()
        .unwrap()
        .get(&rule_key(location, hvn_id, forwarding_id, rule_id))
        .cloned()
        .ok_or_else(|| not_found("DNS forwarding rule", rule_id))
}

pub async fn delete_dns_forwarding_rule(client: &MockHcpClient, location: &Location, hvn_id: &str, forwarding_id: &str, rule_id: &str) -> Result<Operation, HcpError> {
    client.record("delete_dns_forwarding_rule");
    client.dns_forwarding_rules
        .lock()
        .unwrap()
        .remove(&rule_key(location, hvn_id, forwarding_id, rule_id))
        .ok_or_else(|| not_found("DNS forwarding rule", rule_id))?;
    Ok(client.new_operation(location))
}
