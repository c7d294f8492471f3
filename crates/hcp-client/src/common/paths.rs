//! API path builders
//!
//! Every HCP service is versioned by date and scoped by organization and project.
//! IDs are percent-encoded so a segment can never change the path shape.

use crate::models::Location;
use urlencoding::encode;

pub const RESOURCE_MANAGER_API: &str = "/resource-manager/2019-12-10";
pub const OPERATION_API: &str = "/operation/2020-05-05";
pub const NETWORK_API: &str = "/network/2020-09-07";
pub const VAULT_API: &str = "/vault/2020-11-25";

pub fn organizations() -> String {
    format!("{}/organizations", RESOURCE_MANAGER_API)
}

pub fn organization(id: &str) -> String {
    format!("{}/organizations/{}", RESOURCE_MANAGER_API, encode(id))
}

pub fn projects(organization_id: &str) -> String {
    format!(
        "{}/projects?scope.type=ORGANIZATION&scope.id={}",
        RESOURCE_MANAGER_API,
        encode(organization_id)
    )
}

pub fn project(id: &str) -> String {
    format!("{}/projects/{}", RESOURCE_MANAGER_API, encode(id))
}

fn scoped(api: &str, location: &Location) -> String {
    format!(
        "{}/organizations/{}/projects/{}",
        api,
        encode(&location.organization_id),
        encode(&location.project_id)
    )
}

pub fn operation(location: &Location, id: &str) -> String {
    format!("{}/operations/{}", scoped(OPERATION_API, location), encode(id))
}

pub fn networks(location: &Location) -> String {
    format!("{}/networks", scoped(NETWORK_API, location))
}

pub fn network(location: &Location, hvn_id: &str) -> String {
    format!("{}/{}", networks(location), encode(hvn_id))
}

pub fn peerings(location: &Location, hvn_id: &str) -> String {
    format!("{}/peerings", network(location, hvn_id))
}

pub fn peering(location: &Location, hvn_id: &str, peering_id: &str) -> String {
    format!("{}/{}", peerings(location, hvn_id), encode(peering_id))
}

pub fn routes(location: &Location, hvn_id: &str) -> String {
    format!("{}/routes", network(location, hvn_id))
}

pub fn route(location: &Location, hvn_id: &str, route_id: &str) -> String {
    format!("{}/{}", routes(location, hvn_id), encode(route_id))
}

pub fn dns_forwardings(location: &Location, hvn_id: &str) -> String {
    format!("{}/dns-forwardings", network(location, hvn_id))
}

pub fn dns_forwarding(location: &Location, hvn_id: &str, forwarding_id: &str) -> String {
    format!("{}/{}", dns_forwardings(location, hvn_id), encode(forwarding_id))
}

pub fn dns_forwarding_rules(location: &Location, hvn_id: &str, forwarding_id: &str) -> String {
    format!("{}/rules", dns_forwarding(location, hvn_id, forwarding_id))
}

pub fn dns_forwarding_rule(location: &Location, hvn_id: &str, forwarding_id: &str, rule_id: &str) -> String {
    format!("{}/{}", dns_forwarding_rules(location, hvn_id, forwarding_id), encode(rule_id))
}

pub fn vault_clusters(location: &Location) -> String {
    format!("{}/clusters", scoped(VAULT_API, location))
}

pub fn vault_cluster(location: &Location, cluster_id: &str) -> String {
    format!("{}/{}", vault_clusters(location), encode(cluster_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_paths() {
        let location = Location::new("org-1", "proj-1");
        assert_eq!(
            operation(&location, "op-9"),
            "/operation/2020-05-05/organizations/org-1/projects/proj-1/operations/op-9"
        );
        assert_eq!(
            route(&location, "hvn-1", "r-1"),
            "/network/2020-09-07/organizations/org-1/projects/proj-1/networks/hvn-1/routes/r-1"
        );
        assert_eq!(
            dns_forwarding_rule(&location, "hvn-1", "fwd-1", "rule-1"),
            "/network/2020-09-07/organizations/org-1/projects/proj-1/networks/hvn-1/dns-forwardings/fwd-1/rules/rule-1"
        );
    }

    #[test]
    fn test_segments_cannot_escape_their_position() {
        let location = Location::new("org-1", "proj-1");
        assert_eq!(
            network(&location, "../../x?y=1"),
            "/network/2020-09-07/organizations/org-1/projects/proj-1/networks/..%2F..%2Fx%3Fy%3D1"
        );
        assert_eq!(
            project("p#1"),
            "/resource-manager/2019-12-10/projects/p%231"
        );
    }

    #[test]
    fn test_projects_query_is_scoped_to_organization() {
        assert_eq!(
            projects("org-1"),
            "/resource-manager/2019-12-10/projects?scope.type=ORGANIZATION&scope.id=org-1"
        );
    }
}
