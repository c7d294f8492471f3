//! Managed resource types

pub mod dns_forwarding;
pub mod dns_forwarding_rule;
pub mod hvn;
pub mod hvn_peering_connection;
pub mod hvn_route;
pub mod vault_cluster;

pub use dns_forwarding::DnsForwardingResource;
pub use dns_forwarding_rule::DnsForwardingRuleResource;
pub use hvn::HvnResource;
pub use hvn_peering_connection::PeeringConnectionResource;
pub use hvn_route::HvnRouteResource;
pub use vault_cluster::VaultClusterResource;
