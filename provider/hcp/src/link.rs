//! Canonical string form of resource links.
//!
//! A link encodes as
//! `/project/{project_id}/{type}/{id}` or, when the location carries a region,
//! `/project/{project_id}/region/{provider}/{region}/{type}/{id}`.
//!
//! The organization is not part of the string; decoding takes it from the
//! caller. `uuid` and `description` are never encoded.

use crate::error::ProviderError;
use hcp_client::{Link, Location, Region};

const PROJECT_SEGMENT: &str = "project";
const REGION_SEGMENT: &str = "region";

/// Build a link to a resource of `resource_type` in `location`
pub fn new_link(location: Location, resource_type: &str, id: &str) -> Link {
    Link::new(location, resource_type, id)
}

/// Self link of a resource: project-scoped, without the region segments
pub fn self_link(location: &Location, resource_type: &str, id: &str) -> String {
    let scope = Location::new(location.organization_id.clone(), location.project_id.clone());
    encode_link(&new_link(scope, resource_type, id))
}

/// Encode a link to its canonical string form
pub fn encode_link(link: &Link) -> String {
    match &link.location.region {
        Some(region) => format!(
            "/{}/{}/{}/{}/{}/{}/{}",
            PROJECT_SEGMENT,
            link.location.project_id,
            REGION_SEGMENT,
            region.provider,
            region.region,
            link.resource_type,
            link.id
        ),
        None => format!(
            "/{}/{}/{}/{}",
            PROJECT_SEGMENT, link.location.project_id, link.resource_type, link.id
        ),
    }
}

/// Decode a link string, requiring its type segment to equal `expected_type`
pub fn decode_link(input: &str, expected_type: &str, organization_id: &str) -> Result<Link, ProviderError> {
    decode_link_any(input, &[expected_type], organization_id)
}

/// Decode a link string whose type must be one of `allowed_types`
pub fn decode_link_any(input: &str, allowed_types: &[&str], organization_id: &str) -> Result<Link, ProviderError> {
    let link = parse(input, organization_id)?;

    if !allowed_types.contains(&link.resource_type.as_str()) {
        return Err(ProviderError::LinkTypeMismatch {
            expected: allowed_types.join(" or "),
            actual: link.resource_type,
        });
    }

    Ok(link)
}

fn parse(input: &str, organization_id: &str) -> Result<Link, ProviderError> {
    let invalid = || ProviderError::InvalidLink(input.to_string());

    let rest = input.strip_prefix('/').ok_or_else(invalid)?;
    let segments: Vec<&str> = rest.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) || segments.first() != Some(&PROJECT_SEGMENT) {
        return Err(invalid());
    }

    match segments.as_slice() {
        [_, project_id, resource_type, id] => Ok(Link::new(
            Location::new(organization_id, *project_id),
            *resource_type,
            *id,
        )),
        [_, project_id, region_marker, provider, region, resource_type, id] if *region_marker == REGION_SEGMENT => {
            let mut location = Location::new(organization_id, *project_id);
            location.region = Some(Region {
                provider: provider.to_string(),
                region: region.to_string(),
            });
            Ok(Link::new(location, *resource_type, *id))
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hcp_client::resource_types;

    #[test]
    fn test_encode_without_region() {
        let link = new_link(Location::new("o1", "p1"), resource_types::HVN, "net-1");
        assert_eq!(encode_link(&link), "/project/p1/hvn/net-1");
    }

    #[test]
    fn test_decode_returns_original_fields() {
        let link = decode_link("/project/p1/hvn/net-1", "hvn", "o1").unwrap();

        assert_eq!(link.location.organization_id, "o1");
        assert_eq!(link.location.project_id, "p1");
        assert_eq!(link.location.region, None);
        assert_eq!(link.resource_type, "hvn");
        assert_eq!(link.id, "net-1");
    }

    #[test]
    fn test_type_mismatch_names_both_types() {
        let err = decode_link("/project/p1/hvn/net-1", "peering", "o1").unwrap_err();

        let text = err.to_string();
        assert!(text.contains("hvn"), "{}", text);
        assert!(text.contains("peering"), "{}", text);
        assert!(matches!(err, ProviderError::LinkTypeMismatch { .. }));
    }

    #[test]
    fn test_region_form_round_trips() {
        let location = Location::new("o1", "p1").with_region("aws", "us-west-2");
        let link = new_link(location, resource_types::VAULT_CLUSTER, "vault-1");

        let encoded = encode_link(&link);
        assert_eq!(encoded, "/project/p1/region/aws/us-west-2/vault-cluster/vault-1");
        assert_eq!(decode_link(&encoded, resource_types::VAULT_CLUSTER, "o1").unwrap(), link);
    }

    #[test]
    fn test_round_trip_across_types() {
        for resource_type in [
            resource_types::HVN,
            resource_types::PEERING,
            resource_types::TGW_ATTACHMENT,
            resource_types::ROUTE,
            resource_types::DNS_FORWARDING,
        ] {
            let link = new_link(Location::new("org", "proj"), resource_type, "x-1");
            let decoded = decode_link(&encode_link(&link), resource_type, "org").unwrap();
            assert_eq!(decoded, link);

            let other = if resource_type == resource_types::HVN {
                resource_types::ROUTE
            } else {
                resource_types::HVN
            };
            assert!(decode_link(&encode_link(&link), other, "org").is_err());
        }
    }

    #[test]
    fn test_self_link_drops_region() {
        let location = Location::new("o1", "p1").with_region("aws", "us-east-1");
        assert_eq!(self_link(&location, resource_types::HVN, "net-1"), "/project/p1/hvn/net-1");
    }

    #[test]
    fn test_uuid_and_description_are_not_encoded() {
        let mut link = new_link(Location::new("o1", "p1"), resource_types::HVN, "net-1");
        link.uuid = Some("b2e5c5a6".to_string());
        link.description = Some("main network".to_string());

        assert_eq!(encode_link(&link), "/project/p1/hvn/net-1");
    }

    #[test]
    fn test_decode_any_accepts_listed_types() {
        let allowed = [resource_types::PEERING, resource_types::TGW_ATTACHMENT];

        let link = decode_link_any("/project/p1/tgw-attachment/att-1", &allowed, "o1").unwrap();
        assert_eq!(link.resource_type, "tgw-attachment");

        let err = decode_link_any("/project/p1/hvn/net-1", &allowed, "o1").unwrap_err();
        assert!(err.to_string().contains("peering or tgw-attachment"));
    }

    #[test]
    fn test_malformed_links_rejected() {
        for input in [
            "",
            "project/p1/hvn/net-1",
            "/project/p1/hvn",
            "/project/p1/hvn/net-1/extra",
            "/project//hvn/net-1",
            "/organization/p1/hvn/net-1",
            "/project/p1/zone/aws/us-west-2/hvn/net-1",
            "/project/p1/hvn/net-1/",
        ] {
            let err = decode_link(input, "hvn", "o1").unwrap_err();
            assert!(matches!(err, ProviderError::InvalidLink(_)), "{:?} -> {:?}", input, err);
        }
    }
}
