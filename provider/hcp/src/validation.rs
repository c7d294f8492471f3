//! Input validation run before any remote call.

use crate::error::ProviderError;
use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

/// Lowercase letters, digits and hyphens; starts with a letter, ends
/// alphanumeric, 3 to 36 characters.
static SLUG_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]{1,34}[a-z0-9]$"));

/// RFC 1918 ranges
const PRIVATE_RANGES: [(Ipv4Addr, u8); 3] = [
    (Ipv4Addr::new(10, 0, 0, 0), 8),
    (Ipv4Addr::new(172, 16, 0, 0), 12),
    (Ipv4Addr::new(192, 168, 0, 0), 16),
];

/// Validate a human-assigned resource ID
pub fn validate_slug_id(field: &str, value: &str) -> Result<(), ProviderError> {
    let pattern = SLUG_PATTERN
        .as_ref()
        .map_err(|e| ProviderError::validation(field, format!("slug pattern failed to compile: {}", e)))?;

    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(ProviderError::validation(
            field,
            format!(
                "{:?} must be 3-36 characters of lowercase letters, numbers and hyphens, starting with a letter and ending with a letter or number",
                value
            ),
        ))
    }
}

/// Check `value` against an allow-list and return the canonical spelling
pub fn validate_one_of(field: &str, value: &str, allowed: &[&str], case_insensitive: bool) -> Result<String, ProviderError> {
    allowed
        .iter()
        .find(|candidate| {
            if case_insensitive {
                candidate.eq_ignore_ascii_case(value)
            } else {
                **candidate == value
            }
        })
        .map(|candidate| candidate.to_string())
        .ok_or_else(|| {
            ProviderError::validation(field, format!("{:?} is not one of [{}]", value, allowed.join(", ")))
        })
}

/// Parse an IPv4 CIDR block into its address and prefix length
pub fn validate_cidr_block(field: &str, value: &str) -> Result<(Ipv4Addr, u8), ProviderError> {
    let invalid = || ProviderError::validation(field, format!("{:?} is not a valid IPv4 CIDR block", value));

    let (address, prefix) = value.split_once('/').ok_or_else(invalid)?;
    let address: Ipv4Addr = address.parse().map_err(|_| invalid())?;
    let prefix: u8 = prefix.parse().map_err(|_| invalid())?;
    if prefix > 32 {
        return Err(invalid());
    }
    Ok((address, prefix))
}

/// Parse a CIDR block that must lie entirely inside an RFC 1918 range
pub fn validate_private_cidr_block(field: &str, value: &str) -> Result<(Ipv4Addr, u8), ProviderError> {
    let (address, prefix) = validate_cidr_block(field, value)?;

    let inside = PRIVATE_RANGES.iter().any(|(range, range_prefix)| {
        prefix >= *range_prefix && mask(address, *range_prefix) == *range
    });
    if !inside {
        return Err(ProviderError::validation(
            field,
            format!("{:?} must be within 10.0.0.0/8, 172.16.0.0/12 or 192.168.0.0/16", value),
        ));
    }
    Ok((address, prefix))
}

fn mask(address: Ipv4Addr, prefix: u8) -> Ipv4Addr {
    let bits = u32::from(address);
    let mask = if prefix == 0 { 0 } else { u32::MAX << (32 - u32::from(prefix)) };
    Ipv4Addr::from(bits & mask)
}

/// Require exactly one of two alternative fields
pub fn exactly_one_of(first: &str, second: &str, first_set: bool, second_set: bool) -> Result<(), ProviderError> {
    let message = match (first_set, second_set) {
        (true, false) | (false, true) => return Ok(()),
        (true, true) => "only one may be set",
        (false, false) => "one must be set",
    };
    Err(ProviderError::ConflictingConfig {
        first: first.to_string(),
        second: second.to_string(),
        message: message.to_string(),
    })
}

/// Require a non-empty value
pub fn required(field: &str, value: &str) -> Result<(), ProviderError> {
    if value.trim().is_empty() {
        return Err(ProviderError::validation(field, "is required"));
    }
    Ok(())
}
