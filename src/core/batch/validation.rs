//! Registration input validation

use crate::utils::error::{BatchError, Result};
use crate::utils::truncate_string;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Longest request name accepted
pub const MAX_NAME_LENGTH: usize = 120;

/// Longest domain name accepted (RFC 1035)
const MAX_DOMAIN_LENGTH: usize = 253;

static DOMAIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-z0-9_]([a-z0-9_-]{0,61}[a-z0-9_])?\.)+[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$")
        .expect("Invalid domain regex")
});

/// Canonical form of a submitted domain name
pub fn normalize_domain(raw: &str) -> String {
    let trimmed = raw.trim().to_lowercase();
    trimmed.strip_suffix('.').unwrap_or(&trimmed).to_string()
}

/// Check a single (already normalised) domain name
pub fn is_valid_domain(domain: &str) -> bool {
    domain.len() <= MAX_DOMAIN_LENGTH && DOMAIN_PATTERN.is_match(domain)
}

/// Check the request label
pub fn validate_name(name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BatchError::validation("Request name must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(BatchError::validation(format!(
            "Request name longer than {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

/// Reject an empty list or one holding the same domain twice
pub fn ensure_unique_non_empty(domains: &[String]) -> Result<()> {
    if domains.is_empty() {
        return Err(BatchError::validation("No domains given"));
    }

    let mut seen = HashSet::with_capacity(domains.len());
    for domain in domains {
        if !seen.insert(domain.as_str()) {
            return Err(BatchError::validation(format!(
                "Duplicate domain: {}",
                truncate_string(domain, 64)
            )));
        }
    }
    Ok(())
}

/// Normalise and validate a submitted domain list
///
/// Returns the normalised names in submission order.
pub fn validate_domains(raw: &[String], max_domains: usize) -> Result<Vec<String>> {
    if raw.len() > max_domains {
        return Err(BatchError::validation(format!(
            "Too many domains: {} given, at most {} allowed",
            raw.len(),
            max_domains
        )));
    }

    let domains: Vec<String> = raw.iter().map(|d| normalize_domain(d)).collect();

    if let Some(bad) = domains.iter().find(|d| !is_valid_domain(d)) {
        return Err(BatchError::validation(format!(
            "Invalid domain: {}",
            truncate_string(bad, 64)
        )));
    }

    ensure_unique_non_empty(&domains)?;
    Ok(domains)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(domains: &[&str]) -> Vec<String> {
        domains.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("  Example.COM. "), "example.com");
        assert_eq!(normalize_domain("a.example"), "a.example");
    }

    #[test]
    fn test_domain_syntax() {
        assert!(is_valid_domain("a.example"));
        assert!(is_valid_domain("xn--bcher-kva.example"));
        assert!(is_valid_domain("_dmarc.example.nl"));
        assert!(!is_valid_domain("localhost"));
        assert!(!is_valid_domain("-bad.example"));
        assert!(!is_valid_domain("bad..example"));
        assert!(!is_valid_domain("http://a.example"));
        assert!(!is_valid_domain(""));
    }

    #[test]
    fn test_validate_domains_normalises() {
        let domains = validate_domains(&owned(&["A.Example.", "b.example"]), 10).unwrap();
        assert_eq!(domains, owned(&["a.example", "b.example"]));
    }

    #[test]
    fn test_validate_domains_rejects_empty() {
        let result = validate_domains(&[], 10);
        assert!(matches!(result, Err(BatchError::Validation(_))));
    }

    #[test]
    fn test_validate_domains_rejects_duplicates_after_normalisation() {
        let result = validate_domains(&owned(&["a.example", "A.EXAMPLE."]), 10);
        assert!(matches!(result, Err(BatchError::Validation(_))));
    }

    #[test]
    fn test_validate_domains_rejects_malformed() {
        let result = validate_domains(&owned(&["a.example", "not a domain"]), 10);
        assert!(matches!(result, Err(BatchError::Validation(_))));
    }

    #[test]
    fn test_validate_domains_enforces_limit() {
        let result = validate_domains(&owned(&["a.example", "b.example", "c.example"]), 2);
        assert!(matches!(result, Err(BatchError::Validation(_))));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("weekly scan").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }
}
