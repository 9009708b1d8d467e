//! Hostname scope predicate.
//!
//! Decides whether a hostname belongs to the protected application family,
//! i.e. looks like `<tenant>.<suffix>` where `<tenant>` is a single
//! alphanumeric label that may contain interior hyphens.
//!
//! This is the only gate between untrusted input (hostnames reported by
//! network events or the active tab) and any cookie-affecting or alerting
//! action. Both the eraser and the monitor call it.

use regex::Regex;
use std::sync::LazyLock;

/// Suffix protected by the default scope.
pub const DEFAULT_SCOPE_SUFFIX: &str = "domo.com";

static DEFAULT_SCOPE: LazyLock<DomainScope> = LazyLock::new(DomainScope::default);

/// Error returned when a scope suffix cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    /// Suffix must be exactly two non-empty labels, e.g. `example.com`
    #[error("scope suffix must be two dot-separated labels, got {0:?}")]
    InvalidSuffix(String),
}

/// Anchored scope predicate for `<label>.<suffix>` hostnames.
///
/// Matching is case-sensitive and never folds case: hostnames arrive
/// lower-cased from URL parsing, and anything else is treated literally.
///
/// # Example
/// ```
/// use cookie_clearer::DomainScope;
///
/// let scope = DomainScope::new("domo.com").unwrap();
/// assert!(scope.is_in_scope("acme-corp.domo.com"));
/// assert!(!scope.is_in_scope("evil-domo.com"));
/// assert!(!scope.is_in_scope("acme.domo.com.evil.net"));
/// ```
#[derive(Debug, Clone)]
pub struct DomainScope {
    suffix: String,
    pattern: Regex,
}

impl DomainScope {
    /// Build a scope for the given two-label suffix.
    ///
    /// # Errors
    /// Returns `ScopeError::InvalidSuffix` unless `suffix` is two labels made
    /// of ASCII alphanumerics and interior hyphens.
    pub fn new(suffix: &str) -> Result<Self, ScopeError> {
        let labels: Vec<&str> = suffix.split('.').collect();
        if labels.len() != 2 || !labels.iter().all(|label| is_valid_label(label)) {
            return Err(ScopeError::InvalidSuffix(suffix.to_string()));
        }

        let pattern = format!(
            r"^[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?\.{}$",
            regex::escape(suffix)
        );
        let pattern =
            Regex::new(&pattern).map_err(|_| ScopeError::InvalidSuffix(suffix.to_string()))?;

        Ok(Self {
            suffix: suffix.to_string(),
            pattern,
        })
    }

    /// Check whether `hostname` is in scope.
    pub fn is_in_scope(&self, hostname: &str) -> bool {
        self.pattern.is_match(hostname)
    }

    /// The protected suffix, e.g. `domo.com`.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Host match pattern used to register network interception,
    /// e.g. `*://*.domo.com/*`.
    pub fn host_pattern(&self) -> String {
        format!("*://*.{}/*", self.suffix)
    }
}

impl Default for DomainScope {
    fn default() -> Self {
        Self::new(DEFAULT_SCOPE_SUFFIX).expect("default scope suffix is a valid two-label suffix")
    }
}

/// Check `hostname` against the default `domo.com` scope.
pub fn is_in_scope(hostname: &str) -> bool {
    DEFAULT_SCOPE.is_in_scope(hostname)
}

/// Rightmost two labels of `hostname`, if it has more than two.
///
/// `a.b.example.com` gives `example.com`; `example.com` has no separate
/// parent and gives `None`.
pub fn parent_scope(hostname: &str) -> Option<&str> {
    let mut dots = hostname.rmatch_indices('.');
    dots.next()?;
    let (idx, _) = dots.next()?;
    let parent = &hostname[idx + 1..];
    (parent != hostname).then_some(parent)
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_tenant_hostnames() {
        for host in [
            "acme-corp.domo.com",
            "a1.domo.com",
            "a.domo.com",
            "test123.domo.com",
            "my-big-company.domo.com",
            "ACME.domo.com",
        ] {
            assert!(is_in_scope(host), "{host} should be in scope");
        }
    }

    #[test]
    fn test_rejects_suffix_confusable_hostnames() {
        for host in [
            "evil-domo.com",
            "maliciousdomo.com",
            "domo.com",
            "domo.com.evil.net",
            "x.y.domo.com.evil.com",
            "acme.domo.com.evil.com",
            "acme.domo.co",
            "acme.domoXcom",
        ] {
            assert!(!is_in_scope(host), "{host} should be rejected");
        }
    }

    #[test]
    fn test_rejects_malformed_labels() {
        for host in [
            "",
            ".domo.com",
            "-acme.domo.com",
            "acme-.domo.com",
            "-.domo.com",
            "acme_corp.domo.com",
            "x.y.domo.com",
            "acme.domo.com.",
            "acme.domo.com\n",
            " acme.domo.com",
            "acme corp.domo.com",
        ] {
            assert!(!is_in_scope(host), "{host:?} should be rejected");
        }
    }

    #[test]
    fn test_suffix_is_case_sensitive() {
        assert!(!is_in_scope("acme.DOMO.com"));
        assert!(!is_in_scope("acme.domo.COM"));
    }

    #[test]
    fn test_custom_suffix() {
        let scope = DomainScope::new("example.org").unwrap();
        assert!(scope.is_in_scope("tenant.example.org"));
        assert!(!scope.is_in_scope("tenant.domo.com"));
        assert!(!scope.is_in_scope("tenantXexample.org"));
        assert_eq!(scope.suffix(), "example.org");
        assert_eq!(scope.host_pattern(), "*://*.example.org/*");
    }

    #[test]
    fn test_invalid_suffixes() {
        for suffix in ["", "com", "a.b.com", ".com", "exa mple.com", "-x.com", "x..com"] {
            assert_eq!(
                DomainScope::new(suffix).unwrap_err(),
                ScopeError::InvalidSuffix(suffix.to_string())
            );
        }
    }

    #[test]
    fn test_parent_scope() {
        assert_eq!(parent_scope("acme.domo.com"), Some("domo.com"));
        assert_eq!(parent_scope("a.b.example.com"), Some("example.com"));
        assert_eq!(parent_scope("domo.com"), None);
        assert_eq!(parent_scope("localhost"), None);
    }
}
