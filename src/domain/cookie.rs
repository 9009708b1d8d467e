//! Cookie records as reported by the browser's cookie store.

use serde::{Deserialize, Serialize};

/// A stored cookie.
///
/// Field names follow the host's JSON shape (`storeId`), and fields the
/// clearer does not need, such as `value`, are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Stored domain attribute; a leading `.` marks an ancestor-scope cookie
    pub domain: String,
    /// Path attribute, `/` when absent
    #[serde(default)]
    pub path: Option<String>,
    /// Secure attribute; absent is treated as secure
    #[serde(default)]
    pub secure: Option<bool>,
    /// Partition (profile) the cookie lives in
    #[serde(default)]
    pub store_id: String,
}

/// Identity used to de-duplicate candidate cookies across queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CookieKey {
    pub name: String,
    pub domain: String,
}

/// Everything the cookie store needs to remove one cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalRequest {
    /// URL the cookie would be sent to
    pub url: String,
    /// Cookie name
    pub name: String,
    /// Partition the cookie lives in; removal from any other store is a no-op
    pub store_id: String,
}

impl Cookie {
    /// Create a cookie with default path and secure attributes.
    pub fn new(
        name: impl Into<String>,
        domain: impl Into<String>,
        store_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            path: None,
            secure: None,
            store_id: store_id.into(),
        }
    }

    /// Set the path attribute.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the secure attribute.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    /// Domain with any leading wildcard dot removed.
    pub fn effective_scope(&self) -> &str {
        self.domain.strip_prefix('.').unwrap_or(&self.domain)
    }

    /// De-duplication key: name plus stored domain string.
    pub fn key(&self) -> CookieKey {
        CookieKey {
            name: self.name.clone(),
            domain: self.domain.clone(),
        }
    }

    /// Whether this cookie would be sent on requests to `hostname`.
    ///
    /// True when the effective scope is the hostname itself or one of its
    /// ancestor domains.
    pub fn applies_to(&self, hostname: &str) -> bool {
        let scope = self.effective_scope();
        if scope.is_empty() {
            return false;
        }
        if hostname == scope {
            return true;
        }
        hostname
            .strip_suffix(scope)
            .is_some_and(|head| head.ends_with('.'))
    }

    /// Path attribute or `/`.
    pub fn path_or_root(&self) -> &str {
        match self.path.as_deref() {
            Some(path) if !path.is_empty() => path,
            _ => "/",
        }
    }

    /// `http` only when the cookie is explicitly not secure.
    pub fn scheme(&self) -> &'static str {
        if self.secure == Some(false) {
            "http"
        } else {
            "https"
        }
    }

    /// URL the store uses to locate this cookie for removal.
    pub fn removal_url(&self) -> String {
        format!(
            "{}://{}{}",
            self.scheme(),
            self.effective_scope(),
            self.path_or_root()
        )
    }

    /// Build the removal request targeting this cookie's own partition.
    pub fn removal_request(&self) -> RemovalRequest {
        RemovalRequest {
            url: self.removal_url(),
            name: self.name.clone(),
            store_id: self.store_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_scope_strips_one_leading_dot() {
        assert_eq!(Cookie::new("a", ".domo.com", "0").effective_scope(), "domo.com");
        assert_eq!(
            Cookie::new("a", "acme.domo.com", "0").effective_scope(),
            "acme.domo.com"
        );
    }

    #[test]
    fn test_applies_to_exact_and_ancestor_scopes() {
        let host = "acme.domo.com";
        assert!(Cookie::new("sid", "acme.domo.com", "0").applies_to(host));
        assert!(Cookie::new("sid", ".acme.domo.com", "0").applies_to(host));
        assert!(Cookie::new("theme", ".domo.com", "0").applies_to(host));
        assert!(Cookie::new("theme", "domo.com", "0").applies_to(host));
    }

    #[test]
    fn test_does_not_apply_to_siblings_or_lookalikes() {
        let host = "acme.domo.com";
        assert!(!Cookie::new("x", "other.com", "0").applies_to(host));
        assert!(!Cookie::new("x", "other.domo.com", "0").applies_to(host));
        assert!(!Cookie::new("x", "me.domo.com", "0").applies_to(host));
        assert!(!Cookie::new("x", "b.acme.domo.com", "0").applies_to(host));
        assert!(!Cookie::new("x", ".", "0").applies_to(host));
        assert!(!Cookie::new("x", "", "0").applies_to(host));
    }

    #[test]
    fn test_removal_url() {
        let cookie = Cookie::new("sid", ".domo.com", "0");
        assert_eq!(cookie.removal_url(), "https://domo.com/");

        let cookie = Cookie::new("sid", "acme.domo.com", "0")
            .with_path("/app")
            .with_secure(false);
        assert_eq!(cookie.removal_url(), "http://acme.domo.com/app");

        let cookie = Cookie::new("sid", "acme.domo.com", "0").with_secure(true);
        assert_eq!(cookie.scheme(), "https");
    }

    #[test]
    fn test_removal_request_keeps_store_id() {
        let request = Cookie::new("sid", "acme.domo.com", "1").removal_request();
        assert_eq!(
            request,
            RemovalRequest {
                url: "https://acme.domo.com/".to_string(),
                name: "sid".to_string(),
                store_id: "1".to_string(),
            }
        );
    }

    #[test]
    fn test_deserialize_host_record() {
        let json = r#"{
            "name": "sid",
            "value": "opaque",
            "domain": ".domo.com",
            "path": "/",
            "secure": false,
            "httpOnly": true,
            "storeId": "0"
        }"#;
        let cookie: Cookie = serde_json::from_str(json).unwrap();
        assert_eq!(cookie.name, "sid");
        assert_eq!(cookie.domain, ".domo.com");
        assert_eq!(cookie.secure, Some(false));
        assert_eq!(cookie.store_id, "0");
    }

    #[test]
    fn test_deserialize_defaults() {
        let cookie: Cookie = serde_json::from_str(r#"{"name":"a","domain":"x.domo.com"}"#).unwrap();
        assert_eq!(cookie.path_or_root(), "/");
        assert_eq!(cookie.scheme(), "https");
        assert_eq!(cookie.store_id, "");
    }
}
