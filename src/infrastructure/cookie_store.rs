//! In-memory cookie store with browser-like lookup rules.
//!
//! Useful for headless hosts and tests. Queries and removals follow the
//! browser extension cookie API closely enough that the eraser behaves the
//! same against it as against a real browser:
//! - `get_all(domain)` returns cookies whose domain equals the filter or is a
//!   subdomain of it, with leading dots ignored on both sides.
//! - `remove` finds the cookie that would be sent to the URL: host-only
//!   cookies need an exact host, dotted cookies also match subdomains, the
//!   path must be a prefix of the URL path, and secure cookies need `https`.

use crate::application::ports::{CookieStore, CookieStoreError};
use crate::domain::cookie::{Cookie, RemovalRequest};
use async_trait::async_trait;
use dashmap::DashMap;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StoredKey {
    store_id: String,
    domain: String,
    path: String,
    name: String,
}

impl StoredKey {
    fn of(cookie: &Cookie) -> Self {
        Self {
            store_id: cookie.store_id.clone(),
            domain: cookie.domain.clone(),
            path: cookie.path_or_root().to_string(),
            name: cookie.name.clone(),
        }
    }
}

/// Concurrent in-memory cookie jar.
#[derive(Debug)]
pub struct InMemoryCookieStore {
    cookies: DashMap<StoredKey, Cookie, ahash::RandomState>,
}

impl InMemoryCookieStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            cookies: DashMap::with_hasher(ahash::RandomState::new()),
        }
    }

    /// Create a store holding `cookies`.
    pub fn with_cookies(cookies: impl IntoIterator<Item = Cookie>) -> Self {
        let store = Self::new();
        for cookie in cookies {
            store.set(cookie);
        }
        store
    }

    /// Store a cookie, replacing one with the same store, domain, path and name.
    pub fn set(&self, cookie: Cookie) {
        self.cookies.insert(StoredKey::of(&cookie), cookie);
    }

    /// All stored cookies, ordered by domain then name.
    pub fn snapshot(&self) -> Vec<Cookie> {
        let mut cookies: Vec<Cookie> = self
            .cookies
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        cookies.sort_by(|a, b| (&a.domain, &a.name).cmp(&(&b.domain, &b.name)));
        cookies
    }

    /// Get the number of stored cookies.
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    fn matches_filter(cookie: &Cookie, filter: &str) -> bool {
        let filter = filter.strip_prefix('.').unwrap_or(filter);
        let scope = cookie.effective_scope();
        scope == filter
            || scope
                .strip_suffix(filter)
                .is_some_and(|head| head.ends_with('.'))
    }

    fn matches_url(cookie: &Cookie, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let scope = cookie.effective_scope();
        let domain_match = host == scope
            || (cookie.domain.starts_with('.')
                && host
                    .strip_suffix(scope)
                    .is_some_and(|head| head.ends_with('.')));
        let secure = cookie.secure != Some(false);

        domain_match
            && url.path().starts_with(cookie.path_or_root())
            && (!secure || url.scheme() == "https")
    }
}

impl Default for InMemoryCookieStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CookieStore for InMemoryCookieStore {
    async fn get_all(&self, domain: &str) -> Result<Vec<Cookie>, CookieStoreError> {
        Ok(self
            .cookies
            .iter()
            .filter(|entry| Self::matches_filter(entry.value(), domain))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn remove(&self, request: &RemovalRequest) -> Result<(), CookieStoreError> {
        let url = Url::parse(&request.url)
            .map_err(|err| CookieStoreError::Backend(format!("invalid url {}: {err}", request.url)))?;

        self.cookies.retain(|key, cookie| {
            !(key.name == request.name
                && key.store_id == request.store_id
                && Self::matches_url(cookie, &url))
        });
        Ok(())
    }
}
