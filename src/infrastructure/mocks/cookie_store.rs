//! Scripted cookie store for testing.

use crate::application::ports::{CookieStore, CookieStoreError};
use crate::domain::cookie::{Cookie, RemovalRequest};
use crate::infrastructure::cookie_store::InMemoryCookieStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

const POISONED: &str = "ScriptedCookieStore mutex poisoned - a test thread panicked while holding the lock";

/// Cookie store that records every call and can be told to fail.
///
/// Lookups and removals are delegated to an [`InMemoryCookieStore`].
///
/// # Examples
///
/// ```
/// use cookie_clearer::infrastructure::mocks::ScriptedCookieStore;
/// use cookie_clearer::{Cookie, CookieEraser, DomainScope};
/// use std::sync::Arc;
///
/// futures::executor::block_on(async {
///     let store = Arc::new(ScriptedCookieStore::with_cookies([
///         Cookie::new("sid", "acme.domo.com", "0"),
///     ]));
///     store.fail_removal_of("sid", "permission denied");
///
///     let eraser = CookieEraser::new(store.clone(), DomainScope::default());
///     let result = eraser.clear_cookies("acme.domo.com").await.unwrap();
///     assert_eq!(result.errors, vec!["sid: permission denied".to_string()]);
/// });
/// ```
#[derive(Debug, Default)]
pub struct ScriptedCookieStore {
    inner: InMemoryCookieStore,
    queries: Mutex<Vec<String>>,
    removals: Mutex<Vec<RemovalRequest>>,
    removal_failures: Mutex<HashMap<String, CookieStoreError>>,
    query_failure: Mutex<Option<String>>,
}

impl ScriptedCookieStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `cookies`.
    pub fn with_cookies(cookies: impl IntoIterator<Item = Cookie>) -> Self {
        Self {
            inner: InMemoryCookieStore::with_cookies(cookies),
            ..Self::default()
        }
    }

    /// Make every removal of a cookie named `name` fail with `reason`.
    pub fn fail_removal_of(&self, name: &str, reason: &str) {
        self.removal_failures
            .lock()
            .expect(POISONED)
            .insert(name.to_string(), CookieStoreError::Backend(reason.to_string()));
    }

    /// Make every removal of a cookie named `name` resolve unconfirmed.
    pub fn unconfirm_removal_of(&self, name: &str) {
        self.removal_failures
            .lock()
            .expect(POISONED)
            .insert(name.to_string(), CookieStoreError::NotRemoved);
    }

    /// Make every `get_all` fail with `reason`.
    pub fn fail_queries(&self, reason: &str) {
        *self.query_failure.lock().expect(POISONED) = Some(reason.to_string());
    }

    /// Domain filters passed to `get_all`, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().expect(POISONED).clone()
    }

    /// Removal requests received, in call order.
    pub fn removals(&self) -> Vec<RemovalRequest> {
        self.removals.lock().expect(POISONED).clone()
    }

    /// Cookies still stored.
    pub fn snapshot(&self) -> Vec<Cookie> {
        self.inner.snapshot()
    }
}

#[async_trait]
impl CookieStore for ScriptedCookieStore {
    async fn get_all(&self, domain: &str) -> Result<Vec<Cookie>, CookieStoreError> {
        self.queries.lock().expect(POISONED).push(domain.to_string());
        if let Some(reason) = self.query_failure.lock().expect(POISONED).clone() {
            return Err(CookieStoreError::Backend(reason));
        }
        self.inner.get_all(domain).await
    }

    async fn remove(&self, request: &RemovalRequest) -> Result<(), CookieStoreError> {
        self.removals.lock().expect(POISONED).push(request.clone());
        let failure = self
            .removal_failures
            .lock()
            .expect(POISONED)
            .get(&request.name)
            .cloned();
        match failure {
            Some(err) => Err(err),
            None => self.inner.remove(request).await,
        }
    }
}
