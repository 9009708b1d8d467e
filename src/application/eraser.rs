//! Selection and removal of the cookies scoped to one hostname.

use crate::application::metrics::Metrics;
use crate::application::ports::{CookieStore, CookieStoreError};
use crate::domain::clear_result::ClearResult;
use crate::domain::cookie::Cookie;
use crate::domain::scope::{parent_scope, DomainScope};
use ahash::AHashSet;
use futures::future::join_all;
use std::sync::Arc;

/// Error returned when a clear cannot run at all.
///
/// Per-cookie removal failures are not errors; they land in
/// `ClearResult::errors`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClearError {
    /// Hostname failed the scope predicate; the store was not touched
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),
    /// Listing candidate cookies failed
    #[error("cookie store query failed: {0}")]
    Store(#[from] CookieStoreError),
}

/// Clears the cookies that would be sent to an in-scope hostname.
#[derive(Debug, Clone)]
pub struct CookieEraser {
    store: Arc<dyn CookieStore>,
    scope: DomainScope,
    metrics: Metrics,
}

impl CookieEraser {
    /// Create an eraser over `store` for `scope`.
    pub fn new(store: Arc<dyn CookieStore>, scope: DomainScope) -> Self {
        Self {
            store,
            scope,
            metrics: Metrics::new(),
        }
    }

    /// Record clear counts into shared metrics.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// The scope this eraser enforces.
    pub fn scope(&self) -> &DomainScope {
        &self.scope
    }

    /// Remove every stored cookie scoped to `hostname` or one of its ancestors.
    ///
    /// The scope predicate is re-checked here regardless of what the caller
    /// did. Removals run concurrently; one failure never stops another.
    ///
    /// # Errors
    /// `ClearError::InvalidDomain` for an out-of-scope hostname (before any
    /// store access), `ClearError::Store` if listing cookies fails.
    pub async fn clear_cookies(&self, hostname: &str) -> Result<ClearResult, ClearError> {
        if !self.scope.is_in_scope(hostname) {
            tracing::warn!(hostname, "refusing to clear cookies for out-of-scope hostname");
            return Err(ClearError::InvalidDomain(hostname.to_string()));
        }

        let cookies = self.select(hostname).await?;
        let total_cookies = cookies.len();

        let outcomes = join_all(cookies.iter().map(|cookie| self.remove_one(cookie))).await;

        let mut result = ClearResult {
            total_cookies,
            ..ClearResult::default()
        };
        for outcome in outcomes {
            match outcome {
                Ok(()) => result.removed_count += 1,
                Err(message) => result.errors.push(message),
            }
        }

        self.metrics
            .record_clear(result.removed_count, result.errors.len());
        tracing::info!(
            hostname,
            removed = result.removed_count,
            errors = result.errors.len(),
            total = total_cookies,
            "cleared cookies"
        );

        Ok(result)
    }

    /// Cookies that would be sent on requests to `hostname`.
    ///
    /// The store is queried for the hostname and for its parent scope (to
    /// pick up wildcard cookies), the results are de-duplicated by name and
    /// stored domain, then filtered with `Cookie::applies_to`. The queries
    /// only generate candidates; the filter decides.
    async fn select(&self, hostname: &str) -> Result<Vec<Cookie>, ClearError> {
        let mut candidates = self.store.get_all(hostname).await?;
        let exact = candidates.len();

        if let Some(parent) = parent_scope(hostname) {
            candidates.extend(self.store.get_all(parent).await?);
        }

        let mut seen = AHashSet::with_capacity(candidates.len());
        let selected: Vec<Cookie> = candidates
            .into_iter()
            .filter(|cookie| seen.insert(cookie.key()))
            .filter(|cookie| cookie.applies_to(hostname))
            .collect();

        tracing::debug!(
            hostname,
            exact,
            unique = seen.len(),
            selected = selected.len(),
            "selected cookies for removal"
        );

        Ok(selected)
    }

    async fn remove_one(&self, cookie: &Cookie) -> Result<(), String> {
        let request = cookie.removal_request();
        match self.store.remove(&request).await {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(
                    cookie = %cookie.name,
                    url = %request.url,
                    error = %err,
                    "failed to remove cookie"
                );
                Err(format!("{}: {}", cookie.name, err))
            }
        }
    }
}
