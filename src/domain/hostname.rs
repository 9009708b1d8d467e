//! Hostname extraction from request and tab URLs.

use url::Url;

/// Error returned when a URL does not yield a hostname.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostnameError {
    /// The string is not a valid absolute URL
    #[error("malformed URL: {0}")]
    Malformed(#[from] url::ParseError),
    /// The URL parsed but has no host (`about:blank`, `data:` URLs)
    #[error("URL has no host: {0}")]
    MissingHost(String),
}

/// Extract the hostname from `url`.
///
/// Hosts of special schemes (`http`, `https`) come back lower-cased, which is
/// the form the scope predicate expects.
pub fn hostname_from_url(url: &str) -> Result<String, HostnameError> {
    let parsed = Url::parse(url)?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(host.to_string()),
        _ => Err(HostnameError::MissingHost(url.to_string())),
    }
}
