//! Outcome of one cookie-clearing run.

use serde::Serialize;

/// Number of removal errors shown to the user.
pub const DISPLAYED_ERROR_LIMIT: usize = 3;

/// Result of clearing the cookies scoped to one hostname.
///
/// Serializes as `{removedCount, errors, totalCookies}` for the host panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResult {
    /// Cookies the store confirmed removed
    pub removed_count: usize,
    /// One `"name: reason"` entry per failed removal
    pub errors: Vec<String>,
    /// Size of the selected set
    pub total_cookies: usize,
}

impl ClearResult {
    /// True when no removal failed.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// The first `limit` errors, newline-joined.
    pub fn displayed_errors(&self, limit: usize) -> String {
        self.errors
            .iter()
            .take(limit)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// User-facing summary for `hostname`.
    ///
    /// ```
    /// use cookie_clearer::ClearResult;
    ///
    /// let result = ClearResult { removed_count: 1, errors: vec![], total_cookies: 1 };
    /// assert_eq!(result.summary("acme.domo.com"), "Cleared 1 cookie for\nacme.domo.com");
    /// ```
    pub fn summary(&self, hostname: &str) -> String {
        if self.is_complete() {
            format!(
                "Cleared {} {} for\n{}",
                self.removed_count,
                plural(self.removed_count, "cookie"),
                hostname
            )
        } else {
            format!(
                "Cleared {}, {} {}:\n{}",
                self.removed_count,
                self.errors.len(),
                plural(self.errors.len(), "error"),
                self.displayed_errors(DISPLAYED_ERROR_LIMIT)
            )
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_without_errors() {
        let result = ClearResult {
            removed_count: 4,
            errors: vec![],
            total_cookies: 4,
        };
        assert_eq!(result.summary("acme.domo.com"), "Cleared 4 cookies for\nacme.domo.com");

        let empty = ClearResult::default();
        assert_eq!(empty.summary("acme.domo.com"), "Cleared 0 cookies for\nacme.domo.com");
    }

    #[test]
    fn test_summary_truncates_errors() {
        let result = ClearResult {
            removed_count: 1,
            errors: (1..=5).map(|i| format!("c{i}: denied")).collect(),
            total_cookies: 6,
        };
        assert_eq!(
            result.summary("acme.domo.com"),
            "Cleared 1, 5 errors:\nc1: denied\nc2: denied\nc3: denied"
        );
    }

    #[test]
    fn test_single_error_wording() {
        let result = ClearResult {
            removed_count: 0,
            errors: vec!["sid: denied".to_string()],
            total_cookies: 1,
        };
        assert_eq!(result.summary("acme.domo.com"), "Cleared 0, 1 error:\nsid: denied");
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = ClearResult {
            removed_count: 2,
            errors: vec![],
            total_cookies: 2,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"removedCount": 2, "errors": [], "totalCookies": 2})
        );
    }
}
