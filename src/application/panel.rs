//! User-triggered clearing from the extension panel.

use crate::application::alerter::Alerter;
use crate::application::eraser::CookieEraser;
use crate::domain::hostname::hostname_from_url;
use serde::Serialize;
use std::time::Duration;

/// Success messages hide after this long.
pub const SUCCESS_AUTO_HIDE: Duration = Duration::from_secs(3);
/// Error and partial-failure messages hide after this long.
pub const ERROR_AUTO_HIDE: Duration = Duration::from_secs(5);
/// Prefix marking a failed operation in the panel.
pub const ERROR_MARKER: &str = "X ";

/// Severity of a panel status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Success,
    Error,
}

/// Terminal status shown after a clear attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelStatus {
    pub level: StatusLevel,
    pub message: String,
    /// Hide the status after this long
    pub auto_hide: Option<Duration>,
}

impl PanelStatus {
    fn success(message: String) -> Self {
        Self {
            level: StatusLevel::Success,
            message,
            auto_hide: Some(SUCCESS_AUTO_HIDE),
        }
    }

    fn error(message: String) -> Self {
        Self {
            level: StatusLevel::Error,
            message,
            auto_hide: Some(ERROR_AUTO_HIDE),
        }
    }

    /// Whether this status reports success.
    pub fn is_success(&self) -> bool {
        self.level == StatusLevel::Success
    }
}

/// Backs the panel's "clear cookies" control.
#[derive(Debug, Clone)]
pub struct ManualClear {
    eraser: CookieEraser,
    alerter: Alerter,
}

impl ManualClear {
    /// Create a panel controller.
    pub fn new(eraser: CookieEraser, alerter: Alerter) -> Self {
        Self { eraser, alerter }
    }

    /// The panel was opened; the pending alert has been seen.
    pub async fn opened(&self) {
        self.alerter.clear_badge().await;
    }

    /// Clear cookies for the active tab.
    ///
    /// `tab_url` is `None` when the active tab could not be determined.
    /// Always returns a terminal status.
    pub async fn clear_active_tab(&self, tab_url: Option<&str>) -> PanelStatus {
        let Some(tab_url) = tab_url else {
            return PanelStatus::error(format!("{ERROR_MARKER}Could not get active tab"));
        };

        let hostname = match hostname_from_url(tab_url) {
            Ok(hostname) => hostname,
            Err(err) => return PanelStatus::error(format!("{ERROR_MARKER}Error: {err}")),
        };

        if !self.eraser.scope().is_in_scope(&hostname) {
            return PanelStatus::error(format!(
                "{ERROR_MARKER}Current tab is not a {} instance\n({})",
                self.alerter.style().app_name,
                hostname
            ));
        }

        match self.eraser.clear_cookies(&hostname).await {
            Ok(result) if result.is_complete() => {
                self.alerter.clear_badge().await;
                PanelStatus::success(result.summary(&hostname))
            }
            Ok(result) => PanelStatus::error(result.summary(&hostname)),
            Err(err) => PanelStatus::error(format!("{ERROR_MARKER}Error: {err}")),
        }
    }
}
