//! What the user sees when a 431 is detected.

/// Badge glyph shown while action is needed.
pub const ALERT_BADGE_TEXT: &str = "!";
/// Badge background color shown while action is needed.
pub const ALERT_BADGE_COLOR: &str = "#f44336";

/// Badge text and background color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeStyle {
    pub text: String,
    pub color: String,
}

impl Default for BadgeStyle {
    fn default() -> Self {
        Self {
            text: ALERT_BADGE_TEXT.to_string(),
            color: ALERT_BADGE_COLOR.to_string(),
        }
    }
}

/// A notification to hand to the notification surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub icon_url: String,
    /// Host priority hint, 0 (lowest) to 2 (highest)
    pub priority: u8,
}

/// Everything needed to alert on a hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertStyle {
    pub badge: BadgeStyle,
    pub title: String,
    pub icon_url: String,
    pub priority: u8,
    /// Name of the protected application, used in panel messages
    pub app_name: String,
}

impl Default for AlertStyle {
    fn default() -> Self {
        Self {
            badge: BadgeStyle::default(),
            title: "Domo Cookie Clearer".to_string(),
            icon_url: "icon48.png".to_string(),
            priority: 2,
            app_name: "Domo".to_string(),
        }
    }
}

impl AlertStyle {
    /// Notification telling the user about the 431 on `hostname`.
    pub fn notification_for(&self, hostname: &str) -> Notification {
        Notification {
            title: self.title.clone(),
            message: format!(
                "431 error detected on {hostname}. Click the extension icon to clear cookies."
            ),
            icon_url: self.icon_url.clone(),
            priority: self.priority,
        }
    }
}
