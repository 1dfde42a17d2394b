use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for user-visible notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "ok",
            NotificationLevel::Warning => "warn",
            NotificationLevel::Error => "error",
        };
        write!(f, "{label}")
    }
}

/// A short message surfaced to the user, toast-style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
}

impl Notification {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            text: text.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_level() {
        assert_eq!(Notification::info("a").level, NotificationLevel::Info);
        assert_eq!(Notification::success("a").level, NotificationLevel::Success);
        assert_eq!(Notification::warning("a").level, NotificationLevel::Warning);
        assert_eq!(Notification::error("a").level, NotificationLevel::Error);
    }

    #[test]
    fn display_prefixes_level() {
        let n = Notification::error("could not fetch a reply");
        assert_eq!(n.to_string(), "[error] could not fetch a reply");

        let n = Notification::success("copied");
        assert_eq!(n.to_string(), "[ok] copied");
    }
}
