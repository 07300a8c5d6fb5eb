//! User profile model types.

use serde::{Deserialize, Serialize};

/// Notification switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    /// Send notifications by email.
    pub email_notifications: bool,
    /// Send push notifications.
    pub push_notifications: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: false,
        }
    }
}

/// User preferences stored alongside the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Notification switches.
    pub notification_settings: NotificationSettings,
    /// Preferred category names, in the order the user added them.
    pub preferred_categories: Vec<String>,
}

/// The profile of the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Preferences.
    pub preferences: Preferences,
}

impl UserProfile {
    /// Create a profile with default preferences.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            preferences: Preferences::default(),
        }
    }
}
