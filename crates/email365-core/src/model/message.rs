//! Message model types.

use serde::{Deserialize, Serialize};

/// Unique identifier for a message, assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl MessageId {
    /// Create a new message ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category label attached to every message.
///
/// The lowercase form doubles as the navigation segment (`/category/<id>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailCategory {
    /// Everything not routed elsewhere.
    #[default]
    Inbox,
    /// Mail from people that matter.
    Priority,
    /// Social networks.
    Social,
    /// Deals and marketing.
    Promotions,
    /// Receipts, statements and notifications.
    Updates,
    /// Mailing lists and discussion groups.
    Forums,
    /// Junk.
    Spam,
    /// Read and put away.
    Archive,
}

impl EmailCategory {
    /// Every category in sidebar order.
    pub const ALL: [Self; 8] = [
        Self::Inbox,
        Self::Priority,
        Self::Social,
        Self::Promotions,
        Self::Updates,
        Self::Forums,
        Self::Spam,
        Self::Archive,
    ];

    /// Convert to the lowercase identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Priority => "priority",
            Self::Social => "social",
            Self::Promotions => "promotions",
            Self::Updates => "updates",
            Self::Forums => "forums",
            Self::Spam => "spam",
            Self::Archive => "archive",
        }
    }

    /// Parse from an identifier. Unknown values fall back to `Inbox`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "priority" => Self::Priority,
            "social" => Self::Social,
            "promotions" => Self::Promotions,
            "updates" => Self::Updates,
            "forums" => Self::Forums,
            "spam" => Self::Spam,
            "archive" => Self::Archive,
            _ => Self::Inbox,
        }
    }

    /// Human-readable display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Inbox => "Inbox",
            Self::Priority => "Priority",
            Self::Social => "Social",
            Self::Promotions => "Promotions",
            Self::Updates => "Updates",
            Self::Forums => "Forums",
            Self::Spam => "Spam",
            Self::Archive => "Archive",
        }
    }
}

impl std::str::FromStr for EmailCategory {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl std::fmt::Display for EmailCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A message as returned by the backend.
///
/// Only `category`, `is_read` and `is_starred` ever change, and only through
/// explicit remote calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier.
    pub id: MessageId,
    /// Sender address.
    pub sender: String,
    /// Subject line.
    pub subject: String,
    /// Short body preview.
    pub snippet: String,
    /// Category label.
    pub category: EmailCategory,
    /// Receive time in nanoseconds since the Unix epoch.
    pub timestamp: u64,
    /// Whether the message has been read.
    pub is_read: bool,
    /// Whether the message is starred.
    pub is_starred: bool,
    /// Whether the message carries attachments.
    pub has_attachments: bool,
}

impl Message {
    /// Create an unread, unstarred message without attachments.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        sender: impl Into<String>,
        subject: impl Into<String>,
        category: EmailCategory,
        timestamp: u64,
    ) -> Self {
        Self {
            id: MessageId::new(id),
            sender: sender.into(),
            subject: subject.into(),
            snippet: String::new(),
            category,
            timestamp,
            is_read: false,
            is_starred: false,
            has_attachments: false,
        }
    }

    /// Set the snippet.
    #[must_use]
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    /// Mark as read.
    #[must_use]
    pub const fn read(mut self) -> Self {
        self.is_read = true;
        self
    }

    /// Mark as starred.
    #[must_use]
    pub const fn starred(mut self) -> Self {
        self.is_starred = true;
        self
    }

    /// Flag as carrying attachments.
    #[must_use]
    pub const fn with_attachments(mut self) -> Self {
        self.has_attachments = true;
        self
    }

    /// Receive time in whole seconds.
    #[must_use]
    pub const fn timestamp_secs(&self) -> u64 {
        self.timestamp / 1_000_000_000
    }
}
