//! Message filtering and ordering.

use std::cmp::Ordering;

use crate::model::{EmailCategory, Message};

/// Order of the message list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recent first.
    #[default]
    Recency,
    /// Subject, ascending.
    Subject,
}

impl SortKey {
    /// Both keys, in picker order.
    pub const ALL: [Self; 2] = [Self::Recency, Self::Subject];

    /// Identifier used by the sort picker.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recency => "date",
            Self::Subject => "subject",
        }
    }

    /// Parse a picker value. Anything but `subject` sorts by date.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("subject") {
            Self::Subject
        } else {
            Self::Recency
        }
    }

    /// Label shown in the picker.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Recency => "Date",
            Self::Subject => "Subject",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Compare two subjects the way a reader expects.
///
/// Case is ignored first; strings that differ only in case put lowercase first.
#[must_use]
pub fn compare_subjects(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

/// Local view preferences applied to the fetched message set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InboxFilter {
    /// Only messages in this category are shown.
    pub category: EmailCategory,
    /// Case-insensitive substring of subject or sender. Empty matches all.
    pub search: String,
    /// Hide read messages.
    pub unread_only: bool,
    /// Ordering.
    pub sort: SortKey,
}

impl InboxFilter {
    /// Filter for `category` with every other option at its default.
    #[must_use]
    pub fn for_category(category: EmailCategory) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    /// Whether `message` passes the filter.
    #[must_use]
    pub fn matches(&self, message: &Message) -> bool {
        self.matches_with(message, &self.search.to_lowercase())
    }

    /// The messages to display, in display order.
    #[must_use]
    pub fn apply(&self, messages: &[Message]) -> Vec<Message> {
        let needle = self.search.to_lowercase();
        let mut shown: Vec<Message> = messages
            .iter()
            .filter(|m| self.matches_with(m, &needle))
            .cloned()
            .collect();

        // Stable sorts: ties keep fetch order.
        match self.sort {
            SortKey::Recency => shown.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
            SortKey::Subject => shown.sort_by(|a, b| compare_subjects(&a.subject, &b.subject)),
        }
        shown
    }

    fn matches_with(&self, message: &Message, needle: &str) -> bool {
        message.category == self.category
            && (self.search.is_empty()
                || message.subject.to_lowercase().contains(needle)
                || message.sender.to_lowercase().contains(needle))
            && (!self.unread_only || !message.is_read)
    }
}
