//! Reference data served by the backend: labels, rules, suggestions, help.

use serde::{Deserialize, Serialize};

use super::message::{EmailCategory, Message};

/// A user-defined label with a display colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLabel {
    /// Label identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// CSS-style colour, e.g. `#3b82f6`.
    pub color: String,
}

/// Routes mail from matching senders into a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortingRule {
    /// Rule identifier.
    pub id: String,
    /// Sender address or domain pattern.
    pub sender_pattern: String,
    /// Target category.
    pub category: EmailCategory,
}

/// A category the backend proposes for the preference set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedCategory {
    /// Suggestion identifier.
    pub id: String,
    /// Category name.
    pub name: String,
    /// Short explanation shown under the name.
    pub description: String,
}

/// A help-center entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpQuestion {
    /// Entry identifier.
    pub id: String,
    /// The question.
    pub question: String,
    /// The answer.
    pub answer: String,
    /// Group heading the entry is listed under.
    pub category: String,
}

/// Sample dataset rendered by the public demo page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoData {
    /// Demo messages.
    pub emails: Vec<Message>,
}
