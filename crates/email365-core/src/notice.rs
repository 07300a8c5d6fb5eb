//! Transient user-facing notices.
//!
//! Failures never propagate to the rendering layer. Mutation boundaries turn
//! them into notices here and the presentation layer drains the queue.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

const MAX_PENDING: usize = 32;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// An action completed.
    Success,
    /// An action failed.
    Error,
    /// Neutral information.
    Info,
}

/// A single notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text shown to the user.
    pub text: String,
}

impl Notice {
    /// Whether this notice reports a failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.level, NoticeLevel::Error)
    }
}

/// Shared queue of pending notices. Cloning shares the queue.
///
/// When more than a screenful is pending, the oldest are dropped.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    queue: Arc<Mutex<VecDeque<Notice>>>,
}

impl NoticeBoard {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a success notice.
    pub fn success(&self, text: impl Into<String>) {
        let text = text.into();
        tracing::info!(notice = %text, "Success");
        self.push(NoticeLevel::Success, text);
    }

    /// Post an error notice.
    pub fn error(&self, text: impl Into<String>) {
        let text = text.into();
        tracing::warn!(notice = %text, "Error");
        self.push(NoticeLevel::Error, text);
    }

    /// Post an informational notice.
    pub fn info(&self, text: impl Into<String>) {
        let text = text.into();
        tracing::info!(notice = %text, "Info");
        self.push(NoticeLevel::Info, text);
    }

    /// Take every pending notice, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Notice> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    /// Number of pending notices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, level: NoticeLevel, text: String) {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        if queue.len() == MAX_PENDING {
            queue.pop_front();
        }
        queue.push_back(Notice { level, text });
    }
}
