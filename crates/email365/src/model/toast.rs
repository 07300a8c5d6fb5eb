//! Toast stack fed from the core notice board.

use std::time::{Duration, Instant};

use email365_core::Notice;

/// How long a toast stays on screen.
const TOAST_LIFETIME: Duration = Duration::from_secs(4);

/// At most this many toasts are visible; older ones are dropped first.
const MAX_VISIBLE: usize = 4;

/// A notice on screen.
#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    shown_at: Instant,
}

/// Visible toasts, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    /// Show `notices`, starting their timers at `now`.
    pub fn push_all(&mut self, notices: impl IntoIterator<Item = Notice>, now: Instant) {
        self.items.extend(notices.into_iter().map(|notice| Toast {
            notice,
            shown_at: now,
        }));
        let overflow = self.items.len().saturating_sub(MAX_VISIBLE);
        self.items.drain(..overflow);
    }

    /// Drop toasts older than their lifetime.
    pub fn expire(&mut self, now: Instant) {
        self.items
            .retain(|t| now.saturating_duration_since(t.shown_at) < TOAST_LIFETIME);
    }

    /// Close the toast at `index`.
    pub fn dismiss(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use email365_core::NoticeLevel;

    fn notice(text: &str) -> Notice {
        Notice {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    #[test]
    fn test_expire_after_lifetime() {
        let start = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push_all([notice("a")], start);

        toasts.expire(start + Duration::from_secs(3));
        assert!(!toasts.is_empty());

        toasts.expire(start + TOAST_LIFETIME);
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let now = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push_all(["1", "2", "3", "4", "5"].map(notice), now);

        let texts: Vec<_> = toasts.iter().map(|t| t.notice.text.as_str()).collect();
        assert_eq!(texts, vec!["2", "3", "4", "5"]);
    }

    #[test]
    fn test_dismiss_out_of_range_is_ignored() {
        let mut toasts = Toasts::default();
        toasts.push_all([notice("a")], Instant::now());
        toasts.dismiss(3);
        toasts.dismiss(0);
        assert!(toasts.is_empty());
    }
}
