//! Inbox view state: filter preferences plus the selected message.

use super::filter::{InboxFilter, SortKey};
use crate::model::{EmailCategory, Message, MessageId};
use crate::query::QueryState;

/// What the inbox should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboxSnapshot {
    /// Messages have not been fetched yet.
    Loading,
    /// Filtered messages and the selected one, if still shown.
    Ready {
        /// Messages in display order.
        messages: Vec<Message>,
        /// The selected message, always one of `messages`.
        selected: Option<Message>,
    },
}

impl InboxSnapshot {
    /// Whether the fetch is still outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Displayed messages; empty while loading.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        match self {
            Self::Loading => &[],
            Self::Ready { messages, .. } => messages,
        }
    }

    /// Selected message, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&Message> {
        match self {
            Self::Loading => None,
            Self::Ready { selected, .. } => selected.as_ref(),
        }
    }
}

/// Local, ephemeral inbox state.
///
/// Nothing here touches the network: changing the filter or the selection only
/// changes what [`present`](Self::present) derives from already-fetched data.
#[derive(Debug, Clone, Default)]
pub struct InboxView {
    filter: InboxFilter,
    selected: Option<MessageId>,
}

impl InboxView {
    /// View of `category` with default options.
    #[must_use]
    pub fn new(category: EmailCategory) -> Self {
        Self {
            filter: InboxFilter::for_category(category),
            selected: None,
        }
    }

    /// Current filter.
    #[must_use]
    pub const fn filter(&self) -> &InboxFilter {
        &self.filter
    }

    /// Currently selected id.
    #[must_use]
    pub const fn selected(&self) -> Option<&MessageId> {
        self.selected.as_ref()
    }

    /// Switch category (navigation).
    pub fn set_category(&mut self, category: EmailCategory) {
        self.filter.category = category;
    }

    /// Replace the search text.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    /// Show only unread messages, or all.
    pub const fn set_unread_only(&mut self, unread_only: bool) {
        self.filter.unread_only = unread_only;
    }

    /// Flip the unread-only flag.
    pub const fn toggle_unread_only(&mut self) {
        self.filter.unread_only = !self.filter.unread_only;
    }

    /// Change the ordering.
    pub const fn set_sort(&mut self, sort: SortKey) {
        self.filter.sort = sort;
    }

    /// Select a message, or clear the selection. Purely local.
    pub fn select(&mut self, id: Option<MessageId>) {
        self.selected = id;
    }

    /// Derive what to render from the current messages query.
    ///
    /// A selection that is not in the filtered result is cleared. While the
    /// query is loading the selection is left alone.
    pub fn present(&mut self, messages: &QueryState<Vec<Message>>) -> InboxSnapshot {
        let QueryState::Ready(all) = messages else {
            return InboxSnapshot::Loading;
        };

        let shown = self.filter.apply(all);
        let selected = self.reconcile(&shown);
        InboxSnapshot::Ready {
            messages: shown,
            selected,
        }
    }

    /// Drop the selection if it is not among `shown`; return the selected message.
    fn reconcile(&mut self, shown: &[Message]) -> Option<Message> {
        let id = self.selected.as_ref()?;
        let found = shown.iter().find(|m| &m.id == id).cloned();
        if found.is_none() {
            tracing::trace!(%id, "Selected message no longer shown");
            self.selected = None;
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Message> {
        vec![
            Message::new("1", "alice@x.io", "Budget", EmailCategory::Priority, 10),
            Message::new("2", "bob@x.io", "Standup", EmailCategory::Priority, 20).read(),
            Message::new("3", "feed@x.io", "Weekly digest", EmailCategory::Forums, 30),
        ]
    }

    #[test]
    fn test_loading_is_distinct_from_empty() {
        let mut view = InboxView::new(EmailCategory::Priority);
        assert!(view.present(&QueryState::Loading).is_loading());

        let empty = view.present(&QueryState::Ready(Vec::new()));
        assert!(!empty.is_loading());
        assert!(empty.messages().is_empty());
    }

    #[test]
    fn test_selection_survives_when_still_shown() {
        let mut view = InboxView::new(EmailCategory::Priority);
        view.select(Some(MessageId::new("1")));

        let snapshot = view.present(&QueryState::Ready(sample()));
        assert_eq!(snapshot.selected().map(|m| m.id.as_str()), Some("1"));
        assert!(view.selected().is_some());
    }

    #[test]
    fn test_selection_cleared_by_search() {
        let mut view = InboxView::new(EmailCategory::Priority);
        view.select(Some(MessageId::new("1")));
        view.set_search("standup");

        let snapshot = view.present(&QueryState::Ready(sample()));
        assert!(snapshot.selected().is_none());
        assert!(view.selected().is_none());

        // Clearing the search does not bring the old selection back.
        view.set_search("");
        assert!(view.present(&QueryState::Ready(sample())).selected().is_none());
    }

    #[test]
    fn test_selection_cleared_by_unread_filter() {
        let mut view = InboxView::new(EmailCategory::Priority);
        view.select(Some(MessageId::new("2")));
        view.toggle_unread_only();

        view.present(&QueryState::Ready(sample()));
        assert!(view.selected().is_none());
    }

    #[test]
    fn test_selection_kept_while_loading() {
        let mut view = InboxView::new(EmailCategory::Priority);
        view.select(Some(MessageId::new("1")));

        view.present(&QueryState::Loading);
        assert!(view.selected().is_some());
    }

    #[test]
    fn test_category_switch_clears_selection() {
        let mut view = InboxView::new(EmailCategory::Priority);
        view.select(Some(MessageId::new("1")));
        view.set_category(EmailCategory::Forums);

        let snapshot = view.present(&QueryState::Ready(sample()));
        assert_eq!(snapshot.messages().len(), 1);
        assert!(snapshot.selected().is_none());
    }
}
