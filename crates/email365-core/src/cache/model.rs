//! Cache keys and change events.

/// Logical cache key, one per remote read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// The caller's profile.
    CurrentUserProfile,
    /// The caller's messages.
    Emails,
    /// Label definitions.
    Categories,
    /// Sender sorting rules.
    SortingRules,
    /// Backend category suggestions.
    SuggestedCategories,
    /// Preferred category names.
    PreferredCategories,
    /// Public demo dataset.
    DemoData,
    /// Help-center entries.
    HelpQuestions,
    /// Automatic sorting flag.
    SortingActive,
    /// External account link flag.
    AccountLinked,
}

impl QueryKey {
    /// Every key.
    pub const ALL: [Self; 10] = [
        Self::CurrentUserProfile,
        Self::Emails,
        Self::Categories,
        Self::SortingRules,
        Self::SuggestedCategories,
        Self::PreferredCategories,
        Self::DemoData,
        Self::HelpQuestions,
        Self::SortingActive,
        Self::AccountLinked,
    ];

    /// Stable name, used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentUserProfile => "currentUserProfile",
            Self::Emails => "emails",
            Self::Categories => "categories",
            Self::SortingRules => "sortingRules",
            Self::SuggestedCategories => "suggestedCategories",
            Self::PreferredCategories => "preferredCategories",
            Self::DemoData => "demoData",
            Self::HelpQuestions => "helpQuestions",
            Self::SortingActive => "sortingActive",
            Self::AccountLinked => "accountLinked",
        }
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change notification published to cache subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEvent {
    /// A new value was stored.
    Updated(QueryKey),
    /// The value was marked stale.
    Invalidated(QueryKey),
    /// Every entry was dropped.
    Cleared,
}

impl CacheEvent {
    /// The key this event concerns, or `None` for [`CacheEvent::Cleared`].
    #[must_use]
    pub const fn key(&self) -> Option<QueryKey> {
        match self {
            Self::Updated(key) | Self::Invalidated(key) => Some(*key),
            Self::Cleared => None,
        }
    }

    /// Whether subscribers interested in `key` should re-read.
    #[must_use]
    pub fn affects(&self, key: QueryKey) -> bool {
        self.key().is_none_or(|k| k == key)
    }
}
