//! Read state exposed to presentation.

/// Result of reading a query for display.
///
/// `Loading` is distinct from an empty `Ready` so views can tell "no data yet"
/// apart from "zero matches".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState<T> {
    /// The first fetch has not finished.
    Loading,
    /// Data is available, possibly stale while a refetch runs.
    Ready(T),
}

impl<T> QueryState<T> {
    /// Whether the first fetch is still outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The data, if ready.
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Loading => None,
            Self::Ready(value) => Some(value),
        }
    }

    /// Transform the ready value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        match self {
            Self::Loading => QueryState::Loading,
            Self::Ready(value) => QueryState::Ready(f(value)),
        }
    }
}

impl<T: Default> QueryState<T> {
    /// The data, or the default while loading.
    #[must_use]
    pub fn unwrap_or_default(self) -> T {
        match self {
            Self::Loading => T::default(),
            Self::Ready(value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_is_not_empty() {
        let loading: QueryState<Vec<u8>> = QueryState::Loading;
        let empty = QueryState::Ready(Vec::<u8>::new());

        assert!(loading.is_loading());
        assert_ne!(loading, empty);
        assert_eq!(empty.ready().map(Vec::len), Some(0));
    }

    #[test]
    fn test_map_preserves_loading() {
        let loading: QueryState<u8> = QueryState::Loading;
        assert!(loading.map(u32::from).is_loading());
        assert_eq!(QueryState::Ready(2u8).map(u32::from), QueryState::Ready(2u32));
    }
}
