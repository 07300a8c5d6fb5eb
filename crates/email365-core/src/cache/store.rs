//! In-memory query cache.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use super::model::{CacheEvent, QueryKey};

const EVENT_CAPACITY: usize = 64;

type Value = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
struct Entry {
    value: Option<Value>,
    stale: bool,
    /// Ticket of the fetch allowed to write, if one is in flight.
    in_flight: Option<u64>,
    /// A fetch has finished at least once, successfully or not.
    settled: bool,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<QueryKey, Entry>,
    next_ticket: u64,
}

impl Inner {
    fn entry(&mut self, key: QueryKey) -> &mut Entry {
        self.entries.entry(key).or_default()
    }
}

/// Proof that a fetch was started; needed to store its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    key: QueryKey,
    id: u64,
}

impl FetchTicket {
    /// Key being fetched.
    #[must_use]
    pub const fn key(&self) -> QueryKey {
        self.key
    }
}

/// Key-value store of fetched records with change notification.
///
/// Values are stored type-erased and read back with the type they were
/// written with. Fetch results are only accepted from the most recent fetch of
/// a key; cancelling, setting or clearing the key orphans any fetch in flight.
pub struct QueryCache {
    inner: Mutex<Inner>,
    events: broadcast::Sender<CacheEvent>,
}

impl QueryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Mutex::new(Inner::default()),
            events,
        }
    }

    /// Subscribe to change events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    /// Cached value for `key`, stale or not.
    #[must_use]
    pub fn get<T>(&self, key: QueryKey) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let inner = self.lock();
        inner
            .entries
            .get(&key)
            .and_then(|e| e.value.as_ref())
            .and_then(|v| v.downcast_ref::<T>())
            .cloned()
    }

    /// Cached value for `key` unless it has been invalidated.
    #[must_use]
    pub fn get_fresh<T>(&self, key: QueryKey) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        if self.is_stale(key) {
            return None;
        }
        self.get(key)
    }

    /// Store `value` directly, superseding any fetch in flight.
    pub fn set<T>(&self, key: QueryKey, value: T)
    where
        T: Send + Sync + 'static,
    {
        {
            let mut inner = self.lock();
            let entry = inner.entry(key);
            entry.value = Some(Arc::new(value));
            entry.stale = false;
            entry.in_flight = None;
            entry.settled = true;
        }
        tracing::trace!(%key, "Cache set");
        self.publish(CacheEvent::Updated(key));
    }

    /// Mark a fetch of `key` as started.
    ///
    /// A later `begin_fetch` of the same key supersedes this one.
    pub fn begin_fetch(&self, key: QueryKey) -> FetchTicket {
        let mut inner = self.lock();
        inner.next_ticket += 1;
        let id = inner.next_ticket;
        inner.entry(key).in_flight = Some(id);
        FetchTicket { key, id }
    }

    /// Store the result of a fetch.
    ///
    /// Returns `false`, leaving the cache untouched, when the fetch was
    /// cancelled or superseded.
    pub fn complete_fetch<T>(&self, ticket: FetchTicket, value: T) -> bool
    where
        T: Send + Sync + 'static,
    {
        {
            let mut inner = self.lock();
            let entry = inner.entry(ticket.key);
            if entry.in_flight != Some(ticket.id) {
                tracing::debug!(key = %ticket.key, "Discarding result of cancelled fetch");
                return false;
            }
            entry.value = Some(Arc::new(value));
            entry.stale = false;
            entry.in_flight = None;
            entry.settled = true;
        }
        self.publish(CacheEvent::Updated(ticket.key));
        true
    }

    /// Record that a fetch failed. The previous value, if any, is kept.
    pub fn fail_fetch(&self, ticket: FetchTicket) {
        let mut inner = self.lock();
        let entry = inner.entry(ticket.key);
        if entry.in_flight == Some(ticket.id) {
            entry.in_flight = None;
            entry.settled = true;
        }
    }

    /// Suspend the fetch of `key` in flight, if any; its result will be dropped.
    pub fn cancel(&self, key: QueryKey) {
        let mut inner = self.lock();
        if let Some(entry) = inner.entries.get_mut(&key) {
            entry.in_flight = None;
        }
    }

    /// Mark `key` stale so the next read fetches it again.
    pub fn invalidate(&self, key: QueryKey) {
        {
            let mut inner = self.lock();
            inner.entry(key).stale = true;
        }
        tracing::trace!(%key, "Cache invalidated");
        self.publish(CacheEvent::Invalidated(key));
    }

    /// Whether `key` has been invalidated since it was last stored.
    #[must_use]
    pub fn is_stale(&self, key: QueryKey) -> bool {
        self.lock().entries.get(&key).is_some_and(|e| e.stale)
    }

    /// Whether a fetch of `key` is in flight.
    #[must_use]
    pub fn is_fetching(&self, key: QueryKey) -> bool {
        self.lock()
            .entries
            .get(&key)
            .is_some_and(|e| e.in_flight.is_some())
    }

    /// Whether `key` has a value or a finished fetch.
    #[must_use]
    pub fn is_settled(&self, key: QueryKey) -> bool {
        self.lock().entries.get(&key).is_some_and(|e| e.settled)
    }

    /// Drop every entry. Fetches in flight are orphaned.
    pub fn clear(&self) {
        self.lock().entries.clear();
        tracing::debug!("Cache cleared");
        self.publish(CacheEvent::Cleared);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: CacheEvent) {
        // No receivers is not an error.
        let _ = self.events.send(event);
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("QueryCache")
            .field("keys", &inner.entries.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_typed() {
        let cache = QueryCache::new();
        cache.set(QueryKey::SortingActive, true);

        assert_eq!(cache.get::<bool>(QueryKey::SortingActive), Some(true));
        assert_eq!(cache.get::<String>(QueryKey::SortingActive), None);
        assert_eq!(cache.get::<bool>(QueryKey::AccountLinked), None);
    }

    #[test]
    fn test_invalidate_hides_fresh_value() {
        let cache = QueryCache::new();
        cache.set(QueryKey::Emails, vec![1u8]);
        cache.invalidate(QueryKey::Emails);

        assert!(cache.is_stale(QueryKey::Emails));
        assert_eq!(cache.get_fresh::<Vec<u8>>(QueryKey::Emails), None);
        assert_eq!(cache.get::<Vec<u8>>(QueryKey::Emails), Some(vec![1]));
    }

    #[test]
    fn test_cancelled_fetch_is_discarded() {
        let cache = QueryCache::new();
        let ticket = cache.begin_fetch(QueryKey::SortingActive);
        assert!(cache.is_fetching(QueryKey::SortingActive));

        cache.cancel(QueryKey::SortingActive);
        assert!(!cache.complete_fetch(ticket, true));
        assert_eq!(cache.get::<bool>(QueryKey::SortingActive), None);
    }

    #[test]
    fn test_set_supersedes_fetch() {
        let cache = QueryCache::new();
        let ticket = cache.begin_fetch(QueryKey::AccountLinked);
        cache.set(QueryKey::AccountLinked, true);

        assert!(!cache.complete_fetch(ticket, false));
        assert_eq!(cache.get::<bool>(QueryKey::AccountLinked), Some(true));
    }

    #[test]
    fn test_latest_fetch_wins() {
        let cache = QueryCache::new();
        let first = cache.begin_fetch(QueryKey::Emails);
        let second = cache.begin_fetch(QueryKey::Emails);

        assert!(cache.complete_fetch(second, 2u32));
        assert!(!cache.complete_fetch(first, 1u32));
        assert_eq!(cache.get::<u32>(QueryKey::Emails), Some(2));
    }

    #[test]
    fn test_clear_orphans_in_flight_fetch() {
        let cache = QueryCache::new();
        let ticket = cache.begin_fetch(QueryKey::CurrentUserProfile);
        cache.clear();

        assert!(!cache.complete_fetch(ticket, 7u8));
        assert!(!cache.is_settled(QueryKey::CurrentUserProfile));
    }

    #[test]
    fn test_failed_fetch_settles_without_value() {
        let cache = QueryCache::new();
        let ticket = cache.begin_fetch(QueryKey::HelpQuestions);
        cache.fail_fetch(ticket);

        assert!(cache.is_settled(QueryKey::HelpQuestions));
        assert!(!cache.is_fetching(QueryKey::HelpQuestions));
    }

    #[test]
    fn test_events_published() {
        let cache = QueryCache::new();
        let mut rx = cache.subscribe();

        cache.set(QueryKey::Emails, 1u8);
        cache.invalidate(QueryKey::Emails);
        cache.clear();

        assert_eq!(rx.try_recv().unwrap(), CacheEvent::Updated(QueryKey::Emails));
        assert_eq!(
            rx.try_recv().unwrap(),
            CacheEvent::Invalidated(QueryKey::Emails)
        );
        assert_eq!(rx.try_recv().unwrap(), CacheEvent::Cleared);
        assert!(CacheEvent::Cleared.affects(QueryKey::DemoData));
        assert!(!CacheEvent::Updated(QueryKey::Emails).affects(QueryKey::DemoData));
    }
}
