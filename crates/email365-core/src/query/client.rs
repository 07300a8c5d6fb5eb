//! Typed reads and writes over the actor, bound to cache keys.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;

use super::state::QueryState;
use crate::actor::{Actor, ActorHandle};
use crate::cache::{QueryCache, QueryKey};
use crate::model::{
    CategoryLabel, DemoData, EmailCategory, HelpQuestion, Message, MessageId, SortingRule,
    SuggestedCategory, UserProfile,
};
use crate::notice::NoticeBoard;
use crate::{Error, Result};

/// One of the two server-owned booleans with an optimistic toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleFlag {
    /// Automatic sorting on the home page.
    SortingActive,
    /// External (Google) account link in settings.
    AccountLinked,
}

impl ToggleFlag {
    /// Cache key holding the flag.
    #[must_use]
    pub const fn key(self) -> QueryKey {
        match self {
            Self::SortingActive => QueryKey::SortingActive,
            Self::AccountLinked => QueryKey::AccountLinked,
        }
    }

    /// Prefix of the notice shown when a toggle fails.
    #[must_use]
    pub const fn failure_prefix(self) -> &'static str {
        match self {
            Self::SortingActive => "Failed to update toggle state",
            Self::AccountLinked => "Failed to update link state",
        }
    }
}

/// Remote data access layer.
///
/// Reads go through the cache; writes go to the actor and, once acknowledged,
/// invalidate and refetch the keys they affect. Write failures become error
/// notices and are also returned to the caller.
pub struct DataClient<A> {
    actor: ActorHandle<A>,
    cache: Arc<QueryCache>,
    notices: NoticeBoard,
}

impl<A: Actor> DataClient<A> {
    /// Create a client with no actor attached yet.
    #[must_use]
    pub fn new(cache: Arc<QueryCache>, notices: NoticeBoard) -> Self {
        Self {
            actor: ActorHandle::empty(),
            cache,
            notices,
        }
    }

    /// Create a client whose actor is ready immediately.
    #[must_use]
    pub fn with_actor(actor: Arc<A>, cache: Arc<QueryCache>, notices: NoticeBoard) -> Self {
        Self {
            actor: ActorHandle::ready(actor),
            cache,
            notices,
        }
    }

    /// Attach the actor once it is ready.
    pub fn attach(&self, actor: Arc<A>) {
        tracing::debug!("Actor attached");
        self.actor.set(actor);
    }

    /// Detach the actor.
    pub fn detach(&self) {
        tracing::debug!("Actor detached");
        self.actor.clear();
    }

    /// Whether an actor is attached.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.actor.is_ready()
    }

    /// The shared cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// The notice board failures are reported to.
    #[must_use]
    pub const fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Current display state of `key`, without fetching.
    ///
    /// A cached value is shown even while stale. Without an actor, or after a
    /// failed first fetch, the default is shown instead of a loading state.
    #[must_use]
    pub fn state<T>(&self, key: QueryKey) -> QueryState<T>
    where
        T: Clone + Default + Send + Sync + 'static,
    {
        if let Some(value) = self.cache.get::<T>(key) {
            return QueryState::Ready(value);
        }
        if !self.actor.is_ready() || self.cache.is_settled(key) {
            return QueryState::Ready(T::default());
        }
        QueryState::Loading
    }

    // Reads

    /// The caller's profile, or `None` when none has been saved.
    ///
    /// # Errors
    ///
    /// Returns the remote error if the fetch fails.
    pub async fn caller_user_profile(&self) -> Result<Option<UserProfile>> {
        let key = QueryKey::CurrentUserProfile;
        if let Some(cached) = self.cache.get_fresh(key) {
            return Ok(cached);
        }
        let Some(actor) = self.actor.get() else {
            return Ok(None);
        };
        self.fetch(key, actor.get_caller_user_profile()).await
    }

    /// The caller's messages.
    ///
    /// # Errors
    ///
    /// Returns the remote error if the fetch fails.
    pub async fn emails(&self) -> Result<Vec<Message>> {
        let key = QueryKey::Emails;
        if let Some(cached) = self.cache.get_fresh(key) {
            return Ok(cached);
        }
        let Some(actor) = self.actor.get() else {
            return Ok(Vec::new());
        };
        self.fetch(key, actor.get_emails()).await
    }

    /// Sender sorting rules.
    ///
    /// # Errors
    ///
    /// Returns the remote error if the fetch fails.
    pub async fn sorting_rules(&self) -> Result<Vec<SortingRule>> {
        let key = QueryKey::SortingRules;
        if let Some(cached) = self.cache.get_fresh(key) {
            return Ok(cached);
        }
        let Some(actor) = self.actor.get() else {
            return Ok(Vec::new());
        };
        self.fetch(key, actor.get_sorting_rules()).await
    }

    /// Label definitions.
    ///
    /// # Errors
    ///
    /// Returns the remote error if the fetch fails.
    pub async fn categories(&self) -> Result<Vec<CategoryLabel>> {
        let key = QueryKey::Categories;
        if let Some(cached) = self.cache.get_fresh(key) {
            return Ok(cached);
        }
        let Some(actor) = self.actor.get() else {
            return Ok(Vec::new());
        };
        self.fetch(key, actor.get_categories()).await
    }

    /// Help-center entries.
    ///
    /// # Errors
    ///
    /// Returns the remote error if the fetch fails.
    pub async fn help_questions(&self) -> Result<Vec<HelpQuestion>> {
        let key = QueryKey::HelpQuestions;
        if let Some(cached) = self.cache.get_fresh(key) {
            return Ok(cached);
        }
        let Some(actor) = self.actor.get() else {
            return Ok(Vec::new());
        };
        self.fetch(key, actor.get_help_questions()).await
    }

    /// The public demo dataset.
    ///
    /// Unlike other reads this does not degrade without an actor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActorUnavailable`] when no actor is attached, or the
    /// remote error if the fetch fails.
    pub async fn demo_data(&self) -> Result<DemoData> {
        let key = QueryKey::DemoData;
        if let Some(cached) = self.cache.get_fresh(key) {
            return Ok(cached);
        }
        let actor = self.actor.get().ok_or(Error::ActorUnavailable)?;
        self.fetch(key, actor.get_demo_data()).await
    }

    /// Categories suggested by the backend.
    ///
    /// # Errors
    ///
    /// Returns the remote error if the fetch fails.
    pub async fn suggested_categories(&self) -> Result<Vec<SuggestedCategory>> {
        let key = QueryKey::SuggestedCategories;
        if let Some(cached) = self.cache.get_fresh(key) {
            return Ok(cached);
        }
        let Some(actor) = self.actor.get() else {
            return Ok(Vec::new());
        };
        self.fetch(key, actor.get_suggested_categories()).await
    }

    /// Preferred category names.
    ///
    /// # Errors
    ///
    /// Returns the remote error if the fetch fails.
    pub async fn preferred_categories(&self) -> Result<Vec<String>> {
        let key = QueryKey::PreferredCategories;
        if let Some(cached) = self.cache.get_fresh(key) {
            return Ok(cached);
        }
        let Some(actor) = self.actor.get() else {
            return Ok(Vec::new());
        };
        self.fetch(key, actor.get_preferred_categories()).await
    }

    /// Current value of a toggle flag.
    ///
    /// # Errors
    ///
    /// Returns the remote error if the fetch fails.
    pub async fn toggle_state(&self, flag: ToggleFlag) -> Result<bool> {
        let key = flag.key();
        if let Some(cached) = self.cache.get_fresh(key) {
            return Ok(cached);
        }
        let Some(actor) = self.actor.get() else {
            return Ok(false);
        };
        match flag {
            ToggleFlag::SortingActive => self.fetch(key, actor.get_sorting_active()).await,
            ToggleFlag::AccountLinked => self.fetch(key, actor.get_account_linked()).await,
        }
    }

    /// Re-read `key`: a fresh cached value is kept, a stale or missing one is
    /// fetched.
    ///
    /// # Errors
    ///
    /// Returns the remote error if the fetch fails.
    pub async fn refresh(&self, key: QueryKey) -> Result<()> {
        match key {
            QueryKey::CurrentUserProfile => self.caller_user_profile().await.map(drop),
            QueryKey::Emails => self.emails().await.map(drop),
            QueryKey::Categories => self.categories().await.map(drop),
            QueryKey::SortingRules => self.sorting_rules().await.map(drop),
            QueryKey::SuggestedCategories => self.suggested_categories().await.map(drop),
            QueryKey::PreferredCategories => self.preferred_categories().await.map(drop),
            QueryKey::DemoData => self.demo_data().await.map(drop),
            QueryKey::HelpQuestions => self.help_questions().await.map(drop),
            QueryKey::SortingActive => self.toggle_state(ToggleFlag::SortingActive).await.map(drop),
            QueryKey::AccountLinked => self.toggle_state(ToggleFlag::AccountLinked).await.map(drop),
        }
    }

    /// Mark `key` stale and fetch it again.
    ///
    /// # Errors
    ///
    /// Returns the remote error if the fetch fails.
    pub async fn invalidate_and_refetch(&self, key: QueryKey) -> Result<()> {
        self.cache.invalidate(key);
        self.refresh(key).await
    }

    /// Invalidate `key` and refetch it on a background task.
    pub fn spawn_refetch(self: &Arc<Self>, key: QueryKey) -> JoinHandle<()> {
        self.cache.invalidate(key);
        let client = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = client.refresh(key).await {
                tracing::warn!(%key, error = %e, "Background refetch failed");
            }
        })
    }

    // Writes

    /// Replace the caller's profile.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActorUnavailable`] without an actor, or the remote error.
    pub async fn save_caller_user_profile(&self, profile: UserProfile) -> Result<()> {
        let result = match self.actor.get() {
            Some(actor) => actor.save_caller_user_profile(profile).await,
            None => Err(Error::ActorUnavailable),
        };
        self.settle(result, "Failed to save", &[QueryKey::CurrentUserProfile])
            .await
    }

    /// Replace the caller's messages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActorUnavailable`] without an actor, or the remote error.
    pub async fn save_emails(&self, emails: Vec<Message>) -> Result<()> {
        let result = match self.actor.get() {
            Some(actor) => actor.save_emails(emails).await,
            None => Err(Error::ActorUnavailable),
        };
        self.settle(result, "Failed to save emails", &[QueryKey::Emails])
            .await
    }

    /// Move a message to another category.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActorUnavailable`] without an actor, or the remote error.
    pub async fn update_email_category(&self, id: MessageId, category: EmailCategory) -> Result<()> {
        let result = match self.actor.get() {
            Some(actor) => actor.update_email_category(id, category).await,
            None => Err(Error::ActorUnavailable),
        };
        self.settle(result, "Failed to move email", &[QueryKey::Emails])
            .await?;
        self.notices.success("Email moved successfully");
        Ok(())
    }

    /// Replace sender sorting rules.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActorUnavailable`] without an actor, or the remote error.
    pub async fn save_sorting_rules(&self, rules: Vec<SortingRule>) -> Result<()> {
        let result = match self.actor.get() {
            Some(actor) => actor.save_sorting_rules(rules).await,
            None => Err(Error::ActorUnavailable),
        };
        self.settle(result, "Failed to save rules", &[QueryKey::SortingRules])
            .await?;
        self.notices.success("Rules saved successfully");
        Ok(())
    }

    /// Replace label definitions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActorUnavailable`] without an actor, or the remote error.
    pub async fn save_categories(&self, categories: Vec<CategoryLabel>) -> Result<()> {
        let result = match self.actor.get() {
            Some(actor) => actor.save_categories(categories).await,
            None => Err(Error::ActorUnavailable),
        };
        self.settle(
            result,
            "Failed to save categories",
            &[QueryKey::Categories],
        )
        .await?;
        self.notices.success("Categories saved successfully");
        Ok(())
    }

    /// Replace the preferred category names.
    ///
    /// The names are also read through the profile, so both keys are refetched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActorUnavailable`] without an actor, or the remote error.
    pub async fn update_preferred_categories(&self, categories: Vec<String>) -> Result<()> {
        let result = match self.actor.get() {
            Some(actor) => actor.update_preferred_categories(categories).await,
            None => Err(Error::ActorUnavailable),
        };
        self.settle(
            result,
            "Failed to update categories",
            &[QueryKey::PreferredCategories, QueryKey::CurrentUserProfile],
        )
        .await
    }

    /// Flip a toggle on the server and return the server's resulting value.
    ///
    /// This only performs the call. Cache writes, notices and the follow-up
    /// refetch belong to [`OptimisticToggle`](crate::settings::OptimisticToggle).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActorUnavailable`] without an actor, or the remote error.
    pub async fn remote_toggle(&self, flag: ToggleFlag) -> Result<bool> {
        let actor = self.actor.get().ok_or(Error::ActorUnavailable)?;
        match flag {
            ToggleFlag::SortingActive => actor.toggle_sorting_active().await,
            ToggleFlag::AccountLinked => actor.toggle_account_linked().await,
        }
    }

    /// Run a fetch and store its result under `key`.
    async fn fetch<T>(
        &self,
        key: QueryKey,
        request: impl Future<Output = Result<T>> + Send,
    ) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let ticket = self.cache.begin_fetch(key);
        tracing::trace!(%key, "Fetching");
        match request.await {
            Ok(value) => {
                self.cache.complete_fetch(ticket, value.clone());
                Ok(value)
            }
            Err(e) => {
                self.cache.fail_fetch(ticket);
                tracing::warn!(%key, error = %e, "Fetch failed");
                Err(e)
            }
        }
    }

    /// Turn a write result into notices and cache updates.
    ///
    /// Invalidation happens only after the acknowledgment.
    async fn settle<T>(
        &self,
        result: Result<T>,
        failure_prefix: &str,
        affected: &[QueryKey],
    ) -> Result<T> {
        match result {
            Ok(value) => {
                for key in affected {
                    self.cache.invalidate(*key);
                }
                for key in affected {
                    if let Err(e) = self.refresh(*key).await {
                        tracing::warn!(%key, error = %e, "Refetch after write failed");
                    }
                }
                Ok(value)
            }
            Err(e) => {
                self.notices.error(format!("{failure_prefix}: {e}"));
                Err(e)
            }
        }
    }
}

impl<A> std::fmt::Debug for DataClient<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataClient")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::actor::{InMemoryActor, Operation};

    fn client(actor: &Arc<InMemoryActor>) -> DataClient<InMemoryActor> {
        DataClient::with_actor(
            Arc::clone(actor),
            Arc::new(QueryCache::new()),
            NoticeBoard::new(),
        )
    }

    #[tokio::test]
    async fn test_reads_degrade_without_actor() {
        let client: DataClient<InMemoryActor> =
            DataClient::new(Arc::new(QueryCache::new()), NoticeBoard::new());

        assert!(client.emails().await.unwrap().is_empty());
        assert!(client.caller_user_profile().await.unwrap().is_none());
        assert!(!client.toggle_state(ToggleFlag::SortingActive).await.unwrap());
        assert!(matches!(
            client.demo_data().await,
            Err(Error::ActorUnavailable)
        ));
        assert_eq!(
            client.state::<Vec<Message>>(QueryKey::Emails),
            QueryState::Ready(Vec::new())
        );
    }

    #[tokio::test]
    async fn test_writes_refuse_without_actor() {
        let notices = NoticeBoard::new();
        let client: DataClient<InMemoryActor> =
            DataClient::new(Arc::new(QueryCache::new()), notices.clone());

        let result = client
            .save_caller_user_profile(UserProfile::new("Ada", "ada@example.com"))
            .await;

        assert!(matches!(result, Err(Error::ActorUnavailable)));
        let notices = notices.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].text, "Failed to save: Actor not available");
    }

    #[tokio::test]
    async fn test_read_through_hits_cache() {
        let actor = Arc::new(InMemoryActor::seeded(1_000_000_000_000_000));
        let client = client(&actor);

        let first = client.emails().await.unwrap();
        let second = client.emails().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(actor.calls(Operation::GetEmails), 1);
    }

    #[tokio::test]
    async fn test_state_loading_until_first_fetch() {
        let actor = Arc::new(InMemoryActor::new());
        let client = client(&actor);

        assert!(client.state::<Vec<Message>>(QueryKey::Emails).is_loading());
        client.emails().await.unwrap();
        assert!(!client.state::<Vec<Message>>(QueryKey::Emails).is_loading());
    }

    #[tokio::test]
    async fn test_failed_first_fetch_shows_default() {
        let actor = Arc::new(InMemoryActor::new());
        actor.fail(Operation::GetHelpQuestions);
        let client = client(&actor);

        assert!(client.help_questions().await.is_err());
        assert_eq!(
            client.state::<Vec<HelpQuestion>>(QueryKey::HelpQuestions),
            QueryState::Ready(Vec::new())
        );
    }

    #[tokio::test]
    async fn test_move_email_invalidates_and_refetches() {
        let actor = Arc::new(InMemoryActor::seeded(1_000_000_000_000_000));
        let client = client(&actor);
        client.emails().await.unwrap();

        client
            .update_email_category(MessageId::new("demo-1"), EmailCategory::Archive)
            .await
            .unwrap();

        assert_eq!(actor.calls(Operation::GetEmails), 2);
        let emails: Vec<Message> = client.cache().get(QueryKey::Emails).unwrap();
        let moved = emails.iter().find(|m| m.id.as_str() == "demo-1").unwrap();
        assert_eq!(moved.category, EmailCategory::Archive);
        assert_eq!(client.notices().drain()[0].text, "Email moved successfully");
    }

    #[tokio::test]
    async fn test_failed_write_leaves_cache_fresh() {
        let actor = Arc::new(InMemoryActor::seeded(1_000_000_000_000_000));
        actor.fail(Operation::UpdateEmailCategory);
        let client = client(&actor);
        client.emails().await.unwrap();

        let result = client
            .update_email_category(MessageId::new("demo-1"), EmailCategory::Spam)
            .await;

        assert!(result.is_err());
        assert!(!client.cache().is_stale(QueryKey::Emails));
        let notices = client.notices().drain();
        assert!(notices[0].text.starts_with("Failed to move email: "));
    }

    #[tokio::test]
    async fn test_failed_email_save_posts_notice() {
        let actor = Arc::new(InMemoryActor::seeded(1_000_000_000_000));
        actor.fail(Operation::SaveEmails);
        let client = client(&actor);

        assert!(client.save_emails(Vec::new()).await.is_err());

        let notices = client.notices().drain();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].text.starts_with("Failed to save emails: "));
        assert!(!actor.emails().is_empty());
    }

    #[tokio::test]
    async fn test_preferred_update_refetches_profile_too() {
        let actor = Arc::new(InMemoryActor::new());
        actor.set_profile(Some(UserProfile::new("Ada", "ada@example.com")));
        let client = client(&actor);
        client.caller_user_profile().await.unwrap();
        client.preferred_categories().await.unwrap();

        client
            .update_preferred_categories(vec!["Work".into()])
            .await
            .unwrap();

        assert_eq!(actor.calls(Operation::GetCallerUserProfile), 2);
        assert_eq!(actor.calls(Operation::GetPreferredCategories), 2);
        let profile: Option<UserProfile> = client.cache().get(QueryKey::CurrentUserProfile).unwrap();
        assert_eq!(
            profile.unwrap().preferences.preferred_categories,
            vec!["Work"]
        );
    }

    #[tokio::test]
    async fn test_save_rules_and_labels_notify() {
        let actor = Arc::new(InMemoryActor::new());
        let client = client(&actor);

        client
            .save_sorting_rules(vec![SortingRule {
                id: "r1".into(),
                sender_pattern: "@shop.example".into(),
                category: EmailCategory::Promotions,
            }])
            .await
            .unwrap();
        client
            .save_categories(vec![CategoryLabel {
                id: "c1".into(),
                name: "Finance".into(),
                color: "#22c55e".into(),
            }])
            .await
            .unwrap();

        let texts: Vec<_> = client.notices().drain().into_iter().map(|n| n.text).collect();
        assert_eq!(
            texts,
            vec!["Rules saved successfully", "Categories saved successfully"]
        );
        assert_eq!(client.sorting_rules().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_spawn_refetch_updates_cache() {
        let actor = Arc::new(InMemoryActor::new());
        let client = Arc::new(client(&actor));
        actor.set_account_linked(true);

        client
            .spawn_refetch(QueryKey::AccountLinked)
            .await
            .unwrap();

        assert_eq!(client.cache().get::<bool>(QueryKey::AccountLinked), Some(true));
    }
}
