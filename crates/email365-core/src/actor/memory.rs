//! In-process actor.
//!
//! Stands in for the remote backend in the desktop shell and in tests. It can
//! inject failures per operation, add latency to every call, and count calls.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use super::Actor;
use crate::model::{
    CategoryLabel, DemoData, EmailCategory, HelpQuestion, Message, MessageId, SortingRule,
    SuggestedCategory, UserProfile,
};
use crate::{Error, Result};

/// Remote operations, used as keys for call counts and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `get_caller_user_profile`
    GetCallerUserProfile,
    /// `save_caller_user_profile`
    SaveCallerUserProfile,
    /// `get_emails`
    GetEmails,
    /// `save_emails`
    SaveEmails,
    /// `update_email_category`
    UpdateEmailCategory,
    /// `get_sorting_rules`
    GetSortingRules,
    /// `save_sorting_rules`
    SaveSortingRules,
    /// `get_categories`
    GetCategories,
    /// `save_categories`
    SaveCategories,
    /// `get_help_questions`
    GetHelpQuestions,
    /// `get_demo_data`
    GetDemoData,
    /// `get_suggested_categories`
    GetSuggestedCategories,
    /// `get_preferred_categories`
    GetPreferredCategories,
    /// `update_preferred_categories`
    UpdatePreferredCategories,
    /// `get_sorting_active`
    GetSortingActive,
    /// `toggle_sorting_active`
    ToggleSortingActive,
    /// `get_account_linked`
    GetAccountLinked,
    /// `toggle_account_linked`
    ToggleAccountLinked,
}

#[derive(Debug, Default)]
struct ServerState {
    profile: Option<UserProfile>,
    emails: Vec<Message>,
    rules: Vec<SortingRule>,
    categories: Vec<CategoryLabel>,
    help: Vec<HelpQuestion>,
    demo: DemoData,
    suggested: Vec<SuggestedCategory>,
    preferred: Vec<String>,
    sorting_active: bool,
    account_linked: bool,
}

/// Actor backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryActor {
    state: Mutex<ServerState>,
    failing: Mutex<HashSet<Operation>>,
    calls: Mutex<HashMap<Operation, usize>>,
    latency: Mutex<Duration>,
}

impl InMemoryActor {
    /// Create an actor with no data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an actor seeded with the demo dataset.
    ///
    /// `now` is the reference time in nanoseconds; demo messages are spread
    /// over the hours before it.
    #[must_use]
    pub fn seeded(now: u64) -> Self {
        let messages = super::demo_messages(now);
        let actor = Self::new();
        {
            let mut state = actor.lock_state();
            state.emails.clone_from(&messages);
            state.demo = DemoData { emails: messages };
            state.help = super::demo_help_questions();
            state.suggested = super::demo_suggested_categories();
        }
        actor
    }

    /// Delay every call by `latency`.
    #[must_use]
    pub fn with_latency(self, latency: Duration) -> Self {
        self.set_latency(latency);
        self
    }

    /// Change the per-call delay.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap_or_else(PoisonError::into_inner) = latency;
    }

    /// Make `op` fail until [`recover`](Self::recover) is called.
    pub fn fail(&self, op: Operation) {
        self.set_failing(op, true);
    }

    /// Make `op` succeed again.
    pub fn recover(&self, op: Operation) {
        self.set_failing(op, false);
    }

    /// Set whether `op` fails.
    pub fn set_failing(&self, op: Operation, failing: bool) {
        let mut set = self.failing.lock().unwrap_or_else(PoisonError::into_inner);
        if failing {
            set.insert(op);
        } else {
            set.remove(&op);
        }
    }

    /// Number of calls made to `op`, including failed ones.
    #[must_use]
    pub fn calls(&self, op: Operation) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&op)
            .copied()
            .unwrap_or(0)
    }

    /// Total number of calls across all operations.
    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .sum()
    }

    /// Reset call counts.
    pub fn reset_calls(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Server-side profile.
    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        self.lock_state().profile.clone()
    }

    /// Overwrite the server-side profile.
    pub fn set_profile(&self, profile: Option<UserProfile>) {
        self.lock_state().profile = profile;
    }

    /// Server-side messages.
    #[must_use]
    pub fn emails(&self) -> Vec<Message> {
        self.lock_state().emails.clone()
    }

    /// Overwrite the server-side messages.
    pub fn set_emails(&self, emails: Vec<Message>) {
        self.lock_state().emails = emails;
    }

    /// Server-side preferred categories.
    #[must_use]
    pub fn preferred(&self) -> Vec<String> {
        self.lock_state().preferred.clone()
    }

    /// Overwrite the server-side preferred categories.
    pub fn set_preferred(&self, preferred: Vec<String>) {
        self.lock_state().preferred = preferred;
    }

    /// Server-side sorting flag.
    #[must_use]
    pub fn sorting_active(&self) -> bool {
        self.lock_state().sorting_active
    }

    /// Overwrite the server-side sorting flag.
    pub fn set_sorting_active(&self, active: bool) {
        self.lock_state().sorting_active = active;
    }

    /// Server-side account link flag.
    #[must_use]
    pub fn account_linked(&self) -> bool {
        self.lock_state().account_linked
    }

    /// Overwrite the server-side account link flag.
    pub fn set_account_linked(&self, linked: bool) {
        self.lock_state().account_linked = linked;
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, ServerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count the call, wait out the latency, then apply failure injection.
    async fn enter(&self, op: Operation) -> Result<()> {
        *self
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(op)
            .or_insert(0) += 1;

        let latency = *self.latency.lock().unwrap_or_else(PoisonError::into_inner);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let failing = self
            .failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&op);
        if failing {
            tracing::debug!(?op, "Injected failure");
            return Err(Error::remote(format!("{op:?} rejected by server")));
        }
        Ok(())
    }
}

impl Actor for InMemoryActor {
    async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>> {
        self.enter(Operation::GetCallerUserProfile).await?;
        Ok(self.lock_state().profile.clone())
    }

    async fn save_caller_user_profile(&self, profile: UserProfile) -> Result<()> {
        self.enter(Operation::SaveCallerUserProfile).await?;
        let mut state = self.lock_state();
        state
            .preferred
            .clone_from(&profile.preferences.preferred_categories);
        state.profile = Some(profile);
        Ok(())
    }

    async fn get_emails(&self) -> Result<Vec<Message>> {
        self.enter(Operation::GetEmails).await?;
        Ok(self.lock_state().emails.clone())
    }

    async fn save_emails(&self, emails: Vec<Message>) -> Result<()> {
        self.enter(Operation::SaveEmails).await?;
        self.lock_state().emails = emails;
        Ok(())
    }

    async fn update_email_category(&self, id: MessageId, category: EmailCategory) -> Result<()> {
        self.enter(Operation::UpdateEmailCategory).await?;
        let mut state = self.lock_state();
        let email = state
            .emails
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| Error::remote("Email not found"))?;
        email.category = category;
        Ok(())
    }

    async fn get_sorting_rules(&self) -> Result<Vec<SortingRule>> {
        self.enter(Operation::GetSortingRules).await?;
        Ok(self.lock_state().rules.clone())
    }

    async fn save_sorting_rules(&self, rules: Vec<SortingRule>) -> Result<()> {
        self.enter(Operation::SaveSortingRules).await?;
        self.lock_state().rules = rules;
        Ok(())
    }

    async fn get_categories(&self) -> Result<Vec<CategoryLabel>> {
        self.enter(Operation::GetCategories).await?;
        Ok(self.lock_state().categories.clone())
    }

    async fn save_categories(&self, categories: Vec<CategoryLabel>) -> Result<()> {
        self.enter(Operation::SaveCategories).await?;
        self.lock_state().categories = categories;
        Ok(())
    }

    async fn get_help_questions(&self) -> Result<Vec<HelpQuestion>> {
        self.enter(Operation::GetHelpQuestions).await?;
        Ok(self.lock_state().help.clone())
    }

    async fn get_demo_data(&self) -> Result<DemoData> {
        self.enter(Operation::GetDemoData).await?;
        Ok(self.lock_state().demo.clone())
    }

    async fn get_suggested_categories(&self) -> Result<Vec<SuggestedCategory>> {
        self.enter(Operation::GetSuggestedCategories).await?;
        Ok(self.lock_state().suggested.clone())
    }

    async fn get_preferred_categories(&self) -> Result<Vec<String>> {
        self.enter(Operation::GetPreferredCategories).await?;
        Ok(self.lock_state().preferred.clone())
    }

    async fn update_preferred_categories(&self, categories: Vec<String>) -> Result<()> {
        self.enter(Operation::UpdatePreferredCategories).await?;
        let mut state = self.lock_state();
        if let Some(profile) = state.profile.as_mut() {
            profile
                .preferences
                .preferred_categories
                .clone_from(&categories);
        }
        state.preferred = categories;
        Ok(())
    }

    async fn get_sorting_active(&self) -> Result<bool> {
        self.enter(Operation::GetSortingActive).await?;
        Ok(self.lock_state().sorting_active)
    }

    async fn toggle_sorting_active(&self) -> Result<bool> {
        self.enter(Operation::ToggleSortingActive).await?;
        let mut state = self.lock_state();
        state.sorting_active = !state.sorting_active;
        Ok(state.sorting_active)
    }

    async fn get_account_linked(&self) -> Result<bool> {
        self.enter(Operation::GetAccountLinked).await?;
        Ok(self.lock_state().account_linked)
    }

    async fn toggle_account_linked(&self) -> Result<bool> {
        self.enter(Operation::ToggleAccountLinked).await?;
        let mut state = self.lock_state();
        state.account_linked = !state.account_linked;
        Ok(state.account_linked)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_toggle_returns_new_value() {
        let actor = InMemoryActor::new();

        assert!(actor.toggle_sorting_active().await.unwrap());
        assert!(!actor.toggle_sorting_active().await.unwrap());
        assert_eq!(actor.calls(Operation::ToggleSortingActive), 2);
    }

    #[tokio::test]
    async fn test_injected_failure_is_counted() {
        let actor = InMemoryActor::new();
        actor.fail(Operation::GetEmails);

        assert!(actor.get_emails().await.is_err());
        assert_eq!(actor.calls(Operation::GetEmails), 1);

        actor.recover(Operation::GetEmails);
        assert!(actor.get_emails().await.is_ok());
    }

    #[tokio::test]
    async fn test_preferred_categories_mirror_into_profile() {
        let actor = InMemoryActor::new();
        actor.set_profile(Some(UserProfile::new("Ada", "ada@example.com")));

        actor
            .update_preferred_categories(vec!["Finance".into()])
            .await
            .unwrap();

        let profile = actor.get_caller_user_profile().await.unwrap().unwrap();
        assert_eq!(profile.preferences.preferred_categories, vec!["Finance"]);
        assert_eq!(actor.get_preferred_categories().await.unwrap(), vec!["Finance"]);
    }

    #[tokio::test]
    async fn test_update_unknown_email_fails() {
        let actor = InMemoryActor::seeded(1_000_000_000_000);
        let result = actor
            .update_email_category(MessageId::new("missing"), EmailCategory::Spam)
            .await;
        assert!(matches!(result, Err(Error::Remote(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_delays_reply() {
        let actor = InMemoryActor::new().with_latency(Duration::from_millis(200));
        let start = tokio::time::Instant::now();

        actor.get_sorting_active().await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(200));
    }
}
