//! Backend actor boundary.
//!
//! The actor is the only way this crate talks to the server. Every method is a
//! single request/response pair; payload shapes are the types in [`crate::model`].
//!
//! [`ActorHandle`] models the "maybe ready" state of the connection: until an
//! actor is attached, reads degrade to defaults and writes refuse with
//! [`Error::ActorUnavailable`](crate::Error::ActorUnavailable).

mod memory;
mod seed;

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

pub use memory::{InMemoryActor, Operation};
pub use seed::{demo_help_questions, demo_messages, demo_suggested_categories};

use crate::Result;
use crate::model::{
    CategoryLabel, DemoData, EmailCategory, HelpQuestion, Message, MessageId, SortingRule,
    SuggestedCategory, UserProfile,
};

/// Typed remote operations exposed by the backend.
pub trait Actor: Send + Sync + 'static {
    /// Fetch the profile of the calling user, if one has been saved.
    fn get_caller_user_profile(&self) -> impl Future<Output = Result<Option<UserProfile>>> + Send;

    /// Replace the calling user's profile.
    fn save_caller_user_profile(
        &self,
        profile: UserProfile,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Fetch the calling user's messages.
    fn get_emails(&self) -> impl Future<Output = Result<Vec<Message>>> + Send;

    /// Replace the calling user's messages.
    fn save_emails(&self, emails: Vec<Message>) -> impl Future<Output = Result<()>> + Send;

    /// Move one message to another category.
    fn update_email_category(
        &self,
        id: MessageId,
        category: EmailCategory,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Fetch sender sorting rules.
    fn get_sorting_rules(&self) -> impl Future<Output = Result<Vec<SortingRule>>> + Send;

    /// Replace sender sorting rules.
    fn save_sorting_rules(&self, rules: Vec<SortingRule>)
    -> impl Future<Output = Result<()>> + Send;

    /// Fetch label definitions.
    fn get_categories(&self) -> impl Future<Output = Result<Vec<CategoryLabel>>> + Send;

    /// Replace label definitions.
    fn save_categories(
        &self,
        categories: Vec<CategoryLabel>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Fetch help-center entries.
    fn get_help_questions(&self) -> impl Future<Output = Result<Vec<HelpQuestion>>> + Send;

    /// Fetch the public demo dataset.
    fn get_demo_data(&self) -> impl Future<Output = Result<DemoData>> + Send;

    /// Fetch categories the backend suggests.
    fn get_suggested_categories(
        &self,
    ) -> impl Future<Output = Result<Vec<SuggestedCategory>>> + Send;

    /// Fetch the preferred category names.
    fn get_preferred_categories(&self) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Replace the preferred category names.
    fn update_preferred_categories(
        &self,
        categories: Vec<String>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Whether automatic sorting is active.
    fn get_sorting_active(&self) -> impl Future<Output = Result<bool>> + Send;

    /// Flip automatic sorting and return the resulting value.
    fn toggle_sorting_active(&self) -> impl Future<Output = Result<bool>> + Send;

    /// Whether an external account is linked.
    fn get_account_linked(&self) -> impl Future<Output = Result<bool>> + Send;

    /// Flip the account link and return the resulting value.
    fn toggle_account_linked(&self) -> impl Future<Output = Result<bool>> + Send;
}

/// Slot holding the actor once it is ready.
pub struct ActorHandle<A> {
    inner: RwLock<Option<Arc<A>>>,
}

impl<A: Actor> ActorHandle<A> {
    /// Create an empty handle.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Create a handle that is ready immediately.
    #[must_use]
    pub fn ready(actor: Arc<A>) -> Self {
        Self {
            inner: RwLock::new(Some(actor)),
        }
    }

    /// Attach an actor, replacing any previous one.
    pub fn set(&self, actor: Arc<A>) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(actor);
    }

    /// Detach the current actor.
    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The current actor, if ready.
    #[must_use]
    pub fn get(&self) -> Option<Arc<A>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether an actor is attached.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl<A: Actor> Default for ActorHandle<A> {
    fn default() -> Self {
        Self::empty()
    }
}
