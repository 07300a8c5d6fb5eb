//! # email365-core
//!
//! Client-side logic for the `Email365` inbox organizer.
//!
//! This crate provides:
//! - Domain models as served by the backend actor
//! - **Remote data access layer** - typed reads and writes over the actor,
//!   bound to cache keys, with invalidate-then-refetch after every write
//! - **Query cache** - key-value store with change notification and
//!   cancellable fetches
//! - **Inbox view state** - category, search, unread-only and sort applied to
//!   the fetched messages, plus the selected message
//! - **Settings sync** - debounced profile auto-save, optimistic toggles with
//!   rollback, preferred-category editing
//! - **Session** - identity provider boundary, login/logout lifecycle
//! - Help-center search and persisted configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod actor;
pub mod cache;
pub mod config;
mod error;
pub mod help;
pub mod inbox;
pub mod model;
pub mod notice;
pub mod query;
pub mod session;
pub mod settings;

pub use actor::{Actor, ActorHandle, InMemoryActor, Operation};
pub use cache::{CacheEvent, QueryCache, QueryKey};
pub use config::{AppConfig, ThemePreference};
pub use error::{Error, Result};
pub use help::{HelpGroup, filter_questions, group_by_category};
pub use inbox::{InboxFilter, InboxSnapshot, InboxView, SortKey};
pub use model::{
    CategoryLabel, DemoData, EmailCategory, HelpQuestion, Message, MessageId,
    NotificationSettings, Preferences, SortingRule, SuggestedCategory, UserProfile,
};
pub use notice::{Notice, NoticeBoard, NoticeLevel};
pub use query::{DataClient, QueryState, ToggleFlag};
pub use session::{
    Identity, IdentityProvider, LocalIdentityProvider, LoginError, Session, TopLevelView,
};
pub use settings::{
    CategoryEditor, CategoryWrite, Debouncer, OptimisticToggle, ProfileDraft, ProfileEditor,
};
