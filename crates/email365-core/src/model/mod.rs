//! Domain models as consumed from the backend actor.
//!
//! Storage is server-owned; these are read-through copies.

mod catalog;
mod message;
mod profile;

pub use catalog::{CategoryLabel, DemoData, HelpQuestion, SortingRule, SuggestedCategory};
pub use message::{EmailCategory, Message, MessageId};
pub use profile::{NotificationSettings, Preferences, UserProfile};
