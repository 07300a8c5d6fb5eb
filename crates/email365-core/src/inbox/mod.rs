//! Inbox view-state controller.
//!
//! Turns the fetched message set and a few local preferences (category,
//! search text, unread-only, sort key) into the ordered list to render, and
//! tracks the single selected message.
//!
//! # Example
//!
//! ```
//! use email365_core::inbox::{InboxView, SortKey};
//! use email365_core::model::{EmailCategory, Message};
//! use email365_core::query::QueryState;
//!
//! let messages = vec![
//!     Message::new("a", "x@example.com", "Older", EmailCategory::Priority, 100),
//!     Message::new("b", "y@example.com", "Newer", EmailCategory::Priority, 300),
//! ];
//!
//! let mut view = InboxView::new(EmailCategory::Priority);
//! view.set_sort(SortKey::Recency);
//! let snapshot = view.present(&QueryState::Ready(messages));
//! assert_eq!(snapshot.messages()[0].subject, "Newer");
//! ```

mod filter;
mod view;

pub use filter::{InboxFilter, SortKey, compare_subjects};
pub use view::{InboxSnapshot, InboxView};
