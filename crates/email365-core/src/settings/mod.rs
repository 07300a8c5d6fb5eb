//! Settings synchronization.
//!
//! Reconciles locally edited form fields and switches with the records the
//! server owns:
//! - [`ProfileEditor`]: name and email saved after a quiet period,
//!   notification switches saved immediately
//! - [`OptimisticToggle`]: sorting and account-link flags flipped before the
//!   server answers, rolled back on failure
//! - [`CategoryEditor`]: preferred-category list, duplicates rejected locally
//!
//! No failure here is fatal. Remote errors become notices; typed text is
//! kept so the user can retry; toggles fall back to the last known value.

mod categories;
mod debounce;
mod profile;
mod toggle;

pub use categories::{CategoryEditor, CategoryWrite};
pub use debounce::Debouncer;
pub use profile::{ProfileDraft, ProfileEditor};
pub use toggle::OptimisticToggle;
