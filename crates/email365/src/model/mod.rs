//! UI-only state for the desktop shell.

mod preview;
mod settings;
mod time;
mod toast;

pub use preview::PreviewAction;
pub use settings::{ProfileSetupState, SettingsState, SettingsTab};
pub use time::{format_full, format_received};
pub use toast::Toasts;
