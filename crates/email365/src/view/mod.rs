//! View components for the application.

mod header;
mod help;
mod home;
mod inbox;
mod landing;
mod settings;
mod sidebar;
mod toasts;

pub use header::{HeaderMode, view_header};
pub use help::view_help;
pub use home::{view_profile_setup, view_sorting_banner};
pub use inbox::{view_message_list, view_preview};
pub use landing::view_landing;
pub use settings::{SettingsContext, view_settings};
pub use sidebar::view_sidebar;
pub use toasts::view_toasts;
