//! Message types for application events.
//!
//! In the Elm architecture, Messages are events that trigger state changes.

use email365_core::{EmailCategory, MessageId, QueryKey, SortKey};

use crate::model::{PreviewAction, SettingsTab};

/// Application messages (events).
#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    /// Switch the page inside the signed-in shell.
    NavigateTo(Page),
    /// Open a category (also leaves settings/help).
    SelectCategory(EmailCategory),

    // Session
    /// Start the login flow.
    Login,
    /// Login finished.
    LoggedIn(Result<(), String>),
    /// Sign out.
    Logout,
    /// Sign out finished.
    LoggedOut,
    /// Open the public demo inbox.
    OpenDemo,
    /// Leave the demo inbox.
    CloseDemo,

    // Data
    /// A background read finished.
    Fetched(QueryKey, Result<(), String>),
    /// A background write finished; notices were already posted.
    Saved(Result<(), String>),

    // Inbox
    /// Search text changed.
    SearchChanged(String),
    /// Sort order changed.
    SortChanged(SortKey),
    /// Flip the unread-only filter.
    ToggleUnreadOnly,
    /// Open a message in the preview pane.
    SelectMessage(MessageId),
    /// Close the preview pane.
    ClearSelection,
    /// Move a message to another category.
    MoveMessage(MessageId, EmailCategory),
    /// Toolbar or menu action on the open message.
    PreviewAction(PreviewAction),

    // Home
    /// Flip automatic sorting.
    ToggleSorting,
    /// Optimistic toggle finished.
    Toggled(Result<bool, String>),

    // Profile setup
    /// Setup form messages.
    ProfileSetup(ProfileSetupMessage),

    // Settings
    /// Settings screen messages.
    Settings(SettingsMessage),

    // Help
    /// Help search text changed.
    HelpSearchChanged(String),

    // UI
    /// Periodic refresh: drains notices and cache events.
    Tick,
    /// Close a toast.
    DismissToast(usize),
    /// Settings file written.
    ConfigSaved(Result<(), String>),
    /// Keyboard shortcut pressed.
    KeyPressed(KeyboardAction),
}

/// Keyboard actions that can be triggered by shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardAction {
    /// Close the preview or go back to the inbox (Escape).
    Cancel,
    /// Open settings (Ctrl+,).
    Settings,
    /// Open help (F1).
    Help,
    /// Refetch the messages (F5).
    Refresh,
}

/// Messages for the first-run profile form.
#[derive(Debug, Clone)]
pub enum ProfileSetupMessage {
    NameChanged(String),
    EmailChanged(String),
    Submit,
    /// Profile creation finished.
    Saved(Result<(), String>),
}

/// Messages for the settings screen.
#[derive(Debug, Clone)]
pub enum SettingsMessage {
    /// Switch tab.
    SelectTab(SettingsTab),
    /// Name field edited.
    NameChanged(String),
    /// Email field edited.
    EmailChanged(String),
    /// Email notification switch.
    EmailNotifications(bool),
    /// Push notification switch.
    PushNotifications(bool),
    /// Custom category input edited.
    CategoryInputChanged(String),
    /// Add the typed custom category.
    AddCategory,
    /// Add a suggested category.
    AddSuggested(String),
    /// Remove a preferred category.
    RemoveCategory(String),
    /// Flip light/dark.
    ToggleTheme,
    /// Link or unlink the Google account.
    ToggleAccountLink,
    /// Account deletion button on the privacy tab.
    DeleteAccount,
}

/// Pages of the signed-in shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Category inbox with list and preview.
    #[default]
    Inbox,
    /// Settings tabs.
    Settings,
    /// Help center.
    Help,
}
