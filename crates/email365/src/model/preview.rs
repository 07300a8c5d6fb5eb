//! Actions offered on an open message.

/// Preview toolbar and overflow menu actions.
///
/// These only signal intent: the selection and read state stay as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewAction {
    Reply,
    Forward,
    Star,
    Archive,
    Delete,
    MarkUnread,
    MoveToSpam,
    CreateRule,
}

impl PreviewAction {
    /// Toolbar buttons, in display order.
    pub const TOOLBAR: [Self; 5] = [
        Self::Reply,
        Self::Forward,
        Self::Star,
        Self::Archive,
        Self::Delete,
    ];

    /// Overflow menu entries.
    pub const MORE: [Self; 3] = [Self::MarkUnread, Self::MoveToSpam, Self::CreateRule];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Reply => "Reply",
            Self::Forward => "Forward",
            Self::Star => "Star",
            Self::Archive => "Archive",
            Self::Delete => "Delete",
            Self::MarkUnread => "Mark as unread",
            Self::MoveToSpam => "Move to spam",
            Self::CreateRule => "Create rule",
        }
    }

    /// Toast shown when the action is picked.
    pub fn notice_text(self) -> String {
        format!("{} action triggered", self.label())
    }
}
