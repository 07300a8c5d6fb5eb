//! Settings screen and profile setup form state.

/// Settings tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsTab {
    /// Name and email.
    #[default]
    General,
    /// Preferred categories.
    Categories,
    /// Email and push switches.
    Notifications,
    /// Theme and linked account.
    Appearance,
    /// Data handling and account deletion.
    Privacy,
}

impl SettingsTab {
    pub const ALL: [Self; 5] = [
        Self::General,
        Self::Categories,
        Self::Notifications,
        Self::Appearance,
        Self::Privacy,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Categories => "Categories",
            Self::Notifications => "Notifications",
            Self::Appearance => "Appearance",
            Self::Privacy => "Privacy",
        }
    }
}

/// Local state of the settings screen.
#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    pub tab: SettingsTab,
    /// Custom category being typed.
    pub category_input: String,
}

/// First-run form shown when the signed-in user has no profile yet.
#[derive(Debug, Clone, Default)]
pub struct ProfileSetupState {
    pub name: String,
    pub email: String,
    pub is_saving: bool,
    pub error: Option<String>,
}

impl ProfileSetupState {
    /// Returns an error message if the form cannot be submitted.
    pub fn validate(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("Please enter your name")
        } else if !self.email.contains('@') {
            Some("Please enter a valid email address")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_validation() {
        let mut form = ProfileSetupState::default();
        assert_eq!(form.validate(), Some("Please enter your name"));

        form.name = "Ada".into();
        form.email = "ada".into();
        assert_eq!(form.validate(), Some("Please enter a valid email address"));

        form.email = "ada@example.com".into();
        assert_eq!(form.validate(), None);
    }
}
