//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The backend actor handle is not ready yet.
    ///
    /// Reads degrade to defaults instead of returning this; writes refuse with it.
    #[error("Actor not available")]
    ActorUnavailable,

    /// A remote call reached the actor and failed.
    #[error("{0}")]
    Remote(String),

    /// A category with the same name is already in the preference set.
    #[error("Category already exists")]
    DuplicateCategory(String),

    /// A toggle request arrived while the previous one was still outstanding.
    #[error("Update already in progress")]
    Busy,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a remote-call failure.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }

    /// Whether this error was detected locally, before any network call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::DuplicateCategory(_) | Self::Busy)
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_notice_text() {
        assert_eq!(Error::ActorUnavailable.to_string(), "Actor not available");
        assert_eq!(
            Error::DuplicateCategory("Finance".into()).to_string(),
            "Category already exists"
        );
        assert_eq!(Error::remote("boom").to_string(), "boom");
    }

    #[test]
    fn test_validation_errors() {
        assert!(Error::Busy.is_validation());
        assert!(Error::DuplicateCategory("x".into()).is_validation());
        assert!(!Error::ActorUnavailable.is_validation());
        assert!(!Error::remote("x").is_validation());
    }
}
