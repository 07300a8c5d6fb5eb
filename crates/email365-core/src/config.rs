//! Application configuration persisted across sessions.
//!
//! Stored as JSON under the platform config directory
//! (`~/.config/email365/settings.json` on Linux). A missing file yields the
//! defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Directory name under the platform config directory.
const APP_DIR: &str = "email365";

/// Settings file name.
const FILE_NAME: &str = "settings.json";

/// Colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Light background.
    Light,
    /// Dark background.
    #[default]
    Dark,
}

impl ThemePreference {
    /// The other scheme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Colour scheme.
    pub theme: ThemePreference,
    /// Quiet period before a typed profile field is saved, in milliseconds.
    pub debounce_ms: u64,
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub log_filter: Option<String>,
    /// Artificial delay added to every demo backend call, in milliseconds.
    pub demo_latency_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: ThemePreference::Dark,
            debounce_ms: 1000,
            log_filter: None,
            demo_latency_ms: 150,
        }
    }
}

impl AppConfig {
    /// Default location of the settings file.
    #[must_use]
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(FILE_NAME)
    }

    /// Quiet period for profile field auto-save.
    #[must_use]
    pub const fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Demo backend latency.
    #[must_use]
    pub const fn demo_latency(&self) -> Duration {
        Duration::from_millis(self.demo_latency_ms)
    }

    /// Load from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        Self::load_from(&Self::path()).await
    }

    /// Load from `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(?path, "No settings file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn save(&self) -> Result<()> {
        self.save_to(&Self::path()).await
    }

    /// Save to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;
        tracing::info!("Settings saved to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.debounce_ms == 0 {
            return Err(crate::Error::Config(
                "debounce_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("email365-config-{}-{name}", std::process::id()))
            .join(FILE_NAME)
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.debounce_window(), Duration::from_secs(1));
        assert_eq!(config.theme, ThemePreference::Dark);
        assert_eq!(config.theme.toggled(), ThemePreference::Light);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"theme":"light"}"#).unwrap();
        assert_eq!(config.theme, ThemePreference::Light);
        assert_eq!(config.debounce_ms, 1000);
    }

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let config = AppConfig::load_from(&scratch("missing")).await.unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let path = scratch("saved");
        let config = AppConfig {
            theme: ThemePreference::Light,
            debounce_ms: 250,
            log_filter: Some("email365=trace".into()),
            demo_latency_ms: 0,
        };

        config.save_to(&path).await.unwrap();
        let loaded = AppConfig::load_from(&path).await.unwrap();
        assert_eq!(loaded, config);

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }

    #[tokio::test]
    async fn test_zero_debounce_rejected() {
        let path = scratch("zero");
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, r#"{"debounce_ms":0}"#).await.unwrap();

        let result = AppConfig::load_from(&path).await;
        assert!(matches!(result, Err(crate::Error::Config(_))));

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }
}
