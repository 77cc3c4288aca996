//! User settings - the handful of persisted preferences.
//!
//! Two groups survive restarts: the per-brand accent colors and the
//! currency/timezone pair. They live in a single YAML file in the
//! platform config directory, read once at startup with hard-coded
//! fallbacks and written back on every change.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::brand::Brand;
use crate::core::money::Currency;

/// Accent color per brand, as hex strings for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Accents {
    pub real_estate: String,
    pub business_setup: String,
}

impl Default for Accents {
    fn default() -> Self {
        Self {
            real_estate: "#0f766e".to_string(),
            business_setup: "#7c3aed".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub accents: Accents,
    pub currency: Currency,
    pub timezone: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            accents: Accents::default(),
            currency: Currency::Aed,
            timezone: "Asia/Dubai".to_string(),
        }
    }
}

impl Settings {
    /// Load from the platform config dir, falling back to defaults on
    /// any missing or unreadable file
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path (defaults if missing or malformed)
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|text| serde_yml::from_str(&text).ok())
            .unwrap_or_default()
    }

    /// Persist to the platform config dir
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Persist to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::Io(e.to_string()))?;
        }
        let text =
            serde_yml::to_string(self).map_err(|e| SettingsError::Io(e.to_string()))?;
        std::fs::write(path, text).map_err(|e| SettingsError::Io(e.to_string()))
    }

    /// Path of the settings file in the platform config dir
    pub fn path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "nexa")
            .map(|dirs| dirs.config_dir().join("settings.yaml"))
    }

    /// Accent color for a brand
    pub fn accent(&self, brand: Brand) -> &str {
        match brand {
            Brand::RealEstate => &self.accents.real_estate,
            Brand::BusinessSetup => &self.accents.business_setup,
        }
    }

    /// Read a setting by dotted key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "accent.real-estate" => Some(self.accents.real_estate.clone()),
            "accent.business-setup" => Some(self.accents.business_setup.clone()),
            "currency" => Some(self.currency.code().to_string()),
            "timezone" => Some(self.timezone.clone()),
            _ => None,
        }
    }

    /// Set a setting by dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        match key {
            "accent.real-estate" => self.accents.real_estate = value.to_string(),
            "accent.business-setup" => self.accents.business_setup = value.to_string(),
            "currency" => {
                self.currency = value.parse().map_err(|_| SettingsError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })?
            }
            "timezone" => self.timezone = value.to_string(),
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// All keys with their current values, for `config list`
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("accent.real-estate", self.accents.real_estate.clone()),
            ("accent.business-setup", self.accents.business_setup.clone()),
            ("currency", self.currency.code().to_string()),
            ("timezone", self.timezone.clone()),
        ]
    }
}

/// Errors that can occur when reading or writing settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unknown setting '{0}' (valid: accent.real-estate, accent.business-setup, currency, timezone)")]
    UnknownKey(String),

    #[error("invalid value '{value}' for setting '{key}'")]
    InvalidValue { key: String, value: String },

    #[error("no platform config directory available")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_when_file_missing() {
        let tmp = tempdir().unwrap();
        let settings = Settings::load_from(&tmp.path().join("nope.yaml"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.currency, Currency::Aed);
        assert_eq!(settings.timezone, "Asia/Dubai");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("sub/settings.yaml");

        let mut settings = Settings::default();
        settings.set("currency", "USD").unwrap();
        settings.set("accent.real-estate", "#123456").unwrap();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.currency, Currency::Usd);
        assert_eq!(loaded.accents.real_estate, "#123456");
        // Untouched keys keep defaults
        assert_eq!(loaded.timezone, "Asia/Dubai");
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        let mut settings = Settings::default();
        let err = settings.set("theme", "dark").unwrap_err();
        assert!(matches!(err, SettingsError::UnknownKey(_)));
    }

    #[test]
    fn test_set_rejects_bad_currency() {
        let mut settings = Settings::default();
        let err = settings.set("currency", "DOGE").unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
    }

    #[test]
    fn test_accent_lookup_by_brand() {
        let settings = Settings::default();
        assert_eq!(settings.accent(Brand::RealEstate), "#0f766e");
        assert_eq!(settings.accent(Brand::BusinessSetup), "#7c3aed");
    }
}
