//! Versioned binary encoding of [`Settings`] for the key-value store.
//!
//! The store keeps two records: the schema version and the postcard-encoded
//! settings. Records older than the current schema are discarded rather than
//! migrated.

use alloc::vec::Vec;
use log::{debug, warn};
use thiserror_no_std::Error;

use super::Settings;

/// Schema version written alongside every encoded record.
pub const CURRENT_SETTINGS_VERSION: u32 = 7;

/// Newest schema that is no longer readable.
const LAST_LEGACY_VERSION: u32 = 6;

#[derive(Debug, Error)]
pub enum SettingsError {
    /// Serialization into the record buffer failed
    #[error("Failed to encode settings: {0}")]
    Encode(postcard::Error),

    /// The stored record is truncated or malformed
    #[error("Failed to decode settings: {0}")]
    Decode(postcard::Error),

    /// The record was written by a newer schema
    #[error("Unsupported settings version {found} (current is {current})")]
    UnsupportedVersion { found: u32, current: u32 },
}

/// Encode a settings snapshot for storage under [`CURRENT_SETTINGS_VERSION`].
pub fn encode(settings: &Settings) -> Result<Vec<u8>, SettingsError> {
    postcard::to_allocvec(settings).map_err(SettingsError::Encode)
}

/// Decode a stored record.
///
/// A missing or legacy version yields the defaults.
pub fn decode(version: Option<u32>, bytes: &[u8]) -> Result<Settings, SettingsError> {
    match version {
        None => Ok(Settings::default()),
        Some(found) if found <= LAST_LEGACY_VERSION => {
            debug!("Discarding settings written by schema {}", found);
            Ok(Settings::default())
        }
        Some(CURRENT_SETTINGS_VERSION) => {
            postcard::from_bytes(bytes).map_err(SettingsError::Decode)
        }
        Some(found) => Err(SettingsError::UnsupportedVersion {
            found,
            current: CURRENT_SETTINGS_VERSION,
        }),
    }
}

/// Load settings from the store, falling back to defaults on any error.
pub fn load(version: Option<u32>, bytes: Option<&[u8]>) -> Settings {
    let Some(bytes) = bytes else {
        debug!("No stored settings, using defaults");
        return Settings::default();
    };

    match decode(version, bytes) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("{}; using default settings", e);
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SidebarLocation;
    use crate::widgets::WidgetType;

    #[test]
    fn test_stored_settings_survive_reload() {
        let mut settings = Settings::default();
        settings.sidebar_location = SidebarLocation::Left;
        settings.widgets = [
            WidgetType::Date,
            WidgetType::Seconds,
            WidgetType::HeartRate,
            WidgetType::Empty,
        ];
        settings.alt_clock_offset = -5;
        settings.decimal_separator = ',';

        let bytes = encode(&settings).unwrap();
        let loaded = load(Some(CURRENT_SETTINGS_VERSION), Some(&bytes));
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_legacy_version_yields_defaults() {
        let mut settings = Settings::default();
        settings.use_large_fonts = true;
        let bytes = encode(&settings).unwrap();

        let loaded = decode(Some(6), &bytes).unwrap();
        assert_eq!(loaded, Settings::default());
        assert_eq!(decode(None, &bytes).unwrap(), Settings::default());
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let bytes = encode(&Settings::default()).unwrap();
        let err = decode(Some(8), &bytes).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::UnsupportedVersion {
                found: 8,
                current: CURRENT_SETTINGS_VERSION
            }
        ));
    }

    #[test]
    fn test_truncated_record_falls_back_to_defaults() {
        let mut settings = Settings::default();
        settings.sidebar_location = SidebarLocation::Top;
        let bytes = encode(&settings).unwrap();

        let err = decode(Some(CURRENT_SETTINGS_VERSION), &bytes[..4]).unwrap_err();
        assert!(matches!(err, SettingsError::Decode(_)));

        let loaded = load(Some(CURRENT_SETTINGS_VERSION), Some(&bytes[..4]));
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_missing_record_yields_defaults() {
        assert_eq!(load(Some(CURRENT_SETTINGS_VERSION), None), Settings::default());
    }
}
