use std::path::Path;

use serde::{Deserialize, Serialize};

use folio_events::DEFAULT_CHANNEL_CAPACITY;

use crate::error::{SdkError, SdkResult};
use crate::telemetry;

/// Runtime configuration for a [`Folio`](crate::Folio) instance.
///
/// Every field has a default, so a TOML file only needs the keys it
/// overrides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Domain separator mixed into every allocated container id.
    pub id_namespace: String,
    /// Buffer size of each event-log subscriber channel.
    pub event_channel_capacity: usize,
    /// `tracing` filter directive used when the environment sets none.
    pub log_filter: String,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            id_namespace: "folio".into(),
            event_channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            log_filter: "info".into(),
        }
    }
}

impl FolioConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> SdkResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| SdkError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: &Path) -> SdkResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> SdkResult<String> {
        toml::to_string(self).map_err(|e| SdkError::Config(e.to_string()))
    }

    /// Install the global subscriber with `log_filter` as the fallback
    /// filter. See [`init_tracing`](crate::telemetry::init_tracing).
    pub fn init_tracing(&self) -> bool {
        telemetry::init_tracing(&self.log_filter)
    }

    pub fn validate(&self) -> SdkResult<()> {
        if self.id_namespace.trim().is_empty() {
            return Err(SdkError::Config("id_namespace must not be empty".into()));
        }
        if self.event_channel_capacity == 0 {
            return Err(SdkError::Config(
                "event_channel_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = FolioConfig::default();
        assert_eq!(c.id_namespace, "folio");
        assert_eq!(c.event_channel_capacity, 1024);
        assert_eq!(c.log_filter, "info");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = FolioConfig::from_toml_str("id_namespace = \"staging\"\n").unwrap();
        assert_eq!(c.id_namespace, "staging");
        assert_eq!(c.event_channel_capacity, 1024);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(FolioConfig::from_toml_str("").unwrap(), FolioConfig::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = FolioConfig::from_toml_str("event_channel_capacity = 0").unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));

        let err = FolioConfig::from_toml_str("id_namespace = \"  \"").unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));

        let err = FolioConfig::from_toml_str("event_channel_capacity = \"lots\"").unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let c = FolioConfig {
            id_namespace: "test".into(),
            event_channel_capacity: 8,
            log_filter: "folio_sdk=debug".into(),
        };
        let text = c.to_toml_string().unwrap();
        assert_eq!(FolioConfig::from_toml_str(&text).unwrap(), c);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "event_channel_capacity = 16").unwrap();
        writeln!(file, "log_filter = \"warn\"").unwrap();

        let c = FolioConfig::load(file.path()).unwrap();
        assert_eq!(c.event_channel_capacity, 16);
        assert_eq!(c.log_filter, "warn");
    }

    #[test]
    fn log_filter_drives_tracing() {
        let c = FolioConfig::from_toml_str("log_filter = \"folio_registry=debug\"").unwrap();
        let filter = telemetry::env_filter(None, &c.log_filter);
        assert_eq!(filter.to_string().to_lowercase(), "folio_registry=debug");

        c.init_tracing();
        assert!(!c.init_tracing());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FolioConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SdkError::Io(_)));
    }
}
