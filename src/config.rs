//! Configuration options for harvesting.
//!
//! This module provides the [`HarvestConfig`] struct which carries the format
//! pattern selecting the distribution to harvest from each record.

use crate::error::{HarvestError, Result};
use crate::format_matcher::{FormatMatcher, DEFAULT_FORMAT_PATTERN};
use serde::{Deserialize, Serialize};

fn default_format() -> String {
    DEFAULT_FORMAT_PATTERN.to_string()
}

/// Configuration for a harvest.
///
/// # Examples
///
/// ```
/// use dcat_harvest::HarvestConfig;
///
/// // Default configuration harvests Esri REST endpoints
/// let config = HarvestConfig::default();
/// assert_eq!(config.format, "esri rest");
///
/// // Harvest KML or KMZ downloads instead
/// let config = HarvestConfig::new().with_format("kml|kmz");
/// assert!(config.matcher().matches("KMZ"));
///
/// // Loaded from a JSON document
/// let config = HarvestConfig::from_json_str(r#"{"format": "csv"}"#)?;
/// assert_eq!(config.format, "csv");
/// # Ok::<(), dcat_harvest::HarvestError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Case-insensitive pattern a distribution's format must match in full.
    ///
    /// An invalid pattern is replaced by [`DEFAULT_FORMAT_PATTERN`] when the
    /// matcher is compiled; it is never reported as an error.
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl HarvestConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the format pattern.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Load a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON or is not an object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(HarvestError::Config(format!(
                "expected a JSON object, found {value}"
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Compile the format pattern, falling back to the default if it is invalid.
    #[must_use]
    pub fn matcher(&self) -> FormatMatcher {
        FormatMatcher::compile(&self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarvestConfig::default();
        assert_eq!(config.format, DEFAULT_FORMAT_PATTERN);
        assert!(!config.matcher().is_fallback());
    }

    #[test]
    fn test_missing_format_takes_default() {
        let config = HarvestConfig::from_json_str("{}").unwrap();
        assert_eq!(config, HarvestConfig::default());
    }

    #[test]
    fn test_invalid_pattern_loads_and_falls_back() {
        let config = HarvestConfig::from_json_str(r#"{"format": "[json"}"#).unwrap();
        assert_eq!(config.format, "[json");
        let matcher = config.matcher();
        assert!(matcher.is_fallback());
        assert_eq!(matcher.as_str(), DEFAULT_FORMAT_PATTERN);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(matches!(
            HarvestConfig::from_json_str("{format"),
            Err(HarvestError::Json(_))
        ));
        assert!(matches!(
            HarvestConfig::from_json_str(r#"["csv"]"#),
            Err(HarvestError::Config(_))
        ));
    }

    #[test]
    fn test_with_format_controls_matcher() {
        let matcher = HarvestConfig::new().with_format("geojson|json").matcher();
        assert!(matcher.matches("GeoJSON"));
        assert!(!matcher.matches("Esri REST"));
    }
}
