//! Runtime configuration.
//!
//! Loaded from an optional JSON file; every field has a default, and the
//! CLI overrides individual fields from flags or `STAYSHEET_*` variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::{HotelApiClient, DEFAULT_BASE_URL};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Base URL of the hotel API, without a trailing slash.
    pub api_url: String,
    /// Directory exported PDFs are written to.
    pub out_dir: PathBuf,
    /// Maximum number of images requested per hotel.
    pub image_limit: Option<u32>,
    /// Request timeout in seconds. No timeout when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            out_dir: PathBuf::from("."),
            image_limit: None,
            timeout_secs: None,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Build an API client from this configuration.
    pub fn client(&self) -> Result<HotelApiClient> {
        let mut builder = HotelApiClient::builder().base_url(self.api_url.clone());
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(limit) = self.image_limit {
            builder = builder.image_limit(limit);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StaysheetError;

    #[test]
    fn test_empty_object_uses_defaults() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override() {
        let config =
            Config::from_json(r#"{"apiUrl": "http://hotels.test/api", "imageLimit": 4}"#).unwrap();
        assert_eq!(config.api_url, "http://hotels.test/api");
        assert_eq!(config.image_limit, Some(4));
        assert_eq!(config.out_dir, PathBuf::from("."));
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Config::from_json(r#"{"imageLimit": "many"}"#).unwrap_err();
        assert!(matches!(err, StaysheetError::ParseError { .. }));
    }

    #[test]
    fn test_client_from_config() {
        let config = Config {
            api_url: "http://hotels.test/api".into(),
            timeout_secs: Some(2),
            ..Default::default()
        };
        assert_eq!(config.client().unwrap().base_url(), "http://hotels.test/api");
    }
}
