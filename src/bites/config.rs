//! # Configuration
//!
//! Resolved in priority order (highest first):
//! 1. **Environment**: `BITES_PLACES_API_KEY`, `BITES_SEARCH_RADIUS_M`, ...
//! 2. **File**: `config.json` in the data directory.
//! 3. **Compiled defaults**.
//!
//! `bites config set` only ever writes the file layer, so environment
//! overrides are never persisted by accident.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `places-api-key` | unset | Key for the places service |
//! | `places-base-url` | Google Places | Service base URL |
//! | `autocomplete-types` | `establishment` | Autocomplete `types` filter, empty for none |
//! | `search-radius-m` | `5000` | Radius used with a location bias |
//! | `request-timeout-secs` | `10` | HTTP timeout |
//! | `default-latitude` / `default-longitude` | San Francisco | Where new entries start |

use crate::error::{BitesError, Result};
use crate::model::{Coordinates, DEFAULT_LOCATION};
use crate::places::transport::DEFAULT_BASE_URL;
use figment::providers::{Env, Format, Json, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const ENV_PREFIX: &str = "BITES_";

pub const KEYS: &[&str] = &[
    "places-api-key",
    "places-base-url",
    "autocomplete-types",
    "search-radius-m",
    "request-timeout-secs",
    "default-latitude",
    "default-longitude",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BitesConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub places_api_key: Option<String>,
    pub places_base_url: String,
    pub autocomplete_types: String,
    pub search_radius_m: u32,
    pub request_timeout_secs: u64,
    pub default_latitude: f64,
    pub default_longitude: f64,
}

impl Default for BitesConfig {
    fn default() -> Self {
        Self {
            places_api_key: None,
            places_base_url: DEFAULT_BASE_URL.to_string(),
            autocomplete_types: "establishment".to_string(),
            search_radius_m: 5000,
            request_timeout_secs: 10,
            default_latitude: DEFAULT_LOCATION.latitude,
            default_longitude: DEFAULT_LOCATION.longitude,
        }
    }
}

impl BitesConfig {
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILENAME)
    }

    /// Effective configuration: defaults, then the file, then the environment.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self::file_figment(dir)
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?)
    }

    /// Defaults plus the file only.
    pub fn load_file(dir: &Path) -> Result<Self> {
        Ok(Self::file_figment(dir).extract()?)
    }

    fn file_figment(dir: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(BitesConfig::default()))
            .merge(Json::file(Self::path_in(dir)))
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(BitesError::Io)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(BitesError::Serialization)?;
        fs::write(Self::path_in(dir), content).map_err(BitesError::Io)?;
        Ok(())
    }

    pub fn default_location(&self) -> Coordinates {
        Coordinates::new(self.default_latitude, self.default_longitude)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// `None` when no filter should be sent.
    pub fn autocomplete_types(&self) -> Option<String> {
        let t = self.autocomplete_types.trim();
        (!t.is_empty()).then(|| t.to_string())
    }

    /// Display value of a key; `None` for unknown keys.
    /// The API key is masked.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match normalize_key(key).as_str() {
            "places-api-key" => match &self.places_api_key {
                Some(k) => mask(k),
                None => "(unset)".to_string(),
            },
            "places-base-url" => self.places_base_url.clone(),
            "autocomplete-types" => self.autocomplete_types.clone(),
            "search-radius-m" => self.search_radius_m.to_string(),
            "request-timeout-secs" => self.request_timeout_secs.to_string(),
            "default-latitude" => self.default_latitude.to_string(),
            "default-longitude" => self.default_longitude.to_string(),
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        match normalize_key(key).as_str() {
            "places-api-key" => {
                self.places_api_key = (!value.is_empty()).then(|| value.to_string());
            }
            "places-base-url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(format!("places-base-url must be an http(s) URL: {}", value));
                }
                self.places_base_url = value.to_string();
            }
            "autocomplete-types" => self.autocomplete_types = value.to_string(),
            "search-radius-m" => self.search_radius_m = parse_value(key, value)?,
            "request-timeout-secs" => self.request_timeout_secs = parse_value(key, value)?,
            "default-latitude" => self.default_latitude = parse_value(key, value)?,
            "default-longitude" => self.default_longitude = parse_value(key, value)?,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> std::result::Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid value for {}: {}", key, value))
}

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    format!("****{}", visible)
}
