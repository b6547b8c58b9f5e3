use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};

use super::{DisplayZone, SamplerError};

/// environment variable consulted when no API key is configured.
pub const API_KEY_ENV_VAR: &str = "DIRECTIONS_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// defines a sampling run: which trip to measure, against which service,
/// how often, and where to write the results. built once at startup and
/// never modified while the loop runs.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct SamplerConfig {
    /// label for the trip origin, used in the output filename
    pub origin: String,
    /// label for the trip destination, used in the output filename
    pub destination: String,
    /// origin location as sent to the service, such as "39.74,-104.99"
    pub origin_coordinates: String,
    pub destination_coordinates: String,
    pub api_key: String,
    pub base_url: String,
    pub units: String,
    /// time between the end of one sample and the start of the next
    #[serde(with = "duration_codec")]
    pub interval: Duration,
    /// how far past "now" the queried departure time is placed
    #[serde(with = "duration_codec")]
    pub departure_lead: Duration,
    #[serde(with = "duration_codec")]
    pub request_timeout: Duration,
    /// fixed hour offset added to the displayed timestamp
    pub display_offset_hours: i64,
    pub display_zone: DisplayZone,
    pub output_directory: PathBuf,
    pub snapshot_filename: String,
    /// stop after this many samples. runs until stopped when empty.
    pub max_samples: Option<usize>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            origin: String::from("work"),
            destination: String::from("home"),
            origin_coordinates: String::new(),
            destination_coordinates: String::new(),
            api_key: String::new(),
            base_url: String::from(DEFAULT_BASE_URL),
            units: String::from("imperial"),
            interval: Duration::from_secs(1800),
            departure_lead: Duration::from_secs(70),
            request_timeout: Duration::from_secs(30),
            display_offset_hours: -5,
            display_zone: DisplayZone::Local,
            output_directory: PathBuf::from("."),
            snapshot_filename: String::from("data_file.json"),
            max_samples: None,
        }
    }
}

impl SamplerConfig {
    /// fills an empty API key from [`API_KEY_ENV_VAR`], if set.
    pub fn with_api_key_from_env(mut self) -> Self {
        if self.api_key.is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV_VAR) {
                log::debug!("using API key from {API_KEY_ENV_VAR}");
                self.api_key = key;
            }
        }
        self
    }

    /// confirms the configuration can produce a request before any file is created.
    pub fn validate(&self) -> Result<(), SamplerError> {
        let required = [
            ("origin", &self.origin),
            ("destination", &self.destination),
            ("origin_coordinates", &self.origin_coordinates),
            ("destination_coordinates", &self.destination_coordinates),
            ("api_key", &self.api_key),
            ("base_url", &self.base_url),
            ("snapshot_filename", &self.snapshot_filename),
        ];
        let missing = required
            .iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(k, _)| *k)
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(SamplerError::ConfigurationError(format!(
                "missing required values: {}",
                missing.join(", ")
            )));
        }
        if i64::try_from(self.departure_lead.as_secs()).is_err() {
            return Err(SamplerError::ConfigurationError(format!(
                "departure_lead of {}s is too large",
                self.departure_lead.as_secs()
            )));
        }
        if Instant::now().checked_add(self.interval).is_none() {
            return Err(SamplerError::ConfigurationError(format!(
                "interval of {}s is too large",
                self.interval.as_secs()
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(SamplerError::ConfigurationError(String::from(
                "request_timeout must be greater than zero",
            )));
        }
        Ok(())
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.output_directory.join(&self.snapshot_filename)
    }
}

impl TryFrom<&String> for SamplerConfig {
    type Error = SamplerError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let read = || {
            std::fs::read_to_string(f).map_err(|e| {
                SamplerError::ConfigurationError(format!("failure reading {f}: {e}"))
            })
        };
        if f.ends_with(".toml") {
            toml::from_str(&read()?).map_err(|e| {
                SamplerError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else if f.ends_with(".json") {
            serde_json::from_str(&read()?).map_err(|e| {
                SamplerError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else {
            Err(SamplerError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )))
        }
    }
}

/// humantime strings ("30m", "70s") for durations in config files.
mod duration_codec {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&humantime::format_duration(*d).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let s = String::deserialize(d)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}
