use std::{path::PathBuf, time::Duration};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SamplerError {
    #[error("failure reading sampler configuration: {0}")]
    ConfigurationError(String),
    #[error("GET request to {url} failed: {source}")]
    RequestError {
        url: String,
        source: reqwest::Error,
    },
    #[error("GET request exceeded timeout of {}", humantime::format_duration(*timeout))]
    RequestTimeout { timeout: Duration },
    #[error("failure reading response body: {0}")]
    ResponseBodyError(reqwest::Error),
    #[error("response body is not valid JSON: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("response is missing field {path}{}", status_suffix(status))]
    MissingField {
        path: String,
        status: Option<String>,
    },
    #[error("departure time {0} is outside the representable date range")]
    TimestampOutOfRange(i64),
    #[error("failure writing {path:?}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failure writing CSV row: {0}")]
    CsvError(#[from] csv::Error),
}

fn status_suffix(status: &Option<String>) -> String {
    match status {
        Some(s) => format!(" (service status: {s})"),
        None => String::new(),
    }
}

impl SamplerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> SamplerError {
        SamplerError::IoError {
            path: path.into(),
            source,
        }
    }
}
