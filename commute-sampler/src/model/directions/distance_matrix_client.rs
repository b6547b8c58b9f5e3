use std::time::Duration;

use reqwest::blocking::Client;

use super::{build_request_url, redact_api_key, DirectionsClient};
use crate::model::{SamplerConfig, SamplerError};

/// blocking client for a distance matrix style web API. every request is
/// bounded by the configured timeout.
pub struct DistanceMatrixClient {
    client: Client,
    config: SamplerConfig,
}

impl DistanceMatrixClient {
    pub fn new(config: &SamplerConfig) -> Result<DistanceMatrixClient, SamplerError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                SamplerError::ConfigurationError(format!("failure building HTTP client: {e}"))
            })?;
        Ok(DistanceMatrixClient {
            client,
            config: config.clone(),
        })
    }

    fn timeout(&self) -> Duration {
        self.config.request_timeout
    }
}

impl DirectionsClient for DistanceMatrixClient {
    fn fetch(&self, departure_time: i64) -> Result<String, SamplerError> {
        let url = build_request_url(&self.config, departure_time);
        let redacted = redact_api_key(&url);
        log::debug!("GET {redacted}");

        let response = self.client.get(&url).send().map_err(|e| {
            if e.is_timeout() {
                SamplerError::RequestTimeout {
                    timeout: self.timeout(),
                }
            } else {
                SamplerError::RequestError {
                    url: redacted.clone(),
                    source: e.without_url(),
                }
            }
        })?;

        // the body is parsed whatever the status; the service reports most
        // failures inside a 200 response anyway.
        let status = response.status();
        log::debug!("response status {status} from {redacted}");
        response.text().map_err(|e| {
            if e.is_timeout() {
                SamplerError::RequestTimeout {
                    timeout: self.timeout(),
                }
            } else {
                SamplerError::ResponseBodyError(e.without_url())
            }
        })
    }
}
