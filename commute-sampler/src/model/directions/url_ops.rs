use crate::model::SamplerConfig;

/// builds the distance matrix request URL by concatenation. coordinates and key
/// are inserted as configured, without escaping.
pub fn build_request_url(config: &SamplerConfig, departure_time: i64) -> String {
    format!(
        "{}?origins={}&destinations={}&units={}&departure_time={}&key={}",
        config.base_url,
        config.origin_coordinates,
        config.destination_coordinates,
        config.units,
        departure_time,
        config.api_key
    )
}

/// replaces the value of the `key` query parameter so URLs can be logged.
pub fn redact_api_key(url: &str) -> String {
    match url.find("&key=") {
        Some(idx) => format!("{}&key=<redacted>", &url[..idx]),
        None => url.to_string(),
    }
}
