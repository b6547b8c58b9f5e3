use crate::model::SamplerError;

/// a source of travel-duration estimates. implementations return the raw
/// response body for a departure time given in epoch seconds.
pub trait DirectionsClient {
    fn fetch(&self, departure_time: i64) -> Result<String, SamplerError>;
}
