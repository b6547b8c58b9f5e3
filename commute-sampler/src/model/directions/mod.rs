mod directions_client;
mod distance_matrix_client;
mod response_ops;
mod url_ops;

pub use directions_client::DirectionsClient;
pub use distance_matrix_client::DistanceMatrixClient;
pub use response_ops::{extract_duration_text, DURATION_TEXT_PATH};
pub use url_ops::{build_request_url, redact_api_key};
