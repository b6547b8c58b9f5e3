pub mod directions;
pub mod output;
mod sample;
mod sampler;
mod sampler_config;
mod sampler_error;
mod stop_signal;

pub use directions::{extract_duration_text, DirectionsClient, DistanceMatrixClient};
pub use output::{run_filename, RunFile};
pub use sample::{departure_time, display_timestamp, DisplayZone, Sample, TIMESTAMP_FORMAT};
pub use sampler::{Clock, Sampler, SystemClock};
pub use sampler_config::{SamplerConfig, API_KEY_ENV_VAR, DEFAULT_BASE_URL};
pub use sampler_error::SamplerError;
pub use stop_signal::StopSignal;
