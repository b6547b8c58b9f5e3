mod run;

pub use run::{run_inspect, run_sampler};
