use std::{path::Path, time::Duration};

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::model::{SamplerConfig, SamplerError};

/// command line tool that samples travel time between two fixed points
/// from a directions API and appends each sample to a CSV file.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct SamplerCliArguments {
    /// select the sampler operation to run
    #[command(subcommand)]
    pub op: SamplerOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum SamplerOperation {
    /// repeatedly queries the directions service, writing one row per sample
    /// to <origin>_to_<destination>_<start epoch>.csv in the output directory.
    Sample {
        /// optional .toml or .json file with sampler settings. flags given
        /// here take precedence over values in the file.
        #[arg(short, long)]
        config_file: Option<String>,
        /// label for the trip origin
        #[arg(long)]
        origin: Option<String>,
        /// label for the trip destination
        #[arg(long)]
        destination: Option<String>,
        /// origin as sent to the service, such as "39.74,-104.99"
        #[arg(long)]
        origin_coordinates: Option<String>,
        /// destination as sent to the service
        #[arg(long)]
        destination_coordinates: Option<String>,
        /// API key. falls back to the DIRECTIONS_API_KEY environment variable.
        #[arg(long)]
        api_key: Option<String>,
        /// time between samples. provide in human-readable time values
        /// 30s, 30m, 2h...
        #[arg(short, long, value_parser = parse_duration)]
        interval: Option<Duration>,
        /// stop after this many samples instead of running until interrupted
        #[arg(short, long)]
        samples: Option<usize>,
        /// output directory path.
        #[arg(short, long)]
        output_directory: Option<String>,
    },
    /// decodes a response snapshot file and prints the duration it contains
    Inspect {
        /// path to a snapshot written by the sample operation
        #[arg(long, default_value_t = String::from("data_file.json"))]
        snapshot_file: String,
    },
}

impl SamplerOperation {
    pub fn run(&self) -> Result<(), SamplerError> {
        match self {
            SamplerOperation::Sample {
                config_file,
                origin,
                destination,
                origin_coordinates,
                destination_coordinates,
                api_key,
                interval,
                samples,
                output_directory,
            } => {
                let mut conf = match config_file {
                    None => SamplerConfig::default(),
                    Some(f) => {
                        log::info!("reading sampler configuration from {f}");
                        SamplerConfig::try_from(f)?
                    }
                };
                override_with(&mut conf.origin, origin);
                override_with(&mut conf.destination, destination);
                override_with(&mut conf.origin_coordinates, origin_coordinates);
                override_with(&mut conf.destination_coordinates, destination_coordinates);
                override_with(&mut conf.api_key, api_key);
                if let Some(i) = interval {
                    conf.interval = *i;
                }
                if samples.is_some() {
                    conf.max_samples = *samples;
                }
                if let Some(dir) = output_directory {
                    conf.output_directory = Path::new(dir).to_path_buf();
                }
                crate::app::sample::run_sampler(conf.with_api_key_from_env())
            }
            SamplerOperation::Inspect { snapshot_file } => {
                crate::app::sample::run_inspect(Path::new(snapshot_file))
            }
        }
    }
}

fn override_with(target: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s).map_err(|e| format!("Invalid duration: {}", e))
}
