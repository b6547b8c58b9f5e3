pub mod sample;
mod sampler_cli;

pub use sampler_cli::{SamplerCliArguments, SamplerOperation};
