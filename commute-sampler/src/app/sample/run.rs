use std::path::Path;

use crate::model::{
    extract_duration_text, output::read_snapshot, run_filename, DistanceMatrixClient, RunFile,
    Sampler, SamplerConfig, SamplerError, StopSignal, SystemClock,
};

/// runs the sampling loop until interrupted or the configured sample count is
/// reached. the run file name is fixed from the start time before the first sample.
///
/// # Arguments
/// * conf - sampler configuration, validated before any file is created
///
/// # Result
/// If successful, returns nothing, otherwise the error that ended the run
pub fn run_sampler(conf: SamplerConfig) -> Result<(), SamplerError> {
    conf.validate()?;
    let start = chrono::Utc::now().timestamp();
    let filename = run_filename(&conf.origin, &conf.destination, start);
    log::info!("from {} to {}", conf.origin, conf.destination);
    let run_file = RunFile::create(&conf.output_directory, &filename)?;
    log::info!(
        "writing samples to {:?} every {}",
        run_file.path(),
        humantime::format_duration(conf.interval)
    );

    let stop = StopSignal::new();
    if let Err(e) = stop.stop_on_ctrl_c() {
        log::warn!("Ctrl-C will terminate without a clean shutdown: {e}");
    }

    let client = DistanceMatrixClient::new(&conf)?;
    let sampler = Sampler::new(conf, client, SystemClock, run_file);
    let count = sampler.run(&stop)?;
    log::info!("wrote {count} samples to {:?}", sampler.run_file().path());
    Ok(())
}

/// prints the duration text found in a response snapshot.
pub fn run_inspect(snapshot_file: &Path) -> Result<(), SamplerError> {
    let body = read_snapshot(snapshot_file)?;
    let duration = extract_duration_text(&body)?;
    println!("{duration}");
    Ok(())
}
