use std::path::PathBuf;

use super::{
    departure_time, directions::DirectionsClient, display_timestamp, extract_duration_text,
    output::write_snapshot, RunFile, Sample, SamplerConfig, SamplerError, StopSignal,
};

/// source of the current wall-clock time in epoch seconds.
pub trait Clock {
    fn now(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// the sampling loop for a single run. each sample queries the directions
/// service, overwrites the response snapshot, prints the result and appends
/// one row to the run file.
pub struct Sampler<D: DirectionsClient, C: Clock> {
    config: SamplerConfig,
    client: D,
    clock: C,
    run_file: RunFile,
    snapshot_path: PathBuf,
}

impl<D: DirectionsClient, C: Clock> Sampler<D, C> {
    pub fn new(config: SamplerConfig, client: D, clock: C, run_file: RunFile) -> Sampler<D, C> {
        let snapshot_path = config.snapshot_path();
        Sampler {
            config,
            client,
            clock,
            run_file,
            snapshot_path,
        }
    }

    pub fn run_file(&self) -> &RunFile {
        &self.run_file
    }

    /// collects one sample. nothing is appended to the run file unless every
    /// earlier step succeeded.
    pub fn sample_once(&self) -> Result<Sample, SamplerError> {
        let departure = departure_time(self.clock.now(), &self.config.departure_lead)?;
        let time = display_timestamp(
            departure,
            self.config.display_offset_hours,
            self.config.display_zone,
        )?;
        let body = self.client.fetch(departure)?;
        write_snapshot(&self.snapshot_path, &body)?;
        let duration = extract_duration_text(&body)?;

        println!("{time}");
        println!("{duration}");

        let sample = Sample { time, duration };
        self.run_file.append(&sample)?;
        Ok(sample)
    }

    /// samples repeatedly, waiting the configured interval between samples,
    /// until `stop` is signalled or `max_samples` is reached. the first error
    /// ends the run.
    ///
    /// # Result
    /// the number of samples written
    pub fn run(&self, stop: &StopSignal) -> Result<usize, SamplerError> {
        let mut count: usize = 0;
        loop {
            if stop.is_stopped() {
                log::info!("stop requested, ending run after {count} samples");
                break;
            }
            let sample = self.sample_once()?;
            count += 1;
            log::debug!("sample {count}: {} {}", sample.time, sample.duration);

            if self.config.max_samples.is_some_and(|max| count >= max) {
                log::info!("collected {count} samples, ending run");
                break;
            }
            if stop.wait_timeout(self.config.interval) {
                log::info!("stop requested, ending run after {count} samples");
                break;
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        collections::VecDeque,
        path::{Path, PathBuf},
        time::Duration,
    };

    use super::*;
    use crate::model::{output::read_snapshot, run_filename, DisplayZone};

    /// replays canned response bodies and records requested departure times.
    struct ScriptedClient {
        bodies: RefCell<VecDeque<String>>,
        requested: RefCell<Vec<i64>>,
    }

    impl ScriptedClient {
        fn new(bodies: &[&str]) -> ScriptedClient {
            ScriptedClient {
                bodies: RefCell::new(bodies.iter().map(|b| b.to_string()).collect()),
                requested: RefCell::new(vec![]),
            }
        }
    }

    impl DirectionsClient for ScriptedClient {
        fn fetch(&self, departure_time: i64) -> Result<String, SamplerError> {
            self.requested.borrow_mut().push(departure_time);
            self.bodies
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| SamplerError::ConfigurationError(String::from("script exhausted")))
        }
    }

    /// starts at a fixed epoch and advances by a fixed step on every read.
    struct SteppingClock {
        next: Cell<i64>,
        step: i64,
    }

    impl Clock for SteppingClock {
        fn now(&self) -> i64 {
            let now = self.next.get();
            self.next.set(now + self.step);
            now
        }
    }

    fn body(duration: &str) -> String {
        format!(r#"{{"rows":[{{"elements":[{{"duration_in_traffic":{{"text":"{duration}"}}}}]}}]}}"#)
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "commute-sampler-sampler-{name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).expect("test invariant failed: cannot create scratch dir");
        dir
    }

    fn test_config(dir: &Path) -> SamplerConfig {
        SamplerConfig {
            origin_coordinates: String::from("1,2"),
            destination_coordinates: String::from("3,4"),
            api_key: String::from("test"),
            interval: Duration::ZERO,
            display_zone: DisplayZone::Utc,
            output_directory: dir.to_path_buf(),
            ..Default::default()
        }
    }

    fn build(
        dir: &Path,
        start: i64,
        step: i64,
        bodies: &[&str],
    ) -> Sampler<ScriptedClient, SteppingClock> {
        let config = test_config(dir);
        let filename = run_filename(&config.origin, &config.destination, start);
        let run_file = RunFile::create(dir, &filename).expect("run file should be created");
        let clock = SteppingClock {
            next: Cell::new(start),
            step,
        };
        Sampler::new(config, ScriptedClient::new(bodies), clock, run_file)
    }

    fn rows(sampler: &Sampler<ScriptedClient, SteppingClock>) -> Vec<String> {
        std::fs::read_to_string(sampler.run_file().path())
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_sample_once_writes_row() {
        let dir = scratch_dir("once");
        let b = body("22 mins");
        let sampler = build(&dir, 1_700_000_000, 0, &[&b]);
        let sample = sampler.sample_once().expect("sample should succeed");

        // 1700000070 - 18000 seconds, rendered in UTC
        assert_eq!(sample.time, "2023-11-14 17:14:30");
        assert_eq!(sample.duration, "22 mins");
        assert_eq!(*sampler.client.requested.borrow(), vec![1_700_000_070]);
        assert_eq!(rows(&sampler), vec!["2023-11-14 17:14:30,22 mins"]);
        assert_eq!(
            sampler.run_file().path().file_name().unwrap(),
            "work_to_home_1700000000.csv"
        );
    }

    #[test]
    fn test_empty_rows_fails_before_write() {
        let dir = scratch_dir("empty-rows");
        let sampler = build(&dir, 1_700_000_000, 0, &[r#"{"rows":[]}"#]);
        let result = sampler.sample_once();
        assert!(matches!(result, Err(SamplerError::MissingField { .. })));
        assert!(rows(&sampler).is_empty());
        // the snapshot is still written for the failed response
        let snapshot = read_snapshot(&dir.join("data_file.json")).unwrap();
        assert_eq!(snapshot, r#"{"rows":[]}"#);
    }

    #[test]
    fn test_run_stops_at_max_samples() {
        let dir = scratch_dir("two");
        let (a, b) = (body("20 mins"), body("31 mins"));
        let mut sampler = build(&dir, 1_700_000_000, 1800, &[&a, &b]);
        sampler.config.max_samples = Some(2);
        let count = sampler.run(&StopSignal::new()).expect("run should succeed");
        assert_eq!(count, 2);

        let written = rows(&sampler);
        assert_eq!(written.len(), 2);
        let times = written
            .iter()
            .map(|r| r.split(',').next().unwrap().to_string())
            .collect::<Vec<_>>();
        assert!(times[0] < times[1], "timestamps not increasing: {times:?}");
        assert_eq!(written[1], "2023-11-14 17:44:30,31 mins");
    }

    #[test]
    fn test_snapshot_holds_latest_response() {
        let dir = scratch_dir("snapshot");
        let (a, b) = (body("20 mins"), body("31 mins"));
        let mut sampler = build(&dir, 1_700_000_000, 1, &[&a, &b]);
        sampler.config.max_samples = Some(2);
        sampler.run(&StopSignal::new()).unwrap();
        let snapshot = read_snapshot(&dir.join("data_file.json")).unwrap();
        assert_eq!(snapshot, b);
    }

    #[test]
    fn test_run_error_keeps_earlier_rows() {
        let dir = scratch_dir("fail-fast");
        let a = body("20 mins");
        let sampler = build(&dir, 1_700_000_000, 1, &[&a, "not json"]);
        let result = sampler.run(&StopSignal::new());
        assert!(matches!(result, Err(SamplerError::MalformedResponse(_))));
        assert_eq!(rows(&sampler).len(), 1);
    }

    #[test]
    fn test_stopped_signal_samples_nothing() {
        let dir = scratch_dir("stopped");
        let sampler = build(&dir, 1_700_000_000, 1, &[]);
        let stop = StopSignal::new();
        stop.stop();
        assert_eq!(sampler.run(&stop).unwrap(), 0);
        assert!(sampler.client.requested.borrow().is_empty());
    }
}
