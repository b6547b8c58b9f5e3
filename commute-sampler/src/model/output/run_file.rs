use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
};

use crate::model::{Sample, SamplerError};

/// the filename for a run: `<origin>_to_<destination>_<start_epoch>.csv`.
pub fn run_filename(origin: &str, destination: &str, start_epoch: i64) -> String {
    format!("{origin}_to_{destination}_{start_epoch}.csv")
}

/// the append-only CSV file owned by a single run. its path is fixed at creation.
#[derive(Debug, Clone)]
pub struct RunFile {
    path: PathBuf,
}

impl RunFile {
    /// creates the output directory if needed and an empty file (no header row).
    /// an existing file with the same name is truncated.
    pub fn create(directory: &Path, filename: &str) -> Result<RunFile, SamplerError> {
        std::fs::create_dir_all(directory).map_err(|e| SamplerError::io(directory, e))?;
        let path = directory.join(filename);
        std::fs::File::create(&path).map_err(|e| SamplerError::io(&path, e))?;
        Ok(RunFile { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// appends one `time,duration` row ending in CRLF. the file is opened and
    /// closed for each call.
    pub fn append(&self, sample: &Sample) -> Result<(), SamplerError> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| SamplerError::io(&self.path, e))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(file);
        writer.serialize(sample)?;
        writer.flush().map_err(|e| SamplerError::io(&self.path, e))?;
        Ok(())
    }
}
