mod run_file;
mod snapshot_ops;

pub use run_file::{run_filename, RunFile};
pub use snapshot_ops::{read_snapshot, write_snapshot};
