//! Pipeline driver: discover, extract and load the song data set, then the
//! log data set, committing once per file.

use crate::discovery::find_files;
use crate::error::EtlResult;
use crate::extract::{extract_log_file, extract_song_file};
use crate::loader::{LoadStats, Loader};
use crate::warehouse::{ConflictPolicy, Statements, WarehouseStore};
use std::fmt;
use std::path::Path;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataSet {
    Songs,
    Logs,
}

impl fmt::Display for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSet::Songs => write!(f, "song"),
            DataSet::Logs => write!(f, "log"),
        }
    }
}

/// Outcome of a complete run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub song_files: usize,
    pub log_files: usize,
    pub rows: LoadStats,
}

pub struct Pipeline<'a> {
    store: &'a mut WarehouseStore,
    statements: Statements,
    extension: String,
}

impl<'a> Pipeline<'a> {
    pub fn new(store: &'a mut WarehouseStore, policy: ConflictPolicy, extension: &str) -> Self {
        Self {
            store,
            statements: Statements::new(policy),
            extension: extension.to_string(),
        }
    }

    /// Load the song data set, then the log data set.
    ///
    /// Stops at the first error. Files finished before the error stay
    /// committed.
    pub fn run(&mut self, song_data: &Path, log_data: &Path) -> EtlResult<RunSummary> {
        let (song_files, song_rows) = self.process_data(song_data, DataSet::Songs)?;
        let (log_files, log_rows) = self.process_data(log_data, DataSet::Logs)?;

        let mut rows = song_rows;
        rows += log_rows;
        Ok(RunSummary {
            song_files,
            log_files,
            rows,
        })
    }

    /// Process every data file under `root`, returning the number of files
    /// and the rows issued.
    pub fn process_data(&mut self, root: &Path, data_set: DataSet) -> EtlResult<(usize, LoadStats)> {
        let files = find_files(root, &self.extension)?;
        let num_files = files.len();
        info!("{} {} files found in {}", num_files, data_set, root.display());

        let mut stats = LoadStats::default();
        for (i, path) in files.iter().enumerate() {
            stats += self.process_file(path, data_set)?;
            info!("{}/{} files processed.", i + 1, num_files);
        }
        Ok((num_files, stats))
    }

    fn process_file(&mut self, path: &Path, data_set: DataSet) -> EtlResult<LoadStats> {
        let tx = self.store.begin_file()?;
        let loader = Loader::new(&tx, &self.statements);
        let stats = match data_set {
            DataSet::Songs => loader.load_song_file(&extract_song_file(path)?)?,
            DataSet::Logs => loader.load_log_file(&extract_log_file(path)?)?,
        };
        tx.commit()?;
        Ok(stats)
    }
}
