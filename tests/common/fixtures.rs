//! Data tree and database fixtures

use rusqlite::Connection;
use songplay_etl::{ConflictPolicy, EtlResult, Pipeline, RunSummary, WarehouseStore};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub type SongTuple = (String, Option<String>, String, Option<i64>, Option<f64>);
pub type ArtistTuple = (String, Option<String>, Option<String>, Option<f64>, Option<f64>);
pub type UserTuple = (String, Option<String>, Option<String>, Option<String>, Option<String>);
pub type SongplayTuple = (
    i64,
    String,
    Option<String>,
    String,
    String,
    Option<i64>,
    Option<String>,
    Option<String>,
);

/// Join event lines into the content of a log file.
fn log_lines(lines: &[&str]) -> String {
    let mut content = lines.join("\n");
    content.push('\n');
    content
}

/// A temporary directory holding `song_data/`, `log_data/` and the
/// warehouse database file.
pub struct DataTree {
    _dir: TempDir,
    pub song_data: PathBuf,
    pub log_data: PathBuf,
    pub db_path: PathBuf,
}

fn write_file(root: &Path, rel_path: &str, content: &str) {
    let path = root.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(&path, content).expect("Failed to write fixture file");
}

impl DataTree {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let song_data = dir.path().join("song_data");
        let log_data = dir.path().join("log_data");
        fs::create_dir_all(&song_data).expect("Failed to create song_data");
        fs::create_dir_all(&log_data).expect("Failed to create log_data");
        let db_path = dir.path().join("sparkify.db");
        Self {
            _dir: dir,
            song_data,
            log_data,
            db_path,
        }
    }

    pub fn write_song(&self, rel_path: &str, content: &str) {
        write_file(&self.song_data, rel_path, content);
    }

    pub fn write_log(&self, rel_path: &str, lines: &[&str]) {
        write_file(&self.log_data, rel_path, &log_lines(lines));
    }

    pub fn open_store(&self) -> WarehouseStore {
        WarehouseStore::open(&self.db_path).expect("Failed to open warehouse")
    }

    /// Run the whole pipeline against this tree's database.
    pub fn run(&self, policy: ConflictPolicy) -> EtlResult<RunSummary> {
        self.load(WarehouseStore::open(&self.db_path)?, policy)
    }

    /// Same as `run`, after dropping and recreating the warehouse tables.
    pub fn run_fresh(&self, policy: ConflictPolicy) -> EtlResult<RunSummary> {
        self.load(WarehouseStore::open_fresh(&self.db_path)?, policy)
    }

    fn load(&self, mut store: WarehouseStore, policy: ConflictPolicy) -> EtlResult<RunSummary> {
        let summary = Pipeline::new(&mut store, policy, "json").run(&self.song_data, &self.log_data);
        store.close()?;
        summary
    }

    /// A plain connection for inspecting what was stored.
    pub fn conn(&self) -> Connection {
        Connection::open(&self.db_path).expect("Failed to open database")
    }

    pub fn songs(&self) -> Vec<SongTuple> {
        self.query(
            "SELECT song_id, title, artist_id, year, duration FROM songs ORDER BY song_id",
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?)),
        )
    }

    pub fn artists(&self) -> Vec<ArtistTuple> {
        self.query(
            "SELECT artist_id, name, location, latitude, longitude FROM artists ORDER BY artist_id",
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?)),
        )
    }

    pub fn users(&self) -> Vec<UserTuple> {
        self.query(
            "SELECT user_id, first_name, last_name, gender, level FROM users ORDER BY user_id",
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?)),
        )
    }

    pub fn time_starts(&self) -> Vec<i64> {
        self.query("SELECT start_time FROM time ORDER BY start_time", |r| {
            r.get(0)
        })
    }

    pub fn songplays(&self) -> Vec<SongplayTuple> {
        self.query(
            "SELECT start_time, user_id, level, song_id, artist_id, session_id, location, user_agent
             FROM songplays ORDER BY songplay_id",
            |r| {
                Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                    r.get(5)?,
                    r.get(6)?,
                    r.get(7)?,
                ))
            },
        )
    }

    fn query<T, F>(&self, sql: &str, f: F) -> Vec<T>
    where
        F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.conn();
        let mut stmt = conn.prepare(sql).expect("Failed to prepare query");
        let rows = stmt
            .query_map([], f)
            .expect("Failed to run query")
            .collect::<rusqlite::Result<Vec<T>>>()
            .expect("Failed to read rows");
        rows
    }
}
