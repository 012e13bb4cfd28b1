//! Songplay ETL library
//!
//! Loads song metadata and user activity logs from line-delimited JSON files
//! into a SQLite star schema (songs, artists, time, users, songplays).

pub mod config;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod loader;
pub mod pipeline;
pub mod sqlite_persistence;
pub mod warehouse;

// Re-export commonly used types for convenience
pub use error::{EtlError, EtlResult};
pub use pipeline::{DataSet, Pipeline, RunSummary};
pub use warehouse::{ConflictPolicy, WarehouseStore};
