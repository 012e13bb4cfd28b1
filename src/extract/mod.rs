//! Record extraction from line-delimited JSON data files.
//!
//! Song files carry one record, log files one event per line. Both are read
//! into typed records and shaped into warehouse rows here; nothing in this
//! module writes to the store.

mod log;
mod song;
mod time;

pub use log::{extract_log_file, parse_log_events, LogEvent, LogFileRows, PlayCandidate, SongLookup};
pub use song::{extract_song_file, parse_song_record, SongFileRows, SongRecord};
pub use time::time_row;

use crate::error::{EtlError, EtlResult};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::Path;

fn read_data_file(path: &Path) -> EtlResult<String> {
    std::fs::read_to_string(path).map_err(|source| EtlError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse every non-blank line of `content` as a `T`, paired with its 1-based
/// line number.
fn parse_lines<T: DeserializeOwned>(path: &Path, content: &str) -> EtlResult<Vec<(usize, T)>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .map(|record| (index + 1, record))
                .map_err(|source| EtlError::Parse {
                    path: path.to_path_buf(),
                    line: index + 1,
                    source,
                })
        })
        .collect()
}

fn number_from_str<E: serde::de::Error>(s: &str) -> Result<Option<f64>, E> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| E::custom(format!("expected a number, found \"{}\"", s)))
}

/// Integer field that also accepts floats (truncated) and numeric strings.
fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => Ok(Some(i)),
            None => n
                .as_f64()
                .map(|f| Some(f.trunc() as i64))
                .ok_or_else(|| D::Error::custom(format!("number {} is out of range", n))),
        },
        Some(Value::String(s)) => Ok(number_from_str::<D::Error>(&s)?.map(|f| f.trunc() as i64)),
        Some(other) => Err(D::Error::custom(format!(
            "expected an integer, found {}",
            other
        ))),
    }
}

/// Float field that also accepts numeric strings.
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("number {} is not a float", n))),
        Some(Value::String(s)) => number_from_str::<D::Error>(&s),
        Some(other) => Err(D::Error::custom(format!("expected a number, found {}", other))),
    }
}

/// Identifier that may be written as a string or a number. Strings are kept
/// verbatim, including the empty id of logged-out sessions.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or number id, found {}",
            other
        ))),
    }
}
