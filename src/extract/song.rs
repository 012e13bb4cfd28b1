use super::{lenient_f64, lenient_i64, parse_lines, read_data_file};
use crate::error::{EtlError, EtlResult};
use crate::warehouse::{ArtistRow, SongRow};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// One song-metadata record as found in a song data file.
///
/// Only `song_id` and `artist_id` decide whether rows are produced; every
/// other field may be missing or null and is stored as NULL.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SongRecord {
    #[serde(default)]
    pub song_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub duration: Option<f64>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub artist_location: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub artist_latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub artist_longitude: Option<f64>,
}

/// Rows derived from one song file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SongFileRows {
    pub song: Option<SongRow>,
    pub artist: Option<ArtistRow>,
}

impl SongRecord {
    pub fn into_rows(self) -> SongFileRows {
        let song = match (&self.song_id, &self.artist_id) {
            (Some(song_id), Some(artist_id)) => Some(SongRow {
                song_id: song_id.clone(),
                title: self.title,
                artist_id: artist_id.clone(),
                year: self.year,
                duration: self.duration,
            }),
            _ => None,
        };

        let artist = self.artist_id.map(|artist_id| ArtistRow {
            artist_id,
            name: self.artist_name,
            location: self.artist_location,
            latitude: self.artist_latitude,
            longitude: self.artist_longitude,
        });

        SongFileRows { song, artist }
    }
}

/// Parse the single record of a song file.
pub fn parse_song_record(path: &Path, content: &str) -> EtlResult<SongRecord> {
    let mut records = parse_lines::<SongRecord>(path, content)?.into_iter();
    let (_, record) = records
        .next()
        .ok_or_else(|| EtlError::EmptyFile(path.to_path_buf()))?;
    let extra = records.count();
    if extra > 0 {
        warn!(
            "{} holds {} extra records, only the first one is loaded",
            path.display(),
            extra
        );
    }
    Ok(record)
}

pub fn extract_song_file(path: &Path) -> EtlResult<SongFileRows> {
    let content = read_data_file(path)?;
    let rows = parse_song_record(path, &content)?.into_rows();
    if rows.song.is_none() {
        debug!("No song row in {}: song_id or artist_id missing", path.display());
    }
    Ok(rows)
}
