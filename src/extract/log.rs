use super::{lenient_f64, lenient_i64, lenient_id, parse_lines, read_data_file, time_row};
use crate::error::{EtlError, EtlResult};
use crate::warehouse::{SongplayRow, TimeRow, UserRow};
use serde::Deserialize;
use std::path::Path;

/// The page value that marks a song being played.
pub const NEXT_SONG_PAGE: &str = "NextSong";

/// One user activity event from an event log file.
///
/// `page` is required on every event; `ts` is required on play events and
/// checked when the event is shaped into rows.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    pub page: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub ts: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub song: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub length: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub session_id: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl LogEvent {
    pub fn is_play(&self) -> bool {
        self.page == NEXT_SONG_PAGE
    }
}

/// Resolves the song and artist ids of a play from the loaded dimensions.
pub trait SongLookup {
    /// Find a stored song whose title, artist name and duration match
    /// exactly. Returns `(song_id, artist_id)`.
    fn find_song(
        &self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> EtlResult<Option<(String, String)>>;
}

/// A play event waiting for its song/artist ids to be resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayCandidate {
    pub start_time: i64,
    pub user_id: Option<String>,
    pub level: Option<String>,
    pub song: Option<String>,
    pub artist: Option<String>,
    pub length: Option<f64>,
    pub session_id: Option<i64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

impl PlayCandidate {
    /// Build the songplay row, or `None` when the event has no user id or no
    /// stored song matches the played title, artist and length.
    pub fn resolve<L: SongLookup + ?Sized>(&self, lookup: &L) -> EtlResult<Option<SongplayRow>> {
        let Some(user_id) = &self.user_id else {
            return Ok(None);
        };
        let (Some(title), Some(artist), Some(length)) = (&self.song, &self.artist, self.length)
        else {
            return Ok(None);
        };
        let Some((song_id, artist_id)) = lookup.find_song(title, artist, length)? else {
            return Ok(None);
        };

        Ok(Some(SongplayRow {
            start_time: self.start_time,
            user_id: user_id.clone(),
            level: self.level.clone(),
            song_id,
            artist_id,
            session_id: self.session_id,
            location: self.location.clone(),
            user_agent: self.user_agent.clone(),
        }))
    }
}

/// Rows derived from one log file, each list in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LogFileRows {
    pub time: Vec<TimeRow>,
    pub users: Vec<UserRow>,
    pub plays: Vec<PlayCandidate>,
}

pub fn parse_log_events(path: &Path, content: &str) -> EtlResult<Vec<(usize, LogEvent)>> {
    parse_lines(path, content)
}

impl LogFileRows {
    /// Keep the play events of `events` and shape them into rows.
    pub fn from_events(path: &Path, events: Vec<(usize, LogEvent)>) -> EtlResult<Self> {
        let mut rows = LogFileRows::default();

        for (line, event) in events.into_iter().filter(|(_, e)| e.is_play()) {
            let ts = event.ts.ok_or_else(|| EtlError::MissingField {
                path: path.to_path_buf(),
                line,
                field: "ts",
            })?;

            rows.time.push(time_row(ts)?);

            rows.users.push(UserRow {
                user_id: event.user_id.clone(),
                first_name: event.first_name,
                last_name: event.last_name,
                gender: event.gender,
                level: event.level.clone(),
            });

            rows.plays.push(PlayCandidate {
                start_time: ts,
                user_id: event.user_id,
                level: event.level,
                song: event.song,
                artist: event.artist,
                length: event.length,
                session_id: event.session_id,
                location: event.location,
                user_agent: event.user_agent,
            });
        }

        Ok(rows)
    }
}

pub fn extract_log_file(path: &Path) -> EtlResult<LogFileRows> {
    let content = read_data_file(path)?;
    let events = parse_log_events(path, &content)?;
    LogFileRows::from_events(path, events)
}
