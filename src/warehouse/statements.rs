//! Named, parameterized SQL statements used by the loader.
//!
//! The statement set is built once from the configured [`ConflictPolicy`]
//! and passed explicitly to whoever executes it.

use clap::ValueEnum;
use serde::Deserialize;

/// How inserts into dimension tables react to an already-present key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Plain inserts, a duplicate key aborts the run.
    Fail,
    /// Keep the stored row. Users get their level refreshed instead.
    #[default]
    Ignore,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatementId {
    InsertSong,
    InsertArtist,
    InsertTime,
    InsertUser,
    InsertSongplay,
    SelectSongArtist,
}

#[derive(Clone, Debug)]
pub struct Statements {
    insert_song: String,
    insert_artist: String,
    insert_time: String,
    insert_user: String,
    insert_songplay: String,
    select_song_artist: String,
}

const INSERT_SONG: &str =
    "INSERT INTO songs (song_id, title, artist_id, year, duration) VALUES (?1, ?2, ?3, ?4, ?5)";

const INSERT_ARTIST: &str = "INSERT INTO artists (artist_id, name, location, latitude, longitude) \
     VALUES (?1, ?2, ?3, ?4, ?5)";

const INSERT_TIME: &str = "INSERT INTO time (start_time, hour, day, week, month, year, weekday) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

const INSERT_USER: &str = "INSERT INTO users (user_id, first_name, last_name, gender, level) \
     VALUES (?1, ?2, ?3, ?4, ?5)";

const INSERT_SONGPLAY: &str = "INSERT INTO songplays \
     (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const SELECT_SONG_ARTIST: &str = "SELECT s.song_id, a.artist_id FROM songs s \
     INNER JOIN artists a ON s.artist_id = a.artist_id \
     WHERE s.title = ?1 AND a.name = ?2 AND s.duration = ?3 \
     LIMIT 1";

impl Statements {
    pub fn new(policy: ConflictPolicy) -> Self {
        match policy {
            ConflictPolicy::Fail => Self {
                insert_song: INSERT_SONG.to_string(),
                insert_artist: INSERT_ARTIST.to_string(),
                insert_time: INSERT_TIME.to_string(),
                insert_user: INSERT_USER.to_string(),
                insert_songplay: INSERT_SONGPLAY.to_string(),
                select_song_artist: SELECT_SONG_ARTIST.to_string(),
            },
            ConflictPolicy::Ignore => Self {
                insert_song: format!("{} ON CONFLICT (song_id) DO NOTHING", INSERT_SONG),
                insert_artist: format!("{} ON CONFLICT (artist_id) DO NOTHING", INSERT_ARTIST),
                insert_time: format!("{} ON CONFLICT (start_time) DO NOTHING", INSERT_TIME),
                insert_user: format!(
                    "{} ON CONFLICT (user_id) DO UPDATE SET level = excluded.level",
                    INSERT_USER
                ),
                insert_songplay: INSERT_SONGPLAY.to_string(),
                select_song_artist: SELECT_SONG_ARTIST.to_string(),
            },
        }
    }

    pub fn get(&self, id: StatementId) -> &str {
        match id {
            StatementId::InsertSong => &self.insert_song,
            StatementId::InsertArtist => &self.insert_artist,
            StatementId::InsertTime => &self.insert_time,
            StatementId::InsertUser => &self.insert_user,
            StatementId::InsertSongplay => &self.insert_songplay,
            StatementId::SelectSongArtist => &self.select_song_artist,
        }
    }
}
