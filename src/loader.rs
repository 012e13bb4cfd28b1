//! Row loader: executes one named statement per row on the current
//! file transaction.

use crate::error::EtlResult;
use crate::extract::{LogFileRows, SongFileRows, SongLookup};
use crate::warehouse::{InsertRow, StatementId, Statements};
use rusqlite::{params, Connection, OptionalExtension, ToSql};
use std::ops::AddAssign;
use tracing::debug;

/// Number of rows issued to each table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub songs: usize,
    pub artists: usize,
    pub time: usize,
    pub users: usize,
    pub songplays: usize,
    /// Play events for which no stored song matched.
    pub unmatched_plays: usize,
}

impl AddAssign for LoadStats {
    fn add_assign(&mut self, other: Self) {
        self.songs += other.songs;
        self.artists += other.artists;
        self.time += other.time;
        self.users += other.users;
        self.songplays += other.songplays;
        self.unmatched_plays += other.unmatched_plays;
    }
}

pub struct Loader<'a> {
    conn: &'a Connection,
    statements: &'a Statements,
}

impl<'a> Loader<'a> {
    pub fn new(conn: &'a Connection, statements: &'a Statements) -> Self {
        Self { conn, statements }
    }

    /// Run statement `id` bound to `values`, returning the number of rows
    /// the store reports as changed.
    pub fn execute(&self, id: StatementId, values: &[&dyn ToSql]) -> EtlResult<usize> {
        let mut stmt = self.conn.prepare_cached(self.statements.get(id))?;
        Ok(stmt.execute(values)?)
    }

    pub fn insert<R: InsertRow>(&self, id: StatementId, row: &R) -> EtlResult<usize> {
        self.execute(id, &row.values())
    }

    pub fn load_song_file(&self, rows: &SongFileRows) -> EtlResult<LoadStats> {
        let mut stats = LoadStats::default();
        if let Some(song) = &rows.song {
            self.insert(StatementId::InsertSong, song)?;
            stats.songs += 1;
        }
        if let Some(artist) = &rows.artist {
            self.insert(StatementId::InsertArtist, artist)?;
            stats.artists += 1;
        }
        Ok(stats)
    }

    /// Insert the time rows, then the user rows, then resolve and insert
    /// songplays one event at a time.
    pub fn load_log_file(&self, rows: &LogFileRows) -> EtlResult<LoadStats> {
        let mut stats = LoadStats::default();
        for time in &rows.time {
            self.insert(StatementId::InsertTime, time)?;
            stats.time += 1;
        }
        for user in &rows.users {
            self.insert(StatementId::InsertUser, user)?;
            stats.users += 1;
        }
        for play in &rows.plays {
            match play.resolve(self)? {
                Some(songplay) => {
                    self.insert(StatementId::InsertSongplay, &songplay)?;
                    stats.songplays += 1;
                }
                None => {
                    debug!(
                        "No songplay for play at {}: {:?} by {:?}",
                        play.start_time, play.song, play.artist
                    );
                    stats.unmatched_plays += 1;
                }
            }
        }
        Ok(stats)
    }
}

impl SongLookup for Loader<'_> {
    fn find_song(
        &self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> EtlResult<Option<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare_cached(self.statements.get(StatementId::SelectSongArtist))?;
        let ids = stmt
            .query_row(params![title, artist_name, duration], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()?;
        Ok(ids)
    }
}
