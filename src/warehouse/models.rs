//! Row types handed from the extractors to the loader.
//!
//! Each struct mirrors one table of the warehouse schema, fields in column
//! order. Rows are built once from a parsed record and never mutated.

use rusqlite::ToSql;

#[derive(Clone, Debug, PartialEq)]
pub struct SongRow {
    pub song_id: String,
    pub title: Option<String>,
    pub artist_id: String,
    pub year: Option<i64>,
    pub duration: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArtistRow {
    pub artist_id: String,
    pub name: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Calendar decomposition of a play instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeRow {
    pub start_time: i64,
    pub hour: u32,
    pub day: u32,
    pub week: u32,
    pub month: u32,
    pub year: i32,
    pub weekday: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UserRow {
    /// Missing on malformed events. The store rejects such rows.
    pub user_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SongplayRow {
    pub start_time: i64,
    pub user_id: String,
    pub level: Option<String>,
    pub song_id: String,
    pub artist_id: String,
    pub session_id: Option<i64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

/// A row that can be bound, in column order, to an insert statement.
pub trait InsertRow {
    fn values(&self) -> Vec<&dyn ToSql>;
}

impl InsertRow for SongRow {
    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.song_id as &dyn ToSql,
            &self.title,
            &self.artist_id,
            &self.year,
            &self.duration,
        ]
    }
}

impl InsertRow for ArtistRow {
    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.artist_id as &dyn ToSql,
            &self.name,
            &self.location,
            &self.latitude,
            &self.longitude,
        ]
    }
}

impl InsertRow for TimeRow {
    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.start_time as &dyn ToSql,
            &self.hour,
            &self.day,
            &self.week,
            &self.month,
            &self.year,
            &self.weekday,
        ]
    }
}

impl InsertRow for UserRow {
    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.user_id as &dyn ToSql,
            &self.first_name,
            &self.last_name,
            &self.gender,
            &self.level,
        ]
    }
}

impl InsertRow for SongplayRow {
    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.start_time as &dyn ToSql,
            &self.user_id,
            &self.level,
            &self.song_id,
            &self.artist_id,
            &self.session_id,
            &self.location,
            &self.user_agent,
        ]
    }
}

/// Row counts of every warehouse table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub songs: usize,
    pub artists: usize,
    pub time: usize,
    pub users: usize,
    pub songplays: usize,
}
