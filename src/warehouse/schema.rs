//! SQLite schema of the songplay star schema.
//!
//! Four dimension tables (songs, artists, time, users) and one fact table
//! (songplays). Dimension keys are the natural ids found in the source files;
//! songplays use the integer rowid as a synthetic key.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

// =============================================================================
// Dimension Tables
// =============================================================================

const SONGS_TABLE: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!("song_id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text),
        sqlite_column!("artist_id", &SqlType::Text, non_null = true),
        sqlite_column!("year", &SqlType::Integer),
        sqlite_column!("duration", &SqlType::Real),
    ],
    indices: &[("idx_songs_title", "title")],
};

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("artist_id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text),
        sqlite_column!("location", &SqlType::Text),
        sqlite_column!("latitude", &SqlType::Real),
        sqlite_column!("longitude", &SqlType::Real),
    ],
    indices: &[("idx_artists_name", "name")],
};

/// One row per play instant, keyed by the epoch millisecond timestamp.
const TIME_TABLE: Table = Table {
    name: "time",
    columns: &[
        sqlite_column!("start_time", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("hour", &SqlType::Integer, non_null = true),
        sqlite_column!("day", &SqlType::Integer, non_null = true),
        sqlite_column!("week", &SqlType::Integer, non_null = true),
        sqlite_column!("month", &SqlType::Integer, non_null = true),
        sqlite_column!("year", &SqlType::Integer, non_null = true),
        sqlite_column!("weekday", &SqlType::Integer, non_null = true), // 0=Monday .. 6=Sunday
    ],
    indices: &[],
};

const USERS_TABLE: Table = Table {
    name: "users",
    columns: &[
        sqlite_column!(
            "user_id",
            &SqlType::Text,
            is_primary_key = true,
            non_null = true
        ),
        sqlite_column!("first_name", &SqlType::Text),
        sqlite_column!("last_name", &SqlType::Text),
        sqlite_column!("gender", &SqlType::Text),
        sqlite_column!("level", &SqlType::Text), // 'free' or 'paid'
    ],
    indices: &[],
};

// =============================================================================
// Fact Table
// =============================================================================

const SONGPLAYS_TABLE: Table = Table {
    name: "songplays",
    columns: &[
        sqlite_column!("songplay_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("start_time", &SqlType::Integer, non_null = true),
        sqlite_column!("user_id", &SqlType::Text, non_null = true),
        sqlite_column!("level", &SqlType::Text),
        sqlite_column!("song_id", &SqlType::Text),
        sqlite_column!("artist_id", &SqlType::Text),
        sqlite_column!("session_id", &SqlType::Integer),
        sqlite_column!("location", &SqlType::Text),
        sqlite_column!("user_agent", &SqlType::Text),
    ],
    indices: &[
        ("idx_songplays_start_time", "start_time"),
        ("idx_songplays_user", "user_id"),
    ],
};

pub const WAREHOUSE_SCHEMA: VersionedSchema = VersionedSchema {
    version: 0,
    tables: &[
        SONGS_TABLE,
        ARTISTS_TABLE,
        TIME_TABLE,
        USERS_TABLE,
        SONGPLAYS_TABLE,
    ],
};
