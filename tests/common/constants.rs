//! Shared constants for end-to-end tests
//!
//! When fixture data changes, update only this file.

// ============================================================================
// Song data
// ============================================================================

pub const SONG_1_ID: &str = "S1";
pub const SONG_1_TITLE: &str = "T";
pub const ARTIST_1_ID: &str = "A1";
pub const ARTIST_1_NAME: &str = "AR";
pub const SONG_1_DURATION: f64 = 180.5;

/// Complete song file for S1 by A1
pub const SONG_S1: &str = r#"{"num_songs":1,"song_id":"S1","title":"T","artist_id":"A1","year":2000,"duration":180.5,"artist_name":"AR","artist_location":"L","artist_latitude":1.0,"artist_longitude":2.0}"#;

/// Second song, no artist coordinates
pub const SONG_S2: &str = r#"{"num_songs":1,"song_id":"S2","title":"Other","artist_id":"A2","year":0,"duration":99.25,"artist_name":"Band","artist_location":"","artist_latitude":null,"artist_longitude":null}"#;

// ============================================================================
// Log data
// ============================================================================

/// 2018-11-03T01:05:23.796Z
pub const PLAY_1_TS: i64 = 1541207123796;

/// 2018-11-11T02:33:56.796Z
pub const PLAY_2_TS: i64 = 1541903636796;

pub const USER_1_ID: &str = "10";

/// Play of S1 by user 10 that matches the song data exactly
pub const PLAY_S1: &str = r#"{"artist":"AR","auth":"Logged In","firstName":"Sylvie","gender":"F","itemInSession":0,"lastName":"Cruz","length":180.5,"level":"free","location":"X","method":"PUT","page":"NextSong","registration":1540266185796.0,"sessionId":1,"song":"T","status":200,"ts":1541207123796,"userAgent":"UA","userId":"10"}"#;

/// Same user later on, now paid, playing something not in the song data
pub const PLAY_UNKNOWN: &str = r#"{"artist":"Nobody","auth":"Logged In","firstName":"Sylvie","gender":"F","itemInSession":1,"lastName":"Cruz","length":201.0,"level":"paid","location":"X","method":"PUT","page":"NextSong","registration":1540266185796.0,"sessionId":1,"song":"Missing","status":200,"ts":1541903636796,"userAgent":"UA","userId":"10"}"#;

/// Navigation event, never loaded
pub const HOME_EVENT: &str = r#"{"artist":null,"auth":"Logged In","firstName":"Sylvie","gender":"F","itemInSession":2,"lastName":"Cruz","length":null,"level":"free","location":"X","method":"GET","page":"Home","registration":1540266185796.0,"sessionId":1,"song":null,"status":200,"ts":1541207200000,"userAgent":"UA","userId":"10"}"#;

/// Logged-out play, the log writes its user id as ""
pub const ANONYMOUS_PLAY_TS: i64 = 1541300000000;

pub const ANONYMOUS_PLAY: &str = r#"{"artist":"AR","auth":"Logged Out","firstName":null,"gender":null,"itemInSession":0,"lastName":null,"length":180.5,"level":"free","location":null,"method":"PUT","page":"NextSong","registration":null,"sessionId":7,"song":"T","status":200,"ts":1541300000000,"userAgent":null,"userId":""}"#;

/// Play whose user id is null
pub const NULL_USER_PLAY: &str = r#"{"artist":"AR","auth":"Logged In","firstName":"Ghost","gender":null,"itemInSession":0,"lastName":null,"length":180.5,"level":"free","location":null,"method":"PUT","page":"NextSong","registration":null,"sessionId":8,"song":"T","status":200,"ts":1541400000000,"userAgent":null,"userId":null}"#;
