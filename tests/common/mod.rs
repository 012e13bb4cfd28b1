//! Common test infrastructure
//!
//! Builds throwaway song/log data trees and warehouse databases for the
//! end-to-end pipeline tests. Tests should only import from this module.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{DataTree, SONG_S1};
//! use songplay_etl::ConflictPolicy;
//!
//! #[test]
//! fn test_loads_one_song() {
//!     let tree = DataTree::new();
//!     tree.write_song("A/A/A/S1.json", SONG_S1);
//!     let summary = tree.run(ConflictPolicy::Ignore).unwrap();
//!     assert_eq!(summary.rows.songs, 1);
//! }
//! ```

mod constants;
mod fixtures;

pub use constants::*;
pub use fixtures::DataTree;
