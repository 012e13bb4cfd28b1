//! Data file discovery.

use crate::error::{EtlError, EtlResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively collect every regular file under `root` whose extension is
/// `extension` (compared case-sensitively, without the leading dot).
///
/// Returned paths are absolute. Entries are visited in file-name order within
/// each directory, so the result is stable across runs.
pub fn find_files(root: &Path, extension: &str) -> EtlResult<Vec<PathBuf>> {
    if !root.exists() {
        return Err(EtlError::DirectoryNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(EtlError::NotADirectory(root.to_path_buf()));
    }

    let root = std::path::absolute(root).map_err(|source| EtlError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry.map_err(|source| EtlError::Walk {
            root: root.clone(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
