mod file_config;

pub use file_config::FileConfig;

use crate::warehouse::ConflictPolicy;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_PATH: &str = "sparkify.db";
pub const DEFAULT_SONG_DATA: &str = "data/song_data";
pub const DEFAULT_LOG_DATA: &str = "data/log_data";
pub const DEFAULT_EXTENSION: &str = "json";

/// CLI arguments that take part in config resolution.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub song_data: PathBuf,
    pub log_data: PathBuf,
    pub extension: String,
    pub conflict_policy: ConflictPolicy,
    pub fresh: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            song_data: PathBuf::from(DEFAULT_SONG_DATA),
            log_data: PathBuf::from(DEFAULT_LOG_DATA),
            extension: DEFAULT_EXTENSION.to_string(),
            conflict_policy: ConflictPolicy::default(),
            fresh: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub song_data: PathBuf,
    pub log_data: PathBuf,
    pub extension: String,
    pub conflict_policy: ConflictPolicy,
    pub fresh: bool,
}

/// Turn a path argument into an absolute path. Existing paths are
/// canonicalized, missing ones are joined to the current directory.
pub fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let resolved_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if resolved_path.is_absolute() {
        return Ok(resolved_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(resolved_path))
}

fn require_dir(name: &str, path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("{} directory does not exist: {:?}", name, path);
    }
    if !path.is_dir() {
        bail!("{} is not a directory: {:?}", name, path);
    }
    Ok(())
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present. TOML paths go through
    /// [`parse_path`] like the CLI ones.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = match file.db_path {
            Some(path) => parse_path(&path)?,
            None => cli.db_path.clone(),
        };
        let song_data = match file.song_data {
            Some(path) => parse_path(&path)?,
            None => cli.song_data.clone(),
        };
        let log_data = match file.log_data {
            Some(path) => parse_path(&path)?,
            None => cli.log_data.clone(),
        };
        let extension = file
            .extension
            .unwrap_or_else(|| cli.extension.clone())
            .trim_start_matches('.')
            .to_string();
        let conflict_policy = file.conflict_policy.unwrap_or(cli.conflict_policy);
        let fresh = file.fresh.unwrap_or(cli.fresh);

        require_dir("song_data", &song_data)?;
        require_dir("log_data", &log_data)?;

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                bail!("Database directory does not exist: {:?}", parent);
            }
        }
        if db_path.is_dir() {
            bail!("db_path is a directory: {:?}", db_path);
        }
        if extension.is_empty() {
            bail!("extension must not be empty");
        }

        Ok(Self {
            db_path,
            song_data,
            log_data,
            extension,
            conflict_policy,
            fresh,
        })
    }
}
