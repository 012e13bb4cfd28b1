use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use songplay_etl::config::{
    parse_path, AppConfig, CliConfig, FileConfig, DEFAULT_DB_PATH, DEFAULT_EXTENSION,
    DEFAULT_LOG_DATA, DEFAULT_SONG_DATA,
};
use songplay_etl::{ConflictPolicy, Pipeline, WarehouseStore};

#[derive(Parser, Debug)]
#[command(name = "songplay-etl")]
#[command(about = "Load song metadata and user activity logs into a SQLite star schema")]
struct CliArgs {
    /// Path to the SQLite warehouse database file.
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Root directory of the song metadata files.
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_SONG_DATA)]
    pub song_data: PathBuf,

    /// Root directory of the user activity log files.
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_LOG_DATA)]
    pub log_data: PathBuf,

    /// Extension of the data files to load.
    #[clap(long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// What to do when a dimension row already exists.
    #[clap(long, value_enum, default_value_t = ConflictPolicy::Ignore)]
    pub conflict_policy: ConflictPolicy,

    /// Drop and recreate all warehouse tables before loading.
    #[clap(long)]
    pub fresh: bool,

    /// Optional TOML config file, its values override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            db_path: self.db.clone(),
            song_data: self.song_data.clone(),
            log_data: self.log_data.clone(),
            extension: self.extension.clone(),
            conflict_policy: self.conflict_policy,
            fresh: self.fresh,
        }
    }
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    info!("Opening warehouse database at {:?}...", config.db_path);
    let store = if config.fresh {
        WarehouseStore::open_fresh(&config.db_path)
    } else {
        WarehouseStore::open(&config.db_path)
    };
    let mut store =
        store.with_context(|| format!("Failed to open warehouse database {:?}", config.db_path))?;

    info!("Conflict policy: {:?}", config.conflict_policy);
    let summary = Pipeline::new(&mut store, config.conflict_policy, &config.extension)
        .run(&config.song_data, &config.log_data)?;

    info!("");
    info!("Load Summary");
    info!("============");
    info!("Song files: {}", summary.song_files);
    info!("Log files: {}", summary.log_files);
    info!("Song rows: {}", summary.rows.songs);
    info!("Artist rows: {}", summary.rows.artists);
    info!("Time rows: {}", summary.rows.time);
    info!("User rows: {}", summary.rows.users);
    info!("Songplay rows: {}", summary.rows.songplays);
    if summary.rows.unmatched_plays > 0 {
        warn!(
            "Play events without a matching song: {}",
            summary.rows.unmatched_plays
        );
    }

    let counts = store.counts()?;
    info!("");
    info!("Database contains:");
    info!("  {} songs", counts.songs);
    info!("  {} artists", counts.artists);
    info!("  {} time entries", counts.time);
    info!("  {} users", counts.users);
    info!("  {} songplays", counts.songplays);

    store.close()?;
    Ok(())
}
