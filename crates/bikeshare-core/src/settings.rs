use clap::{CommandFactory, Parser};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::filters::City;

/// Log levels accepted on the command line and in the config file.
const LOG_LEVELS: [&str; 5] = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"];

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Explore US bikeshare trip data interactively
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Explore US bikeshare trip data interactively",
    version
)]
pub struct Settings {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = LOG_LEVELS)]
    pub log_level: String,

    /// Log file path (diagnostics go to stderr when unset)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Configuration file (defaults to ~/.bikeshare/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

// ── ConfigFile ─────────────────────────────────────────────────────────────────

/// Optional defaults read from a JSON file. Never written by the tool.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl ConfigFile {
    /// Default location: `~/.bikeshare/config.json`.
    pub fn default_path() -> PathBuf {
        Self::path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Config path rooted at `base_dir` (used for testing).
    pub fn path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".bikeshare").join("config.json")
    }

    /// Load the file at `path`.
    ///
    /// Returns `Default` when the file is absent. A file that exists but
    /// cannot be read or parsed is reported and ignored.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match serde_json::from_str::<ConfigFile>(&content) {
            Ok(mut config) => {
                if let Some(level) = config.log_level.take() {
                    let upper = level.to_uppercase();
                    if LOG_LEVELS.contains(&upper.as_str()) {
                        config.log_level = Some(upper);
                    } else {
                        warn!(
                            "Ignoring unknown log_level \"{}\" in {}",
                            level,
                            path.display()
                        );
                    }
                }
                config
            }
            Err(e) => {
                warn!("Ignoring malformed config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments and merge in the config file where no explicit
    /// CLI value was provided.
    pub fn load() -> Self {
        Self::load_impl(std::env::args_os().collect(), &ConfigFile::default_path())
    }

    /// Full implementation. `default_config` is used unless `--config` is
    /// given, so tests can redirect to a temporary directory.
    pub fn load_impl(args: Vec<std::ffi::OsString>, default_config: &Path) -> Self {
        // Raw ArgMatches let us query ValueSource.
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        let config_path = settings
            .config
            .clone()
            .unwrap_or_else(|| default_config.to_path_buf());
        let file = ConfigFile::load_from(&config_path);

        // CLI always wins over the config file.
        if !is_arg_explicitly_set(&matches, "data_dir") {
            if let Some(v) = file.data_dir {
                settings.data_dir = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "log_level") {
            if let Some(v) = file.log_level {
                settings.log_level = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "log_file") && settings.log_file.is_none() {
            settings.log_file = file.log_file;
        }

        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings
    }

    /// Path of the CSV file for `city` inside the data directory.
    pub fn city_path(&self, city: City) -> PathBuf {
        self.data_dir.join(city.file_name())
    }
}

// ── Helper: check if an arg was explicitly set on the command line ─────────────

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
