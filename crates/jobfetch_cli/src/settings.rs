//! Optional RON settings file, merged under the command-line flags.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use engine_logging::{LogDestination, LogSettings};
use jobfetch_engine::{EngineConfig, FetchSettings, DEFAULT_CV_PATH};
use log::LevelFilter;
use serde::Deserialize;

use crate::GlobalArgs;

pub(crate) const DEFAULT_CONFIG_FILE: &str = "jobfetch.ron";
const DEFAULT_POSTINGS_DIR: &str = "postings";

/// Everything the settings file may set. Absent keys keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct FileSettings {
    pub postings_dir: Option<PathBuf>,
    pub cv_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub max_bytes: Option<u64>,
    pub user_agent: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Read the settings file. A missing file yields defaults; anything else that
/// goes wrong is returned so the caller can report it once logging is up.
pub(crate) fn read_settings(path: &Path) -> Result<FileSettings> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(FileSettings::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("reading {}", path.display()));
        }
    };
    ron::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Flags and file values merged, flags first.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedSettings {
    pub postings_dir: PathBuf,
    pub cv_path: PathBuf,
    pub fetch: FetchSettings,
    pub log_file: Option<PathBuf>,
}

impl ResolvedSettings {
    pub(crate) fn resolve(args: &GlobalArgs, file: FileSettings) -> Self {
        let mut fetch = FetchSettings::default();
        if let Some(secs) = args.timeout_secs.or(file.timeout_secs) {
            fetch.request_timeout = Duration::from_secs(secs);
        }
        if let Some(max_bytes) = file.max_bytes {
            fetch.max_bytes = max_bytes;
        }
        if let Some(user_agent) = file.user_agent.filter(|ua| !ua.trim().is_empty()) {
            fetch.user_agent = user_agent;
        }

        Self {
            postings_dir: args
                .postings_dir
                .clone()
                .or(file.postings_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_POSTINGS_DIR)),
            cv_path: args
                .cv_path
                .clone()
                .or(file.cv_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CV_PATH)),
            fetch,
            log_file: args.log_file.clone().or(file.log_file),
        }
    }

    pub(crate) fn engine_config(&self) -> EngineConfig {
        EngineConfig::default_with_postings_dir(self.postings_dir.clone())
            .with_cv_path(self.cv_path.clone())
            .with_fetch_settings(self.fetch.clone())
    }

    /// Logger setup for these settings. `--quiet` without a log file silences
    /// logging entirely.
    pub(crate) fn log_settings(&self, args: &GlobalArgs) -> LogSettings {
        let level = level_for(args.verbose);
        match (&self.log_file, args.quiet) {
            (Some(path), true) => LogSettings {
                level,
                destination: LogDestination::File(path.clone()),
            },
            (Some(path), false) => LogSettings {
                level,
                destination: LogDestination::Both(path.clone()),
            },
            (None, true) => LogSettings {
                level: LevelFilter::Off,
                destination: LogDestination::Terminal,
            },
            (None, false) => LogSettings {
                level,
                destination: LogDestination::Terminal,
            },
        }
    }
}

/// `-v` for info, `-vv` and up for debug.
fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
