#![deny(missing_docs)]
//! Shared logging utilities for the jobfetch workspace.
//!
//! Library code logs through the `engine_*` macros below, which forward to the
//! `log` facade. Binaries call [`initialize`] once at startup; tests call
//! [`initialize_for_tests`].

use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to stderr only.
    Terminal,
    /// Write to the given file only.
    File(PathBuf),
    /// Write to stderr and to the given file.
    Both(PathBuf),
}

/// Logger settings chosen by the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Maximum level that is emitted.
    pub level: LevelFilter,
    /// Output destination.
    pub destination: LogDestination,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LevelFilter::Warn,
            destination: LogDestination::Terminal,
        }
    }
}

/// Initialize the global logger.
///
/// A log file that cannot be created is reported on stderr and skipped; the
/// terminal logger (if requested) still gets installed. Calling this twice is
/// harmless: the second call leaves the first logger in place.
pub fn initialize(settings: LogSettings) {
    let config = build_config();
    let level = settings.level;

    let loggers: Vec<Box<dyn SharedLogger>> = match settings.destination {
        LogDestination::Terminal => vec![terminal_logger(level, config)],
        LogDestination::File(path) => match create_file_logger(level, config, path) {
            Some(file_logger) => vec![file_logger],
            None => return,
        },
        LogDestination::Both(path) => {
            let mut loggers = vec![terminal_logger(level, config.clone())];
            if let Some(file_logger) = create_file_logger(level, config, path) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn terminal_logger(level: LevelFilter, config: Config) -> Box<dyn SharedLogger> {
    TermLogger::new(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    path: PathBuf,
) -> Option<Box<dyn SharedLogger>> {
    match File::create(&path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_log_warnings_to_terminal() {
        let settings = LogSettings::default();
        assert_eq!(settings.level, LevelFilter::Warn);
        assert_eq!(settings.destination, LogDestination::Terminal);
    }

    #[test]
    fn unwritable_log_file_is_skipped() {
        let path = PathBuf::from("/nonexistent-dir/for/sure/jobfetch.log");
        assert!(create_file_logger(LevelFilter::Info, build_config(), path).is_none());
    }
}
