use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::fetch::FetchSettings;

/// Default location of the fetched CV, relative to the working directory.
pub const DEFAULT_CV_PATH: &str = "local/cv.json";

/// Source of "now" for the `fetched:` stamp and the host+date file name.
pub type Clock = Arc<dyn Fn() -> DateTime<Local> + Send + Sync>;

#[derive(Clone)]
pub struct EngineConfig {
    /// Directory postings are written into.
    pub postings_dir: PathBuf,
    /// Fixed destination of `cv.json`; overwritten on every CV fetch.
    pub cv_path: PathBuf,
    pub fetch: FetchSettings,
    pub clock: Clock,
}

impl EngineConfig {
    pub fn default_with_postings_dir(postings_dir: impl Into<PathBuf>) -> Self {
        Self {
            postings_dir: postings_dir.into(),
            cv_path: PathBuf::from(DEFAULT_CV_PATH),
            fetch: FetchSettings::default(),
            clock: Arc::new(Local::now),
        }
    }

    pub fn with_cv_path(mut self, cv_path: impl Into<PathBuf>) -> Self {
        self.cv_path = cv_path.into();
        self
    }

    pub fn with_fetch_settings(mut self, fetch: FetchSettings) -> Self {
        self.fetch = fetch;
        self
    }

    /// Pin the clock, mostly for tests.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Local> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    pub fn now(&self) -> DateTime<Local> {
        (self.clock)()
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("postings_dir", &self.postings_dir)
            .field("cv_path", &self.cv_path)
            .field("fetch", &self.fetch)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn defaults_point_cv_at_local_dir() {
        let config = EngineConfig::default_with_postings_dir("postings");
        assert_eq!(config.postings_dir, PathBuf::from("postings"));
        assert_eq!(config.cv_path, PathBuf::from("local/cv.json"));
        assert_eq!(config.fetch.redirect_limit, 10);
    }

    #[test]
    fn injected_clock_is_used() {
        let fixed = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).single().unwrap();
        let config = EngineConfig::default_with_postings_dir("p").with_clock(move || fixed);
        assert_eq!(config.now(), fixed);
        assert!(format!("{config:?}").contains("postings_dir"));
    }
}
