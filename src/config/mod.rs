use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

pub const DATA_FILE_ENV: &str = "BUDGET_TRACKER_FILE";
pub const LOG_FILTER_ENV: &str = "BUDGET_TRACKER_LOG";

const DEFAULT_DATA_FILE: &str = "budget_data.json";
const DEFAULT_LOG_FILTER: &str = "budget_tracker=error";

/// Runtime settings for the tracker: where state lives and how much gets logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

impl Config {
    /// Resolves settings from an explicit data file, then the environment, then defaults.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        Self::resolve_with(explicit, |key| env::var_os(key))
    }

    fn resolve_with(explicit: Option<PathBuf>, lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let defaults = Self::default();
        let data_file = explicit
            .or_else(|| non_empty(lookup(DATA_FILE_ENV)).map(PathBuf::from))
            .unwrap_or(defaults.data_file);
        let log_filter = non_empty(lookup(LOG_FILTER_ENV))
            .and_then(|value| value.into_string().ok())
            .unwrap_or(defaults.log_filter);
        Self {
            data_file,
            log_filter,
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

fn non_empty(value: Option<OsString>) -> Option<OsString> {
    value.filter(|value| !value.is_empty())
}
