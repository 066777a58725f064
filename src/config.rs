//! Report configuration.
//!
//! Loaded from `<config dir>/redgreen/config.json` (or the file named by
//! `REDGREEN_CONFIG`), then overridden by environment variables:
//! - `REDGREEN_URL` - Tracker API base URL
//! - `REDGREEN_API_TOKEN` - Bearer token (optional for public data)
//! - `REDGREEN_OUTPUT_DIR` - Directory reports are written to

use std::fs;
use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_NAME: &str = "redgreen";
const CONFIG_FILE: &str = "config.json";

/// Default tracker API root.
pub const DEFAULT_URL: &str = "https://api.launchpad.net/devel";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid config value for {field}: {value}")]
    Invalid { field: &'static str, value: String },
}

/// One row of the release schedule table. `milestone` may contain markup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub date: String,
    pub milestone: String,
}

impl ScheduleEntry {
    fn new(date: &str, milestone: &str) -> Self {
        Self {
            date: date.to_string(),
            milestone: milestone.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Tracker API root, e.g. `https://api.launchpad.net/devel`.
    pub api_url: String,
    pub api_token: Option<String>,
    /// Tracker project name; also the prefix identifying the project's bug tasks.
    pub project: String,
    /// Name used in page titles and headings.
    pub display_name: String,
    /// Series reported when none are given on the command line.
    pub series: Vec<String>,
    pub output_dir: PathBuf,
    /// Report files are named `<prefix>-release-<series>.html` and `<prefix>-bugs.html`.
    pub file_prefix: String,
    pub timeout_secs: u64,
    /// Width of the near-deadline window; must be a non-negative day count.
    pub near_deadline_days: i64,
    pub top_issues_url: Option<String>,
    pub release_schedule: Vec<ScheduleEntry>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_URL.to_string(),
            api_token: None,
            project: "juju-core".to_string(),
            display_name: "Juju".to_string(),
            series: vec!["1.26".to_string(), "2.0".to_string()],
            output_dir: PathBuf::from("."),
            file_prefix: "juju".to_string(),
            timeout_secs: 30,
            near_deadline_days: crate::classify::NEAR_DEADLINE_DAYS,
            top_issues_url: Some(
                "http://reports.vapour.ws/releases/top-issues?previous_days=7&issue_count=20"
                    .to_string(),
            ),
            release_schedule: vec![
                ScheduleEntry::new("3-Nov-2015", "Alpha 1"),
                ScheduleEntry::new("17-Nov-2015", "Alpha 2"),
                ScheduleEntry::new(
                    "1-Dec-2015",
                    "Beta 1<ul><li>Feature Freeze</li><li>All release notes complete</li></ul>",
                ),
                ScheduleEntry::new("8-Dec-2015", "Beta 2"),
                ScheduleEntry::new(
                    "15-Dec-2015",
                    "Beta 3<ul><li>Code freeze</li><li>Feature buddy signoff complete</li></ul>",
                ),
                ScheduleEntry::new("18-Dec-2015", "Documentation Complete"),
                ScheduleEntry::new("<i>22-Dec-2015</i>", "<i>Holiday Break</i>"),
                ScheduleEntry::new("<i>29-Dec-2015</i>", "<i>Holiday Break</i>"),
                ScheduleEntry::new("5-Jan-2016", "Beta 4"),
                ScheduleEntry::new("12-Jan-2016", "1.26 Released"),
            ],
        }
    }
}

impl ReportConfig {
    /// Load the config file (defaults if absent) and apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os("REDGREEN_CONFIG")
            .map(PathBuf::from)
            .or_else(default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot: the deadline window and series names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.near_deadline()?;
        for series in &self.series {
            check_series_name(series)?;
        }
        Ok(())
    }

    /// The near-deadline window as a duration.
    pub fn near_deadline(&self) -> Result<TimeDelta, ConfigError> {
        Some(self.near_deadline_days)
            .filter(|days| *days >= 0)
            .and_then(TimeDelta::try_days)
            .ok_or_else(|| ConfigError::Invalid {
                field: "near_deadline_days",
                value: self.near_deadline_days.to_string(),
            })
    }

    /// Apply `REDGREEN_*` overrides from `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("REDGREEN_URL") {
            self.api_url = url;
        }
        if let Some(token) = lookup("REDGREEN_API_TOKEN") {
            self.api_token = Some(token);
        }
        if let Some(dir) = lookup("REDGREEN_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
    }

    /// Output path of a series page. The series name becomes part of the file
    /// name, so it may not contain path separators or `..`.
    pub fn series_file(&self, series: &str) -> Result<PathBuf, ConfigError> {
        check_series_name(series)?;
        Ok(self
            .output_dir
            .join(format!("{}-release-{}.html", self.file_prefix, series)))
    }

    pub fn bugs_file(&self) -> PathBuf {
        self.output_dir.join(format!("{}-bugs.html", self.file_prefix))
    }
}

fn check_series_name(series: &str) -> Result<(), ConfigError> {
    if series.is_empty() || series.contains(['/', '\\']) || series.contains("..") {
        return Err(ConfigError::Invalid {
            field: "series",
            value: series.to_string(),
        });
    }
    Ok(())
}

fn default_config_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Some(path)
}
