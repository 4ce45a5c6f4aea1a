use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_PROGRESS_FILE: &str = "progress_tracker.json";
pub const DEFAULT_RAW_DIR: &str = "raw_data";
pub const DEFAULT_PROCESSED_DIR: &str = "processed_data";
pub const DEFAULT_DEADLINE: &str = "2025-10-27";
pub const DEFAULT_TARGET_TOTAL: usize = 50;
pub const DEFAULT_BAR_WIDTH: usize = 40;
pub const MAX_BAR_WIDTH: usize = 200;
pub const DEFAULT_RECENT_LOGS: usize = 3;

/// Tracker settings suitable for config files and CLI overrides.
/// Relative file and directory names resolve against `data_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub data_dir: PathBuf,
    pub progress_file: PathBuf,
    /// Raw text downloads, `book_<id>.txt`
    pub raw_dir: PathBuf,
    /// Structured output, `book_<id>.json`
    pub processed_dir: PathBuf,
    /// Number of books the workflow aims to collect and process
    pub target_total: usize,
    /// Deadline written into newly created documents
    pub deadline: String,
    pub bar_width: usize,
    pub recent_logs: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./"),
            progress_file: PathBuf::from(DEFAULT_PROGRESS_FILE),
            raw_dir: PathBuf::from(DEFAULT_RAW_DIR),
            processed_dir: PathBuf::from(DEFAULT_PROCESSED_DIR),
            target_total: DEFAULT_TARGET_TOTAL,
            deadline: DEFAULT_DEADLINE.to_string(),
            bar_width: DEFAULT_BAR_WIDTH,
            recent_logs: DEFAULT_RECENT_LOGS,
        }
    }
}

impl TrackerConfig {
    /// Default settings rooted at `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Read a JSON config file. Absent keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| Error::MalformedDocument {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_total == 0 {
            return Err(Error::InvalidConfig {
                field: "target_total",
                value: self.target_total.to_string(),
            });
        }
        if self.bar_width == 0 || self.bar_width > MAX_BAR_WIDTH {
            return Err(Error::InvalidConfig {
                field: "bar_width",
                value: self.bar_width.to_string(),
            });
        }
        Ok(())
    }

    pub fn progress_path(&self) -> PathBuf {
        self.data_dir.join(&self.progress_file)
    }

    pub fn raw_path(&self) -> PathBuf {
        self.data_dir.join(&self.raw_dir)
    }

    pub fn processed_path(&self) -> PathBuf {
        self.data_dir.join(&self.processed_dir)
    }

    pub fn report_path(&self, date: &str) -> PathBuf {
        self.data_dir.join(format!("daily_report_{date}.md"))
    }
}
