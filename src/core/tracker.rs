//! `ProgressTracker`: load, mutate-and-save, report and scan over the
//! progress document. Each mutating call rewrites the whole file.
use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::core::params::TrackerConfig;
use crate::core::report::{render_daily_report, render_status};
use crate::error::Result;
use crate::io::scan::scan_book_ids;
use crate::io::store::{load_document, save_document};
use crate::types::{BookId, DATE_FORMAT, FailureRecord, IdSet, LogEntry, ProgressDocument};

/// Ids merged into the document by a directory scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub new_collected: Vec<BookId>,
    pub new_processed: Vec<BookId>,
}

impl ScanSummary {
    pub fn is_empty(&self) -> bool {
        self.new_collected.is_empty() && self.new_processed.is_empty()
    }
}

/// A rendered daily report and the file it was written to.
#[derive(Debug, Clone)]
pub struct DailyReport {
    pub date: String,
    pub text: String,
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct ProgressTracker {
    config: TrackerConfig,
    document: ProgressDocument,
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl ProgressTracker {
    /// Load the document, or start from the default skeleton when the file
    /// is absent. Nothing is written until the first mutation.
    pub fn open(config: TrackerConfig) -> Result<Self> {
        Self::open_at(config, now().date())
    }

    pub fn open_at(config: TrackerConfig, today: NaiveDate) -> Result<Self> {
        config.validate()?;
        let path = config.progress_path();
        let document = match load_document(&path)? {
            Some(mut document) => {
                let removed = document.repair(today, &config.deadline);
                if removed > 0 {
                    warn!("Dropped {} duplicate book ids from {:?}", removed, path);
                }
                debug!("Loaded progress document from {:?}", path);
                document
            }
            None => {
                info!("Starting a new progress document at {:?}", path);
                ProgressDocument::new(today, &config.deadline)
            }
        };
        Ok(Self { config, document })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn document(&self) -> &ProgressDocument {
        &self.document
    }

    pub fn save(&self) -> Result<()> {
        save_document(&self.config.progress_path(), &self.document)
    }

    /// Returns true when `id` was newly recorded. Repeats change nothing.
    pub fn mark_collected(&mut self, id: BookId) -> Result<bool> {
        self.mark(IdSet::Collected, id)
    }

    /// Returns true when `id` was newly recorded. Processing a book that was
    /// never collected is allowed but logged.
    pub fn mark_processed(&mut self, id: BookId) -> Result<bool> {
        if !self.document.books.collected.contains(&id) {
            warn!("Book {} marked as processed but was never collected", id);
        }
        self.mark(IdSet::Processed, id)
    }

    /// Collected and processed in one step.
    pub fn mark_complete(&mut self, id: BookId) -> Result<(bool, bool)> {
        let collected = self.mark_collected(id)?;
        let processed = self.mark_processed(id)?;
        Ok((collected, processed))
    }

    fn mark(&mut self, set: IdSet, id: BookId) -> Result<bool> {
        if !self.document.books.insert(set, id) {
            debug!("Book {} already {}", id, set);
            return Ok(false);
        }
        self.save()?;
        info!("Book {} marked as {}", id, set);
        Ok(true)
    }

    pub fn record_failure(&mut self, id: BookId, reason: &str) -> Result<()> {
        self.record_failure_at(id, reason, now())
    }

    pub fn record_failure_at(&mut self, id: BookId, reason: &str, at: NaiveDateTime) -> Result<()> {
        self.document
            .books
            .failed
            .push(FailureRecord::new(id, at, reason));
        self.save()?;
        info!("Book {} marked as failed: {}", id, reason);
        Ok(())
    }

    pub fn append_log(&mut self, message: &str) -> Result<()> {
        self.append_log_at(message, now())
    }

    pub fn append_log_at(&mut self, message: &str, at: NaiveDateTime) -> Result<()> {
        self.document.daily_logs.push(LogEntry::new(at, message));
        self.save()?;
        info!("Log added: {}", message);
        Ok(())
    }

    pub fn render_status(&self) -> String {
        render_status(&self.document, &self.config)
    }

    /// Render today's report and write it to `daily_report_<date>.md`,
    /// replacing any earlier report for the same day.
    pub fn daily_report(&self) -> Result<DailyReport> {
        self.daily_report_for(now().date())
    }

    pub fn daily_report_for(&self, today: NaiveDate) -> Result<DailyReport> {
        let date = today.format(DATE_FORMAT).to_string();
        let text = render_daily_report(&self.document, &self.config, today);
        let path = self.config.report_path(&date);
        std::fs::write(&path, &text)?;
        info!("Daily report written to {:?}", path);
        Ok(DailyReport { date, text, path })
    }

    /// Merge ids found in the raw (`.txt`) and processed (`.json`)
    /// directories. Existing entries are never removed. Always saves.
    pub fn scan_directories(&mut self) -> Result<ScanSummary> {
        let raw_ids = scan_book_ids(&self.config.raw_path(), "txt")?;
        let processed_ids = scan_book_ids(&self.config.processed_path(), "json")?;

        let mut summary = ScanSummary::default();
        for id in raw_ids {
            if self.document.books.insert(IdSet::Collected, id) {
                summary.new_collected.push(id);
            }
        }
        for id in processed_ids {
            if self.document.books.insert(IdSet::Processed, id) {
                summary.new_processed.push(id);
            }
        }

        self.save()?;
        info!(
            "Scan added {} collected and {} processed books",
            summary.new_collected.len(),
            summary.new_processed.len()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 20).unwrap()
    }

    fn tracker_in(dir: &std::path::Path) -> ProgressTracker {
        ProgressTracker::open_at(TrackerConfig::with_data_dir(dir), today()).unwrap()
    }

    #[test]
    fn fresh_tracker_starts_from_skeleton_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = tracker_in(dir.path());

        let doc = tracker.document();
        assert_eq!(doc.start_date, "2025-10-20");
        assert_eq!(doc.deadline, "2025-10-27");
        assert!(doc.books.collected.is_empty());
        assert!(doc.daily_logs.is_empty());
        assert!(!tracker.config().progress_path().exists());

        let status = tracker.render_status();
        assert!(status.contains("Collected books: 0/50"));
        assert!(status.contains("Processed books: 0/50"));
    }

    #[test]
    fn marking_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = tracker_in(dir.path());

        assert!(tracker.mark_collected(3).unwrap());
        assert!(!tracker.mark_collected(3).unwrap());
        assert!(tracker.mark_collected(5).unwrap());
        assert_eq!(tracker.document().books.collected, vec![3, 5]);

        let reloaded = tracker_in(dir.path());
        assert_eq!(reloaded.document().books.collected, vec![3, 5]);
    }

    #[test]
    fn mark_complete_records_both_sets() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = tracker_in(dir.path());

        assert_eq!(tracker.mark_complete(1342).unwrap(), (true, true));
        assert_eq!(tracker.mark_complete(1342).unwrap(), (false, false));
        assert_eq!(tracker.document().books.collected, vec![1342]);
        assert_eq!(tracker.document().books.processed, vec![1342]);
    }

    #[test]
    fn failures_and_logs_only_grow() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = tracker_in(dir.path());
        let at = today().and_hms_opt(14, 2, 9).unwrap();

        tracker.record_failure_at(7, "download timed out", at).unwrap();
        tracker.record_failure_at(7, "download timed out", at).unwrap();
        tracker.append_log_at("started batch", at).unwrap();

        let doc = tracker.document();
        assert_eq!(doc.books.failed.len(), 2);
        assert_eq!(doc.books.failed[0], doc.books.failed[1]);
        assert_eq!(doc.books.failed[0].date, "2025-10-20 14:02:09");
        assert_eq!(doc.daily_logs.len(), 1);
        assert_eq!(doc.daily_logs[0].time, "14:02:09");

        let reloaded = tracker_in(dir.path());
        assert_eq!(reloaded.document(), tracker.document());
    }

    #[test]
    fn daily_report_is_written_and_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = tracker_in(dir.path());

        let first = tracker.daily_report_for(today()).unwrap();
        assert_eq!(first.path, dir.path().join("daily_report_2025-10-20.md"));
        assert!(fs::read_to_string(&first.path).unwrap().contains("No activity recorded"));

        let at = today().and_hms_opt(16, 0, 0).unwrap();
        tracker.append_log_at("chapter split done", at).unwrap();
        let second = tracker.daily_report_for(today()).unwrap();
        let written = fs::read_to_string(&second.path).unwrap();
        assert_eq!(written, second.text);
        assert!(written.contains("- [16:00:00] chapter split done"));
    }

    #[test]
    fn scan_merges_processed_ids_without_touching_collected() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = tracker_in(dir.path());
        for id in [1, 2, 3] {
            tracker.mark_collected(id).unwrap();
        }
        tracker.mark_processed(1).unwrap();

        let processed = dir.path().join("processed_data");
        fs::create_dir(&processed).unwrap();
        fs::write(processed.join("book_3.json"), "{}").unwrap();
        fs::write(processed.join("book_2.json"), "{}").unwrap();

        let summary = tracker.scan_directories().unwrap();
        assert!(summary.new_collected.is_empty());
        assert_eq!(summary.new_processed, vec![2, 3]);
        assert_eq!(tracker.document().books.processed, vec![1, 2, 3]);
        assert_eq!(tracker.document().books.collected, vec![1, 2, 3]);
    }

    #[test]
    fn scan_without_data_directories_still_saves() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = tracker_in(dir.path());

        let summary = tracker.scan_directories().unwrap();
        assert!(summary.is_empty());
        assert!(dir.path().join("progress_tracker.json").exists());

        let reloaded = tracker_in(dir.path());
        assert_eq!(
            reloaded.document(),
            &ProgressDocument::new(today(), "2025-10-27")
        );
    }

    #[test]
    fn scan_rejects_malformed_names() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw_data");
        fs::create_dir(&raw).unwrap();
        fs::write(raw.join("book_draft.txt"), "").unwrap();

        let mut tracker = tracker_in(dir.path());
        assert!(tracker.scan_directories().is_err());
        assert!(!tracker.config().progress_path().exists());
    }
}
