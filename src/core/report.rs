//! Text rendering for the status screen and the daily report.
//! Pure functions over a `ProgressDocument`; callers decide where the text goes.
use std::fmt;

use chrono::NaiveDate;

use crate::core::params::TrackerConfig;
use crate::types::{Category, DATE_FORMAT, ProgressDocument};

const RULE_WIDTH: usize = 60;
const FILLED: char = '█';
const EMPTY: char = '░';
pub const NO_ACTIVITY: &str = "- No activity recorded";

/// `current / total` as a percentage. Zero when `total` is zero.
pub fn percentage(current: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    current as f64 / total as f64 * 100.0
}

/// `[████░░░░] 6.0% (3/50)`. The bar is clamped to `width` glyphs.
pub fn progress_bar(current: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (width.saturating_mul(current) / total).min(width)
    };
    let bar: String = std::iter::repeat_n(FILLED, filled)
        .chain(std::iter::repeat_n(EMPTY, width - filled))
        .collect();
    format!(
        "[{bar}] {:.1}% ({current}/{total})",
        percentage(current, total)
    )
}

/// Status screen: counts, one bar per id set, failures, recent activity.
pub fn write_status(
    out: &mut impl fmt::Write,
    document: &ProgressDocument,
    config: &TrackerConfig,
) -> fmt::Result {
    let target = config.target_total;
    let collected = document.books.count(Category::Collected);
    let processed = document.books.count(Category::Processed);
    let failed = document.books.count(Category::Failed);
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out, "{rule}")?;
    writeln!(out, "Current Progress")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Start date: {}", document.start_date)?;
    writeln!(out, "Deadline: {}", document.deadline)?;
    writeln!(out)?;
    writeln!(out, "Collected books: {collected}/{target}")?;
    writeln!(
        out,
        "   Progress: {}",
        progress_bar(collected, target, config.bar_width)
    )?;
    writeln!(out)?;
    writeln!(out, "Processed books: {processed}/{target}")?;
    writeln!(
        out,
        "   Progress: {}",
        progress_bar(processed, target, config.bar_width)
    )?;
    writeln!(out)?;
    writeln!(out, "Failures: {failed}")?;
    writeln!(out)?;

    let recent = document.recent_logs(config.recent_logs);
    if !recent.is_empty() {
        writeln!(out, "Recent activity:")?;
        for log in recent {
            writeln!(out, "   [{} {}] {}", log.date, log.time, log.entry)?;
        }
    }
    writeln!(out, "{rule}")
}

pub fn write_daily_report(
    out: &mut impl fmt::Write,
    document: &ProgressDocument,
    config: &TrackerConfig,
    today: NaiveDate,
) -> fmt::Result {
    let target = config.target_total;
    let collected = document.books.count(Category::Collected);
    let processed = document.books.count(Category::Processed);
    let failed = document.books.count(Category::Failed);

    writeln!(out)?;
    writeln!(out, "# Daily Progress Report")?;
    writeln!(out, "Date: {}", today.format(DATE_FORMAT))?;
    writeln!(out)?;
    writeln!(out, "## Statistics")?;
    writeln!(out, "- Books collected: {collected}")?;
    writeln!(out, "- Books processed: {processed}")?;
    writeln!(out, "- Failures: {failed}")?;
    writeln!(out)?;
    writeln!(out, "## Progress")?;
    writeln!(out, "- Collection: {:.1}%", percentage(collected, target))?;
    writeln!(out, "- Processing: {:.1}%", percentage(processed, target))?;
    writeln!(out)?;
    writeln!(out, "## Today's Activity")?;

    let mut any = false;
    for log in document.logs_on(today) {
        any = true;
        writeln!(out, "- [{}] {}", log.time, log.entry)?;
    }
    if !any {
        writeln!(out, "{NO_ACTIVITY}")?;
    }

    let to_collect = target.saturating_sub(collected);
    let to_process = collected.saturating_sub(processed);
    if to_collect > 0 || to_process > 0 {
        writeln!(out)?;
        writeln!(out, "## Next Goals")?;
        if to_collect > 0 {
            writeln!(out, "- Collect {to_collect} more books")?;
        }
        if to_process > 0 {
            writeln!(out, "- Process {to_process} collected books")?;
        }
    }
    Ok(())
}

pub fn render_status(document: &ProgressDocument, config: &TrackerConfig) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_status(&mut out, document, config);
    out
}

pub fn render_daily_report(
    document: &ProgressDocument,
    config: &TrackerConfig,
    today: NaiveDate,
) -> String {
    let mut out = String::new();
    let _ = write_daily_report(&mut out, document, config, today);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FailureRecord, LogEntry};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
    }

    fn sample() -> ProgressDocument {
        let mut doc = ProgressDocument::new(day(15), "2025-10-27");
        doc.books.collected = vec![1, 2, 3];
        doc.books.processed = vec![1];
        let at = day(20).and_hms_opt(12, 0, 0).unwrap();
        doc.books.failed = vec![
            FailureRecord::new(4, at, "bad encoding"),
            FailureRecord::new(4, at, "bad encoding"),
        ];
        doc
    }

    #[test]
    fn bar_is_proportional_and_clamped() {
        let bar = progress_bar(3, 50, 40);
        assert_eq!(bar, format!("[{}{}] 6.0% (3/50)", "█".repeat(2), "░".repeat(38)));

        let full = progress_bar(60, 50, 10);
        assert_eq!(full, format!("[{}] 120.0% (60/50)", "█".repeat(10)));

        assert_eq!(progress_bar(0, 50, 4), "[░░░░] 0.0% (0/50)");
    }

    #[test]
    fn status_shows_counts_and_recent_logs() {
        let mut doc = sample();
        for i in 0..4 {
            let at = day(20).and_hms_opt(9, i, 0).unwrap();
            doc.daily_logs.push(LogEntry::new(at, format!("note {i}")));
        }
        let text = render_status(&doc, &TrackerConfig::default());

        assert!(text.contains("Collected books: 3/50"));
        assert!(text.contains("Processed books: 1/50"));
        assert!(text.contains("6.0% (3/50)"));
        assert!(text.contains("2.0% (1/50)"));
        assert!(text.contains("Failures: 2"));
        assert!(!text.contains("note 0"));
        assert!(text.contains("   [2025-10-20 09:03:00] note 3"));
    }

    #[test]
    fn writers_stop_at_the_first_failed_write() {
        struct Refuse;
        impl fmt::Write for Refuse {
            fn write_str(&mut self, _: &str) -> fmt::Result {
                Err(fmt::Error)
            }
        }

        let config = TrackerConfig::default();
        assert!(write_status(&mut Refuse, &sample(), &config).is_err());
        assert!(write_daily_report(&mut Refuse, &sample(), &config, day(20)).is_err());

        let mut out = String::new();
        write_status(&mut out, &sample(), &config).unwrap();
        assert_eq!(out, render_status(&sample(), &config));
    }

    #[test]
    fn bar_handles_large_counts_without_overflow() {
        let bar = progress_bar(usize::MAX, 50, 200);
        assert!(bar.starts_with(&format!("[{}]", "█".repeat(200))));
    }

    #[test]
    fn status_omits_activity_block_without_logs() {
        let text = render_status(&sample(), &TrackerConfig::default());
        assert!(!text.contains("Recent activity"));
    }

    #[test]
    fn daily_report_percentages_and_goals() {
        let text = render_daily_report(&sample(), &TrackerConfig::default(), day(20));
        assert!(text.contains("Date: 2025-10-20"));
        assert!(text.contains("- Collection: 6.0%"));
        assert!(text.contains("- Processing: 2.0%"));
        assert!(text.contains("- Failures: 2"));
        assert!(text.contains("- Collect 47 more books"));
        assert!(text.contains("- Process 2 collected books"));
    }

    #[test]
    fn daily_report_without_activity_uses_placeholder() {
        let mut doc = sample();
        let yesterday = day(19).and_hms_opt(18, 0, 0).unwrap();
        doc.daily_logs.push(LogEntry::new(yesterday, "old note"));

        let text = render_daily_report(&doc, &TrackerConfig::default(), day(20));
        assert!(text.contains(NO_ACTIVITY));
        assert!(!text.contains("old note"));
    }

    #[test]
    fn daily_report_lists_only_todays_logs() {
        let mut doc = sample();
        doc.daily_logs.push(LogEntry::new(day(19).and_hms_opt(8, 0, 0).unwrap(), "before"));
        doc.daily_logs.push(LogEntry::new(day(20).and_hms_opt(8, 15, 0).unwrap(), "today"));

        let text = render_daily_report(&doc, &TrackerConfig::default(), day(20));
        assert!(text.contains("- [08:15:00] today"));
        assert!(!text.contains("before"));
        assert!(!text.contains(NO_ACTIVITY));
    }

    #[test]
    fn goals_section_dropped_when_complete() {
        let mut doc = sample();
        doc.books.collected = (1..=50).collect();
        doc.books.processed = (1..=50).collect();
        let text = render_daily_report(&doc, &TrackerConfig::default(), day(20));
        assert!(!text.contains("## Next Goals"));
    }
}
