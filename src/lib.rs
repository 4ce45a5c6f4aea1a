#![doc = r#"
booktrack — progress tracking for a book-to-script data workflow.

This crate keeps a small JSON ledger of which books have been collected, processed,
or have failed, and renders it as a status screen or a dated daily report. It powers
the `booktrack` CLI and the read-only `chapter-audit` diagnostic, and can be used
directly from Rust.

Quick start: record progress
----------------------------
```rust,no_run
use booktrack::{ProgressTracker, TrackerConfig};

fn main() -> booktrack::Result<()> {
    let mut tracker = ProgressTracker::open(TrackerConfig::with_data_dir("./"))?;

    tracker.mark_collected(1342)?;
    tracker.mark_processed(1342)?;
    tracker.record_failure(98, "encoding error")?;
    tracker.append_log("collected first batch")?;

    println!("{}", tracker.render_status());
    Ok(())
}
```

Daily report and directory scan
-------------------------------
```rust,no_run
use booktrack::{ProgressTracker, TrackerConfig};

fn main() -> booktrack::Result<()> {
    let mut tracker = ProgressTracker::open(TrackerConfig::default())?;

    // Picks up raw_data/book_<id>.txt and processed_data/book_<id>.json
    let summary = tracker.scan_directories()?;
    println!("new: {:?} / {:?}", summary.new_collected, summary.new_processed);

    let report = tracker.daily_report()?;
    println!("{}", report.text);
    Ok(())
}
```

Error handling
--------------
All public functions return `booktrack::Result<T>`. A missing progress file is not an
error (a fresh document is started), but a malformed one is:

```rust,no_run
use booktrack::{Error, ProgressTracker, TrackerConfig};

fn main() {
    match ProgressTracker::open(TrackerConfig::default()) {
        Ok(tracker) => println!("{}", tracker.render_status()),
        Err(Error::MalformedDocument { path, source }) => {
            eprintln!("fix {} by hand: {source}", path.display())
        }
        Err(other) => eprintln!("error: {other}"),
    }
}
```

Useful modules
--------------
- [`core`] — `ProgressTracker`, `TrackerConfig`, report rendering and the chapter audit.
- [`types`] — the persisted `ProgressDocument` and its records.
- [`io`] — document persistence and `book_<id>.<ext>` scanning.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
pub use crate::core::audit::{
    AuditReport, BookAudit, ChapterStatus, DEFAULT_AUDIT_BOOKS, audit_chapters, render_audit,
    write_audit,
};
pub use crate::core::params::TrackerConfig;
pub use crate::core::tracker::{DailyReport, ProgressTracker, ScanSummary};
pub use crate::error::{Error, Result};
pub use crate::types::{BookId, Books, Category, FailureRecord, IdSet, LogEntry, ProgressDocument};
