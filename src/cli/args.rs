use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use booktrack::BookId;

#[derive(Parser)]
#[command(name = "booktrack", version, about = "Book collection and processing progress tracker")]
#[command(group(
    ArgGroup::new("operation")
        .args(["check", "add_book", "collected", "processed", "fail", "report", "scan", "log"])
        .multiple(false)
))]
pub struct CliArgs {
    /// Show current progress (default when no operation is given)
    #[arg(long, default_value_t = false)]
    pub check: bool,

    /// Record a book as both collected and processed
    #[arg(long, value_name = "BOOK_ID")]
    pub add_book: Option<BookId>,

    /// Record a book as collected
    #[arg(long, value_name = "BOOK_ID")]
    pub collected: Option<BookId>,

    /// Record a book as processed
    #[arg(long, value_name = "BOOK_ID")]
    pub processed: Option<BookId>,

    /// Record a failed processing attempt
    #[arg(long, value_name = "BOOK_ID")]
    pub fail: Option<BookId>,

    /// Failure reason (with --fail)
    #[arg(long, requires = "fail")]
    pub reason: Option<String>,

    /// Generate today's report and save it as daily_report_<date>.md
    #[arg(long, default_value_t = false)]
    pub report: bool,

    /// Scan raw/processed directories and update progress
    #[arg(long, default_value_t = false)]
    pub scan: bool,

    /// Append a log message
    #[arg(long, value_name = "MESSAGE")]
    pub log: Option<String>,

    /// Directory holding the progress file, reports and data directories
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// JSON config file (TrackerConfig fields, all optional)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the target number of books
    #[arg(long)]
    pub target: Option<usize>,

    /// Enable logging to stderr (RUST_LOG filters, default debug)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
