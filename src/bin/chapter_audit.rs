//! Read-only check of the cached chapter JSON in the processed directory.
//! Prints per-book chapter counts and the manual fix for truncated output.
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use booktrack::{BookId, DEFAULT_AUDIT_BOOKS, Error, audit_chapters, render_audit};

#[derive(Parser)]
#[command(name = "chapter-audit", version, about = "Detect truncated chapter output")]
struct AuditArgs {
    /// Directory holding book_<id>.json files
    #[arg(long, default_value = "./processed_data")]
    processed_dir: PathBuf,

    /// Book id to inspect (repeatable, replaces the default list)
    #[arg(long = "book", value_name = "BOOK_ID")]
    books: Vec<BookId>,

    /// Enable logging to stderr
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = AuditArgs::parse();
    if args.verbose {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let books: &[BookId] = if args.books.is_empty() {
        &DEFAULT_AUDIT_BOOKS
    } else {
        &args.books
    };

    match audit_chapters(&args.processed_dir, books) {
        Ok(report) => {
            print!("{}", render_audit(&report));
            Ok(())
        }
        Err(Error::MissingDirectory { path }) => {
            println!("⚠️ {} directory not found.", path.display());
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
