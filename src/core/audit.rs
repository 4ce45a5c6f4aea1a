//! Read-only check of cached per-book chapter output.
//!
//! Each `book_<id>.json` in the processed directory records how many chapters
//! the book has (`total_chapters`) and the chapters actually converted
//! (`processed_chapters`). A pipeline that stopped after the first few
//! chapters leaves `processed < total`; those books need re-running.
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::BookId;

/// Books inspected when no explicit list is given.
pub const DEFAULT_AUDIT_BOOKS: [BookId; 10] = [1342, 11, 98, 74, 345, 46, 1952, 1661, 2701, 84];

#[derive(Debug, Deserialize)]
struct ChapterCache {
    #[serde(default)]
    total_chapters: usize,
    #[serde(default)]
    processed_chapters: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterStatus {
    Missing,
    Counted { processed: usize, total: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookAudit {
    pub book_id: BookId,
    pub status: ChapterStatus,
}

impl BookAudit {
    pub fn is_truncated(&self) -> bool {
        matches!(self.status, ChapterStatus::Counted { processed, total } if processed < total)
    }
}

#[derive(Debug, Clone)]
pub struct AuditReport {
    pub processed_dir: PathBuf,
    pub books: Vec<BookAudit>,
}

impl AuditReport {
    pub fn truncated(&self) -> impl Iterator<Item = &BookAudit> {
        self.books.iter().filter(|b| b.is_truncated())
    }

    pub fn missing(&self) -> impl Iterator<Item = &BookAudit> {
        self.books
            .iter()
            .filter(|b| b.status == ChapterStatus::Missing)
    }
}

/// Inspect `book_<id>.json` for each id. The directory must exist; missing
/// book files are reported, malformed ones are an error.
pub fn audit_chapters(processed_dir: &Path, book_ids: &[BookId]) -> Result<AuditReport> {
    if !processed_dir.is_dir() {
        return Err(Error::MissingDirectory {
            path: processed_dir.to_path_buf(),
        });
    }

    let mut books = Vec::with_capacity(book_ids.len());
    for &book_id in book_ids {
        let path = processed_dir.join(format!("book_{book_id}.json"));
        let status = match fs::read_to_string(&path) {
            Ok(text) => {
                let cache: ChapterCache =
                    serde_json::from_str(&text).map_err(|source| Error::MalformedDocument {
                        path: path.clone(),
                        source,
                    })?;
                ChapterStatus::Counted {
                    processed: cache.processed_chapters.len(),
                    total: cache.total_chapters,
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => ChapterStatus::Missing,
            Err(e) => return Err(e.into()),
        };
        debug!("Book {}: {:?}", book_id, status);
        books.push(BookAudit { book_id, status });
    }

    Ok(AuditReport {
        processed_dir: processed_dir.to_path_buf(),
        books,
    })
}

const REMEDIATION: &str = "\
The BookToScriptPipeline class in the notebook limits each book to its first
five chapters, so the cached JSON files above are incomplete.

The notebook has to be edited by hand:
1. Open data_preprocessing.ipynb
2. Find the process_book method of the BookToScriptPipeline class
3. Change \"for i, chapter in enumerate(chapters[:5])\"
   to     \"for i, chapter in enumerate(chapters)\"
4. Run the modified cell
5. Re-run pipeline.process_multiple_books()
";

pub fn write_audit(out: &mut impl fmt::Write, report: &AuditReport) -> fmt::Result {
    let rule = "=".repeat(70);
    writeln!(out, "{rule}")?;
    writeln!(out, "Chapter cache audit: {}", report.processed_dir.display())?;
    writeln!(out, "{rule}")?;
    writeln!(out)?;
    writeln!(out, "Current state:")?;
    for book in &report.books {
        match book.status {
            ChapterStatus::Counted { processed, total } => writeln!(
                out,
                "  Book {}: {}/{} chapters processed",
                book.book_id, processed, total
            )?,
            ChapterStatus::Missing => writeln!(out, "  Book {}: file not found", book.book_id)?,
        }
    }

    let truncated: Vec<String> = report.truncated().map(|b| b.book_id.to_string()).collect();
    writeln!(out)?;
    if truncated.is_empty() {
        writeln!(out, "No truncated books found.")?;
    } else {
        writeln!(
            out,
            "Truncated books ({}): {}",
            truncated.len(),
            truncated.join(", ")
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "How to fix:")?;
    writeln!(out, "{rule}")?;
    out.write_str(REMEDIATION)
}

pub fn render_audit(report: &AuditReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_audit(&mut out, report);
    out
}
