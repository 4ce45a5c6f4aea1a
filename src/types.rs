//! Shared types persisted in the progress document.
//! Includes `ProgressDocument`, its `Books` ledger, `FailureRecord`, `LogEntry`,
//! the `Category` enum used by reports, and the `IdSet` selector for the
//! two deduplicated id collections.
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Identifier of a book in the source catalogue.
pub type BookId = u64;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Category {
    Collected,
    Processed,
    Failed,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Collected => write!(f, "collected"),
            Category::Processed => write!(f, "processed"),
            Category::Failed => write!(f, "failed"),
        }
    }
}

/// The id collections of `Books`. Failures are a record list, not a set.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum IdSet {
    Collected,
    Processed,
}

impl std::fmt::Display for IdSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdSet::Collected => write!(f, "collected"),
            IdSet::Processed => write!(f, "processed"),
        }
    }
}

/// A single failed processing attempt. Records are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub book_id: BookId,
    pub date: String,
    #[serde(default)]
    pub reason: String,
}

impl FailureRecord {
    pub fn new(book_id: BookId, at: NaiveDateTime, reason: impl Into<String>) -> Self {
        Self {
            book_id,
            date: at.format(TIMESTAMP_FORMAT).to_string(),
            reason: reason.into(),
        }
    }
}

/// Free-text operator note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub date: String,
    pub time: String,
    pub entry: String,
}

impl LogEntry {
    pub fn new(at: NaiveDateTime, entry: impl Into<String>) -> Self {
        Self {
            date: at.format(DATE_FORMAT).to_string(),
            time: at.format(TIME_FORMAT).to_string(),
            entry: entry.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Books {
    #[serde(default)]
    pub collected: Vec<BookId>,
    #[serde(default)]
    pub processed: Vec<BookId>,
    #[serde(default)]
    pub failed: Vec<FailureRecord>,
}

impl Books {
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Collected => self.collected.len(),
            Category::Processed => self.processed.len(),
            Category::Failed => self.failed.len(),
        }
    }

    pub fn ids(&self, set: IdSet) -> &[BookId] {
        match set {
            IdSet::Collected => &self.collected,
            IdSet::Processed => &self.processed,
        }
    }

    /// Insert `id` into an id set. Returns false if it was already present.
    pub fn insert(&mut self, set: IdSet, id: BookId) -> bool {
        let ids = match set {
            IdSet::Collected => &mut self.collected,
            IdSet::Processed => &mut self.processed,
        };
        if ids.contains(&id) {
            return false;
        }
        ids.push(id);
        true
    }
}

/// The persisted tracker state. Every field defaults when absent so that
/// hand-edited files keep loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressDocument {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub books: Books,
    #[serde(default)]
    pub daily_logs: Vec<LogEntry>,
}

impl ProgressDocument {
    /// Fresh skeleton with empty collections.
    pub fn new(start_date: NaiveDate, deadline: &str) -> Self {
        Self {
            start_date: start_date.format(DATE_FORMAT).to_string(),
            deadline: deadline.to_string(),
            books: Books::default(),
            daily_logs: Vec::new(),
        }
    }

    /// Fill blank header fields and drop duplicate ids, keeping the first
    /// occurrence. Returns the number of duplicates removed.
    pub fn repair(&mut self, today: NaiveDate, deadline: &str) -> usize {
        if self.start_date.is_empty() {
            self.start_date = today.format(DATE_FORMAT).to_string();
        }
        if self.deadline.is_empty() {
            self.deadline = deadline.to_string();
        }
        dedup_in_order(&mut self.books.collected) + dedup_in_order(&mut self.books.processed)
    }

    /// Log entries whose date equals `day`, in insertion order.
    pub fn logs_on(&self, day: NaiveDate) -> impl Iterator<Item = &LogEntry> {
        let day = day.format(DATE_FORMAT).to_string();
        self.daily_logs.iter().filter(move |log| log.date == day)
    }

    /// The last `n` log entries, oldest first.
    pub fn recent_logs(&self, n: usize) -> &[LogEntry] {
        let start = self.daily_logs.len().saturating_sub(n);
        &self.daily_logs[start..]
    }
}

fn dedup_in_order(ids: &mut Vec<BookId>) -> usize {
    let before = ids.len();
    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(*id));
    before - ids.len()
}
