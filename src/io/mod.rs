//! File layer: whole-document JSON persistence (`store`) and
//! `book_<id>.<ext>` directory scanning (`scan`).
pub mod store;
pub use store::{load_document, save_document};

pub mod scan;
pub use scan::{parse_book_id, scan_book_ids};
