//! Command Line Interface (CLI) layer for booktrack.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the dispatch logic (`runner`) that maps one flag per invocation to
//! one `ProgressTracker` operation.
//!
//! If you are embedding the tracker into another application, use
//! `booktrack::ProgressTracker` directly instead of the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
