//! Tracker building blocks: configuration, the `ProgressTracker` itself,
//! report rendering and the chapter cache audit.
pub mod audit;
pub mod params;
pub mod report;
pub mod tracker;
