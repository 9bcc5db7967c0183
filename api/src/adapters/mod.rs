//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod csv;
pub mod sheets;

pub use csv::PublishedCsvSource;
pub use sheets::SheetsApiSource;
