//! Published CSV adapter
//!
//! Fallback standings source reading the sheet's public CSV export.

pub mod client;
pub mod parser;

pub use client::PublishedCsvSource;
