//! Google Sheets adapter
//!
//! Authenticated standings source using the Sheets v4 values API.

pub mod client;

pub use client::SheetsApiSource;
