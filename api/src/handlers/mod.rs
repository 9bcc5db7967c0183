//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod leaderboard;

pub use leaderboard::{get_leaderboard, get_standings, goto_page, next_page, prev_page};
