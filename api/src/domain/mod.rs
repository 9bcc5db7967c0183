//! Domain layer
//!
//! Contains pure leaderboard logic with no external dependencies.
//! - `entities`: Team standings, sorting and pagination
//! - `ports`: Trait definitions for standings sources

pub mod entities;
pub mod ports;
