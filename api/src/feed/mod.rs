//! Feed module
//!
//! Plain-text (markdown) rendering of leaderboard snapshots.

pub mod renderer;

pub use renderer::render_leaderboard;
