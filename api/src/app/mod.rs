//! Application layer
//!
//! Contains use cases and service orchestration.
//! The leaderboard feed coordinates the source chain and publishes standings;
//! the schedule drives its refresh cycles.

pub mod leaderboard_feed;
pub mod scheduler;
pub mod source_chain;

pub use leaderboard_feed::{LeaderboardFeed, LeaderboardSnapshot, PagePosition};
pub use scheduler::RefreshSchedule;
pub use source_chain::SourceChain;
