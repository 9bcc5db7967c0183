//! Domain entities
//!
//! Pure domain models for the leaderboard: a team's standing and the sorted,
//! paginated list of standings.

pub mod standings;
pub mod team_standing;

pub use standings::{Page, Pager, RankedStanding, RawRow, Standings};
pub use team_standing::TeamStanding;
