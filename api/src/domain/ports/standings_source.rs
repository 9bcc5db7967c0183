//! Standings source port trait
//!
//! Defines the interface every leaderboard data source implements: the
//! authenticated spreadsheet query and the public CSV export alike.

use async_trait::async_trait;

use crate::domain::entities::RawRow;
use crate::error::SourceError;

/// Port trait for fetching raw leaderboard rows
#[async_trait]
pub trait StandingsSource: Send + Sync {
    /// Short human-readable name for logs (never contains secrets)
    fn label(&self) -> String;

    /// Fetch all rows, header row included, in column order (id, name, score)
    async fn fetch_rows(&self) -> Result<Vec<RawRow>, SourceError>;
}
