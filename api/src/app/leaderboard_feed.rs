//! Leaderboard feed
//!
//! Owns the published standings. Each refresh runs the source chain, and on
//! success replaces the whole list; on failure the last good list stays up and
//! only the error message changes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::app::source_chain::SourceChain;
use crate::domain::entities::{Page, Pager, RankedStanding, Standings};

/// Shown to viewers when a whole refresh cycle fails
pub const REFRESH_FAILED_MESSAGE: &str = "Failed to load leaderboard data. Please try again later.";

/// A consistent read of the feed for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardSnapshot {
    /// Top three teams
    pub podium: Vec<RankedStanding>,
    /// One page of the teams below the podium
    pub page: Page,
    /// Every team, sorted
    pub standings: Standings,
    pub error: Option<String>,
    /// True until the first successful refresh
    pub loading: bool,
    pub last_updated: Option<DateTime<Utc>>,
    /// Label of the source behind the current standings
    pub source: Option<String>,
}

/// Result of one refresh cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated { source: String, teams: usize },
    Failed,
}

/// Where the shared page cursor sits after a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePosition {
    pub page: usize,
    pub page_count: usize,
}

#[derive(Default)]
struct FeedState {
    standings: Standings,
    error: Option<String>,
    loaded: bool,
    pager: Pager,
    last_updated: Option<DateTime<Utc>>,
    source: Option<String>,
}

pub struct LeaderboardFeed {
    chain: SourceChain,
    page_size: usize,
    state: RwLock<FeedState>,
}

impl LeaderboardFeed {
    pub fn new(chain: SourceChain, page_size: usize) -> Self {
        Self {
            chain,
            page_size: page_size.max(1),
            state: RwLock::new(FeedState::default()),
        }
    }

    /// Run one refresh cycle. Never fails; the outcome is for logging and tests.
    pub async fn refresh(&self) -> RefreshOutcome {
        // Fetch, parse and sort outside the lock so readers are never blocked
        let result = self
            .chain
            .fetch_first()
            .await
            .map(|success| (Standings::from_rows(&success.rows), success));

        let mut state = self.state.write().await;
        match result {
            Ok((standings, success)) => {
                let teams = standings.len();

                state.standings = standings;
                state.error = None;
                state.loaded = true;
                state.pager.reset();
                state.last_updated = Some(Utc::now());
                state.source = Some(success.source.clone());

                tracing::debug!(
                    source = %success.source,
                    position = success.position,
                    teams,
                    "Leaderboard refreshed"
                );
                RefreshOutcome::Updated {
                    source: success.source,
                    teams,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, kept = state.standings.len(), "Failed to fetch leaderboard data");
                state.error = Some(REFRESH_FAILED_MESSAGE.to_string());
                RefreshOutcome::Failed
            }
        }
    }

    /// Read the feed. `page` overrides the shared page cursor and is clamped.
    pub async fn snapshot(&self, page: Option<usize>) -> LeaderboardSnapshot {
        let state = self.state.read().await;
        let index = page.unwrap_or_else(|| state.pager.index());

        LeaderboardSnapshot {
            podium: state.standings.podium(),
            page: state.standings.page(index, self.page_size),
            standings: state.standings.clone(),
            error: state.error.clone(),
            loading: !state.loaded,
            last_updated: state.last_updated,
            source: state.source.clone(),
        }
    }

    /// Advance the shared page cursor; stays put on the last page
    pub async fn next_page(&self) -> PagePosition {
        let mut state = self.state.write().await;
        let page_count = state.standings.page_count(self.page_size);
        let page = state.pager.next(page_count);
        PagePosition { page, page_count }
    }

    /// Move the shared page cursor back; stays put on the first page
    pub async fn prev_page(&self) -> PagePosition {
        let mut state = self.state.write().await;
        let page_count = state.standings.page_count(self.page_size);
        let page = state.pager.prev(page_count);
        PagePosition { page, page_count }
    }

    /// Jump the shared page cursor to `index`, clamped
    pub async fn goto_page(&self, index: usize) -> PagePosition {
        let mut state = self.state.write().await;
        let page_count = state.standings.page_count(self.page_size);
        let page = state.pager.goto(index, page_count);
        PagePosition { page, page_count }
    }
}
