//! Leaderboard renderer
//!
//! Renders leaderboard snapshots to LLM- and terminal-readable markdown.

use crate::app::LeaderboardSnapshot;
use crate::domain::entities::RankedStanding;

const MAX_NAME_LEN: usize = 40;

/// Render a snapshot to markdown format
pub fn render_leaderboard(snapshot: &LeaderboardSnapshot) -> String {
    let mut buf = String::new();

    buf.push_str("# Leaderboard\n\n");

    if let Some(error) = &snapshot.error {
        buf.push_str(&format!("> {}\n\n", error));
    }

    if snapshot.standings.is_empty() {
        if snapshot.loading {
            buf.push_str("_Loading leaderboard..._\n\n");
        } else {
            buf.push_str("_No teams on the board yet._\n\n");
        }
        return buf;
    }

    // Podium
    buf.push_str("## Podium\n\n");
    buf.push_str(&render_table(snapshot.podium.iter()));
    buf.push('\n');

    // Paged remainder
    let page = &snapshot.page;
    if page.page_count > 0 {
        buf.push_str(&format!(
            "## Rankings (page {}/{})\n\n",
            page.index + 1,
            page.page_count
        ));
        buf.push_str(&render_table(page.entries()));
        buf.push('\n');
        if page.has_next() {
            buf.push_str(&format!("_More teams on page {}._\n\n", page.index + 2));
        }
    }

    if let Some(updated) = snapshot.last_updated {
        buf.push_str(&format!(
            "_Last updated {}_\n",
            updated.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    buf
}

fn render_table<'a>(rows: impl Iterator<Item = &'a RankedStanding>) -> String {
    let mut buf = String::new();
    buf.push_str("| Rank | Team | ID | XP |\n");
    buf.push_str("|------|------|----|----|\n");
    for row in rows {
        buf.push_str(&format!(
            "| {} | {} | @{} | {} |\n",
            row.rank,
            truncate(&row.standing.team_name, MAX_NAME_LEN),
            row.standing.team_id,
            row.standing.total_score
        ));
    }
    buf
}

/// Truncate a string to max_len characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
