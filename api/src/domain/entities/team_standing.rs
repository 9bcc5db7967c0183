//! Team standing domain entity
//!
//! One team's row on the leaderboard, normalized from whatever source produced it.

use serde::{Deserialize, Serialize};

/// Team id used when the source row has no id
pub const DEFAULT_TEAM_ID: &str = "N/A";

/// Team name used when the source row has no name
pub const DEFAULT_TEAM_NAME: &str = "Unknown Team";

/// A competing team's identifier, display name and cumulative score
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub team_id: String,
    pub team_name: String,
    pub total_score: u64,
}

impl TeamStanding {
    pub fn new(team_id: impl Into<String>, team_name: impl Into<String>, total_score: u64) -> Self {
        Self {
            team_id: team_id.into(),
            team_name: team_name.into(),
            total_score,
        }
    }

    /// Build a standing from the three raw columns (id, name, score).
    ///
    /// Each column is defaulted on its own: blank or missing text falls back to
    /// the sentinel, and a score that doesn't parse becomes zero. Never fails.
    pub fn from_columns(id: Option<&str>, name: Option<&str>, score: Option<&str>) -> Self {
        Self::new(
            text_or(id, DEFAULT_TEAM_ID),
            text_or(name, DEFAULT_TEAM_NAME),
            score.map(parse_score).unwrap_or(0),
        )
    }
}

impl std::fmt::Display for TeamStanding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (@{}) {} XP", self.team_name, self.team_id, self.total_score)
    }
}

fn text_or(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Lenient integer parse for score cells.
///
/// Takes an optional sign and the leading run of digits, ignoring whatever
/// follows ("80.5" is 80, "12 XP" is 12). Negative scores clamp to zero and
/// anything too large for `u64` saturates.
pub fn parse_score(raw: &str) -> u64 {
    let s = raw.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];

    if digits.is_empty() || negative {
        return 0;
    }

    digits.parse::<u64>().unwrap_or(u64::MAX)
}
