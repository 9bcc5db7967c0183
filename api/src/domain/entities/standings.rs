//! Standings domain entity
//!
//! The sorted team list plus the podium/page views built from it.

use serde::Serialize;

use super::TeamStanding;

/// Number of teams shown on the podium, apart from the paged remainder
pub const PODIUM_SIZE: usize = 3;

/// One raw record as produced by a source: cells in column order (id, name, score)
pub type RawRow = Vec<String>;

/// A standing together with its 1-based position in the sorted list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedStanding {
    pub rank: usize,
    #[serde(flatten)]
    pub standing: TeamStanding,
}

/// Team standings, always sorted by score descending.
///
/// Teams with equal scores stay in the order the source listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Standings(Vec<TeamStanding>);

impl Standings {
    /// Sort teams by score, highest first. The sort is stable.
    pub fn from_unsorted(mut teams: Vec<TeamStanding>) -> Self {
        teams.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        Self(teams)
    }

    /// Parse raw source rows (first row is the header) and sort them.
    pub fn from_rows(rows: &[RawRow]) -> Self {
        Self::from_unsorted(parse_rows(rows))
    }

    pub fn as_slice(&self) -> &[TeamStanding] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The top three teams (fewer if the list is short)
    pub fn podium(&self) -> Vec<RankedStanding> {
        self.ranked().take(PODIUM_SIZE).collect()
    }

    /// Number of teams below the podium
    pub fn remainder_len(&self) -> usize {
        self.0.len().saturating_sub(PODIUM_SIZE)
    }

    /// Pages needed to show the remainder: `ceil(remainder / page_size)`
    pub fn page_count(&self, page_size: usize) -> usize {
        self.remainder_len().div_ceil(page_size.max(1))
    }

    /// One page of the remainder, padded with empty slots to `page_size`.
    ///
    /// `index` is clamped to the last page.
    pub fn page(&self, index: usize, page_size: usize) -> Page {
        let page_size = page_size.max(1);
        let page_count = self.page_count(page_size);
        let index = clamp_page(index, page_count);

        let mut slots: Vec<Option<RankedStanding>> = self
            .ranked()
            .skip(PODIUM_SIZE + index * page_size)
            .take(page_size)
            .map(Some)
            .collect();
        slots.resize(page_size, None);

        Page {
            index,
            page_count,
            page_size,
            slots,
        }
    }

    fn ranked(&self) -> impl Iterator<Item = RankedStanding> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(i, standing)| RankedStanding {
                rank: i + 1,
                standing: standing.clone(),
            })
    }
}

/// Turn raw rows into standings, skipping the header row.
///
/// Every remaining row produces a standing, with missing or blank columns
/// defaulted. Extra columns are ignored.
pub fn parse_rows(rows: &[RawRow]) -> Vec<TeamStanding> {
    rows.iter()
        .skip(1)
        .map(|row| {
            TeamStanding::from_columns(
                row.first().map(String::as_str),
                row.get(1).map(String::as_str),
                row.get(2).map(String::as_str),
            )
        })
        .collect()
}

/// Clamp a page index into `[0, page_count - 1]` (0 when there are no pages)
pub fn clamp_page(index: usize, page_count: usize) -> usize {
    index.min(page_count.saturating_sub(1))
}

/// A fixed-size page of the remainder list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub index: usize,
    pub page_count: usize,
    pub page_size: usize,
    /// Exactly `page_size` slots; trailing `None`s pad the last page
    pub slots: Vec<Option<RankedStanding>>,
}

impl Page {
    /// The filled slots, in rank order
    pub fn entries(&self) -> impl Iterator<Item = &RankedStanding> {
        self.slots.iter().flatten()
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.page_count
    }
}

/// Current page position over the remainder list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pager {
    index: usize,
}

impl Pager {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Advance one page; a no-op on the last page
    pub fn next(&mut self, page_count: usize) -> usize {
        self.index = clamp_page(self.index.saturating_add(1), page_count);
        self.index
    }

    /// Step back one page; a no-op on the first page
    pub fn prev(&mut self, page_count: usize) -> usize {
        self.index = clamp_page(self.index.saturating_sub(1), page_count);
        self.index
    }

    pub fn goto(&mut self, index: usize, page_count: usize) -> usize {
        self.index = clamp_page(index, page_count);
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}
