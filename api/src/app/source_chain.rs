//! Source chain
//!
//! Runs an ordered list of standings sources until one succeeds: every Sheets
//! API key in priority order, then the published CSV export.

use std::sync::Arc;

use reqwest::Client;

use crate::adapters::{PublishedCsvSource, SheetsApiSource};
use crate::config::Config;
use crate::domain::entities::RawRow;
use crate::domain::ports::StandingsSource;
use crate::error::{RefreshError, SourceError};

/// Rows from the first source that answered
#[derive(Debug, Clone)]
pub struct ChainSuccess {
    pub rows: Vec<RawRow>,
    /// Label of the source that produced the rows
    pub source: String,
    /// 1-based position of that source in the chain
    pub position: usize,
}

pub struct SourceChain {
    sources: Vec<Arc<dyn StandingsSource>>,
}

impl SourceChain {
    pub fn new(sources: Vec<Arc<dyn StandingsSource>>) -> Self {
        Self { sources }
    }

    /// One Sheets API source per configured key, then the CSV fallback.
    ///
    /// Stages without the configuration they need are left out.
    pub fn from_config(config: &Config, http: Client) -> Self {
        let mut sources: Vec<Arc<dyn StandingsSource>> = Vec::new();

        if let Some(spreadsheet_id) = config.spreadsheet_id.as_deref() {
            let range = config.sheet_range();
            for (i, key) in config.api_keys.iter().enumerate() {
                sources.push(Arc::new(SheetsApiSource::new(
                    http.clone(),
                    &config.sheets_api_url,
                    spreadsheet_id,
                    &range,
                    key,
                    i + 1,
                )));
            }
        }

        if let Some(url) = config.published_csv_url.as_deref() {
            sources.push(Arc::new(PublishedCsvSource::new(http, url)));
        }

        Self::new(sources)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.label()).collect()
    }

    /// Try each source in order, one at a time, returning the first success.
    ///
    /// A rate-limited source is skipped without counting as a failure. When
    /// everything fails, the error carries the last real failure, or the last
    /// rate limit if nothing else went wrong.
    pub async fn fetch_first(&self) -> Result<ChainSuccess, RefreshError> {
        let mut last_failure: Option<SourceError> = None;
        let mut last_rate_limit: Option<SourceError> = None;

        for (i, source) in self.sources.iter().enumerate() {
            let label = source.label();
            let remaining = self.len() - i - 1;

            match source.fetch_rows().await {
                Ok(rows) => {
                    if i > 0 {
                        tracing::info!(source = %label, position = i + 1, "Fetched standings from fallback source");
                    }
                    return Ok(ChainSuccess {
                        rows,
                        source: label,
                        position: i + 1,
                    });
                }
                Err(e) if e.is_rate_limited() => {
                    tracing::warn!(source = %label, remaining, "Standings source rate limited");
                    last_rate_limit = Some(e);
                }
                Err(e) => {
                    tracing::warn!(source = %label, remaining, error = %e, "Standings source failed");
                    last_failure = Some(e);
                }
            }
        }

        match last_failure.or(last_rate_limit) {
            Some(last) => Err(RefreshError::Exhausted {
                attempts: self.len(),
                last,
            }),
            None => Err(RefreshError::NoSources),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{as_sources, ScriptedSource, SPOOKY_SHEET};

    #[tokio::test]
    async fn first_source_wins() {
        let primary = ScriptedSource::serving("key-1", SPOOKY_SHEET);
        let fallback = ScriptedSource::serving("csv", SPOOKY_SHEET);
        let chain = SourceChain::new(as_sources(&[primary.clone(), fallback.clone()]));

        let success = chain.fetch_first().await.unwrap();

        assert_eq!(success.source, "key-1");
        assert_eq!(success.position, 1);
        assert_eq!(success.rows.len(), 4);
        assert_eq!(primary.calls(), 1);
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn rate_limit_rotates_to_next_key() {
        let key1 = ScriptedSource::rate_limited("key-1");
        let key2 = ScriptedSource::serving("key-2", SPOOKY_SHEET);
        let csv = ScriptedSource::serving("csv", SPOOKY_SHEET);
        let chain = SourceChain::new(as_sources(&[key1.clone(), key2.clone(), csv.clone()]));

        let success = chain.fetch_first().await.unwrap();

        assert_eq!(success.source, "key-2");
        assert_eq!(success.position, 2);
        assert_eq!(key1.calls(), 1);
        assert_eq!(csv.calls(), 0);
    }

    #[tokio::test]
    async fn other_errors_also_move_on() {
        let key1 = ScriptedSource::failing("key-1", 403);
        let key2 = ScriptedSource::failing("key-2", 500);
        let csv = ScriptedSource::serving("csv", SPOOKY_SHEET);
        let chain = SourceChain::new(as_sources(&[key1, key2, csv.clone()]));

        let success = chain.fetch_first().await.unwrap();

        assert_eq!(success.source, "csv");
        assert_eq!(success.position, 3);
        assert_eq!(csv.calls(), 1);
    }

    #[tokio::test]
    async fn all_rate_limited_falls_back_to_csv_once() {
        let keys: Vec<_> = (1..=3)
            .map(|i| ScriptedSource::rate_limited(&format!("key-{}", i)))
            .collect();
        let csv = ScriptedSource::serving("csv", SPOOKY_SHEET);
        let mut all = keys.clone();
        all.push(csv.clone());
        let chain = SourceChain::new(as_sources(&all));

        let success = chain.fetch_first().await.unwrap();

        assert_eq!(success.source, "csv");
        assert_eq!(csv.calls(), 1);
        assert!(keys.iter().all(|k| k.calls() == 1));
    }

    #[tokio::test]
    async fn exhausted_keeps_last_real_failure() {
        let key1 = ScriptedSource::failing("key-1", 403);
        let key2 = ScriptedSource::rate_limited("key-2");
        let chain = SourceChain::new(as_sources(&[key1, key2]));

        let err = chain.fetch_first().await.unwrap_err();

        match err {
            RefreshError::Exhausted { attempts, last } => {
                assert_eq!(attempts, 2);
                assert!(matches!(last, SourceError::Api { status: 403, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn exhausted_by_rate_limits_only() {
        let chain = SourceChain::new(as_sources(&[ScriptedSource::rate_limited("key-1")]));

        let err = chain.fetch_first().await.unwrap_err();

        match err {
            RefreshError::Exhausted { last, .. } => assert!(last.is_rate_limited()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn empty_chain_has_no_sources() {
        let chain = SourceChain::new(Vec::new());

        assert!(chain.is_empty());
        assert!(matches!(
            chain.fetch_first().await,
            Err(RefreshError::NoSources)
        ));
    }

    fn config(pairs: &[(&str, &str)]) -> Config {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
    }

    #[test]
    fn from_config_orders_keys_then_csv() {
        let chain = SourceChain::from_config(
            &config(&[
                ("SPREADSHEET_ID", "doc"),
                ("GOOGLE_API_KEYS", "AAAAAAAAAAAA,BBBBBBBBBBBB"),
                ("PUBLISHED_CSV_URL", "https://example.com/pub?output=csv"),
            ]),
            Client::new(),
        );

        assert_eq!(
            chain.labels(),
            vec![
                "sheets-api#1 (AAAAAAAA...)",
                "sheets-api#2 (BBBBBBBB...)",
                "published-csv",
            ]
        );
    }

    #[test]
    fn from_config_skips_keys_without_spreadsheet_id() {
        let chain = SourceChain::from_config(
            &config(&[
                ("GOOGLE_API_KEYS", "AAAAAAAAAAAA"),
                ("PUBLISHED_CSV_URL", "https://example.com/pub?output=csv"),
            ]),
            Client::new(),
        );

        assert_eq!(chain.labels(), vec!["published-csv"]);
    }

    #[test]
    fn from_config_nothing_configured() {
        let chain = SourceChain::from_config(&config(&[]), Client::new());

        assert_eq!(chain.len(), 0);
    }
}
