//! Google Sheets values API source

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use urlencoding::encode;

use crate::domain::entities::RawRow;
use crate::domain::ports::StandingsSource;
use crate::error::SourceError;

/// Reads the leaderboard range with one API key.
///
/// The feed builds one of these per configured key, in priority order, so a
/// rate-limited key simply hands over to the next source in the chain.
pub struct SheetsApiSource {
    http: Client,
    base_url: String,
    spreadsheet_id: String,
    range: String,
    api_key: String,
    /// 1-based position of the key, for logs
    key_index: usize,
}

impl SheetsApiSource {
    pub fn new(
        http: Client,
        base_url: &str,
        spreadsheet_id: &str,
        range: &str,
        api_key: &str,
        key_index: usize,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            range: range.to_string(),
            api_key: api_key.to_string(),
            key_index,
        }
    }

    fn values_url(&self) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.base_url,
            encode(&self.spreadsheet_id),
            encode(&self.range)
        )
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<Vec<RawRow>, SourceError> {
        let status = response.status();

        if status.is_success() {
            let body: ValueRangeResponse = response
                .json()
                .await
                .map_err(|e| SourceError::Deserialization(e.to_string()))?;
            Ok(body.into_rows())
        } else if status.as_u16() == 429 {
            Err(SourceError::RateLimited {
                label: self.label(),
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            Err(SourceError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Response body of `spreadsheets.values.get`
#[derive(Deserialize)]
struct ValueRangeResponse {
    /// Absent when the range is empty
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

impl ValueRangeResponse {
    fn into_rows(self) -> Vec<RawRow> {
        self.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect()
    }
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Cells come back as strings by default, but numbers and booleans are possible
/// with other render options.
fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// First few characters of a key, safe to log
fn key_preview(key: &str) -> String {
    let preview: String = key.chars().take(8).collect();
    format!("{}...", preview)
}

#[async_trait]
impl StandingsSource for SheetsApiSource {
    fn label(&self) -> String {
        format!("sheets-api#{} ({})", self.key_index, key_preview(&self.api_key))
    }

    async fn fetch_rows(&self) -> Result<Vec<RawRow>, SourceError> {
        let resp = self
            .http
            .get(self.values_url())
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        self.handle_response(resp).await
    }
}
