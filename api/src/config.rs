use std::env;
use std::time::Duration;

const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4";
const DEFAULT_SHEET_NAME: &str = "Sheet1";
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 10;
const DEFAULT_PAGE_SIZE: usize = 7;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PORT: u16 = 8080;

#[derive(Clone, Debug)]
pub struct Config {
    /// Spreadsheet document id; the Sheets API stage is skipped without it
    pub spreadsheet_id: Option<String>,
    /// Tab name, read as `{sheet_name}!A:C`
    pub sheet_name: String,
    /// API keys in priority order
    pub api_keys: Vec<String>,
    pub sheets_api_url: String,
    /// Published CSV export; the fallback stage is skipped without it
    pub published_csv_url: Option<String>,
    pub refresh_interval: Duration,
    pub page_size: usize,
    pub http_timeout: Duration,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup (the environment in production, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_keys = non_empty("GOOGLE_API_KEYS")
            .or_else(|| non_empty("GOOGLE_API_KEY"))
            .map(|raw| split_keys(&raw))
            .unwrap_or_default();

        Self {
            spreadsheet_id: non_empty("SPREADSHEET_ID"),
            sheet_name: non_empty("SHEET_NAME").unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
            api_keys,
            sheets_api_url: non_empty("SHEETS_API_URL")
                .unwrap_or_else(|| DEFAULT_SHEETS_API_URL.to_string()),
            published_csv_url: non_empty("PUBLISHED_CSV_URL"),
            refresh_interval: Duration::from_secs(
                parse_or(non_empty("REFRESH_INTERVAL_SECS"), DEFAULT_REFRESH_INTERVAL_SECS).max(1),
            ),
            page_size: parse_or(non_empty("PAGE_SIZE"), DEFAULT_PAGE_SIZE).max(1),
            http_timeout: Duration::from_secs(
                parse_or(non_empty("HTTP_TIMEOUT_SECS"), DEFAULT_HTTP_TIMEOUT_SECS).max(1),
            ),
            port: parse_or(non_empty("PORT"), DEFAULT_PORT),
        }
    }

    /// Range covering the three leaderboard columns (id, name, score)
    pub fn sheet_range(&self) -> String {
        format!("{}!A:C", self.sheet_name)
    }

    /// Check if the authenticated Sheets API stage can run
    pub fn sheets_api_enabled(&self) -> bool {
        self.spreadsheet_id.is_some() && !self.api_keys.is_empty()
    }

    /// Check if the published CSV fallback can run
    pub fn csv_fallback_enabled(&self) -> bool {
        self.published_csv_url.is_some()
    }
}

fn split_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}
