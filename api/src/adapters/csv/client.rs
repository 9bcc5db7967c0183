//! Published CSV export source
//!
//! Unauthenticated fallback: the sheet's "publish to web" CSV link.

use async_trait::async_trait;
use reqwest::Client;

use super::parser::parse_csv;
use crate::domain::entities::RawRow;
use crate::domain::ports::StandingsSource;
use crate::error::SourceError;

pub struct PublishedCsvSource {
    http: Client,
    url: String,
}

impl PublishedCsvSource {
    pub fn new(http: Client, url: &str) -> Self {
        Self {
            http,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl StandingsSource for PublishedCsvSource {
    fn label(&self) -> String {
        "published-csv".to_string()
    }

    async fn fetch_rows(&self) -> Result<Vec<RawRow>, SourceError> {
        let resp = self.http.get(&self.url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        Ok(parse_csv(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::spawn_stub_server;
    use axum::{http::StatusCode, routing::get, Router};

    fn stub_router() -> Router {
        Router::new()
            .route(
                "/pub",
                get(|| async { "Team ID,Team Name,Total XP\nA1,Alpha,50\nA2,\"Beta, the\",80\n" }),
            )
            .route(
                "/gone",
                get(|| async { (StatusCode::NOT_FOUND, "Sheet not published") }),
            )
    }

    #[tokio::test]
    async fn fetch_rows_parses_body() {
        let base = spawn_stub_server(stub_router()).await;
        let source = PublishedCsvSource::new(Client::new(), &format!("{}/pub", base));

        let rows = source.fetch_rows().await.unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], vec!["A2", "Beta, the", "80"]);
    }

    #[tokio::test]
    async fn fetch_rows_non_success_is_api_error() {
        let base = spawn_stub_server(stub_router()).await;
        let source = PublishedCsvSource::new(Client::new(), &format!("{}/gone", base));

        let err = source.fetch_rows().await.unwrap_err();

        match err {
            SourceError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Sheet not published");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn fetch_rows_connection_refused_is_request_error() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = PublishedCsvSource::new(Client::new(), &format!("http://{}/pub", addr));

        let err = source.fetch_rows().await.unwrap_err();

        assert!(matches!(err, SourceError::Request(_)));
    }
}
