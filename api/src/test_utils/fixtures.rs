//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use axum::Router;

use crate::adapters::csv::parser::parse_csv;
use crate::domain::entities::{RawRow, TeamStanding};

/// Create a standing
pub fn standing(id: &str, name: &str, score: u64) -> TeamStanding {
    TeamStanding::new(id, name, score)
}

/// Rows as a source would return them, from CSV text (first line is the header)
pub fn csv_rows(text: &str) -> Vec<RawRow> {
    parse_csv(text)
}

/// The three-team sheet used throughout the feed tests
pub const SPOOKY_SHEET: &str = "Team ID,Team Name,Total XP\nA1,Alpha,50\nA2,Beta,80\nA3,Gamma,80";

/// A sheet with `n` teams scored 100, 99, 98, ...
pub fn sheet_with_teams(n: usize) -> String {
    let mut csv = String::from("Team ID,Team Name,Total XP\n");
    for i in 0..n {
        csv.push_str(&format!("T{},Team {},{}\n", i + 1, i + 1, 100 - i));
    }
    csv
}

/// Serve `router` on a loopback port and return its base URL (`http://127.0.0.1:port`)
pub async fn spawn_stub_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let addr = listener.local_addr().expect("stub server address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });

    format!("http://{}", addr)
}
