//! Leaderboard handlers
//!
//! Read endpoints for the published standings, plus the shared page cursor
//! used by big-screen displays.
//! Supports content negotiation: Accept: application/json for JSON, otherwise text/plain.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::app::PagePosition;
use crate::error::AppError;
use crate::feed::render_leaderboard;
use crate::AppState;

/// Standings change every refresh cycle; clients must not cache them
const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// Page query params (1-based, as shown to viewers)
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
}

/// Check if the client wants JSON response
fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

/// Convert a 1-based page number from the outside into a page index
fn page_index(page: usize) -> Result<usize, AppError> {
    page.checked_sub(1)
        .ok_or_else(|| AppError::BadRequest("page numbers start at 1".to_string()))
}

/// GET /leaderboard
///
/// Podium, one page of the remaining teams, and the error note if the last
/// refresh failed. `?page=N` picks a page without moving the shared cursor.
/// - Accept: application/json → JSON snapshot
/// - Otherwise → Plain text (markdown)
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let index = params.page.map(page_index).transpose()?;
    let snapshot = state.feed.snapshot(index).await;

    if wants_json(&headers) {
        Ok(([(header::CACHE_CONTROL, NO_CACHE)], Json(snapshot)).into_response())
    } else {
        Ok((
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::CACHE_CONTROL, NO_CACHE),
            ],
            render_leaderboard(&snapshot),
        )
            .into_response())
    }
}

/// GET /leaderboard/standings
///
/// All teams, sorted by XP, as a JSON array. Answers 503 only when no refresh
/// has ever succeeded and the latest one failed; stale data is served as-is.
pub async fn get_standings(State(state): State<AppState>) -> Result<Response, AppError> {
    let snapshot = state.feed.snapshot(None).await;

    if snapshot.loading {
        if let Some(error) = snapshot.error {
            return Err(AppError::Unavailable(error));
        }
    }

    Ok(([(header::CACHE_CONTROL, NO_CACHE)], Json(snapshot.standings.as_slice())).into_response())
}

/// POST /leaderboard/page/next
pub async fn next_page(State(state): State<AppState>) -> Json<PagePosition> {
    Json(one_based(state.feed.next_page().await))
}

/// POST /leaderboard/page/prev
pub async fn prev_page(State(state): State<AppState>) -> Json<PagePosition> {
    Json(one_based(state.feed.prev_page().await))
}

/// POST /leaderboard/page/:page
///
/// Jump the shared cursor to a page (1-based); out-of-range pages clamp to the last one.
pub async fn goto_page(
    State(state): State<AppState>,
    Path(page): Path<usize>,
) -> Result<Json<PagePosition>, AppError> {
    let index = page_index(page)?;
    Ok(Json(one_based(state.feed.goto_page(index).await)))
}

fn one_based(position: PagePosition) -> PagePosition {
    PagePosition {
        page: position.page + 1,
        page_count: position.page_count,
    }
}
