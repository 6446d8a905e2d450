use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{AppState, error::AppError, models::*};

/// Pagination arrives as raw query-string text: a malformed value falls
/// back to its default instead of rejecting the request. Range checks are
/// left to the store, which surfaces out-of-range values as a query error.
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

pub(crate) fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(default)
}

pub(crate) fn with_ranks(offset: i64, rows: Vec<LeaderboardStats>) -> Vec<RankedLeaderboardEntry> {
    rows.into_iter()
        .enumerate()
        .map(|(index, stats)| RankedLeaderboardEntry {
            rank: offset + index as i64 + 1,
            stats,
        })
        .collect()
}

pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let limit = parse_or(query.limit.as_deref(), 100);
    let offset = parse_or(query.offset.as_deref(), 0);

    // The view carries no order of its own; the ranking order is asserted
    // here so page-relative ranks stay stable across pages. user_id breaks
    // score ties deterministically.
    let rows: Vec<LeaderboardStats> = sqlx::query_as(
        r#"
        SELECT user_id, email, username, full_name, image_url,
               problems_solved, problems_attempted,
               easy_solved, medium_solved, hard_solved,
               total_submissions, accepted_submissions, acceptance_rate,
               first_solve_at, last_submission_at, total_score
        FROM leaderboard_stats
        ORDER BY total_score DESC, problems_solved DESC, user_id
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let leaderboard = with_ranks(offset, rows);
    let total = leaderboard.len();

    Ok(Json(LeaderboardResponse { leaderboard, total }))
}
