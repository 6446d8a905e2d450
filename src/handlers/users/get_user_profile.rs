use axum::{Json, extract::State};

use crate::{AppState, auth::AuthUser, error::AppError, models::*};

/// The caller's synced user row plus their leaderboard stats, when the
/// view has a row for them.
pub async fn get_user_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserProfileResponse>, AppError> {
    let user: User = sqlx::query_as(
        "SELECT id, email, username, full_name, image_url, created_at, updated_at \
         FROM users WHERE id = $1",
    )
    .bind(&auth.user_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let stats: Option<LeaderboardStats> = sqlx::query_as(
        r#"
        SELECT user_id, email, username, full_name, image_url,
               problems_solved, problems_attempted,
               easy_solved, medium_solved, hard_solved,
               total_submissions, accepted_submissions, acceptance_rate,
               first_solve_at, last_submission_at, total_score
        FROM leaderboard_stats
        WHERE user_id = $1
        "#,
    )
    .bind(&auth.user_id)
    .fetch_optional(&state.pool)
    .await?;

    Ok(Json(UserProfileResponse { user, stats }))
}
