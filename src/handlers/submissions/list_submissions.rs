use axum::{Json, extract::State};

use crate::{AppState, auth::AuthUser, error::AppError, models::*};

/// The caller's recent submissions, newest first.
pub async fn list_submissions(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Submission>>, AppError> {
    let submissions: Vec<Submission> = sqlx::query_as(
        r#"
        SELECT id, user_id, problem_id, language, status,
               runtime_ms, memory_kb, submitted_at
        FROM submissions
        WHERE user_id = $1
        ORDER BY submitted_at DESC
        LIMIT 50
        "#,
    )
    .bind(&auth.user_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(submissions))
}
