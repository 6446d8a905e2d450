use axum::{Json, extract::State};
use time::OffsetDateTime;

use crate::{AppState, auth::AuthUser, error::AppError, models::*};

/// Mirror the caller's identity into the users table. Runs on every
/// authenticated leaderboard visit, so the write is an idempotent upsert
/// keyed on the provider's user id.
pub async fn sync_user(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<SyncResponse>, AppError> {
    let identity = state
        .identity
        .fetch_user(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let record = SyncedUser::from_identity(&auth.user_id, &identity, OffsetDateTime::now_utc());

    sqlx::query(
        r#"
        INSERT INTO users (id, email, username, full_name, image_url, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, NOW(), $6)
        ON CONFLICT (id) DO UPDATE
        SET email = EXCLUDED.email,
            username = EXCLUDED.username,
            full_name = EXCLUDED.full_name,
            image_url = EXCLUDED.image_url,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(&record.id)
    .bind(&record.email)
    .bind(&record.username)
    .bind(&record.full_name)
    .bind(&record.image_url)
    .bind(record.updated_at)
    .execute(&state.pool)
    .await?;

    Ok(Json(SyncResponse { success: true }))
}
