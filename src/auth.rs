use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::AppError};

/// Claims carried by the provider's session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Provider user id
    pub exp: i64,
}

/// The caller's authenticated identity, resolved per request. Handlers take
/// this as a parameter; there is no ambient session state.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

pub fn verify_session_token(token: &str, secret: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // The route guard may have resolved the caller already.
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let token = bearer_token(parts).ok_or(AppError::AuthError)?;
        let claims = verify_session_token(token, &state.config.session_secret)
            .ok_or(AppError::AuthError)?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

/// Route guard for path patterns that require an authenticated session.
/// Rejects before the handler runs and stashes the resolved identity in the
/// request extensions for the extractor to reuse.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = request.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &state).await?;

    let mut request = Request::from_parts(parts, body);
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
