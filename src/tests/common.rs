use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{self, Request},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use sqlx::PgPool;
use time::OffsetDateTime;

use crate::{
    AppState, app,
    auth::Claims,
    config::Config,
    identity::IdentityProvider,
    models::{IdentityEmail, IdentityUser, LeaderboardStats},
};

pub const TEST_SECRET: &str = "test_secret";

/// Identity provider stub: returns the canned profile for a known id,
/// nothing for everyone else.
pub struct StubIdentity {
    pub users: Vec<IdentityUser>,
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn fetch_user(&self, user_id: &str) -> anyhow::Result<Option<IdentityUser>> {
        Ok(self.users.iter().find(|u| u.id == user_id).cloned())
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        port: 8001,
        session_secret: TEST_SECRET.to_string(),
        identity_api_url: "http://identity.invalid".to_string(),
        identity_api_key: "test_key".to_string(),
    }
}

pub fn test_app(pool: PgPool, identities: Vec<IdentityUser>) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
        identity: Arc::new(StubIdentity { users: identities }),
    };
    app(state)
}

pub fn session_token(user_id: &str) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: OffsetDateTime::now_utc().unix_timestamp() + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn identity_user(id: &str) -> IdentityUser {
    IdentityUser {
        id: id.to_string(),
        email_addresses: vec![IdentityEmail {
            email_address: format!("{id}@example.com"),
        }],
        username: Some("octocat".to_string()),
        first_name: Some("Octo".to_string()),
        last_name: Some("Cat".to_string()),
        image_url: Some("https://img.example.com/octo.png".to_string()),
    }
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

pub fn get_auth(path: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn post(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(http::Method::POST).uri(path);
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn seed_user(pool: &PgPool, id: &str, username: &str) {
    sqlx::query(
        "INSERT INTO users (id, email, username, full_name, image_url) VALUES ($1, $2, $3, $4, '')",
    )
    .bind(id)
    .bind(format!("{username}@example.com"))
    .bind(username)
    .bind(username)
    .execute(pool)
    .await
    .unwrap();
}

/// Inserts `count` accepted single-submission solves of fresh Easy
/// problems, so the user's total_score equals `count`.
pub async fn seed_solves(pool: &PgPool, user_id: &str, count: i64) {
    for n in 0..count {
        let problem_id = format!("{user_id}-p{n}");
        sqlx::query("INSERT INTO problems (id, title, difficulty) VALUES ($1, $1, 'Easy')")
            .bind(&problem_id)
            .execute(pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO submissions (id, user_id, problem_id, language, status) \
             VALUES ($1, $2, $3, 'rust', 'Accepted')",
        )
        .bind(format!("{problem_id}-s"))
        .bind(user_id)
        .bind(&problem_id)
        .execute(pool)
        .await
        .unwrap();
    }
}

pub fn sample_stats(
    user_id: &str,
    problems_solved: i64,
    total_submissions: i64,
    acceptance_rate: f64,
) -> LeaderboardStats {
    LeaderboardStats {
        user_id: user_id.to_string(),
        email: format!("{user_id}@example.com"),
        username: Some(user_id.to_string()),
        full_name: None,
        image_url: None,
        problems_solved,
        problems_attempted: problems_solved,
        easy_solved: problems_solved,
        medium_solved: 0,
        hard_solved: 0,
        total_submissions,
        accepted_submissions: problems_solved,
        acceptance_rate,
        first_solve_at: None,
        last_submission_at: None,
        total_score: problems_solved,
    }
}
