use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

// RFC 3339 (de)serialization for optional timestamps
pub mod rfc3339_option {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;
    use time::format_description::well_known::Rfc3339;

    pub fn serialize<S>(date: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(dt) => {
                let s = dt.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
                serializer.serialize_some(&s)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s {
            Some(s) => OffsetDateTime::parse(&s, &Rfc3339)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub image_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// One row of the `leaderboard_stats` view. All aggregates are computed by
/// the store; this side only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LeaderboardStats {
    pub user_id: String,
    pub email: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub image_url: Option<String>,
    pub problems_solved: i64,
    pub problems_attempted: i64,
    pub easy_solved: i64,
    pub medium_solved: i64,
    pub hard_solved: i64,
    pub total_submissions: i64,
    pub accepted_submissions: i64,
    pub acceptance_rate: f64,
    #[serde(with = "rfc3339_option")]
    pub first_solve_at: Option<OffsetDateTime>,
    #[serde(with = "rfc3339_option")]
    pub last_submission_at: Option<OffsetDateTime>,
    pub total_score: i64,
}

/// A stats row with its position-derived rank attached. Rank is never
/// stored; it is `offset + index + 1` over the page that was returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedLeaderboardEntry {
    pub rank: i64,
    #[serde(flatten)]
    pub stats: LeaderboardStats,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<RankedLeaderboardEntry>,
    /// Row count of the returned page, not the table total.
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SyncResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub user: User,
    pub stats: Option<LeaderboardStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Submission {
    pub id: String,
    pub user_id: String,
    pub problem_id: String,
    pub language: String,
    pub status: String,
    pub runtime_ms: Option<i32>,
    pub memory_kb: Option<i32>,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

/// Profile payload returned by the identity provider's user API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityUser {
    pub id: String,
    #[serde(default)]
    pub email_addresses: Vec<IdentityEmail>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityEmail {
    pub email_address: String,
}

/// Field values written by the sync upsert. Always fully populated: the
/// upsert overwrites the listed columns, it never merges.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncedUser {
    pub id: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub image_url: String,
    pub updated_at: OffsetDateTime,
}

impl SyncedUser {
    pub fn from_identity(
        user_id: &str,
        identity: &IdentityUser,
        updated_at: OffsetDateTime,
    ) -> Self {
        let email = identity
            .email_addresses
            .first()
            .map(|e| e.email_address.clone())
            .unwrap_or_default();

        let username = identity
            .username
            .clone()
            .or_else(|| identity.first_name.clone())
            .unwrap_or_else(|| "Anonymous".to_string());

        let full_name = format!(
            "{} {}",
            identity.first_name.as_deref().unwrap_or(""),
            identity.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string();
        let full_name = if full_name.is_empty() {
            "Anonymous User".to_string()
        } else {
            full_name
        };

        Self {
            id: user_id.to_string(),
            email,
            username,
            full_name,
            image_url: identity.image_url.clone().unwrap_or_default(),
            updated_at,
        }
    }
}
