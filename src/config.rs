use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub session_secret: String,
    pub identity_api_url: String,
    pub identity_api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;
        let session_secret =
            env::var("SESSION_JWT_SECRET").context("SESSION_JWT_SECRET must be set")?;
        let identity_api_url =
            env::var("IDENTITY_API_URL").context("IDENTITY_API_URL must be set")?;
        let identity_api_key =
            env::var("IDENTITY_API_KEY").context("IDENTITY_API_KEY must be set")?;

        Ok(Config {
            database_url,
            port,
            session_secret,
            identity_api_url,
            identity_api_key,
        })
    }
}
