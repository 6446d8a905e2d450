//! Terminal client for the leaderboard page: syncs the caller's identity
//! once, then fetches and re-renders the ranked table on a fixed refresh
//! interval until cancelled.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::models::{LeaderboardResponse, RankedLeaderboardEntry};

pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct LeaderboardClient {
    http: reqwest::Client,
    base_url: String,
    session_token: Option<String>,
}

impl LeaderboardClient {
    pub fn new(base_url: String, session_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session_token,
        }
    }

    pub async fn fetch_page(&self) -> Result<LeaderboardResponse> {
        let response = self
            .http
            .get(format!("{}/api/leaderboard", self.base_url))
            .send()
            .await
            .context("Leaderboard request failed")?
            .error_for_status()
            .context("Leaderboard request rejected")?;

        response
            .json()
            .await
            .context("Invalid leaderboard response")
    }

    /// Fire-and-forget identity sync. A failure here is logged and never
    /// blocks the leaderboard itself.
    pub async fn sync_user(&self) {
        let Some(token) = &self.session_token else {
            return;
        };

        let result = self
            .http
            .post(format!("{}/api/users/sync", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        if let Err(e) = result {
            error!("Failed to sync user: {e}");
        }
    }
}

/// Aggregates over the fetched page only, not the whole table.
#[derive(Debug, Default, PartialEq)]
pub struct PageStats {
    pub participants: usize,
    pub total_solves: i64,
    pub total_submissions: i64,
    pub average_acceptance: i64,
}

impl PageStats {
    pub fn from_page(entries: &[RankedLeaderboardEntry]) -> Self {
        let participants = entries.len();
        let total_solves = entries.iter().map(|e| e.stats.problems_solved).sum();
        let total_submissions = entries.iter().map(|e| e.stats.total_submissions).sum();
        let average_acceptance = if participants == 0 {
            0
        } else {
            let sum: f64 = entries.iter().map(|e| e.stats.acceptance_rate).sum();
            (sum / participants as f64).round() as i64
        };

        PageStats {
            participants,
            total_solves,
            total_submissions,
            average_acceptance,
        }
    }
}

/// Poll loop: immediate first fetch, then one fetch per interval tick.
/// Fetches run inline with the ticker so they can never overlap, and a
/// fetch that overruns its tick skips the missed ticks instead of
/// triggering a catch-up burst. Teardown is the cancellation token.
pub async fn run(client: LeaderboardClient, cancellation_token: CancellationToken) {
    // Sync runs on its own; a slow or failing sync never delays the
    // first fetch.
    let sync_client = client.clone();
    tokio::spawn(async move { sync_client.sync_user().await });

    let mut ticker = interval(REFRESH_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut page: Option<LeaderboardResponse> = None;
    println!("Loading leaderboard...");

    loop {
        tokio::select! {
            _ = cancellation_token.cancelled() => {
                info!("Leaderboard watch shutting down");
                break;
            }
            _ = ticker.tick() => {
                match client.fetch_page().await {
                    Ok(fresh) => {
                        render(&fresh);
                        page = Some(fresh);
                    }
                    Err(e) => {
                        error!("Failed to fetch leaderboard: {e:#}");
                        if page.is_none() {
                            println!("Error: could not load the leaderboard. Retrying on the next refresh.");
                        }
                    }
                }
            }
        }
    }
}

fn render(page: &LeaderboardResponse) {
    let totals = PageStats::from_page(&page.leaderboard);

    println!();
    println!(
        "Participants: {}   Solves: {}   Submissions: {}   Avg acceptance: {}%",
        totals.participants, totals.total_solves, totals.total_submissions, totals.average_acceptance
    );
    println!(
        "{:<6} {:<24} {:>6} {:>9} {:>5} {:>7} {:>5} {:>11}",
        "Rank", "User", "Score", "Solved", "Easy", "Medium", "Hard", "Acceptance"
    );

    if page.leaderboard.is_empty() {
        println!("No participants yet. Be the first to solve a problem!");
        return;
    }

    for entry in &page.leaderboard {
        let s = &entry.stats;
        let name = s
            .username
            .as_deref()
            .or(s.full_name.as_deref())
            .unwrap_or("Anonymous");

        println!(
            "{:<6} {:<24} {:>6} {:>9} {:>5} {:>7} {:>5} {:>10.1}%",
            entry.rank,
            name,
            s.total_score,
            format!("{}/{}", s.problems_solved, s.problems_attempted),
            s.easy_solved,
            s.medium_solved,
            s.hard_solved,
            s.acceptance_rate,
        );
    }
}
