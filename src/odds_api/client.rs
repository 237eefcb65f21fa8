use chrono::DateTime;
use futures_util::future::join_all;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

use super::cache::ResponseCache;
use super::types::{BookmakerOdds, Fixture, HistoricalDataBundle, MatchResult};

/// Expected failure classes when talking to the odds provider.
/// Anything else (bugs, bad config) surfaces through `reqwest::Error`.
#[derive(Debug, Error)]
pub enum OddsApiError {
    #[error("odds API request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("odds API returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("fixture '{0}' not found")]
    FixtureNotFound(String),
    #[error("malformed odds API response: {0}")]
    Malformed(String),
}

/// Client for the odds / historical-data provider.
///
/// All reads go through the [`ResponseCache`] first; pre-match data is slow
/// moving, so a cache hit within the TTL is as good as a fresh fetch.
#[derive(Clone)]
pub struct OddsApiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    cache: ResponseCache,
}

impl OddsApiClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        cache: ResponseCache,
    ) -> Result<Self, OddsApiError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(OddsApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            cache,
        })
    }

    /// Cached GET returning the raw JSON body.
    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, OddsApiError> {
        let cache_key = format!(
            "{}?{}",
            path,
            query
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("&")
        );
        if let Some(cached) = self.cache.get(&cache_key).await {
            debug!("Cache hit for {}", cache_key);
            return Ok(cached);
        }

        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.get(&url).query(query);
        if let Some(key) = self.api_key.as_deref() {
            request = request.query(&[("apiKey", key)]);
        }

        debug!("Fetching {}", cache_key);
        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OddsApiError::Status { status, body });
        }

        let value: serde_json::Value = resp.json().await?;
        self.cache.insert(cache_key, value.clone()).await;
        Ok(value)
    }

    /// Resolve an upcoming fixture by provider ID.
    pub async fn fetch_fixture(&self, fixture_id: &str) -> Result<Fixture, OddsApiError> {
        let raw = match self
            .get_json(&format!("/fixtures/{}", fixture_id), &[])
            .await
        {
            Err(OddsApiError::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
                return Err(OddsApiError::FixtureNotFound(fixture_id.to_string()));
            }
            other => other?,
        };
        parse_fixture(&raw)
            .ok_or_else(|| OddsApiError::Malformed(format!("fixture payload for '{}'", fixture_id)))
    }

    /// Fetch head-to-head history plus both teams' recent results.
    pub async fn fetch_history(
        &self,
        fixture: &Fixture,
        window: usize,
    ) -> Result<HistoricalDataBundle, OddsApiError> {
        let limit = window.to_string();
        let h2h_raw = self
            .get_json(
                "/history/h2h",
                &[
                    ("home", fixture.home_team.as_str()),
                    ("away", fixture.away_team.as_str()),
                ],
            )
            .await?;

        let recent = join_all([&fixture.home_team, &fixture.away_team].map(|team| {
            let limit = limit.clone();
            async move {
                self.get_json(
                    "/history/results",
                    &[("team", team.as_str()), ("limit", limit.as_str())],
                )
                .await
            }
        }))
        .await;
        let mut recent = recent.into_iter();
        // join_all preserves order: home first, then away.
        let home_raw = recent.next().expect("join_all yields both results")?;
        let away_raw = recent.next().expect("join_all yields both results")?;

        Ok(HistoricalDataBundle {
            home_team: fixture.home_team.clone(),
            away_team: fixture.away_team.clone(),
            h2h: parse_results(&h2h_raw),
            home_recent: parse_results(&home_raw),
            away_recent: parse_results(&away_raw),
        })
    }

    /// Fetch every bookmaker's quoted prices for a fixture.
    pub async fn fetch_odds(&self, fixture_id: &str) -> Result<Vec<BookmakerOdds>, OddsApiError> {
        let raw = self
            .get_json("/odds", &[("fixture", fixture_id)])
            .await?;
        Ok(parse_odds(&raw))
    }
}

// ── Parsing helpers ──────────────────────────────────────────────────────────
//
// Provider payloads are navigated tolerantly: individual malformed entries
// are skipped with a warning rather than failing the whole response.

fn parse_fixture(raw: &serde_json::Value) -> Option<Fixture> {
    let fixture = &raw["fixture"];
    Some(Fixture {
        id: fixture["id"].as_str()?.to_string(),
        league: fixture["league"].as_str()?.to_string(),
        home_team: fixture["home"].as_str()?.to_string(),
        away_team: fixture["away"].as_str()?.to_string(),
        kickoff: fixture["kickoff"]
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.to_utc()),
    })
}

fn parse_results(raw: &serde_json::Value) -> Vec<MatchResult> {
    let Some(entries) = raw["results"].as_array() else {
        return vec![];
    };
    entries
        .iter()
        .filter_map(|entry| {
            let result = MatchResult {
                home_team: entry["home"].as_str()?.to_string(),
                away_team: entry["away"].as_str()?.to_string(),
                score: entry["score"].as_str().unwrap_or_default().to_string(),
            };
            Some(result)
        })
        .collect()
}

fn parse_odds(raw: &serde_json::Value) -> Vec<BookmakerOdds> {
    let Some(entries) = raw["bookmakers"].as_array() else {
        return vec![];
    };
    entries
        .iter()
        .filter_map(|entry| {
            let name = entry["name"].as_str()?;
            let Some(markets_obj) = entry["markets"].as_object() else {
                warn!("Bookmaker '{}' entry has no markets object, skipping", name);
                return None;
            };
            let markets = markets_obj
                .iter()
                .filter_map(|(market_key, outcomes)| {
                    let outcomes = outcomes
                        .as_object()?
                        .iter()
                        .filter_map(|(outcome, price)| Some((outcome.clone(), price.as_f64()?)))
                        .collect();
                    Some((market_key.clone(), outcomes))
                })
                .collect();
            Some(BookmakerOdds {
                bookmaker: name.to_string(),
                markets,
            })
        })
        .collect()
}
