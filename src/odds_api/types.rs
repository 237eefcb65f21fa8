use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A finished match as reported by the historical-data provider.
///
/// The score arrives as the provider's display string (e.g. `"2-1"`), which
/// is occasionally blank or garbage for abandoned fixtures. Parsing is
/// therefore fallible and callers skip what they cannot read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub home_team: String,
    pub away_team: String,
    pub score: String,
}

impl MatchResult {
    /// Parse the provider score string into (home goals, away goals).
    /// Accepts `"2-1"` and `"2:1"` with optional whitespace.
    pub fn parsed_score(&self) -> Option<(u32, u32)> {
        let mut parts = self.score.splitn(2, ['-', ':']);
        let home = parts.next()?.trim().parse().ok()?;
        let away = parts.next()?.trim().parse().ok()?;
        Some((home, away))
    }
}

/// Everything the model needs about one upcoming fixture's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalDataBundle {
    pub home_team: String,
    pub away_team: String,
    /// Prior meetings between the two teams, most recent first.
    pub h2h: Vec<MatchResult>,
    /// The home team's most recent results, most recent first.
    pub home_recent: Vec<MatchResult>,
    /// The away team's most recent results, most recent first.
    pub away_recent: Vec<MatchResult>,
}

/// One bookmaker's quoted decimal prices, keyed market → outcome → price.
/// May be partial: missing markets or outcomes are normal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmakerOdds {
    pub bookmaker: String,
    pub markets: BTreeMap<String, BTreeMap<String, f64>>,
}

/// An upcoming fixture as resolved from the odds provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub id: String,
    pub league: String,
    pub home_team: String,
    pub away_team: String,
    pub kickoff: Option<DateTime<Utc>>,
}
