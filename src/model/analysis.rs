//! Orchestration: run the full model over one fixture's history and quotes
//! and assemble the response contract.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::ModelConfig;
use crate::odds_api::{BookmakerOdds, HistoricalDataBundle};

use super::expected_goals::{self, ExpectedGoals};
use super::form;
use super::h2h;
use super::markets::{self, keys, ScoreGrid};
use super::stats::{self, StatsForecast};
use super::value::{self, EvOpportunity};

/// Spread of quoted prices for one outcome across bookmakers.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub bookmakers: usize,
}

/// Per-market analysis shared by all three markets.
#[derive(Debug, Clone, Serialize)]
pub struct MarketReport {
    pub probabilities: BTreeMap<String, f64>,
    /// Vig-free prices. Outcomes with no meaningful fair price are omitted.
    pub fair_odds: BTreeMap<String, f64>,
    pub odds_range: BTreeMap<String, PriceRange>,
    pub explanation: String,
    pub opportunities: Vec<EvOpportunity>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GoalExpectation {
    pub home: f64,
    pub away: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResultReport {
    #[serde(flatten)]
    pub market: MarketReport,
    pub expected_goals: GoalExpectation,
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalGoalsReport {
    #[serde(flatten)]
    pub market: MarketReport,
    pub expected_total_goals: f64,
}

/// Probability that each side scores at least once.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoringProbabilities {
    pub home: f64,
    pub away: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BttsReport {
    #[serde(flatten)]
    pub market: MarketReport,
    pub scoring_probabilities: ScoringProbabilities,
}

/// The full analysis response. Market fields are `None` when there is no
/// usable history; that is "insufficient data", not an error.
#[derive(Debug, Clone, Serialize)]
pub struct MatchAnalysis {
    pub home_team: String,
    pub away_team: String,
    pub match_result: Option<MatchResultReport>,
    pub total_goals: Option<TotalGoalsReport>,
    pub btts: Option<BttsReport>,
    /// Every retained opportunity across markets, best EV first.
    pub all_opportunities: Vec<EvOpportunity>,
    pub stats_predictions: Option<StatsForecast>,
}

impl MatchAnalysis {
    fn insufficient_data(bundle: &HistoricalDataBundle) -> Self {
        MatchAnalysis {
            home_team: bundle.home_team.clone(),
            away_team: bundle.away_team.clone(),
            match_result: None,
            total_goals: None,
            btts: None,
            all_opportunities: Vec::new(),
            stats_predictions: None,
        }
    }
}

/// Run the whole pipeline for one fixture. Pure function: all history and
/// quotes arrive resolved, nothing is persisted.
pub fn analyze(
    bundle: &HistoricalDataBundle,
    quotes: &[BookmakerOdds],
    cfg: &ModelConfig,
) -> MatchAnalysis {
    let home_form = form::analyze_form(&bundle.home_recent, &bundle.home_team, cfg.recent_form_window);
    let away_form = form::analyze_form(&bundle.away_recent, &bundle.away_team, cfg.recent_form_window);
    let head_to_head = h2h::analyze_head_to_head(&bundle.h2h, &bundle.home_team, &bundle.away_team);

    // All three evidence sources empty: the defaults would just be priors
    // masquerading as estimates.
    if home_form.sample_size == 0 && away_form.sample_size == 0 && head_to_head.sample_size == 0 {
        return MatchAnalysis::insufficient_data(bundle);
    }

    let xg = expected_goals::synthesize(&home_form, &away_form, &head_to_head, cfg);
    let grid = ScoreGrid::from_rates(&xg);

    let outcome_probs = markets::match_outcome_probs(&grid);
    let totals = markets::totals_probs(&grid);
    let btts = markets::btts_probs(&xg);

    let match_result = MatchResultReport {
        market: build_market_report(
            keys::MATCH_RESULT,
            &outcome_probs.outcomes(),
            quotes,
            cfg.min_ev_percent,
            match_result_explanation(&xg, &outcome_probs, &head_to_head, bundle),
        ),
        expected_goals: GoalExpectation {
            home: xg.home,
            away: xg.away,
        },
    };

    let expected_total = xg.home + xg.away;
    let total_goals = TotalGoalsReport {
        market: build_market_report(
            keys::TOTALS,
            &totals.outcomes(),
            quotes,
            cfg.min_ev_percent,
            format!(
                "Expected {:.2} total goals; the model leans {} 2.5 at {:.1}%",
                expected_total,
                if totals.over >= totals.under { "over" } else { "under" },
                totals.over.max(totals.under) * 100.0
            ),
        ),
        expected_total_goals: expected_total,
    };

    let scoring = ScoringProbabilities {
        home: 1.0 - (-xg.home).exp(),
        away: 1.0 - (-xg.away).exp(),
    };
    let btts_report = BttsReport {
        market: build_market_report(
            keys::BTTS,
            &btts.outcomes(),
            quotes,
            cfg.min_ev_percent,
            format!(
                "{:.1}% chance both sides score ({} scores {:.1}%, {} scores {:.1}%)",
                btts.yes * 100.0,
                bundle.home_team,
                scoring.home * 100.0,
                bundle.away_team,
                scoring.away * 100.0
            ),
        ),
        scoring_probabilities: scoring,
    };

    let mut all_opportunities: Vec<EvOpportunity> = match_result
        .market
        .opportunities
        .iter()
        .chain(&total_goals.market.opportunities)
        .chain(&btts_report.market.opportunities)
        .cloned()
        .collect();
    value::rank(&mut all_opportunities);

    MatchAnalysis {
        home_team: bundle.home_team.clone(),
        away_team: bundle.away_team.clone(),
        match_result: Some(match_result),
        total_goals: Some(total_goals),
        btts: Some(btts_report),
        all_opportunities,
        stats_predictions: Some(stats::predict_stats(&xg)),
    }
}

fn build_market_report(
    market_key: &str,
    outcomes: &[(&str, f64)],
    quotes: &[BookmakerOdds],
    min_ev_percent: f64,
    explanation: String,
) -> MarketReport {
    let probabilities = outcomes
        .iter()
        .map(|&(key, p)| (key.to_string(), p))
        .collect();
    let fair_odds = outcomes
        .iter()
        .filter_map(|&(key, p)| Some((key.to_string(), markets::fair_price(p)?)))
        .collect();
    MarketReport {
        probabilities,
        fair_odds,
        odds_range: odds_range(market_key, outcomes, quotes),
        explanation,
        opportunities: value::scan_market(market_key, outcomes, quotes, min_ev_percent),
    }
}

/// Min/max quoted price per outcome across bookmakers. Outcomes nobody
/// quotes are omitted.
fn odds_range(
    market_key: &str,
    outcomes: &[(&str, f64)],
    quotes: &[BookmakerOdds],
) -> BTreeMap<String, PriceRange> {
    let mut ranges = BTreeMap::new();
    for &(outcome, _) in outcomes {
        let prices: Vec<f64> = quotes
            .iter()
            .filter_map(|q| q.markets.get(market_key)?.get(outcome).copied())
            .filter(|&p| p > 0.0)
            .collect();
        if prices.is_empty() {
            continue;
        }
        let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        ranges.insert(
            outcome.to_string(),
            PriceRange {
                min,
                max,
                bookmakers: prices.len(),
            },
        );
    }
    ranges
}

fn match_result_explanation(
    xg: &ExpectedGoals,
    probs: &markets::MatchOutcomeProbs,
    head_to_head: &h2h::HeadToHeadRecord,
    bundle: &HistoricalDataBundle,
) -> String {
    let (label, p) = if probs.home >= probs.draw && probs.home >= probs.away {
        (format!("{} win", bundle.home_team), probs.home)
    } else if probs.away >= probs.draw {
        (format!("{} win", bundle.away_team), probs.away)
    } else {
        ("draw".to_string(), probs.draw)
    };
    let h2h_note = if head_to_head.sample_size > 0 {
        format!(", {} prior meetings", head_to_head.sample_size)
    } else {
        String::new()
    };
    format!(
        "Poisson model (xG {:.2}-{:.2} from recent form{}) makes {} most likely at {:.1}%",
        xg.home,
        xg.away,
        h2h_note,
        label,
        p * 100.0
    )
}
