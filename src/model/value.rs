//! EV opportunity scanning: scoring bookmaker quotes against the model's
//! fair probabilities.

use serde::Serialize;

use crate::odds_api::BookmakerOdds;

use super::markets::{fair_price, MIN_PROBABILITY};

/// A bookmaker price quoted above the model's fair price.
#[derive(Debug, Clone, Serialize)]
pub struct EvOpportunity {
    pub market: String,
    pub outcome: String,
    pub bookmaker: String,
    /// Quoted decimal price.
    pub price: f64,
    /// The model's vig-free price for the same outcome.
    pub fair_price: f64,
    /// The model's probability estimate.
    pub probability: f64,
    pub ev_percent: f64,
    pub rationale: String,
}

/// Expected value of a one-unit stake, as a percentage.
/// Positive when the quoted price overpays the estimated probability.
pub fn ev_percent(price: f64, probability: f64) -> f64 {
    (price * probability - 1.0) * 100.0
}

/// Scan every bookmaker's quotes for one market against the model's
/// outcome probabilities.
///
/// Missing markets, missing outcomes and non-positive prices are skipped
/// without failing the rest of the scan. The result is filtered by the EV
/// threshold and sorted by descending EV%; the sort is stable, so ties keep
/// quote input order.
pub fn scan_market(
    market_key: &str,
    outcomes: &[(&str, f64)],
    quotes: &[BookmakerOdds],
    min_ev_percent: f64,
) -> Vec<EvOpportunity> {
    let mut opportunities = Vec::new();

    for quote in quotes {
        let Some(quoted_outcomes) = quote.markets.get(market_key) else {
            continue;
        };
        for &(outcome, probability) in outcomes {
            // Zero-probability outcomes have no fair price to compare to.
            if probability < MIN_PROBABILITY {
                continue;
            }
            let Some(&price) = quoted_outcomes.get(outcome) else {
                continue;
            };
            if price <= 0.0 {
                continue;
            }
            let ev = ev_percent(price, probability);
            if ev < min_ev_percent {
                continue;
            }
            let Some(fair) = fair_price(probability) else {
                continue;
            };
            opportunities.push(EvOpportunity {
                market: market_key.to_string(),
                outcome: outcome.to_string(),
                bookmaker: quote.bookmaker.clone(),
                price,
                fair_price: fair,
                probability,
                ev_percent: ev,
                rationale: rationale(ev, probability),
            });
        }
    }

    rank(&mut opportunities);
    opportunities
}

/// Sort opportunities by descending EV%. `sort_by` is stable, so equal EV
/// keeps input order.
pub fn rank(opportunities: &mut [EvOpportunity]) {
    opportunities.sort_by(|a, b| {
        b.ev_percent
            .partial_cmp(&a.ev_percent)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Two independent tiers: how big the edge is, and how likely the outcome
/// is. A huge edge on a long shot usually means the model is wrong, so the
/// narrative says so.
fn rationale(ev: f64, probability: f64) -> String {
    let edge_tier = if ev > 20.0 {
        "Exceptional value"
    } else if ev > 10.0 {
        "Strong value"
    } else if ev > 5.0 {
        "Good value"
    } else {
        "Marginal value"
    };
    let probability_tier = if probability > 0.6 {
        "on a favorite"
    } else if probability > 0.4 {
        "on a balanced outcome"
    } else if probability > 0.25 {
        "on an underdog"
    } else {
        "on a long shot; double-check the model inputs"
    };
    format!(
        "{} ({:+.1}% EV) {} at {:.0}% estimated probability",
        edge_tier,
        ev,
        probability_tier,
        probability * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    fn quote(bookmaker: &str, market: &str, prices: &[(&str, f64)]) -> BookmakerOdds {
        let outcomes: BTreeMap<String, f64> = prices
            .iter()
            .map(|&(k, v)| (k.to_string(), v))
            .collect();
        let mut markets = BTreeMap::new();
        markets.insert(market.to_string(), outcomes);
        BookmakerOdds {
            bookmaker: bookmaker.to_string(),
            markets,
        }
    }

    #[test]
    fn ev_percent_exact_value() {
        assert_relative_eq!(ev_percent(3.0, 0.40), 20.0, epsilon = 1e-9);
        assert_relative_eq!(ev_percent(2.0, 0.50), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn ev_is_monotonic_in_price() {
        let mut last = f64::NEG_INFINITY;
        for price in [1.5, 2.0, 2.5, 3.0, 5.0] {
            let ev = ev_percent(price, 0.40);
            assert!(ev > last);
            last = ev;
        }
    }

    #[test]
    fn threshold_filters_low_ev_quotes() {
        let quotes = vec![quote("bet365", "1x2", &[("home", 2.0), ("away", 3.5)])];
        // home: 2.0 * 0.55 - 1 = +10%; away: 3.5 * 0.25 - 1 = -12.5%
        let outcomes = [("home", 0.55), ("draw", 0.20), ("away", 0.25)];
        for threshold in [0.0, 4.0, 10.0, 10.1] {
            let opps = scan_market("1x2", &outcomes, &quotes, threshold);
            assert!(opps.iter().all(|o| o.ev_percent >= threshold));
        }
        let opps = scan_market("1x2", &outcomes, &quotes, 4.0);
        assert_eq!(opps.len(), 1);
        assert_eq!(opps[0].outcome, "home");
        assert_relative_eq!(opps[0].ev_percent, 10.0, epsilon = 1e-9);
        assert_relative_eq!(opps[0].fair_price * opps[0].probability, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn results_sorted_by_descending_ev() {
        let quotes = vec![
            quote("alpha", "btts", &[("yes", 2.2)]),
            quote("beta", "btts", &[("yes", 2.6), ("no", 2.4)]),
        ];
        let outcomes = [("yes", 0.50), ("no", 0.50)];
        let opps = scan_market("btts", &outcomes, &quotes, 0.0);
        assert_eq!(opps.len(), 3);
        assert!(opps.windows(2).all(|w| w[0].ev_percent >= w[1].ev_percent));
        assert_eq!(opps[0].bookmaker, "beta");
        assert_eq!(opps[0].outcome, "yes");
    }

    #[test]
    fn non_positive_prices_are_skipped() {
        let quotes = vec![quote("bad", "1x2", &[("home", 0.0), ("draw", -2.0)])];
        let outcomes = [("home", 0.5), ("draw", 0.3)];
        assert!(scan_market("1x2", &outcomes, &quotes, 0.0).is_empty());
    }

    #[test]
    fn uncovered_market_yields_no_opportunities() {
        let quotes = vec![quote("bet365", "1x2", &[("home", 2.0)])];
        let outcomes = [("over", 0.5), ("under", 0.5)];
        assert!(scan_market("over_under_2_5", &outcomes, &quotes, 0.0).is_empty());
    }

    #[test]
    fn zero_probability_outcome_is_never_scored() {
        let quotes = vec![quote("bet365", "1x2", &[("home", 1000.0)])];
        let outcomes = [("home", 0.0)];
        assert!(scan_market("1x2", &outcomes, &quotes, 0.0).is_empty());
    }

    #[test]
    fn rationale_tiers() {
        assert!(rationale(25.0, 0.7).starts_with("Exceptional value"));
        assert!(rationale(12.0, 0.5).contains("balanced outcome"));
        assert!(rationale(6.0, 0.3).starts_with("Good value"));
        assert!(rationale(4.5, 0.1).contains("long shot"));
    }
}
