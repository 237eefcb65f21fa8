//! Secondary-statistic forecasts derived from the expected-goals pair.
//!
//! These are empirical ratio heuristics, not fitted from data, and each
//! category carries a static confidence score reflecting how well the ratio
//! tends to hold: corners track attacking intent closely, cards barely.

use serde::Serialize;

use super::expected_goals::ExpectedGoals;
use super::poisson;

// Per-goal ratios observed across the tracked leagues.
const CORNERS_PER_GOAL: f64 = 4.5;
const SHOTS_PER_GOAL: f64 = 7.0;
const SHOTS_ON_TARGET_RATIO: f64 = 0.35;
const OFFSIDES_PER_GOAL: f64 = 2.0;
/// Baseline fouls per side; evenly matched fixtures run more physical.
const FOULS_BASE: f64 = 12.0;
const COMPETITIVENESS_SCALE: f64 = 0.2;
const CARDS_PER_FOUL: f64 = 0.25;

const CONFIDENCE_CORNERS: u8 = 75;
const CONFIDENCE_SHOTS: u8 = 70;
const CONFIDENCE_SHOTS_ON_TARGET: u8 = 68;
const CONFIDENCE_FOULS: u8 = 65;
const CONFIDENCE_OFFSIDES: u8 = 60;
const CONFIDENCE_CARDS: u8 = 55;

/// Fixed corner-total lines evaluated for a directional lean.
const CORNER_LINES: [f64; 5] = [8.5, 9.5, 10.5, 11.5, 12.5];
/// Cumulative probability one side of a line must reach before a pick is
/// emitted.
const CORNER_PICK_THRESHOLD: f64 = 0.6;

/// One forecast category, split per side, with its confidence score (0-100).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatLine {
    pub home: f64,
    pub away: f64,
    pub total: f64,
    pub confidence: u8,
}

impl StatLine {
    fn new(home: f64, away: f64, confidence: u8) -> Self {
        StatLine {
            home,
            away,
            total: home + away,
            confidence,
        }
    }
}

/// A directional corner-totals pick for one line.
#[derive(Debug, Clone, Serialize)]
pub struct CornerLinePick {
    pub line: f64,
    /// "over" or "under".
    pub pick: String,
    pub probability: f64,
}

/// The full secondary-statistics forecast for a fixture.
#[derive(Debug, Clone, Serialize)]
pub struct StatsForecast {
    pub corners: StatLine,
    pub shots: StatLine,
    pub shots_on_target: StatLine,
    pub fouls: StatLine,
    pub cards: StatLine,
    pub offsides: StatLine,
    pub corner_markets: Vec<CornerLinePick>,
}

/// Derive the secondary forecast from the rate pair. Pure function.
pub fn predict_stats(xg: &ExpectedGoals) -> StatsForecast {
    let corners = StatLine::new(
        xg.home * CORNERS_PER_GOAL,
        xg.away * CORNERS_PER_GOAL,
        CONFIDENCE_CORNERS,
    );
    let shots = StatLine::new(
        xg.home * SHOTS_PER_GOAL,
        xg.away * SHOTS_PER_GOAL,
        CONFIDENCE_SHOTS,
    );
    let shots_on_target = StatLine::new(
        shots.home * SHOTS_ON_TARGET_RATIO,
        shots.away * SHOTS_ON_TARGET_RATIO,
        CONFIDENCE_SHOTS_ON_TARGET,
    );
    let offsides = StatLine::new(
        xg.home * OFFSIDES_PER_GOAL,
        xg.away * OFFSIDES_PER_GOAL,
        CONFIDENCE_OFFSIDES,
    );

    // The closer the rate pair, the more physical the fixture is assumed
    // to be; a mismatch usually settles into containment.
    let competitiveness = 1.0 + COMPETITIVENESS_SCALE * (xg.home - xg.away).abs();
    let fouls_per_side = FOULS_BASE * competitiveness;
    let fouls = StatLine::new(fouls_per_side, fouls_per_side, CONFIDENCE_FOULS);
    let cards = StatLine::new(
        fouls.home * CARDS_PER_FOUL,
        fouls.away * CARDS_PER_FOUL,
        CONFIDENCE_CARDS,
    );

    let corner_markets = corner_line_picks(corners.total);

    StatsForecast {
        corners,
        shots,
        shots_on_target,
        fouls,
        cards,
        offsides,
        corner_markets,
    }
}

/// Evaluate the fixed corner-total lines against a Poisson distribution
/// with the predicted total as its rate. A pick is emitted only when one
/// side of the line reaches the threshold; lines too close to the expected
/// total produce nothing.
fn corner_line_picks(expected_corners: f64) -> Vec<CornerLinePick> {
    CORNER_LINES
        .iter()
        .filter_map(|&line| {
            let under = poisson::cdf(line.floor() as u32, expected_corners);
            let over = 1.0 - under;
            if over >= CORNER_PICK_THRESHOLD {
                Some(CornerLinePick {
                    line,
                    pick: "over".to_string(),
                    probability: over,
                })
            } else if under >= CORNER_PICK_THRESHOLD {
                Some(CornerLinePick {
                    line,
                    pick: "under".to_string(),
                    probability: under,
                })
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ratios_follow_the_rate_pair() {
        let forecast = predict_stats(&ExpectedGoals { home: 2.0, away: 1.0 });
        assert_relative_eq!(forecast.corners.home, 9.0, epsilon = 1e-9);
        assert_relative_eq!(forecast.corners.away, 4.5, epsilon = 1e-9);
        assert_relative_eq!(forecast.shots.home, 14.0, epsilon = 1e-9);
        assert_relative_eq!(forecast.shots_on_target.home, 4.9, epsilon = 1e-9);
        assert_relative_eq!(forecast.offsides.away, 2.0, epsilon = 1e-9);
        assert_relative_eq!(forecast.corners.total, 13.5, epsilon = 1e-9);
    }

    #[test]
    fn fouls_scale_with_competitiveness() {
        let close = predict_stats(&ExpectedGoals { home: 1.5, away: 1.5 });
        let lopsided = predict_stats(&ExpectedGoals { home: 2.5, away: 0.5 });
        assert_relative_eq!(close.fouls.home, 12.0, epsilon = 1e-9);
        // |2.5 - 0.5| = 2.0 → 12 * (1 + 0.4) = 16.8
        assert_relative_eq!(lopsided.fouls.home, 16.8, epsilon = 1e-9);
        assert_relative_eq!(lopsided.cards.home, 4.2, epsilon = 1e-9);
    }

    #[test]
    fn confidence_scores_are_static() {
        let forecast = predict_stats(&ExpectedGoals { home: 1.1, away: 0.9 });
        assert_eq!(forecast.corners.confidence, 75);
        assert_eq!(forecast.shots.confidence, 70);
        assert_eq!(forecast.shots_on_target.confidence, 68);
        assert_eq!(forecast.fouls.confidence, 65);
        assert_eq!(forecast.offsides.confidence, 60);
        assert_eq!(forecast.cards.confidence, 55);
    }

    #[test]
    fn corner_lines_near_the_mean_emit_nothing() {
        // Expected total of 10: the 9.5 line splits roughly 46/54, below
        // the 60% threshold either way.
        let picks = corner_line_picks(10.0);
        assert!(!picks.iter().any(|p| p.line == 9.5));
    }

    #[test]
    fn corner_lines_away_from_the_mean_pick_a_side() {
        let picks = corner_line_picks(10.0);
        let over_85 = picks.iter().find(|p| p.line == 8.5).unwrap();
        assert_eq!(over_85.pick, "over");
        assert!(over_85.probability >= 0.6);

        let under_125 = picks.iter().find(|p| p.line == 12.5).unwrap();
        assert_eq!(under_125.pick, "under");
        assert!(under_125.probability >= 0.6);
    }

    #[test]
    fn at_most_one_pick_per_line() {
        for expected in [6.0, 8.0, 10.0, 12.0, 15.0] {
            let picks = corner_line_picks(expected);
            for &line in &CORNER_LINES {
                assert!(picks.iter().filter(|p| p.line == line).count() <= 1);
            }
        }
    }
}
