//! Market probability calculation over a truncated Poisson score grid, plus
//! fair-price inversion.
//!
//! The three markets (1X2, totals, BTTS) are computed independently from the
//! same rate pair. Each sums to one by construction; no cross-market
//! consistency is enforced, an accepted modeling simplification.

use serde::Serialize;

use super::expected_goals::ExpectedGoals;
use super::poisson;

/// Scores are enumerated up to this many goals per side. For realistic
/// rates (lambda <= 3.5) the ignored tail carries under 1% of the joint
/// mass, and renormalization spreads it back across the grid, so bucket
/// probabilities still sum to exactly one.
pub const MAX_GOALS: u32 = 6;

/// Probabilities below this have no meaningful fair price; see
/// [`fair_price`].
pub const MIN_PROBABILITY: f64 = 1e-9;

/// Wire keys for markets and outcomes. Bookmaker quote bundles must use the
/// same keys; anything else is ignored by the EV scan.
pub mod keys {
    pub const MATCH_RESULT: &str = "1x2";
    pub const TOTALS: &str = "over_under_2_5";
    pub const BTTS: &str = "btts";

    pub const HOME: &str = "home";
    pub const DRAW: &str = "draw";
    pub const AWAY: &str = "away";
    pub const OVER: &str = "over";
    pub const UNDER: &str = "under";
    pub const YES: &str = "yes";
    pub const NO: &str = "no";
}

/// Joint score distribution over `(0..=MAX_GOALS)²`, normalized so the
/// cells sum to one.
#[derive(Clone, Copy)]
pub struct ScoreGrid {
    cells: [[f64; (MAX_GOALS + 1) as usize]; (MAX_GOALS + 1) as usize],
}

impl ScoreGrid {
    pub fn from_rates(xg: &ExpectedGoals) -> Self {
        let mut cells = [[0.0; (MAX_GOALS + 1) as usize]; (MAX_GOALS + 1) as usize];
        let mut total = 0.0;
        for (h, row) in cells.iter_mut().enumerate() {
            for (a, cell) in row.iter_mut().enumerate() {
                *cell = poisson::pmf(h as u32, xg.home) * poisson::pmf(a as u32, xg.away);
                total += *cell;
            }
        }
        for row in &mut cells {
            for cell in row.iter_mut() {
                *cell /= total;
            }
        }
        ScoreGrid { cells }
    }

    fn probability(&self, home_goals: u32, away_goals: u32) -> f64 {
        self.cells[home_goals as usize][away_goals as usize]
    }
}

/// 1X2 outcome probabilities; sum to one.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatchOutcomeProbs {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl MatchOutcomeProbs {
    pub fn outcomes(&self) -> [(&'static str, f64); 3] {
        [
            (keys::HOME, self.home),
            (keys::DRAW, self.draw),
            (keys::AWAY, self.away),
        ]
    }
}

/// Over/Under 2.5 probabilities; complements of each other.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TotalsProbs {
    pub over: f64,
    pub under: f64,
}

impl TotalsProbs {
    pub fn outcomes(&self) -> [(&'static str, f64); 2] {
        [(keys::OVER, self.over), (keys::UNDER, self.under)]
    }
}

/// Both-teams-to-score probabilities; complements of each other.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BttsProbs {
    pub yes: f64,
    pub no: f64,
}

impl BttsProbs {
    pub fn outcomes(&self) -> [(&'static str, f64); 2] {
        [(keys::YES, self.yes), (keys::NO, self.no)]
    }
}

/// Home win / draw / away win from the score grid.
pub fn match_outcome_probs(grid: &ScoreGrid) -> MatchOutcomeProbs {
    let mut home = 0.0;
    let mut draw = 0.0;
    let mut away = 0.0;
    for h in 0..=MAX_GOALS {
        for a in 0..=MAX_GOALS {
            let p = grid.probability(h, a);
            match h.cmp(&a) {
                std::cmp::Ordering::Greater => home += p,
                std::cmp::Ordering::Equal => draw += p,
                std::cmp::Ordering::Less => away += p,
            }
        }
    }
    MatchOutcomeProbs { home, draw, away }
}

/// Over/Under 2.5 goals: under is the grid mass at two goals or fewer,
/// over its complement.
pub fn totals_probs(grid: &ScoreGrid) -> TotalsProbs {
    let mut under = 0.0;
    for h in 0..=MAX_GOALS {
        for a in 0..=MAX_GOALS {
            if h + a <= 2 {
                under += grid.probability(h, a);
            }
        }
    }
    TotalsProbs {
        over: 1.0 - under,
        under,
    }
}

/// Both teams to score, by inclusion-exclusion on the goalless marginals.
/// Uses the untruncated marginals directly; no grid needed.
pub fn btts_probs(xg: &ExpectedGoals) -> BttsProbs {
    let home_blank = poisson::pmf(0, xg.home);
    let away_blank = poisson::pmf(0, xg.away);
    let yes = 1.0 - (home_blank + away_blank - home_blank * away_blank);
    BttsProbs { yes, no: 1.0 - yes }
}

/// Invert a probability into a vig-free decimal price.
///
/// A (near-)zero probability has no finite fair price; rather than the
/// misleading `0.0` some implementations return, this is an explicit `None`
/// and downstream consumers omit the outcome.
pub fn fair_price(probability: f64) -> Option<f64> {
    if probability < MIN_PROBABILITY {
        return None;
    }
    Some(1.0 / probability)
}
