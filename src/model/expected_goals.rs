//! Expected-goals synthesis: blend form and head-to-head signals into a
//! pair of Poisson rate parameters.

use crate::config::ModelConfig;

use super::form::TeamForm;
use super::h2h::HeadToHeadRecord;

/// Neither side's rate may fall below this; a zero-mean Poisson would price
/// its own goalless outcome as a certainty.
pub const MIN_LAMBDA: f64 = 0.3;

/// Poisson rate parameters for the fixture, one per side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpectedGoals {
    pub home: f64,
    pub away: f64,
}

/// Derive expected goals for both sides. Pure function of its inputs.
///
/// Recent scoring rates are the primary signal, with the home side boosted
/// by the home-advantage factor. Head-to-head averages are blended in only
/// once the sample is large enough to mean something. Each side's rate is
/// then averaged against the opponent's concession rate: a leaky defence
/// lifts the attacker's expectation and a tight one drags it down.
pub fn synthesize(
    home_form: &TeamForm,
    away_form: &TeamForm,
    h2h: &HeadToHeadRecord,
    cfg: &ModelConfig,
) -> ExpectedGoals {
    let mut home = home_form.avg_scored * cfg.home_advantage;
    let mut away = away_form.avg_scored;

    if h2h.sample_size >= cfg.min_h2h_sample {
        home = home * cfg.form_weight + h2h.avg_home_goals * cfg.h2h_weight;
        away = away * cfg.form_weight + h2h.avg_away_goals * cfg.h2h_weight;
    }

    home = (home + away_form.avg_conceded) / 2.0;
    away = (away + home_form.avg_conceded) / 2.0;

    ExpectedGoals {
        home: home.max(MIN_LAMBDA),
        away: away.max(MIN_LAMBDA),
    }
}
