//! Recent-form analysis: what a team's last results say about its scoring
//! and conceding rates.

use crate::odds_api::MatchResult;

/// Stand-in scoring/conceding rate when a team has no readable history.
/// Roughly half the long-run league average of ~3 goals per match; callers
/// must treat `sample_size == 0` as "no evidence", not as a real rate.
pub const DEFAULT_AVG_GOALS: f64 = 1.5;

/// A team's aggregated recent form. Derived fresh per request.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamForm {
    pub avg_scored: f64,
    pub avg_conceded: f64,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    /// Number of results that actually contributed to the averages.
    pub sample_size: u32,
}

impl TeamForm {
    pub fn no_evidence() -> Self {
        TeamForm {
            avg_scored: DEFAULT_AVG_GOALS,
            avg_conceded: DEFAULT_AVG_GOALS,
            wins: 0,
            draws: 0,
            losses: 0,
            sample_size: 0,
        }
    }
}

/// Aggregate a team's most recent results, capped at `window`.
///
/// Goals are attributed by the team's role in each *historical* fixture,
/// which has nothing to do with its role in the fixture under analysis.
/// Results with unreadable scores, or not involving the team at all, are
/// skipped rather than treated as fatal.
pub fn analyze_form(results: &[MatchResult], team: &str, window: usize) -> TeamForm {
    let mut scored = 0u32;
    let mut conceded = 0u32;
    let mut wins = 0u32;
    let mut draws = 0u32;
    let mut losses = 0u32;
    let mut samples = 0u32;

    for result in results.iter().take(window) {
        let Some((home_goals, away_goals)) = result.parsed_score() else {
            continue;
        };
        let (own, opp) = if result.home_team == team {
            (home_goals, away_goals)
        } else if result.away_team == team {
            (away_goals, home_goals)
        } else {
            continue;
        };

        scored += own;
        conceded += opp;
        match own.cmp(&opp) {
            std::cmp::Ordering::Greater => wins += 1,
            std::cmp::Ordering::Equal => draws += 1,
            std::cmp::Ordering::Less => losses += 1,
        }
        samples += 1;
    }

    if samples == 0 {
        return TeamForm::no_evidence();
    }

    TeamForm {
        avg_scored: f64::from(scored) / f64::from(samples),
        avg_conceded: f64::from(conceded) / f64::from(samples),
        wins,
        draws,
        losses,
        sample_size: samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn result(home: &str, away: &str, score: &str) -> MatchResult {
        MatchResult {
            home_team: home.into(),
            away_team: away.into(),
            score: score.into(),
        }
    }

    #[test]
    fn averages_follow_historical_home_away_role() {
        let results = vec![
            result("Arsenal", "Chelsea", "3-1"), // Arsenal home: scored 3
            result("Leeds", "Arsenal", "2-2"),   // Arsenal away: scored 2
            result("Arsenal", "Fulham", "1-0"),
        ];
        let form = analyze_form(&results, "Arsenal", 10);
        assert_eq!(form.sample_size, 3);
        assert_relative_eq!(form.avg_scored, 2.0, epsilon = 1e-9);
        assert_relative_eq!(form.avg_conceded, 1.0, epsilon = 1e-9);
        assert_eq!((form.wins, form.draws, form.losses), (2, 1, 0));
    }

    #[test]
    fn unparseable_scores_are_skipped_not_fatal() {
        let results = vec![
            result("Arsenal", "Chelsea", "abandoned"),
            result("Arsenal", "Fulham", "2-0"),
        ];
        let form = analyze_form(&results, "Arsenal", 10);
        assert_eq!(form.sample_size, 1);
        assert_relative_eq!(form.avg_scored, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn results_not_involving_the_team_are_skipped() {
        let results = vec![result("Leeds", "Fulham", "1-1")];
        let form = analyze_form(&results, "Arsenal", 10);
        assert_eq!(form.sample_size, 0);
    }

    #[test]
    fn empty_history_yields_defaults_with_zero_sample() {
        let form = analyze_form(&[], "Arsenal", 10);
        assert_relative_eq!(form.avg_scored, 1.5, epsilon = 1e-9);
        assert_relative_eq!(form.avg_conceded, 1.5, epsilon = 1e-9);
        assert_eq!(form.sample_size, 0);
    }

    #[test]
    fn window_caps_the_sample() {
        let results: Vec<_> = (0..15)
            .map(|_| result("Arsenal", "Chelsea", "1-0"))
            .collect();
        let form = analyze_form(&results, "Arsenal", 10);
        assert_eq!(form.sample_size, 10);
    }
}
