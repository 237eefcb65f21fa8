//! Head-to-head analysis: what prior meetings between the two fixture
//! participants say, re-oriented onto today's home/away roles.

use crate::odds_api::MatchResult;

use super::form::DEFAULT_AVG_GOALS;

/// Aggregated head-to-head record, expressed in the *current* fixture's
/// orientation: `home_wins` counts wins by the team that is home today,
/// regardless of where it played in the past.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadToHeadRecord {
    pub home_wins: u32,
    pub draws: u32,
    pub away_wins: u32,
    pub avg_home_goals: f64,
    pub avg_away_goals: f64,
    pub sample_size: u32,
}

impl HeadToHeadRecord {
    pub fn no_evidence() -> Self {
        HeadToHeadRecord {
            home_wins: 0,
            draws: 0,
            away_wins: 0,
            avg_home_goals: DEFAULT_AVG_GOALS,
            avg_away_goals: DEFAULT_AVG_GOALS,
            sample_size: 0,
        }
    }
}

/// Aggregate prior meetings between `home_team` and `away_team`.
///
/// The team that is home today may have been away in any past meeting, so
/// each result's goals are swapped onto today's orientation before
/// accumulating. Meetings with unreadable scores or not involving both
/// teams are skipped.
pub fn analyze_head_to_head(
    meetings: &[MatchResult],
    home_team: &str,
    away_team: &str,
) -> HeadToHeadRecord {
    let mut home_goals = 0u32;
    let mut away_goals = 0u32;
    let mut home_wins = 0u32;
    let mut draws = 0u32;
    let mut away_wins = 0u32;
    let mut samples = 0u32;

    for meeting in meetings {
        let Some((h, a)) = meeting.parsed_score() else {
            continue;
        };
        let (today_home, today_away) =
            if meeting.home_team == home_team && meeting.away_team == away_team {
                (h, a)
            } else if meeting.home_team == away_team && meeting.away_team == home_team {
                (a, h)
            } else {
                continue;
            };

        home_goals += today_home;
        away_goals += today_away;
        match today_home.cmp(&today_away) {
            std::cmp::Ordering::Greater => home_wins += 1,
            std::cmp::Ordering::Equal => draws += 1,
            std::cmp::Ordering::Less => away_wins += 1,
        }
        samples += 1;
    }

    if samples == 0 {
        return HeadToHeadRecord::no_evidence();
    }

    HeadToHeadRecord {
        home_wins,
        draws,
        away_wins,
        avg_home_goals: f64::from(home_goals) / f64::from(samples),
        avg_away_goals: f64::from(away_goals) / f64::from(samples),
        sample_size: samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn meeting(home: &str, away: &str, score: &str) -> MatchResult {
        MatchResult {
            home_team: home.into(),
            away_team: away.into(),
            score: score.into(),
        }
    }

    #[test]
    fn goals_are_reoriented_onto_current_fixture() {
        let meetings = vec![
            meeting("Arsenal", "Chelsea", "2-0"), // Arsenal (today's home) scores 2
            meeting("Chelsea", "Arsenal", "1-3"), // Arsenal scores 3 away
        ];
        let record = analyze_head_to_head(&meetings, "Arsenal", "Chelsea");
        assert_eq!(record.sample_size, 2);
        assert_relative_eq!(record.avg_home_goals, 2.5, epsilon = 1e-9);
        assert_relative_eq!(record.avg_away_goals, 0.5, epsilon = 1e-9);
        assert_eq!(record.home_wins, 2);
        assert_eq!(record.away_wins, 0);
    }

    #[test]
    fn draws_and_away_wins_tally() {
        let meetings = vec![
            meeting("Chelsea", "Arsenal", "2-2"),
            meeting("Chelsea", "Arsenal", "4-0"), // Chelsea (today's away) wins
        ];
        let record = analyze_head_to_head(&meetings, "Arsenal", "Chelsea");
        assert_eq!(record.draws, 1);
        assert_eq!(record.away_wins, 1);
        assert_relative_eq!(record.avg_home_goals, 1.0, epsilon = 1e-9);
        assert_relative_eq!(record.avg_away_goals, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn unrelated_meetings_are_skipped() {
        let meetings = vec![meeting("Leeds", "Fulham", "1-0")];
        let record = analyze_head_to_head(&meetings, "Arsenal", "Chelsea");
        assert_eq!(record.sample_size, 0);
    }

    #[test]
    fn no_meetings_yields_defaults_with_zero_sample() {
        let record = analyze_head_to_head(&[], "Arsenal", "Chelsea");
        assert_relative_eq!(record.avg_home_goals, 1.5, epsilon = 1e-9);
        assert_relative_eq!(record.avg_away_goals, 1.5, epsilon = 1e-9);
        assert_eq!(record.sample_size, 0);
    }
}
