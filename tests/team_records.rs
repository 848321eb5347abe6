mod common;

use common::{fixture, game, shootout};
use league_table::StatsError;
use league_table::team_record::{TeamRecordSummary, accumulate};

#[test]
fn win_draw_loss_record_matches_team_page_shape() {
    let matches = vec![
        game(1, 1, 0, 1, 2, 2, 0),
        game(2, 1, 7, 3, 1, 1, 1),
        game(3, 1, 14, 1, 4, 0, 3),
    ];
    let record = accumulate(1, &matches).unwrap();
    assert_eq!(
        record.summary(),
        TeamRecordSummary {
            matches: 3,
            wins: 1,
            draws: 1,
            losses: 1,
            goals_for: 3,
            goals_against: 4,
            goal_diff: -1,
            points: 4,
            win_rate: 33,
        }
    );
}

#[test]
fn summary_serializes_with_documented_field_names() {
    let record = accumulate(1, &[game(1, 1, 0, 1, 2, 2, 0)]).unwrap();
    let value = serde_json::to_value(record.summary()).unwrap();
    for key in [
        "matches",
        "wins",
        "draws",
        "losses",
        "goals_for",
        "goals_against",
        "goal_diff",
        "points",
        "win_rate",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["win_rate"], 100);
}

#[test]
fn unresolvable_matches_do_not_count() {
    let mut no_score = game(3, 1, 2, 1, 2, 0, 0);
    no_score.home_score = None;
    let matches = vec![game(1, 1, 0, 1, 2, 1, 0), fixture(2, 1, 1, 2, 1), no_score];
    let record = accumulate(1, &matches).unwrap();
    assert_eq!(record.matches_played, 1);
    assert_eq!(record.goals_for, 1);
}

#[test]
fn shootout_goals_are_not_added_to_goal_totals() {
    let matches = vec![shootout(game(1, 1, 0, 1, 2, 1, 1), 4, 3)];
    let record = accumulate(1, &matches).unwrap();
    assert_eq!((record.wins, record.draws), (1, 0));
    assert_eq!((record.goals_for, record.goals_against), (1, 1));
    assert_eq!(record.points, 3);
}

#[test]
fn team_without_matches_has_zero_win_rate() {
    let record = accumulate(9, &[game(1, 1, 0, 1, 2, 1, 0)]).unwrap();
    assert_eq!(record.matches_played, 0);
    assert_eq!(record.summary().win_rate, 0);
}

#[test]
fn repeated_accumulation_is_identical() {
    let matches = vec![game(1, 1, 0, 1, 2, 3, 2), game(2, 1, 3, 2, 1, 0, 0)];
    assert_eq!(accumulate(2, &matches).unwrap(), accumulate(2, &matches).unwrap());
}

#[test]
fn negative_scores_fail_fast() {
    let matches = vec![game(1, 1, 0, 1, 2, 1, -2)];
    assert!(matches!(
        accumulate(1, &matches),
        Err(StatsError::InvalidArgument(_))
    ));
}

#[test]
fn large_scores_accumulate_without_wrapping() {
    let matches: Vec<_> = (0..3)
        .map(|n| game(n + 1, 1, n as i64, 1, 2, i32::MAX, 0))
        .collect();
    let record = accumulate(1, &matches).unwrap();
    let expected = 3 * u64::from(i32::MAX.unsigned_abs());
    assert_eq!(record.goals_for, expected);
    assert_eq!(record.goal_difference, 3 * i64::from(i32::MAX));

    let conceded = accumulate(2, &matches).unwrap();
    assert_eq!(conceded.goals_against, expected);
    assert_eq!(conceded.goal_difference, -3 * i64::from(i32::MAX));
}
