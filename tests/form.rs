mod common;

use chrono::Duration;
use common::{day, fixture, game, shootout};
use league_table::{Outcome, StatsError};
use league_table::form::{DEFAULT_FORM_WINDOW, form_string, recent_form};

#[test]
fn short_history_is_not_padded() {
    let matches = vec![
        game(1, 1, 0, 1, 2, 1, 0),
        game(2, 1, 1, 3, 1, 2, 2),
        game(3, 1, 2, 1, 4, 0, 1),
        fixture(4, 1, 3, 1, 5),
    ];
    let form = recent_form(1, &matches, day(10), DEFAULT_FORM_WINDOW).unwrap();
    assert_eq!(form.len(), 3);
    assert_eq!(form_string(&form), "LDW");
}

#[test]
fn window_caps_length_and_keeps_latest() {
    let matches: Vec<_> = (0..8)
        .map(|n| game(n as u64 + 1, 1, n, 1, 2, (n % 2) as i32, 0))
        .collect();
    let form = recent_form(1, &matches, day(100), 5).unwrap();
    assert_eq!(form.len(), 5);
    let ids: Vec<u64> = form.iter().map(|e| e.match_id).collect();
    assert_eq!(ids, vec![8, 7, 6, 5, 4]);
}

#[test]
fn as_of_is_strict() {
    let matches = vec![game(1, 1, 0, 1, 2, 1, 0), game(2, 1, 5, 1, 3, 0, 2)];
    let form = recent_form(1, &matches, day(5), 5).unwrap();
    assert_eq!(form.len(), 1);
    assert_eq!(form[0].match_id, 1);
    assert!(form.iter().all(|e| e.match_date < day(5)));

    let later = recent_form(1, &matches, day(5) + Duration::seconds(1), 5).unwrap();
    assert_eq!(form_string(&later), "LW");
}

#[test]
fn same_kickoff_orders_by_match_id_descending() {
    let matches = vec![game(10, 1, 0, 1, 2, 1, 0), game(11, 1, 0, 3, 1, 1, 0)];
    let form = recent_form(1, &matches, day(1), 5).unwrap();
    assert_eq!(form[0].match_id, 11);
    assert_eq!(form[0].outcome, Outcome::Loss);
    assert_eq!(form[0].opponent_team_id, 3);
}

#[test]
fn shootouts_resolve_in_form() {
    let matches = vec![shootout(game(1, 1, 0, 1, 2, 0, 0), 3, 5)];
    let form = recent_form(1, &matches, day(1), 5).unwrap();
    assert_eq!(form[0].outcome, Outcome::Loss);
    assert_eq!((form[0].goals_for, form[0].goals_against), (0, 0));
}

#[test]
fn form_entry_serializes_outcome_letter() {
    let matches = vec![game(1, 1, 0, 1, 2, 2, 1)];
    let form = recent_form(1, &matches, day(1), 5).unwrap();
    let value = serde_json::to_value(&form[0]).unwrap();
    assert_eq!(value["outcome"], "W");
    assert_eq!(value["match_id"], 1);
    assert_eq!(value["opponent_team_id"], 2);
    assert_eq!(value["venue"], "home");
}

#[test]
fn malformed_record_outside_window_still_fails() {
    let matches = vec![
        game(1, 1, 0, 1, 2, 1, -3),
        game(2, 1, 5, 1, 3, 2, 0),
        game(3, 1, 6, 4, 1, 0, 1),
    ];
    assert!(matches!(
        recent_form(1, &matches, day(10), 1),
        Err(StatsError::InvalidArgument(_))
    ));
}
