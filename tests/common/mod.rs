#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};

use league_table::{MatchRecord, MatchStatus};

pub fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 10, 15, 0, 0).unwrap() + Duration::days(n)
}

pub fn game(id: u64, season: u32, on: i64, home: u32, away: u32, hs: i32, aws: i32) -> MatchRecord {
    MatchRecord {
        match_id: id,
        season_id: season,
        match_date: day(on),
        status: MatchStatus::Completed,
        home_team_id: home,
        away_team_id: away,
        home_score: Some(hs),
        away_score: Some(aws),
        penalty_home_score: None,
        penalty_away_score: None,
        home_coach_id: None,
        away_coach_id: None,
    }
}

pub fn fixture(id: u64, season: u32, on: i64, home: u32, away: u32) -> MatchRecord {
    MatchRecord {
        status: MatchStatus::Scheduled,
        home_score: None,
        away_score: None,
        ..game(id, season, on, home, away, 0, 0)
    }
}

pub fn shootout(mut m: MatchRecord, home: i32, away: i32) -> MatchRecord {
    m.penalty_home_score = Some(home);
    m.penalty_away_score = Some(away);
    m
}

pub fn coached(mut m: MatchRecord, home: u32, away: u32) -> MatchRecord {
    m.home_coach_id = Some(home);
    m.away_coach_id = Some(away);
    m
}
