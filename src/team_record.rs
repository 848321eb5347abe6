use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::match_record::MatchRecord;
use crate::outcome::{Outcome, resolve_for_side};

pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSeasonRecord {
    pub team_id: u32,
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u64,
    pub goals_against: u64,
    pub goal_difference: i64,
    pub points: u32,
}

/// Team record in the shape the serving layer exposes on team pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecordSummary {
    pub matches: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u64,
    pub goals_against: u64,
    pub goal_diff: i64,
    pub points: u32,
    pub win_rate: u32,
}

impl TeamSeasonRecord {
    pub fn summary(&self) -> TeamRecordSummary {
        TeamRecordSummary {
            matches: self.matches_played,
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            goals_for: self.goals_for,
            goals_against: self.goals_against,
            goal_diff: self.goal_difference,
            points: self.points,
            win_rate: win_rate(self.wins, self.matches_played),
        }
    }
}

/// Whole-number percentage of wins, rounded half up; 0 with no matches.
pub fn win_rate(wins: u32, matches: u32) -> u32 {
    if matches == 0 {
        return 0;
    }
    let wins = u64::from(wins);
    let matches = u64::from(matches);
    let rate = (wins * 200 + matches) / (matches * 2);
    u32::try_from(rate).unwrap_or(100)
}

pub fn accumulate(team_id: u32, matches: &[MatchRecord]) -> Result<TeamSeasonRecord> {
    let mut wins = 0u32;
    let mut draws = 0u32;
    let mut losses = 0u32;
    let mut goals_for = 0u64;
    let mut goals_against = 0u64;
    let mut goal_difference = 0i64;

    for m in matches {
        let Some(side) = m.side_of(team_id) else {
            continue;
        };
        let Some(outcome) = resolve_for_side(m, side)? else {
            continue;
        };
        match outcome {
            Outcome::Win => wins += 1,
            Outcome::Draw => draws += 1,
            Outcome::Loss => losses += 1,
        }
        // Resolved matches always carry both (validated, non-negative) scores.
        let scored = m.score_for(side).unwrap_or_default();
        let conceded = m.score_for(side.opposite()).unwrap_or_default();
        goals_for += u64::from(scored.unsigned_abs());
        goals_against += u64::from(conceded.unsigned_abs());
        goal_difference += i64::from(scored) - i64::from(conceded);
    }

    let record = TeamSeasonRecord {
        team_id,
        matches_played: wins + draws + losses,
        wins,
        draws,
        losses,
        goals_for,
        goals_against,
        goal_difference,
        points: wins * POINTS_FOR_WIN + draws * POINTS_FOR_DRAW,
    };
    debug!(
        team_id,
        played = record.matches_played,
        points = record.points,
        "accumulated team record"
    );
    Ok(record)
}
