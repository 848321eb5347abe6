use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::match_record::{MatchRecord, validate_all};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub season_id: u32,
    pub name: String,
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub season_id: u32,
    #[serde(default)]
    pub season_name: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    pub total_matches: u32,
    pub participating_teams: u32,
    pub completed_matches: u32,
    #[serde(rename = "penalty_matches")]
    pub penalty_decided_matches: u32,
    pub completion_rate: f64,
}

impl SeasonSummary {
    pub fn labelled(mut self, season_name: impl Into<String>, year: Option<i32>) -> Self {
        self.season_name = Some(season_name.into());
        self.year = year;
        self
    }
}

/// Completed share of `total` as a percentage rounded to two decimals.
pub fn completion_rate(completed: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let completed = u64::from(completed.min(total));
    let total = u64::from(total);
    let hundredths = (completed * 20_000 + total) / (total * 2);
    hundredths as f64 / 100.0
}

pub fn summarize(
    season_id: u32,
    matches: &[MatchRecord],
    team_seasons_count: u32,
) -> Result<SeasonSummary> {
    validate_all(matches)?;
    let mut total = 0u32;
    let mut completed = 0u32;
    let mut penalties = 0u32;
    for m in matches.iter().filter(|m| m.season_id == season_id) {
        total += 1;
        if m.is_completed() {
            completed += 1;
        }
        if m.has_penalty_scores() {
            penalties += 1;
        }
    }

    Ok(SeasonSummary {
        season_id,
        season_name: None,
        year: None,
        total_matches: total,
        participating_teams: team_seasons_count,
        completed_matches: completed,
        penalty_decided_matches: penalties,
        completion_rate: completion_rate(completed, total),
    })
}
