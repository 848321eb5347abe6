use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum MatchStatus {
    Scheduled,
    Completed,
    Other,
}

impl MatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Completed => "completed",
            MatchStatus::Other => "other",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = StatsError;

    fn from_str(raw: &str) -> Result<Self> {
        // Storage rows use a handful of aliases for the same three states.
        match raw.trim().to_ascii_lowercase().as_str() {
            "scheduled" | "not_started" | "notstarted" => Ok(MatchStatus::Scheduled),
            "completed" | "finished" | "ft" => Ok(MatchStatus::Completed),
            "other" | "live" | "in_progress" | "postponed" | "cancelled" | "abandoned" => {
                Ok(MatchStatus::Other)
            }
            other => Err(StatsError::invalid(format!("unknown match status {other:?}"))),
        }
    }
}

impl TryFrom<String> for MatchStatus {
    type Error = StatsError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: u64,
    pub season_id: u32,
    pub match_date: DateTime<Utc>,
    pub status: MatchStatus,
    pub home_team_id: u32,
    pub away_team_id: u32,
    #[serde(default)]
    pub home_score: Option<i32>,
    #[serde(default)]
    pub away_score: Option<i32>,
    #[serde(default)]
    pub penalty_home_score: Option<i32>,
    #[serde(default)]
    pub penalty_away_score: Option<i32>,
    #[serde(default)]
    pub home_coach_id: Option<u32>,
    #[serde(default)]
    pub away_coach_id: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

impl MatchRecord {
    pub fn validate(&self) -> Result<()> {
        if self.home_team_id == self.away_team_id {
            return Err(StatsError::invalid(format!(
                "match {} lists team {} on both sides",
                self.match_id, self.home_team_id
            )));
        }
        let scores = [
            ("home_score", self.home_score),
            ("away_score", self.away_score),
            ("penalty_home_score", self.penalty_home_score),
            ("penalty_away_score", self.penalty_away_score),
        ];
        for (field, value) in scores {
            if let Some(v) = value
                && v < 0
            {
                return Err(StatsError::invalid(format!(
                    "match {} has negative {field} ({v})",
                    self.match_id
                )));
            }
        }
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn involves(&self, team_id: u32) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    pub fn side_of(&self, team_id: u32) -> Option<Side> {
        if self.home_team_id == team_id {
            Some(Side::Home)
        } else if self.away_team_id == team_id {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn team_on(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_team_id,
            Side::Away => self.away_team_id,
        }
    }

    pub fn coach_on(&self, side: Side) -> Option<u32> {
        match side {
            Side::Home => self.home_coach_id,
            Side::Away => self.away_coach_id,
        }
    }

    pub fn score_for(&self, side: Side) -> Option<i32> {
        match side {
            Side::Home => self.home_score,
            Side::Away => self.away_score,
        }
    }

    pub fn penalties_for(&self, side: Side) -> Option<i32> {
        match side {
            Side::Home => self.penalty_home_score,
            Side::Away => self.penalty_away_score,
        }
    }

    /// Raw presence of shootout data on either side, independent of whether
    /// the resolver treats it as a decision.
    pub fn has_penalty_scores(&self) -> bool {
        self.penalty_home_score.is_some() || self.penalty_away_score.is_some()
    }

    pub fn chrono_key(&self) -> (DateTime<Utc>, u64) {
        (self.match_date, self.match_id)
    }
}

pub fn validate_all(matches: &[MatchRecord]) -> Result<()> {
    matches.iter().try_for_each(MatchRecord::validate)
}

/// Most recent first, `match_id` descending on equal dates.
pub fn sort_most_recent_first(matches: &mut [&MatchRecord]) {
    matches.sort_by(|a, b| b.chrono_key().cmp(&a.chrono_key()));
}

#[cfg(test)]
pub(crate) fn completed(match_id: u64, home: u32, away: u32, hs: i32, aws: i32) -> MatchRecord {
    use chrono::TimeZone;
    MatchRecord {
        match_id,
        season_id: 1,
        match_date: Utc
            .with_ymd_and_hms(2024, 8, 1, 15, 0, 0)
            .single()
            .unwrap_or_default()
            + chrono::Duration::days(match_id as i64),
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
