use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};
use crate::match_record::{MatchRecord, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

impl Outcome {
    pub fn letter(self) -> char {
        match self {
            Outcome::Win => 'W',
            Outcome::Draw => 'D',
            Outcome::Loss => 'L',
        }
    }

    pub fn is_decisive(self) -> bool {
        self != Outcome::Draw
    }

    pub fn reversed(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Draw => Outcome::Draw,
            Outcome::Loss => Outcome::Win,
        }
    }
}

/// Outcome of `m` for `team_id`.
///
/// `Ok(None)` means the match does not count (not completed, or a regulation
/// score is missing). A team that did not play in the match is an error.
pub fn resolve_outcome(m: &MatchRecord, team_id: u32) -> Result<Option<Outcome>> {
    let side = m.side_of(team_id).ok_or_else(|| {
        StatsError::invalid(format!(
            "team {team_id} did not play in match {} ({} v {})",
            m.match_id, m.home_team_id, m.away_team_id
        ))
    })?;
    resolve_for_side(m, side)
}

pub fn resolve_for_side(m: &MatchRecord, side: Side) -> Result<Option<Outcome>> {
    m.validate()?;
    if !m.is_completed() {
        return Ok(None);
    }
    let (Some(gf), Some(ga)) = (m.score_for(side), m.score_for(side.opposite())) else {
        return Ok(None);
    };

    if gf > ga {
        return Ok(Some(Outcome::Win));
    }
    if gf < ga {
        return Ok(Some(Outcome::Loss));
    }

    let outcome = match (m.penalties_for(side), m.penalties_for(side.opposite())) {
        // 0-0 is what unset shootout columns look like in storage, not a decision.
        (Some(0), Some(0)) => Outcome::Draw,
        (Some(pf), Some(pa)) if pf > pa => Outcome::Win,
        (Some(pf), Some(pa)) if pf < pa => Outcome::Loss,
        // Tied or one-sided shootout records are treated as a level result.
        _ => Outcome::Draw,
    };
    Ok(Some(outcome))
}
