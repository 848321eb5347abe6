use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StatsError};
use crate::match_record::{MatchRecord, Side, sort_most_recent_first};
use crate::outcome::{Outcome, resolve_for_side};

/// Which identity on each side of a match the compared entities stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityRole {
    #[default]
    Team,
    HeadCoach,
}

impl EntityRole {
    fn entity_on(self, m: &MatchRecord, side: Side) -> Option<u32> {
        match self {
            EntityRole::Team => Some(m.team_on(side)),
            EntityRole::HeadCoach => m.coach_on(side),
        }
    }

    fn side_of(self, m: &MatchRecord, entity_id: u32) -> Option<Side> {
        [Side::Home, Side::Away]
            .into_iter()
            .find(|side| self.entity_on(m, *side) == Some(entity_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadToHeadMatch {
    #[serde(flatten)]
    pub record: MatchRecord,
    /// Side entity A was on.
    pub side_a: Side,
    pub outcome_a: Outcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadToHeadRecord {
    pub entity_a_id: u32,
    pub entity_b_id: u32,
    pub role: EntityRole,
    pub wins_a: u32,
    pub wins_b: u32,
    pub draws: u32,
    pub goals_a: u64,
    pub goals_b: u64,
    pub matches: Vec<HeadToHeadMatch>,
}

impl HeadToHeadRecord {
    pub fn total(&self) -> u32 {
        self.wins_a + self.wins_b + self.draws
    }
}

pub fn head_to_head(
    entity_a: u32,
    entity_b: u32,
    matches: &[MatchRecord],
    role: EntityRole,
) -> Result<HeadToHeadRecord> {
    if entity_a == entity_b {
        return Err(StatsError::invalid(format!(
            "head-to-head needs two distinct entities, got {entity_a} twice"
        )));
    }

    let mut meetings: Vec<&MatchRecord> = Vec::new();
    for m in matches {
        m.validate()?;
        let Some(side_a) = role.side_of(m, entity_a) else {
            continue;
        };
        if role.entity_on(m, side_a.opposite()) == Some(entity_b) {
            meetings.push(m);
        }
    }
    sort_most_recent_first(&mut meetings);

    let mut out = HeadToHeadRecord {
        entity_a_id: entity_a,
        entity_b_id: entity_b,
        role,
        wins_a: 0,
        wins_b: 0,
        draws: 0,
        goals_a: 0,
        goals_b: 0,
        matches: Vec::new(),
    };

    for m in meetings {
        let Some(side_a) = role.side_of(m, entity_a) else {
            continue;
        };
        let Some(outcome_a) = resolve_for_side(m, side_a)? else {
            continue;
        };
        match outcome_a {
            Outcome::Win => out.wins_a += 1,
            Outcome::Draw => out.draws += 1,
            Outcome::Loss => out.wins_b += 1,
        }
        out.goals_a += u64::from(m.score_for(side_a).unwrap_or_default().unsigned_abs());
        out.goals_b += u64::from(
            m.score_for(side_a.opposite())
                .unwrap_or_default()
                .unsigned_abs(),
        );
        out.matches.push(HeadToHeadMatch {
            record: m.clone(),
            side_a,
            outcome_a,
        });
    }

    debug!(
        entity_a,
        entity_b,
        ?role,
        meetings = out.matches.len(),
        "computed head-to-head"
    );
    Ok(out)
}
