use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::match_record::{MatchRecord, Side, sort_most_recent_first, validate_all};
use crate::outcome::{Outcome, resolve_for_side};

pub const DEFAULT_FORM_WINDOW: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormEntry {
    pub match_id: u64,
    pub match_date: DateTime<Utc>,
    pub opponent_team_id: u32,
    pub venue: Side,
    pub goals_for: u32,
    pub goals_against: u32,
    pub outcome: Outcome,
}

/// Last `window` resolved results for `team_id` strictly before `as_of`,
/// most recent first. Shorter histories are returned as-is.
pub fn recent_form(
    team_id: u32,
    matches: &[MatchRecord],
    as_of: DateTime<Utc>,
    window: usize,
) -> Result<Vec<FormEntry>> {
    validate_all(matches)?;
    let mut candidates: Vec<&MatchRecord> = matches
        .iter()
        .filter(|m| m.involves(team_id) && m.match_date < as_of)
        .collect();
    sort_most_recent_first(&mut candidates);

    let mut out = Vec::with_capacity(window.min(candidates.len()));
    for m in candidates {
        if out.len() >= window {
            break;
        }
        let Some(side) = m.side_of(team_id) else {
            continue;
        };
        let Some(outcome) = resolve_for_side(m, side)? else {
            continue;
        };
        out.push(FormEntry {
            match_id: m.match_id,
            match_date: m.match_date,
            opponent_team_id: m.team_on(side.opposite()),
            venue: side,
            goals_for: m.score_for(side).unwrap_or_default().unsigned_abs(),
            goals_against: m.score_for(side.opposite()).unwrap_or_default().unsigned_abs(),
            outcome,
        });
    }
    Ok(out)
}

pub fn form_string(entries: &[FormEntry]) -> String {
    entries.iter().map(|e| e.outcome.letter()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_record::{MatchStatus, completed};

    #[test]
    fn skips_unresolvable_without_shrinking_window() {
        let mut scheduled = completed(4, 1, 2, 0, 0);
        scheduled.status = MatchStatus::Scheduled;
        let matches = vec![
            completed(1, 1, 2, 1, 0),
            completed(2, 3, 1, 1, 1),
            completed(3, 1, 4, 0, 2),
            scheduled,
        ];
        let as_of = matches[3].match_date + chrono::Duration::days(1);
        let form = recent_form(1, &matches, as_of, 3).unwrap();
        assert_eq!(form_string(&form), "LDW");
        assert_eq!(form[0].opponent_team_id, 4);
        assert_eq!(form[1].venue, Side::Away);
    }

    #[test]
    fn zero_window_is_empty() {
        let matches = vec![completed(1, 1, 2, 1, 0)];
        let as_of = matches[0].match_date + chrono::Duration::days(1);
        assert!(recent_form(1, &matches, as_of, 0).unwrap().is_empty());
    }
}
