use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::Duration;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::form::{self, DEFAULT_FORM_WINDOW};
use crate::match_record::{MatchRecord, validate_all};
use crate::team_record::{self, TeamSeasonRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
}

/// Display metadata for teams, keyed by team id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDirectory {
    teams: HashMap<u32, TeamInfo>,
}

impl TeamDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, team_id: u32, name: impl Into<String>) {
        self.teams.insert(
            team_id,
            TeamInfo {
                name: name.into(),
                short_name: None,
            },
        );
    }

    pub fn insert_info(&mut self, team_id: u32, info: TeamInfo) {
        self.teams.insert(team_id, info);
    }

    pub fn get(&self, team_id: u32) -> Option<&TeamInfo> {
        self.teams.get(&team_id)
    }

    /// Display name, empty when the team is unknown.
    pub fn name(&self, team_id: u32) -> &str {
        self.teams
            .get(&team_id)
            .map(|t| t.name.as_str())
            .unwrap_or_default()
    }
}

impl FromIterator<(u32, String)> for TeamDirectory {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        let mut dir = TeamDirectory::new();
        for (id, name) in iter {
            dir.insert(id, name);
        }
        dir
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standing_id: Option<u64>,
    pub season_id: u32,
    pub position: u32,
    pub team_name: String,
    #[serde(flatten)]
    pub record: TeamSeasonRecord,
    pub form: String,
}

impl StandingRow {
    pub fn team_id(&self) -> u32 {
        self.record.team_id
    }
}

/// League-table ordering: points, goal difference and goals for descending,
/// then display name (case-insensitive) and team id ascending.
pub fn compare_rows(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.record
        .points
        .cmp(&a.record.points)
        .then_with(|| b.record.goal_difference.cmp(&a.record.goal_difference))
        .then_with(|| b.record.goals_for.cmp(&a.record.goals_for))
        .then_with(|| {
            a.team_name
                .to_lowercase()
                .cmp(&b.team_name.to_lowercase())
        })
        .then_with(|| a.record.team_id.cmp(&b.record.team_id))
}

pub fn build_standings(
    season_id: u32,
    matches: &[MatchRecord],
    teams: &TeamDirectory,
) -> Result<Vec<StandingRow>> {
    build_standings_with_window(season_id, matches, teams, DEFAULT_FORM_WINDOW)
}

/// Like [`build_standings`] with `form_window` results in each form string.
pub fn build_standings_with_window(
    season_id: u32,
    matches: &[MatchRecord],
    teams: &TeamDirectory,
    form_window: usize,
) -> Result<Vec<StandingRow>> {
    validate_all(matches)?;
    let season: Vec<MatchRecord> = matches
        .iter()
        .filter(|m| m.season_id == season_id)
        .cloned()
        .collect();
    rank_season(season_id, &season, teams, form_window)
}

/// Standings for every season present in `matches`, computed in parallel.
pub fn build_all_standings(
    matches: &[MatchRecord],
    teams: &TeamDirectory,
) -> Result<BTreeMap<u32, Vec<StandingRow>>> {
    build_all_standings_with_window(matches, teams, DEFAULT_FORM_WINDOW)
}

pub fn build_all_standings_with_window(
    matches: &[MatchRecord],
    teams: &TeamDirectory,
    form_window: usize,
) -> Result<BTreeMap<u32, Vec<StandingRow>>> {
    validate_all(matches)?;
    let mut by_season: BTreeMap<u32, Vec<MatchRecord>> = BTreeMap::new();
    for m in matches {
        by_season.entry(m.season_id).or_default().push(m.clone());
    }

    let tables = by_season
        .par_iter()
        .map(|(season_id, season)| -> Result<(u32, Vec<StandingRow>)> {
            Ok((*season_id, rank_season(*season_id, season, teams, form_window)?))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(tables.into_iter().collect())
}

fn rank_season(
    season_id: u32,
    season: &[MatchRecord],
    teams: &TeamDirectory,
    form_window: usize,
) -> Result<Vec<StandingRow>> {
    let team_ids: Vec<u32> = season
        .iter()
        .flat_map(|m| [m.home_team_id, m.away_team_id])
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    // Form looks back from just after the last fixture on record.
    let Some(latest) = season.iter().map(|m| m.match_date).max() else {
        return Ok(Vec::new());
    };
    let as_of = latest + Duration::nanoseconds(1);

    let missing_names = team_ids.iter().filter(|id| teams.get(**id).is_none()).count();
    if missing_names > 0 {
        warn!(
            season_id,
            missing_names, "teams without metadata; ranking them with empty names"
        );
    }

    let mut rows = team_ids
        .par_iter()
        .map(|team_id| -> Result<StandingRow> {
            let record = team_record::accumulate(*team_id, season)?;
            let recent = form::recent_form(*team_id, season, as_of, form_window)?;
            Ok(StandingRow {
                standing_id: None,
                season_id,
                position: 0,
                team_name: teams.name(*team_id).to_string(),
                record,
                form: form::form_string(&recent),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    rows.retain(|row| row.record.matches_played > 0);
    rows.sort_by(compare_rows);
    for (idx, row) in rows.iter_mut().enumerate() {
        row.position = u32::try_from(idx + 1).unwrap_or(u32::MAX);
    }

    debug!(season_id, teams = rows.len(), "built standings");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_record::completed;

    #[test]
    fn name_breaks_full_tie_case_insensitively() {
        let matches = vec![completed(1, 1, 2, 1, 1)];
        let teams: TeamDirectory = [(1, "zebra FC".to_string()), (2, "Alpha".to_string())]
            .into_iter()
            .collect();
        let rows = build_standings(1, &matches, &teams).unwrap();
        assert_eq!(rows[0].team_id(), 2);
        assert_eq!(rows[1].team_id(), 1);
        assert_eq!(rows[0].form, "D");
    }

    #[test]
    fn unknown_teams_fall_back_to_id_order() {
        let matches = vec![completed(1, 7, 3, 0, 0)];
        let rows = build_standings(1, &matches, &TeamDirectory::new()).unwrap();
        let ids: Vec<u32> = rows.iter().map(StandingRow::team_id).collect();
        assert_eq!(ids, vec![3, 7]);
        assert!(rows.iter().all(|r| r.team_name.is_empty()));
    }

    #[test]
    fn other_seasons_are_ignored() {
        let mut other = completed(2, 1, 3, 5, 0);
        other.season_id = 2;
        let matches = vec![completed(1, 1, 2, 1, 0), other];
        let rows = build_standings(1, &matches, &TeamDirectory::new()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].record.goals_for, 1);
    }
}
