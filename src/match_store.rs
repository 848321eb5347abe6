use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::match_record::{MatchRecord, MatchStatus};
use crate::season_summary::Season;
use crate::standings::{TeamDirectory, TeamInfo};

/// Everything the importer accepts in one JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportFile {
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub teams: Vec<ImportTeam>,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportTeam {
    pub team_id: u32,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    /// Seasons the team is registered in.
    #[serde(default)]
    pub seasons: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub seasons_upserted: usize,
    pub teams_upserted: usize,
    pub team_seasons_linked: usize,
    pub matches_upserted: usize,
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS seasons (
            season_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            year INTEGER NULL
        );
        CREATE TABLE IF NOT EXISTS teams (
            team_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            short_name TEXT NULL
        );
        CREATE TABLE IF NOT EXISTS team_seasons (
            team_id INTEGER NOT NULL,
            season_id INTEGER NOT NULL,
            PRIMARY KEY (team_id, season_id)
        );
        CREATE TABLE IF NOT EXISTS matches (
            match_id INTEGER PRIMARY KEY,
            season_id INTEGER NOT NULL,
            match_date TEXT NOT NULL,
            status TEXT NOT NULL,
            home_team_id INTEGER NOT NULL,
            away_team_id INTEGER NOT NULL,
            home_score INTEGER NULL,
            away_score INTEGER NULL,
            penalty_home_score INTEGER NULL,
            penalty_away_score INTEGER NULL,
            home_coach_id INTEGER NULL,
            away_coach_id INTEGER NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_matches_season ON matches(season_id);
        CREATE INDEX IF NOT EXISTS idx_matches_date ON matches(match_date);
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}

pub fn import(conn: &mut Connection, file: &ImportFile) -> Result<ImportSummary> {
    let tx = conn.transaction().context("begin import transaction")?;
    let mut summary = ImportSummary::default();

    for season in &file.seasons {
        upsert_season(&tx, season)?;
        summary.seasons_upserted += 1;
    }
    for team in &file.teams {
        upsert_team(
            &tx,
            team.team_id,
            &TeamInfo {
                name: team.name.clone(),
                short_name: team.short_name.clone(),
            },
        )?;
        summary.teams_upserted += 1;
        for season_id in &team.seasons {
            link_team_season(&tx, team.team_id, *season_id)?;
            summary.team_seasons_linked += 1;
        }
    }
    for m in &file.matches {
        m.validate()
            .with_context(|| format!("reject match {}", m.match_id))?;
        upsert_match(&tx, m)?;
        summary.matches_upserted += 1;
    }

    tx.commit().context("commit import transaction")?;
    info!(
        seasons = summary.seasons_upserted,
        teams = summary.teams_upserted,
        matches = summary.matches_upserted,
        "import complete"
    );
    Ok(summary)
}

pub fn upsert_matches(conn: &mut Connection, matches: &[MatchRecord]) -> Result<usize> {
    let tx = conn.transaction().context("begin match transaction")?;
    for m in matches {
        m.validate()
            .with_context(|| format!("reject match {}", m.match_id))?;
        upsert_match(&tx, m)?;
    }
    tx.commit().context("commit match transaction")?;
    Ok(matches.len())
}

pub fn upsert_season(conn: &Connection, season: &Season) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO seasons (season_id, name, year) VALUES (?1, ?2, ?3)
        ON CONFLICT(season_id) DO UPDATE SET name = excluded.name, year = excluded.year
        "#,
        params![i64::from(season.season_id), season.name, season.year],
    )
    .context("upsert season")?;
    Ok(())
}

pub fn upsert_team(conn: &Connection, team_id: u32, info: &TeamInfo) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO teams (team_id, name, short_name) VALUES (?1, ?2, ?3)
        ON CONFLICT(team_id) DO UPDATE SET name = excluded.name, short_name = excluded.short_name
        "#,
        params![i64::from(team_id), info.name, info.short_name],
    )
    .context("upsert team")?;
    Ok(())
}

pub fn link_team_season(conn: &Connection, team_id: u32, season_id: u32) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO team_seasons (team_id, season_id) VALUES (?1, ?2)",
        params![i64::from(team_id), i64::from(season_id)],
    )
    .context("link team season")?;
    Ok(())
}

fn upsert_match(conn: &Connection, m: &MatchRecord) -> Result<()> {
    let match_id = i64::try_from(m.match_id).context("match id out of sqlite range")?;
    conn.execute(
        r#"
        INSERT INTO matches (
            match_id, season_id, match_date, status,
            home_team_id, away_team_id, home_score, away_score,
            penalty_home_score, penalty_away_score, home_coach_id, away_coach_id,
            updated_at
        ) VALUES (
            ?1, ?2, ?3, ?4,
            ?5, ?6, ?7, ?8,
            ?9, ?10, ?11, ?12,
            ?13
        )
        ON CONFLICT(match_id) DO UPDATE SET
            season_id = excluded.season_id,
            match_date = excluded.match_date,
            status = excluded.status,
            home_team_id = excluded.home_team_id,
            away_team_id = excluded.away_team_id,
            home_score = excluded.home_score,
            away_score = excluded.away_score,
            penalty_home_score = excluded.penalty_home_score,
            penalty_away_score = excluded.penalty_away_score,
            home_coach_id = excluded.home_coach_id,
            away_coach_id = excluded.away_coach_id,
            updated_at = excluded.updated_at
        "#,
        params![
            match_id,
            i64::from(m.season_id),
            m.match_date.to_rfc3339(),
            m.status.as_str(),
            i64::from(m.home_team_id),
            i64::from(m.away_team_id),
            m.home_score,
            m.away_score,
            m.penalty_home_score,
            m.penalty_away_score,
            m.home_coach_id.map(i64::from),
            m.away_coach_id.map(i64::from),
            Utc::now().to_rfc3339(),
        ],
    )
    .context("upsert match")?;
    Ok(())
}

const MATCH_COLUMNS: &str = r#"
    match_id, season_id, match_date, status,
    home_team_id, away_team_id, home_score, away_score,
    penalty_home_score, penalty_away_score, home_coach_id, away_coach_id
"#;

// Raw row as stored; status and date are decoded afterwards so bad text
// surfaces as a load error instead of a rusqlite conversion failure.
struct MatchRow {
    match_id: u64,
    season_id: u32,
    match_date: String,
    status: String,
    home_team_id: u32,
    away_team_id: u32,
    home_score: Option<i32>,
    away_score: Option<i32>,
    penalty_home_score: Option<i32>,
    penalty_away_score: Option<i32>,
    home_coach_id: Option<u32>,
    away_coach_id: Option<u32>,
}

impl MatchRow {
    fn from_sql(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            match_id: row.get::<_, u64>(0)?,
            season_id: row.get::<_, u32>(1)?,
            match_date: row.get(2)?,
            status: row.get(3)?,
            home_team_id: row.get::<_, u32>(4)?,
            away_team_id: row.get::<_, u32>(5)?,
            home_score: row.get(6)?,
            away_score: row.get(7)?,
            penalty_home_score: row.get(8)?,
            penalty_away_score: row.get(9)?,
            home_coach_id: row.get(10)?,
            away_coach_id: row.get(11)?,
        })
    }

    fn into_record(self) -> Result<MatchRecord> {
        let status = self
            .status
            .parse::<MatchStatus>()
            .with_context(|| format!("match {} status", self.match_id))?;
        let match_date = DateTime::parse_from_rfc3339(&self.match_date)
            .with_context(|| format!("match {} date {:?}", self.match_id, self.match_date))?
            .with_timezone(&Utc);
        Ok(MatchRecord {
            match_id: self.match_id,
            season_id: self.season_id,
            match_date,
            status,
            home_team_id: self.home_team_id,
            away_team_id: self.away_team_id,
            home_score: self.home_score,
            away_score: self.away_score,
            penalty_home_score: self.penalty_home_score,
            penalty_away_score: self.penalty_away_score,
            home_coach_id: self.home_coach_id,
            away_coach_id: self.away_coach_id,
        })
    }
}

pub fn load_season_matches(conn: &Connection, season_id: u32) -> Result<Vec<MatchRecord>> {
    let sql = format!(
        "SELECT {MATCH_COLUMNS} FROM matches WHERE season_id = ?1 ORDER BY match_date ASC, match_id ASC"
    );
    let mut stmt = conn.prepare(&sql).context("prepare season matches query")?;
    let rows = stmt
        .query_map(params![i64::from(season_id)], MatchRow::from_sql)
        .context("query season matches")?;
    collect_matches(rows)
}

pub fn load_all_matches(conn: &Connection) -> Result<Vec<MatchRecord>> {
    let sql = format!("SELECT {MATCH_COLUMNS} FROM matches ORDER BY match_date ASC, match_id ASC");
    let mut stmt = conn.prepare(&sql).context("prepare all matches query")?;
    let rows = stmt
        .query_map([], MatchRow::from_sql)
        .context("query all matches")?;
    collect_matches(rows)
}

fn collect_matches(
    rows: impl Iterator<Item = rusqlite::Result<MatchRow>>,
) -> Result<Vec<MatchRecord>> {
    let mut out = Vec::new();
    for row in rows {
        let row = row.context("decode match row")?;
        out.push(row.into_record()?);
    }
    Ok(out)
}

pub fn load_team_directory(conn: &Connection) -> Result<TeamDirectory> {
    let mut stmt = conn
        .prepare("SELECT team_id, name, short_name FROM teams")
        .context("prepare teams query")?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, u32>(0)?,
                TeamInfo {
                    name: row.get(1)?,
                    short_name: row.get(2)?,
                },
            ))
        })
        .context("query teams")?;

    let mut dir = TeamDirectory::new();
    for row in rows {
        let (team_id, info) = row.context("decode team row")?;
        dir.insert_info(team_id, info);
    }
    Ok(dir)
}

pub fn load_season(conn: &Connection, season_id: u32) -> Result<Option<Season>> {
    conn.query_row(
        "SELECT season_id, name, year FROM seasons WHERE season_id = ?1",
        params![i64::from(season_id)],
        |row| {
            Ok(Season {
                season_id: row.get::<_, u32>(0)?,
                name: row.get(1)?,
                year: row.get(2)?,
            })
        },
    )
    .optional()
    .context("query season")
}

pub fn load_seasons(conn: &Connection) -> Result<Vec<Season>> {
    let mut stmt = conn
        .prepare("SELECT season_id, name, year FROM seasons ORDER BY season_id ASC")
        .context("prepare seasons query")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Season {
                season_id: row.get::<_, u32>(0)?,
                name: row.get(1)?,
                year: row.get(2)?,
            })
        })
        .context("query seasons")?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.context("decode season row")?);
    }
    Ok(out)
}

pub fn count_team_seasons(conn: &Connection, season_id: u32) -> Result<u32> {
    conn.query_row(
        "SELECT COUNT(*) FROM team_seasons WHERE season_id = ?1",
        params![i64::from(season_id)],
        |row| row.get::<_, u32>(0),
    )
    .context("count team seasons")
}
