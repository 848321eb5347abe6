use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::season_summary::SeasonSummary;
use crate::standings::StandingRow;

pub struct ExportReport {
    pub tables: usize,
    pub rows: usize,
}

const TABLE_HEADER: [&str; 12] = [
    "Pos", "Team ID", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts", "Form",
];

const SUMMARY_HEADER: [&str; 8] = [
    "Season ID",
    "Season",
    "Year",
    "Matches",
    "Completed",
    "Penalty Matches",
    "Teams",
    "Completion %",
];

pub fn export_standings(
    path: &Path,
    tables: &BTreeMap<u32, Vec<StandingRow>>,
    summaries: &[SeasonSummary],
) -> Result<ExportReport> {
    let mut workbook = Workbook::new();
    let mut rows_written = 0usize;

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Seasons")?;
        let mut rows: Vec<Vec<String>> = vec![header_row(&SUMMARY_HEADER)];
        rows.extend(summaries.iter().map(summary_row));
        write_rows(sheet, &rows)?;
    }

    for (season_id, table) in tables {
        let name = sheet_name(*season_id, summaries);
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(&name)
            .with_context(|| format!("name worksheet {name:?}"))?;
        let mut rows: Vec<Vec<String>> = vec![header_row(&TABLE_HEADER)];
        rows.extend(table.iter().map(standing_row));
        rows_written += table.len();
        write_rows(sheet, &rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        tables: tables.len(),
        rows: rows_written,
    })
}

fn sheet_name(season_id: u32, summaries: &[SeasonSummary]) -> String {
    let label = summaries
        .iter()
        .find(|s| s.season_id == season_id)
        .and_then(|s| s.season_name.as_deref())
        .map(sanitize_sheet_name)
        .filter(|s| !s.is_empty());
    match label {
        Some(label) => format!("{season_id} {label}").chars().take(31).collect(),
        None => format!("Season {season_id}"),
    }
}

// Excel forbids these characters in worksheet names.
fn sanitize_sheet_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .collect::<String>()
        .trim()
        .to_string()
}

fn standing_row(row: &StandingRow) -> Vec<String> {
    let r = &row.record;
    vec![
        row.position.to_string(),
        r.team_id.to_string(),
        row.team_name.clone(),
        r.matches_played.to_string(),
        r.wins.to_string(),
        r.draws.to_string(),
        r.losses.to_string(),
        r.goals_for.to_string(),
        r.goals_against.to_string(),
        r.goal_difference.to_string(),
        r.points.to_string(),
        row.form.clone(),
    ]
}

fn summary_row(s: &SeasonSummary) -> Vec<String> {
    vec![
        s.season_id.to_string(),
        s.season_name.clone().unwrap_or_default(),
        opt_to_string(s.year),
        s.total_matches.to_string(),
        s.completed_matches.to_string(),
        s.penalty_decided_matches.to_string(),
        s.participating_teams.to_string(),
        format!("{:.2}", s.completion_rate),
    ]
}

fn header_row(header: &[&str]) -> Vec<String> {
    header.iter().map(|s| s.to_string()).collect()
}

fn opt_to_string<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
