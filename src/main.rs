use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::{Duration, Utc};
use rusqlite::Connection;
use serde::Serialize;
use tracing::info;

use league_table::cli_args;
use league_table::config::{self, StatsConfig, with_pool};
use league_table::form::{self, FormEntry};
use league_table::head_to_head::{self, EntityRole, HeadToHeadRecord};
use league_table::match_store;
use league_table::season_summary::{self, SeasonSummary};
use league_table::standings::{self, StandingRow, TeamDirectory};
use league_table::standings_export;
use league_table::team_record::{self, TeamRecordSummary};

const USAGE: &str = "usage: league_table <seasons|table|summary|form|h2h|team|export> \
[--db PATH] [--season ID] [--team ID] [--a ID --b ID] [--coach] [--window N] [--out PATH] [--json]";

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    config::init_tracing();
    let cfg = StatsConfig::from_env();

    let args = cli_args::collect();
    let Some(command) = args.first().cloned() else {
        println!("{USAGE}");
        return Ok(());
    };

    let db_path = cli_args::path_arg(&args, "--db")
        .or_else(|| cfg.db_path.clone())
        .context("unable to resolve sqlite path")?;
    let conn = match_store::open_db(&db_path)?;
    let pool = cfg.build_pool();
    let json = cli_args::has_flag(&args, "--json");

    match command.as_str() {
        "seasons" => cmd_seasons(&conn, json),
        "table" => {
            let season_id = require_u32_arg(&args, "--season")?;
            let matches = match_store::load_season_matches(&conn, season_id)?;
            let teams = match_store::load_team_directory(&conn)?;
            let rows = with_pool(&pool, || {
                standings::build_standings_with_window(
                    season_id,
                    &matches,
                    &teams,
                    cfg.form_window,
                )
            })?;
            print_table(&rows, json)
        }
        "summary" => {
            let season_id = require_u32_arg(&args, "--season")?;
            let summary = season_summary_for(&conn, season_id)?;
            print_summary(&summary, json)
        }
        "form" => {
            let team_id = require_u32_arg(&args, "--team")?;
            let window = cli_args::u32_arg(&args, "--window")
                .map(|n| n as usize)
                .unwrap_or(cfg.form_window);
            let matches = match_store::load_all_matches(&conn)?;
            // Strictly-before semantics: nudge past now so today's results count.
            let as_of = Utc::now() + Duration::seconds(1);
            let entries = form::recent_form(team_id, &matches, as_of, window)?;
            let teams = match_store::load_team_directory(&conn)?;
            print_form(team_id, &entries, &teams, json)
        }
        "h2h" => {
            let a = require_u32_arg(&args, "--a")?;
            let b = require_u32_arg(&args, "--b")?;
            let role = if cli_args::has_flag(&args, "--coach") {
                EntityRole::HeadCoach
            } else {
                EntityRole::Team
            };
            let matches = match_store::load_all_matches(&conn)?;
            let record = head_to_head::head_to_head(a, b, &matches, role)?;
            let teams = match_store::load_team_directory(&conn)?;
            print_head_to_head(&record, &teams, json)
        }
        "team" => {
            let team_id = require_u32_arg(&args, "--team")?;
            let matches = match cli_args::u32_arg(&args, "--season") {
                Some(season_id) => match_store::load_season_matches(&conn, season_id)?,
                None => match_store::load_all_matches(&conn)?,
            };
            let record = team_record::accumulate(team_id, &matches)?;
            let teams = match_store::load_team_directory(&conn)?;
            print_team(team_id, &record.summary(), &teams, json)
        }
        "export" => {
            let out = cli_args::path_arg(&args, "--out")
                .unwrap_or_else(|| PathBuf::from("standings.xlsx"));
            let matches = match_store::load_all_matches(&conn)?;
            let teams = match_store::load_team_directory(&conn)?;
            let tables = with_pool(&pool, || {
                standings::build_all_standings_with_window(&matches, &teams, cfg.form_window)
            })?;
            let mut summaries = Vec::with_capacity(tables.len());
            for season_id in tables.keys() {
                summaries.push(season_summary_for(&conn, *season_id)?);
            }
            let report = standings_export::export_standings(&out, &tables, &summaries)?;
            info!(
                tables = report.tables,
                rows = report.rows,
                path = %out.display(),
                "exported standings"
            );
            println!("Wrote {} tables ({} rows) to {}", report.tables, report.rows, out.display());
            Ok(())
        }
        other => Err(anyhow!("unknown command {other:?}\n{USAGE}")),
    }
}

fn season_summary_for(conn: &Connection, season_id: u32) -> Result<SeasonSummary> {
    let matches = match_store::load_season_matches(conn, season_id)?;
    let team_seasons = match_store::count_team_seasons(conn, season_id)?;
    let summary = season_summary::summarize(season_id, &matches, team_seasons)?;
    Ok(match match_store::load_season(conn, season_id)? {
        Some(season) => summary.labelled(season.name, season.year),
        None => summary,
    })
}

fn cmd_seasons(conn: &Connection, json: bool) -> Result<()> {
    let seasons = match_store::load_seasons(conn)?;
    if json {
        return print_json(&seasons);
    }
    if seasons.is_empty() {
        println!("No seasons stored.");
    }
    for season in seasons {
        let year = season.year.map(|y| y.to_string()).unwrap_or_default();
        println!("{:>6}  {:<32} {}", season.season_id, season.name, year);
    }
    Ok(())
}

fn print_table(rows: &[StandingRow], json: bool) -> Result<()> {
    if json {
        return print_json(&rows);
    }
    println!(
        "{:>3}  {:<28} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>5} {:>4}  Form",
        "Pos", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
    );
    for row in rows {
        let r = &row.record;
        let name = if row.team_name.is_empty() {
            format!("#{}", r.team_id)
        } else {
            row.team_name.clone()
        };
        println!(
            "{:>3}  {:<28} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>+5} {:>4}  {}",
            row.position,
            name,
            r.matches_played,
            r.wins,
            r.draws,
            r.losses,
            r.goals_for,
            r.goals_against,
            r.goal_difference,
            r.points,
            row.form
        );
    }
    Ok(())
}

fn print_summary(summary: &SeasonSummary, json: bool) -> Result<()> {
    if json {
        return print_json(summary);
    }
    println!(
        "Season {} {}",
        summary.season_id,
        summary.season_name.as_deref().unwrap_or_default()
    );
    println!("Matches: {}", summary.total_matches);
    println!(
        "Completed: {} ({:.2}%)",
        summary.completed_matches, summary.completion_rate
    );
    println!("Decided on penalties: {}", summary.penalty_decided_matches);
    println!("Teams: {}", summary.participating_teams);
    Ok(())
}

fn print_form(team_id: u32, entries: &[FormEntry], teams: &TeamDirectory, json: bool) -> Result<()> {
    if json {
        return print_json(&entries);
    }
    println!("{} form: {}", team_label(teams, team_id), form::form_string(entries));
    for e in entries {
        println!(
            "  {}  {} {:<4} {:<28} {}-{}",
            e.match_date.format("%Y-%m-%d"),
            e.outcome.letter(),
            format!("{:?}", e.venue).to_lowercase(),
            team_label(teams, e.opponent_team_id),
            e.goals_for,
            e.goals_against
        );
    }
    Ok(())
}

fn print_head_to_head(record: &HeadToHeadRecord, teams: &TeamDirectory, json: bool) -> Result<()> {
    if json {
        return print_json(record);
    }
    let (a, b) = match record.role {
        EntityRole::Team => (
            team_label(teams, record.entity_a_id),
            team_label(teams, record.entity_b_id),
        ),
        EntityRole::HeadCoach => (
            format!("coach #{}", record.entity_a_id),
            format!("coach #{}", record.entity_b_id),
        ),
    };
    println!(
        "{a} {}-{}-{} {b}  (goals {}-{})",
        record.wins_a, record.draws, record.wins_b, record.goals_a, record.goals_b
    );
    for h in &record.matches {
        let m = &h.record;
        println!(
            "  {}  {:<28} {}-{} {:<28} [{}]",
            m.match_date.format("%Y-%m-%d"),
            team_label(teams, m.home_team_id),
            m.home_score.unwrap_or_default(),
            m.away_score.unwrap_or_default(),
            team_label(teams, m.away_team_id),
            h.outcome_a.letter()
        );
    }
    Ok(())
}

fn print_team(
    team_id: u32,
    summary: &TeamRecordSummary,
    teams: &TeamDirectory,
    json: bool,
) -> Result<()> {
    if json {
        let mut out = BTreeMap::new();
        out.insert("team_id", serde_json::json!(team_id));
        out.insert("record", serde_json::to_value(summary)?);
        return print_json(&out);
    }
    println!("{}", team_label(teams, team_id));
    println!(
        "P {}  W {}  D {}  L {}  GF {}  GA {}  GD {:+}  Pts {}  Win rate {}%",
        summary.matches,
        summary.wins,
        summary.draws,
        summary.losses,
        summary.goals_for,
        summary.goals_against,
        summary.goal_diff,
        summary.points,
        summary.win_rate
    );
    Ok(())
}

fn team_label(teams: &TeamDirectory, team_id: u32) -> String {
    match teams.get(team_id) {
        Some(info) if !info.name.is_empty() => info.name.clone(),
        _ => format!("#{team_id}"),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn require_u32_arg(args: &[String], name: &str) -> Result<u32> {
    cli_args::u32_arg(args, name).with_context(|| format!("missing or invalid {name}\n{USAGE}"))
}
