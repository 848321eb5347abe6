use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use league_table::cli_args;
use league_table::config::{self, StatsConfig};
use league_table::match_store::{self, ImportFile};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    config::init_tracing();
    let cfg = StatsConfig::from_env();

    let args = cli_args::collect();
    let input = cli_args::leading_positional(&args)
        .map(PathBuf::from)
        .context("usage: import_matches <matches.json> [--db PATH]")?;
    let db_path = cli_args::path_arg(&args, "--db")
        .or(cfg.db_path)
        .context("unable to resolve sqlite path")?;

    let raw = fs::read_to_string(&input)
        .with_context(|| format!("read import file {}", input.display()))?;
    let file: ImportFile = serde_json::from_str(&raw)
        .with_context(|| format!("parse import file {}", input.display()))?;

    let mut conn = match_store::open_db(&db_path)?;
    let summary = match_store::import(&mut conn, &file)?;

    println!("Import complete");
    println!("DB: {}", db_path.display());
    println!("Seasons upserted: {}", summary.seasons_upserted);
    println!(
        "Teams upserted: {} ({} season links)",
        summary.teams_upserted, summary.team_seasons_linked
    );
    println!("Matches upserted: {}", summary.matches_upserted);
    Ok(())
}
