use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use chrono::{Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use league_table::form::recent_form;
use league_table::head_to_head::{EntityRole, head_to_head};
use league_table::standings::{TeamDirectory, build_all_standings, build_standings};
use league_table::{MatchRecord, MatchStatus};

const TEAMS: u32 = 20;
const SEASONS: u32 = 10;

// Double round robin per season, rotating kickoffs one day apart.
fn synthetic_matches() -> Vec<MatchRecord> {
    let mut rng = StdRng::seed_from_u64(7);
    let start = Utc
        .with_ymd_and_hms(2015, 8, 1, 15, 0, 0)
        .single()
        .expect("valid start date");
    let mut out = Vec::new();
    let mut match_id = 0u64;
    for season_id in 0..SEASONS {
        for home in 1..=TEAMS {
            for away in 1..=TEAMS {
                if home == away {
                    continue;
                }
                match_id += 1;
                let hs = rng.gen_range(0..5);
                let aws = rng.gen_range(0..5);
                let shootout = hs == aws && rng.gen_bool(0.1);
                out.push(MatchRecord {
                    match_id,
                    season_id,
                    match_date: start + Duration::days(match_id as i64 % 300 + 365 * season_id as i64),
                    status: MatchStatus::Completed,
                    home_team_id: home,
                    away_team_id: away,
                    home_score: Some(hs),
                    away_score: Some(aws),
                    penalty_home_score: shootout.then(|| rng.gen_range(3..6)),
                    penalty_away_score: shootout.then_some(2),
                    home_coach_id: Some(100 + home),
                    away_coach_id: Some(100 + away),
                });
            }
        }
    }
    out
}

fn directory() -> TeamDirectory {
    (1..=TEAMS).map(|id| (id, format!("Club {id:02}"))).collect()
}

fn bench_standings(c: &mut Criterion) {
    let matches = synthetic_matches();
    let teams = directory();
    c.bench_function("standings_single_season", |b| {
        b.iter(|| {
            let rows = build_standings(black_box(3), black_box(&matches), &teams).unwrap();
            black_box(rows.len());
        })
    });
    c.bench_function("standings_all_seasons", |b| {
        b.iter(|| {
            let tables = build_all_standings(black_box(&matches), &teams).unwrap();
            black_box(tables.len());
        })
    });
}

fn bench_form_and_h2h(c: &mut Criterion) {
    let matches = synthetic_matches();
    let as_of = Utc::now();
    c.bench_function("recent_form", |b| {
        b.iter(|| {
            let form = recent_form(black_box(4), &matches, as_of, 5).unwrap();
            black_box(form.len());
        })
    });
    c.bench_function("head_to_head_coaches", |b| {
        b.iter(|| {
            let h2h = head_to_head(black_box(101), black_box(102), &matches, EntityRole::HeadCoach)
                .unwrap();
            black_box(h2h.total());
        })
    });
}

criterion_group!(benches, bench_standings, bench_form_and_h2h);
criterion_main!(benches);
