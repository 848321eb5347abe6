use std::env;
use std::path::PathBuf;

use crate::form::DEFAULT_FORM_WINDOW;

const CACHE_DIR: &str = "league_table";
const DB_FILE: &str = "matches.sqlite";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsConfig {
    pub db_path: Option<PathBuf>,
    pub form_window: usize,
    pub threads: Option<usize>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            form_window: DEFAULT_FORM_WINDOW,
            threads: None,
        }
    }
}

impl StatsConfig {
    pub fn from_env() -> Self {
        let db_path = opt_env("LEAGUE_TABLE_DB")
            .map(PathBuf::from)
            .or_else(default_db_path);
        let form_window = env::var("FORM_WINDOW")
            .ok()
            .and_then(|val| val.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_FORM_WINDOW)
            .clamp(1, 20);
        let threads = env::var("LEAGUE_TABLE_THREADS")
            .ok()
            .and_then(|val| val.trim().parse::<usize>().ok())
            .map(|n| n.clamp(1, 64));
        Self {
            db_path,
            form_window,
            threads,
        }
    }

    pub fn build_pool(&self) -> Option<rayon::ThreadPool> {
        let threads = self.threads?;
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .ok()
    }
}

pub fn with_pool<T>(pool: &Option<rayon::ThreadPool>, action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    if let Some(pool) = pool.as_ref() {
        pool.install(action)
    } else {
        action()
    }
}

pub fn app_cache_dir() -> Option<PathBuf> {
    // Prefer XDG cache.
    if let Some(base) = opt_env("XDG_CACHE_HOME") {
        return Some(PathBuf::from(base).join(CACHE_DIR));
    }
    let home = opt_env("HOME")?;
    Some(PathBuf::from(home).join(".cache").join(CACHE_DIR))
}

pub fn default_db_path() -> Option<PathBuf> {
    app_cache_dir().map(|dir| dir.join(DB_FILE))
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .and_then(|val| if val.trim().is_empty() { None } else { Some(val) })
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
