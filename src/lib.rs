pub mod cli_args;
pub mod config;
pub mod error;
pub mod form;
pub mod head_to_head;
pub mod match_record;
pub mod match_store;
pub mod outcome;
pub mod season_summary;
pub mod standings;
pub mod standings_export;
pub mod team_record;

pub use error::{Result, StatsError};
pub use match_record::{MatchRecord, MatchStatus, Side};
pub use outcome::Outcome;
