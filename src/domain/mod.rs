pub mod models;
pub mod stats;

pub use models::{Group, GroupResult, Match, Player};
pub use stats::{summarize_opponents, OpponentSummary};
