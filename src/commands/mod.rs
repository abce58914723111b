//! Command implementations

pub mod config;
pub mod prompt;
pub mod score;
pub mod simple;

pub use config::GameConfig;
pub use score::{ScoreReport, score_guess};
pub use simple::{Console, run_simple};
