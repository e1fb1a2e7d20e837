//! Command line and environment configuration.

use clap::Parser;
use declension_core::{Selection, ValidationError};
use std::time::Duration;

/// Number of questions requested per batch unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 10;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "declension-trainer",
    version,
    about = "Drill Polish noun and adjective declension in the terminal"
)]
pub struct Args {
    /// Base URL of the question service
    #[arg(long, env = "DRILL_API_URL")]
    pub api_url: String,

    /// Cases to practise (repeat the flag or separate with commas)
    #[arg(long = "case", value_name = "CASE", env = "DRILL_CASES", value_delimiter = ',')]
    pub cases: Vec<String>,

    /// Numbers to practise: singular, plural
    #[arg(long = "number", value_name = "NUMBER", env = "DRILL_NUMBERS", value_delimiter = ',')]
    pub numbers: Vec<String>,

    /// Questions fetched per request
    #[arg(long, env = "DRILL_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Request timeout in seconds
    #[arg(long, env = "DRILL_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

impl Args {
    pub fn selection(&self) -> Result<Selection, ValidationError> {
        Selection::parse(&self.cases, &self.numbers)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
