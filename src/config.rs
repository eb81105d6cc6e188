use std::env;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::error::{Error, Result};
use crate::fusionsolar::{DEFAULT_HOST, DEFAULT_STATION_DN};

pub static COOKIE_ENV: &str = "FUSIONSOLAR_COOKIE";

#[derive(Debug, Parser)]
#[command(
    name = "energy-balance",
    about = "Download daily FusionSolar energy balance data as JSON"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory the YYYY-MM-DD.json files are written to
    #[arg(long, global = true, default_value = "output")]
    pub output_dir: PathBuf,

    /// Seconds to wait between days, zero or negative disables the wait
    #[arg(long, global = true, default_value_t = 2.0, allow_negative_numbers = true)]
    pub delay: f64,

    #[arg(long, global = true, env = "FUSIONSOLAR_STATION", default_value = DEFAULT_STATION_DN)]
    pub station: String,

    #[arg(long, global = true, env = "FUSIONSOLAR_HOST", default_value = DEFAULT_HOST)]
    pub host: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download every day from START to END (inclusive, defaults to START)
    Range { start: String, end: Option<String> },
    /// Download one day, given as YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS"
    Day { date: String },
}

impl Cli {
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay).unwrap_or(Duration::ZERO)
    }
}

/// Reads the session cookie from the environment. Call after `dotenv()`.
pub fn session_cookie() -> Result<String> {
    cookie_from(env::var(COOKIE_ENV).ok())
}

fn cookie_from(value: Option<String>) -> Result<String> {
    match value {
        Some(cookie) if !cookie.trim().is_empty() => Ok(cookie),
        _ => Err(Error::Config(format!(
            "set the {COOKIE_ENV} environment variable with your session cookie"
        ))),
    }
}
