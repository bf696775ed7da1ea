use std::time::Duration;

use clap::Parser;
use railwatch_core::EngineOptions;
use reqwest::Url;

#[derive(Parser, Debug)]
#[command(
    name = "railwatch-server",
    version,
    about = "Live train positions and departure boards from a departures backend"
)]
pub struct Args {
    /// Base URL of the departures backend, including any path prefix
    #[arg(long, env = "RAILWATCH_BACKEND_URL", default_value = "http://127.0.0.1:5000")]
    pub backend_url: Url,

    /// Port to serve map frames on
    #[arg(short, long, env = "RAILWATCH_PORT", default_value = "8080")]
    pub port: u16,

    /// Include timetable-only departures on station boards
    #[arg(long, env = "RAILWATCH_SHOW_SCHEDULED")]
    pub show_scheduled: bool,

    /// Only draw vehicles whose next stop has a realtime estimate
    #[arg(long, env = "RAILWATCH_REQUIRE_LIVE_ESTIMATE")]
    pub require_live_estimate: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            show_scheduled: self.show_scheduled,
            require_live_estimate: self.require_live_estimate,
            ..EngineOptions::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error(
    "refresh period must be between {min} and {max} seconds, got {0}",
    min = RefreshPeriod::MIN_SECONDS,
    max = RefreshPeriod::MAX_SECONDS
)]
pub struct PeriodOutOfRange(pub u64);

/// How often the backend is polled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshPeriod(u64);

impl RefreshPeriod {
    pub const MIN_SECONDS: u64 = 15;
    pub const MAX_SECONDS: u64 = 600;
    pub const DEFAULT_SECONDS: u64 = 30;

    pub fn new(seconds: u64) -> Result<Self, PeriodOutOfRange> {
        if (Self::MIN_SECONDS..=Self::MAX_SECONDS).contains(&seconds) {
            Ok(Self(seconds))
        } else {
            Err(PeriodOutOfRange(seconds))
        }
    }

    pub fn clamped(seconds: u64) -> Self {
        Self(seconds.clamp(Self::MIN_SECONDS, Self::MAX_SECONDS))
    }

    pub fn seconds(self) -> u64 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl Default for RefreshPeriod {
    fn default() -> Self {
        Self(Self::DEFAULT_SECONDS)
    }
}
