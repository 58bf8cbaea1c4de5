use std::time::Duration;

/// Which scrapers a run should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Discovered scrapers intersected with the persisted enable flags.
    Enabled,
    /// Every discovered scraper, ignoring persisted configuration.
    /// Diagnostics only.
    All,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Enabled => "enabled",
            RunMode::All => "all",
        }
    }
}

impl std::str::FromStr for RunMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "all" => RunMode::All,
            _ => RunMode::Enabled,
        })
    }
}

/// Process configuration, read once by the entry point.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub mode: RunMode,
    pub max_concurrency: usize,
    pub job_timeout: Duration,
    /// Batch passes when `success_rate >= success_threshold` (percent).
    pub success_threshold: f64,
    /// Insert missing config rows for discovered scrapers at startup.
    pub seed_configs: bool,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let mode = std::env::var("SCRAPER_MODE")
            .unwrap_or_else(|_| "enabled".to_string())
            .parse()
            .unwrap_or(RunMode::Enabled);

        let max_concurrency = std::env::var("EDUPULSE_MAX_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let job_timeout_secs = std::env::var("EDUPULSE_JOB_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300);

        let success_threshold = std::env::var("EDUPULSE_SUCCESS_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(70.0);

        let seed_configs = std::env::var("EDUPULSE_SEED_CONFIGS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            database_url,
            mode,
            max_concurrency,
            job_timeout: Duration::from_secs(job_timeout_secs),
            success_threshold,
            seed_configs,
        })
    }
}
