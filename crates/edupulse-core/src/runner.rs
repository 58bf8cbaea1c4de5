//! Concurrent scraper execution with per-job failure isolation.
//!
//! One scraper failing - by error, panic, or timeout - must never keep
//! a sibling from running or from being recorded. Every job therefore
//! produces exactly one [`ExtractionResult`], persisted the moment that
//! job completes rather than at the end of the batch.

use std::sync::Arc;
use std::time::{
    Duration,
    Instant,
};

use edupulse_scraper_api::{
    ExtractionResult,
    Scraper,
    ScraperConfig,
};
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::storage::Store;

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub max_concurrency: usize,
    pub job_timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 5,
            job_timeout: Duration::from_secs(300),
        }
    }
}

/// A ready-to-run unit: a discovered scraper plus its merged config.
/// The config may differ from the scraper's code-declared one after the
/// persisted override is applied.
#[derive(Clone)]
pub struct ScraperJob {
    pub scraper: Arc<dyn Scraper>,
    pub config: ScraperConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunFailure {
    pub source_id: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub success_rate: f64,
    pub total_applicants: u64,
    pub errors: Vec<RunFailure>,
}

pub struct ScraperRunner {
    store: Arc<dyn Store>,
    config: RunnerConfig,
}

impl ScraperRunner {
    pub fn new(store: Arc<dyn Store>, config: RunnerConfig) -> Self {
        tracing::info!(
            max_concurrency = config.max_concurrency,
            job_timeout_s = config.job_timeout.as_secs(),
            "ScraperRunner initialized"
        );
        Self { store, config }
    }

    /// Run every job under the bounded pool and return all results in
    /// completion order.
    pub async fn run_all(&self, jobs: Vec<ScraperJob>) -> Vec<ExtractionResult> {
        if jobs.is_empty() {
            tracing::warn!("No scrapers provided to run");
            return Vec::new();
        }

        let started = Instant::now();
        let total = jobs.len();
        tracing::info!(jobs = total, "Starting batch execution");

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));
        let mut join_set = JoinSet::new();

        for job in jobs {
            let semaphore = Arc::clone(&semaphore);
            let store = Arc::clone(&self.store);
            let job_timeout = self.config.job_timeout;
            join_set.spawn(async move { run_job(job, semaphore, store, job_timeout).await });
        }

        let mut results = Vec::with_capacity(total);
        let mut completed = 0;

        while let Some(joined) = join_set.join_next().await {
            completed += 1;
            match joined {
                Ok(result) => {
                    tracing::info!(
                        completed,
                        total,
                        source_id = %result.source_id,
                        "Job completed"
                    );
                    results.push(result);
                }
                Err(e) => {
                    // Second isolation layer: even a failure while
                    // collecting a job's outcome becomes a recorded
                    // error result instead of aborting the batch.
                    tracing::error!(error = %e, "Job collection failed");
                    let result = ExtractionResult::failure_message(
                        "unknown".to_string(),
                        "Unknown scraper".to_string(),
                        format!("job collection failed: {e}"),
                        Duration::ZERO,
                    );
                    if !self.store.save_result(&result).await {
                        tracing::error!("Failed to save collection-failure result");
                    }
                    results.push(result);
                }
            }
        }

        let summary = Self::summarize(&results);
        tracing::info!(
            total = summary.total,
            successful = summary.successful,
            failed = summary.failed,
            success_rate = %format!("{:.1}%", summary.success_rate),
            elapsed_s = %format!("{:.2}", started.elapsed().as_secs_f64()),
            "Batch execution complete"
        );

        results
    }

    pub fn summarize(results: &[ExtractionResult]) -> RunSummary {
        let total = results.len();
        let successful = results.iter().filter(|r| r.is_success()).count();
        let failed = total - successful;
        let success_rate = if total == 0 {
            0.0
        } else {
            successful as f64 / total as f64 * 100.0
        };

        let total_applicants = results
            .iter()
            .filter_map(|r| r.count)
            .map(u64::from)
            .sum();

        let errors = results
            .iter()
            .filter(|r| !r.is_success())
            .map(|r| RunFailure {
                source_id: r.source_id.clone(),
                error: r
                    .error
                    .clone()
                    .unwrap_or_else(|| "unknown error".to_string()),
            })
            .collect();

        RunSummary {
            total,
            successful,
            failed,
            success_rate,
            total_applicants,
            errors,
        }
    }
}

/// Execute one job in complete isolation and persist its outcome.
async fn run_job(
    job: ScraperJob, semaphore: Arc<Semaphore>, store: Arc<dyn Store>, job_timeout: Duration,
) -> ExtractionResult {
    let permit = semaphore.acquire_owned().await;
    if permit.is_err() {
        tracing::error!("Worker semaphore closed, running unbounded");
    }

    let started = Instant::now();
    let source_id = job.config.source_id.clone();
    tracing::info!(source_id = %source_id, "Starting scraper");

    // The scrape runs on its own task so a panic is caught at this
    // join boundary instead of tearing down the runner.
    let scraper = Arc::clone(&job.scraper);
    let scrape = tokio::spawn(async move { scraper.scrape().await });
    let abort = scrape.abort_handle();

    let result = match tokio::time::timeout(job_timeout, scrape).await {
        Ok(Ok(Ok(count))) => {
            tracing::info!(
                source_id = %source_id,
                count,
                elapsed_s = %format!("{:.2}", started.elapsed().as_secs_f64()),
                "Scraper succeeded"
            );
            ExtractionResult::success(&job.config, count, started.elapsed())
        }
        Ok(Ok(Err(e))) => {
            tracing::error!(source_id = %source_id, error = %e, "Scraper failed");
            ExtractionResult::failure(&job.config, &e, started.elapsed())
        }
        Ok(Err(join_error)) => {
            let message = panic_message(join_error);
            tracing::error!(source_id = %source_id, error = %message, "Scraper crashed");
            ExtractionResult::failure_message(
                job.config.source_id.clone(),
                job.config.display_name.clone(),
                format!("critical failure: {message}"),
                started.elapsed(),
            )
        }
        Err(_) => {
            abort.abort();
            tracing::error!(
                source_id = %source_id,
                timeout_s = job_timeout.as_secs(),
                "Scraper timed out"
            );
            ExtractionResult::failure_message(
                job.config.source_id.clone(),
                job.config.display_name.clone(),
                format!("scrape timed out after {}s", job_timeout.as_secs()),
                started.elapsed(),
            )
        }
    };

    if !store.save_result(&result).await {
        tracing::error!(source_id = %result.source_id, "Failed to save result");
    }

    result
}

fn panic_message(error: tokio::task::JoinError) -> String {
    if error.is_panic() {
        match error.into_panic().downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_string(),
                Err(_) => "scraper panicked".to_string(),
            },
        }
    } else {
        error.to_string()
    }
}
