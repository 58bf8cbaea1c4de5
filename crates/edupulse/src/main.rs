//! Cron entry point: discover scrapers, run the batch, apply the
//! success-rate threshold, then mirror results best-effort.

use std::sync::Arc;

use anyhow::Context;
use edupulse_core::{
    create_scraper_registry,
    load_jobs,
    RunnerConfig,
    ScraperRunner,
    Settings,
    SheetMirror,
    SheetsDisabled,
    Storage,
    Store,
};
use edupulse_scraper_api::{
    FetchClient,
    ScraperConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    edupulse_core::logging::init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "Environment validation failed");
            std::process::exit(1);
        }
    };

    tracing::info!(
        mode = settings.mode.as_str(),
        max_concurrency = settings.max_concurrency,
        success_threshold = settings.success_threshold,
        "Starting Edupulse scraping session"
    );

    let storage = Arc::new(
        Storage::connect(&settings.database_url)
            .await
            .context("failed to connect to storage")?,
    );
    storage
        .init_schema()
        .await
        .context("failed to initialize storage schema")?;

    let client = Arc::new(FetchClient::new()?);
    let registry = create_scraper_registry(client);

    if settings.seed_configs {
        let configs: Vec<ScraperConfig> = registry
            .all()
            .iter()
            .map(|scraper| scraper.config().clone())
            .collect();
        storage.seed_configs(&configs).await;
    }

    let jobs = load_jobs(&registry, storage.as_ref(), settings.mode).await;
    if jobs.is_empty() {
        tracing::error!(mode = settings.mode.as_str(), "No scrapers to run");
        std::process::exit(1);
    }

    let runner = ScraperRunner::new(
        Arc::clone(&storage) as Arc<dyn Store>,
        RunnerConfig {
            max_concurrency: settings.max_concurrency,
            job_timeout: settings.job_timeout,
        },
    );

    let results = runner.run_all(jobs).await;
    let summary = ScraperRunner::summarize(&results);

    for failure in &summary.errors {
        tracing::warn!(
            source_id = %failure.source_id,
            error = %failure.error,
            "Failed scraper"
        );
    }
    tracing::info!(
        total = summary.total,
        successful = summary.successful,
        failed = summary.failed,
        success_rate = %format!("{:.1}%", summary.success_rate),
        total_applicants = summary.total_applicants,
        "Scraping session finished"
    );

    let passed = summary.success_rate >= settings.success_threshold;

    // Mirroring is a side step; its failure never flips the exit code.
    sync_sheets_best_effort(&storage).await;

    if passed {
        tracing::info!("Session passed the success-rate threshold");
        Ok(())
    } else {
        tracing::error!(
            success_rate = %format!("{:.1}%", summary.success_rate),
            threshold = settings.success_threshold,
            "Session failed the success-rate threshold"
        );
        std::process::exit(1);
    }
}

async fn sync_sheets_best_effort(storage: &Arc<Storage>) {
    let mirror = SheetsDisabled;
    let today = chrono::Utc::now().date_naive();
    let results = storage.results_for_date(today).await;

    match mirror.sync_date(today, &results).await {
        Ok(ids) if !ids.is_empty() => {
            let marked = storage.mark_synced(&ids).await;
            tracing::info!(marked, "Sheet sync complete");
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(error = %e, "Sheet sync failed, scraping outcome unaffected");
        }
    }
}
