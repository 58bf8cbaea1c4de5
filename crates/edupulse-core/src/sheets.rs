//! Spreadsheet-mirror seam.
//!
//! The mirror consumes one day's stored results and reports which rows
//! it synced; identifier stability is the core's only obligation toward
//! it. Syncing is always best-effort: a mirror failure never changes a
//! scraping run's outcome.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::storage::StoredResult;

#[async_trait]
pub trait SheetMirror: Send + Sync {
    /// Mirror one day's results; returns the ids of the rows synced.
    async fn sync_date(
        &self, date: NaiveDate, results: &[StoredResult],
    ) -> anyhow::Result<Vec<i64>>;
}

/// Placeholder used when no spreadsheet backend is configured.
pub struct SheetsDisabled;

#[async_trait]
impl SheetMirror for SheetsDisabled {
    async fn sync_date(
        &self, date: NaiveDate, results: &[StoredResult],
    ) -> anyhow::Result<Vec<i64>> {
        tracing::info!(
            date = %date,
            results = results.len(),
            "Sheet mirror disabled, skipping sync"
        );
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_mirror_syncs_nothing() {
        let mirror = SheetsDisabled;
        let date = NaiveDate::from_ymd_opt(2025, 7, 22).unwrap();

        let synced = mirror.sync_date(date, &[]).await.unwrap();
        assert!(synced.is_empty());
    }
}
