//! Extracting the applicant count from a MIPT application-list page.
//!
//! The row-marker class is not stable across program pages, and some of
//! the candidate classes also appear on decorative or header rows. A
//! candidate qualifies only when its first row leads with a purely
//! numeric cell; the last qualifying row's number is the count.

use edupulse_scraper_api::{
    ScraperError,
    ScraperResult,
};
use scraper::{
    Html,
    Selector,
};

/// Row classes observed across MIPT application lists, in the order
/// they should be tried.
pub const CANDIDATE_ROW_CLASSES: [&str; 4] = ["R18", "R11", "R19", "R0"];

/// Counts above this are logged as suspicious but still accepted.
pub const SANITY_CEILING: u32 = 10_000;

pub fn parse_ranking(html: &str) -> ScraperResult<u32> {
    let document = Html::parse_document(html);
    let cell_selector = Selector::parse("td, th").expect("static selector");

    for class in CANDIDATE_ROW_CLASSES {
        let Ok(row_selector) = Selector::parse(&format!("tr.{class}")) else {
            continue;
        };

        let rows: Vec<_> = document.select(&row_selector).collect();
        let Some(first_row) = rows.first() else {
            continue;
        };

        let first_cell: String = first_row
            .select(&cell_selector)
            .next()
            .map(|cell| cell.text().collect())
            .unwrap_or_default();
        if !is_numeric(first_cell.trim()) {
            tracing::debug!(class, "Candidate rows do not lead with a number, skipping");
            continue;
        }

        tracing::info!(rows = rows.len(), class, "Found application rows");

        let last_row = rows.last().ok_or(ScraperError::NoRankingRows)?;
        let position_cell = last_row
            .select(&cell_selector)
            .next()
            .ok_or(ScraperError::PositionCellMissing)?;

        let text: String = position_cell.text().collect();
        let text = text.trim();

        let position: i64 = text
            .parse()
            .map_err(|_| ScraperError::InvalidCount(text.to_string()))?;

        if position < 0 {
            tracing::warn!(position, "Negative row number value");
            return Err(ScraperError::InvalidCount(text.to_string()));
        }

        let count = position as u32;
        if count > SANITY_CEILING {
            tracing::warn!(count, "Suspiciously high applicant count");
        }
        if rows.len() as u32 != count {
            tracing::warn!(
                rows = rows.len(),
                claimed = count,
                "Row count disagrees with last number; page may be reordered or paginated"
            );
        }

        return Ok(count);
    }

    tracing::warn!("No application rows found under any candidate class");
    Err(ScraperError::NoRankingRows)
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}
