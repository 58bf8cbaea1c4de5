//! Extracting the applicant count from a MEPhI rating page.
//!
//! The page lists applicants as ranked table rows; positions are
//! appended in ascending order, so the last row's position number stands
//! in for the total applicant count.

use edupulse_scraper_api::{
    ScraperError,
    ScraperResult,
};
use scraper::{
    Html,
    Selector,
};

/// Every ranked applicant row carries this class.
pub const ROW_SELECTOR: &str = "tr.trPosBen";
/// The position number lives in this cell of the row.
pub const POSITION_SELECTOR: &str = "td.pos";

/// Counts above this are logged as suspicious but still accepted.
pub const SANITY_CEILING: u32 = 50_000;

pub fn parse_ranking(html: &str) -> ScraperResult<u32> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse(ROW_SELECTOR).expect("static selector");
    let position_selector = Selector::parse(POSITION_SELECTOR).expect("static selector");

    let rows: Vec<_> = document.select(&row_selector).collect();
    let Some(last_row) = rows.last() else {
        tracing::warn!("No ranked rows found in rating page");
        return Err(ScraperError::NoRankingRows);
    };

    tracing::debug!(rows = rows.len(), "Found ranked rows");

    let position_cell = last_row
        .select(&position_selector)
        .next()
        .ok_or(ScraperError::PositionCellMissing)?;

    let text: String = position_cell.text().collect();
    let text = text.trim();

    let position: i64 = text
        .parse()
        .map_err(|_| ScraperError::InvalidCount(text.to_string()))?;

    if position < 0 {
        tracing::warn!(position, "Negative position value");
        return Err(ScraperError::InvalidCount(text.to_string()));
    }

    let count = position as u32;
    if count > SANITY_CEILING {
        tracing::warn!(count, "Suspiciously high position value");
    }
    if rows.len() as u32 != count {
        tracing::warn!(
            rows = rows.len(),
            claimed = count,
            "Row count disagrees with last position; page may be reordered or paginated"
        );
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating_page(positions: &[&str]) -> String {
        let rows: String = positions
            .iter()
            .map(|p| {
                format!(
                    "<tr class=\"trPosBen\"><td class=\"pos\">{p}</td><td>Иванов И.И.</td></tr>"
                )
            })
            .collect();
        format!("<html><body><table>{rows}</table></body></html>")
    }

    #[test]
    fn test_last_position_is_the_count() {
        let positions: Vec<String> = (1..=42).map(|p| p.to_string()).collect();
        let positions: Vec<&str> = positions.iter().map(String::as_str).collect();

        assert_eq!(parse_ranking(&rating_page(&positions)).unwrap(), 42);
    }

    #[test]
    fn test_no_rows_is_an_error() {
        let html = "<html><body><table><tr><td>header</td></tr></table></body></html>";
        assert!(matches!(
            parse_ranking(html),
            Err(ScraperError::NoRankingRows)
        ));
    }

    #[test]
    fn test_missing_position_cell_is_an_error() {
        let html = "<html><body><table>\
             <tr class=\"trPosBen\"><td>Иванов И.И.</td></tr>\
             </table></body></html>";
        assert!(matches!(
            parse_ranking(html),
            Err(ScraperError::PositionCellMissing)
        ));
    }

    #[test]
    fn test_negative_position_is_rejected() {
        assert!(matches!(
            parse_ranking(&rating_page(&["1", "2", "-3"])),
            Err(ScraperError::InvalidCount(_))
        ));
    }

    #[test]
    fn test_non_numeric_position_is_rejected() {
        assert!(matches!(
            parse_ranking(&rating_page(&["1", "два"])),
            Err(ScraperError::InvalidCount(_))
        ));
    }
}
