//! Locating and sanitizing applicant counts inside the HSE export.
//!
//! The export's cell layout is addressed by fixed column indices; the
//! header search exists to confirm the format still looks like the one
//! those indices were derived from. If the admission office reorders
//! columns, both the header list and the indices here must be revisited.

use std::io::Cursor;

use calamine::{
    open_workbook_auto_from_rs,
    Data,
    Reader,
};
use edupulse_scraper_api::{
    ScraperError,
    ScraperResult,
};
use strsim::normalized_levenshtein;

use crate::programs::COUNT_HEADERS;

/// Program names live in the first column, counts in the seventh.
pub const PROGRAM_COL: usize = 0;
pub const COUNT_COL: usize = 6;

pub const HEADER_SIMILARITY_THRESHOLD: f64 = 0.80;
pub const PROGRAM_SIMILARITY_THRESHOLD: f64 = 0.70;

/// Cells at most this many characters long are skipped during fuzzy row
/// matching; short fragments produce false positives.
pub const MIN_FUZZY_CELL_CHARS: usize = 10;

/// First worksheet of the export, stringified: header row + data rows.
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, PartialEq)]
pub struct ProgramRow {
    pub index: usize,
    pub matched_text: String,
    /// Present when the row was located by fuzzy matching.
    pub similarity: Option<f64>,
}

pub fn parse_workbook(bytes: &[u8]) -> ScraperResult<Table> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| ScraperError::Parse(format!("failed to open workbook: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ScraperError::Parse("workbook has no sheets".to_string()))?
        .map_err(|e| ScraperError::Parse(format!("failed to read first sheet: {e}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_to_string).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(Table { headers, rows })
}

/// Find the applicant-count column: every known header exactly first,
/// then fuzzy similarity against each actual header.
pub fn find_count_column(headers: &[String]) -> Option<usize> {
    for known in COUNT_HEADERS {
        if let Some(idx) = headers.iter().position(|h| h == known) {
            tracing::info!(column = %known, "Found applicant-count column");
            return Some(idx);
        }
    }

    for known in COUNT_HEADERS {
        let known_lower = known.to_lowercase();
        for (idx, actual) in headers.iter().enumerate() {
            let similarity = normalized_levenshtein(&known_lower, &actual.to_lowercase());
            if similarity > HEADER_SIMILARITY_THRESHOLD {
                tracing::info!(
                    column = %actual,
                    similarity = %format!("{:.0}%", similarity * 100.0),
                    "Found applicant-count column via fuzzy match"
                );
                return Some(idx);
            }
        }
    }

    tracing::warn!(headers = ?headers, "Could not find applicant-count column");
    None
}

/// Find the row holding `program_name`: exact case-insensitive match on
/// the trimmed name cell first, then the best fuzzy match above the
/// threshold. Earlier rows win ties, so repeated runs over the same
/// bytes pick the same row.
pub fn find_program_row(table: &Table, program_name: &str) -> Option<ProgramRow> {
    if table.headers.len() <= COUNT_COL.max(PROGRAM_COL) {
        tracing::warn!(
            columns = table.headers.len(),
            "Export does not have enough columns"
        );
        return None;
    }

    let program_lower = program_name.to_lowercase();

    for (index, row) in table.rows.iter().enumerate() {
        let cell = row.get(PROGRAM_COL).map(|c| c.trim()).unwrap_or_default();
        if cell.is_empty() {
            continue;
        }
        if cell.to_lowercase() == program_lower {
            return Some(ProgramRow {
                index,
                matched_text: cell.to_string(),
                similarity: None,
            });
        }
    }

    let mut best: Option<ProgramRow> = None;
    let mut best_similarity = 0.0;

    for (index, row) in table.rows.iter().enumerate() {
        let cell = row.get(PROGRAM_COL).map(|c| c.trim()).unwrap_or_default();
        if cell.is_empty() || cell.chars().count() <= MIN_FUZZY_CELL_CHARS {
            continue;
        }

        let similarity = normalized_levenshtein(&program_lower, &cell.to_lowercase());
        if similarity > best_similarity && similarity > PROGRAM_SIMILARITY_THRESHOLD {
            best = Some(ProgramRow {
                index,
                matched_text: cell.to_string(),
                similarity: Some(similarity),
            });
            best_similarity = similarity;
        }
    }

    if let Some(ref found) = best {
        tracing::info!(
            program = %program_name,
            matched = %found.matched_text,
            similarity = %format!("{:.0}%", best_similarity * 100.0),
            "Found program row via fuzzy match"
        );
    } else {
        tracing::warn!(program = %program_name, "Program not found in export");
    }

    best
}

/// Coerce a raw count cell into a non-negative integer. An empty, NaN,
/// or unparsable cell degrades to 0 instead of failing the extraction:
/// the program row exists, the count is just momentarily unreadable.
pub fn sanitize_count(raw: &str) -> u32 {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return 0;
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value >= 0.0 && value.is_finite() => value as u32,
        Ok(value) => {
            tracing::warn!(value, "Count cell outside valid range, degrading to 0");
            0
        }
        Err(_) => {
            tracing::warn!(raw = %trimmed, "Unparsable count cell, degrading to 0");
            0
        }
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide_headers(count_header: &str) -> Vec<String> {
        let mut headers = vec!["Образовательная программа".to_string()];
        for i in 1..6 {
            headers.push(format!("Колонка {i}"));
        }
        headers.push(count_header.to_string());
        headers
    }

    fn wide_row(program: &str, count: &str) -> Vec<String> {
        let mut row = vec![program.to_string()];
        for _ in 1..6 {
            row.push(String::new());
        }
        row.push(count.to_string());
        row
    }

    #[test]
    fn test_exact_header_match() {
        let headers: Vec<String> = vec![
            "Образовательная программа".to_string(),
            "Количество заявлений".to_string(),
        ];
        assert_eq!(find_count_column(&headers), Some(1));
    }

    #[test]
    fn test_fuzzy_header_match_above_threshold() {
        // One inserted character, well above the 0.80 bar.
        let headers: Vec<String> = vec![
            "Образовательная программа".to_string(),
            "Колличество заявлений".to_string(),
        ];
        assert_eq!(find_count_column(&headers), Some(1));
    }

    #[test]
    fn test_unrelated_header_is_rejected() {
        let headers: Vec<String> = vec![
            "Образовательная программа".to_string(),
            "Средний балл ЕГЭ".to_string(),
        ];
        assert_eq!(find_count_column(&headers), None);
    }

    #[test]
    fn test_exact_program_row_is_case_insensitive() {
        let t = Table {
            headers: wide_headers("Количество заявлений"),
            rows: vec![
                wide_row("ОНЛАЙН Финансы", "12"),
                wide_row("онлайн кибербезопасность", "37"),
            ],
        };

        let found = find_program_row(&t, "ОНЛАЙН Кибербезопасность").unwrap();
        assert_eq!(found.index, 1);
        assert!(found.similarity.is_none());
    }

    #[test]
    fn test_fuzzy_program_row_with_suffix() {
        let t = Table {
            headers: wide_headers("Количество заявлений"),
            rows: vec![wide_row("ОНЛАЙН Кибербезопасность 2025", "37")],
        };

        let found = find_program_row(&t, "ОНЛАЙН Кибербезопасность").unwrap();
        assert_eq!(found.index, 0);
        assert!(found.similarity.unwrap() > PROGRAM_SIMILARITY_THRESHOLD);
    }

    #[test]
    fn test_short_cells_are_skipped_in_fuzzy_pass() {
        // "Информатик" is a 0.9 match for "Информатика" but only 10
        // characters long, so the fuzzy pass must not consider it.
        let t = Table {
            headers: wide_headers("Количество заявлений"),
            rows: vec![wide_row("Информатик", "99")],
        };

        assert_eq!(find_program_row(&t, "Информатика"), None);
    }

    #[test]
    fn test_fuzzy_tie_break_is_deterministic() {
        let t = Table {
            headers: wide_headers("Количество заявлений"),
            rows: vec![
                wide_row("ОНЛАЙН Кибербезопасность 2024/25", "1"),
                wide_row("ОНЛАЙН Кибербезопасность 2025", "2"),
                wide_row("ОНЛАЙН Кибербезопасность 2026", "3"),
            ],
        };

        // Rows 1 and 2 score identically; the first of the equals wins,
        // on every run.
        let first = find_program_row(&t, "ОНЛАЙН Кибербезопасность").unwrap();
        let second = find_program_row(&t, "ОНЛАЙН Кибербезопасность").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.index, 1);
    }

    #[test]
    fn test_missing_columns_yield_no_row() {
        let t = Table {
            headers: vec!["Программа".to_string(), "Заявления".to_string()],
            rows: vec![vec!["ОНЛАЙН Финансы".to_string(), "5".to_string()]],
        };
        assert_eq!(find_program_row(&t, "ОНЛАЙН Финансы"), None);
    }

    #[test]
    fn test_exact_header_and_row_yield_count() {
        let t = Table {
            headers: wide_headers("Количество заявлений"),
            rows: vec![
                wide_row("ОНЛАЙН Финансы", "37"),
                wide_row("ОНЛАЙН Инженерия данных", ""),
            ],
        };

        assert!(find_count_column(&t.headers).is_some());

        let row = find_program_row(&t, "ОНЛАЙН Финансы").unwrap();
        assert_eq!(sanitize_count(&t.rows[row.index][COUNT_COL]), 37);

        // Present row with an empty count cell still succeeds, as 0.
        let row = find_program_row(&t, "ОНЛАЙН Инженерия данных").unwrap();
        assert_eq!(sanitize_count(&t.rows[row.index][COUNT_COL]), 0);
    }

    #[test]
    fn test_sanitize_parses_integers_and_floats() {
        assert_eq!(sanitize_count("37"), 37);
        assert_eq!(sanitize_count(" 41 "), 41);
        assert_eq!(sanitize_count("37.0"), 37);
    }

    #[test]
    fn test_empty_count_cell_is_lenient_zero() {
        // Deliberate leniency: a present-but-unreadable count confirms
        // the program exists, so it reads as 0 rather than an error.
        assert_eq!(sanitize_count(""), 0);
        assert_eq!(sanitize_count("nan"), 0);
        assert_eq!(sanitize_count("н/д"), 0);
        assert_eq!(sanitize_count("-3"), 0);
    }
}
