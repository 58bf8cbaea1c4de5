//! Identifier derivation.
//!
//! `source_id` values are the natural key for historical data, so they
//! must be a pure function of institution + program name: re-running
//! discovery may never orphan old rows under a new identifier.

/// Lowercase and map separators to underscores. Keeps non-Latin letters
/// as-is; institutions with curated transliterations pass a table to
/// [`slug_with_table`] instead.
pub fn slugify(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Look a program name up in a fixed transliteration table, falling back
/// to [`slugify`] for names the table does not know.
pub fn slug_with_table(name: &str, table: &[(&str, &str)]) -> String {
    for (known, slug) in table {
        if *known == name {
            return (*slug).to_string();
        }
    }
    slugify(name)
}

pub fn source_id(prefix: &str, slug: &str) -> String {
    format!("{prefix}_{slug}")
}
