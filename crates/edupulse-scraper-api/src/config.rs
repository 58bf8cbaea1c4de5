use serde::{
    Deserialize,
    Serialize,
};

/// Describes one extraction job: which program at which institution,
/// and where to fetch it from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Stable identifier, e.g. "mephi_cybersecurity". Derived
    /// deterministically from institution + program name so historical
    /// rows keep matching across runs.
    pub source_id: String,
    /// Human-readable "Institution - Program" string.
    pub display_name: String,
    /// Institution key, e.g. "HSE".
    pub institution: String,
    /// Program name as published by the institution.
    pub program_name: String,
    /// Page or file to fetch; absent when the extractor has a single
    /// shared document for all programs.
    pub url: Option<String>,
    /// Code-declared default; the persisted configuration wins at merge.
    pub enabled: bool,
}

impl ScraperConfig {
    pub fn new(
        source_id: impl Into<String>, display_name: impl Into<String>,
        institution: impl Into<String>, program_name: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            display_name: display_name.into(),
            institution: institution.into(),
            program_name: program_name.into(),
            url: None,
            enabled: true,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}
