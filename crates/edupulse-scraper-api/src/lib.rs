pub mod config;
pub mod error;
pub mod fetch;
pub mod ident;
pub mod registry;
pub mod result;
pub mod scraper;

pub use config::ScraperConfig;
pub use error::{
    ScraperError,
    ScraperResult,
};
pub use fetch::{
    browser_headers,
    FetchClient,
    FetchConfig,
};
pub use registry::ScraperRegistry;
pub use result::{
    ExtractionResult,
    ExtractionStatus,
};
pub use scraper::Scraper;
