//! Authenticated retrieval client for SeLoger classifieds.
//!
//! Two-phase pipeline: exchange user credentials for a session token, then
//! query the listing endpoint and extract classified references from the
//! returned HTML.
//!
//! # Example
//!
//! ```rust,ignore
//! use seloger_scout::{SearchParams, SelogerScraper};
//! use tokio_util::sync::CancellationToken;
//!
//! let scraper = SelogerScraper::new()?;
//! let cancel = CancellationToken::new();
//!
//! let creds = scraper.connect("user@example.com", "secret", &cancel).await?;
//! let params = SearchParams {
//!     types: vec![1, 2],
//!     max_price: Some(800_000),
//!     ..Default::default()
//! };
//! for listing in scraper.get_listings(&creds, &params, &cancel).await? {
//!     println!("{}", listing.url);
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod scrapers;

pub use error::{Result, ScrapeError};
pub use models::{Credentials, Listing};
pub use scrapers::{ClassifiedSource, SearchMode, SearchParams, SelogerScraper, Transport};
