pub mod extract;
pub mod query;
pub mod seloger;
pub mod traits;
pub mod transport;
pub mod types;

pub use extract::extract_listings;
pub use query::build_listing_query;
pub use seloger::SelogerScraper;
pub use traits::ClassifiedSource;
pub use transport::Transport;
pub use types::{SearchMode, SearchParams};
