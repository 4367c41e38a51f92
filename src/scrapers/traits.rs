use crate::error::Result;
use crate::models::{Credentials, Listing};
use crate::scrapers::types::SearchParams;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Common trait for all classified sources
/// This allows easy addition of new sites (Leboncoin, PAP, etc) in the future
#[async_trait]
pub trait ClassifiedSource: Send + Sync {
    /// Exchange user credentials for a session
    async fn connect(
        &self,
        user: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> Result<Credentials>;

    /// Retrieve listings matching the given search filters
    async fn get_listings(
        &self,
        credentials: &Credentials,
        params: &SearchParams,
        cancel: &CancellationToken,
    ) -> Result<Vec<Listing>>;

    /// Get the name of the classified source
    fn source_name(&self) -> &'static str;
}
