//! SeLoger session acquisition and listing retrieval.

use std::sync::LazyLock;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::models::{Credentials, Listing};
use crate::scrapers::extract::extract_listings;
use crate::scrapers::query::build_listing_query;
use crate::scrapers::traits::ClassifiedSource;
use crate::scrapers::transport::{common_headers, Transport};
use crate::scrapers::types::SearchParams;

static CONNECT_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse(
        "https://myspace-slwcf.svc.groupe-seloger.com/AuthentificationService.svc/ConnecterUtilisateur",
    )
    .expect("connect endpoint constant parses")
});
static LISTING_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse("https://www.seloger.com/list.htm").expect("listing endpoint constant parses"));

/// Set-cookie names the login response is scanned for (exact match).
const TOKEN_COOKIE: &str = "Token";
const DATADOME_COOKIE: &str = "Datadome";

/// Cookie carrying the session token on authenticated listing requests.
const AUTH_COOKIE: &str = "ep-authorization";

/// SeLoger scraper: exchanges credentials for a session, then retrieves
/// classified listings for a set of search filters.
pub struct SelogerScraper {
    transport: Transport,
    connect_url: Url,
    listing_url: Url,
}

impl SelogerScraper {
    /// Create a scraper against the production endpoints, tracing off.
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(Transport::new(false)?))
    }

    pub fn with_transport(transport: Transport) -> Self {
        Self::with_endpoints(transport, CONNECT_URL.clone(), LISTING_URL.clone())
    }

    /// Point the scraper at alternative endpoints. Used by tests against a
    /// local mock server.
    pub fn with_endpoints(transport: Transport, connect_url: Url, listing_url: Url) -> Self {
        Self {
            transport,
            connect_url,
            listing_url,
        }
    }

    /// Exchange `user`/`password` for session credentials.
    ///
    /// The remote service is authoritative on credential validity; the only
    /// local check is non-emptiness. A 200 response without a `Token`
    /// set-cookie is still an authentication failure.
    pub async fn connect(
        &self,
        user: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> Result<Credentials> {
        if user.is_empty() || password.is_empty() {
            return Err(ScrapeError::InvalidCredentials);
        }

        info!("connecting to SeLoger authentication service");

        let body = json!({ "request": { "Email": user, "MotDePasse": password } });
        let request = self
            .transport
            .post(&self.connect_url)
            .headers(common_headers(&self.connect_url))
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .json(&body);

        let response = self.transport.send(request, cancel).await?;

        if !response.status.is_success() {
            warn!(status = %response.status, "authentication rejected");
            return Err(ScrapeError::Authentication {
                status: response.status.as_u16(),
                reason: response
                    .status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        let token = response.set_cookie(TOKEN_COOKIE).unwrap_or_default();
        let datadome = response.set_cookie(DATADOME_COOKIE).unwrap_or_default();

        if token.is_empty() {
            return Err(ScrapeError::Authentication {
                status: response.status.as_u16(),
                reason: "no auth cookie acquired".to_string(),
            });
        }

        info!("session acquired");
        Ok(Credentials { token, datadome })
    }

    /// Retrieve the classified listings matching `params`.
    ///
    /// Fails before any network call when the token is empty. No retry and
    /// no pagination loop happen here; callers compose repeated calls with
    /// an incremented `page` filter if they want more results.
    pub async fn get_listings(
        &self,
        credentials: &Credentials,
        params: &SearchParams,
        cancel: &CancellationToken,
    ) -> Result<Vec<Listing>> {
        if !credentials.is_valid() {
            return Err(ScrapeError::InvalidCredentials);
        }

        let url = build_listing_query(&self.listing_url, params);
        debug!(url = %url, "fetching listing page");

        let request = self
            .transport
            .get(&url)
            .headers(common_headers(&url))
            .header(COOKIE, format!("{AUTH_COOKIE}={}", credentials.token));

        let response = self.transport.send(request, cancel).await?;

        if !response.status.is_success() {
            warn!(status = %response.status, "listing retrieval rejected");
            return Err(ScrapeError::Retrieval {
                status: response.status.as_u16(),
                text: response
                    .status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        let listings = extract_listings(&response.body, &self.listing_url)?;
        info!(count = listings.len(), "retrieved listings");
        Ok(listings)
    }
}

#[async_trait]
impl ClassifiedSource for SelogerScraper {
    async fn connect(
        &self,
        user: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> Result<Credentials> {
        SelogerScraper::connect(self, user, password, cancel).await
    }

    async fn get_listings(
        &self,
        credentials: &Credentials,
        params: &SearchParams,
        cancel: &CancellationToken,
    ) -> Result<Vec<Listing>> {
        SelogerScraper::get_listings(self, credentials, params, cancel).await
    }

    fn source_name(&self) -> &'static str {
        "SeLoger"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_endpoints_parse() {
        assert_eq!(
            CONNECT_URL.host_str(),
            Some("myspace-slwcf.svc.groupe-seloger.com")
        );
        assert_eq!(
            CONNECT_URL.path(),
            "/AuthentificationService.svc/ConnecterUtilisateur"
        );
        assert_eq!(LISTING_URL.host_str(), Some("www.seloger.com"));
        assert_eq!(LISTING_URL.path(), "/list.htm");
    }
}
