//! Extracts classified references from a listing-search HTML page.
//!
//! The anchor-matching rule (`name` attribute containing `classified-link`)
//! is a deliberate coupling to the site's current markup; it lives only
//! here so a markup change touches one module.

use chrono::Utc;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::models::Listing;

/// The site marks listing anchors with an indexed name, e.g.
/// `classified-link-0`, hence the substring match.
const CLASSIFIED_LINK_SELECTOR: &str = r#"a[name*="classified-link"]"#;

/// Path prefix of the site's canonical detail pages.
const DETAIL_PREFIX: &str = "annonces";

/// Parse `body` and yield one `Listing` per well-formed classified anchor,
/// in document order.
///
/// Anchors missing an `href`, or whose `href` does not resolve against
/// `base`, are skipped: partial extraction is fine, not every anchor on the
/// page is guaranteed well-formed. Re-running on identical bytes yields an
/// identical sequence; no state is kept across calls.
pub fn extract_listings(body: &[u8], base: &Url) -> Result<Vec<Listing>> {
    let html = std::str::from_utf8(body).map_err(|e| ScrapeError::Extraction {
        reason: format!("response body is not valid UTF-8: {e}"),
    })?;

    let selector = Selector::parse(CLASSIFIED_LINK_SELECTOR).map_err(|e| {
        ScrapeError::Extraction {
            reason: format!("bad anchor selector: {e}"),
        }
    })?;

    let document = Html::parse_document(html);
    let mut listings = Vec::new();

    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            debug!("classified anchor without href, skipping");
            continue;
        };
        let Ok(mut detail) = base.join(href) else {
            debug!(href, "classified anchor with unparsable href, skipping");
            continue;
        };

        detail.set_fragment(None);
        detail.set_query(None);

        let Some(basename) = detail
            .path_segments()
            .and_then(|segments| segments.last())
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
        else {
            debug!(href, "classified anchor without a path basename, skipping");
            continue;
        };

        let id = basename.strip_suffix(".htm").unwrap_or(&basename).to_string();
        let path = format!("{DETAIL_PREFIX}/{basename}");
        let url = match base.join(&path) {
            Ok(url) => url.to_string(),
            Err(_) => continue,
        };

        listings.push(Listing {
            id,
            path,
            url,
            raw: anchor.html(),
            scraped_at: Utc::now(),
        });
    }

    debug!(count = listings.len(), "extracted classified anchors");
    Ok(listings)
}
