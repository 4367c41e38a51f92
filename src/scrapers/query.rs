//! Builds the listing-search URL from a set of filters.
//!
//! The remote service does not care about parameter order, but the builder
//! sorts keys lexicographically so the produced URL is stable for caching
//! and for tests.

use std::fmt::Display;

use serde_json::json;
use url::Url;

use super::types::SearchParams;

/// Encode `params` onto the listing endpoint, producing a fully qualified
/// search URL. Filters that are unset are omitted entirely.
pub fn build_listing_query(endpoint: &Url, params: &SearchParams) -> Url {
    let mut pairs: Vec<(&str, String)> = Vec::new();

    if let Some(enterprise) = params.enterprise {
        pairs.push(("enterprise", flag(enterprise)));
    }
    if let Some(projects) = join_codes(&params.projects) {
        pairs.push(("projects", projects));
    }
    if let Some(types) = join_codes(&params.types) {
        pairs.push(("types", types));
    }
    if let Some(natures) = join_codes(&params.natures) {
        pairs.push(("natures", natures));
    }
    if !params.insee_codes.is_empty() {
        pairs.push(("places", places(&params.insee_codes)));
    }
    if let Some(price) = range(params.min_price, params.max_price) {
        pairs.push(("price", price));
    }
    if let Some(surface) = range(params.min_surface, params.max_surface) {
        pairs.push(("surface", surface));
    }
    if let Some(ground) = range(params.min_ground_surface, params.max_ground_surface) {
        pairs.push(("groundsurface", ground));
    }
    if let Some(proximities) = join_codes(&params.proximities) {
        pairs.push(("proximities", proximities));
    }
    if let Some(rooms) = params.rooms {
        pairs.push(("rooms", rooms.to_string()));
    }
    if let Some(bedrooms) = params.bedrooms {
        pairs.push(("bedrooms", bedrooms.to_string()));
    }
    if let Some(commodities) = params.mandatory_commodities {
        pairs.push(("mandatorycommodities", flag(commodities)));
    }
    if let Some(version) = &params.qs_version {
        pairs.push(("qsVersion", version.clone()));
    }
    if let Some(mode) = params.mode {
        pairs.push(("m", mode.as_str().to_string()));
    }
    if let Some(page) = params.page {
        pairs.push(("page", page.to_string()));
    }

    pairs.sort_by_key(|(key, _)| *key);

    let mut url = endpoint.clone();
    url.set_query(None);
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    url
}

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

/// Comma-joined code list, or `None` when there is nothing to encode.
fn join_codes<T: Display>(codes: &[T]) -> Option<String> {
    if codes.is_empty() {
        return None;
    }
    Some(
        codes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// Slash-delimited range; an unset min encodes as empty (unbounded).
fn range<T: Display>(min: Option<T>, max: Option<T>) -> Option<String> {
    if min.is_none() && max.is_none() {
        return None;
    }
    let part = |v: Option<T>| v.map(|v| v.to_string()).unwrap_or_default();
    Some(format!("{}/{}", part(min), part(max)))
}

/// The site's `places` filter is a JSON array of location objects.
fn places(insee_codes: &[u32]) -> String {
    json!([{ "inseeCodes": insee_codes }]).to_string()
}
