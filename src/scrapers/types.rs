use serde::{Deserialize, Serialize};

/// Whether a search is an initial broad search or a narrowed follow-up.
/// The site distinguishes the two through the `m` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMode {
    Initial,
    Refined,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Initial => "search_hp_new",
            SearchMode::Refined => "search_refine",
        }
    }
}

/// Search filters for the listing endpoint.
///
/// Only filters that are set end up in the query string; an empty
/// `SearchParams` encodes to no filters at all. Values are immutable once
/// handed to the query builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    /// Restrict to (or exclude) professional sellers.
    pub enterprise: Option<bool>,
    /// Transaction-project codes (e.g. 2 = buy, 5 = build).
    pub projects: Vec<u16>,
    /// Property-type codes (e.g. 1 = apartment, 2 = house).
    pub types: Vec<u16>,
    /// Property-nature codes.
    pub natures: Vec<u16>,
    /// INSEE location codes, encoded as the site's JSON `places` array.
    pub insee_codes: Vec<u32>,
    /// Price range in euros; `None` min means unbounded.
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    /// Living surface range in square meters.
    pub min_surface: Option<u32>,
    pub max_surface: Option<u32>,
    /// Ground surface range in square meters.
    pub min_ground_surface: Option<u32>,
    pub max_ground_surface: Option<u32>,
    /// Proximity radii codes.
    pub proximities: Vec<u16>,
    /// Minimum number of rooms.
    pub rooms: Option<u8>,
    /// Minimum number of bedrooms.
    pub bedrooms: Option<u8>,
    pub mandatory_commodities: Option<bool>,
    /// Query-string format version understood by the site.
    pub qs_version: Option<String>,
    pub mode: Option<SearchMode>,
    /// Result page. Accepted for future extension; no pagination loop is
    /// performed by the client itself.
    pub page: Option<u32>,
}
