use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session credentials acquired from the login exchange.
///
/// Immutable once built; safe to share across concurrent retrievals.
/// There is no automatic renewal: an expired token only shows up as a
/// failed subsequent request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Session/auth token. Must be non-empty for authenticated calls.
    pub token: String,
    /// Anti-bot (Datadome) cookie value. May be empty.
    pub datadome: String,
}

impl Credentials {
    pub fn is_valid(&self) -> bool {
        !self.token.is_empty()
    }
}

/// One classified reference extracted from a listing-search page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Listing identifier, e.g. "168670255".
    pub id: String,
    /// Canonical detail-page path, fragment- and query-free,
    /// e.g. "annonces/168670255.htm".
    pub path: String,
    /// Absolute detail-page URL.
    pub url: String,
    /// Raw anchor markup the listing was extracted from, kept for
    /// auditability and debugging.
    pub raw: String,
    pub scraped_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_invalid() {
        let creds = Credentials {
            token: String::new(),
            datadome: "dd".into(),
        };
        assert!(!creds.is_valid());

        let creds = Credentials {
            token: "abc".into(),
            datadome: String::new(),
        };
        assert!(creds.is_valid());
    }
}
