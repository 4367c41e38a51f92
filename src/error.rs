use thiserror::Error;

/// Errors surfaced by the SeLoger client.
///
/// Kinds are kept distinct so callers can tell transient failures
/// (`Transport`, `Retrieval`) from fatal ones (`Authentication`,
/// `InvalidCredentials`, `Extraction`) and from their own cancellation.
/// No retries happen inside the client; retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Network failure or deadline expiry on the wire.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The caller cancelled the in-flight operation.
    #[error("operation cancelled")]
    Cancelled,

    /// Login rejected, or the login response carried no usable session.
    #[error("authentication failed: status {status} [{reason}]")]
    Authentication { status: u16, reason: String },

    /// Local precondition failure: empty session token or empty login
    /// input. Never sent over the wire.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Non-2xx from the listing endpoint. May be transient (rate limiting).
    #[error("listing retrieval failed: status {status} [{text}]")]
    Retrieval { status: u16, text: String },

    /// The response document could not be parsed. Usually means the site
    /// markup changed and the extractor needs updating.
    #[error("extraction failed: {reason}")]
    Extraction { reason: String },
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

impl ScrapeError {
    /// Whether a caller may reasonably retry the same call.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ScrapeError::Transport(_) | ScrapeError::Retrieval { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_kinds() {
        let retrieval = ScrapeError::Retrieval {
            status: 429,
            text: "Too Many Requests".into(),
        };
        assert!(retrieval.is_retryable());
        assert!(!ScrapeError::InvalidCredentials.is_retryable());
        assert!(!ScrapeError::Cancelled.is_retryable());
    }

    #[test]
    fn messages_carry_status() {
        let err = ScrapeError::Authentication {
            status: 403,
            reason: "Forbidden".into(),
        };
        assert!(err.to_string().contains("403"));
    }
}
