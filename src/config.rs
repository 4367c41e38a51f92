use std::env;

use anyhow::Context;

/// Runtime configuration for the binary, read from the environment.
pub struct Config {
    pub email: String,
    pub password: String,
    /// Dump full requests and responses to the log. Off unless explicitly
    /// enabled: dumps contain the credentials.
    pub trace: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            email: env::var("SELOGER_EMAIL").context("SELOGER_EMAIL not set")?,
            password: env::var("SELOGER_PASSWORD").context("SELOGER_PASSWORD not set")?,
            trace: env::var("SELOGER_TRACE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }
}
