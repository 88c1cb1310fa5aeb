use anyhow::Context;
use serde::Deserialize;

/// How the access gate treats inbound requests.
///
/// Only `Open` exists today; it is a placeholder until token validation
/// lands, at which point a verifying mode is added here and selected via
/// `ACCESS_POLICY` without touching call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    Open,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub access: AccessMode,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);
        let access = match std::env::var("ACCESS_POLICY")
            .unwrap_or_else(|_| "open".into())
            .as_str()
        {
            "open" => AccessMode::Open,
            other => anyhow::bail!("unknown ACCESS_POLICY {other:?}, only \"open\" is supported"),
        };
        Ok(Self {
            database_url,
            host,
            port,
            access,
        })
    }
}
