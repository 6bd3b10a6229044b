use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CDX_BASE_URL: &str = "http://index.commoncrawl.org";
pub const DEFAULT_CDX_INDEX_ID: &str = "CC-MAIN-2026-04-index";
pub const DEFAULT_CAPTURE_BASE_URL: &str = "https://commoncrawl.s3.amazonaws.com";

/// Limit to 30 websites per query.
pub const MAX_RESULTS: usize = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cdx_base_url: String,
    pub cdx_index_id: String,
    pub capture_base_url: String,
    pub max_results: usize,
    /// How many capture fetches may be in flight at once. 1 keeps the loop sequential.
    pub fetch_concurrency: usize,
    /// No timeout on outbound calls when `None`.
    pub upstream_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            cdx_base_url: DEFAULT_CDX_BASE_URL.to_string(),
            cdx_index_id: DEFAULT_CDX_INDEX_ID.to_string(),
            capture_base_url: DEFAULT_CAPTURE_BASE_URL.to_string(),
            max_results: MAX_RESULTS,
            fetch_concurrency: 1,
            upstream_timeout: None,
        }
    }
}

impl Config {
    /// Read configuration from the environment, loading `.env` first if present.
    pub fn from_env() -> Result<Config> {
        dotenv().ok();
        let defaults = Config::default();

        let upstream_timeout = match env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(raw) if !raw.trim().is_empty() => {
                let secs = parse_value::<u64>("UPSTREAM_TIMEOUT_SECS", &raw)?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        Ok(Config {
            port: get_parsed_or_default("PORT", defaults.port)?,
            cdx_base_url: trim_base(get_env_or_default("CDX_BASE_URL", DEFAULT_CDX_BASE_URL)),
            cdx_index_id: get_env_or_default("CDX_INDEX_ID", DEFAULT_CDX_INDEX_ID),
            capture_base_url: trim_base(get_env_or_default(
                "CAPTURE_BASE_URL",
                DEFAULT_CAPTURE_BASE_URL,
            )),
            max_results: get_parsed_or_default("MAX_RESULTS", defaults.max_results)?,
            fetch_concurrency: get_parsed_or_default("FETCH_CONCURRENCY", defaults.fetch_concurrency)?
                .max(1),
            upstream_timeout,
        })
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_parsed_or_default<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Invalid value for environment variable {key}: {raw:?}"))
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
