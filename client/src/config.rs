//! Client configuration.
//!
//! | Variable | Default |
//! |---|---|
//! | `RATINGS_URL` | `http://127.0.0.1:8000` |
//! | `RATINGS_TIMEOUT_SECS` | `10` |

use crate::error::ClientError;
use reqwest::Url;
use std::env;
use std::time::Duration;

pub const DEFAULT_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let raw_url = get("RATINGS_URL").unwrap_or_else(|| DEFAULT_URL.to_string());
        let base_url = parse_base_url(raw_url.trim())?;

        let timeout = match get("RATINGS_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(value.trim().parse().map_err(|_| {
                ClientError::InvalidInput {
                    name: "RATINGS_TIMEOUT_SECS",
                    expected: "a number of seconds",
                    value,
                }
            })?),
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self { base_url, timeout })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw).map_err(|_| ClientError::InvalidBaseUrl(raw.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ClientError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn reads_url_and_timeout() {
        let config = ClientConfig::from_lookup(|name| match name {
            "RATINGS_URL" => Some("https://ratings.example.com/v1".to_string()),
            "RATINGS_TIMEOUT_SECS" => Some("3".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base_url.as_str(), "https://ratings.example.com/v1");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn rejects_non_http_urls() {
        for raw in ["ftp://example.com", "mailto:someone@example.com", "not a url"] {
            let err = ClientConfig::from_lookup(|name| {
                (name == "RATINGS_URL").then(|| raw.to_string())
            })
            .unwrap_err();
            assert!(matches!(err, ClientError::InvalidBaseUrl(_)), "{raw}");
        }
    }
}
