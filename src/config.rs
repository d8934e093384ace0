use crate::Error;

use reqwest::Url;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8181";

/// Where the ranking API lives and how patient we are with it.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    /// `None` means requests may hang forever
    pub timeout: Option<Duration>,
}

impl Config {
    /// Reads `WIRA_API_URL` and `WIRA_API_TIMEOUT`, loading a `.env` file first if one exists.
    pub fn from_env() -> Result<Self, Error> {
        if let Err(e) = dotenv::dotenv() {
            if !e.not_found() {
                return Err(format!("Couldn't load .env file: {}", e).into());
            }
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let api_url = env_var_or(&lookup, "WIRA_API_URL", DEFAULT_API_URL)?;
        let timeout = optional_env_var::<humantime::Duration>(&lookup, "WIRA_API_TIMEOUT")?
            .map(Duration::from);

        Ok(Self { api_url, timeout })
    }
}

fn optional_env_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<Option<T>, Error>
where
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(value) => Ok(Some(
            value
                .parse()
                .map_err(|e| format!("Invalid {}: {}", name, e))?,
        )),
        None => Ok(None),
    }
}

fn env_var_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: &str,
) -> Result<T, Error>
where
    T::Err: std::fmt::Display,
{
    let value = lookup(name).unwrap_or_else(|| default.to_owned());
    Ok(value
        .parse()
        .map_err(|e| format!("Invalid {}: {}", name, e))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, Error> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_to_local_backend() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:8181/");
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn reads_url_and_timeout() {
        let config = load(&[
            ("WIRA_API_URL", "https://ranks.example.org/wira"),
            ("WIRA_API_TIMEOUT", "1m 30s"),
        ])
        .unwrap();
        assert_eq!(config.api_url.as_str(), "https://ranks.example.org/wira");
        assert_eq!(config.timeout, Some(Duration::from_secs(90)));
    }

    #[test]
    fn rejects_garbage() {
        let err = load(&[("WIRA_API_URL", "not a url")]).unwrap_err();
        assert!(err.to_string().starts_with("Invalid WIRA_API_URL"), "{}", err);

        let err = load(&[("WIRA_API_TIMEOUT", "soon")]).unwrap_err();
        assert!(err.to_string().starts_with("Invalid WIRA_API_TIMEOUT"), "{}", err);
    }
}
