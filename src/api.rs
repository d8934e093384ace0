use crate::{config::Config, state::RankingKind, Error};

use once_cell::sync::Lazy;
use reqwest::{header, StatusCode, Url};
use serde_json::Value;
use std::fmt;

/// Rows per page of the world and local leaderboards
pub const PAGE_SIZE: u32 = 10;
/// Rows requested around a single player's standing
pub const PERSONAL_COUNT: u32 = 8;

static USER_AGENT: Lazy<String> = Lazy::new(|| match option_env!("WIRA_RANKINGS_REV") {
    Some(rev) => format!("wira-rankings/{} ({})", env!("CARGO_PKG_VERSION"), rev),
    None => format!("wira-rankings/{}", env!("CARGO_PKG_VERSION")),
});

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("ranking API answered with {0}")]
    Status(StatusCode),
    #[error("response body is not JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankingsQuery {
    World { page: u32 },
    Local { page: u32 },
    Personal { username: String },
}

impl RankingsQuery {
    /// Which field a successful response for this query is written to
    pub fn kind(&self) -> RankingKind {
        match self {
            RankingsQuery::World { .. } => RankingKind::World,
            RankingsQuery::Local { .. } => RankingKind::Local,
            RankingsQuery::Personal { .. } => RankingKind::Personal,
        }
    }

    // World and local pages are indistinguishable on the wire, the backend has no region filter
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            RankingsQuery::World { page } | RankingsQuery::Local { page } => vec![
                ("count", PAGE_SIZE.to_string()),
                ("page", page.to_string()),
            ],
            RankingsQuery::Personal { username } => vec![
                ("username", username.clone()),
                ("count", PERSONAL_COUNT.to_string()),
            ],
        }
    }
}

impl fmt::Display for RankingsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingsQuery::World { page } | RankingsQuery::Local { page } => {
                write!(f, "page {}", page)
            }
            RankingsQuery::Personal { username } => write!(f, "user `{}`", username),
        }
    }
}

/// HTTP access to the `/api/rankings` endpoint
#[derive(Debug, Clone)]
pub struct RankingsClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl RankingsClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let mut http = reqwest::Client::builder().user_agent(USER_AGENT.as_str());
        if let Some(timeout) = config.timeout {
            http = http.timeout(timeout);
        }
        // mock backends listen on loopback
        #[cfg(test)]
        {
            http = http.no_proxy();
        }

        // Without the trailing slash `join` would replace the last path segment
        let mut base = config.api_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            http: http.build()?,
            endpoint: base.join("api/rankings")?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn build_request(&self, query: &RankingsQuery) -> Result<reqwest::Request, FetchError> {
        Ok(self
            .http
            .get(self.endpoint.clone())
            // meaningless on a GET, but the backend has always received it
            .header(header::CONTENT_TYPE, "application/json")
            .query(&query.query_pairs())
            .build()?)
    }

    /// Fetches one ranking payload. The body is decoded as JSON but otherwise left untouched.
    pub async fn fetch(&self, query: &RankingsQuery) -> Result<Value, FetchError> {
        let request = self.build_request(query)?;
        log::debug!("GET {}", request.url());

        let response = self.http.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
