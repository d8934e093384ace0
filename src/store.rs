//! Getters, mutations and fetch actions over the ranking fields

use crate::api::{FetchError, RankingsClient, RankingsQuery};
use crate::state::{Commit, Dashboard, RankingKind, Ticket};

use serde_json::Value;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct RankingsStore {
    dashboard: Dashboard,
    client: RankingsClient,
}

impl RankingsStore {
    pub fn new(dashboard: Dashboard, client: RankingsClient) -> Self {
        Self { dashboard, client }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn world_ranks(&self) -> Option<Value> {
        self.dashboard.ranks(RankingKind::World)
    }

    pub fn local_ranks(&self) -> Option<Value> {
        self.dashboard.ranks(RankingKind::Local)
    }

    pub fn personal_ranks(&self) -> Option<Value> {
        self.dashboard.ranks(RankingKind::Personal)
    }

    pub fn set_world_ranks(&self, payload: Value) -> Commit {
        self.dashboard.replace_ranks(RankingKind::World, payload)
    }

    pub fn set_local_ranks(&self, payload: Value) -> Commit {
        self.dashboard.replace_ranks(RankingKind::Local, payload)
    }

    pub fn set_personal_ranks(&self, payload: Value) -> Commit {
        self.dashboard.replace_ranks(RankingKind::Personal, payload)
    }

    pub async fn fetch_world_ranks(&self, page: u32) -> Result<Commit, FetchError> {
        self.fetch(RankingsQuery::World { page }).await
    }

    pub async fn fetch_local_ranks(&self, page: u32) -> Result<Commit, FetchError> {
        self.fetch(RankingsQuery::Local { page }).await
    }

    pub async fn fetch_personal_ranks(
        &self,
        username: impl Into<String>,
    ) -> Result<Commit, FetchError> {
        self.fetch(RankingsQuery::Personal {
            username: username.into(),
        })
        .await
    }

    /// Fetches `query` and commits the payload to its field.
    ///
    /// Failures are logged and returned, the field keeps its previous value. A response that
    /// arrives after the response of a later request for the same field is dropped and
    /// reported as [`Commit::Superseded`].
    pub async fn fetch(&self, query: RankingsQuery) -> Result<Commit, FetchError> {
        let ticket = self.dashboard.issue_ticket(query.kind());
        self.fetch_with_ticket(query, ticket).await
    }

    async fn fetch_with_ticket(
        &self,
        query: RankingsQuery,
        ticket: Ticket,
    ) -> Result<Commit, FetchError> {
        let kind = query.kind();
        log::debug!("Fetching {} for {}", kind, query);

        let payload = match self.client.fetch(&query).await {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("Error fetching {} for {}: {}", kind, query, e);
                return Err(e);
            }
        };

        let commit = self.dashboard.commit(kind, ticket, payload);
        match commit {
            Commit::Applied => log::info!("Updated {} with {}", kind, query),
            Commit::Superseded => {
                log::warn!("Dropped stale {} response for {}", kind, query)
            }
        }
        Ok(commit)
    }

    pub fn dispatch_world_ranks(&self, page: u32) -> JoinHandle<()> {
        self.dispatch(RankingsQuery::World { page })
    }

    pub fn dispatch_local_ranks(&self, page: u32) -> JoinHandle<()> {
        self.dispatch(RankingsQuery::Local { page })
    }

    pub fn dispatch_personal_ranks(&self, username: impl Into<String>) -> JoinHandle<()> {
        self.dispatch(RankingsQuery::Personal {
            username: username.into(),
        })
    }

    /// Fire-and-forget version of [`Self::fetch`]. The ticket is taken before returning, so
    /// dispatch order decides which response wins. Errors only end up in the log.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, query: RankingsQuery) -> JoinHandle<()> {
        let ticket = self.dashboard.issue_ticket(query.kind());
        let store = self.clone();
        tokio::spawn(async move {
            // already logged
            let _ = store.fetch_with_ticket(query, ticket).await;
        })
    }
}
