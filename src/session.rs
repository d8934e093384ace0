use crate::state::{Commit, Dashboard, DashboardState, RankingKind};

use serde_json::Value;
use tokio::sync::watch;

/// Plain field access to the dashboard, for views that bind to values directly instead of
/// going through the store's actions.
///
/// Ranking writes made here still go through [`Dashboard::replace_ranks`], so a
/// [`RankingsStore`](crate::RankingsStore) on the same dashboard sees them immediately.
#[derive(Debug, Clone)]
pub struct SessionState {
    dashboard: Dashboard,
}

impl SessionState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self { dashboard }
    }

    pub fn world_ranks(&self) -> Option<Value> {
        self.dashboard.ranks(RankingKind::World)
    }

    pub fn set_world_ranks(&self, payload: Value) -> Commit {
        self.dashboard.replace_ranks(RankingKind::World, payload)
    }

    pub fn local_ranks(&self) -> Option<Value> {
        self.dashboard.ranks(RankingKind::Local)
    }

    pub fn set_local_ranks(&self, payload: Value) -> Commit {
        self.dashboard.replace_ranks(RankingKind::Local, payload)
    }

    pub fn personal_ranks(&self) -> Option<Value> {
        self.dashboard.ranks(RankingKind::Personal)
    }

    pub fn set_personal_ranks(&self, payload: Value) -> Commit {
        self.dashboard.replace_ranks(RankingKind::Personal, payload)
    }

    pub fn is_login_page_disabled(&self) -> bool {
        self.dashboard.session().is_login_page_disabled
    }

    pub fn set_login_page_disabled(&self, disabled: bool) {
        self.dashboard
            .update_session(|session| session.is_login_page_disabled = disabled);
    }

    pub fn username(&self) -> String {
        self.dashboard.session().username
    }

    pub fn set_username(&self, username: impl Into<String>) {
        let username = username.into();
        self.dashboard
            .update_session(move |session| session.username = username);
    }

    pub fn is_logged_in(&self) -> bool {
        self.dashboard.session().is_logged_in
    }

    pub fn set_logged_in(&self, logged_in: bool) {
        self.dashboard
            .update_session(|session| session.is_logged_in = logged_in);
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.dashboard.subscribe()
    }
}
