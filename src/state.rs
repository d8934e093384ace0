//! The single owned state model behind every dashboard binding.
//!
//! [`RankingsStore`](crate::RankingsStore) and [`SessionState`](crate::SessionState) are both
//! thin handles over a [`Dashboard`], so whichever one a view binds to, it observes the same
//! writes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// The three ranking collections the dashboard shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankingKind {
    World,
    Local,
    Personal,
}

impl RankingKind {
    pub const ALL: [RankingKind; 3] = [
        RankingKind::World,
        RankingKind::Local,
        RankingKind::Personal,
    ];

    /// Name of the field as the views know it
    pub fn field_name(self) -> &'static str {
        match self {
            RankingKind::World => "WorldRanks",
            RankingKind::Local => "LocalRanks",
            RankingKind::Personal => "PersonalRanks",
        }
    }

    fn index(self) -> usize {
        match self {
            RankingKind::World => 0,
            RankingKind::Local => 1,
            RankingKind::Personal => 2,
        }
    }
}

impl fmt::Display for RankingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// What happened to a payload handed to [`Dashboard::commit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// The payload is now the field's value
    Applied,
    /// A newer request or mutation already wrote this field, the payload was dropped
    Superseded,
}

/// Orders writes to a single ranking field. Higher tickets win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Default, Serialize)]
pub struct RankingSlot {
    /// `None` until the first successful write
    pub payload: Option<Value>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    committed: u64,
}

/// Session flags the UI flips directly. Nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub is_login_page_disabled: bool,
    pub username: String,
    pub is_logged_in: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardState {
    pub world_ranks: RankingSlot,
    pub local_ranks: RankingSlot,
    pub personal_ranks: RankingSlot,
    pub session: Session,
}

impl DashboardState {
    pub fn slot(&self, kind: RankingKind) -> &RankingSlot {
        match kind {
            RankingKind::World => &self.world_ranks,
            RankingKind::Local => &self.local_ranks,
            RankingKind::Personal => &self.personal_ranks,
        }
    }

    fn slot_mut(&mut self, kind: RankingKind) -> &mut RankingSlot {
        match kind {
            RankingKind::World => &mut self.world_ranks,
            RankingKind::Local => &mut self.local_ranks,
            RankingKind::Personal => &mut self.personal_ranks,
        }
    }
}

struct Inner {
    state: watch::Sender<DashboardState>,
    tickets: [AtomicU64; 3],
}

/// Shared handle to the dashboard state. Clones point at the same state.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<Inner>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            inner: Arc::new(Inner {
                state,
                tickets: Default::default(),
            }),
        }
    }

    /// Reserves the next write position for `kind`. Must be taken before the request is sent,
    /// so that issue order decides which response survives.
    pub fn issue_ticket(&self, kind: RankingKind) -> Ticket {
        Ticket(self.inner.tickets[kind.index()].fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// The only write path for ranking payloads.
    pub fn commit(&self, kind: RankingKind, ticket: Ticket, payload: Value) -> Commit {
        let applied = self.inner.state.send_if_modified(move |state| {
            let slot = state.slot_mut(kind);
            if ticket.0 <= slot.committed {
                return false;
            }
            slot.payload = Some(payload);
            slot.updated_at = Some(Utc::now());
            slot.committed = ticket.0;
            true
        });

        if applied {
            Commit::Applied
        } else {
            Commit::Superseded
        }
    }

    /// Writes `payload` right away, superseding any request still in flight for `kind`
    pub fn replace_ranks(&self, kind: RankingKind, payload: Value) -> Commit {
        let ticket = self.issue_ticket(kind);
        self.commit(kind, ticket, payload)
    }

    pub fn ranks(&self, kind: RankingKind) -> Option<Value> {
        self.inner.state.borrow().slot(kind).payload.clone()
    }

    pub fn updated_at(&self, kind: RankingKind) -> Option<DateTime<Utc>> {
        self.inner.state.borrow().slot(kind).updated_at
    }

    pub fn session(&self) -> Session {
        self.inner.state.borrow().session.clone()
    }

    pub fn update_session(&self, modify: impl FnOnce(&mut Session)) {
        self.inner.state.send_modify(|state| modify(&mut state.session));
    }

    pub fn snapshot(&self) -> DashboardState {
        self.inner.state.borrow().clone()
    }

    /// Receiver that wakes up on every write to the dashboard
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.inner.state.subscribe()
    }
}
