//! The UserList component: state plus the requests it owns
//!
//! Requests run as tokio tasks. Their outcomes come back over a channel
//! and are applied one at a time by whoever drives the component, so the
//! state has a single mutator. Every task belongs to the component's
//! [`JoinSet`]; unmounting (or dropping) the component aborts whatever is
//! still in flight, and a completion can never reach a torn-down state.
//!
//! Dispatching a message that issues a request must happen inside a tokio
//! runtime.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::debug;

use crate::api::UserApi;
use crate::state::{Completion, CreateIdPolicy, Msg, Notice, Request, UserListState};

/// Perform one request against the collection
pub async fn run_request<A: UserApi + ?Sized>(api: &A, request: Request) -> Completion {
    match request {
        Request::Load => Completion::Loaded(api.list_users().await.map_err(|e| e.to_string())),
        Request::Create(staged) => {
            let result = api.create_user(&staged).await.map_err(|e| e.to_string());
            Completion::Created { staged, result }
        }
        Request::Update(staged) => {
            let result = api
                .update_user(&staged)
                .await
                .map(|_| ())
                .map_err(|e| e.to_string());
            Completion::Updated { staged, result }
        }
        Request::Delete(id) => {
            let result = api.delete_user(id).await.map_err(|e| e.to_string());
            Completion::Deleted { id, result }
        }
    }
}

/// A mounted-or-not UserList bound to a collection client
pub struct UserList<A: UserApi + ?Sized + 'static> {
    api: Arc<A>,
    state: UserListState,
    tasks: JoinSet<()>,
    in_flight: usize,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl<A: UserApi + ?Sized + 'static> std::fmt::Debug for UserList<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserList")
            .field("state", &self.state)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl<A: UserApi + 'static> UserList<A> {
    pub fn new(api: A, id_policy: CreateIdPolicy) -> Self {
        Self::with_shared(Arc::new(api), id_policy)
    }
}

impl<A: UserApi + ?Sized + 'static> UserList<A> {
    /// Build around an already shared client
    pub fn with_shared(api: Arc<A>, id_policy: CreateIdPolicy) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            state: UserListState::new(id_policy),
            tasks: JoinSet::new(),
            in_flight: 0,
            tx,
            rx,
        }
    }

    /// Read-only view of the state
    pub fn state(&self) -> &UserListState {
        &self.state
    }

    /// Dismiss the notice currently shown
    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.state.dismiss_notice()
    }

    /// Requests issued but not yet applied
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Start the collection load (first call only)
    pub fn mount(&mut self) -> bool {
        self.dispatch(Msg::Mount)
    }

    /// Apply a user intent; returns whether a request was issued
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        match self.state.update(msg) {
            Some(request) => {
                self.spawn(request);
                true
            }
            None => false,
        }
    }

    fn spawn(&mut self, request: Request) {
        debug!(?request, "issuing request");
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.in_flight += 1;
        self.tasks.spawn(async move {
            let completion = run_request(api.as_ref(), request).await;
            // Receiver gone means the component was torn down
            let _ = tx.send(completion);
        });
    }

    fn reap(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            self.joined(joined);
        }
    }

    fn joined(&mut self, joined: Result<(), JoinError>) {
        if let Err(err) = joined {
            if err.is_panic() {
                // A panicked task never sends its completion
                self.in_flight = self.in_flight.saturating_sub(1);
                tracing::error!("request task panicked: {err}");
            }
        }
    }

    /// Apply every completion that is already available, without waiting.
    /// Returns how many were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            self.finish(completion);
            applied += 1;
        }
        self.reap();
        applied
    }

    /// Wait for the next completion and apply it.
    /// Returns `false` immediately when nothing is in flight.
    pub async fn settle_next(&mut self) -> bool {
        self.reap();
        while self.in_flight > 0 {
            tokio::select! {
                biased;
                Some(completion) = self.rx.recv() => {
                    self.finish(completion);
                    self.reap();
                    return true;
                }
                // A task's completion is sent before it exits, so a clean
                // join leaves it waiting in the channel for the next turn
                Some(joined) = self.tasks.join_next() => self.joined(joined),
                else => break,
            }
        }
        false
    }

    /// Wait until every issued request has been applied
    pub async fn settle(&mut self) {
        while self.settle_next().await {}
    }

    fn finish(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.state.apply(completion);
    }

    /// Tear down, aborting outstanding requests. Returns how many were
    /// still running.
    pub fn unmount(mut self) -> usize {
        let outstanding = self.tasks.len();
        self.tasks.abort_all();
        if outstanding > 0 {
            debug!(outstanding, "aborted in-flight requests on unmount");
        }
        outstanding
    }
}
