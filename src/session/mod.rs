// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Login Session
//!
//! In-process representation of the connector's login: an optional
//! [`TokenSource`] plus the [`Env`] describing which licensing service to
//! talk to.
//!
//! ## Locking
//!
//! Every read or write of the session goes through one async mutex. Login,
//! logout and license retrieval all take it, so a license fetch never sees a
//! token source that is being swapped out underneath it.

pub mod token;

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

pub use token::{AccessToken, StaticTokenSource, TokenError, TokenSource};

/// Environment the session is logged into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Env {
    /// Domain of the login and licensing service (host, optionally `:port`).
    pub login_domain: String,
}

impl Env {
    pub fn new(login_domain: impl Into<String>) -> Self {
        Self {
            login_domain: login_domain.into(),
        }
    }
}

/// Session state guarded by the session mutex.
///
/// Invariant: `token_source` is `Some` iff a login is active.
pub struct SessionState {
    token_source: Option<Arc<dyn TokenSource>>,
    env: Env,
}

impl SessionState {
    pub fn token_source(&self) -> Option<&Arc<dyn TokenSource>> {
        self.token_source.as_ref()
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn is_logged_in(&self) -> bool {
        self.token_source.is_some()
    }
}

/// Shared handle to the login session.
#[derive(Clone)]
pub struct Session {
    state: Arc<Mutex<SessionState>>,
}

impl Session {
    /// Create a logged-out session for `env`.
    pub fn new(env: Env) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState {
                token_source: None,
                env,
            })),
        }
    }

    /// Acquire the session lock.
    ///
    /// Waiting is not cancellable; it lasts as long as the current holder
    /// keeps the lock.
    pub async fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().await
    }

    /// Install `token_source` as the active login, replacing any previous one.
    pub async fn login(&self, token_source: Arc<dyn TokenSource>) {
        let mut state = self.state.lock().await;
        state.token_source = Some(token_source);
        info!(domain = %state.env.login_domain, "Session logged in");
    }

    /// Drop the active login. Returns `false` if there was none.
    pub async fn logout(&self) -> bool {
        let mut state = self.state.lock().await;
        let was_logged_in = state.token_source.take().is_some();
        if was_logged_in {
            info!(domain = %state.env.login_domain, "Session logged out");
        }
        was_logged_in
    }

    pub async fn is_logged_in(&self) -> bool {
        self.state.lock().await.is_logged_in()
    }

    /// Snapshot of the session environment.
    pub async fn env(&self) -> Env {
        self.state.lock().await.env.clone()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
