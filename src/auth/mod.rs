//! Authentication signal.
//!
//! Sign-in itself is handled by an external provider. This module only
//! publishes its `{auth_state, is_loading}` pair as an observable value so
//! that stores can start their initial load when a session appears.

use std::sync::Arc;

use tokio::sync::watch;

/// The signed-in user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub role: Option<String>,
}

/// Snapshot of the auth provider's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub auth_state: Option<Session>,
    pub is_loading: bool,
}

impl AuthSnapshot {
    pub fn is_signed_in(&self) -> bool {
        self.auth_state.is_some()
    }

    /// Protected pages send the user to login only once loading has settled.
    pub fn requires_login(&self) -> bool {
        self.auth_state.is_none() && !self.is_loading
    }
}

impl Default for AuthSnapshot {
    fn default() -> Self {
        Self {
            auth_state: None,
            is_loading: true,
        }
    }
}

/// Observable auth state shared by everything that gates on a session.
#[derive(Clone)]
pub struct AuthSignal {
    tx: Arc<watch::Sender<AuthSnapshot>>,
}

impl AuthSignal {
    /// A signal that starts out loading, with no session.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthSnapshot::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> AuthSnapshot {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.tx.subscribe()
    }

    pub fn sign_in(&self, session: Session) {
        tracing::info!("Signed in as {}", session.username);
        self.tx.send_replace(AuthSnapshot {
            auth_state: Some(session),
            is_loading: false,
        });
    }

    pub fn sign_out(&self) {
        tracing::info!("Signed out");
        self.tx.send_replace(AuthSnapshot {
            auth_state: None,
            is_loading: false,
        });
    }
}

impl Default for AuthSignal {
    fn default() -> Self {
        Self::new()
    }
}
