//! The signed-in user.
//!
//! [`SessionState`] wraps an [`AuthClient`] and keeps the current session in
//! a [`watch`] channel, so views can follow sign-in and sign-out without
//! asking the provider again.

use tokio::sync::watch;

use crate::auth::{AuthClient, AuthError, AuthOutcome, AuthUser, Session};

/// Last transition between signed out and signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
}

/// Point-in-time view of the session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub session: Option<Session>,
    pub user: Option<AuthUser>,
    /// A stored session is being checked with the provider.
    pub loading: bool,
    pub last_event: Option<AuthEvent>,
}

impl SessionSnapshot {
    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }
}

/// Holder of the current session, updated by every auth call made through it.
pub struct SessionState {
    auth: AuthClient,
    tx: watch::Sender<SessionSnapshot>,
}

impl SessionState {
    /// Start signed out.
    pub fn new(auth: AuthClient) -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::default());
        Self { auth, tx }
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// Check a previously stored session with the provider.
    ///
    /// A token the provider still accepts signs the user in; a rejected one
    /// leaves the state signed out. Transport failures are returned and
    /// change nothing but the loading flag.
    pub async fn restore(&self, session: Session) -> Result<Option<AuthUser>, AuthError> {
        self.tx.send_modify(|s| s.loading = true);
        let result = self.auth.get_user(&session.access_token).await;
        match result {
            Ok(Some(user)) => {
                tracing::info!(user_id = %user.id, "Session restored");
                self.tx.send_modify(|s| {
                    s.user = Some(user.clone());
                    s.session = Some(session);
                    s.loading = false;
                    s.last_event = Some(AuthEvent::SignedIn);
                });
                Ok(Some(user))
            }
            Ok(None) => {
                tracing::info!("Stored session is no longer valid");
                self.clear();
                Ok(None)
            }
            Err(e) => {
                self.tx.send_modify(|s| s.loading = false);
                Err(e)
            }
        }
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, AuthError> {
        let outcome = self.auth.sign_in_with_password(email, password).await?;
        self.apply(&outcome);
        Ok(outcome)
    }

    /// Register; signs in only when the provider issues a session right away.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        let outcome = self.auth.sign_up(email, password).await?;
        self.apply(&outcome);
        Ok(outcome)
    }

    /// Revoke the current session and sign out locally.
    ///
    /// The local state is cleared even when the provider rejects the call;
    /// its error is still returned.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.tx.borrow().session.clone() else {
            return Ok(());
        };
        let result = self.auth.sign_out(&session).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Sign-out rejected by provider");
        }
        self.clear();
        result
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    /// Bearer token of the current session.
    pub fn access_token(&self) -> Option<String> {
        self.tx
            .borrow()
            .session
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    fn apply(&self, outcome: &AuthOutcome) {
        if let AuthOutcome::SignedIn(session) = outcome {
            self.tx.send_modify(|s| {
                s.user = session.user.clone();
                s.session = Some(session.clone());
                s.last_event = Some(AuthEvent::SignedIn);
            });
        }
    }

    fn clear(&self) {
        self.tx.send_modify(|s| {
            let was_signed_in = s.session.is_some();
            s.session = None;
            s.user = None;
            s.loading = false;
            if was_signed_in {
                s.last_event = Some(AuthEvent::SignedOut);
            }
        });
    }
}
