//! The owner of the session lifecycle
//!
//! An [`App`] is the only component that reads, creates and destroys the [`Session`].
//! View-models never look it up by themselves: they receive a [`SessionContext`] when they are built.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde_json::json;

use crate::traits::{Gateway, Storage};
use crate::session::{Session, SessionStore};


/// What every view-model needs: who is signed in, and how to reach the API
pub struct SessionContext<G> {
    session: Session,
    gateway: Arc<G>,
}

impl<G> SessionContext<G> {
    pub fn new(session: Session, gateway: Arc<G>) -> Self {
        Self { session, gateway }
    }

    pub fn session(&self) -> &Session { &self.session }
    pub fn user_id(&self) -> &str     { &self.session.user_id }
    pub fn gateway(&self) -> &Arc<G>  { &self.gateway }
}

impl<G> Clone for SessionContext<G> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            gateway: Arc::clone(&self.gateway),
        }
    }
}


/// Signing in failed.
///
/// The message is meant to be shown as is. The actual cause is only logged.
#[derive(Clone, Debug, PartialEq)]
pub struct LoginFailed;

impl Display for LoginFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unable to sign in. Please try again.")
    }
}

impl std::error::Error for LoginFailed {}


/// The application: a gateway, and the (possibly absent) signed-in user
pub struct App<G: Gateway, S: Storage> {
    gateway: Arc<G>,
    store: SessionStore<S>,
    session: Option<Session>,
}

impl<G: Gateway, S: Storage> App<G, S> {
    /// Start the application. The user is still signed in if a session has been persisted
    pub fn new(gateway: Arc<G>, storage: S) -> Self {
        let store = SessionStore::new(storage);
        let session = store.load();
        match &session {
            Some(s) => log::info!("Resuming the session of {}", s.email),
            None => log::info!("Nobody is signed in"),
        }
        Self { gateway, store, session }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    /// The context to give to view-models, or `None` if nobody is signed in
    pub fn context(&self) -> Option<SessionContext<G>> {
        self.session
            .as_ref()
            .map(|session| SessionContext::new(session.clone(), Arc::clone(&self.gateway)))
    }

    /// Sign in with the API, and persist the resulting session
    pub async fn login(&mut self, name: &str, email: &str) -> Result<SessionContext<G>, LoginFailed> {
        let body = json!({ "email": email, "name": name });
        let reply = match self.gateway.post("/auth/login", &body).await {
            Ok(reply) => reply,
            Err(err) => {
                log::warn!("Login request failed: {}", err);
                return Err(LoginFailed);
            }
        };

        let session: Session = match serde_json::from_value(reply) {
            Ok(s) => s,
            Err(err) => {
                log::warn!("Invalid login reply: {}", err);
                return Err(LoginFailed);
            }
        };

        if let Err(err) = self.store.save(&session) {
            log::warn!("Unable to persist the session: {}", err);
            return Err(LoginFailed);
        }

        log::info!("Signed in as {}", session.email);
        self.session = Some(session.clone());
        Ok(SessionContext::new(session, Arc::clone(&self.gateway)))
    }

    /// Sign out. The persisted session is removed as well
    pub fn logout(&mut self) {
        if let Err(err) = self.store.clear() {
            log::warn!("Unable to remove the persisted session: {}", err);
        }
        if let Some(s) = self.session.take() {
            log::info!("{} signed out", s.email);
        }
    }
}
