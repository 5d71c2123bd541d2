//! Session state handed to core by the authentication host.
//!
//! # Responsibility
//! - Track the current identity through the initial loading transition.
//! - Decide which page an auth-gated route renders.
//!
//! # Invariants
//! - A session is in exactly one of `Loading`, `SignedIn`, `SignedOut`.
//! - Core never looks the session up globally; it is passed in explicitly.

use crate::model::identity::Identity;
use log::info;

pub const AUTH_PATH: &str = "/auth";
pub const DASHBOARD_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Initial resolution has not finished.
    Loading,
    SignedIn(Identity),
    SignedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Starts in `Loading` until the host resolves the session.
    pub fn new() -> Self {
        Self {
            state: SessionState::Loading,
        }
    }

    pub fn signed_in(identity: Identity) -> Self {
        Self {
            state: SessionState::SignedIn(identity),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    pub fn identity(&self) -> Option<&Identity> {
        match &self.state {
            SessionState::SignedIn(identity) => Some(identity),
            SessionState::Loading | SessionState::SignedOut => None,
        }
    }

    /// Records the host's answer to "who is signed in".
    pub fn resolve(&mut self, identity: Option<Identity>) {
        self.state = match identity {
            Some(identity) => SessionState::SignedIn(identity),
            None => SessionState::SignedOut,
        };
        info!(
            "event=session_resolve module=session status=ok signed_in={}",
            self.identity().is_some()
        );
    }

    /// Signs out and returns the identity that was active, if any.
    pub fn sign_out(&mut self) -> Option<Identity> {
        let previous = std::mem::replace(&mut self.state, SessionState::SignedOut);
        info!("event=session_sign_out module=session status=ok");
        match previous {
            SessionState::SignedIn(identity) => Some(identity),
            SessionState::Loading | SessionState::SignedOut => None,
        }
    }
}

/// Top-level pages behind the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Loading,
    Auth,
    Dashboard,
}

/// Routing outcome for a requested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render(Page),
    Redirect(&'static str),
}

/// Resolves `path` against the session.
///
/// Signed-in users are sent away from the auth page; everyone else is sent
/// to it. Unknown paths fall back to the dashboard rules.
pub fn resolve_route(path: &str, session: &Session) -> RouteDecision {
    if session.is_loading() {
        return RouteDecision::Render(Page::Loading);
    }

    let signed_in = session.identity().is_some();
    match (path == AUTH_PATH, signed_in) {
        (true, true) => RouteDecision::Redirect(DASHBOARD_PATH),
        (true, false) => RouteDecision::Render(Page::Auth),
        (false, true) => RouteDecision::Render(Page::Dashboard),
        (false, false) => RouteDecision::Redirect(AUTH_PATH),
    }
}
