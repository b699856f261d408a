//! Route guarding.
//!
//! Each navigation is decided from the route's declaration and the current
//! session state alone:
//!
//! | Session            | Route allows role | Decision                      |
//! |--------------------|-------------------|-------------------------------|
//! | any                | public route      | render                        |
//! | resolving          | -                 | blank, decide again later     |
//! | unauthenticated    | -                 | redirect to login, return path|
//! | authenticated      | no                | redirect to `/unauthorized`   |
//! | authenticated      | yes               | render                        |

use std::fmt;
use std::sync::Arc;

use guesthouse_domain::route::{login_path, return_to};
use guesthouse_domain::{RouteAccess, RouteTable, SessionState, UNAUTHORIZED_PATH};
use tracing::debug;

use crate::ports::Navigator;
use crate::session::SessionStore;

/// Outcome of guarding one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show the requested view.
    Render,
    /// Show nothing until the session resolves.
    Blank,
    /// Nobody is logged in; go to login and come back afterwards.
    RedirectToLogin {
        /// The originally requested path.
        return_to: String,
    },
    /// The user's role may not view this route.
    RedirectToUnauthorized,
}

impl GuardDecision {
    /// Where to navigate instead, if anywhere.
    #[must_use]
    pub fn redirect_target(&self) -> Option<String> {
        match self {
            Self::RedirectToLogin { return_to } => Some(login_path(Some(return_to))),
            Self::RedirectToUnauthorized => Some(UNAUTHORIZED_PATH.to_string()),
            Self::Render | Self::Blank => None,
        }
    }

    /// Returns true if the protected content may be shown.
    #[must_use]
    pub const fn renders(&self) -> bool {
        matches!(self, Self::Render)
    }
}

impl fmt::Display for GuardDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render => f.write_str("render"),
            Self::Blank => f.write_str("blank (session resolving)"),
            Self::RedirectToLogin { return_to } => {
                write!(f, "redirect to login (return to {return_to})")
            }
            Self::RedirectToUnauthorized => f.write_str("redirect to unauthorized"),
        }
    }
}

/// Decides a single navigation.
#[must_use]
pub fn decide(access: &RouteAccess, state: &SessionState, path: &str) -> GuardDecision {
    let RouteAccess::Protected(permission) = access else {
        return GuardDecision::Render;
    };

    match state {
        SessionState::Resolving => GuardDecision::Blank,
        SessionState::Unauthenticated => GuardDecision::RedirectToLogin {
            return_to: path.to_string(),
        },
        SessionState::Authenticated(session) if permission.allows(session.role()) => {
            GuardDecision::Render
        }
        SessionState::Authenticated(_) => GuardDecision::RedirectToUnauthorized,
    }
}

/// Access Guard: applies [`decide`] on every navigation and session change.
#[derive(Clone)]
pub struct AccessGuard {
    routes: Arc<RouteTable>,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl AccessGuard {
    /// Creates a guard over the given route table.
    #[must_use]
    pub fn new(routes: RouteTable, session: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            routes: Arc::new(routes),
            session,
            navigator,
        }
    }

    /// Decides `path` for the current session without navigating.
    pub async fn evaluate(&self, path: &str) -> GuardDecision {
        let access = self.routes.access_for(path);
        decide(&access, &self.session.get_session().await, path)
    }

    /// Navigates to `path` and applies the guard's decision.
    pub async fn navigate(&self, path: &str) -> GuardDecision {
        self.navigator.navigate(path);
        self.apply(path).await
    }

    /// Decides the current location again, e.g. after a session change.
    pub async fn reevaluate(&self) -> GuardDecision {
        let path = self.navigator.current_path();
        self.apply(&path).await
    }

    /// Re-evaluates on every session change until the store is dropped.
    pub async fn watch(&self) {
        let mut changes = self.session.subscribe();
        while changes.changed().await.is_ok() {
            self.reevaluate().await;
        }
    }

    /// Leaves the login view after a successful login.
    ///
    /// Goes to the remembered return path, or to the role's landing page.
    /// Returns the decision for the destination.
    pub async fn resume_after_login(&self) -> GuardDecision {
        let current = self.navigator.current_path();
        let target = match return_to(&current) {
            Some(target) => target,
            None => match self.session.get_session().await {
                state if state.is_admin() => "/admin".to_string(),
                _ => "/".to_string(),
            },
        };
        self.navigate(&target).await
    }

    async fn apply(&self, path: &str) -> GuardDecision {
        let decision = self.evaluate(path).await;
        debug!(path, decision = %decision, "Route guarded");
        if let Some(target) = decision.redirect_target() {
            self.navigator.navigate(&target);
        }
        decision
    }
}
