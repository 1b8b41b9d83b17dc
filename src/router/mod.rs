//! Route table and navigation integration.
//!
//! This module provides:
//! - `Route` / `RouteTable`: the static route configuration, built once at
//!   startup and immutable thereafter
//! - `Router`: applies the pre-navigation guard and tracks the current path
//!
//! Protected routes require a valid credential; denied navigations land on
//! the landing route.

pub mod guard;

pub use guard::GuardDecision;

use thiserror::Error;
use tracing::debug;

use crate::session::{Session, SessionStore};

/// The unprotected default route: redirect target on denial and the
/// post-logout destination.
pub const LANDING_PATH: &str = "/";

#[derive(Error, Debug)]
pub enum RouterError {
    #[error("No route registered for path: {0}")]
    UnknownPath(String),

    #[error("Duplicate route path: {0}")]
    DuplicatePath(String),

    #[error("Route table has no landing route at /")]
    MissingLandingRoute,
}

/// A statically configured route. The component is opaque to this crate;
/// the host renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct Route<C> {
    pub path: String,
    pub name: String,
    pub component: C,
    pub requires_auth: bool,
}

impl<C> Route<C> {
    pub fn new(path: &str, name: &str, component: C) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            component,
            requires_auth: false,
        }
    }

    /// Mark the route as requiring a valid, unexpired credential.
    pub fn protected(mut self) -> Self {
        self.requires_auth = true;
        self
    }
}

/// Ordered route configuration. Paths are unique and a landing route at `/`
/// is always present, so denial always has a redirect target.
pub struct RouteTable<C> {
    routes: Vec<Route<C>>,
    landing: usize,
}

impl<C> RouteTable<C> {
    pub fn new(routes: Vec<Route<C>>) -> Result<Self, RouterError> {
        for (i, route) in routes.iter().enumerate() {
            if routes[..i].iter().any(|r| r.path == route.path) {
                return Err(RouterError::DuplicatePath(route.path.clone()));
            }
        }
        let landing = routes
            .iter()
            .position(|r| r.path == LANDING_PATH)
            .ok_or(RouterError::MissingLandingRoute)?;
        Ok(Self { routes, landing })
    }

    /// Look up a route by exact path match.
    pub fn find(&self, path: &str) -> Option<&Route<C>> {
        self.routes.iter().find(|r| r.path == path)
    }

    pub fn landing(&self) -> &Route<C> {
        &self.routes[self.landing]
    }

    fn position(&self, path: &str) -> Option<usize> {
        self.routes.iter().position(|r| r.path == path)
    }
}

/// Result of one navigation attempt. Each attempt resolves exactly once, to
/// either the requested route or the landing route.
#[derive(Debug, PartialEq)]
pub enum NavigationOutcome<'a, C> {
    Allowed(&'a Route<C>),
    Redirected(&'a Route<C>),
}

impl<'a, C> NavigationOutcome<'a, C> {
    /// The route actually navigated to.
    pub fn route(&self) -> &'a Route<C> {
        match *self {
            NavigationOutcome::Allowed(route) | NavigationOutcome::Redirected(route) => route,
        }
    }
}

/// Navigation over a route table, gated by the session guard.
pub struct Router<C, S: SessionStore> {
    table: RouteTable<C>,
    session: Session<S>,
    current: String,
}

impl<C, S: SessionStore> Router<C, S> {
    /// Navigation starts at the landing route.
    pub fn new(table: RouteTable<C>, session: Session<S>) -> Self {
        Self {
            table,
            session,
            current: LANDING_PATH.to_string(),
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// Path of the route currently navigated to.
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn current_route(&self) -> &Route<C> {
        self.table
            .find(&self.current)
            .unwrap_or_else(|| self.table.landing())
    }

    /// Attempt a navigation. The guard runs for every attempt; denied
    /// attempts land on the landing route instead of failing.
    pub fn navigate(&mut self, path: &str) -> Result<NavigationOutcome<'_, C>, RouterError> {
        let target = self
            .table
            .position(path)
            .ok_or_else(|| RouterError::UnknownPath(path.to_string()))?;

        match guard::check(&self.session, &self.table.routes[target]) {
            GuardDecision::Allow => {
                self.current = self.table.routes[target].path.clone();
                Ok(NavigationOutcome::Allowed(&self.table.routes[target]))
            }
            GuardDecision::RedirectTo(redirect) => {
                debug!("Navigation to {} denied, redirecting to {}", path, redirect);
                self.current = redirect;
                Ok(NavigationOutcome::Redirected(self.table.landing()))
            }
        }
    }
}
