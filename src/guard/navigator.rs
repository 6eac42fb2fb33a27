//! Serialized navigation attempts with supersession.
//!
//! ARCHITECTURE
//! ============
//! Every attempt gets a generation number when it begins. Starting a new
//! attempt makes all earlier ones stale; a stale attempt resolves to nothing
//! and never writes a title or triggers a redirect. The generation check and
//! the title write happen under the same lock as `begin`, so a concurrent
//! `begin` cannot slip between them.
//!
//! TRADE-OFFS
//! ==========
//! Redirects are followed as fresh attempts. A misconfigured policy that
//! redirects in a circle is cut off after [`MAX_REDIRECTS`] hops or on the
//! first revisited route, whichever comes first.

#[cfg(test)]
#[path = "navigator_test.rs"]
mod navigator_test;

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::decision::NavigationDecision;
use super::navigation::NavigationGuard;
use super::title::TitlePresenter;
use crate::routes::{ResolvedRoute, RouteTable};
use crate::session::AuthSource;

pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("no route named or matching '{0}'")]
    UnknownRoute(String),

    #[error("redirect loop after {hops} hops: {}", .chain.join(" -> "))]
    RedirectLoop { hops: usize, chain: Vec<String> },

    #[error("navigation superseded by a newer attempt")]
    Superseded,
}

/// A begun navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attempt {
    pub generation: u64,
    pub from: Option<ResolvedRoute>,
    pub to: ResolvedRoute,
}

/// How a current attempt resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Allowed(String),
    Redirected(String),
}

/// Final result of [`Navigator::navigate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Route that was entered.
    pub route: String,
    /// Redirect targets followed on the way, in order.
    pub redirects: Vec<String>,
}

#[derive(Debug, Default)]
struct NavState {
    latest: u64,
    current: Option<String>,
}

pub struct Navigator<A, P> {
    guard: NavigationGuard<A>,
    table: RouteTable,
    presenter: P,
    state: Mutex<NavState>,
}

impl<A: AuthSource, P: TitlePresenter> Navigator<A, P> {
    pub fn new(guard: NavigationGuard<A>, table: RouteTable, presenter: P) -> Self {
        Self { guard, table, presenter, state: Mutex::new(NavState::default()) }
    }

    #[must_use]
    pub fn guard(&self) -> &NavigationGuard<A> {
        &self.guard
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Name of the route last entered.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.lock().current.clone()
    }

    fn lock(&self) -> MutexGuard<'_, NavState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn route(&self, name: &str) -> Result<&ResolvedRoute, NavigationError> {
        self.table.by_name(name).ok_or_else(|| NavigationError::UnknownRoute(name.to_owned()))
    }

    /// Start an attempt from the current route to the route named `to`,
    /// superseding any attempt still in flight.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::UnknownRoute`] if `to` is not in the table.
    pub fn begin(&self, to: &str) -> Result<Attempt, NavigationError> {
        let to = self.route(to)?.clone();
        let mut state = self.lock();
        state.latest += 1;
        let from = state.current.as_deref().and_then(|name| self.table.by_name(name)).cloned();
        Ok(Attempt { generation: state.latest, from, to })
    }

    /// Evaluate `attempt` and apply its effect. Stale attempts yield `None`.
    pub fn resolve(&self, attempt: &Attempt) -> Option<Resolution> {
        if self.is_stale(attempt) {
            log::debug!("navigator: attempt {} to {} superseded", attempt.generation, attempt.to.name);
            return None;
        }

        let decision = self.guard.evaluate(attempt.from.as_ref(), &attempt.to);

        let mut state = self.lock();
        if state.latest != attempt.generation {
            log::debug!("navigator: attempt {} to {} superseded", attempt.generation, attempt.to.name);
            return None;
        }
        match decision {
            NavigationDecision::Allow => {
                self.presenter.set_title(self.guard.title_for(&attempt.to));
                state.current = Some(attempt.to.name.clone());
                Some(Resolution::Allowed(attempt.to.name.clone()))
            }
            NavigationDecision::RedirectTo(target) => Some(Resolution::Redirected(target)),
        }
    }

    fn is_stale(&self, attempt: &Attempt) -> bool {
        self.lock().latest != attempt.generation
    }

    /// Navigate to the route named `to`, following redirects.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError`] for unknown routes, redirect loops, or when
    /// a newer attempt supersedes this one midway.
    pub fn navigate(&self, to: &str) -> Result<Outcome, NavigationError> {
        let mut chain = vec![to.to_owned()];
        let mut redirects = Vec::new();
        let mut target = to.to_owned();

        loop {
            let attempt = self.begin(&target)?;
            match self.resolve(&attempt).ok_or(NavigationError::Superseded)? {
                Resolution::Allowed(route) => return Ok(Outcome { route, redirects }),
                Resolution::Redirected(next) => {
                    let revisited = chain.contains(&next);
                    chain.push(next.clone());
                    if revisited || redirects.len() >= MAX_REDIRECTS {
                        log::warn!("navigator: redirect loop: {}", chain.join(" -> "));
                        return Err(NavigationError::RedirectLoop { hops: redirects.len() + 1, chain });
                    }
                    redirects.push(next.clone());
                    target = next;
                }
            }
        }
    }

    /// Navigate to whichever route matches `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::UnknownRoute`] if no route matches, plus
    /// anything [`Self::navigate`] returns.
    pub fn navigate_path(&self, path: &str) -> Result<Outcome, NavigationError> {
        let name = self
            .table
            .resolve(path)
            .map(|route| route.name.clone())
            .ok_or_else(|| NavigationError::UnknownRoute(path.to_owned()))?;
        self.navigate(&name)
    }
}
