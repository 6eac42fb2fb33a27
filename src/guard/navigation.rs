//! Session-aware guard over resolved routes.
//!
//! Evaluation is side-effect free apart from the session's lazy storage read.
//! Titles are looked up here but applied by the caller once the decision is
//! final, so a rejected destination never shows its title.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use super::decision::{GuardFlags, GuardPolicy, NavigationDecision, decide};
use crate::config::ShellConfig;
use crate::routes::ResolvedRoute;
use crate::session::AuthSource;

#[derive(Debug)]
pub struct NavigationGuard<A> {
    auth: A,
    policy: GuardPolicy,
    default_title: String,
}

impl<A: AuthSource> NavigationGuard<A> {
    pub fn new(auth: A, policy: GuardPolicy, default_title: impl Into<String>) -> Self {
        Self { auth, policy, default_title: default_title.into() }
    }

    pub fn from_config(auth: A, config: &ShellConfig) -> Self {
        Self::new(auth, GuardPolicy::from(config), config.default_title.clone())
    }

    #[must_use]
    pub fn policy(&self) -> &GuardPolicy {
        &self.policy
    }

    #[must_use]
    pub fn auth(&self) -> &A {
        &self.auth
    }

    /// Decide whether the visitor may move from `from` to `to`.
    pub fn evaluate(&self, from: Option<&ResolvedRoute>, to: &ResolvedRoute) -> NavigationDecision {
        let authenticated = self.auth.is_authenticated();
        let decision = decide(authenticated, GuardFlags::from(&to.meta), &to.name, &self.policy);
        log::debug!(
            "guard: {} -> {} (authenticated={authenticated}): {decision:?}",
            from.map_or("<start>", |r| r.name.as_str()),
            to.name,
        );
        decision
    }

    /// Title to show once `to` is entered.
    #[must_use]
    pub fn title_for<'a>(&'a self, to: &'a ResolvedRoute) -> &'a str {
        to.meta.title.as_deref().unwrap_or(&self.default_title)
    }
}
