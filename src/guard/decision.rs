//! Pure access decision for one navigation attempt.
//!
//! Rules, in order:
//! 1. `requires_auth` and signed out: redirect to the public entry.
//! 2. `requires_unauth` and signed in: redirect to the authenticated home.
//! 3. Signed in and the target is the public entry: redirect home.
//! 4. Otherwise allow.
//!
//! The two flags are independent; a route declaring both is unreachable.

#[cfg(test)]
#[path = "decision_test.rs"]
mod decision_test;

use crate::config::ShellConfig;
use crate::routes::ResolvedMeta;

/// Outcome of a guard evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    RedirectTo(String),
}

impl NavigationDecision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Access flags merged over the matched route chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GuardFlags {
    pub requires_auth: bool,
    pub requires_unauth: bool,
}

impl From<&ResolvedMeta> for GuardFlags {
    fn from(meta: &ResolvedMeta) -> Self {
        Self { requires_auth: meta.requires_auth, requires_unauth: meta.requires_unauth }
    }
}

/// Where redirects go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardPolicy {
    /// Landing route for signed-out visitors.
    pub public_entry: String,
    /// Landing route for signed-in visitors.
    pub authenticated_home: String,
}

impl GuardPolicy {
    pub fn new(public_entry: impl Into<String>, authenticated_home: impl Into<String>) -> Self {
        Self { public_entry: public_entry.into(), authenticated_home: authenticated_home.into() }
    }
}

impl From<&ShellConfig> for GuardPolicy {
    fn from(config: &ShellConfig) -> Self {
        Self::new(config.public_entry.clone(), config.authenticated_home.clone())
    }
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self::from(&ShellConfig::default())
    }
}

/// Decide whether a visitor may enter `target`.
#[must_use]
pub fn decide(is_authenticated: bool, flags: GuardFlags, target: &str, policy: &GuardPolicy) -> NavigationDecision {
    if flags.requires_auth && !is_authenticated {
        return NavigationDecision::RedirectTo(policy.public_entry.clone());
    }
    if flags.requires_unauth && is_authenticated {
        return NavigationDecision::RedirectTo(policy.authenticated_home.clone());
    }
    if !flags.requires_auth && is_authenticated && target == policy.public_entry {
        return NavigationDecision::RedirectTo(policy.authenticated_home.clone());
    }
    NavigationDecision::Allow
}
