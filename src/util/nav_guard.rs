//! Router hook running the navigation guard on every location change.
//!
//! SYSTEM CONTEXT
//! ==============
//! Install once inside the `<Router>`; every route then gets identical
//! redirect and title behavior without per-page effects.
//!
//! ERROR HANDLING
//! ==============
//! Once the guard has turned a destination away, a failure further down the
//! redirect chain (missing target, loop) still moves the visitor off that
//! destination: to the public entry if it is open to signed-out visitors,
//! otherwise to `/`.

#[cfg(test)]
#[path = "nav_guard_test.rs"]
mod nav_guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;

use crate::guard::{NavigationError, Navigator, TitlePresenter};
use crate::session::AuthSource;

/// Last-resort redirect target.
pub const ROOT_PATH: &str = "/";

/// Path the router should replace the current location with, if any.
///
/// `None` when the visitor may stay on `path`, when the path is not in the
/// table (the router's fallback handles that), or when a newer location
/// change superseded this one.
pub fn redirect_path<A, P>(navigator: &Navigator<A, P>, path: &str) -> Option<String>
where
    A: AuthSource,
    P: TitlePresenter,
{
    let requested = navigator.table().resolve(path)?.clone();

    match navigator.navigate(&requested.name) {
        Ok(outcome) if outcome.redirects.is_empty() => None,
        Ok(outcome) => Some(
            navigator
                .table()
                .by_name(&outcome.route)
                .map_or_else(|| fallback_path(navigator), |route| route.full_path.clone()),
        ),
        Err(NavigationError::Superseded) => None,
        Err(e) => {
            if navigator.guard().evaluate(None, &requested).is_allowed() {
                log::warn!("nav guard: {e}");
                return None;
            }
            let target = fallback_path(navigator);
            log::warn!("nav guard: {e}; leaving {} for {target}", requested.full_path);
            Some(target)
        }
    }
}

/// Where a visitor goes when the redirect chain cannot be followed.
fn fallback_path<A, P>(navigator: &Navigator<A, P>) -> String
where
    A: AuthSource,
    P: TitlePresenter,
{
    navigator
        .table()
        .by_name(&navigator.guard().policy().public_entry)
        .filter(|entry| !entry.meta.requires_auth)
        .map_or_else(|| ROOT_PATH.to_owned(), |entry| entry.full_path.clone())
}

/// Run the guard for a location change to `path`, calling `navigate` with a
/// history replace when the visitor has to be moved elsewhere.
pub fn on_location_change<A, P, F>(navigator: &Navigator<A, P>, navigate: &F, path: &str)
where
    A: AuthSource,
    P: TitlePresenter,
    F: Fn(&str, NavigateOptions),
{
    if let Some(target) = redirect_path(navigator, path)
        && target != path
    {
        navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
    }
}

/// Run the guard whenever the location changes, replacing the location with
/// the redirect target when access is denied.
pub fn install_navigation_guard<A, P, F>(navigator: std::rc::Rc<Navigator<A, P>>, navigate: F)
where
    A: AuthSource + 'static,
    P: TitlePresenter + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let location = use_location();
    Effect::new(move || {
        let path = location.pathname.get();
        on_location_change(&navigator, &navigate, &path);
    });
}
