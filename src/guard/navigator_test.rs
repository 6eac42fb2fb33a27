use std::sync::Arc;

use super::*;
use crate::config::ShellConfig;
use crate::guard::title::RecordedTitle;
use crate::routes::catalog::{self, nature_cart_table};
use crate::routes::{RouteEntry, RouteMeta};
use crate::session::{MemoryStorage, SessionStore, SessionUser};

type TestNavigator = Navigator<Arc<SessionStore<MemoryStorage>>, Arc<RecordedTitle>>;

struct Harness {
    session: Arc<SessionStore<MemoryStorage>>,
    titles: Arc<RecordedTitle>,
    navigator: TestNavigator,
}

fn harness_with(table: RouteTable, config: &ShellConfig) -> Harness {
    let session = Arc::new(SessionStore::from_config(MemoryStorage::new(), config));
    let titles = Arc::new(RecordedTitle::new());
    let guard = NavigationGuard::from_config(Arc::clone(&session), config);
    let navigator = Navigator::new(guard, table, Arc::clone(&titles));
    Harness { session, titles, navigator }
}

fn harness() -> Harness {
    harness_with(nature_cart_table(), &ShellConfig::default())
}

fn sign_in(h: &Harness) {
    let user: SessionUser = serde_json::from_value(serde_json::json!({ "name": "Ada" })).unwrap();
    h.session.set_user(user);
}

// =============================================================
// begin / resolve
// =============================================================

#[test]
fn allowed_attempt_sets_title_and_current() {
    let h = harness();
    sign_in(&h);
    let attempt = h.navigator.begin(catalog::MAP).unwrap();
    assert_eq!(h.navigator.resolve(&attempt), Some(Resolution::Allowed(catalog::MAP.into())));
    assert_eq!(h.titles.current().as_deref(), Some("Map"));
    assert_eq!(h.navigator.current().as_deref(), Some(catalog::MAP));
}

#[test]
fn redirected_attempt_leaves_title_untouched() {
    let h = harness();
    let attempt = h.navigator.begin(catalog::MAP).unwrap();
    assert_eq!(h.navigator.resolve(&attempt), Some(Resolution::Redirected(catalog::INDEX.into())));
    assert_eq!(h.titles.current(), None);
    assert_eq!(h.navigator.current(), None);
}

#[test]
fn attempt_carries_current_route_as_from() {
    let h = harness();
    h.navigator.navigate(catalog::INDEX).unwrap();
    let attempt = h.navigator.begin(catalog::LOGIN).unwrap();
    assert_eq!(attempt.from.map(|r| r.name).as_deref(), Some(catalog::INDEX));
}

#[test]
fn begin_unknown_route_fails() {
    let h = harness();
    assert_eq!(h.navigator.begin("Nowhere"), Err(NavigationError::UnknownRoute("Nowhere".into())));
}

#[test]
fn superseded_attempt_applies_nothing() {
    let h = harness();
    sign_in(&h);
    let stale = h.navigator.begin(catalog::MAP).unwrap();
    let fresh = h.navigator.begin(catalog::RECORDS).unwrap();

    assert_eq!(h.navigator.resolve(&stale), None);
    assert_eq!(h.titles.current(), None);

    assert_eq!(h.navigator.resolve(&fresh), Some(Resolution::Allowed(catalog::RECORDS.into())));
    assert_eq!(h.titles.history(), ["Records"]);
}

#[test]
fn resolved_attempt_is_not_reapplied_after_newer_begin() {
    let h = harness();
    sign_in(&h);
    let first = h.navigator.begin(catalog::MAP).unwrap();
    h.navigator.begin(catalog::RECORDS).unwrap();
    assert_eq!(h.navigator.resolve(&first), None);
    assert_eq!(h.navigator.current(), None);
}

#[test]
fn same_attempt_twice_resolves_the_same() {
    let h = harness();
    let attempt = h.navigator.begin(catalog::DASHBOARD).unwrap();
    let first = h.navigator.resolve(&attempt);
    let second = h.navigator.resolve(&attempt);
    assert_eq!(first, second);
}

// =============================================================
// navigate
// =============================================================

#[test]
fn navigate_signed_out_to_protected_lands_on_index() {
    let h = harness();
    let outcome = h.navigator.navigate(catalog::RECORDS).unwrap();
    assert_eq!(outcome, Outcome { route: catalog::INDEX.into(), redirects: vec![catalog::INDEX.into()] });
    assert_eq!(h.titles.history(), ["Nature Cart"]);
}

#[test]
fn navigate_signed_in_to_index_lands_on_dashboard() {
    let h = harness();
    sign_in(&h);
    let outcome = h.navigator.navigate(catalog::INDEX).unwrap();
    assert_eq!(outcome.route, catalog::DASHBOARD);
    assert_eq!(outcome.redirects, [catalog::DASHBOARD]);
    assert_eq!(h.titles.current().as_deref(), Some("Dashboard"));
}

#[test]
fn navigate_signed_in_to_login_lands_on_dashboard() {
    let h = harness();
    sign_in(&h);
    assert_eq!(h.navigator.navigate(catalog::LOGIN).unwrap().route, catalog::DASHBOARD);
}

#[test]
fn navigate_after_sign_out_is_bounced() {
    let h = harness();
    sign_in(&h);
    assert_eq!(h.navigator.navigate(catalog::MAP).unwrap().route, catalog::MAP);
    h.session.clear_user();
    assert_eq!(h.navigator.navigate(catalog::MAP).unwrap().route, catalog::INDEX);
}

#[test]
fn navigate_path_resolves_params() {
    let h = harness();
    sign_in(&h);
    let outcome = h.navigator.navigate_path("/authenticated/forest-products/3/edit").unwrap();
    assert_eq!(outcome.route, catalog::EDIT_FOREST_PRODUCT);
    assert!(outcome.redirects.is_empty());
}

#[test]
fn navigate_path_unknown() {
    let h = harness();
    assert_eq!(h.navigator.navigate_path("/missing"), Err(NavigationError::UnknownRoute("/missing".into())));
}

#[test]
fn redirect_to_unknown_route_is_reported() {
    let config = ShellConfig { public_entry: "Gone".into(), ..ShellConfig::default() };
    let h = harness_with(nature_cart_table(), &config);
    assert_eq!(h.navigator.navigate(catalog::MAP), Err(NavigationError::UnknownRoute("Gone".into())));
}

#[test]
fn circular_policy_is_cut_off() {
    // Public entry itself requires auth: a signed-out visitor bounces forever.
    let table = RouteTable::new(vec![
        RouteEntry::new("/", "Index").meta(RouteMeta::default().requires_auth()),
        RouteEntry::new("/home", "Dashboard"),
    ]);
    let h = harness_with(table, &ShellConfig::default());
    let err = h.navigator.navigate("Index").unwrap_err();
    assert_eq!(err, NavigationError::RedirectLoop { hops: 1, chain: vec!["Index".into(), "Index".into()] });
    assert_eq!(err.to_string(), "redirect loop after 1 hops: Index -> Index");
    assert_eq!(h.titles.current(), None);
}
