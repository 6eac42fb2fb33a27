use super::*;

fn sample() -> RouteTable {
    RouteTable::new(vec![
        RouteEntry::new("/", "Home"),
        RouteEntry::new("/app", "App")
            .meta(RouteMeta::default().requires_auth().title("App"))
            .children(vec![
                RouteEntry::new("inbox", "Inbox"),
                RouteEntry::new("items/:id", "Item").meta(RouteMeta::default().title("Item")),
                RouteEntry::new("settings", "Settings").children(vec![
                    RouteEntry::new("profile", "Profile").meta(RouteMeta::default().title("Profile")),
                ]),
                RouteEntry::new("/absolute", "Absolute"),
            ]),
    ])
}

// =============================================================
// Flattening
// =============================================================

#[test]
fn flattens_depth_first_in_registration_order() {
    let table = sample();
    let names: Vec<&str> = table.routes().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Home", "App", "Inbox", "Item", "Settings", "Profile", "Absolute"]);
    assert_eq!(table.len(), 7);
}

#[test]
fn child_paths_join_parent_prefix() {
    let table = sample();
    assert_eq!(table.by_name("Home").unwrap().full_path, "/");
    assert_eq!(table.by_name("Inbox").unwrap().full_path, "/app/inbox");
    assert_eq!(table.by_name("Profile").unwrap().full_path, "/app/settings/profile");
}

#[test]
fn absolute_child_path_ignores_parent() {
    let table = sample();
    assert_eq!(table.by_name("Absolute").unwrap().full_path, "/absolute");
}

#[test]
fn matched_chain_runs_root_to_leaf() {
    let table = sample();
    assert_eq!(table.by_name("Profile").unwrap().matched, ["App", "Settings", "Profile"]);
    assert_eq!(table.by_name("Home").unwrap().matched, ["Home"]);
}

// =============================================================
// Meta inheritance
// =============================================================

#[test]
fn requires_auth_is_inherited_by_descendants() {
    let table = sample();
    assert!(table.by_name("Inbox").unwrap().meta.requires_auth);
    assert!(table.by_name("Profile").unwrap().meta.requires_auth);
    assert!(!table.by_name("Home").unwrap().meta.requires_auth);
}

#[test]
fn nearest_title_wins() {
    let table = sample();
    assert_eq!(table.by_name("Item").unwrap().meta.title.as_deref(), Some("Item"));
    assert_eq!(table.by_name("Inbox").unwrap().meta.title.as_deref(), Some("App"));
    assert_eq!(table.by_name("Settings").unwrap().meta.title.as_deref(), Some("App"));
    assert_eq!(table.by_name("Home").unwrap().meta.title, None);
}

#[test]
fn child_cannot_clear_inherited_requires_auth() {
    let table = RouteTable::new(vec![
        RouteEntry::new("/p", "P")
            .meta(RouteMeta::default().requires_auth())
            .children(vec![RouteEntry::new("c", "C").meta(RouteMeta { requires_auth: false, ..RouteMeta::default() })]),
    ]);
    assert!(table.by_name("C").unwrap().meta.requires_auth);
}

#[test]
fn requires_unauth_and_requires_auth_are_independent() {
    let table = RouteTable::new(vec![
        RouteEntry::new("/a", "A").meta(RouteMeta::default().requires_unauth()),
        RouteEntry::new("/b", "B").meta(RouteMeta::default().requires_auth().requires_unauth()),
    ]);
    let a = &table.by_name("A").unwrap().meta;
    assert!(a.requires_unauth && !a.requires_auth);
    let b = &table.by_name("B").unwrap().meta;
    assert!(b.requires_unauth && b.requires_auth);
}

// =============================================================
// Lookup
// =============================================================

#[test]
fn resolve_matches_static_and_param_segments() {
    let table = sample();
    assert_eq!(table.resolve("/").unwrap().name, "Home");
    assert_eq!(table.resolve("/app/inbox").unwrap().name, "Inbox");
    assert_eq!(table.resolve("/app/items/42").unwrap().name, "Item");
}

#[test]
fn resolve_ignores_trailing_slash() {
    let table = sample();
    assert_eq!(table.resolve("/app/inbox/").unwrap().name, "Inbox");
}

#[test]
fn resolve_unknown_path_is_none() {
    let table = sample();
    assert!(table.resolve("/nope").is_none());
    assert!(table.resolve("/app/items").is_none());
    assert!(table.resolve("/app/items/1/extra").is_none());
}

#[test]
fn by_name_unknown_is_none() {
    assert!(sample().by_name("Missing").is_none());
}

#[test]
fn duplicate_names_last_registered_wins() {
    let table = RouteTable::new(vec![
        RouteEntry::new("/locations", "LocationsIndex"),
        RouteEntry::new("/places", "LocationsIndex").meta(RouteMeta::default().title("Places")),
    ]);
    assert_eq!(table.by_name("LocationsIndex").unwrap().full_path, "/places");
    assert_eq!(table.duplicate_names(), ["LocationsIndex"]);
    // Path lookup still finds the first declaration.
    assert_eq!(table.resolve("/locations").unwrap().meta.title, None);
}

#[test]
fn no_duplicates_reports_empty() {
    assert!(sample().duplicate_names().is_empty());
}

#[test]
fn empty_table() {
    let table = RouteTable::new(Vec::new());
    assert!(table.is_empty());
    assert!(table.resolve("/").is_none());
}

// =============================================================
// Declarations as data
// =============================================================

#[test]
fn entries_deserialize_from_camel_case_json() {
    let entries: Vec<RouteEntry> = serde_json::from_value(serde_json::json!([
        {
            "path": "/authenticated",
            "name": "Authenticated",
            "meta": { "requiresAuth": true },
            "children": [{ "path": "map", "name": "Map", "meta": { "title": "Map" } }]
        },
        { "path": "/", "name": "Index" }
    ]))
    .unwrap();
    let table = RouteTable::new(entries);
    let map = table.by_name("Map").unwrap();
    assert_eq!(map.full_path, "/authenticated/map");
    assert!(map.meta.requires_auth);
    assert_eq!(map.meta.title.as_deref(), Some("Map"));
    assert!(!table.by_name("Index").unwrap().meta.requires_unauth);
}
