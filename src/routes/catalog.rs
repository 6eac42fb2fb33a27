//! The Nature Cart route table.
//!
//! Views are opaque here: a route only names its target and carries policy.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use super::table::{RouteEntry, RouteMeta, RouteTable};

pub const INDEX: &str = "Index";
pub const LOGIN: &str = "Login";
pub const AUTHENTICATED: &str = "Authenticated";
pub const DASHBOARD: &str = "Dashboard";
pub const MAP: &str = "Map";
pub const RECORDS: &str = "Records";
pub const CREATE_FOREST_PRODUCT: &str = "CreateForestProduct";
pub const EDIT_FOREST_PRODUCT: &str = "EditForestProduct";
pub const LOCATIONS_INDEX: &str = "LocationsIndex";

/// Route declarations for the application shell.
#[must_use]
pub fn nature_cart_routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::new("/", INDEX),
        RouteEntry::new("/login", LOGIN).meta(RouteMeta::default().requires_unauth().title("Sign In")),
        RouteEntry::new("/authenticated", AUTHENTICATED)
            .meta(RouteMeta::default().requires_auth())
            .children(vec![
                RouteEntry::new("dashboard", DASHBOARD).meta(RouteMeta::default().title("Dashboard")),
                RouteEntry::new("map", MAP).meta(RouteMeta::default().title("Map")),
                RouteEntry::new("records", RECORDS).meta(RouteMeta::default().title("Records")),
                RouteEntry::new("forest-products/create", CREATE_FOREST_PRODUCT)
                    .meta(RouteMeta::default().title("Create Forest Product")),
                RouteEntry::new("forest-products/:id/edit", EDIT_FOREST_PRODUCT)
                    .meta(RouteMeta::default().title("Update Forest Product")),
                RouteEntry::new("locations", LOCATIONS_INDEX).meta(RouteMeta::default().title("Locations")),
            ]),
    ]
}

/// Flattened [`nature_cart_routes`].
#[must_use]
pub fn nature_cart_table() -> RouteTable {
    RouteTable::new(nature_cart_routes())
}
