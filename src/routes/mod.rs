//! Route configuration.
//!
//! DESIGN
//! ======
//! `table` is the generic nested-route model; `catalog` is this application's
//! concrete table. The table is built once at startup and only read after.

pub mod catalog;
pub mod table;

pub use table::{ResolvedMeta, ResolvedRoute, RouteEntry, RouteMeta, RouteTable};
