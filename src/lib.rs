//! # nature-cart-shell
//!
//! Client shell for the Nature Cart record-management app: the route table,
//! the page-access guard and the session store that decides which views a
//! visitor may reach.
//!
//! Views themselves live elsewhere and are referenced here only by route
//! name. The `hydrate` feature adds browser `localStorage`, `document.title`
//! and a Leptos router hook; without it everything runs against in-memory
//! backends.

pub mod config;
pub mod guard;
pub mod logging;
pub mod routes;
pub mod session;
pub mod shell;
pub mod util;

pub use config::{PersistenceMode, ShellConfig};
pub use guard::{NavigationDecision, NavigationGuard, Navigator};
pub use routes::RouteTable;
pub use session::{SessionStore, SessionUser};
