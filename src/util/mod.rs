//! Browser and router glue.
//!
//! SYSTEM CONTEXT
//! ==============
//! Keeps Leptos-specific wiring out of the guard and session modules so they
//! stay testable without a reactive runtime.

pub mod nav_guard;
