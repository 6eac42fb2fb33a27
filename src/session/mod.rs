//! Session state for the current visitor.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by the navigation guard on every attempt; written by whatever signs
//! the user in or out.

pub mod storage;
pub mod store;

pub use storage::{LocalStorage, MemoryStorage, SessionStorage, StorageError};
pub use store::{AuthSource, SessionStore, SessionUser};
