//! Navigation guard.
//!
//! DESIGN
//! ======
//! `decision` is a pure function over session state and route flags;
//! `navigation` binds it to a session; `navigator` serializes attempts and
//! applies the title only for the attempt that is still current.

pub mod decision;
pub mod navigation;
pub mod navigator;
pub mod title;

pub use decision::{GuardFlags, GuardPolicy, NavigationDecision, decide};
pub use navigation::NavigationGuard;
pub use navigator::{Attempt, MAX_REDIRECTS, NavigationError, Navigator, Outcome, Resolution};
pub use title::{DocumentTitle, RecordedTitle, TITLE_HISTORY_LIMIT, TitlePresenter};
