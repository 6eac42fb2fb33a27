//! Page title side effect.

#[cfg(test)]
#[path = "title_test.rs"]
mod title_test;

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Sets the displayed page title.
pub trait TitlePresenter {
    fn set_title(&self, title: &str);
}

impl<P: TitlePresenter + ?Sized> TitlePresenter for &P {
    fn set_title(&self, title: &str) {
        (**self).set_title(title);
    }
}

impl<P: TitlePresenter + ?Sized> TitlePresenter for std::rc::Rc<P> {
    fn set_title(&self, title: &str) {
        (**self).set_title(title);
    }
}

impl<P: TitlePresenter + ?Sized> TitlePresenter for std::sync::Arc<P> {
    fn set_title(&self, title: &str) {
        (**self).set_title(title);
    }
}

/// Writes `document.title`. A no-op outside the `hydrate` build.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentTitle;

impl TitlePresenter for DocumentTitle {
    fn set_title(&self, title: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
                doc.set_title(title);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            log::debug!("title: {title}");
        }
    }
}

/// Titles kept by [`RecordedTitle`]; older ones are dropped.
pub const TITLE_HISTORY_LIMIT: usize = 16;

/// Remembers the most recent titles written, up to [`TITLE_HISTORY_LIMIT`].
/// Used by SSR and tests.
#[derive(Debug, Default)]
pub struct RecordedTitle {
    titles: Mutex<VecDeque<String>>,
}

impl RecordedTitle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent title, if any was set.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.titles.lock().unwrap_or_else(PoisonError::into_inner).back().cloned()
    }

    /// Retained titles, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.titles.lock().unwrap_or_else(PoisonError::into_inner).iter().cloned().collect()
    }
}

impl TitlePresenter for RecordedTitle {
    fn set_title(&self, title: &str) {
        let mut titles = self.titles.lock().unwrap_or_else(PoisonError::into_inner);
        if titles.len() == TITLE_HISTORY_LIMIT {
            titles.pop_front();
        }
        titles.push_back(title.to_owned());
    }
}
