//! Startup wiring: one session store shared by the guard and sign-in code.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use std::sync::Arc;

use crate::config::{ConfigError, ShellConfig};
use crate::guard::{DocumentTitle, NavigationGuard, Navigator, TitlePresenter};
use crate::routes::RouteTable;
use crate::routes::catalog::nature_cart_table;
use crate::session::{LocalStorage, SessionStorage, SessionStore};

/// Everything the client shell owns for the lifetime of the page.
pub struct Shell<S, P> {
    pub session: Arc<SessionStore<S>>,
    pub navigator: Navigator<Arc<SessionStore<S>>, P>,
}

impl<S: SessionStorage, P: TitlePresenter> Shell<S, P> {
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configured redirect targets are missing
    /// from `table` or would bounce visitors straight back out.
    pub fn new(config: &ShellConfig, table: RouteTable, storage: S, presenter: P) -> Result<Self, ConfigError> {
        config.check_routes(&table)?;
        let session = Arc::new(SessionStore::from_config(storage, config));
        let guard = NavigationGuard::from_config(Arc::clone(&session), config);
        log::debug!("shell: {} routes, persistence={:?}", table.len(), config.persistence);
        Ok(Self { session, navigator: Navigator::new(guard, table, presenter) })
    }
}

/// Shell over `localStorage` and `document.title` with the app's routes.
///
/// # Errors
///
/// Returns [`ConfigError`] if `config` does not fit the app's route table.
pub fn browser_shell(config: &ShellConfig) -> Result<Shell<LocalStorage, DocumentTitle>, ConfigError> {
    Shell::new(config, nature_cart_table(), LocalStorage, DocumentTitle)
}
