//! Logger setup.
//!
//! In the browser, records go to the devtools console and panics are
//! reported there too. Other builds leave logger installation to the host.

#[cfg(test)]
#[path = "logging_test.rs"]
mod logging_test;

/// Install the console logger and panic hook. Safe to call more than once.
pub fn init() {
    #[cfg(feature = "hydrate")]
    {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Debug) {
            log::warn!("logger already installed: {e}");
        }
    }
}
