//! Shell configuration: session persistence and redirect targets.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::routes::RouteTable;

pub const DEFAULT_SESSION_KEY: &str = "auth";
pub const DEFAULT_TITLE: &str = "Nature Cart";
pub const DEFAULT_PUBLIC_ENTRY: &str = "Index";
pub const DEFAULT_AUTHENTICATED_HOME: &str = "Dashboard";

/// Configuration parsing or validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: String, value: String },

    /// A redirect target names a route the table does not contain.
    #[error("{var} names unknown route '{name}'")]
    UnknownRoute { var: String, name: String },

    /// A redirect target would itself be rejected for the visitors sent there.
    #[error("{var} route '{name}' is not reachable by the visitors redirected to it")]
    UnreachableTarget { var: String, name: String },
}

/// Whether the session survives a page reload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PersistenceMode {
    /// Mirror the session to durable storage and restore it on first read.
    #[default]
    Persistent,
    /// Keep the session in memory only; a reload signs the user out.
    MemoryOnly,
}

impl PersistenceMode {
    /// Parse `persistent` or `memory`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for anything else.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "persistent" => Ok(Self::Persistent),
            "memory" | "memory_only" => Ok(Self::MemoryOnly),
            _ => Err(ConfigError::InvalidValue {
                var: "NATURE_CART_SESSION_PERSISTENCE".into(),
                value: raw.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub persistence: PersistenceMode,
    /// Storage key the session is mirrored under.
    pub session_key: String,
    /// Page title used when the destination declares none.
    pub default_title: String,
    /// Route name unauthenticated visitors are sent to.
    pub public_entry: String,
    /// Route name authenticated visitors are sent to.
    pub authenticated_home: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            persistence: PersistenceMode::default(),
            session_key: DEFAULT_SESSION_KEY.to_owned(),
            default_title: DEFAULT_TITLE.to_owned(),
            public_entry: DEFAULT_PUBLIC_ENTRY.to_owned(),
            authenticated_home: DEFAULT_AUTHENTICATED_HOME.to_owned(),
        }
    }
}

impl ShellConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `NATURE_CART_SESSION_PERSISTENCE`: `persistent` (default) or `memory`
    /// - `NATURE_CART_SESSION_KEY`: default `auth`
    /// - `NATURE_CART_DEFAULT_TITLE`: default `Nature Cart`
    /// - `NATURE_CART_PUBLIC_ENTRY`: default `Index`
    /// - `NATURE_CART_AUTHENTICATED_HOME`: default `Dashboard`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the persistence mode is not recognized.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the persistence mode is not recognized.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let persistence = match get("NATURE_CART_SESSION_PERSISTENCE") {
            Some(raw) => PersistenceMode::parse(&raw)?,
            None => defaults.persistence,
        };

        Ok(Self {
            persistence,
            session_key: get("NATURE_CART_SESSION_KEY").unwrap_or(defaults.session_key),
            default_title: get("NATURE_CART_DEFAULT_TITLE").unwrap_or(defaults.default_title),
            public_entry: get("NATURE_CART_PUBLIC_ENTRY").unwrap_or(defaults.public_entry),
            authenticated_home: get("NATURE_CART_AUTHENTICATED_HOME").unwrap_or(defaults.authenticated_home),
        })
    }

    /// Check the redirect targets against `table`.
    ///
    /// The public entry must exist and be open to signed-out visitors; the
    /// authenticated home must exist, differ from the public entry and be open
    /// to signed-in visitors. Anything else sends redirects in a circle.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownRoute`] or [`ConfigError::UnreachableTarget`].
    pub fn check_routes(&self, table: &RouteTable) -> Result<(), ConfigError> {
        const ENTRY_VAR: &str = "NATURE_CART_PUBLIC_ENTRY";
        const HOME_VAR: &str = "NATURE_CART_AUTHENTICATED_HOME";

        let unknown = |var: &str, name: &str| ConfigError::UnknownRoute { var: var.into(), name: name.into() };
        let unreachable = |var: &str, name: &str| ConfigError::UnreachableTarget { var: var.into(), name: name.into() };

        let entry = table.by_name(&self.public_entry).ok_or_else(|| unknown(ENTRY_VAR, &self.public_entry))?;
        let home = table
            .by_name(&self.authenticated_home)
            .ok_or_else(|| unknown(HOME_VAR, &self.authenticated_home))?;

        if entry.meta.requires_auth {
            return Err(unreachable(ENTRY_VAR, &entry.name));
        }
        if home.meta.requires_unauth || home.name == entry.name {
            return Err(unreachable(HOME_VAR, &home.name));
        }
        Ok(())
    }
}
