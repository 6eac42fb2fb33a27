//! Static route table with nested entries and inherited meta.
//!
//! DESIGN
//! ======
//! Entries are declared as a tree (layouts with children) and flattened once
//! at construction. Each flattened record carries its full path, the names of
//! every matched segment from root to leaf, and meta merged along that chain,
//! so the guard never walks the tree.
//!
//! Meta merging:
//! - `requires_auth` / `requires_unauth`: set if any matched segment sets it.
//! - `title`: nearest segment that declares one, leaf first.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Policy annotations on a single route declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_unauth: bool,
    pub title: Option<String>,
}

impl RouteMeta {
    #[must_use]
    pub fn requires_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    #[must_use]
    pub fn requires_unauth(mut self) -> Self {
        self.requires_unauth = true;
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// One route declaration. Child paths are relative to the parent unless they
/// start with `/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub meta: RouteMeta,
    #[serde(default)]
    pub children: Vec<RouteEntry>,
}

impl RouteEntry {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self { path: path.into(), name: name.into(), meta: RouteMeta::default(), children: Vec::new() }
    }

    #[must_use]
    pub fn meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    #[must_use]
    pub fn children(mut self, children: Vec<RouteEntry>) -> Self {
        self.children = children;
        self
    }
}

/// Meta after merging along the matched chain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedMeta {
    pub requires_auth: bool,
    pub requires_unauth: bool,
    pub title: Option<String>,
}

/// A flattened route, ready for the guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub name: String,
    pub full_path: String,
    /// Names of the matched segments, root first, this route last.
    pub matched: Vec<String>,
    pub meta: ResolvedMeta,
}

/// Immutable, flattened route table.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    routes: Vec<ResolvedRoute>,
    by_name: HashMap<String, usize>,
    name_counts: HashMap<String, usize>,
}

impl RouteTable {
    /// Flatten `entries` depth first, parents before their children.
    #[must_use]
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        let mut table = Self::default();
        for entry in &entries {
            table.push(entry, "/", &[], &[]);
        }
        table
    }

    fn push(&mut self, entry: &RouteEntry, parent_path: &str, parent_names: &[String], parent_meta: &[&RouteMeta]) {
        let full_path = join_path(parent_path, &entry.path);

        let mut matched = parent_names.to_vec();
        matched.push(entry.name.clone());
        let mut chain = parent_meta.to_vec();
        chain.push(&entry.meta);

        let meta = ResolvedMeta {
            requires_auth: chain.iter().any(|m| m.requires_auth),
            requires_unauth: chain.iter().any(|m| m.requires_unauth),
            title: chain.iter().rev().find_map(|m| m.title.clone()),
        };

        let index = self.routes.len();
        self.routes.push(ResolvedRoute { name: entry.name.clone(), full_path: full_path.clone(), matched: matched.clone(), meta });
        self.by_name.insert(entry.name.clone(), index);
        *self.name_counts.entry(entry.name.clone()).or_insert(0) += 1;

        for child in &entry.children {
            self.push(child, &full_path, &matched, &chain);
        }
    }

    /// All routes in registration order.
    #[must_use]
    pub fn routes(&self) -> &[ResolvedRoute] {
        &self.routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route registered under `name`. With duplicate names the last one wins.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&ResolvedRoute> {
        self.by_name.get(name).and_then(|&i| self.routes.get(i))
    }

    /// First route, in registration order, whose full path matches `path`.
    /// `:param` segments match any single non-empty segment.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&ResolvedRoute> {
        let wanted = segments(path);
        self.routes.iter().find(|route| path_matches(&route.full_path, &wanted))
    }

    /// Names registered more than once, sorted.
    #[must_use]
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .name_counts
            .iter()
            .filter(|&(_, &count)| count > 1)
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn join_path(parent: &str, child: &str) -> String {
    let joined = if child.starts_with('/') {
        segments(child)
    } else {
        let mut parts = segments(parent);
        parts.extend(segments(child));
        parts
    };
    format!("/{}", joined.join("/"))
}

fn path_matches(pattern: &str, wanted: &[&str]) -> bool {
    let pattern = segments(pattern);
    pattern.len() == wanted.len()
        && pattern
            .iter()
            .zip(wanted)
            .all(|(p, w)| p.starts_with(':') || p == w)
}
