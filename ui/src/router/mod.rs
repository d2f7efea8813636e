//! Static route table of the web client.
//!
//! Paths map to the chain of views rendered for them (layout first, page
//! last). The table is flattened once from a tree of [`RouteDef`]s; two
//! definitions with the same path shape (parameter names ignored) conflict
//! and the first one wins.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

pub mod navigation;
pub mod routes;

pub use navigation::NavigationState;
pub use routes::default_routes;

/// Redirect hops followed before resolution gives up.
pub const MAX_REDIRECTS: usize = 8;

/// Page component resolved for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum View {
    Login,
    Layout,
    CollectionsIndex,
    CollectionItem,
    Searches,
    Settings,
    Collection,
}

impl View {
    /// Source module of the page in the web client.
    pub fn component(self) -> &'static str {
        match self {
            View::Login => "pages/Login.vue",
            View::Layout => "pages/Layout.vue",
            View::CollectionsIndex => "pages/collections/Index.vue",
            View::CollectionItem => "pages/collections/Item.vue",
            View::Searches => "pages/Search.vue",
            View::Settings => "pages/Setting.vue",
            View::Collection => "pages/Collection.vue",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A route as declared, possibly with nested children.
///
/// Child paths are relative to the parent unless they start with `/`.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDef {
    pub path: String,
    pub view: View,
    /// Pass path parameters to the view as props
    pub props: bool,
    pub redirect: Option<String>,
    pub children: Vec<RouteDef>,
}

impl RouteDef {
    pub fn new(path: impl Into<String>, view: View) -> Self {
        Self {
            path: path.into(),
            view,
            props: false,
            redirect: None,
            children: Vec::new(),
        }
    }

    pub fn with_props(mut self) -> Self {
        self.props = true;
        self
    }

    pub fn redirect_to(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }

    pub fn with_children(mut self, children: Vec<RouteDef>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix(':') {
            Some(name) => Segment::Param(name.to_string()),
            None => Segment::Static(raw.to_string()),
        }
    }
}

/// One flattened, matchable route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
    pub path: String,
    pub views: Vec<View>,
    pub props: bool,
    pub redirect: Option<String>,
    segments: Vec<Segment>,
}

impl RouteEntry {
    /// Path with parameter names erased, e.g. `/collections/:`.
    fn shape(&self) -> String {
        shape_of(&self.segments)
    }

    fn static_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Static(_)))
            .count()
    }

    fn capture(&self, parts: &[&str]) -> Option<IndexMap<String, String>> {
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = IndexMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) if expected == part => {}
                Segment::Static(_) => return None,
                Segment::Param(_) if part.is_empty() => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), (*part).to_string());
                }
            }
        }
        Some(params)
    }
}

/// A registration dropped because its path shape was already taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteConflict {
    /// Path of the dropped registration
    pub path: String,
    pub kept: View,
    pub ignored: View,
}

/// Result of resolving a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMatch {
    /// Location after redirects
    pub path: String,
    /// Matched route pattern, e.g. `/collections/:id`
    pub route: String,
    /// Views from the outermost layout to the page
    pub views: Vec<View>,
    pub params: IndexMap<String, String>,
    pub props: bool,
    /// Original location when at least one redirect was followed
    pub redirected_from: Option<String>,
}

impl RouteMatch {
    /// The innermost view, i.e. the page itself.
    pub fn page(&self) -> Option<View> {
        self.views.last().copied()
    }
}

/// Flattened route table with conflict bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    conflicts: Vec<RouteConflict>,
}

impl RouteTable {
    pub fn build(defs: &[RouteDef]) -> Self {
        let mut table = Self::default();
        for def in defs {
            table.register(def, "", &[]);
        }
        log::debug!(
            "Route table built with {} routes and {} conflicts",
            table.entries.len(),
            table.conflicts.len()
        );
        table
    }

    fn register(&mut self, def: &RouteDef, parent: &str, parent_views: &[View]) {
        let path = join_paths(parent, &def.path);
        let mut views = parent_views.to_vec();
        views.push(def.view);

        let entry = RouteEntry {
            segments: split(&path).into_iter().map(Segment::parse).collect(),
            path: path.clone(),
            views: views.clone(),
            props: def.props,
            redirect: def.redirect.clone(),
        };

        let shape = entry.shape();
        match self.entries.iter().find(|existing| existing.shape() == shape) {
            Some(existing) => {
                let conflict = RouteConflict {
                    path: path.clone(),
                    kept: existing.views.last().copied().unwrap_or(def.view),
                    ignored: def.view,
                };
                log::warn!(
                    "Duplicate route {}: keeping {}, ignoring {}",
                    conflict.path,
                    conflict.kept,
                    conflict.ignored
                );
                self.conflicts.push(conflict);
            }
            None => self.entries.push(entry),
        }

        for child in &def.children {
            self.register(child, &path, &views);
        }
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn conflicts(&self) -> &[RouteConflict] {
        &self.conflicts
    }

    /// Resolves `location`, following redirects.
    ///
    /// Query strings and fragments are ignored. Static segments take
    /// precedence over parameters; among equals the first registration wins.
    pub fn resolve(&self, location: &str) -> Option<RouteMatch> {
        let original = normalize(location);
        let mut current = original.clone();

        for _ in 0..=MAX_REDIRECTS {
            let (entry, params) = self.find(&current)?;
            match &entry.redirect {
                Some(target) => {
                    log::debug!("Redirecting {current} to {target}");
                    current = normalize(target);
                }
                None => {
                    let redirected_from = (current != original).then(|| original.clone());
                    return Some(RouteMatch {
                        path: current,
                        route: entry.path.clone(),
                        views: entry.views.clone(),
                        params,
                        props: entry.props,
                        redirected_from,
                    });
                }
            }
        }

        log::warn!("Too many redirects while resolving {original}");
        None
    }

    fn find(&self, path: &str) -> Option<(&RouteEntry, IndexMap<String, String>)> {
        let parts = split(path);
        let mut best: Option<(&RouteEntry, IndexMap<String, String>)> = None;
        for entry in &self.entries {
            let Some(params) = entry.capture(&parts) else {
                continue;
            };
            let better = best
                .as_ref()
                .is_none_or(|(current, _)| entry.static_count() > current.static_count());
            if better {
                best = Some((entry, params));
            }
        }
        best
    }
}

fn shape_of(segments: &[Segment]) -> String {
    let parts: Vec<&str> = segments
        .iter()
        .map(|segment| match segment {
            Segment::Static(value) => value.as_str(),
            Segment::Param(_) => ":",
        })
        .collect();
    format!("/{}", parts.join("/"))
}

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|part| !part.is_empty()).collect()
}

fn join_paths(parent: &str, child: &str) -> String {
    if child.starts_with('/') {
        normalize(child)
    } else {
        normalize(&format!("{parent}/{child}"))
    }
}

/// Leading slash, no trailing or doubled slashes, no query or fragment.
pub fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    format!("/{}", split(path).join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::build(&default_routes())
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("collections/"), "/collections");
        assert_eq!(normalize("//collections//7?tab=faces#top"), "/collections/7");
    }

    #[test]
    fn test_children_are_flattened_under_parent() {
        let binding = table();
        let paths: Vec<&str> = binding.entries().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/login",
                "/",
                "/collections",
                "/collections/:id",
                "/searches",
                "/settings"
            ]
        );
    }

    #[test]
    fn test_root_redirects_to_collections() {
        let matched = table().resolve("/").unwrap();
        assert_eq!(matched.path, "/collections");
        assert_eq!(matched.views, vec![View::Layout, View::CollectionsIndex]);
        assert_eq!(matched.redirected_from.as_deref(), Some("/"));
    }

    #[test]
    fn test_param_route_captures_id() {
        let matched = table().resolve("/collections/42").unwrap();
        assert_eq!(matched.route, "/collections/:id");
        assert_eq!(matched.page(), Some(View::CollectionItem));
        assert_eq!(matched.params.get("id").map(String::as_str), Some("42"));
        assert!(matched.props);
        assert_eq!(matched.redirected_from, None);
    }

    #[test]
    fn test_duplicate_shape_keeps_first_registration() {
        let table = table();
        assert_eq!(
            table.conflicts(),
            &[RouteConflict {
                path: "/collections/:id".to_string(),
                kept: View::CollectionItem,
                ignored: View::Collection,
            }]
        );
    }

    #[test]
    fn test_conflict_ignores_param_names() {
        let table = RouteTable::build(&[
            RouteDef::new("/items/:id", View::CollectionItem),
            RouteDef::new("/items/:slug", View::Collection),
        ]);
        assert_eq!(table.entries().len(), 1);
        assert_eq!(table.conflicts().len(), 1);
    }

    #[test]
    fn test_static_segment_beats_param() {
        let table = RouteTable::build(&[
            RouteDef::new("/collections/:id", View::CollectionItem),
            RouteDef::new("/collections/new", View::Collection),
        ]);
        let matched = table.resolve("/collections/new").unwrap();
        assert_eq!(matched.page(), Some(View::Collection));
        assert!(matched.params.is_empty());
    }

    #[test]
    fn test_unknown_path_is_none() {
        assert!(table().resolve("/photos").is_none());
        assert!(table().resolve("/collections/1/faces").is_none());
    }

    #[test]
    fn test_redirect_loop_is_bounded() {
        let table = RouteTable::build(&[
            RouteDef::new("/a", View::Settings).redirect_to("/b"),
            RouteDef::new("/b", View::Settings).redirect_to("/a"),
        ]);
        assert!(table.resolve("/a").is_none());
    }
}
