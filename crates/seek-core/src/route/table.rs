// ── Route resolution ──
//
// Built once from `RouteDef`s, immutable afterwards. Resolution is a
// pure function of the URL: exact static match first, then the matching
// pattern with the most static segments, ties to declaration order.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::trace;
use url::Url;

use super::pattern::{PathPattern, segments};
use super::{PropsFn, ROUTES, RouteDef, View, ViewProps};
use crate::error::CoreError;

/// Params of one navigation: path params bound by name, plus decoded
/// query params (last value wins on repeated keys).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteParams {
    pub path: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
}

/// A validated route: parsed primary pattern plus alias patterns.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub name: &'static str,
    pub view: View,
    pub pattern: PathPattern,
    pub aliases: Vec<PathPattern>,
    props: Option<PropsFn>,
}

impl RouteEntry {
    fn patterns(&self) -> impl Iterator<Item = &PathPattern> {
        std::iter::once(&self.pattern).chain(self.aliases.iter())
    }

    /// View inputs for `params`: the declared mapper, or the path params.
    pub fn props_for(&self, params: &RouteParams) -> ViewProps {
        match self.props {
            Some(map) => map(params),
            None => params.path.clone(),
        }
    }

    pub fn has_props_mapper(&self) -> bool {
        self.props.is_some()
    }
}

/// Outcome of resolving a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Name of the matched entry; `None` for the not-found fallback.
    pub name: Option<&'static str>,
    pub view: View,
    /// Normalized request path.
    pub path: String,
    pub params: RouteParams,
    pub props: ViewProps,
}

impl Resolution {
    pub fn not_found(path: String, params: RouteParams) -> Self {
        Self {
            name: None,
            view: View::NotFound,
            path,
            params,
            props: ViewProps::new(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.view == View::NotFound
    }
}

/// Ordered, validated route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Validate and build a table. Paths (aliases included) and names
    /// must be unique.
    pub fn new(defs: &[RouteDef]) -> Result<Self, CoreError> {
        let mut names = HashSet::new();
        let mut shapes = HashSet::new();
        let mut entries = Vec::with_capacity(defs.len());

        for def in defs {
            if !names.insert(def.name) {
                return Err(CoreError::DuplicateName {
                    name: def.name.to_owned(),
                });
            }

            let pattern = PathPattern::parse(def.path)?;
            let aliases = def
                .aliases
                .iter()
                .map(|a| PathPattern::parse(a))
                .collect::<Result<Vec<_>, _>>()?;

            for p in std::iter::once(&pattern).chain(aliases.iter()) {
                if !shapes.insert(p.shape()) {
                    return Err(CoreError::DuplicatePath {
                        path: p.as_str().to_owned(),
                    });
                }
            }

            entries.push(RouteEntry {
                name: def.name,
                view: def.view,
                pattern,
                aliases,
                props: def.props,
            });
        }

        Ok(Self { entries })
    }

    /// The platform's route table.
    pub fn standard() -> Result<Self, CoreError> {
        Self::new(ROUTES)
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Resolve a path (`/assignment/42?tab=1`) or absolute URL to exactly
    /// one entry, or to the not-found fallback.
    pub fn resolve(&self, url: &str) -> Resolution {
        let (path, query) = split_url(url);
        let query = parse_query(query.as_deref());

        let mut best: Option<(&RouteEntry, BTreeMap<String, String>, (bool, usize))> = None;
        for entry in &self.entries {
            for pattern in entry.patterns() {
                let Some(bound) = pattern.matches(&path) else {
                    continue;
                };
                let rank = (pattern.is_static(), pattern.static_segments());
                if best.as_ref().is_none_or(|(_, _, r)| rank > *r) {
                    best = Some((entry, bound, rank));
                }
            }
        }

        let Some((entry, bound, _)) = best else {
            trace!(%path, "no route matched");
            return Resolution::not_found(
                path,
                RouteParams {
                    path: BTreeMap::new(),
                    query,
                },
            );
        };

        let params = RouteParams { path: bound, query };
        let props = entry.props_for(&params);
        trace!(%path, route = entry.name, "route matched");

        Resolution {
            name: Some(entry.name),
            view: entry.view,
            path,
            params,
            props,
        }
    }

    /// Reverse lookup: build the concrete path for route `name`.
    pub fn href(&self, name: &str, params: &[(&str, &str)]) -> Result<String, CoreError> {
        let entry = self.get(name).ok_or_else(|| CoreError::UnknownRoute {
            name: name.to_owned(),
        })?;
        entry.pattern.render(entry.name, params)
    }
}

// ── URL helpers ─────────────────────────────────────────────────────

/// Split into a normalized path (`/a/b`, or `/`) and raw query string.
fn split_url(url: &str) -> (String, Option<String>) {
    if let Ok(parsed) = Url::parse(url) {
        if parsed.has_host() {
            return (normalize(parsed.path()), parsed.query().map(str::to_owned));
        }
    }

    let without_fragment = url.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((path, query)) => (normalize(path), Some(query.to_owned())),
        None => (normalize(without_fragment), None),
    }
}

fn normalize(path: &str) -> String {
    let joined: Vec<&str> = segments(path).collect();
    format!("/{}", joined.join("/"))
}

fn parse_query(query: Option<&str>) -> BTreeMap<String, String> {
    query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}
