//! Route-scoped visibility filtering
//!
//! Each named route may carry an allow-list of seller names. A caller
//! whose route has no configured scope sees everything. Matching is
//! three-tier: canonicalized name, raw stored name, then a fuzzy
//! token fallback, because upstream name data is inconsistent about
//! middle names and exact matching alone under-matches.

use std::collections::HashMap;

use serde::Deserialize;

use crate::identity::AliasTable;

/// Default minimum number of matching tokens for the fuzzy fallback.
pub const DEFAULT_MIN_TOKEN_MATCHES: usize = 2;

/// A named visibility restriction: the sellers a route may see.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteScope {
    pub name: String,
    pub allowed_sellers: Vec<String>,
}

/// Immutable route → scope lookup table.
#[derive(Debug, Clone)]
pub struct ScopeTable {
    routes: HashMap<String, RouteScope>,
    /// Fuzzy-match threshold, configurable because the heuristic can
    /// over- and under-match on names sharing common tokens.
    pub min_token_matches: usize,
}

impl ScopeTable {
    pub fn new(scopes: Vec<RouteScope>, min_token_matches: usize) -> Self {
        let routes = scopes
            .into_iter()
            .map(|s| (s.name.clone(), s))
            .collect();
        Self {
            routes,
            min_token_matches,
        }
    }

    /// Resolve a route name to its scope. Absent or unknown route names
    /// mean "no restriction configured".
    pub fn resolve(&self, route: Option<&str>) -> Option<&RouteScope> {
        route.and_then(|name| self.routes.get(name))
    }
}

/// Visibility decision for seller names under one resolved scope.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityFilter<'a> {
    aliases: &'a AliasTable,
    scope: Option<&'a RouteScope>,
    min_token_matches: usize,
}

impl<'a> VisibilityFilter<'a> {
    pub fn new(
        aliases: &'a AliasTable,
        scope: Option<&'a RouteScope>,
        min_token_matches: usize,
    ) -> Self {
        Self {
            aliases,
            scope,
            min_token_matches,
        }
    }

    /// Whether a stored seller name is visible under the scope.
    ///
    /// Absent scope keeps everything. Otherwise: canonical-name match,
    /// raw-name match, then fuzzy multi-token fallback.
    pub fn allows(&self, stored_name: &str) -> bool {
        let Some(scope) = self.scope else {
            return true;
        };

        let canonical = self.aliases.canonicalize(stored_name);
        if scope
            .allowed_sellers
            .iter()
            .any(|allowed| allowed == canonical || allowed == stored_name)
        {
            return true;
        }

        scope
            .allowed_sellers
            .iter()
            .any(|allowed| fuzzy_token_matches(stored_name, allowed) >= self.min_token_matches)
    }
}

/// Count stored-name tokens that substring-match some allowed-name
/// token in either direction, case-insensitively.
fn fuzzy_token_matches(stored: &str, allowed: &str) -> usize {
    let allowed_tokens: Vec<String> = allowed
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect();

    stored
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .filter(|token| {
            allowed_tokens
                .iter()
                .any(|a| a.contains(token.as_str()) || token.contains(a.as_str()))
        })
        .count()
}
