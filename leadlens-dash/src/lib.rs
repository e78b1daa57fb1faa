//! leadlens-dash library - analytics dashboard service
//!
//! Read-only web service over the evaluation reconciliation pipeline:
//! merges lead evaluations from the configured sources, repairs and
//! extracts scored fields, unifies seller identities, applies route
//! visibility scopes, and serves aggregate and detail views.

use std::sync::Arc;

use axum::Router;
use leadlens_common::db::SourceSet;
use leadlens_common::identity::AliasTable;
use leadlens_common::scope::ScopeTable;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Configured data sources (read-only pools)
    pub sources: Arc<SourceSet>,
    /// Immutable alias → canonical seller name table
    pub aliases: Arc<AliasTable>,
    /// Immutable route → visibility scope table
    pub scopes: Arc<ScopeTable>,
}

impl AppState {
    /// Create new application state
    pub fn new(sources: SourceSet, aliases: AliasTable, scopes: ScopeTable) -> Self {
        Self {
            sources: Arc::new(sources),
            aliases: Arc::new(aliases),
            scopes: Arc::new(scopes),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/api/dashboard", get(api::get_dashboard))
        .route("/api/seller/:id", get(api::get_seller_detail))
        .route("/api/evaluation/:lead_id", get(api::get_evaluation_detail))
        .merge(api::health_routes())
        .with_state(state)
}
