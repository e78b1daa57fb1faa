//! Seller detail view

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use leadlens_common::db::EvaluationQuery;
use leadlens_common::ids::validate_seller_id;
use leadlens_common::scope::VisibilityFilter;
use leadlens_common::stats::{aggregate, GlobalStats};
use leadlens_common::Error;

use super::{usable_scored, ApiError, ScopeQuery};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SellerDetailResponse {
    pub sellers_id: i64,
    pub seller_name: String,
    pub stats: GlobalStats,
}

/// GET /api/seller/:id?route=NAME
///
/// The id must be a positive integer; anything else is a validation
/// error rejected before any query runs. A scope that forbids the
/// resolved seller name yields access-denied, distinct from not-found.
pub async fn get_seller_detail(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(scope_query): Query<ScopeQuery>,
) -> Result<Json<SellerDetailResponse>, ApiError> {
    let sellers_id = validate_seller_id(&raw_id)?;

    let scope = state.scopes.resolve(scope_query.route.as_deref());
    let filter = VisibilityFilter::new(&state.aliases, scope, state.scopes.min_token_matches);

    let merged = state
        .sources
        .fetch_evaluations(EvaluationQuery::BySellerId(sellers_id))
        .await?;

    let Some(first) = merged.rows.first() else {
        return Err(Error::NotFound(format!("seller {sellers_id}")).into());
    };

    if !filter.allows(&first.seller_name) {
        return Err(Error::AccessDenied(format!(
            "seller {sellers_id} is outside the route scope"
        ))
        .into());
    }

    let seller_name = state.aliases.canonicalize(&first.seller_name).to_string();
    let scored = usable_scored(&merged.rows, &state.aliases, &filter);
    let (stats, _) = aggregate(scored);

    Ok(Json(SellerDetailResponse {
        sellers_id,
        seller_name,
        stats,
    }))
}
