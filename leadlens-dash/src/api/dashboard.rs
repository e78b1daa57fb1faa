//! Dashboard view: global stats, seller ranking, roster, lead list

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use leadlens_common::db::EvaluationQuery;
use leadlens_common::payload::extract;
use leadlens_common::scope::VisibilityFilter;
use leadlens_common::stats::{aggregate, GlobalStats, SellerStats};

use super::{usable_scored, ApiError, ScopeQuery};
use crate::AppState;

/// One seller on the roster: canonical name plus the smallest
/// underlying id seen for it.
#[derive(Debug, Serialize)]
pub struct SellerEntry {
    pub sellers_id: i64,
    pub seller_name: String,
}

/// One lead on the dashboard list. The stored seller name is kept
/// verbatim here; only aggregated contexts unify it.
#[derive(Debug, Serialize)]
pub struct LeadEntry {
    pub lead_id: String,
    pub seller_name: String,
    pub sellers_id: i64,
    pub fecha: String,
    pub origin: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub stats: GlobalStats,
    pub ranking: Vec<SellerStats>,
    pub sellers: Vec<SellerEntry>,
    pub leads: Vec<LeadEntry>,
}

/// GET /api/dashboard?route=NAME
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(scope_query): Query<ScopeQuery>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let scope = state.scopes.resolve(scope_query.route.as_deref());
    let filter = VisibilityFilter::new(&state.aliases, scope, state.scopes.min_token_matches);

    let merged = state.sources.fetch_evaluations(EvaluationQuery::All).await?;

    let scored = usable_scored(&merged.rows, &state.aliases, &filter);
    let (stats, ranking) = aggregate(scored);

    // Roster: every visible seller, identity-unified, smallest id per
    // canonical name, encounter order.
    let mut sellers: Vec<SellerEntry> = Vec::new();
    for row in &merged.rows {
        if !filter.allows(&row.seller_name) {
            continue;
        }
        let canonical = state.aliases.canonicalize(&row.seller_name);
        match sellers.iter_mut().find(|s| s.seller_name == canonical) {
            Some(entry) => entry.sellers_id = entry.sellers_id.min(row.sellers_id),
            None => sellers.push(SellerEntry {
                sellers_id: row.sellers_id,
                seller_name: canonical.to_string(),
            }),
        }
    }

    // Lead list: valid (usable-score) evaluations only, provenance
    // preserved, date descending across sources.
    let mut leads: Vec<LeadEntry> = merged
        .rows
        .iter()
        .filter(|row| {
            extract(row.calificacion.as_deref().unwrap_or_default())
                .usable_score()
                .is_some()
                && filter.allows(&row.seller_name)
        })
        .map(|row| LeadEntry {
            lead_id: row.lead_id.clone(),
            seller_name: row.seller_name.clone(),
            sellers_id: row.sellers_id,
            fecha: row.fecha.clone(),
            origin: row.origin.clone(),
        })
        .collect();
    leads.sort_by(|a, b| b.fecha.cmp(&a.fecha));

    Ok(Json(DashboardResponse {
        stats,
        ranking,
        sellers,
        leads,
    }))
}
