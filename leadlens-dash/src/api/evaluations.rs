//! Single-evaluation detail view
//!
//! The only path that needs the fully structured payload: the raw
//! `calificacion` blob is repaired and then strictly parsed. A parse
//! failure after repair is reported as a data-quality error, never
//! treated as "evaluation absent".

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use leadlens_common::db::EvaluationQuery;
use leadlens_common::ids::validate_lead_id;
use leadlens_common::payload::repair;
use leadlens_common::scope::VisibilityFilter;
use leadlens_common::Error;

use super::{ApiError, ScopeQuery};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct EvaluationDetailResponse {
    pub lead_id: String,
    pub sellers_id: i64,
    pub seller_name: String,
    pub fecha: String,
    pub origin: String,
    /// Repaired-and-parsed evaluation payload.
    pub calificacion: Value,
}

/// GET /api/evaluation/:lead_id?route=NAME
pub async fn get_evaluation_detail(
    State(state): State<AppState>,
    Path(raw_lead_id): Path<String>,
    Query(scope_query): Query<ScopeQuery>,
) -> Result<Json<EvaluationDetailResponse>, ApiError> {
    let lead_id = validate_lead_id(&raw_lead_id)?;

    let scope = state.scopes.resolve(scope_query.route.as_deref());
    let filter = VisibilityFilter::new(&state.aliases, scope, state.scopes.min_token_matches);

    let merged = state
        .sources
        .fetch_evaluations(EvaluationQuery::ByLeadId(lead_id))
        .await?;

    let Some(row) = merged.rows.first() else {
        return Err(Error::NotFound(format!("evaluation {lead_id}")).into());
    };

    if !filter.allows(&row.seller_name) {
        return Err(Error::AccessDenied(format!(
            "evaluation {lead_id} is outside the route scope"
        ))
        .into());
    }

    let repaired = repair(row.calificacion.as_deref().unwrap_or_default());
    let calificacion: Value = serde_json::from_str(&repaired).map_err(|e| {
        Error::PayloadMalformed(format!("lead {lead_id}: {e}"))
    })?;

    Ok(Json(EvaluationDetailResponse {
        lead_id: row.lead_id.clone(),
        sellers_id: row.sellers_id,
        seller_name: row.seller_name.clone(),
        fecha: row.fecha.clone(),
        origin: row.origin.clone(),
        calificacion,
    }))
}
