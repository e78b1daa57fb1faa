//! HTTP API handlers for leadlens-dash

pub mod dashboard;
pub mod error;
pub mod evaluations;
pub mod health;
pub mod sellers;

pub use dashboard::get_dashboard;
pub use error::ApiError;
pub use evaluations::get_evaluation_detail;
pub use health::health_routes;
pub use sellers::get_seller_detail;

use serde::Deserialize;

use leadlens_common::db::EvaluationRow;
use leadlens_common::identity::AliasTable;
use leadlens_common::payload::extract;
use leadlens_common::scope::VisibilityFilter;
use leadlens_common::stats::ScoredEvaluation;

/// Query parameters shared by all scoped endpoints. Route resolution
/// itself happens against the configured scope table; an absent or
/// unknown route means no restriction.
#[derive(Debug, Deserialize)]
pub struct ScopeQuery {
    pub route: Option<String>,
}

/// Run the list pipeline over merged rows: keep rows with a usable
/// score and a visible seller, relabel to canonical names, and carry
/// durations through for aggregation.
pub(crate) fn usable_scored(
    rows: &[EvaluationRow],
    aliases: &AliasTable,
    filter: &VisibilityFilter<'_>,
) -> Vec<ScoredEvaluation> {
    rows.iter()
        .filter_map(|row| {
            let fields = extract(row.calificacion.as_deref().unwrap_or_default());
            let score = fields.usable_score()?;
            if !filter.allows(&row.seller_name) {
                return None;
            }
            Some(ScoredEvaluation {
                sellers_id: row.sellers_id,
                seller_name: aliases.canonicalize(&row.seller_name).to_string(),
                score,
                duration_secs: fields.average_duration_secs,
            })
        })
        .collect()
}
