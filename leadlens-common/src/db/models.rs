//! Database models

use serde::Serialize;

/// One evaluation record as stored, plus the provenance tag assigned by
/// the multi-source reader. `origin` is never stored; it identifies the
/// configured source a merged row came from and is preserved through
/// filtering into caller-visible lists.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRow {
    pub lead_id: String,
    pub sellers_id: i64,
    pub seller_name: String,
    pub fecha: String,
    /// Opaque quasi-JSON blob from the upstream evaluator; not
    /// guaranteed to be syntactically valid.
    pub calificacion: Option<String>,
    pub origin: String,
}
