//! Multi-source database access
//!
//! The same statement runs against one mandatory primary source and
//! zero or more secondaries, each row tagged with its source label.
//! Primary failure is fatal for the request. A failing secondary is
//! logged and simply contributes no rows; it never aborts the primary
//! results. Sources are queried sequentially, primary first, and the
//! merged order is source order then natural per-source row order.

use std::path::Path;

use sqlx::SqlitePool;
use tracing::warn;

use crate::{Error, Result};

mod models;
pub use models::EvaluationRow;

/// Connect to a source database in read-only mode.
///
/// The analytics pipeline has no write path; mode=ro plus immutable=1
/// keeps SQLite from writing even for internal operations.
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(Error::Config(format!(
            "database not found: {}",
            db_path.display()
        )));
    }

    let db_url = format!("sqlite://{}?mode=ro&immutable=1", db_path.display());
    Ok(SqlitePool::connect(&db_url).await?)
}

/// One configured data source: label (the provenance tag) plus pool.
#[derive(Debug, Clone)]
pub struct Source {
    pub label: String,
    pub pool: SqlitePool,
}

/// The configured set of sources: one primary, any number of
/// secondaries.
#[derive(Debug, Clone)]
pub struct SourceSet {
    pub primary: Source,
    pub secondaries: Vec<Source>,
}

/// Whether a merged read saw every configured source.
///
/// The caller-visible row contract is identical in both cases; the
/// marker exists for observability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    Complete,
    Partial { failed_sources: Vec<String> },
}

/// Rows merged across sources plus the completeness marker.
#[derive(Debug, Clone)]
pub struct Merged<T> {
    pub rows: T,
    pub outcome: MergeOutcome,
}

/// Selection applied identically to every source.
#[derive(Debug, Clone, Copy)]
pub enum EvaluationQuery<'a> {
    All,
    BySellerId(i64),
    ByLeadId(&'a str),
}

impl SourceSet {
    pub fn new(primary: Source, secondaries: Vec<Source>) -> Self {
        Self {
            primary,
            secondaries,
        }
    }

    /// Execute one evaluation query against every configured source and
    /// concatenate the tagged results.
    pub async fn fetch_evaluations(
        &self,
        query: EvaluationQuery<'_>,
    ) -> Result<Merged<Vec<EvaluationRow>>> {
        // Primary first; its failure propagates.
        let mut rows = fetch_from_source(&self.primary, query).await?;

        let mut failed_sources = Vec::new();
        for source in &self.secondaries {
            match fetch_from_source(source, query).await {
                Ok(mut secondary_rows) => rows.append(&mut secondary_rows),
                Err(e) => {
                    warn!(
                        source = %source.label,
                        error = %e,
                        "secondary source query failed; continuing without it"
                    );
                    failed_sources.push(source.label.clone());
                }
            }
        }

        let outcome = if failed_sources.is_empty() {
            MergeOutcome::Complete
        } else {
            MergeOutcome::Partial { failed_sources }
        };

        Ok(Merged { rows, outcome })
    }
}

async fn fetch_from_source(
    source: &Source,
    query: EvaluationQuery<'_>,
) -> Result<Vec<EvaluationRow>> {
    const COLUMNS: &str = "lead_id, sellers_id, seller_name, fecha, calificacion";

    type Row = (String, i64, String, String, Option<String>);

    let rows: Vec<Row> = match query {
        EvaluationQuery::All => {
            sqlx::query_as(&format!(
                "SELECT {COLUMNS} FROM evaluations ORDER BY fecha DESC"
            ))
            .fetch_all(&source.pool)
            .await?
        }
        EvaluationQuery::BySellerId(sellers_id) => {
            sqlx::query_as(&format!(
                "SELECT {COLUMNS} FROM evaluations WHERE sellers_id = ? ORDER BY fecha DESC"
            ))
            .bind(sellers_id)
            .fetch_all(&source.pool)
            .await?
        }
        EvaluationQuery::ByLeadId(lead_id) => {
            sqlx::query_as(&format!(
                "SELECT {COLUMNS} FROM evaluations WHERE lead_id = ?"
            ))
            .bind(lead_id)
            .fetch_all(&source.pool)
            .await?
        }
    };

    Ok(rows
        .into_iter()
        .map(
            |(lead_id, sellers_id, seller_name, fecha, calificacion)| EvaluationRow {
                lead_id,
                sellers_id,
                seller_name,
                fecha,
                calificacion,
                origin: source.label.clone(),
            },
        )
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// Single connection so the in-memory database is shared across
    /// queries on the same pool.
    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool")
    }

    async fn seeded_source(label: &str, rows: &[(&str, i64, &str, &str, &str)]) -> Source {
        let pool = memory_pool().await;
        sqlx::query(
            "CREATE TABLE evaluations (
                lead_id TEXT NOT NULL,
                sellers_id INTEGER NOT NULL,
                seller_name TEXT NOT NULL,
                fecha TEXT NOT NULL,
                calificacion TEXT
            )",
        )
        .execute(&pool)
        .await
        .expect("create table");

        for (lead_id, sellers_id, seller_name, fecha, calificacion) in rows {
            sqlx::query("INSERT INTO evaluations VALUES (?, ?, ?, ?, ?)")
                .bind(lead_id)
                .bind(sellers_id)
                .bind(seller_name)
                .bind(fecha)
                .bind(calificacion)
                .execute(&pool)
                .await
                .expect("insert row");
        }

        Source {
            label: label.to_string(),
            pool,
        }
    }

    /// A source whose queries always fail: the evaluations table is
    /// missing entirely.
    async fn broken_source(label: &str) -> Source {
        Source {
            label: label.to_string(),
            pool: memory_pool().await,
        }
    }

    #[tokio::test]
    async fn merges_sources_in_order_with_provenance() {
        let primary = seeded_source(
            "principal",
            &[("L-1", 1, "Ana Sosa", "2024-03-02", "{}")],
        )
        .await;
        let secondary = seeded_source(
            "sucursal",
            &[("L-2", 2, "Luis Soto", "2024-03-05", "{}")],
        )
        .await;

        let sources = SourceSet::new(primary, vec![secondary]);
        let merged = sources
            .fetch_evaluations(EvaluationQuery::All)
            .await
            .expect("merged read");

        assert_eq!(merged.outcome, MergeOutcome::Complete);
        assert_eq!(merged.rows.len(), 2);
        // Source order, not date order: primary rows come first.
        assert_eq!(merged.rows[0].lead_id, "L-1");
        assert_eq!(merged.rows[0].origin, "principal");
        assert_eq!(merged.rows[1].origin, "sucursal");
    }

    #[tokio::test]
    async fn secondary_failure_keeps_primary_rows() {
        let primary = seeded_source(
            "principal",
            &[("L-1", 1, "Ana Sosa", "2024-03-02", "{}")],
        )
        .await;
        let secondary = broken_source("sucursal").await;

        let sources = SourceSet::new(primary, vec![secondary]);
        let merged = sources
            .fetch_evaluations(EvaluationQuery::All)
            .await
            .expect("primary rows survive secondary failure");

        assert_eq!(merged.rows.len(), 1);
        assert_eq!(merged.rows[0].origin, "principal");
        assert_eq!(
            merged.outcome,
            MergeOutcome::Partial {
                failed_sources: vec!["sucursal".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn primary_failure_is_fatal() {
        let sources = SourceSet::new(broken_source("principal").await, Vec::new());
        let result = sources.fetch_evaluations(EvaluationQuery::All).await;
        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[tokio::test]
    async fn by_seller_and_by_lead_filters() {
        let primary = seeded_source(
            "principal",
            &[
                ("L-1", 1, "Ana Sosa", "2024-03-02", "{}"),
                ("L-2", 2, "Luis Soto", "2024-03-05", "{}"),
            ],
        )
        .await;
        let sources = SourceSet::new(primary, Vec::new());

        let by_seller = sources
            .fetch_evaluations(EvaluationQuery::BySellerId(2))
            .await
            .expect("by seller");
        assert_eq!(by_seller.rows.len(), 1);
        assert_eq!(by_seller.rows[0].seller_name, "Luis Soto");

        let by_lead = sources
            .fetch_evaluations(EvaluationQuery::ByLeadId("L-1"))
            .await
            .expect("by lead");
        assert_eq!(by_lead.rows.len(), 1);
        assert_eq!(by_lead.rows[0].lead_id, "L-1");
    }
}
