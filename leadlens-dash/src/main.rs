//! leadlens-dash - Lead evaluation analytics dashboard
//!
//! Read-only service: merges evaluation records from the configured
//! sources, repairs and scores their payloads, and serves aggregate
//! and detail views with per-route visibility scopes.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use leadlens_common::config::AppConfig;
use leadlens_common::db::{connect_readonly, Source, SourceSet};
use leadlens_common::identity::AliasTable;
use leadlens_common::scope::ScopeTable;
use leadlens_dash::{build_router, AppState};

#[derive(Parser, Debug)]
#[command(
    name = "leadlens-dash",
    version,
    about = "Lead evaluation analytics dashboard"
)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, env = "LEADLENS_CONFIG")]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting LeadLens dashboard (leadlens-dash) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Primary source is mandatory; a missing database is fatal here.
    let primary_pool = connect_readonly(&config.primary.path)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to primary source {}",
                config.primary.path.display()
            )
        })?;
    info!(
        source = %config.primary.label,
        path = %config.primary.path.display(),
        "Connected to primary source (read-only)"
    );
    let primary = Source {
        label: config.primary.label.clone(),
        pool: primary_pool,
    };

    // Secondaries are best-effort from the start: one that cannot be
    // opened is skipped with a warning, matching query-time semantics.
    let mut secondaries = Vec::new();
    for source_config in &config.secondaries {
        match connect_readonly(&source_config.path).await {
            Ok(pool) => {
                info!(
                    source = %source_config.label,
                    path = %source_config.path.display(),
                    "Connected to secondary source (read-only)"
                );
                secondaries.push(Source {
                    label: source_config.label.clone(),
                    pool,
                });
            }
            Err(e) => {
                warn!(
                    source = %source_config.label,
                    error = %e,
                    "Skipping secondary source; it will contribute no rows"
                );
            }
        }
    }

    let state = AppState::new(
        SourceSet::new(primary, secondaries),
        AliasTable::new(config.aliases.clone()),
        ScopeTable::new(config.routes.clone(), config.min_token_matches),
    );
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("leadlens-dash listening on http://{addr}");
    info!("Health check: http://{addr}/health");

    axum::serve(listener, app).await?;

    Ok(())
}
