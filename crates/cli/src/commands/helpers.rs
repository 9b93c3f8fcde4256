//! Shared helpers for CLI commands.

use scry_client::{ExploreOptions, Explorer, Metrics, ResponseCache};
use scry_common::config::AppConfig;
use scry_common::models::ColumnIdentity;
use scry_common::warnings::collect_warnings;

/// Build an [`Explorer`] for one target against the shared cache handle.
pub fn build_explorer(
    config: &AppConfig,
    cache: &ResponseCache,
    identity: ColumnIdentity,
) -> anyhow::Result<Explorer> {
    Ok(Explorer::new(config, identity, cache.clone())?)
}

/// Resolve a target to its metrics, collecting cache hit/miss signals.
pub async fn resolve_metrics(
    explorer: &Explorer,
    refresh: bool,
) -> anyhow::Result<(Metrics, Vec<String>)> {
    let (result, warnings) = collect_warnings(explorer.explore(ExploreOptions {
        refresh_cache: refresh,
    }))
    .await;
    Ok((result?, warnings))
}
