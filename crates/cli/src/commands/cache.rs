//! Cache command: inspect the raw cached payload for a target.

use super::helpers;
use crate::output::{self, OutputFormat};
use anyhow::Context;
use scry_client::ResponseCache;
use scry_common::config::AppConfig;
use scry_common::models::ColumnIdentity;

/// Resolve a target (served from cache when warm) and print the raw result
/// payload it cached.
pub async fn cache_dump(
    config: &AppConfig,
    cache: &ResponseCache,
    identity: ColumnIdentity,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let explorer = helpers::build_explorer(config, cache, identity.clone())?;
    helpers::resolve_metrics(&explorer, false).await?;

    let payload = explorer
        .cached_payload()
        .with_context(|| format!("No cached result for {}", identity))?;

    if format.is_machine_readable() {
        let value: serde_json::Value = serde_json::from_str(&payload)?;
        output::print_output(format, value)?;
    } else {
        println!("{}", payload);
    }
    Ok(())
}
