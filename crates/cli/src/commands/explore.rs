//! Explore command: resolve a target and list its metrics.

use super::helpers;
use crate::output::{self, OutputFormat};
use owo_colors::OwoColorize;
use scry_client::ResponseCache;
use scry_common::config::AppConfig;
use scry_common::models::ColumnIdentity;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Serialize)]
pub struct ExploreReport {
    pub dataset: String,
    pub table: String,
    pub column: String,
    pub warnings: Vec<String>,
    pub metrics: BTreeMap<String, Value>,
}

pub async fn explore(
    config: &AppConfig,
    cache: &ResponseCache,
    identity: ColumnIdentity,
    refresh: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if !format.is_machine_readable() {
        println!(
            "{} {}",
            "Exploring".bold().cyan(),
            identity.to_string().bold()
        );
    }

    let explorer = helpers::build_explorer(config, cache, identity.clone())?;
    let (metrics, warnings) = helpers::resolve_metrics(&explorer, refresh).await?;

    if format.is_machine_readable() {
        let report = ExploreReport {
            dataset: identity.dataset,
            table: identity.table,
            column: identity.column,
            warnings,
            metrics: metrics
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        };
        output::print_success(format, report)?;
        return Ok(());
    }

    if metrics.is_empty() {
        println!("No metrics in the result.");
        return Ok(());
    }

    let mut names: Vec<&str> = metrics.names().collect();
    names.sort_unstable();
    for name in names {
        let value = metrics.get(name).unwrap_or(&Value::Null);
        println!(
            "  {} {}: {}",
            "•".cyan(),
            name.bold(),
            summarize_value(value).dimmed()
        );
    }
    Ok(())
}

/// One-line rendering of a metric value for the human listing.
fn summarize_value(value: &Value) -> String {
    match value {
        Value::Array(records) => format!("[{} records]", records.len()),
        Value::Object(map) => match map.get("counts").and_then(Value::as_array) {
            Some(counts) => format!("{{{} count buckets}}", counts.len()),
            None => format!("{{{}}}", map.keys().cloned().collect::<Vec<_>>().join(", ")),
        },
        scalar => scalar.to_string(),
    }
}
