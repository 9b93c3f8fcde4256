//! Chart command: resolve a target and render one metric convention to SVG.

use super::helpers;
use crate::output::{self, OutputFormat};
use anyhow::bail;
use owo_colors::OwoColorize;
use scry_charts::{
    cyclical_datetimes, distinct_values, linear_datetimes, numeric_histogram, simple_histogram,
    ChartOptions,
};
use scry_client::ResponseCache;
use scry_common::config::AppConfig;
use scry_common::models::ColumnIdentity;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    /// Bar chart over `histogram.buckets`
    NumericHistogram,
    /// Pie chart over `distinct.values` (falls back to `distinct.top_values`)
    DistinctValues,
    /// Polar bar chart over `dates_cyclical.<component>`
    Cyclical,
    /// Bar chart over `dates_linear.<component>`
    Linear,
    /// Bar chart over an explicitly named record-array metric
    Simple,
}

pub struct ChartRequest {
    pub identity: ColumnIdentity,
    pub kind: ChartKind,
    pub component: Option<String>,
    pub metric: Option<String>,
    pub x: String,
    pub y: String,
    pub title: Option<String>,
    pub out: Option<PathBuf>,
    pub refresh: bool,
}

impl ChartRequest {
    /// The metric name this request draws from.
    fn metric_name(&self) -> anyhow::Result<String> {
        match self.kind {
            ChartKind::NumericHistogram => Ok("histogram.buckets".to_string()),
            ChartKind::DistinctValues => Ok("distinct.values".to_string()),
            ChartKind::Cyclical => Ok(format!("dates_cyclical.{}", self.component()?)),
            ChartKind::Linear => Ok(format!("dates_linear.{}", self.component()?)),
            ChartKind::Simple => match &self.metric {
                Some(metric) => Ok(metric.clone()),
                None => bail!("Missing required argument --metric for simple charts"),
            },
        }
    }

    fn component(&self) -> anyhow::Result<&str> {
        match &self.component {
            Some(component) => Ok(component),
            None => bail!(
                "Missing required argument --component for {:?} charts",
                self.kind
            ),
        }
    }
}

#[derive(Serialize, Default)]
pub struct ChartReport {
    pub metric: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written: Option<String>,
    pub skipped: bool,
}

pub async fn chart(
    config: &AppConfig,
    cache: &ResponseCache,
    request: ChartRequest,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let metric_name = request.metric_name()?;

    let explorer = helpers::build_explorer(config, cache, request.identity.clone())?;
    let (metrics, _) = helpers::resolve_metrics(&explorer, request.refresh).await?;

    let out = request
        .out
        .clone()
        .unwrap_or_else(|| default_output_path(&config.charts.output_dir, &metric_name));
    let options = ChartOptions {
        title: request.title.clone(),
        output: Some(out.clone()),
        ..Default::default()
    };

    let rendered = match request.kind {
        ChartKind::NumericHistogram => numeric_histogram(&metrics, &options)?,
        ChartKind::DistinctValues => distinct_values(&metrics, &options)?,
        ChartKind::Cyclical => {
            cyclical_datetimes(&metrics, request.component()?, &request.x, &request.y, &options)?
        }
        ChartKind::Linear => {
            linear_datetimes(&metrics, request.component()?, &request.x, &request.y, &options)?
        }
        ChartKind::Simple => {
            simple_histogram(&metrics, &metric_name, &request.x, &request.y, &options)?
        }
    };

    let report = match rendered {
        Some(_) => {
            if !format.is_machine_readable() {
                println!(
                    "{} Wrote {} chart to {}",
                    "✔".green(),
                    metric_name.bold(),
                    out.display().to_string().yellow()
                );
            }
            ChartReport {
                metric: metric_name,
                written: Some(out.display().to_string()),
                skipped: false,
            }
        }
        None => {
            if !format.is_machine_readable() {
                println!(
                    "{} No {} metric in the result; nothing rendered.",
                    "!".yellow(),
                    metric_name.bold()
                );
            }
            ChartReport {
                metric: metric_name,
                written: None,
                skipped: true,
            }
        }
    };

    output::print_success(format, report)?;
    Ok(())
}

fn default_output_path(output_dir: &str, metric_name: &str) -> PathBuf {
    Path::new(output_dir).join(format!("{}.svg", metric_name.replace('.', "-")))
}
