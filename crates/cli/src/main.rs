//! Scry CLI: launch, poll, and chart remote column explorations.
//!
//! # Core Commands
//!
//! - `explore`: resolve a `(dataset, table, column)` target and list its metrics.
//! - `chart`: render one of the known metric conventions to an SVG file.
//! - `cache dump`: print the raw cached result payload for a target.
//!
//! Configuration comes from an optional `scry.yaml` plus `SCRY`-prefixed
//! environment variables; the API key can also be passed with `--api-key`.

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use owo_colors::OwoColorize;
use secrecy::SecretString;
use std::path::PathBuf;

mod commands;
mod exit_codes;
mod output;

use commands::{ChartKind, ChartRequest};
use output::OutputFormat;
use scry_client::ResponseCache;
use scry_common::config::AppConfig;
use scry_common::models::ColumnIdentity;
use scry_error::ErrorCategory;

#[derive(Parser)]
#[command(name = "scry")]
#[command(about = "Explore remote dataset columns and chart their metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (human, json, yaml)
    #[arg(long, global = true, value_enum, default_value = "human")]
    output: OutputFormat,

    /// Path to the configuration file
    #[arg(long, global = true, default_value = "scry.yaml")]
    config: String,

    /// API key for the exploration service
    #[arg(long, global = true, env = "SCRY_API_KEY")]
    api_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Explore a column and list the computed metrics
    Explore {
        /// Dataset name
        dataset: String,
        /// Table name
        table: String,
        /// Column name
        column: String,
        /// Bypass the response cache for this call
        #[arg(long, default_value_t = false)]
        refresh: bool,
    },
    /// Render a chart for one of the known metric conventions
    Chart {
        /// Which chart to render
        #[arg(value_enum)]
        kind: ChartKind,
        /// Dataset name
        dataset: String,
        /// Table name
        table: String,
        /// Column name
        column: String,
        /// Datetime component for cyclical/linear charts (hour, weekday, ...)
        #[arg(long)]
        component: Option<String>,
        /// Metric name for simple charts
        #[arg(long)]
        metric: Option<String>,
        /// Record field for the x axis / polar angle
        #[arg(long, default_value = "value")]
        x: String,
        /// Record field for the y axis / polar radius
        #[arg(long, default_value = "count")]
        y: String,
        /// Chart title
        #[arg(long)]
        title: Option<String>,
        /// Output file (defaults to <charts.output_dir>/<metric>.svg)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Bypass the response cache for this call
        #[arg(long, default_value_t = false)]
        refresh: bool,
    },
    /// Inspect the response cache
    Cache {
        #[command(subcommand)]
        subcommand: CacheCommands,
    },
}

#[derive(Subcommand)]
enum CacheCommands {
    /// Resolve a target and print its raw result payload
    Dump {
        /// Dataset name
        dataset: String,
        /// Table name
        table: String,
        /// Column name
        column: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();
    scry_common::telemetry::init_tracing("info");

    let cli = Cli::parse();

    let mut config = AppConfig::from_file(&cli.config)
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Override the API key from CLI args if present
    if let Some(api_key) = &cli.api_key {
        config.service.api_key = Some(SecretString::from(api_key.clone()));
    }

    if let Err(e) = run_cli(&cli, &config).await {
        let exit_code = map_error_to_exit_code(&e);
        if cli.output.is_machine_readable() {
            output::print_error(cli.output, &e.to_string(), exit_code).ok();
        } else {
            eprintln!("{} {}", "Error:".red().bold(), e);
        }
        std::process::exit(exit_code);
    }

    Ok(())
}

fn map_error_to_exit_code(e: &anyhow::Error) -> i32 {
    // Try to downcast to ScryError for type-safe mapping
    if let Some(scry_err) = e.downcast_ref::<scry_error::ScryError>() {
        return match scry_err.code.category() {
            ErrorCategory::Transport => exit_codes::CONNECTION_ERROR,
            ErrorCategory::Query => exit_codes::QUERY_ERROR,
            ErrorCategory::Config => exit_codes::CONFIG_ERROR,
            ErrorCategory::Auth => exit_codes::PERMISSION_ERROR,
            ErrorCategory::Internal => exit_codes::GENERAL_ERROR,
            _ => exit_codes::GENERAL_ERROR, // Handle future variants
        };
    }

    // Fallback: string heuristics for non-ScryError types
    let s = e.to_string().to_lowercase();
    if s.contains("usage") || s.contains("argument") {
        return exit_codes::USAGE_ERROR;
    }
    if s.contains("config") || s.contains("yaml") {
        return exit_codes::CONFIG_ERROR;
    }
    if s.contains("connect") || s.contains("timeout") {
        return exit_codes::CONNECTION_ERROR;
    }
    if s.contains("unauthorized") || s.contains("api key") {
        return exit_codes::PERMISSION_ERROR;
    }
    exit_codes::GENERAL_ERROR
}

async fn run_cli(cli: &Cli, config: &AppConfig) -> Result<(), anyhow::Error> {
    let cache = ResponseCache::new();

    match &cli.command {
        Commands::Explore {
            dataset,
            table,
            column,
            refresh,
        } => {
            commands::explore(
                config,
                &cache,
                ColumnIdentity::new(dataset, table, column),
                *refresh,
                cli.output,
            )
            .await?;
        }
        Commands::Chart {
            kind,
            dataset,
            table,
            column,
            component,
            metric,
            x,
            y,
            title,
            out,
            refresh,
        } => {
            commands::chart(
                config,
                &cache,
                ChartRequest {
                    identity: ColumnIdentity::new(dataset, table, column),
                    kind: *kind,
                    component: component.clone(),
                    metric: metric.clone(),
                    x: x.clone(),
                    y: y.clone(),
                    title: title.clone(),
                    out: out.clone(),
                    refresh: *refresh,
                },
                cli.output,
            )
            .await?;
        }
        Commands::Cache { subcommand } => match subcommand {
            CacheCommands::Dump {
                dataset,
                table,
                column,
            } => {
                commands::cache_dump(
                    config,
                    &cache,
                    ColumnIdentity::new(dataset, table, column),
                    cli.output,
                )
                .await?;
            }
        },
    }
    Ok(())
}
