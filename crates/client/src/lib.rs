//! Explorer client for remote column-exploration services.
//!
//! The entry point is [`Explorer`]: construct one per `(dataset, table,
//! column)` target with a shared [`ResponseCache`], then call
//! [`Explorer::explore`] to launch the exploration, poll it to a terminal
//! status, and receive a [`Metrics`] view over the computed metrics.
//!
//! ```no_run
//! use scry_client::{Explorer, ExploreOptions, ResponseCache};
//! use scry_common::config::AppConfig;
//! use scry_common::models::ColumnIdentity;
//!
//! # async fn run() -> scry_error::Result<()> {
//! let config = AppConfig::default();
//! let cache = ResponseCache::new();
//! let identity = ColumnIdentity::new("gda_banking", "loans", "amount");
//!
//! let explorer = Explorer::new(&config, identity, cache)?;
//! let metrics = explorer.explore(ExploreOptions::default()).await?;
//! assert!(metrics.has("histogram.buckets"));
//! # Ok(())
//! # }
//! ```

mod api;
mod poll;

pub mod cache;
pub mod explorer;
pub mod metrics;

pub use cache::ResponseCache;
pub use explorer::{ExploreOptions, Explorer};
pub use metrics::Metrics;
