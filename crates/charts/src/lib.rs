//! Chart rendering for exploration metrics.
//!
//! This crate turns the metric-name conventions of the exploration service
//! (`histogram.buckets`, `distinct.values`, `dates_cyclical.*`,
//! `dates_linear.*`) into SVG charts using the plotters library.
//!
//! Every plot operation is guarded by [`scry_client::Metrics::has`]: a
//! missing metric is a logged no-op (`Ok(None)`), never an error. Display
//! options pass through [`ChartOptions`].
//!
//! # Example
//!
//! ```no_run
//! use scry_charts::{numeric_histogram, ChartOptions};
//! # fn run(metrics: &scry_client::Metrics) -> scry_error::Result<()> {
//! if let Some(chart) = numeric_histogram(metrics, &ChartOptions::default())? {
//!     chart.save("histogram.svg".as_ref())?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod options;
pub mod plots;
mod render;

pub use options::{Chart, ChartOptions};
pub use plots::{
    cycle_length, cyclical_datetimes, distinct_values, linear_datetimes, numeric_histogram,
    scaled_angle, simple_histogram,
};
