//! CLI command implementations, split into logical modules.

mod cache;
mod chart;
mod explore;
mod helpers;

// Re-export public command functions
pub use cache::cache_dump;
pub use chart::{chart, ChartKind, ChartRequest};
pub use explore::explore;
