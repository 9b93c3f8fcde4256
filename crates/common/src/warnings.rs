//! # Explore Warnings
//!
//! Task-local warning collection for explore calls.
//!
//! This module provides a mechanism to collect non-fatal signals (e.g., cache
//! hit/miss) during an explore call and propagate them back to the caller.

use std::future::Future;
use std::sync::{Arc, Mutex};

tokio::task_local! {
    pub static EXPLORE_WARNINGS: Arc<Mutex<Vec<String>>>;
}

/// Helper to add a warning to the current task's warning list, if active.
pub fn add_warning(warning: String) {
    if let Ok(warnings) = EXPLORE_WARNINGS.try_with(|w: &Arc<Mutex<Vec<String>>>| w.clone()) {
        if let Ok(mut lock) = warnings.lock() {
            lock.push(warning);
        }
    }
}

/// Run a future with an active warning scope and return its collected warnings.
pub async fn collect_warnings<F, T>(fut: F) -> (T, Vec<String>)
where
    F: Future<Output = T>,
{
    let store = Arc::new(Mutex::new(Vec::new()));
    let output = EXPLORE_WARNINGS.scope(store.clone(), fut).await;
    let warnings = store.lock().map(|w| w.clone()).unwrap_or_default();
    (output, warnings)
}
