//! Named-metric lookup view over one exploration result.

use scry_common::models::Metric;
use std::collections::HashMap;
use tracing::warn;

/// A name-to-value view over the metric list of a completed exploration.
///
/// Construction mirrors dictionary building from a sequence: if the service
/// repeats a metric name, the last occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    values: HashMap<String, serde_json::Value>,
}

impl Metrics {
    pub fn new(metrics: Vec<Metric>) -> Self {
        Self {
            values: metrics.into_iter().map(|m| (m.name, m.value)).collect(),
        }
    }

    /// Whether a metric with this name is present. Logs (with a closest-match
    /// hint when one exists) on absence; chart operations use this as their
    /// no-op guard.
    pub fn has(&self, name: &str) -> bool {
        if self.values.contains_key(name) {
            return true;
        }
        let available: Vec<String> = self.values.keys().cloned().collect();
        match scry_error::closest_match(name, &available) {
            Some(suggestion) => warn!("No {} metric. Did you mean '{}'?", name, suggestion),
            None => warn!("No {} metric.", name),
        }
        false
    }

    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.values.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
