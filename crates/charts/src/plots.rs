//! Plots for the exploration service's metric-name conventions.
//!
//! Each function resolves one metric by name, shapes its value into chart
//! records, and hands them to the SVG renderers. A metric that is absent
//! from the view is a logged no-op (`Ok(None)`); an unrecognized time
//! component is a typed error.

use crate::options::{Chart, ChartOptions};
use crate::render::{bar_svg, pie_svg, polar_bar_svg, PolarBar};
use scry_client::Metrics;
use scry_error::{ErrorCode, ErrorContext, Result, ScryError};
use serde_json::Value;

const NUMERIC_HISTOGRAM_METRIC: &str = "histogram.buckets";
const DISTINCT_VALUES_METRIC: &str = "distinct.values";
const DISTINCT_TOP_VALUES_METRIC: &str = "distinct.top_values";

/// Cycle lengths for the recognized datetime components.
const CYCLES: [(&str, f64); 7] = [
    ("hour", 24.0),
    ("minute", 60.0),
    ("second", 60.0),
    ("day", 31.0),
    ("weekday", 7.0),
    ("quarter", 4.0),
    ("month", 12.0),
];

/// Cycle length of a datetime component (`hour` → 24, `weekday` → 7, ...).
pub fn cycle_length(component: &str) -> Result<f64> {
    if let Some((_, cycle)) = CYCLES.iter().find(|(name, _)| *name == component) {
        return Ok(*cycle);
    }

    let recognized: Vec<String> = CYCLES.iter().map(|(name, _)| name.to_string()).collect();
    let mut err = ScryError::new(
        ErrorCode::UnknownTimeComponent,
        format!("'{}' is not a recognized time component", component),
    )
    .with_context(ErrorContext::TimeComponent {
        component: component.to_string(),
        recognized: recognized.clone(),
    });
    err = match scry_error::closest_match(component, &recognized) {
        Some(suggestion) => err.with_hint(format!("Did you mean '{}'?", suggestion)),
        None => err.with_hint(format!("Recognized components: {}", recognized.join(", "))),
    };
    Err(err)
}

/// Scale a raw time value into `[0, 360)` degrees of its cycle.
pub fn scaled_angle(value: f64, cycle: f64) -> f64 {
    value * 360.0 / cycle
}

/// Bar chart over a record-array metric with configurable axis fields.
pub fn simple_histogram(
    metrics: &Metrics,
    name: &str,
    x_field: &str,
    y_field: &str,
    options: &ChartOptions,
) -> Result<Option<Chart>> {
    if !metrics.has(name) {
        return Ok(None);
    }
    let data = record_pairs(metrics.get(name).unwrap_or(&Value::Null), name, x_field, y_field)?;
    bar_svg(&data, x_field, y_field, options).map(Some)
}

/// [`simple_histogram`] fixed to `histogram.buckets` with x-field `lowerBound`.
pub fn numeric_histogram(metrics: &Metrics, options: &ChartOptions) -> Result<Option<Chart>> {
    simple_histogram(metrics, NUMERIC_HISTOGRAM_METRIC, "lowerBound", "count", options)
}

/// Pie chart of value shares from `distinct.values`, falling back to
/// `distinct.top_values`. A view carrying neither is a no-op.
pub fn distinct_values(metrics: &Metrics, options: &ChartOptions) -> Result<Option<Chart>> {
    let name = if metrics.has(DISTINCT_VALUES_METRIC) {
        DISTINCT_VALUES_METRIC
    } else if metrics.has(DISTINCT_TOP_VALUES_METRIC) {
        DISTINCT_TOP_VALUES_METRIC
    } else {
        return Ok(None);
    };

    let data = record_pairs(metrics.get(name).unwrap_or(&Value::Null), name, "value", "count")?;
    pie_svg(&data, options).map(Some)
}

/// Polar bar chart over `dates_cyclical.<component>`: each count bucket is
/// placed at `value * 360 / cycle_length(component)` degrees.
///
/// The component is validated against the cycle table before the metric
/// lookup, so `cyclical_datetimes(.., "banana", ..)` always fails.
pub fn cyclical_datetimes(
    metrics: &Metrics,
    component: &str,
    theta_field: &str,
    r_field: &str,
    options: &ChartOptions,
) -> Result<Option<Chart>> {
    let cycle = cycle_length(component)?;

    let name = format!("dates_cyclical.{}", component);
    if !metrics.has(&name) {
        return Ok(None);
    }

    let counts = counts_array(metrics.get(&name).unwrap_or(&Value::Null), &name)?;
    let bars: Vec<PolarBar> = counts
        .iter()
        .filter_map(|record| {
            let raw = field_f64(record, theta_field)?;
            Some(PolarBar {
                angle_deg: scaled_angle(raw, cycle),
                value: field_f64(record, r_field).unwrap_or(0.0),
            })
        })
        .collect();

    polar_bar_svg(&bars, 360.0 / cycle, options).map(Some)
}

/// Bar chart over `dates_linear.<component>`'s count buckets, no angle
/// transform.
pub fn linear_datetimes(
    metrics: &Metrics,
    component: &str,
    x_field: &str,
    y_field: &str,
    options: &ChartOptions,
) -> Result<Option<Chart>> {
    let name = format!("dates_linear.{}", component);
    if !metrics.has(&name) {
        return Ok(None);
    }

    let counts = counts_array(metrics.get(&name).unwrap_or(&Value::Null), &name)?;
    let data: Vec<(String, f64)> = counts
        .iter()
        .map(|record| {
            (
                field_label(record, x_field),
                field_f64(record, y_field).unwrap_or(0.0),
            )
        })
        .collect();
    bar_svg(&data, x_field, y_field, options).map(Some)
}

fn shape_error(name: &str, expected: &str) -> ScryError {
    ScryError::new(
        ErrorCode::ChartRenderFailed,
        format!("Metric '{}' does not carry {}", name, expected),
    )
}

/// Extract `(label, value)` pairs from a record-array metric.
fn record_pairs(
    value: &Value,
    name: &str,
    x_field: &str,
    y_field: &str,
) -> Result<Vec<(String, f64)>> {
    let records = value
        .as_array()
        .ok_or_else(|| shape_error(name, "a record array"))?;

    Ok(records
        .iter()
        .map(|record| {
            (
                field_label(record, x_field),
                field_f64(record, y_field).unwrap_or(0.0),
            )
        })
        .collect())
}

/// The `counts` record array of a datetime metric.
fn counts_array<'a>(value: &'a Value, name: &str) -> Result<&'a Vec<Value>> {
    value
        .get("counts")
        .and_then(Value::as_array)
        .ok_or_else(|| shape_error(name, "a 'counts' record array"))
}

fn field_f64(record: &Value, field: &str) -> Option<f64> {
    record.get(field).and_then(Value::as_f64)
}

fn field_label(record: &Value, field: &str) -> String {
    match record.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scry_common::models::Metric;
    use serde_json::json;

    fn view(entries: Vec<(&str, Value)>) -> Metrics {
        Metrics::new(
            entries
                .into_iter()
                .map(|(name, value)| Metric {
                    name: name.to_string(),
                    value,
                })
                .collect(),
        )
    }

    fn buckets() -> Value {
        json!([
            { "lowerBound": 0.0, "count": 10 },
            { "lowerBound": 10.0, "count": 5 },
            { "lowerBound": 20.0, "count": 1 }
        ])
    }

    #[test]
    fn test_cycle_lengths() {
        assert_eq!(cycle_length("hour").unwrap(), 24.0);
        assert_eq!(cycle_length("minute").unwrap(), 60.0);
        assert_eq!(cycle_length("second").unwrap(), 60.0);
        assert_eq!(cycle_length("day").unwrap(), 31.0);
        assert_eq!(cycle_length("weekday").unwrap(), 7.0);
        assert_eq!(cycle_length("quarter").unwrap(), 4.0);
        assert_eq!(cycle_length("month").unwrap(), 12.0);
    }

    #[test]
    fn test_unknown_component_is_typed_error() {
        let err = cycle_length("banana").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownTimeComponent);

        let err = cycle_length("hou").unwrap_err();
        assert_eq!(err.hint, Some("Did you mean 'hour'?".to_string()));
    }

    #[test]
    fn test_scaled_angle() {
        // Hour 6 lands at 90 degrees of a 24-hour cycle
        assert_eq!(scaled_angle(6.0, 24.0), 90.0);
        assert_eq!(scaled_angle(0.0, 24.0), 0.0);
        assert_eq!(scaled_angle(30.0, 60.0), 180.0);
    }

    #[test]
    fn test_numeric_histogram_renders() {
        let metrics = view(vec![("histogram.buckets", buckets())]);
        let chart = numeric_histogram(&metrics, &ChartOptions::default())
            .unwrap()
            .expect("chart skipped");
        assert!(chart.svg.contains("<svg"));
    }

    #[test]
    fn test_missing_metric_is_noop() {
        let metrics = view(vec![]);
        assert!(numeric_histogram(&metrics, &ChartOptions::default())
            .unwrap()
            .is_none());
        assert!(
            simple_histogram(&metrics, "anything", "value", "count", &ChartOptions::default())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_non_array_metric_is_render_error() {
        let metrics = view(vec![("histogram.buckets", json!(42))]);
        let err = numeric_histogram(&metrics, &ChartOptions::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ChartRenderFailed);
    }

    #[test]
    fn test_distinct_values_prefers_full_list() {
        let metrics = view(vec![
            (
                "distinct.values",
                json!([{ "value": "CZ", "count": 10 }, { "value": "DE", "count": 4 }]),
            ),
            ("distinct.top_values", json!([{ "value": "CZ", "count": 1 }])),
        ]);
        let chart = distinct_values(&metrics, &ChartOptions::default())
            .unwrap()
            .expect("chart skipped");
        assert!(chart.svg.contains("CZ"));
    }

    #[test]
    fn test_distinct_values_falls_back_to_top_values() {
        let metrics = view(vec![(
            "distinct.top_values",
            json!([{ "value": "CZ", "count": 10 }, { "value": "DE", "count": 4 }]),
        )]);
        assert!(distinct_values(&metrics, &ChartOptions::default())
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_distinct_values_noop_when_both_absent() {
        let metrics = view(vec![("naive_min", json!(3))]);
        assert!(distinct_values(&metrics, &ChartOptions::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_cyclical_datetimes_renders_polar_chart() {
        let metrics = view(vec![(
            "dates_cyclical.hour",
            json!({
                "total": 100,
                "suppressed": 0,
                "counts": [
                    { "value": 6, "count": 40 },
                    { "value": 12, "count": 35 },
                    { "value": 18, "count": 25 }
                ]
            }),
        )]);
        let chart = cyclical_datetimes(&metrics, "hour", "value", "count", &ChartOptions::default())
            .unwrap()
            .expect("chart skipped");
        assert!(chart.svg.contains("<svg"));
    }

    #[test]
    fn test_cyclical_datetimes_rejects_unknown_component() {
        // Validation precedes the metric lookup: no such metric exists here
        let metrics = view(vec![]);
        let err = cyclical_datetimes(&metrics, "banana", "value", "count", &ChartOptions::default())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownTimeComponent);
    }

    #[test]
    fn test_cyclical_datetimes_noop_when_metric_absent() {
        let metrics = view(vec![]);
        assert!(
            cyclical_datetimes(&metrics, "hour", "value", "count", &ChartOptions::default())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_linear_datetimes_renders_counts() {
        let metrics = view(vec![(
            "dates_linear.year",
            json!({
                "total": 60,
                "suppressed": 0,
                "counts": [
                    { "value": "2019", "count": 20 },
                    { "value": "2020", "count": 40 }
                ]
            }),
        )]);
        let chart = linear_datetimes(&metrics, "year", "value", "count", &ChartOptions::default())
            .unwrap()
            .expect("chart skipped");
        assert!(chart.svg.contains("<svg"));
    }

    #[test]
    fn test_datetime_metric_without_counts_is_render_error() {
        let metrics = view(vec![("dates_linear.year", json!({ "total": 60 }))]);
        let err = linear_datetimes(&metrics, "year", "value", "count", &ChartOptions::default())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ChartRenderFailed);
    }
}
