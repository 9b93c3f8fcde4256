//! SVG renderers: vertical bars, pie shares, and polar bars.
//!
//! Plotters has no native polar coordinate system, so pie slices and polar
//! bars are drawn as sector polygons on a unit-circle cartesian plane.

use crate::options::{Chart, ChartOptions};
use plotters::prelude::*;
use scry_error::{ErrorCode, Result, ScryError};

const DEFAULT_FILL_RGB: (u8, u8, u8) = (70, 130, 180);
const RING_RGB: RGBColor = RGBColor(200, 200, 200);

/// One bar of a polar chart: angle in degrees, value in source units.
pub(crate) struct PolarBar {
    pub angle_deg: f64,
    pub value: f64,
}

fn render_err<E: std::fmt::Display>(err: E) -> ScryError {
    ScryError::new(ErrorCode::ChartRenderFailed, err.to_string())
}

fn fill_color(options: &ChartOptions) -> RGBColor {
    let (r, g, b) = options.color.unwrap_or(DEFAULT_FILL_RGB);
    RGBColor(r, g, b)
}

fn finish(svg: String, options: &ChartOptions) -> Result<Chart> {
    let chart = Chart { svg };
    if let Some(path) = &options.output {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        chart.save(path)?;
    }
    Ok(chart)
}

/// Points outlining a ring sector between `r0..r1` and `a0..a1` degrees.
/// Angles run clockwise from 12 o'clock.
fn sector(r0: f64, r1: f64, a0: f64, a1: f64) -> Vec<(f64, f64)> {
    let steps = 16;
    let mut points = Vec::with_capacity(2 * (steps + 1));
    for i in 0..=steps {
        let a = (a0 + (a1 - a0) * i as f64 / steps as f64).to_radians();
        points.push((r1 * a.sin(), r1 * a.cos()));
    }
    for i in (0..=steps).rev() {
        let a = (a0 + (a1 - a0) * i as f64 / steps as f64).to_radians();
        points.push((r0 * a.sin(), r0 * a.cos()));
    }
    points
}

pub(crate) fn bar_svg(
    data: &[(String, f64)],
    x_desc: &str,
    y_desc: &str,
    options: &ChartOptions,
) -> Result<Chart> {
    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (options.width, options.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let y_max = data.iter().map(|(_, v)| *v).fold(0.0f64, f64::max);
        let y_max = if y_max <= 0.0 { 1.0 } else { y_max * 1.1 };
        let n = data.len().max(1);

        let mut chart = ChartBuilder::on(&root)
            .caption(options.title.as_deref().unwrap_or(""), ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0f64..n as f64, 0f64..y_max)
            .map_err(render_err)?;

        let labels: Vec<String> = data.iter().map(|(label, _)| label.clone()).collect();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n.min(12))
            .x_label_formatter(&|x| labels.get(x.floor() as usize).cloned().unwrap_or_default())
            .x_desc(x_desc)
            .y_desc(y_desc)
            .draw()
            .map_err(render_err)?;

        let color = fill_color(options);
        chart
            .draw_series(data.iter().enumerate().map(|(i, (_, value))| {
                Rectangle::new(
                    [(i as f64 + 0.1, 0.0), (i as f64 + 0.9, *value)],
                    color.filled(),
                )
            }))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    finish(svg, options)
}

pub(crate) fn pie_svg(data: &[(String, f64)], options: &ChartOptions) -> Result<Chart> {
    let total: f64 = data.iter().map(|(_, v)| v.max(0.0)).sum();
    if total <= 0.0 {
        return Err(ScryError::new(
            ErrorCode::ChartRenderFailed,
            "No positive shares to draw",
        ));
    }

    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (options.width, options.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(options.title.as_deref().unwrap_or(""), ("sans-serif", 22))
            .margin(10)
            .build_cartesian_2d(-1.6f64..1.6, -1.2f64..1.2)
            .map_err(render_err)?;

        let mut start = -90.0f64;
        for (i, (label, value)) in data.iter().enumerate() {
            let share = value.max(0.0) / total;
            if share == 0.0 {
                continue;
            }
            let sweep = share * 360.0;
            let color = Palette99::pick(i).to_rgba();
            chart
                .draw_series(std::iter::once(Polygon::new(
                    sector(0.0, 1.0, start, start + sweep),
                    color.filled(),
                )))
                .map_err(render_err)?;

            let mid = (start + sweep / 2.0).to_radians();
            chart
                .draw_series(std::iter::once(Text::new(
                    format!("{} ({:.1}%)", label, share * 100.0),
                    (1.12 * mid.sin(), 1.12 * mid.cos()),
                    ("sans-serif", 14),
                )))
                .map_err(render_err)?;

            start += sweep;
        }
        root.present().map_err(render_err)?;
    }
    finish(svg, options)
}

pub(crate) fn polar_bar_svg(
    bars: &[PolarBar],
    sector_width_deg: f64,
    options: &ChartOptions,
) -> Result<Chart> {
    let max = bars.iter().map(|b| b.value).fold(0.0f64, f64::max);
    if max <= 0.0 {
        return Err(ScryError::new(
            ErrorCode::ChartRenderFailed,
            "No positive counts to draw",
        ));
    }

    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (options.width, options.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(options.title.as_deref().unwrap_or(""), ("sans-serif", 22))
            .margin(10)
            .build_cartesian_2d(-1.3f64..1.3, -1.3f64..1.3)
            .map_err(render_err)?;

        // Reference rings at quarter steps of the maximum count
        for ring in [0.25, 0.5, 0.75, 1.0] {
            let points: Vec<(f64, f64)> = (0..=120)
                .map(|i| {
                    let a = (i as f64 * 3.0).to_radians();
                    (ring * a.sin(), ring * a.cos())
                })
                .collect();
            chart
                .draw_series(std::iter::once(PathElement::new(points, RING_RGB)))
                .map_err(render_err)?;
        }

        let color = fill_color(options);
        for bar in bars {
            let radius = bar.value / max;
            let half = sector_width_deg / 2.0;
            chart
                .draw_series(std::iter::once(Polygon::new(
                    sector(0.0, radius, bar.angle_deg - half, bar.angle_deg + half),
                    color.mix(0.8).filled(),
                )))
                .map_err(render_err)?;
        }
        root.present().map_err(render_err)?;
    }
    finish(svg, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_outline_is_closed_ring_segment() {
        let points = sector(0.0, 1.0, 0.0, 90.0);
        // First point at 12 o'clock on the outer radius
        assert!((points[0].0 - 0.0).abs() < 1e-9);
        assert!((points[0].1 - 1.0).abs() < 1e-9);
        // Outer arc plus inner arc
        assert_eq!(points.len(), 34);
    }

    #[test]
    fn test_bar_svg_produces_document() {
        let data = vec![("a".to_string(), 3.0), ("b".to_string(), 5.0)];
        let chart = bar_svg(&data, "value", "count", &ChartOptions::default()).unwrap();
        assert!(chart.svg.contains("<svg"));
        assert!(chart.svg.contains("</svg>"));
    }

    #[test]
    fn test_pie_svg_rejects_all_zero_shares() {
        let data = vec![("a".to_string(), 0.0)];
        let err = pie_svg(&data, &ChartOptions::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ChartRenderFailed);
    }
}
