//! PNG rendering with plotters' bitmap backend.
//!
//! Both charts use an `f64` axis for their categories: category `i` sits at
//! `i`, the range is padded by half a slot on each side, and the label
//! formatter maps integer positions back to category names.

use std::fmt::Display;
use std::path::Path;

use kv_core::types::{EndpointRole, Metadata};
use kv_core::BenchError;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::series::{DivergenceRow, SizeCategory};

const GROUPED_SIZE: (u32, u32) = (1000, 600);
const DIVERGENCE_SIZE: (u32, u32) = (1200, 800);

const PRIMARY_COLOR: RGBColor = RED;
const SECONDARY_COLOR: RGBColor = BLUE;
const SECONDARY_FASTER_COLOR: RGBColor = GREEN;
const PRIMARY_FASTER_COLOR: RGBColor = RED;

const BAR_WIDTH: f64 = 0.35;
const FONT: &str = "sans-serif";

/// Display names for the two endpoints, taken from the document metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointLabels {
    pub primary: String,
    pub secondary: String,
}

impl EndpointLabels {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        EndpointLabels {
            primary: metadata.label(EndpointRole::Primary),
            secondary: metadata.label(EndpointRole::Secondary),
        }
    }
}

fn render_err<E: Display>(err: E) -> BenchError {
    BenchError::Render(err.to_string())
}

fn category_label(labels: &[String], position: f64) -> String {
    let index = position.round();
    if index < 0.0 || (position - index).abs() > 1e-6 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Two bars per payload size, one per endpoint, each annotated with its
/// mean in seconds.
pub fn grouped_bar_chart(
    path: &Path,
    title: &str,
    labels: &EndpointLabels,
    categories: &[SizeCategory],
) -> Result<(), BenchError> {
    let root = BitMapBackend::new(path, GROUPED_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let slots = categories.len();
    let tallest = categories
        .iter()
        .flat_map(|c| [c.primary_mean, c.secondary_mean])
        .fold(0.0, f64::max);
    let y_top = if tallest > 0.0 { tallest * 1.15 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(-0.5f64..(slots as f64 - 0.5), 0f64..y_top)
        .map_err(render_err)?;

    let names: Vec<String> = categories.iter().map(|c| format!("{}B", c.size)).collect();
    let x_formatter = |x: &f64| category_label(&names, *x);
    let y_formatter = |y: &f64| format!("{y:.3}");
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(slots)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .x_desc("Data Size")
        .y_desc("Time (seconds)")
        .draw()
        .map_err(render_err)?;

    let annotation =
        TextStyle::from((FONT, 14).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
    let bars = [
        (
            labels.primary.as_str(),
            PRIMARY_COLOR,
            -BAR_WIDTH,
            categories.iter().map(|c| c.primary_mean).collect::<Vec<_>>(),
        ),
        (
            labels.secondary.as_str(),
            SECONDARY_COLOR,
            0.0,
            categories.iter().map(|c| c.secondary_mean).collect::<Vec<_>>(),
        ),
    ];

    for (label, color, offset, values) in bars {
        let style = color.mix(0.7).filled();
        chart
            .draw_series(values.iter().enumerate().map(|(i, value)| {
                let left = i as f64 + offset;
                Rectangle::new([(left, 0.0), (left + BAR_WIDTH, *value)], style)
            }))
            .map_err(render_err)?
            .label(label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], style));

        chart
            .draw_series(values.iter().enumerate().map(|(i, value)| {
                let center = i as f64 + offset + BAR_WIDTH / 2.0;
                Text::new(
                    format!("{value:.3}s"),
                    (center, *value + y_top * 0.01),
                    annotation.clone(),
                )
            }))
            .map_err(render_err)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Horizontal bars of the signed percent difference per benchmark, rows in
/// the given order from bottom to top.
///
/// Negative values (secondary faster) are green, positive values (primary
/// faster) red.
pub fn divergence_chart(
    path: &Path,
    labels: &EndpointLabels,
    rows: &[DivergenceRow],
) -> Result<(), BenchError> {
    let root = BitMapBackend::new(path, DIVERGENCE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let slots = rows.len();
    let lowest = rows.iter().map(|r| r.difference).fold(0.0, f64::min);
    let highest = rows.iter().map(|r| r.difference).fold(0.0, f64::max);
    // Headroom on both sides for the bar labels.
    let span = (highest - lowest).max(1.0);
    let x_range = (lowest - span * 0.3)..(highest + span * 0.3);
    let pad = span * 0.01;

    let title = format!(
        "{} vs {} Performance Comparison",
        labels.secondary, labels.primary
    );
    let mut chart = ChartBuilder::on(&root)
        .caption(&title, (FONT, 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(120)
        .build_cartesian_2d(x_range, -0.5f64..(slots as f64 - 0.5))
        .map_err(render_err)?;

    let names: Vec<String> = rows.iter().map(|r| r.spec.label()).collect();
    let x_formatter = |x: &f64| format!("{x:.0}%");
    let y_formatter = |y: &f64| category_label(&names, *y);
    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(slots)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .x_desc("Performance Difference (%)")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(
            [(0.0, -0.5), (0.0, slots as f64 - 0.5)],
            BLACK.stroke_width(1),
        ))
        .map_err(render_err)?;

    let halves = [
        (
            format!("{} faster", labels.secondary),
            SECONDARY_FASTER_COLOR,
            true,
        ),
        (
            format!("{} faster", labels.primary),
            PRIMARY_FASTER_COLOR,
            false,
        ),
    ];
    for (legend, color, negative) in halves {
        let style = color.mix(0.8).filled();
        let bars = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| (row.difference < 0.0) == negative);
        chart
            .draw_series(bars.map(|(i, row)| {
                let y = i as f64;
                Rectangle::new(
                    [(0.0, y - BAR_WIDTH), (row.difference, y + BAR_WIDTH)],
                    style,
                )
            }))
            .map_err(render_err)?
            .label(legend)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], style));
    }

    let font = TextStyle::from((FONT, 14).into_font());
    chart
        .draw_series(rows.iter().enumerate().map(|(i, row)| {
            let magnitude = row.difference.abs();
            let (text, anchor, x) = if row.difference < 0.0 {
                (
                    format!("{magnitude:.1}% faster"),
                    HPos::Right,
                    row.difference - pad,
                )
            } else {
                (
                    format!("{magnitude:.1}% slower"),
                    HPos::Left,
                    row.difference + pad,
                )
            };
            Text::new(text, (x, i as f64), font.pos(Pos::new(anchor, VPos::Center)))
        }))
        .map_err(render_err)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}
