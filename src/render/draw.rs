//! Draw a [`ChartSpec`] onto any plotters backend, in pixel coordinates.

use crate::error::{Result, draw_err};
use crate::models::ChartType;
use crate::palette::parse_color;
use num_format::{Locale, ToFormattedString};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::TAU;

use super::fonts::FONT_FAMILY;
use super::geometry::{
    NiceScale, Rect, polar_point, radial_vertices, round, sector_polygon, smooth_polyline,
};
use super::legend::{draw_legend, layout_legend};
use super::spec::{ChartSpec, ColorSpec, DatasetSpec};
use super::text::{estimate_text_width_px, truncate_to_width};

const PAD: i32 = 12;
const TICK_FONT_PX: u32 = 11;
const TICK_COUNT: usize = 5;
const BAR_GROUP: f64 = 0.8;
const POINT_RADIUS: i32 = 3;
const DOUGHNUT_CUTOUT: f64 = 0.5;
const RADAR_FILL_ALPHA: f64 = 0.2;

const GRID: RGBColor = RGBColor(228, 230, 235);
const AXIS: RGBColor = RGBColor(160, 163, 170);
const TICK_TEXT: RGBColor = RGBColor(102, 102, 102);
const TITLE_TEXT: RGBColor = RGBColor(51, 51, 51);

/// Knobs that depend on the backend rather than on the chart.
#[derive(Debug, Clone, Copy)]
pub struct DrawOptions {
    /// Emit text (title, legend, tick and category labels).
    pub text: bool,
}

fn rgba(s: &str) -> Result<RGBAColor> {
    parse_color(s).map(|c| c.to_plotters())
}

fn color_at(spec: &ColorSpec, idx: usize) -> Result<RGBAColor> {
    match spec.at(idx) {
        Some(c) => rgba(c),
        None => Ok(AXIS.to_rgba()),
    }
}

fn fill(color: RGBAColor) -> ShapeStyle {
    ShapeStyle {
        color,
        filled: true,
        stroke_width: 0,
    }
}

fn stroke(color: RGBAColor, width: u32) -> ShapeStyle {
    ShapeStyle {
        color,
        filled: false,
        stroke_width: width,
    }
}

fn tick_label(v: f64, scale: &NiceScale) -> String {
    let decimals = scale.decimals();
    if decimals == 0 {
        (v.round() as i64).to_formatted_string(&Locale::en)
    } else {
        format!("{:.*}", decimals, v)
    }
}

/// Draw the whole chart: background, title band, legend band, then the plot.
pub fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    opts: DrawOptions,
) -> Result<()> {
    root.fill(&WHITE).map_err(draw_err)?;
    let (w_u32, h_u32) = root.dim_in_pixel();
    let (w, h) = (w_u32 as i32, h_u32 as i32);

    let mut top = PAD;

    if spec.title_visible() {
        let font = &spec.options.plugins.title.font;
        if opts.text {
            let style = (FONT_FAMILY, font.size)
                .into_font()
                .style(FontStyle::Bold)
                .color(&TITLE_TEXT)
                .pos(Pos::new(HPos::Center, VPos::Top));
            let text = truncate_to_width(spec.title(), font.size, (w - 2 * PAD).max(0) as u32);
            root.draw(&Text::new(text, (w / 2, top), style))
                .map_err(draw_err)?;
        }
        top += font.size as i32 + 10;
    }

    if spec.legend_visible() {
        let (labels, colors) = legend_items(spec)?;
        let layout = layout_legend(&labels, w);
        draw_legend(root, &layout, &colors, top, opts.text)?;
        top += layout.height;
    }

    let plot = Rect::new(PAD, top, w - PAD, h - PAD);
    if !plot.is_drawable() {
        log::debug!("plot area too small ({}x{}), skipping series", plot.width(), plot.height());
        return Ok(());
    }

    match spec.chart_type {
        ChartType::Bar | ChartType::Line => draw_cartesian(root, spec, plot, opts),
        ChartType::Pie => draw_pie(root, spec, plot, 0.0),
        ChartType::Doughnut => draw_pie(root, spec, plot, DOUGHNUT_CUTOUT),
        ChartType::PolarArea => draw_polar_area(root, spec, plot, opts),
        ChartType::Radar => draw_radar(root, spec, plot, opts),
    }
}

/// Legend entries: one per label for per-category charts, one per dataset otherwise.
fn legend_items(spec: &ChartSpec) -> Result<(Vec<String>, Vec<RGBAColor>)> {
    let per_label = matches!(
        spec.chart_type,
        ChartType::Pie | ChartType::Doughnut | ChartType::PolarArea
    );
    if per_label {
        let Some(first) = spec.data.datasets.first() else {
            return Ok((Vec::new(), Vec::new()));
        };
        let colors = (0..spec.data.labels.len())
            .map(|i| color_at(&first.background_color, i))
            .collect::<Result<Vec<_>>>()?;
        Ok((spec.data.labels.clone(), colors))
    } else {
        let labels = spec.data.datasets.iter().map(|d| d.label.clone()).collect();
        let colors = spec
            .data
            .datasets
            .iter()
            .map(|d| color_at(&d.background_color, 0))
            .collect::<Result<Vec<_>>>()?;
        Ok((labels, colors))
    }
}

fn value_range(datasets: &[DatasetSpec], n: usize) -> (f64, f64) {
    datasets
        .iter()
        .flat_map(|d| (0..n).map(move |i| d.value_at(i)))
        .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

fn draw_cartesian<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    plot: Rect,
    opts: DrawOptions,
) -> Result<()> {
    let labels = &spec.data.labels;
    let datasets = &spec.data.datasets;
    let slots = labels.len();
    let (lo, hi) = value_range(datasets, slots);
    let scale = NiceScale::new(lo, hi, TICK_COUNT);
    let ticks = scale.ticks();

    let left_gutter = if opts.text {
        ticks
            .iter()
            .map(|t| estimate_text_width_px(&tick_label(*t, &scale), TICK_FONT_PX) as i32)
            .max()
            .unwrap_or(0)
            + 10
    } else {
        4
    };
    let bottom_gutter = if opts.text { TICK_FONT_PX as i32 + 10 } else { 4 };
    let area = Rect::new(plot.x0 + left_gutter, plot.y0, plot.x1, plot.y1 - bottom_gutter);
    if !area.is_drawable() {
        return Ok(());
    }

    let y_px = |v: f64| -> i32 {
        (area.y1 as f64 - scale.fraction(v) * area.height() as f64).round() as i32
    };

    // Horizontal grid and value ticks
    let tick_style = (FONT_FAMILY, TICK_FONT_PX)
        .into_font()
        .color(&TICK_TEXT)
        .pos(Pos::new(HPos::Right, VPos::Center));
    for t in &ticks {
        let y = y_px(*t);
        root.draw(&PathElement::new(vec![(area.x0, y), (area.x1, y)], stroke(GRID.to_rgba(), 1)))
            .map_err(draw_err)?;
        if opts.text {
            root.draw(&Text::new(tick_label(*t, &scale), (area.x0 - 6, y), tick_style.clone()))
                .map_err(draw_err)?;
        }
    }
    let zero_y = y_px(0.0);
    root.draw(&PathElement::new(
        vec![(area.x0, zero_y), (area.x1, zero_y)],
        stroke(AXIS.to_rgba(), 1),
    ))
    .map_err(draw_err)?;
    root.draw(&PathElement::new(
        vec![(area.x0, area.y0), (area.x0, area.y1)],
        stroke(AXIS.to_rgba(), 1),
    ))
    .map_err(draw_err)?;

    if slots == 0 {
        return Ok(());
    }
    let slot_w = area.width() as f64 / slots as f64;
    let slot_center = |i: usize| area.x0 as f64 + (i as f64 + 0.5) * slot_w;

    if opts.text {
        let cat_style = (FONT_FAMILY, TICK_FONT_PX)
            .into_font()
            .color(&TICK_TEXT)
            .pos(Pos::new(HPos::Center, VPos::Top));
        for (i, label) in labels.iter().enumerate() {
            let text = truncate_to_width(label, TICK_FONT_PX, slot_w.max(0.0) as u32);
            root.draw(&Text::new(
                text,
                (slot_center(i).round() as i32, area.y1 + 5),
                cat_style.clone(),
            ))
            .map_err(draw_err)?;
        }
    }

    match spec.chart_type {
        ChartType::Bar => {
            let n_ds = datasets.len().max(1);
            let group_w = slot_w * BAR_GROUP;
            let bar_w = group_w / n_ds as f64;
            for (j, ds) in datasets.iter().enumerate() {
                for i in 0..slots {
                    let v = ds.value_at(i);
                    let left = slot_center(i) - group_w / 2.0 + j as f64 * bar_w;
                    let corners = [
                        round((left, y_px(v.max(0.0)) as f64)),
                        round((left + bar_w, y_px(v.min(0.0)) as f64)),
                    ];
                    root.draw(&Rectangle::new(corners, fill(color_at(&ds.background_color, i)?)))
                        .map_err(draw_err)?;
                    if ds.border_width > 0 {
                        root.draw(&Rectangle::new(
                            corners,
                            stroke(color_at(&ds.border_color, i)?, ds.border_width),
                        ))
                        .map_err(draw_err)?;
                    }
                }
            }
        }
        _ => {
            for ds in datasets {
                let points: Vec<(f64, f64)> = (0..slots)
                    .map(|i| (slot_center(i), y_px(ds.value_at(i)) as f64))
                    .collect();
                let line = smooth_polyline(&points, ds.tension, 12);
                root.draw(&PathElement::new(
                    line,
                    stroke(color_at(&ds.border_color, 0)?, ds.border_width.max(1)),
                ))
                .map_err(draw_err)?;
                for (i, p) in points.iter().enumerate() {
                    root.draw(&Circle::new(
                        round(*p),
                        POINT_RADIUS,
                        fill(color_at(&ds.background_color, i)?),
                    ))
                    .map_err(draw_err)?;
                }
            }
        }
    }
    Ok(())
}

/// Pie and doughnut: one ring per dataset, first dataset outermost.
fn draw_pie<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    plot: Rect,
    cutout: f64,
) -> Result<()> {
    let center = plot.center();
    let radius = (plot.width().min(plot.height()) as f64 / 2.0 - 4.0).max(1.0);
    let datasets = &spec.data.datasets;
    if datasets.is_empty() {
        return Ok(());
    }
    let hole = radius * cutout;
    let ring_w = (radius - hole) / datasets.len() as f64;

    for (k, ds) in datasets.iter().enumerate() {
        let outer = radius - k as f64 * ring_w;
        let inner = outer - ring_w;
        let total: f64 = ds.data.iter().filter(|v| **v > 0.0).sum();
        if total <= 0.0 {
            continue;
        }
        let mut start = 0.0;
        for (i, v) in ds.data.iter().enumerate() {
            if *v <= 0.0 {
                continue;
            }
            let end = start + v / total * TAU;
            let poly = sector_polygon(center, inner.max(0.0), outer, start, end);
            root.draw(&Polygon::new(poly.clone(), fill(color_at(&ds.background_color, i)?)))
                .map_err(draw_err)?;
            if ds.border_width > 0 {
                let mut outline = poly;
                if let Some(first) = outline.first().copied() {
                    outline.push(first);
                }
                root.draw(&PathElement::new(
                    outline,
                    stroke(color_at(&ds.border_color, i)?, ds.border_width),
                ))
                .map_err(draw_err)?;
            }
            start = end;
        }
    }
    Ok(())
}

fn radial_scale(spec: &ChartSpec, n: usize) -> NiceScale {
    let (lo, hi) = value_range(&spec.data.datasets, n);
    NiceScale::new(lo, hi, TICK_COUNT)
}

fn draw_radial_grid<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    center: (i32, i32),
    radius: f64,
    scale: &NiceScale,
    sides: Option<usize>,
    opts: DrawOptions,
) -> Result<()> {
    let tick_style = (FONT_FAMILY, TICK_FONT_PX)
        .into_font()
        .color(&TICK_TEXT)
        .pos(Pos::new(HPos::Center, VPos::Center));
    for t in scale.ticks().into_iter().skip(1) {
        let r = scale.fraction(t) * radius;
        let mut ring = match sides {
            Some(n) if n >= 3 => radial_vertices(center, r, n),
            _ => radial_vertices(center, r, 72),
        };
        if let Some(first) = ring.first().copied() {
            ring.push(first);
        }
        root.draw(&PathElement::new(ring, stroke(GRID.to_rgba(), 1)))
            .map_err(draw_err)?;
        if opts.text {
            root.draw(&Text::new(
                tick_label(t, scale),
                (center.0, center.1 - r.round() as i32),
                tick_style.clone(),
            ))
            .map_err(draw_err)?;
        }
    }
    Ok(())
}

/// Polar area: equal-angle sectors whose radius follows the value.
fn draw_polar_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    plot: Rect,
    opts: DrawOptions,
) -> Result<()> {
    let center = plot.center();
    let radius = (plot.width().min(plot.height()) as f64 / 2.0 - 4.0).max(1.0);
    let n = spec
        .data
        .datasets
        .iter()
        .map(|d| d.data.len())
        .max()
        .unwrap_or(0);
    let scale = radial_scale(spec, n);

    for ds in &spec.data.datasets {
        let count = ds.data.len();
        if count == 0 {
            continue;
        }
        let sweep = TAU / count as f64;
        for (i, v) in ds.data.iter().enumerate() {
            let r = (scale.fraction(*v) * radius).max(0.0);
            if r < 0.5 {
                continue;
            }
            let start = i as f64 * sweep;
            let poly = sector_polygon(center, 0.0, r, start, start + sweep);
            root.draw(&Polygon::new(poly.clone(), fill(color_at(&ds.background_color, i)?)))
                .map_err(draw_err)?;
            if ds.border_width > 0 {
                let mut outline = poly;
                if let Some(first) = outline.first().copied() {
                    outline.push(first);
                }
                root.draw(&PathElement::new(
                    outline,
                    stroke(color_at(&ds.border_color, i)?, ds.border_width),
                ))
                .map_err(draw_err)?;
            }
        }
    }
    draw_radial_grid(root, center, radius, &scale, None, opts)
}

/// Radar: one spoke per label, one polygon per dataset.
fn draw_radar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    plot: Rect,
    opts: DrawOptions,
) -> Result<()> {
    let labels = &spec.data.labels;
    let n = labels.len();
    let center = plot.center();
    let label_room = if opts.text { 2.0 * TICK_FONT_PX as f64 } else { 4.0 };
    let radius = (plot.width().min(plot.height()) as f64 / 2.0 - label_room).max(1.0);
    if n == 0 {
        return Ok(());
    }
    let scale = radial_scale(spec, n);

    for vertex in radial_vertices(center, radius, n) {
        root.draw(&PathElement::new(vec![center, vertex], stroke(GRID.to_rgba(), 1)))
            .map_err(draw_err)?;
    }
    draw_radial_grid(root, center, radius, &scale, Some(n), opts)?;

    if opts.text {
        let style = (FONT_FAMILY, TICK_FONT_PX)
            .into_font()
            .color(&TICK_TEXT)
            .pos(Pos::new(HPos::Center, VPos::Center));
        for (i, label) in labels.iter().enumerate() {
            let at = polar_point(center, radius + TICK_FONT_PX as f64, TAU * i as f64 / n as f64);
            root.draw(&Text::new(
                truncate_to_width(label, TICK_FONT_PX, 90),
                at,
                style.clone(),
            ))
            .map_err(draw_err)?;
        }
    }

    for ds in &spec.data.datasets {
        let points: Vec<(i32, i32)> = (0..n)
            .map(|i| {
                let r = (scale.fraction(ds.value_at(i)) * radius).max(0.0);
                polar_point(center, r, TAU * i as f64 / n as f64)
            })
            .collect();
        let area_color = color_at(&ds.background_color, 0)?;
        if n >= 3 {
            root.draw(&Polygon::new(
                points.clone(),
                fill(area_color.mix(RADAR_FILL_ALPHA)),
            ))
            .map_err(draw_err)?;
        }
        let mut outline = points.clone();
        if let Some(first) = outline.first().copied() {
            outline.push(first);
        }
        root.draw(&PathElement::new(
            outline,
            stroke(color_at(&ds.border_color, 0)?, ds.border_width.max(1)),
        ))
        .map_err(draw_err)?;
        for (i, p) in points.iter().enumerate() {
            root.draw(&Circle::new(
                *p,
                POINT_RADIUS,
                fill(color_at(&ds.background_color, i)?),
            ))
            .map_err(draw_err)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_labels_use_thousands_separators() {
        let s = NiceScale::new(0.0, 20_000.0, 5);
        assert_eq!(tick_label(15_000.0, &s), "15,000");
        let s = NiceScale::new(0.0, 0.5, 5);
        assert_eq!(tick_label(0.3, &s), "0.3");
    }
}
