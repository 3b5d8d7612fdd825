//! Top legend band: items flow into centered rows.

use crate::error::{Result, draw_err};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::fonts::FONT_FAMILY;
use super::text::{estimate_text_width_px, truncate_to_width};

// Layout constants (must match between layout and drawing)
const FONT_PX: u32 = 12;
const SWATCH: i32 = 12;
const SWATCH_TO_TEXT: i32 = 6;
const TRAILING_GAP: i32 = 14;
const ROW_H: i32 = 20;
const BAND_PAD: i32 = 6;

/// One placed legend item: index into the item list plus its left edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedItem {
    pub index: usize,
    pub x: i32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LegendLayout {
    pub rows: Vec<Vec<PlacedItem>>,
    pub height: i32,
}

fn item_width(text: &str) -> i32 {
    SWATCH + SWATCH_TO_TEXT + estimate_text_width_px(text, FONT_PX) as i32 + TRAILING_GAP
}

/// Greedy row packing for `labels` inside `width` pixels, each row centered.
pub fn layout_legend(labels: &[String], width: i32) -> LegendLayout {
    if labels.is_empty() {
        return LegendLayout::default();
    }
    let usable = (width - 2 * BAND_PAD).max(40);
    let text_cap = (usable - SWATCH - SWATCH_TO_TEXT - TRAILING_GAP).max(10) as u32;

    let mut rows: Vec<Vec<(usize, String, i32)>> = Vec::new();
    let mut cur: Vec<(usize, String, i32)> = Vec::new();
    let mut cur_w = 0;
    for (i, label) in labels.iter().enumerate() {
        let text = truncate_to_width(label, FONT_PX, text_cap);
        let w = item_width(&text);
        if cur_w + w > usable && !cur.is_empty() {
            rows.push(std::mem::take(&mut cur));
            cur_w = 0;
        }
        cur.push((i, text, w));
        cur_w += w;
    }
    if !cur.is_empty() {
        rows.push(cur);
    }

    let placed = rows
        .into_iter()
        .map(|row| {
            let row_w: i32 = row.iter().map(|(_, _, w)| *w).sum::<i32>() - TRAILING_GAP;
            let mut x = ((width - row_w) / 2).max(BAND_PAD);
            row.into_iter()
                .map(|(index, text, w)| {
                    let item = PlacedItem { index, x, text };
                    x += w;
                    item
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let height = placed.len() as i32 * ROW_H + 2 * BAND_PAD;
    LegendLayout {
        rows: placed,
        height,
    }
}

/// Draw a computed legend layout with its top edge at `top`.
pub fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    layout: &LegendLayout,
    colors: &[RGBAColor],
    top: i32,
    with_text: bool,
) -> Result<()> {
    let text_style = (FONT_FAMILY, FONT_PX)
        .into_font()
        .color(&RGBColor(102, 102, 102))
        .pos(Pos::new(HPos::Left, VPos::Center));

    for (r, row) in layout.rows.iter().enumerate() {
        let y_center = top + BAND_PAD + r as i32 * ROW_H + ROW_H / 2;
        for item in row {
            let color = colors
                .get(item.index)
                .copied()
                .unwrap_or(RGBAColor(128, 128, 128, 1.0));
            area.draw(&Rectangle::new(
                [
                    (item.x, y_center - SWATCH / 2),
                    (item.x + SWATCH, y_center + SWATCH / 2),
                ],
                color.filled(),
            ))
            .map_err(draw_err)?;
            if with_text {
                area.draw(&Text::new(
                    item.text.clone(),
                    (item.x + SWATCH + SWATCH_TO_TEXT, y_center),
                    text_style.clone(),
                ))
                .map_err(draw_err)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn few_items_fit_one_row() {
        let labels: Vec<String> = vec!["A".into(), "B".into()];
        let l = layout_legend(&labels, 400);
        assert_eq!(l.rows.len(), 1);
        assert_eq!(l.rows[0].len(), 2);
        assert_eq!(l.height, ROW_H + 2 * BAND_PAD);
        assert!(l.rows[0][0].x < l.rows[0][1].x);
    }

    #[test]
    fn many_items_wrap() {
        let labels: Vec<String> = (0..30).map(|i| format!("Series number {i}")).collect();
        let l = layout_legend(&labels, 300);
        assert!(l.rows.len() > 1);
        let placed: usize = l.rows.iter().map(Vec::len).sum();
        assert_eq!(placed, 30);
    }

    #[test]
    fn empty_legend_takes_no_space() {
        assert_eq!(layout_legend(&[], 300).height, 0);
    }
}
