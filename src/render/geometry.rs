//! Pixel-space helpers: axis ticks, spline smoothing, arcs.

use std::f64::consts::{FRAC_PI_2, TAU};

/// A pixel rectangle, `x0 < x1`, `y0 < y1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    pub fn center(&self) -> (i32, i32) {
        ((self.x0 + self.x1) / 2, (self.y0 + self.y1) / 2)
    }

    pub fn is_drawable(&self) -> bool {
        self.width() > 10 && self.height() > 10
    }
}

/// A "nice" linear scale covering `lo..hi` with roughly `count` steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NiceScale {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl NiceScale {
    pub fn new(lo: f64, hi: f64, count: usize) -> Self {
        let (mut lo, mut hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        if (hi - lo).abs() < f64::EPSILON {
            hi = lo + 1.0;
        }
        if !lo.is_finite() || !hi.is_finite() {
            lo = 0.0;
            hi = 1.0;
        }
        let rough = (hi - lo) / count.max(1) as f64;
        let mag = 10f64.powf(rough.log10().floor());
        let norm = rough / mag;
        let step = if norm <= 1.0 {
            1.0
        } else if norm <= 2.0 {
            2.0
        } else if norm <= 5.0 {
            5.0
        } else {
            10.0
        } * mag;
        Self {
            min: (lo / step).floor() * step,
            max: (hi / step).ceil() * step,
            step,
        }
    }

    /// Tick values from `min` to `max` inclusive.
    pub fn ticks(&self) -> Vec<f64> {
        let n = ((self.max - self.min) / self.step).round() as usize;
        (0..=n).map(|i| self.min + i as f64 * self.step).collect()
    }

    /// Position of `v` in `0..=1` along the scale.
    pub fn fraction(&self, v: f64) -> f64 {
        (v - self.min) / (self.max - self.min)
    }

    /// Decimal places needed to print ticks of this scale.
    pub fn decimals(&self) -> usize {
        if self.step >= 1.0 {
            0
        } else {
            (-self.step.log10() - 1e-9).ceil().clamp(0.0, 6.0) as usize
        }
    }
}

/// Control points of a Chart.js-style spline through `points` with the given tension.
///
/// Returns `(previous, next)` control points per input point.
pub fn spline_control_points(points: &[(f64, f64)], tension: f64) -> Vec<((f64, f64), (f64, f64))> {
    let n = points.len();
    (0..n)
        .map(|i| {
            let cur = points[i];
            let prev = if i == 0 { cur } else { points[i - 1] };
            let next = if i + 1 == n { cur } else { points[i + 1] };

            let d01 = dist(prev, cur);
            let d12 = dist(cur, next);
            let total = d01 + d12;
            let (s01, s12) = if total > 0.0 {
                (d01 / total, d12 / total)
            } else {
                (0.0, 0.0)
            };
            let fa = tension * s01;
            let fb = tension * s12;
            let dx = next.0 - prev.0;
            let dy = next.1 - prev.1;
            (
                (cur.0 - fa * dx, cur.1 - fa * dy),
                (cur.0 + fb * dx, cur.1 + fb * dy),
            )
        })
        .collect()
}

/// Sample the smoothed curve through `points` into a polyline.
pub fn smooth_polyline(points: &[(f64, f64)], tension: f64, steps: usize) -> Vec<(i32, i32)> {
    if points.len() < 3 || tension <= 0.0 {
        return points.iter().map(|&p| round(p)).collect();
    }
    let cps = spline_control_points(points, tension);
    let steps = steps.max(1);
    let mut out = Vec::with_capacity((points.len() - 1) * steps + 1);
    out.push(round(points[0]));
    for i in 0..points.len() - 1 {
        let p0 = points[i];
        let c0 = cps[i].1;
        let c1 = cps[i + 1].0;
        let p1 = points[i + 1];
        for s in 1..=steps {
            let t = s as f64 / steps as f64;
            out.push(round(cubic_bezier(p0, c0, c1, p1, t)));
        }
    }
    out
}

fn cubic_bezier(p0: (f64, f64), c0: (f64, f64), c1: (f64, f64), p1: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    (
        a * p0.0 + b * c0.0 + c * c1.0 + d * p1.0,
        a * p0.1 + b * c0.1 + c * c1.1 + d * p1.1,
    )
}

fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}

#[inline]
pub fn round(p: (f64, f64)) -> (i32, i32) {
    (p.0.round() as i32, p.1.round() as i32)
}

/// Point on a circle; angle 0 points up and grows clockwise (screen coordinates).
pub fn polar_point(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    let a = angle - FRAC_PI_2;
    round((
        center.0 as f64 + radius * a.cos(),
        center.1 as f64 + radius * a.sin(),
    ))
}

/// Outline of an annular sector (or a pie slice when `inner` is 0) between two angles.
pub fn sector_polygon(
    center: (i32, i32),
    inner: f64,
    outer: f64,
    start: f64,
    end: f64,
) -> Vec<(i32, i32)> {
    let sweep = end - start;
    let steps = ((sweep.abs() / TAU) * 180.0).ceil().max(1.0) as usize;
    let arc = |r: f64| -> Vec<(i32, i32)> {
        (0..=steps)
            .map(|s| polar_point(center, r, start + sweep * s as f64 / steps as f64))
            .collect()
    };
    let mut poly = arc(outer);
    if inner > 0.0 {
        let mut back = arc(inner);
        back.reverse();
        poly.extend(back);
    } else {
        poly.push(center);
    }
    poly
}

/// Regular polygon vertices (radar grid), first vertex straight up.
pub fn radial_vertices(center: (i32, i32), radius: f64, n: usize) -> Vec<(i32, i32)> {
    (0..n)
        .map(|i| polar_point(center, radius, TAU * i as f64 / n as f64))
        .collect()
}
