//! Chart rendering: model → [`ChartSpec`] → drawing surface.
//!
//! - [`build_chart_spec`] resolves colors, legend and title visibility
//! - [`ChartSurface`] is the seam to the drawing library (one draw call per redraw)
//! - [`ChartRenderer`] owns the single live chart and disposes it before each redraw
//! - [`PlottersSurface`] draws to SVG, PNG, or an RGB buffer

pub mod adapter;
pub mod draw;
pub mod fonts;
pub mod geometry;
pub mod legend;
pub mod spec;
pub mod surface;
pub mod text;

pub use adapter::{build_chart_spec, resolve_dataset};
pub use spec::{ChartSpec, ColorSpec, DatasetSpec};
pub use surface::{ChartOutput, PlottersSurface, RenderTarget, RenderedChart};

use crate::error::Result;
use crate::models::ChartConfig;
use crate::palette::Palette;
use std::path::Path;

/// A drawing library bound to one canvas.
///
/// The renderer writes only: it never reads chart state back from a handle.
pub trait ChartSurface {
    type Handle;

    /// Draw a new chart instance from `spec`.
    fn draw(&mut self, spec: &ChartSpec) -> Result<Self::Handle>;

    /// Release a chart instance previously returned by [`ChartSurface::draw`].
    fn destroy(&mut self, handle: Self::Handle);
}

/// Owns the surface and at most one live chart handle.
pub struct ChartRenderer<S: ChartSurface> {
    surface: S,
    palette: Palette,
    current: Option<S::Handle>,
    redraws: u64,
}

impl<S: ChartSurface> ChartRenderer<S> {
    pub fn new(surface: S, palette: Palette) -> Self {
        Self {
            surface,
            palette,
            current: None,
            redraws: 0,
        }
    }

    /// Redraw `config`, destroying the previous chart first.
    ///
    /// Drawing errors propagate; the previous chart is gone either way.
    pub fn render(&mut self, config: &ChartConfig) -> Result<&S::Handle> {
        let spec = build_chart_spec(config, &self.palette);
        if let Some(old) = self.current.take() {
            self.surface.destroy(old);
        }
        let handle = self.surface.draw(&spec)?;
        self.redraws += 1;
        log::debug!(
            "drew {} chart ({} labels, {} datasets), redraw #{}",
            spec.chart_type,
            spec.data.labels.len(),
            spec.data.datasets.len(),
            self.redraws
        );
        Ok(self.current.insert(handle))
    }

    /// The request [`ChartRenderer::render`] would hand to the surface.
    pub fn spec(&self, config: &ChartConfig) -> ChartSpec {
        build_chart_spec(config, &self.palette)
    }

    pub fn current(&self) -> Option<&S::Handle> {
        self.current.as_ref()
    }

    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Dispose the live chart, if any.
    pub fn clear(&mut self) {
        if let Some(old) = self.current.take() {
            self.surface.destroy(old);
        }
    }
}

impl<S: ChartSurface> Drop for ChartRenderer<S> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Convenience: render `config` once to an `.svg` or `.png` file.
pub fn render_to_file<P: AsRef<Path>>(
    config: &ChartConfig,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    let surface = PlottersSurface::file(out_path, width, height)?;
    let mut renderer = ChartRenderer::new(surface, Palette::default());
    renderer.render(config)?;
    Ok(())
}

/// Convenience: render `config` to an in-memory SVG document.
pub fn render_to_svg_string(config: &ChartConfig, width: u32, height: u32) -> Result<String> {
    let spec = build_chart_spec(config, &Palette::default());
    let mut surface = PlottersSurface::svg(width, height);
    let chart = surface.draw(&spec)?;
    Ok(match chart.output {
        ChartOutput::Svg(s) => s,
        _ => String::new(),
    })
}
