//! Plotters-backed drawing surface: SVG string, SVG/PNG file, or RGB pixel buffer.

use crate::error::{ChartError, Result, draw_err};
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::{Path, PathBuf};

use super::ChartSurface;
use super::draw::{DrawOptions, draw_chart};
use super::fonts::fonts_registered;
use super::spec::ChartSpec;

/// Where a [`PlottersSurface`] puts its pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    /// In-memory SVG document.
    SvgString,
    SvgFile(PathBuf),
    PngFile(PathBuf),
    /// Packed RGB bytes, row-major (GUI previews).
    RgbBuffer,
}

impl RenderTarget {
    /// Pick a file target from the extension (`.svg` or `.png`).
    pub fn for_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("svg") => Ok(RenderTarget::SvgFile(path.to_path_buf())),
            Some("png") => Ok(RenderTarget::PngFile(path.to_path_buf())),
            _ => Err(ChartError::UnsupportedOutput(path.display().to_string())),
        }
    }

    fn is_svg(&self) -> bool {
        matches!(self, RenderTarget::SvgString | RenderTarget::SvgFile(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutput {
    Svg(String),
    File(PathBuf),
    Rgb {
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    },
}

/// The live chart produced by one draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    pub id: u64,
    pub output: ChartOutput,
}

impl RenderedChart {
    pub fn svg(&self) -> Option<&str> {
        match &self.output {
            ChartOutput::Svg(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct PlottersSurface {
    target: RenderTarget,
    width: u32,
    height: u32,
    next_id: u64,
    live: usize,
}

impl PlottersSurface {
    pub fn new(target: RenderTarget, width: u32, height: u32) -> Self {
        Self {
            target,
            width: width.max(1),
            height: height.max(1),
            next_id: 1,
            live: 0,
        }
    }

    pub fn svg(width: u32, height: u32) -> Self {
        Self::new(RenderTarget::SvgString, width, height)
    }

    pub fn rgb(width: u32, height: u32) -> Self {
        Self::new(RenderTarget::RgbBuffer, width, height)
    }

    pub fn file(path: impl AsRef<Path>, width: u32, height: u32) -> Result<Self> {
        Ok(Self::new(RenderTarget::for_path(path)?, width, height))
    }

    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Takes effect on the next draw.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    /// Number of charts drawn and not yet destroyed.
    pub fn live_charts(&self) -> usize {
        self.live
    }

    fn options(&self) -> DrawOptions {
        DrawOptions {
            text: self.target.is_svg() || fonts_registered(),
        }
    }

    fn draw_output(&self, spec: &ChartSpec) -> Result<ChartOutput> {
        let size = (self.width, self.height);
        let opts = self.options();
        match &self.target {
            RenderTarget::SvgString => {
                let mut svg = String::new();
                {
                    let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
                    draw_chart(&root, spec, opts)?;
                    root.present().map_err(draw_err)?;
                }
                Ok(ChartOutput::Svg(svg))
            }
            RenderTarget::SvgFile(path) => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                draw_chart(&root, spec, opts)?;
                root.present().map_err(draw_err)?;
                Ok(ChartOutput::File(path.clone()))
            }
            RenderTarget::PngFile(path) => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                draw_chart(&root, spec, opts)?;
                root.present().map_err(draw_err)?;
                Ok(ChartOutput::File(path.clone()))
            }
            RenderTarget::RgbBuffer => {
                let mut pixels = vec![0u8; (self.width * self.height * 3) as usize];
                {
                    let root = BitMapBackend::with_buffer(&mut pixels, size).into_drawing_area();
                    draw_chart(&root, spec, opts)?;
                    root.present().map_err(draw_err)?;
                }
                Ok(ChartOutput::Rgb {
                    width: self.width,
                    height: self.height,
                    pixels,
                })
            }
        }
    }
}

impl ChartSurface for PlottersSurface {
    type Handle = RenderedChart;

    fn draw(&mut self, spec: &ChartSpec) -> Result<RenderedChart> {
        let output = self.draw_output(spec)?;
        let id = self.next_id;
        self.next_id += 1;
        self.live += 1;
        Ok(RenderedChart { id, output })
    }

    fn destroy(&mut self, handle: RenderedChart) {
        log::trace!("disposing chart #{}", handle.id);
        self.live = self.live.saturating_sub(1);
        drop(handle);
    }
}
