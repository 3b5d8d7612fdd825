//! Font registration for the `ab_glyph` text path.
//!
//! `ab_glyph` doesn't discover OS fonts, so bitmap output only gets text after a
//! TTF has been registered. SVG output writes `<text>` elements and needs no font.

use crate::error::{ChartError, Result};
use plotters::style::FontStyle;
use std::path::Path;
use std::sync::OnceLock;

pub const FONT_FAMILY: &str = "sans-serif";

static REGISTERED: OnceLock<()> = OnceLock::new();

/// Fonts commonly present on Linux/macOS/Windows, tried by hosts that have no configured font.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Whether a font has been registered for bitmap text.
pub fn fonts_registered() -> bool {
    REGISTERED.get().is_some()
}

/// Register the TTF at `path` as the sans-serif family (normal and bold).
/// Only the first successful registration takes effect.
pub fn register_font_file(path: &Path) -> Result<()> {
    if fonts_registered() {
        return Ok(());
    }
    let bytes = std::fs::read(path)?;
    // plotters keeps font data for the process lifetime.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    for style in [FontStyle::Normal, FontStyle::Bold] {
        plotters::style::register_font(FONT_FAMILY, style, bytes)
            .map_err(|_| ChartError::Font(format!("{}: invalid font data", path.display())))?;
    }
    let _ = REGISTERED.set(());
    log::debug!("registered font {}", path.display());
    Ok(())
}

/// Register the first readable candidate. Returns whether any font is available afterwards.
pub fn register_first_available<P: AsRef<Path>>(candidates: impl IntoIterator<Item = P>) -> bool {
    if fonts_registered() {
        return true;
    }
    for candidate in candidates {
        let path = candidate.as_ref();
        if !path.is_file() {
            continue;
        }
        match register_font_file(path) {
            Ok(()) => return true,
            Err(e) => log::warn!("skipping font {}: {e}", path.display()),
        }
    }
    false
}
