//! Rendering seam.
//!
//! This crate does not depend on a graphics backend. The engine's GL
//! raster path implements [`GlyphBackend`]; tests use [`NullBackend`] or
//! a capturing stand-in.

use alpine_core::math::Vec2;

use crate::font::{Color, FontLibrary};
use crate::layout::place_text;

/// A minimal glyph drawing API.
pub trait GlyphBackend {
    fn draw_glyph(&mut self, ch: char, pos: Vec2, size: f64, color: Color);
}

/// A no-op backend useful for headless tests.
#[derive(Default)]
pub struct NullBackend;

impl GlyphBackend for NullBackend {
    fn draw_glyph(&mut self, _ch: char, _pos: Vec2, _size: f64, _color: Color) {}
}

/// Draws one line of `text` through the backend, advancing a pen per
/// glyph from the current face metrics. Spaces advance without a draw
/// call. A negative `x` centers the run in the viewport; without a
/// current face nothing is drawn.
pub fn draw_text<B: GlyphBackend>(
    lib: &FontLibrary,
    backend: &mut B,
    x: f64,
    y: f64,
    text: &str,
    viewport: Vec2,
) {
    let Some(face) = lib.current_face() else {
        return;
    };

    let size = lib.size();
    let color = lib.color();
    let width = face.text_width(text, size);
    let pos = place_text(x, y, width, size, viewport, lib.orientation());

    let mut pen = pos.x;
    for ch in text.chars() {
        if ch != ' ' {
            backend.draw_glyph(ch, Vec2::new(pen, pos.y), size, color);
        }
        pen += face.advance(ch, size);
    }
}
