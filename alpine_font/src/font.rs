//! Font faces and the font library.
//!
//! A [`FontFace`] carries em-normalized glyph metrics loaded from a JSON
//! descriptor; the rasterized atlas lives with the renderer, not here.
//! [`FontLibrary`] is the registry the rest of the engine talks to: faces
//! by name, plus the current drawing state (face, size, color,
//! orientation).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::FontConfig;
use crate::layout::Orientation;

/// RGBA color, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Metrics for one glyph, em-normalized; multiply by the point size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphMetrics {
    pub advance: f64,
    pub width: f64,
    pub height: f64,
}

fn default_fallback_advance() -> f64 {
    0.5
}

/// A loaded font face: glyph metrics plus vertical metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontFace {
    pub name: String,
    /// Baseline-to-baseline distance, em-normalized.
    pub line_height: f64,
    /// Advance of U+0020, em-normalized.
    pub space_advance: f64,
    /// Advance substituted for glyphs missing from the table.
    #[serde(default = "default_fallback_advance")]
    pub fallback_advance: f64,
    pub glyphs: HashMap<char, GlyphMetrics>,
}

impl FontFace {
    /// Parses a face descriptor from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Loads a face descriptor file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("open {}", path.display()))?;
        let face = Self::from_json_str(&text)
            .with_context(|| format!("parse font descriptor {}", path.display()))?;
        if face.glyphs.is_empty() {
            bail!("font descriptor {} has no glyphs", path.display());
        }
        Ok(face)
    }

    /// Metrics for `ch`, falling back to a default advance for glyphs the
    /// face does not cover.
    pub fn glyph(&self, ch: char) -> GlyphMetrics {
        match self.glyphs.get(&ch) {
            Some(g) => *g,
            None => GlyphMetrics {
                advance: self.fallback_advance,
                width: self.fallback_advance,
                height: 1.0,
            },
        }
    }

    /// Advance of `ch` at `size` points; spaces use the space advance.
    pub fn advance(&self, ch: char, size: f64) -> f64 {
        if ch == ' ' {
            self.space_advance * size
        } else {
            self.glyph(ch).advance * size
        }
    }

    /// Width of `text` at `size` points.
    pub fn text_width(&self, text: &str, size: f64) -> f64 {
        text.chars().map(|ch| self.advance(ch, size)).sum()
    }

    /// Width and height of a single line of `text` at `size` points.
    pub fn text_size(&self, text: &str, size: f64) -> (f64, f64) {
        (self.text_width(text, size), self.line_height * size)
    }
}

/// Registry of faces plus the current drawing state.
#[derive(Debug)]
pub struct FontLibrary {
    faces: Vec<FontFace>,
    index: HashMap<String, usize>,
    current: Option<usize>,
    size: f64,
    color: Color,
    orientation: Orientation,
    ui_scale: f64,
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self {
            faces: Vec::new(),
            index: HashMap::new(),
            current: None,
            size: 20.0,
            color: Color::BLACK,
            orientation: Orientation::Top,
            ui_scale: 1.0,
        }
    }
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a face, replacing any previous face of the same name.
    /// The first registered face becomes current.
    pub fn register(&mut self, face: FontFace) -> usize {
        let idx = match self.index.get(&face.name) {
            Some(&idx) => {
                self.faces[idx] = face;
                idx
            }
            None => {
                let idx = self.faces.len();
                self.index.insert(face.name.clone(), idx);
                self.faces.push(face);
                idx
            }
        };
        if self.current.is_none() {
            self.current = Some(idx);
        }
        idx
    }

    /// Loads one face descriptor and registers it under `name`.
    pub fn load_face<P: AsRef<Path>>(&mut self, name: &str, path: P) -> anyhow::Result<usize> {
        let mut face = FontFace::load(&path)?;
        face.name = name.to_string();
        info!(name = %name, glyphs = face.glyphs.len(), "Loaded font face");
        Ok(self.register(face))
    }

    /// Loads every face of `config`, resolving files against `dir`.
    /// Faces that fail to load are skipped with a warning, matching the
    /// tolerant startup path of the rest of the engine.
    pub fn load_config<P: AsRef<Path>>(&mut self, config: &FontConfig, dir: P) -> usize {
        self.size = config.default_size;
        self.ui_scale = config.ui_scale;

        let mut loaded = 0;
        for entry in &config.fonts {
            let path = dir.as_ref().join(&entry.file);
            match self.load_face(&entry.name, &path) {
                Ok(_) => loaded += 1,
                Err(e) => warn!(name = %entry.name, error = %e, "Failed to load font"),
            }
        }
        loaded
    }

    /// Index of a registered face.
    pub fn face_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn face(&self, idx: usize) -> Option<&FontFace> {
        self.faces.get(idx)
    }

    /// The face drawing currently goes through, if any is registered.
    pub fn current_face(&self) -> Option<&FontFace> {
        self.current.and_then(|idx| self.faces.get(idx))
    }

    /// Makes `name` the current face.
    pub fn set_font(&mut self, name: &str) -> anyhow::Result<()> {
        match self.face_index(name) {
            Some(idx) => {
                self.current = Some(idx);
                Ok(())
            }
            None => bail!("unknown font face: {name}"),
        }
    }

    /// Makes `name` current and sets the point size in one call.
    pub fn set_props(&mut self, name: &str, size: f64) -> anyhow::Result<()> {
        self.set_font(name)?;
        self.size = size;
        Ok(())
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = size;
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Point size for a relative UI step, applied as the current size.
    pub fn auto_size(&mut self, rel: i32) -> f64 {
        let size = (rel + 2) as f64 * 4.0 * self.ui_scale;
        self.size = size;
        size
    }

    /// Line spacing for a relative UI step at the current size.
    pub fn auto_distance(&self, rel: i32) -> f64 {
        (rel + 5) as f64 * 0.2 * self.size
    }

    /// Width of `text` with the current face and size; 0 without a face.
    pub fn text_width(&self, text: &str) -> f64 {
        match self.current_face() {
            Some(face) => face.text_width(text, self.size),
            None => 0.0,
        }
    }

    /// Width and height of `text` with the current face and size.
    pub fn text_size(&self, text: &str) -> (f64, f64) {
        match self.current_face() {
            Some(face) => face.text_size(text, self.size),
            None => (0.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mono_face(name: &str) -> FontFace {
        let mut glyphs = HashMap::new();
        for ch in 'a'..='z' {
            glyphs.insert(
                ch,
                GlyphMetrics {
                    advance: 0.5,
                    width: 0.4,
                    height: 0.7,
                },
            );
        }
        FontFace {
            name: name.to_string(),
            line_height: 1.2,
            space_advance: 0.25,
            fallback_advance: 0.5,
            glyphs,
        }
    }

    #[test]
    fn descriptor_round_trips_through_json() {
        let face = mono_face("normal");
        let json = serde_json::to_string(&face).unwrap();
        let parsed = FontFace::from_json_str(&json).unwrap();
        assert_eq!(parsed.name, "normal");
        assert_eq!(parsed.glyph('a'), face.glyph('a'));
        assert_eq!(parsed.line_height, 1.2);
    }

    #[test]
    fn text_width_scales_with_size() {
        let face = mono_face("normal");
        // "ab cd" = 4 glyphs * 0.5 em + 1 space * 0.25 em.
        assert!((face.text_width("ab cd", 10.0) - 22.5).abs() < 1e-12);
        assert!((face.text_width("ab cd", 20.0) - 45.0).abs() < 1e-12);
    }

    #[test]
    fn missing_glyphs_use_the_fallback_advance() {
        let face = mono_face("normal");
        assert_eq!(face.glyph('Ø').advance, 0.5);
    }

    #[test]
    fn register_replaces_by_name() {
        let mut lib = FontLibrary::new();
        let a = lib.register(mono_face("normal"));
        let b = lib.register(mono_face("normal"));
        assert_eq!(a, b);
        assert_eq!(lib.face_index("normal"), Some(a));
    }

    #[test]
    fn first_registered_face_becomes_current() {
        let mut lib = FontLibrary::new();
        lib.register(mono_face("normal"));
        lib.register(mono_face("bold"));
        assert_eq!(lib.current_face().unwrap().name, "normal");

        lib.set_font("bold").unwrap();
        assert_eq!(lib.current_face().unwrap().name, "bold");
    }

    #[test]
    fn unknown_face_is_an_error() {
        let mut lib = FontLibrary::new();
        assert!(lib.set_font("missing").is_err());
    }

    #[test]
    fn auto_size_applies_the_ui_scale() {
        let mut lib = FontLibrary::new();
        lib.register(mono_face("normal"));
        lib.load_config(
            &FontConfig {
                fonts: Vec::new(),
                default_size: 20.0,
                ui_scale: 1.5,
            },
            ".",
        );
        assert_eq!(lib.auto_size(3), 30.0);
        assert_eq!(lib.size(), 30.0);
        // Distance ladder keys off the size just set.
        assert!((lib.auto_distance(0) - 30.0).abs() < 1e-12);
    }

    #[test]
    fn text_width_without_a_face_is_zero() {
        let lib = FontLibrary::new();
        assert_eq!(lib.text_width("anything"), 0.0);
    }
}
