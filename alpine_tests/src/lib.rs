//! Shared support for the integration tests.

use std::collections::HashMap;

use alpine_font::font::{FontFace, FontLibrary, GlyphMetrics};

/// Installs a fmt subscriber once per test binary; later calls are no-ops.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_test_writer()
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!("test subscriber installed");
    }
}

/// A synthetic monospace face: every lowercase glyph advances half an em.
pub fn mono_face(name: &str) -> FontFace {
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
        space_advance: 0.5,
        fallback_advance: 0.5,
        glyphs,
    }
}

/// A library with [`mono_face`] registered and a 10pt size.
pub fn mono_library() -> FontLibrary {
    let mut lib = FontLibrary::new();
    lib.register(mono_face("normal"));
    lib.set_size(10.0);
    lib
}
