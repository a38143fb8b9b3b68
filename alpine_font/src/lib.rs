//! `alpine_font`
//!
//! Bitmap/texture font subsystem: face metrics, text layout, and a
//! backend-agnostic draw path. Rasterization and GL state live with the
//! renderer; this crate only decides what to draw and where.

pub mod config;
pub mod font;
pub mod layout;
pub mod render;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::config::*;
    pub use crate::font::*;
    pub use crate::layout::*;
    pub use crate::render::*;
}
