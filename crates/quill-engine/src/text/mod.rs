//! Text: font registry, style flags and glyph rasterization.

mod font_system;
mod glyphs;
mod style;

pub use font_system::{FontId, FontSystem};
pub(crate) use glyphs::GlyphCache;
pub use style::{FontStyle, TextAlign};
