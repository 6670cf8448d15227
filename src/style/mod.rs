//! Styling module
//!
//! Colours, themes, style descriptors and the pure mapping from a tag
//! plus (theme, font size) to concrete visual attributes.

mod color;
mod descriptor;
mod resolve;
mod theme;

pub use color::Color;
pub use descriptor::{Border, FontFamily, FontSlant, FontWeight, StyleDescriptor, StylePatch};
pub use resolve::{
    patch, plain, resolve, FontLimits, StyleCache, CODE_FONT_SIZE_OFFSET, DEFAULT_FONT_SIZE,
    MAX_FONT_SIZE, MIN_FONT_SIZE,
};
pub use theme::{Theme, ThemeSet, BASE_BACKGROUND, BASE_FOREGROUND, DEFAULT_THEME};
