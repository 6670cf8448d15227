//! screener-render - formatting engine for vision-model responses
//!
//! Takes the raw text a model returns (headings, lists, emphasis, inline
//! code and fenced code blocks) and produces a flat list of
//! [`PaintInstruction`]s, each a byte range with a fully resolved style.
//! Python code blocks are highlighted token by token.
//!
//! ```no_run
//! use screener_render::{RenderContext, Renderer};
//!
//! let renderer = Renderer::new()?;
//! let text = "## Result\n```python\nprint('hi')\n```";
//! for instruction in renderer.render(text, &RenderContext::default()) {
//!     println!("{:?} {:?}", instruction.tags, instruction.text(text));
//! }
//! # Ok::<(), screener_render::error::RenderError>(())
//! ```

pub mod config;
pub mod error;
pub mod markup;
pub mod position;
pub mod render;
pub mod style;
pub mod syntax;
pub mod terminal;

pub use error::{RenderError, Result};
pub use markup::{Span, Tag};
pub use position::{Position, TextMap};
pub use render::{PaintInstruction, RenderContext, Renderer};
pub use style::{StyleDescriptor, Theme, ThemeSet};
