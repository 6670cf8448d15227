//! Tag to style resolution
//!
//! Resolution is a pure function of (tag, theme, base size, font limits).
//! [`StyleCache`] memoizes it for the duration of a theme snapshot.

use std::collections::HashMap;

use crate::markup::Tag;
use crate::syntax::TokenType;

use super::descriptor::{FontFamily, StyleDescriptor, StylePatch};
use super::theme::Theme;

/// Smallest font size ever produced
pub const MIN_FONT_SIZE: u16 = 8;
/// Largest base font size accepted from settings
pub const MAX_FONT_SIZE: u16 = 17;
/// Base font size when nothing is configured
pub const DEFAULT_FONT_SIZE: u16 = 13;
/// Size delta of code blocks relative to the base size
pub const CODE_FONT_SIZE_OFFSET: i16 = -1;

/// Font size bounds and code offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontLimits {
    /// Floor applied to every computed size
    pub min: u16,
    /// Ceiling for the configured base size
    pub max: u16,
    /// Code block size delta
    pub code_offset: i16,
}

impl Default for FontLimits {
    fn default() -> Self {
        Self {
            min: MIN_FONT_SIZE,
            max: MAX_FONT_SIZE,
            code_offset: CODE_FONT_SIZE_OFFSET,
        }
    }
}

impl FontLimits {
    /// Base size plus a delta, floored at the minimum
    pub fn sized(&self, base: u16, delta: i32) -> u16 {
        let size = (i32::from(base) + delta).max(i32::from(self.min));
        u16::try_from(size).unwrap_or(u16::MAX)
    }

    /// Size of code block text
    pub fn code_size(&self, base: u16) -> u16 {
        self.sized(base, i32::from(self.code_offset))
    }

    /// Clamp a configured base size into `[min, max]`
    pub fn clamp_base(&self, size: u16) -> u16 {
        size.clamp(self.min, self.max.max(self.min))
    }
}

/// Style of text no tag covers
pub fn plain(theme: &Theme, base_size: u16, limits: &FontLimits) -> StyleDescriptor {
    StyleDescriptor::plain(theme.foreground(), limits.sized(base_size, 0))
}

/// The attributes a tag contributes on top of what encloses it
pub fn patch(tag: Tag, theme: &Theme, base_size: u16, limits: &FontLimits) -> StylePatch {
    match tag {
        Tag::Heading1 => StylePatch::fg(theme.lookup("heading1"))
            .with_size(limits.sized(base_size, 4))
            .with_bold(),
        Tag::Heading2 => StylePatch::fg(theme.lookup("heading2"))
            .with_size(limits.sized(base_size, 2))
            .with_bold(),
        Tag::Heading3 => StylePatch::fg(theme.foreground())
            .with_size(limits.sized(base_size, 1))
            .with_bold(),
        Tag::ListItem => StylePatch::fg(theme.lookup("list_item")),
        Tag::Bold => StylePatch::default().with_bold(),
        Tag::Italic => StylePatch::default().with_italic(),
        Tag::InlineCode => StylePatch::fg(theme.lookup("inline_code_fg"))
            .with_bg(theme.lookup("inline_code_bg"))
            .with_font(FontFamily::Monospace, limits.sized(base_size, -1))
            .with_normal(),
        Tag::CodeBlock => StylePatch::fg(theme.lookup("code_block_fg"))
            .with_bg(theme.lookup("code_block_bg"))
            .with_font(FontFamily::Monospace, limits.code_size(base_size))
            .with_normal()
            .with_border(theme.lookup("code_block_border"), 1),
        Tag::Token(token_type) => {
            let patch = StylePatch::fg(theme.lookup(token_type.color_key()))
                .with_font(FontFamily::Monospace, limits.code_size(base_size));
            if matches!(token_type, TokenType::Comment | TokenType::DocString) {
                patch.with_italic()
            } else {
                patch
            }
        }
    }
}

/// Fully resolved style of a tag applied directly over plain text
pub fn resolve(tag: Tag, theme: &Theme, base_size: u16, limits: &FontLimits) -> StyleDescriptor {
    plain(theme, base_size, limits).with(&patch(tag, theme, base_size, limits))
}

/// Memoized style patches for one theme snapshot
#[derive(Debug, Default)]
pub struct StyleCache {
    theme: Option<Theme>,
    limits: FontLimits,
    patches: HashMap<(Tag, u16), StylePatch>,
}

impl StyleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the cache to a theme and limits, dropping stale entries
    pub fn prepare(&mut self, theme: &Theme, limits: &FontLimits) {
        if self.theme.as_ref() != Some(theme) || self.limits != *limits {
            self.patches.clear();
            self.theme = Some(theme.clone());
            self.limits = *limits;
        }
    }

    /// Patch for a tag at a base size under the prepared theme
    pub fn get(&mut self, tag: Tag, base_size: u16) -> StylePatch {
        let Self { theme, limits, patches } = self;
        let Some(theme) = theme.as_ref() else {
            return patch(tag, &Theme::default(), base_size, limits);
        };
        *patches
            .entry((tag, base_size))
            .or_insert_with(|| patch(tag, theme, base_size, limits))
    }

    /// Number of memoized entries
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}
