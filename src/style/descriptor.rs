//! Style types for paint instructions
//!
//! A [`StyleDescriptor`] is a fully resolved style. A [`StylePatch`] is
//! what a single tag contributes; patches stack like text-widget tag
//! options, inner tags overriding only the attributes they set.

use super::color::Color;

/// Font family class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    Proportional,
    Monospace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontSlant {
    #[default]
    Roman,
    Italic,
}

/// Solid border drawn around a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Border {
    pub color: Color,
    pub width: u16,
}

/// Concrete visual attributes for a range of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleDescriptor {
    /// Foreground colour
    pub foreground: Color,
    /// Background colour (None = viewer background)
    pub background: Option<Color>,
    /// Font family class
    pub font: FontFamily,
    /// Font size in points
    pub size: u16,
    pub weight: FontWeight,
    pub slant: FontSlant,
    /// Never set by a built-in tag; left for adapters to mark text
    /// (links, errors) before painting
    pub underline: bool,
    pub border: Option<Border>,
}

impl StyleDescriptor {
    /// Plain proportional text
    pub fn plain(foreground: Color, size: u16) -> Self {
        Self {
            foreground,
            background: None,
            font: FontFamily::Proportional,
            size,
            weight: FontWeight::Normal,
            slant: FontSlant::Roman,
            underline: false,
            border: None,
        }
    }

    /// Overlay the attributes a patch sets
    pub fn apply(&mut self, patch: &StylePatch) {
        if let Some(color) = patch.foreground {
            self.foreground = color;
        }
        if let Some(color) = patch.background {
            self.background = Some(color);
        }
        if let Some(font) = patch.font {
            self.font = font;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
        if let Some(slant) = patch.slant {
            self.slant = slant;
        }
        if let Some(underline) = patch.underline {
            self.underline = underline;
        }
        if let Some(border) = patch.border {
            self.border = Some(border);
        }
    }

    /// Builder: overlay a patch
    pub fn with(mut self, patch: &StylePatch) -> Self {
        self.apply(patch);
        self
    }

    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }

    pub fn is_italic(&self) -> bool {
        self.slant == FontSlant::Italic
    }
}

/// Partial style contributed by one tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StylePatch {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub font: Option<FontFamily>,
    pub size: Option<u16>,
    pub weight: Option<FontWeight>,
    pub slant: Option<FontSlant>,
    /// Only set by adapters
    pub underline: Option<bool>,
    pub border: Option<Border>,
}

impl StylePatch {
    /// Create a patch with just foreground colour
    pub fn fg(color: Color) -> Self {
        Self {
            foreground: Some(color),
            ..Default::default()
        }
    }

    /// Builder: set background colour
    pub fn with_bg(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Builder: set font family and size together
    pub fn with_font(mut self, font: FontFamily, size: u16) -> Self {
        self.font = Some(font);
        self.size = Some(size);
        self
    }

    /// Builder: set size only
    pub fn with_size(mut self, size: u16) -> Self {
        self.size = Some(size);
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.weight = Some(FontWeight::Bold);
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.slant = Some(FontSlant::Italic);
        self
    }

    /// Builder: force normal weight and roman slant
    pub fn with_normal(mut self) -> Self {
        self.weight = Some(FontWeight::Normal);
        self.slant = Some(FontSlant::Roman);
        self
    }

    /// Builder: set border
    pub fn with_border(mut self, color: Color, width: u16) -> Self {
        self.border = Some(Border { color, width });
        self
    }

    /// Check if this patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
