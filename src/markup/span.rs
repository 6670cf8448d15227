//! Annotated spans over the raw response text

use std::fmt;

use crate::syntax::TokenType;

/// Semantic kind of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    Heading1,
    Heading2,
    Heading3,
    ListItem,
    Bold,
    Italic,
    InlineCode,
    CodeBlock,
    /// Classified code; only ever a child of a `CodeBlock`
    Token(TokenType),
}

impl Tag {
    /// Heading tag for a marker level (1..=3)
    pub fn heading(level: usize) -> Option<Self> {
        match level {
            1 => Some(Tag::Heading1),
            2 => Some(Tag::Heading2),
            3 => Some(Tag::Heading3),
            _ => None,
        }
    }

    /// Paint order between spans with identical ranges (lower paints first)
    pub fn paint_rank(&self) -> u8 {
        match self {
            Tag::Heading1 | Tag::Heading2 | Tag::Heading3 | Tag::ListItem => 0,
            Tag::Bold | Tag::Italic => 1,
            Tag::InlineCode => 2,
            Tag::CodeBlock => 3,
            Tag::Token(_) => 4,
        }
    }

    /// Line-level tags
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Tag::Heading1 | Tag::Heading2 | Tag::Heading3 | Tag::ListItem | Tag::CodeBlock
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tag::Heading1 => "heading1",
            Tag::Heading2 => "heading2",
            Tag::Heading3 => "heading3",
            Tag::ListItem => "list_item",
            Tag::Bold => "bold",
            Tag::Italic => "italic",
            Tag::InlineCode => "inline_code",
            Tag::CodeBlock => "code_block",
            Tag::Token(token_type) => token_type.name(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An annotated byte range of the raw text
///
/// Code-block spans own their classified tokens as `children`; every
/// child lies inside its parent and siblings never partially overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    pub tag: Tag,
    /// Fence language tag, for code blocks
    pub language: Option<String>,
    pub children: Vec<Span>,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, tag: Tag) -> Self {
        Self {
            start,
            end,
            tag,
            language: None,
            children: Vec::new(),
        }
    }

    /// Create a code-block span with its fence language
    pub fn code_block(start: usize, end: usize, language: &str) -> Self {
        let language = (!language.is_empty()).then(|| language.to_string());
        Self {
            language,
            ..Self::new(start, end, Tag::CodeBlock)
        }
    }

    /// Check if another span lies entirely inside this one
    pub fn encloses(&self, other: &Span) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The text this span covers
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }
}
