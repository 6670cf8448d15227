//! Markup scanning module
//!
//! Recognizes the lightweight markup found in model responses: headings,
//! list items, fenced code blocks and inline emphasis. The scanner only
//! produces spans; styling happens later in the render pipeline.

mod block;
mod inline;
mod span;

use std::cmp::Reverse;

use tracing::debug;

use crate::error::Result;
use crate::syntax::ClassifierRegistry;

pub use block::{lines, BlockScan, BlockScanner, Line};
pub use inline::{mask, InlineScanner};
pub use span::{Span, Tag};

/// Order spans so that containing spans precede the spans they contain
///
/// Start ascending, then length descending, then paint rank.
pub fn sort_spans(spans: &mut [Span]) {
    spans.sort_by_key(|s| (s.start, Reverse(s.len()), s.tag.paint_rank()));
}

/// Block and inline markup scanner
pub struct Scanner {
    blocks: BlockScanner,
    inline: InlineScanner,
}

impl Scanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            blocks: BlockScanner::new()?,
            inline: InlineScanner::new()?,
        })
    }

    /// Scan block and inline constructs
    ///
    /// Code blocks come back without children; see [`Scanner::scan_with_tokens`].
    pub fn scan(&self, text: &str) -> Result<Vec<Span>> {
        let blocks = self.blocks.scan(text);

        let mut excluded = blocks.fences.clone();
        excluded.extend_from_slice(&blocks.markers);
        let inline = self.inline.scan(text, &excluded)?;

        debug!(
            "Scanned {} block spans ({} fences) and {} inline spans",
            blocks.spans.len(),
            blocks.fences.len(),
            inline.len()
        );

        let mut spans = blocks.spans;
        spans.extend(inline);
        sort_spans(&mut spans);
        Ok(spans)
    }

    /// Scan and classify the contents of recognized code blocks
    pub fn scan_with_tokens(
        &self,
        text: &str,
        registry: &ClassifierRegistry,
        default_language: &str,
    ) -> Result<Vec<Span>> {
        let mut spans = self.scan(text)?;
        attach_tokens(&mut spans, text, registry, default_language);
        Ok(spans)
    }
}

/// Classify each code block and attach the tokens as its children
///
/// A fence without a language tag uses `default_language`. Token offsets
/// are shifted into the coordinate space of `text`.
pub fn attach_tokens(
    spans: &mut [Span],
    text: &str,
    registry: &ClassifierRegistry,
    default_language: &str,
) {
    for span in spans.iter_mut().filter(|s| s.tag == Tag::CodeBlock) {
        let language = span.language.as_deref().unwrap_or(default_language);
        let base = span.start;
        let tokens = registry.classify(span.text(text), language);
        span.children = tokens
            .into_iter()
            .filter(|token| !token.is_empty())
            .map(|token| Span::new(base + token.start, base + token.end, Tag::Token(token.token_type)))
            .collect();
    }
}
