//! Render pipeline
//!
//! Raw response text in, a flat list of styled paint instructions out.
//! Every call recomputes from the text and the [`RenderContext`]; only
//! resolved style patches are cached between calls.

mod merge;

use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error};

use crate::error::{RenderError, Result};
use crate::markup::{Scanner, Span, Tag};
use crate::style::{self, FontLimits, StyleCache, StyleDescriptor, Theme, ThemeSet, DEFAULT_FONT_SIZE};
use crate::syntax::ClassifierRegistry;

pub use merge::{flatten, sweep, validate, Segment};

/// Language assumed for fences without a tag
pub const DEFAULT_LANGUAGE: &str = "python";

/// Everything a render depends on besides the text
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub theme: Theme,
    pub base_font_size: u16,
    /// Language for untagged code fences
    pub language_hint: String,
    pub limits: FontLimits,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(Theme::default(), DEFAULT_FONT_SIZE)
    }
}

impl RenderContext {
    pub fn new(theme: Theme, base_font_size: u16) -> Self {
        Self {
            theme,
            base_font_size,
            language_hint: DEFAULT_LANGUAGE.to_string(),
            limits: FontLimits::default(),
        }
    }

    /// Context for a named theme, falling back to the set's default
    pub fn themed(themes: &ThemeSet, name: &str, base_font_size: u16) -> Self {
        Self::new(themes.resolve(name).clone(), base_font_size)
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language_hint = language.to_string();
        self
    }

    pub fn with_limits(mut self, limits: FontLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Style a UI should apply to one byte range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintInstruction {
    pub start: usize,
    pub end: usize,
    pub style: StyleDescriptor,
    /// Tags in effect, outermost first; empty for plain text
    pub tags: Vec<Tag>,
}

impl PaintInstruction {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_plain(&self) -> bool {
        self.tags.is_empty()
    }

    /// Innermost tag
    pub fn tag(&self) -> Option<Tag> {
        self.tags.last().copied()
    }
}

/// Response formatter
///
/// Holds a style cache behind a `RefCell`, so a renderer belongs to one
/// thread.
pub struct Renderer {
    registry: ClassifierRegistry,
    scanner: Scanner,
    cache: RefCell<StyleCache>,
}

impl Renderer {
    /// Renderer with the built-in languages
    pub fn new() -> Result<Self> {
        Self::with_registry(ClassifierRegistry::new())
    }

    pub fn with_registry(registry: ClassifierRegistry) -> Result<Self> {
        Ok(Self {
            registry,
            scanner: Scanner::new()?,
            cache: RefCell::new(StyleCache::new()),
        })
    }

    pub fn registry(&self) -> &ClassifierRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ClassifierRegistry {
        &mut self.registry
    }

    /// Span tree of the text, code blocks carrying their tokens
    pub fn annotate(&self, text: &str, ctx: &RenderContext) -> Result<Vec<Span>> {
        self.scanner
            .scan_with_tokens(text, &self.registry, &ctx.language_hint)
    }

    /// Paint instructions covering the whole text
    ///
    /// Never fails: a pipeline error or panic is logged and the text is
    /// returned as a single plain instruction.
    pub fn render(&self, text: &str, ctx: &RenderContext) -> Vec<PaintInstruction> {
        if text.is_empty() {
            return Vec::new();
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.try_render(text, ctx)))
            .unwrap_or_else(|payload| Err(RenderError::Panic(panic_message(payload.as_ref()))));

        match outcome {
            Ok(instructions) => instructions,
            Err(e) => {
                error!(
                    "Render failed for {} bytes (theme {}, size {}): {}",
                    text.len(),
                    ctx.theme.name(),
                    ctx.base_font_size,
                    e
                );
                if let Ok(mut cache) = self.cache.try_borrow_mut() {
                    *cache = StyleCache::new();
                }
                self.plain(text, ctx)
            }
        }
    }

    /// Fallible render, errors propagated
    pub fn try_render(&self, text: &str, ctx: &RenderContext) -> Result<Vec<PaintInstruction>> {
        let spans = flatten(&self.annotate(text, ctx)?)?;
        validate(&spans, text)?;
        let segments = sweep(&spans, text.len())?;

        let base = style::plain(&ctx.theme, ctx.base_font_size, &ctx.limits);
        let mut cache = self
            .cache
            .try_borrow_mut()
            .map_err(|e| RenderError::Message(format!("style cache busy: {}", e)))?;
        cache.prepare(&ctx.theme, &ctx.limits);

        let instructions: Vec<PaintInstruction> = segments
            .into_iter()
            .map(|segment| {
                let mut style = base;
                for &tag in &segment.tags {
                    style.apply(&cache.get(tag, ctx.base_font_size));
                }
                PaintInstruction {
                    start: segment.start,
                    end: segment.end,
                    style,
                    tags: segment.tags,
                }
            })
            .collect();

        debug!(
            "Rendered {} spans into {} instructions",
            spans.len(),
            instructions.len()
        );
        Ok(instructions)
    }

    /// The whole text as one plain instruction
    pub fn plain(&self, text: &str, ctx: &RenderContext) -> Vec<PaintInstruction> {
        if text.is_empty() {
            return Vec::new();
        }
        vec![PaintInstruction {
            start: 0,
            end: text.len(),
            style: style::plain(&ctx.theme, ctx.base_font_size, &ctx.limits),
            tags: Vec::new(),
        }]
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{FontFamily, MIN_FONT_SIZE};
    use crate::syntax::{Classifier, Token, TokenType};

    fn render(text: &str) -> Vec<PaintInstruction> {
        Renderer::new().unwrap().render(text, &RenderContext::default())
    }

    fn assert_partition(instructions: &[PaintInstruction], text: &str) {
        let mut cursor = 0;
        for instruction in instructions {
            assert_eq!(instruction.start, cursor);
            assert!(instruction.end > instruction.start);
            cursor = instruction.end;
        }
        assert_eq!(cursor, text.len());
    }

    const SAMPLE: &str = "# Report\n\nThe **main** finding is *clear*.\n\n\
        - use `numpy`\n- keep *it* simple\n\n```python\n@cache\n\
        def area(r):\n    # circle\n    return 3.14 * r ** 2\n```\n## Next\nDone.";

    #[test]
    fn test_empty_text() {
        assert!(render("").is_empty());
    }

    #[test]
    fn test_partition_and_roundtrip() {
        let instructions = render(SAMPLE);
        assert_partition(&instructions, SAMPLE);

        let joined: String = instructions.iter().map(|i| i.text(SAMPLE)).collect();
        assert_eq!(joined, SAMPLE);
    }

    #[test]
    fn test_idempotent() {
        let renderer = Renderer::new().unwrap();
        let ctx = RenderContext::default();
        assert_eq!(renderer.render(SAMPLE, &ctx), renderer.render(SAMPLE, &ctx));
    }

    #[test]
    fn test_comment_nested_in_code_block() {
        let text = "```python\n# note\nx = 1\n```";
        let instructions = render(text);
        let ctx = RenderContext::default();
        let block_style = style::resolve(Tag::CodeBlock, &ctx.theme, 13, &ctx.limits);

        let comment = instructions
            .iter()
            .find(|i| i.tag() == Some(Tag::Token(TokenType::Comment)))
            .unwrap();
        assert_eq!(comment.text(text), "# note");
        assert_eq!(comment.tags[0], Tag::CodeBlock);
        assert_ne!(comment.style, block_style);
        assert!(comment.style.is_italic());
        assert_eq!(comment.style.background, block_style.background);
    }

    #[test]
    fn test_bold_and_italic() {
        let text = "**bold** and *italic*";
        let instructions = render(text);
        assert_partition(&instructions, text);

        let styled: Vec<_> = instructions
            .iter()
            .filter(|i| !i.is_plain())
            .map(|i| (i.text(text), i.tags.clone()))
            .collect();
        assert_eq!(
            styled,
            vec![("bold", vec![Tag::Bold]), ("italic", vec![Tag::Italic])]
        );
        let bold = instructions.iter().find(|i| i.tag() == Some(Tag::Bold)).unwrap();
        assert!(bold.style.is_bold());
        assert!(!bold.style.is_italic());
    }

    #[test]
    fn test_unterminated_fence_is_plain() {
        let text = "```python\nprint(1)";
        let instructions = render(text);
        assert_eq!(instructions.len(), 1);
        assert!(instructions[0].is_plain());
        assert_eq!(instructions[0].text(text), text);
    }

    #[test]
    fn test_heading_then_body() {
        let text = "# Title\nBody";
        let instructions = render(text);
        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0].text(text), "# Title");
        assert_eq!(instructions[0].tags, vec![Tag::Heading1]);
        assert_eq!(instructions[0].style.size, 17);
        assert_eq!(instructions[1].text(text), "\nBody");
        assert!(instructions[1].is_plain());
        assert_eq!(instructions[1].style.size, 13);
    }

    #[test]
    fn test_bold_inside_heading_keeps_heading_size() {
        let text = "## A **big** deal";
        let instructions = render(text);
        let bold = instructions.iter().find(|i| i.tag() == Some(Tag::Bold)).unwrap();
        assert_eq!(bold.tags, vec![Tag::Heading2, Tag::Bold]);
        assert_eq!(bold.style.size, 15);
    }

    #[test]
    fn test_unknown_theme_uses_default() {
        let renderer = Renderer::new().unwrap();
        let themes = ThemeSet::new();
        let unknown = RenderContext::themed(&themes, "solarized", 13);
        assert_eq!(
            renderer.render(SAMPLE, &unknown),
            renderer.render(SAMPLE, &RenderContext::default())
        );
    }

    #[test]
    fn test_theme_switch_restyles() {
        let renderer = Renderer::new().unwrap();
        let dark = renderer.render(SAMPLE, &RenderContext::default());
        let light = renderer.render(SAMPLE, &RenderContext::new(Theme::light(), 13));
        assert_eq!(dark.len(), light.len());
        assert_ne!(dark, light);
    }

    #[test]
    fn test_font_floor() {
        let text = "call `f()` now";
        let ctx = RenderContext::new(Theme::light(), 4);
        let instructions = Renderer::new().unwrap().render(text, &ctx);
        let code = instructions
            .iter()
            .find(|i| i.tag() == Some(Tag::InlineCode))
            .unwrap();
        assert_eq!(code.text(text), "f()");
        assert_eq!(code.style.font, FontFamily::Monospace);
        assert_eq!(code.style.size, MIN_FONT_SIZE);
    }

    #[test]
    fn test_language_hint_for_untagged_fence() {
        let text = "```\nimport os\n```";
        let renderer = Renderer::new().unwrap();

        let python = renderer.render(text, &RenderContext::default());
        assert!(python
            .iter()
            .any(|i| i.tag() == Some(Tag::Token(TokenType::KeywordNamespace))));

        let other = renderer.render(text, &RenderContext::default().with_language("text"));
        assert!(other.iter().all(|i| !matches!(i.tag(), Some(Tag::Token(_)))));
    }

    struct OutOfRange;

    impl Classifier for OutOfRange {
        fn name(&self) -> &str {
            "broken"
        }

        fn classify(&self, code: &str) -> Vec<Token> {
            vec![Token::new(0, code.len() + 100, TokenType::String)]
        }
    }

    struct Exploding;

    impl Classifier for Exploding {
        fn name(&self) -> &str {
            "boom"
        }

        fn classify(&self, _code: &str) -> Vec<Token> {
            panic!("classifier blew up");
        }
    }

    #[test]
    fn test_invalid_span_falls_back_to_plain() {
        let mut registry = ClassifierRegistry::new();
        registry.register(Box::new(OutOfRange));
        let renderer = Renderer::with_registry(registry).unwrap();
        let ctx = RenderContext::default();

        let text = "**x**\n```broken\nabc\n```";
        assert!(renderer.try_render(text, &ctx).is_err());
        assert_eq!(renderer.render(text, &ctx), renderer.plain(text, &ctx));
    }

    #[test]
    fn test_panic_falls_back_to_plain() {
        let mut renderer = Renderer::new().unwrap();
        renderer.registry_mut().register(Box::new(Exploding));
        assert!(renderer.registry().supports("boom"));
        let ctx = RenderContext::default();

        let text = "```boom\nabc\n```";
        let instructions = renderer.render(text, &ctx);
        assert_eq!(instructions.len(), 1);
        assert!(instructions[0].is_plain());

        // the renderer stays usable
        assert!(renderer.try_render("*ok*", &ctx).is_ok());
    }

    #[test]
    fn test_annotate_exposes_tree() {
        let renderer = Renderer::new().unwrap();
        let spans = renderer
            .annotate("- item\n```py\npass\n```", &RenderContext::default())
            .unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].tag, Tag::ListItem);
        assert_eq!(spans[1].language.as_deref(), Some("py"));
        assert!(!spans[1].children.is_empty());
    }
}
