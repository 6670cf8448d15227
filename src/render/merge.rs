//! Flatten, validate and sweep the span tree into flat segments

use crate::error::{RenderError, Result};
use crate::markup::{sort_spans, Span, Tag};

/// A maximal range over which the set of active tags is constant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    /// Active tags, outermost first
    pub tags: Vec<Tag>,
}

/// Flatten a span tree into one sorted list
///
/// Children are checked against their parent; a child sticking out of
/// its code block is an overlap.
pub fn flatten(spans: &[Span]) -> Result<Vec<Span>> {
    let mut flat = Vec::new();
    for span in spans {
        for child in &span.children {
            if !span.encloses(child) {
                return Err(RenderError::Overlap {
                    start: child.start,
                    end: child.end,
                    outer_start: span.start,
                    outer_end: span.end,
                });
            }
        }
        flat.push(Span {
            children: Vec::new(),
            ..span.clone()
        });
        flat.extend(flatten(&span.children)?);
    }
    sort_spans(&mut flat);
    Ok(flat)
}

/// Check every span lies within the text on character boundaries
pub fn validate(spans: &[Span], text: &str) -> Result<()> {
    for span in spans {
        let in_bounds = span.start <= span.end && span.end <= text.len();
        if !in_bounds || !text.is_char_boundary(span.start) || !text.is_char_boundary(span.end) {
            return Err(RenderError::InvalidSpan {
                start: span.start,
                end: span.end,
                len: text.len(),
            });
        }
    }
    Ok(())
}

struct Sweep {
    segments: Vec<Segment>,
    cursor: usize,
}

impl Sweep {
    /// Emit `[cursor, end)` under the given stack and advance
    fn emit(&mut self, end: usize, stack: &[&Span]) {
        if self.cursor >= end {
            return;
        }
        let tags: Vec<Tag> = stack.iter().map(|s| s.tag).collect();
        match self.segments.last_mut() {
            Some(last) if last.end == self.cursor && last.tags == tags => last.end = end,
            _ => self.segments.push(Segment {
                start: self.cursor,
                end,
                tags,
            }),
        }
        self.cursor = end;
    }
}

/// Partition `[0, len)` into segments
///
/// `spans` must be flat and sorted with [`sort_spans`]. Uncovered ranges
/// produce segments with no tags.
pub fn sweep(spans: &[Span], len: usize) -> Result<Vec<Segment>> {
    let mut state = Sweep {
        segments: Vec::new(),
        cursor: 0,
    };
    let mut stack: Vec<&Span> = Vec::new();

    for span in spans.iter().filter(|s| !s.is_empty()) {
        while let Some(top) = stack.last().copied() {
            if top.end > span.start {
                break;
            }
            state.emit(top.end, &stack);
            stack.pop();
        }

        if let Some(top) = stack.last() {
            if span.end > top.end {
                return Err(RenderError::Overlap {
                    start: span.start,
                    end: span.end,
                    outer_start: top.start,
                    outer_end: top.end,
                });
            }
        }

        state.emit(span.start, &stack);
        stack.push(span);
    }

    while let Some(top) = stack.last().copied() {
        state.emit(top.end, &stack);
        stack.pop();
    }
    state.emit(len, &stack);

    Ok(state.segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::TokenType;

    fn tags_at(segments: &[Segment]) -> Vec<(usize, usize, Vec<Tag>)> {
        segments
            .iter()
            .map(|s| (s.start, s.end, s.tags.clone()))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(sweep(&[], 0).unwrap().is_empty());
    }

    #[test]
    fn test_gaps_are_untagged() {
        let spans = vec![Span::new(2, 4, Tag::Bold)];
        let segments = sweep(&spans, 6).unwrap();
        assert_eq!(
            tags_at(&segments),
            vec![(0, 2, vec![]), (2, 4, vec![Tag::Bold]), (4, 6, vec![])]
        );
    }

    #[test]
    fn test_nested_stack() {
        let spans = vec![Span::new(0, 10, Tag::ListItem), Span::new(2, 5, Tag::Bold)];
        let segments = sweep(&spans, 10).unwrap();
        assert_eq!(
            tags_at(&segments),
            vec![
                (0, 2, vec![Tag::ListItem]),
                (2, 5, vec![Tag::ListItem, Tag::Bold]),
                (5, 10, vec![Tag::ListItem]),
            ]
        );
    }

    #[test]
    fn test_adjacent_equal_stacks_merge() {
        let spans = vec![Span::new(0, 2, Tag::Bold), Span::new(2, 4, Tag::Bold)];
        let segments = sweep(&spans, 4).unwrap();
        assert_eq!(tags_at(&segments), vec![(0, 4, vec![Tag::Bold])]);
    }

    #[test]
    fn test_identical_ranges_stack_by_rank() {
        let mut spans = vec![Span::new(0, 3, Tag::Bold), Span::new(0, 3, Tag::Heading1)];
        sort_spans(&mut spans);
        let segments = sweep(&spans, 3).unwrap();
        assert_eq!(segments[0].tags, vec![Tag::Heading1, Tag::Bold]);
    }

    #[test]
    fn test_partial_overlap_is_error() {
        let spans = vec![Span::new(0, 5, Tag::Bold), Span::new(3, 8, Tag::Italic)];
        assert!(matches!(sweep(&spans, 10), Err(RenderError::Overlap { start: 3, .. })));
    }

    #[test]
    fn test_flatten_children() {
        let mut block = Span::code_block(4, 12, "python");
        block.children = vec![
            Span::new(4, 6, Tag::Token(TokenType::Keyword)),
            Span::new(6, 12, Tag::Token(TokenType::PlainCode)),
        ];
        let flat = flatten(&[Span::new(0, 3, Tag::Bold), block]).unwrap();

        let order: Vec<_> = flat.iter().map(|s| s.tag).collect();
        assert_eq!(
            order,
            vec![
                Tag::Bold,
                Tag::CodeBlock,
                Tag::Token(TokenType::Keyword),
                Tag::Token(TokenType::PlainCode),
            ]
        );
        assert!(flat.iter().all(|s| s.children.is_empty()));
    }

    #[test]
    fn test_flatten_rejects_escaping_child() {
        let mut block = Span::code_block(4, 8, "");
        block.children = vec![Span::new(6, 9, Tag::Token(TokenType::String))];
        assert!(matches!(flatten(&[block]), Err(RenderError::Overlap { .. })));
    }

    #[test]
    fn test_validate_bounds_and_boundaries() {
        let text = "aé";
        assert!(validate(&[Span::new(0, 3, Tag::Bold)], text).is_ok());
        assert!(validate(&[Span::new(0, 4, Tag::Bold)], text).is_err());
        assert!(validate(&[Span::new(0, 2, Tag::Bold)], text).is_err());
        assert!(validate(&[Span::new(2, 1, Tag::Bold)], text).is_err());
    }
}
