//! Inline emphasis: inline code, bold, italic
//!
//! Each construct is matched on a masked copy of the text in which the
//! regions already claimed (fences, list bullets, earlier constructs) are
//! blanked out. Blanking keeps byte offsets stable and guarantees that
//! inline spans either nest or are disjoint.

use regex::Regex;

use crate::error::{RenderError, Result};

use super::span::{Span, Tag};

/// Blank the given regions, keeping newlines and byte offsets
pub fn mask(text: &str, regions: &[(usize, usize)]) -> Result<String> {
    let mut bytes = text.as_bytes().to_vec();
    for &(start, end) in regions {
        let end = end.min(bytes.len());
        for byte in bytes.iter_mut().take(end).skip(start) {
            if *byte != b'\n' {
                *byte = b' ';
            }
        }
    }
    String::from_utf8(bytes).map_err(|e| RenderError::Message(format!("masking broke UTF-8: {}", e)))
}

/// Recognizes inline constructs
pub struct InlineScanner {
    code: Regex,
    bold: Regex,
    italic: Regex,
}

impl InlineScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            code: Regex::new(r"`([^`\n]+)`")?,
            bold: Regex::new(r"\*\*(.+?)\*\*")?,
            italic: Regex::new(r"\*([^*\n]+?)\*")?,
        })
    }

    /// Scan inline constructs outside the excluded regions
    ///
    /// Inline code is matched first, then bold, then italic; the full
    /// range of every match (markers included) is excluded from the
    /// passes after it.
    pub fn scan(&self, text: &str, excluded: &[(usize, usize)]) -> Result<Vec<Span>> {
        let mut spans = Vec::new();
        let mut claimed = excluded.to_vec();

        for (pattern, tag) in [
            (&self.code, Tag::InlineCode),
            (&self.bold, Tag::Bold),
            (&self.italic, Tag::Italic),
        ] {
            let masked = mask(text, &claimed)?;
            for caps in pattern.captures_iter(&masked) {
                let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                if inner.start() < inner.end() {
                    spans.push(Span::new(inner.start(), inner.end(), tag));
                }
                claimed.push((whole.start(), whole.end()));
            }
        }

        spans.sort_by_key(|s| s.start);
        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan<'a>(text: &'a str, excluded: &[(usize, usize)]) -> Vec<(Tag, &'a str)> {
        InlineScanner::new()
            .unwrap()
            .scan(text, excluded)
            .unwrap()
            .into_iter()
            .map(|s| (s.tag, &text[s.start..s.end]))
            .collect()
    }

    #[test]
    fn test_mask_keeps_offsets() {
        let masked = mask("ab\ncdé f", &[(1, 7)]).unwrap();
        assert_eq!(masked, "a \n     f");
        assert_eq!(masked.len(), "ab\ncdé f".len());
    }

    #[test]
    fn test_bold_before_italic() {
        let found = scan("**bold** and *italic*", &[]);
        assert_eq!(found, vec![(Tag::Bold, "bold"), (Tag::Italic, "italic")]);
    }

    #[test]
    fn test_italic_alone() {
        assert_eq!(scan("an *emphasized* word", &[]), vec![(Tag::Italic, "emphasized")]);
    }

    #[test]
    fn test_inline_code_shields_stars() {
        let found = scan("use `a**b**c` or **d**", &[]);
        assert_eq!(found, vec![(Tag::InlineCode, "a**b**c"), (Tag::Bold, "d")]);
    }

    #[test]
    fn test_italic_may_contain_bold() {
        let text = "*x **y** z*";
        let found = scan(text, &[]);
        assert_eq!(found, vec![(Tag::Italic, "x **y** z"), (Tag::Bold, "y")]);
    }

    #[test]
    fn test_no_match_across_lines() {
        assert!(scan("**open\nclose**", &[]).is_empty());
        assert!(scan("`a\nb`", &[]).is_empty());
    }

    #[test]
    fn test_excluded_regions_skipped() {
        let text = "```\n**x**\n```\n**y**";
        let found = scan(text, &[(0, 13)]);
        assert_eq!(found, vec![(Tag::Bold, "y")]);
    }

    #[test]
    fn test_fence_backticks_are_not_inline_code() {
        assert!(scan("```python\nprint(1)", &[]).is_empty());
    }
}
