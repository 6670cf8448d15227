//! Line-oriented block constructs: fenced code, headings, list items

use regex::Regex;

use crate::error::Result;

use super::span::{Span, Tag};

/// A physical line of the raw text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset just past the content (line terminator excluded)
    pub end: usize,
}

/// Split text into lines, keeping byte offsets
///
/// Both `\n` and `\r\n` terminators are excluded from the line range.
pub fn lines(text: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut start = 0;
    for chunk in text.split_inclusive('\n') {
        let content = chunk.trim_end_matches('\n').trim_end_matches('\r');
        lines.push(Line {
            start,
            end: start + content.len(),
        });
        start += chunk.len();
    }
    lines
}

/// Result of the block pass
#[derive(Debug, Default)]
pub struct BlockScan {
    /// Heading, list item and code block spans, in document order
    pub spans: Vec<Span>,
    /// Whole fence regions, delimiter lines included
    pub fences: Vec<(usize, usize)>,
    /// List bullet characters, which never open emphasis
    pub markers: Vec<(usize, usize)>,
}

/// Recognizes block constructs line by line
pub struct BlockScanner {
    fence_open: Regex,
    fence_close: Regex,
    heading: Regex,
    list_item: Regex,
}

impl BlockScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fence_open: Regex::new(r"^```([A-Za-z0-9_+#.\-]*)[ \t]*$")?,
            fence_close: Regex::new(r"^```[ \t]*$")?,
            heading: Regex::new(r"^[ \t]*(#{1,3}) ")?,
            list_item: Regex::new(r"^\s*([-*+]|\d+\.)\s+")?,
        })
    }

    /// Scan all block constructs
    pub fn scan(&self, text: &str) -> BlockScan {
        let lines = lines(text);
        let mut result = BlockScan::default();
        let mut fenced = vec![false; lines.len()];

        self.scan_fences(text, &lines, &mut fenced, &mut result);

        for (idx, line) in lines.iter().enumerate() {
            if fenced[idx] || line.start == line.end {
                continue;
            }
            let content = &text[line.start..line.end];

            if let Some(caps) = self.heading.captures(content) {
                let level = caps.get(1).map_or(0, |m| m.len());
                if let Some(tag) = Tag::heading(level) {
                    result.spans.push(Span::new(line.start, line.end, tag));
                }
            } else if let Some(caps) = self.list_item.captures(content) {
                result.spans.push(Span::new(line.start, line.end, Tag::ListItem));
                if let Some(bullet) = caps.get(1) {
                    result
                        .markers
                        .push((line.start + bullet.start(), line.start + bullet.end()));
                }
            }
        }

        result.spans.sort_by_key(|s| s.start);
        result
    }

    /// Pair opening and closing fence lines
    ///
    /// An opening fence without a closing line is left as plain text.
    fn scan_fences(&self, text: &str, lines: &[Line], fenced: &mut [bool], result: &mut BlockScan) {
        let mut i = 0;
        while i < lines.len() {
            let open = &lines[i];
            let Some(caps) = self.fence_open.captures(&text[open.start..open.end]) else {
                i += 1;
                continue;
            };
            let language = caps.get(1).map_or("", |m| m.as_str());

            let close = (i + 1..lines.len())
                .find(|&j| self.fence_close.is_match(&text[lines[j].start..lines[j].end]));
            let Some(j) = close else {
                i += 1;
                continue;
            };

            if j > i + 1 {
                let start = lines[i + 1].start;
                let end = lines[j - 1].end;
                if start < end {
                    result.spans.push(Span::code_block(start, end, language));
                }
            }
            result.fences.push((open.start, lines[j].end));
            fenced[i..=j].iter_mut().for_each(|f| *f = true);
            i = j + 1;
        }
    }
}
