//! Pattern rules for code classification
//!
//! This module defines the rule types used to match and classify
//! code: word-level patterns and delimited regions (comments, strings).

use regex::Regex;
use super::tokens::TokenType;

/// A word-level pattern rule
///
/// Matches a regex pattern and assigns a token type to the match, or to
/// one capture group of it when the surrounding context must not be
/// claimed (e.g. the name after `def`).
pub struct PatternRule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Token type to assign to matches
    pub token_type: TokenType,
    /// Priority (higher = claims first)
    pub priority: i32,
    /// Capture group that is classified (0 = whole match)
    pub group: usize,
    /// A match directly after this character is skipped
    pub not_after: Option<char>,
}

impl PatternRule {
    /// Create a new pattern rule classifying the whole match
    pub fn new(name: &str, pattern: &str, token_type: TokenType) -> Option<Self> {
        Self::with_group(name, pattern, token_type, 0)
    }

    /// Create a pattern rule classifying only one capture group
    pub fn with_group(name: &str, pattern: &str, token_type: TokenType, group: usize) -> Option<Self> {
        Regex::new(pattern).ok().map(|regex| Self {
            name: name.to_string(),
            pattern: regex,
            token_type,
            priority: token_type.priority(),
            group,
            not_after: None,
        })
    }

    /// Builder: skip matches immediately preceded by `c`
    pub fn not_preceded_by(mut self, c: char) -> Self {
        self.not_after = Some(c);
        self
    }

    fn preceded_ok(&self, text: &str, start: usize) -> bool {
        match self.not_after {
            Some(c) => text[..start].chars().next_back() != Some(c),
            None => true,
        }
    }

    /// All non-empty matches of the classified group, in order
    pub fn find_all(&self, text: &str) -> Vec<(usize, usize)> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(self.group))
            .filter(|m| m.start() < m.end() && self.preceded_ok(text, m.start()))
            .map(|m| (m.start(), m.end()))
            .collect()
    }
}

/// A delimited region rule (comments, strings)
///
/// Regions are found left to right: whichever region opens first claims
/// its text, so a `#` inside a string never starts a comment.
pub struct RegionRule {
    /// Name for debugging
    pub name: String,
    /// Pattern that opens the region
    pub start: Regex,
    /// Pattern that closes the region (None = runs to end of line)
    pub end: Option<Regex>,
    /// Token type for this region
    pub token_type: TokenType,
    /// Whether an unclosed region stops at the end of its line
    pub single_line: bool,
    /// Escape character (usually backslash)
    pub escape_char: Option<char>,
    /// Token type when the opener is the first thing on its line
    pub leading_type: Option<TokenType>,
}

impl RegionRule {
    /// Create a new region rule
    pub fn new(
        name: &str,
        start_pattern: &str,
        end_pattern: Option<&str>,
        token_type: TokenType,
        single_line: bool,
    ) -> Option<Self> {
        let start = Regex::new(start_pattern).ok()?;
        let end = match end_pattern {
            Some(pattern) => Some(Regex::new(pattern).ok()?),
            None => None,
        };
        Some(Self {
            name: name.to_string(),
            start,
            end,
            token_type,
            single_line,
            escape_char: None,
            leading_type: None,
        })
    }

    /// Create a region rule with escape support
    pub fn with_escape(
        name: &str,
        start_pattern: &str,
        end_pattern: &str,
        token_type: TokenType,
        single_line: bool,
        escape_char: char,
    ) -> Option<Self> {
        let mut rule = Self::new(name, start_pattern, Some(end_pattern), token_type, single_line)?;
        rule.escape_char = Some(escape_char);
        Some(rule)
    }

    /// Builder: classify regions that open a line as `token_type`
    pub fn leading(mut self, token_type: TokenType) -> Self {
        self.leading_type = Some(token_type);
        self
    }

    /// Token type of a region opening at `start`
    pub fn token_type_at(&self, text: &str, start: usize) -> TokenType {
        match self.leading_type {
            Some(kind) if starts_line(text, start) => kind,
            _ => self.token_type,
        }
    }

    /// Find start of this region in text
    pub fn find_start(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        if start >= text.len() {
            return None;
        }
        self.start.find_at(text, start).map(|m| (m.start(), m.end()))
    }

    /// Find where a region whose opener ends at `start` closes
    ///
    /// Always returns a position: an unclosed region runs to the end of
    /// its line (single-line rules) or to the end of the text.
    pub fn find_close(&self, text: &str, start: usize) -> usize {
        let limit = if self.single_line {
            text[start..].find('\n').map_or(text.len(), |i| start + i)
        } else {
            text.len()
        };

        let Some(end) = &self.end else {
            return limit;
        };

        let search_text = &text[start..limit];
        let mut pos = 0;
        while pos < search_text.len() {
            let Some(m) = end.find_at(search_text, pos) else {
                break;
            };
            if let Some(escape) = self.escape_char {
                // Odd number of escapes = escaped
                let escape_count = search_text[..m.start()]
                    .chars()
                    .rev()
                    .take_while(|&c| c == escape)
                    .count();
                if escape_count % 2 == 1 {
                    pos = m.end().max(m.start() + 1);
                    continue;
                }
            }
            return start + m.end();
        }
        limit
    }
}

/// Whether only blanks precede `pos` on its line
fn starts_line(text: &str, pos: usize) -> bool {
    let prefix = text[..pos].rsplit('\n').next().unwrap_or("");
    prefix.chars().all(|c| c == ' ' || c == '\t')
}
