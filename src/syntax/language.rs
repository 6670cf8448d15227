//! Language definitions for code classification
//!
//! This module provides the LanguageDefinition struct that combines
//! region rules and pattern rules for a programming language.

use super::registry::Classifier;
use super::rules::{PatternRule, RegionRule};
use super::tokens::{Token, TokenType};

/// A complete regex-driven language definition
pub struct LanguageDefinition {
    /// Language name (e.g., "python")
    pub name: String,
    /// Other fence tags that select this language (e.g., ["py"])
    pub aliases: Vec<String>,
    /// Word-level pattern rules, sorted by priority (highest first)
    pub patterns: Vec<PatternRule>,
    /// Region rules, in tie-break order (first wins on equal start)
    pub regions: Vec<RegionRule>,
}

impl LanguageDefinition {
    /// Create a new empty language definition
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            patterns: Vec::new(),
            regions: Vec::new(),
        }
    }

    /// Add a fence tag alias
    pub fn add_alias(&mut self, alias: &str) {
        self.aliases.push(alias.to_string());
    }

    /// Add a pattern rule
    pub fn add_pattern(&mut self, rule: PatternRule) {
        self.patterns.push(rule);
        // Keep sorted by priority (highest first); stable for equal priority
        self.patterns.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Add a region rule
    pub fn add_region(&mut self, rule: RegionRule) {
        self.regions.push(rule);
    }

    /// Claim comment and string regions, scanning left to right
    fn scan_regions(&self, code: &str, claimed: &mut [bool], tokens: &mut Vec<Token>) {
        // Next known opener per rule, recomputed once the cursor passes it
        let mut next: Vec<Option<(usize, usize)>> =
            self.regions.iter().map(|rule| rule.find_start(code, 0)).collect();
        let mut pos = 0;

        while pos < code.len() {
            let mut best: Option<(usize, usize, usize)> = None;
            for (idx, rule) in self.regions.iter().enumerate() {
                if let Some((start, _)) = next[idx] {
                    if start < pos {
                        next[idx] = rule.find_start(code, pos);
                    }
                }
                if let Some((start, end)) = next[idx] {
                    if best.map_or(true, |(best_start, _, _)| start < best_start) {
                        best = Some((start, end, idx));
                    }
                }
            }

            let Some((start, open_end, idx)) = best else {
                break;
            };
            let rule = &self.regions[idx];
            let close = rule.find_close(code, open_end);
            if close > start {
                claimed[start..close].iter_mut().for_each(|c| *c = true);
                tokens.push(Token::new(start, close, rule.token_type_at(code, start)));
            }
            pos = close.max(start + 1);
        }
    }

    /// Claim word-level tokens in priority order over unclaimed text
    fn scan_patterns(&self, code: &str, claimed: &mut [bool], tokens: &mut Vec<Token>) {
        for rule in &self.patterns {
            for (start, end) in rule.find_all(code) {
                if claimed[start..end].iter().any(|&c| c) {
                    continue;
                }
                claimed[start..end].iter_mut().for_each(|c| *c = true);
                tokens.push(Token::new(start, end, rule.token_type));
            }
        }
    }
}

impl Classifier for LanguageDefinition {
    fn name(&self) -> &str {
        &self.name
    }

    fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Classify code into tokens covering the whole text
    ///
    /// Anything no rule claims becomes `PlainCode`.
    fn classify(&self, code: &str) -> Vec<Token> {
        let mut claimed = vec![false; code.len()];
        let mut tokens = Vec::new();

        self.scan_regions(code, &mut claimed, &mut tokens);
        self.scan_patterns(code, &mut claimed, &mut tokens);
        tokens.sort_by_key(|t| t.start);

        fill_plain(code, tokens)
    }
}

/// Fill the gaps between sorted, disjoint tokens with `PlainCode`
fn fill_plain(code: &str, tokens: Vec<Token>) -> Vec<Token> {
    let mut filled = Vec::with_capacity(tokens.len() * 2 + 1);
    let mut pos = 0;
    for token in tokens {
        if token.start > pos {
            filled.push(Token::new(pos, token.start, TokenType::PlainCode));
        }
        pos = token.end;
        filled.push(token);
    }
    if pos < code.len() {
        filled.push(Token::new(pos, code.len(), TokenType::PlainCode));
    }
    filled
}
