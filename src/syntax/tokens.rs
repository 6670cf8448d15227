//! Token types for code classification
//!
//! This module defines the lexical categories the classifier assigns
//! inside fenced code blocks, their claim priority and the theme colour
//! key each one is painted with.

/// Lexical categories recognized inside code blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenType {
    /// Comments (`# ...` to end of line)
    Comment,
    /// String literals, including triple-quoted and prefixed forms
    String,
    /// Triple-quoted string opening its line
    DocString,
    /// Reserved words (plus `self` and `cls`)
    Keyword,
    /// `True`, `False`, `None`
    KeywordConstant,
    /// `import`, `from`
    KeywordNamespace,
    /// Built-in functions, only when called
    Builtin,
    /// Decorators (`@name`)
    Decorator,
    /// Numeric literals
    Number,
    /// Name following `def`
    FunctionName,
    /// Name following `class`
    ClassName,
    /// Operators (`+`, `==`, `**`, ...)
    Operator,
    /// Everything else; inherits the code block's base style
    PlainCode,
}

impl TokenType {
    /// Claim priority (higher wins when two rules match the same text)
    pub fn priority(&self) -> i32 {
        match self {
            TokenType::Comment => 100,
            TokenType::String | TokenType::DocString => 90,
            TokenType::KeywordNamespace => 85,
            TokenType::Keyword | TokenType::KeywordConstant | TokenType::Builtin => 80,
            TokenType::Decorator => 70,
            TokenType::Number => 60,
            TokenType::FunctionName | TokenType::ClassName => 50,
            TokenType::Operator => 40,
            TokenType::PlainCode => 0,
        }
    }

    /// Theme colour key used to paint this token
    pub fn color_key(&self) -> &'static str {
        match self {
            TokenType::Comment => "comment",
            TokenType::String => "string",
            TokenType::DocString => "docstring",
            TokenType::Keyword => "keyword",
            TokenType::KeywordConstant => "keyword_constant",
            TokenType::KeywordNamespace => "keyword_namespace",
            TokenType::Builtin => "builtin",
            TokenType::Decorator => "decorator",
            TokenType::Number => "number",
            TokenType::FunctionName => "function_name",
            TokenType::ClassName => "class_name",
            TokenType::Operator => "operator",
            TokenType::PlainCode => "code_block_fg",
        }
    }

    /// Get a machine-friendly name for this token type
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Comment => "comment",
            TokenType::String => "string",
            TokenType::DocString => "docstring",
            TokenType::Keyword => "keyword",
            TokenType::KeywordConstant => "keyword_constant",
            TokenType::KeywordNamespace => "keyword_namespace",
            TokenType::Builtin => "builtin",
            TokenType::Decorator => "decorator",
            TokenType::Number => "number",
            TokenType::FunctionName => "function_name",
            TokenType::ClassName => "class_name",
            TokenType::Operator => "operator",
            TokenType::PlainCode => "plain_code",
        }
    }

    /// Parse a token type from its name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "comment" => Some(TokenType::Comment),
            "string" => Some(TokenType::String),
            "docstring" => Some(TokenType::DocString),
            "keyword" => Some(TokenType::Keyword),
            "keyword_constant" => Some(TokenType::KeywordConstant),
            "keyword_namespace" => Some(TokenType::KeywordNamespace),
            "builtin" => Some(TokenType::Builtin),
            "decorator" => Some(TokenType::Decorator),
            "number" => Some(TokenType::Number),
            "function_name" => Some(TokenType::FunctionName),
            "class_name" => Some(TokenType::ClassName),
            "operator" => Some(TokenType::Operator),
            "plain_code" => Some(TokenType::PlainCode),
            _ => None,
        }
    }
}

/// A classified range of code, relative to the classified text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Byte offset where this token starts (inclusive)
    pub start: usize,
    /// Byte offset where this token ends (exclusive)
    pub end: usize,
    /// Category of the token
    pub token_type: TokenType,
}

impl Token {
    pub fn new(start: usize, end: usize, token_type: TokenType) -> Self {
        Self { start, end, token_type }
    }

    /// Get the length of this token in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if token is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
