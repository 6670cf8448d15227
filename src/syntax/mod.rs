//! Code classification module
//!
//! This module splits the contents of fenced code blocks into lexical
//! tokens (keywords, strings, comments, ...) using regex-driven language
//! definitions looked up through a registry.

mod tokens;
mod rules;
mod language;
mod registry;
mod builtin;

pub use tokens::{Token, TokenType};
pub use rules::{PatternRule, RegionRule};
pub use language::LanguageDefinition;
pub use registry::{Classifier, ClassifierRegistry};
