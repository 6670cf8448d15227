//! Classifier registry
//!
//! This module provides the ClassifierRegistry that maps fence language
//! tags to classifiers. New languages are added by registering another
//! [`Classifier`], never by branching in the pipeline.

use std::collections::HashMap;

use tracing::debug;

use super::builtin;
use super::tokens::Token;

/// Something that can split code into classified tokens
pub trait Classifier {
    /// Canonical language id (e.g., "python")
    fn name(&self) -> &str;

    /// Additional fence tags that select this classifier
    fn aliases(&self) -> &[String] {
        &[]
    }

    /// Classify code; offsets are relative to `code`
    fn classify(&self, code: &str) -> Vec<Token>;
}

/// Registry of classifiers keyed by lowercase language tag
pub struct ClassifierRegistry {
    /// Loaded classifiers, by canonical name
    classifiers: HashMap<String, Box<dyn Classifier>>,
    /// Tag (name or alias) to canonical name mapping
    tag_map: HashMap<String, String>,
}

impl ClassifierRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            classifiers: HashMap::new(),
            tag_map: HashMap::new(),
        }
    }

    /// Create a registry with the built-in languages
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for lang in builtin::all_languages() {
            registry.register(Box::new(lang));
        }
        registry
    }

    /// Add a classifier, replacing any previous one with the same tags
    pub fn register(&mut self, classifier: Box<dyn Classifier>) {
        let name = classifier.name().to_lowercase();
        self.tag_map.insert(name.clone(), name.clone());
        for alias in classifier.aliases() {
            self.tag_map.insert(alias.to_lowercase(), name.clone());
        }
        self.classifiers.insert(name, classifier);
    }

    /// Find the classifier for a fence tag (case-insensitive)
    pub fn lookup(&self, tag: &str) -> Option<&dyn Classifier> {
        let name = self.tag_map.get(&tag.trim().to_lowercase())?;
        self.classifiers.get(name).map(|c| c.as_ref())
    }

    /// Check whether a fence tag has a classifier
    pub fn supports(&self, tag: &str) -> bool {
        self.lookup(tag).is_some()
    }

    /// Classify code for a language tag
    ///
    /// Unsupported languages yield no tokens, so the block keeps its
    /// plain code style.
    pub fn classify(&self, code: &str, tag: &str) -> Vec<Token> {
        match self.lookup(tag) {
            Some(classifier) => classifier.classify(code),
            None => {
                debug!("No classifier for language '{}', leaving block plain", tag);
                Vec::new()
            }
        }
    }

    /// List available languages
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.classifiers.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}

impl Default for ClassifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokens::TokenType;

    struct WholeText;

    impl Classifier for WholeText {
        fn name(&self) -> &str {
            "Shout"
        }

        fn classify(&self, code: &str) -> Vec<Token> {
            vec![Token::new(0, code.len(), TokenType::String)]
        }
    }

    #[test]
    fn test_lookup_builtin() {
        let registry = ClassifierRegistry::new();

        assert!(registry.supports("python"));
        assert!(registry.supports("Python"));
        assert!(registry.supports("PY"));
        assert!(registry.supports("python3"));
        assert!(!registry.supports("rust"));
        assert!(!registry.supports(""));
    }

    #[test]
    fn test_unsupported_language_is_empty() {
        let registry = ClassifierRegistry::new();
        assert!(registry.classify("fn main() {}", "rust").is_empty());
    }

    #[test]
    fn test_register_custom() {
        let mut registry = ClassifierRegistry::new();
        registry.register(Box::new(WholeText));

        assert_eq!(registry.list_languages(), vec!["python", "shout"]);
        let tokens = registry.classify("hey", "SHOUT");
        assert_eq!(tokens, vec![Token::new(0, 3, TokenType::String)]);
    }
}
