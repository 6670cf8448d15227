//! Built-in language definitions
//!
//! This module provides classifier definitions for the languages
//! model responses most often fence.

mod python;

use super::language::LanguageDefinition;

/// Get all built-in language definitions
pub fn all_languages() -> Vec<LanguageDefinition> {
    vec![python::python_language()]
}
