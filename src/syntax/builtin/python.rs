//! Python language definition

use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::{PatternRule, RegionRule};
use crate::syntax::tokens::TokenType;

/// Create Python language definition
pub fn python_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("python");
    lang.add_alias("py");
    lang.add_alias("python3");
    lang.add_alias("py3");

    // Regions, in tie-break order: triple quotes before single quotes.
    // A triple-quoted string opening its line is a docstring.
    if let Some(rule) = RegionRule::with_escape(
        "triple_double",
        r#"(?:\b[rRbBuUfF]{1,2})?""""#,
        r#"""""#,
        TokenType::String,
        false,
        '\\',
    ) {
        lang.add_region(rule.leading(TokenType::DocString));
    }
    if let Some(rule) = RegionRule::with_escape(
        "triple_single",
        r"(?:\b[rRbBuUfF]{1,2})?'''",
        r"'''",
        TokenType::String,
        false,
        '\\',
    ) {
        lang.add_region(rule.leading(TokenType::DocString));
    }
    if let Some(rule) = RegionRule::with_escape(
        "double_string",
        r#"(?:\b[rRbBuUfF]{1,2})?""#,
        r#"""#,
        TokenType::String,
        true,
        '\\',
    ) {
        lang.add_region(rule);
    }
    if let Some(rule) = RegionRule::with_escape(
        "single_string",
        r"(?:\b[rRbBuUfF]{1,2})?'",
        r"'",
        TokenType::String,
        true,
        '\\',
    ) {
        lang.add_region(rule);
    }
    if let Some(rule) = RegionRule::new("comment", "#", None, TokenType::Comment, true) {
        lang.add_region(rule);
    }

    // Word-level patterns

    // Keywords
    let constants = r"\b(?:True|False|None)\b";
    if let Some(rule) = PatternRule::new("keyword_constant", constants, TokenType::KeywordConstant) {
        lang.add_pattern(rule);
    }
    let keywords = r"\b(?:and|as|assert|async|await|break|class|continue|def|del|elif|else|except|finally|for|global|if|in|is|lambda|nonlocal|not|or|pass|raise|return|try|while|with|yield|self|cls)\b";
    if let Some(rule) = PatternRule::new("keyword", keywords, TokenType::Keyword) {
        lang.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::new(
        "keyword_namespace",
        r"\b(?:import|from)\b",
        TokenType::KeywordNamespace,
    ) {
        lang.add_pattern(rule);
    }

    // Built-in functions, only when called and not as a method
    let builtins = r"\b(abs|all|any|ascii|bin|bool|bytearray|bytes|callable|chr|classmethod|compile|complex|delattr|dict|dir|divmod|enumerate|eval|exec|filter|float|format|frozenset|getattr|globals|hasattr|hash|help|hex|id|input|int|isinstance|issubclass|iter|len|list|locals|map|max|memoryview|min|next|object|oct|open|ord|pow|print|property|range|repr|reversed|round|set|setattr|slice|sorted|staticmethod|str|sum|super|tuple|type|vars|zip)\(";
    if let Some(rule) = PatternRule::with_group("builtin", builtins, TokenType::Builtin, 1) {
        lang.add_pattern(rule.not_preceded_by('.'));
    }

    // Decorators
    if let Some(rule) = PatternRule::with_group(
        "decorator",
        r"(?m)^[ \t]*(@[A-Za-z_][\w.]*)",
        TokenType::Decorator,
        1,
    ) {
        lang.add_pattern(rule);
    }

    // Numbers: hex, binary, octal, then decimal with optional fraction/exponent
    let numbers = r"\b(?:0[xX][0-9a-fA-F_]+|0[bB][01_]+|0[oO][0-7_]+|\d[\d_]*(?:\.\d[\d_]*)?(?:[eE][+-]?\d+)?[jJ]?)\b";
    if let Some(rule) = PatternRule::new("number", numbers, TokenType::Number) {
        lang.add_pattern(rule);
    }

    // Definitions
    if let Some(rule) = PatternRule::with_group(
        "function_name",
        r"\bdef\s+([A-Za-z_]\w*)",
        TokenType::FunctionName,
        1,
    ) {
        lang.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::with_group(
        "class_name",
        r"\bclass\s+([A-Za-z_]\w*)",
        TokenType::ClassName,
        1,
    ) {
        lang.add_pattern(rule);
    }

    // Operators
    if let Some(rule) = PatternRule::new("operator", r"[-+*/%&|^~<>=!@]+", TokenType::Operator) {
        lang.add_pattern(rule);
    }

    lang
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::registry::Classifier;
    use crate::syntax::tokens::Token;

    fn classify(code: &str) -> Vec<(&str, TokenType)> {
        python_language()
            .classify(code)
            .into_iter()
            .map(|t| (&code[t.start..t.end], t.token_type))
            .filter(|(_, kind)| *kind != TokenType::PlainCode)
            .collect()
    }

    #[test]
    fn test_all_rules_compile() {
        let lang = python_language();
        assert_eq!(lang.regions.len(), 5);
        assert_eq!(lang.patterns.len(), 9);
    }

    #[test]
    fn test_function_definition() {
        let found = classify("def greet(name):\n    return name");
        assert_eq!(
            found,
            vec![
                ("def", TokenType::Keyword),
                ("greet", TokenType::FunctionName),
                ("return", TokenType::Keyword),
            ]
        );
    }

    #[test]
    fn test_comment_wins_over_contents() {
        let found = classify("x = 1  # print(\"no\") if 2");
        assert_eq!(
            found,
            vec![
                ("=", TokenType::Operator),
                ("1", TokenType::Number),
                ("# print(\"no\") if 2", TokenType::Comment),
            ]
        );
    }

    #[test]
    fn test_strings() {
        let found = classify(r#"s = 'it\'s' + f"{x}" + "a#b""#);
        let strings: Vec<_> = found
            .iter()
            .filter(|(_, kind)| *kind == TokenType::String)
            .map(|(text, _)| *text)
            .collect();
        assert_eq!(strings, vec![r"'it\'s'", r#"f"{x}""#, r#""a#b""#]);
        assert!(!found.iter().any(|(_, kind)| *kind == TokenType::Comment));
    }

    #[test]
    fn test_triple_quoted_spans_lines() {
        let code = "doc = \"\"\"first\nif second\"\"\"\nif x:";
        let found = classify(code);
        assert!(found.contains(&("\"\"\"first\nif second\"\"\"", TokenType::String)));
        // Only the `if` after the string is a keyword
        let keywords: Vec<_> = found.iter().filter(|(_, k)| *k == TokenType::Keyword).collect();
        assert_eq!(keywords.len(), 1);
    }

    #[test]
    fn test_builtin_requires_call() {
        let found = classify("print(len(items))\nlen = 3");
        assert_eq!(found[0], ("print", TokenType::Builtin));
        assert_eq!(found[1], ("len", TokenType::Builtin));
        assert!(!found.contains(&("len", TokenType::Keyword)));
        // The bare `len` on the second line is plain
        assert_eq!(found.iter().filter(|(_, k)| *k == TokenType::Builtin).count(), 2);
    }

    #[test]
    fn test_numbers() {
        let found = classify("a = [0x1F, 3.14, 2e10, 7, 1j, x2]");
        let numbers: Vec<_> = found
            .iter()
            .filter(|(_, kind)| *kind == TokenType::Number)
            .map(|(text, _)| *text)
            .collect();
        assert_eq!(numbers, vec!["0x1F", "3.14", "2e10", "7", "1j"]);
    }

    #[test]
    fn test_keywords_and_constants() {
        let found = classify("if self.ready is None:\n    pass");
        assert_eq!(found[0], ("if", TokenType::Keyword));
        assert_eq!(found[1], ("self", TokenType::Keyword));
        assert!(found.contains(&("None", TokenType::KeywordConstant)));
        assert!(found.contains(&("pass", TokenType::Keyword)));
        assert!(!found.iter().any(|(text, _)| *text == "ready"));
    }

    #[test]
    fn test_class_and_decorator() {
        let found = classify("@dataclass\nclass Point:\n    x: int = 0");
        assert_eq!(found[0], ("@dataclass", TokenType::Decorator));
        assert_eq!(found[1], ("class", TokenType::Keyword));
        assert_eq!(found[2], ("Point", TokenType::ClassName));
    }

    #[test]
    fn test_deterministic() {
        let code = "for i in range(10):\n    print(i ** 2)  # square";
        let lang = python_language();
        assert_eq!(lang.classify(code), lang.classify(code));
    }

    #[test]
    fn test_method_call_is_not_builtin() {
        let code = "total = df.sum()\nq = Item.objects.filter(x=1)\ns = \"{}\".format(v)\nn = sum(a)";
        let builtins: Vec<_> = classify(code)
            .into_iter()
            .filter(|(_, kind)| *kind == TokenType::Builtin)
            .map(|(text, _)| text)
            .collect();
        assert_eq!(builtins, vec!["sum"]);

        let start = code.rfind("sum").unwrap();
        let tokens = python_language().classify(code);
        assert!(tokens.contains(&Token::new(start, start + 3, TokenType::Builtin)));
    }

    #[test]
    fn test_import_is_namespace_keyword() {
        let found = classify("from os import path\nimport sys as system");
        assert_eq!(
            found,
            vec![
                ("from", TokenType::KeywordNamespace),
                ("import", TokenType::KeywordNamespace),
                ("import", TokenType::KeywordNamespace),
                ("as", TokenType::Keyword),
            ]
        );
    }

    #[test]
    fn test_docstring() {
        let code = "def f():\n    \"\"\"Doc.\"\"\"\n    x = '''text'''";
        let found = classify(code);
        assert!(found.contains(&("\"\"\"Doc.\"\"\"", TokenType::DocString)));
        assert!(found.contains(&("'''text'''", TokenType::String)));
        assert!(!found.contains(&("'''text'''", TokenType::DocString)));
    }
}
