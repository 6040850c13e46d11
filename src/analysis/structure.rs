//! Code-structure parsing
//!
//! Lightweight regex extraction of declarations and test cases, shared by
//! the tester and documenter agents. Like the import extractor, this scans
//! surface text and only sees the literal shapes below.

use regex::Regex;
use std::sync::LazyLock;

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:function|const|let|var)\s+(\w+)").expect("valid declaration regex")
});

static TEST_CASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:test|it)\(['"](.+?)['"]"#).expect("valid test-case regex")
});

/// Extract declared identifiers in order of occurrence
pub fn extract_functions(content: &str) -> Vec<String> {
    DECLARATION
        .captures_iter(content)
        .map(|c| c[1].to_string())
        .collect()
}

/// Extract test case names from a Jest-style suite
pub fn extract_test_names(content: &str) -> Vec<String> {
    TEST_CASE
        .captures_iter(content)
        .map(|c| c[1].to_string())
        .collect()
}

/// Count test cases in a Jest-style suite
pub fn count_tests(content: &str) -> usize {
    content.matches("it(").count() + content.matches("test(").count()
}

/// Remove Markdown code fences from generated code
///
/// Models routinely wrap generated code in ```lang fences despite being
/// asked not to; this strips the fence lines and trims the result.
pub fn strip_code_fences(text: &str) -> String {
    static FENCE_OPEN: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"```\w*\n").expect("valid fence regex"));

    let without_open = FENCE_OPEN.replace_all(text, "");
    without_open.replace("```", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_functions_all_forms() {
        let code = "function alpha() {}\nconst beta = 1;\nlet gamma = 2;\nvar delta = 3;";
        assert_eq!(extract_functions(code), vec!["alpha", "beta", "gamma", "delta"]);
    }

    #[test]
    fn test_extract_functions_empty() {
        assert!(extract_functions("x + y").is_empty());
    }

    #[test]
    fn test_extract_test_names_both_styles() {
        let suite = "it('adds numbers', () => {});\ntest(\"handles zero\", () => {});";
        assert_eq!(
            extract_test_names(suite),
            vec!["adds numbers", "handles zero"]
        );
    }

    #[test]
    fn test_count_tests() {
        let suite = "it('a', f); it('b', f); test('c', f);";
        assert_eq!(count_tests(suite), 3);
    }

    #[test]
    fn test_strip_code_fences() {
        let wrapped = "```javascript\nconst a = 1;\n```";
        assert_eq!(strip_code_fences(wrapped), "const a = 1;");
    }

    #[test]
    fn test_strip_code_fences_plain_text_untouched() {
        assert_eq!(strip_code_fences("const a = 1;"), "const a = 1;");
    }
}
