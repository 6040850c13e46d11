//! Import extraction and resolution
//!
//! Surface-text scanning, not an AST walk. Exactly two syntactic shapes are
//! recognized: ES-module `import … from '<spec>'` and CommonJS
//! `require('<spec>')`. Anything else (re-exports, template-string dynamic
//! imports, compiled output) is invisible to the extractor. Resolution is a
//! deliberately loose substring match; both behaviors are part of the
//! analysis contract.

use crate::project::ProjectFile;
use regex::Regex;
use std::sync::LazyLock;

static ES_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+.*?\s+from\s+['"]([^'"]+)['"]"#).expect("valid import regex")
});

static CJS_REQUIRE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#).expect("valid require regex")
});

/// Extract every import specifier from a file's text
///
/// All ES-module specifiers in order of occurrence, then all `require`
/// specifiers in order of occurrence. Duplicates are preserved.
pub fn extract_imports(content: &str) -> Vec<String> {
    let mut imports = Vec::new();

    for capture in ES_IMPORT.captures_iter(content) {
        imports.push(capture[1].to_string());
    }
    for capture in CJS_REQUIRE.captures_iter(content) {
        imports.push(capture[1].to_string());
    }

    imports
}

/// Whether a specifier refers to a file within the analyzed set
///
/// Anything not starting with a relative-path marker is an external package.
pub fn is_internal(specifier: &str) -> bool {
    specifier.starts_with('.')
}

/// Resolve a relative specifier against a file set
///
/// Strips one leading `./` and then one leading `../`, and returns the first
/// file whose path contains the remainder as a substring. `None` for
/// external specifiers and for relative specifiers with no match. This is
/// not a module-resolution algorithm: no extension probing, no index-file
/// fallback, first match in file-set order wins.
pub fn resolve_import(specifier: &str, files: &[ProjectFile]) -> Option<String> {
    if !is_internal(specifier) {
        return None;
    }

    let stripped = specifier.strip_prefix("./").unwrap_or(specifier);
    let stripped = stripped.strip_prefix("../").unwrap_or(stripped);

    files
        .iter()
        .find(|f| f.path.contains(stripped))
        .map(|f| f.path.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> ProjectFile {
        ProjectFile::new(path, "", "javascript")
    }

    #[test]
    fn test_extract_es_imports_in_order() {
        let content = "import {a} from './a';\nimport b from \"./b\";\n";
        assert_eq!(extract_imports(content), vec!["./a", "./b"]);
    }

    #[test]
    fn test_extract_requires_after_imports() {
        let content = "const x = require('./x');\nimport {a} from './a';\n";
        // ES-module matches always precede require matches.
        assert_eq!(extract_imports(content), vec!["./a", "./x"]);
    }

    #[test]
    fn test_extract_preserves_duplicates() {
        let content = "import {a} from './a';\nimport {b} from './a';\n";
        assert_eq!(extract_imports(content), vec!["./a", "./a"]);
    }

    #[test]
    fn test_extract_ignores_template_imports() {
        let content = "const m = require(`./dynamic`);\nimport('./lazy');\n";
        assert!(extract_imports(content).is_empty());
    }

    #[test]
    fn test_extract_require_with_spaces() {
        let content = "const m = require ( './spaced' );";
        assert_eq!(extract_imports(content), vec!["./spaced"]);
    }

    #[test]
    fn test_resolve_external_is_none() {
        let files = vec![file("express.js")];
        assert_eq!(resolve_import("express", &files), None);
    }

    #[test]
    fn test_resolve_relative_substring_match() {
        let files = vec![file("src/utils/helpers.ts"), file("src/helpers.ts")];
        // First match in file-set order wins.
        assert_eq!(
            resolve_import("./helpers", &files),
            Some("src/utils/helpers.ts".to_string())
        );
    }

    #[test]
    fn test_resolve_parent_dir_specifier() {
        let files = vec![file("src/config.ts")];
        assert_eq!(
            resolve_import("../config", &files),
            Some("src/config.ts".to_string())
        );
    }

    #[test]
    fn test_resolve_strips_dot_then_dotdot() {
        let files = vec![file("lib/thing.ts")];
        // "./../thing" loses "./" and then "../".
        assert_eq!(
            resolve_import("./../thing", &files),
            Some("lib/thing.ts".to_string())
        );
    }

    #[test]
    fn test_resolve_unmatched_is_none() {
        let files = vec![file("src/app.ts")];
        assert_eq!(resolve_import("./missing", &files), None);
    }
}
