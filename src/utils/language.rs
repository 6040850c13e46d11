//! Language inference from file paths

/// Infer a language tag from a file's extension
///
/// Unrecognized extensions map to "plaintext"; such files still join the
/// file set and participate in path-based classification.
pub fn infer_language(path: &str) -> &'static str {
    let extension = path.rsplit('.').next().unwrap_or_default();

    match extension {
        "js" | "jsx" | "mjs" | "cjs" => "javascript",
        "ts" | "tsx" => "typescript",
        "py" => "python",
        "rs" => "rust",
        "go" => "go",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "rb" => "ruby",
        "c" | "h" => "c",
        "cpp" | "cc" | "hpp" => "cpp",
        "cs" => "csharp",
        "php" => "php",
        "swift" => "swift",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "md" => "markdown",
        "html" | "htm" => "html",
        "css" => "css",
        _ => "plaintext",
    }
}
