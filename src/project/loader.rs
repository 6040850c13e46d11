//! Loading file sets from disk
//!
//! Walks a project directory once and materializes the ordered file set the
//! analyzers consume. Paths are recorded relative to the project root with
//! forward slashes, so analysis output is stable across platforms.

use super::ProjectFile;
use crate::constants::files::{DEFAULT_LANGUAGE, MAX_FILE_BYTES, SKIPPED_DIRS};
use crate::utils::language;
use anyhow::{Context, Result};
use glob::Pattern;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Load a file set by walking `root` once
///
/// `include` and `exclude` are glob patterns matched against the
/// root-relative path; an empty `include` list admits every file. Files that
/// are oversized, non-UTF-8, or inside a skipped directory (such as
/// `node_modules`) are silently left out. Files are returned in traversal
/// order.
pub fn load_file_set(root: &Path, include: &[String], exclude: &[String]) -> Result<Vec<ProjectFile>> {
    if !root.exists() {
        anyhow::bail!("Project directory does not exist: {}", root.display());
    }

    let include = compile_patterns(include)?;
    let exclude = compile_patterns(exclude)?;

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let rel_path = match entry.path().strip_prefix(root) {
            Ok(rel) => normalize(rel),
            Err(_) => continue,
        };

        if !matches_patterns(&rel_path, &include, true) || matches_patterns(&rel_path, &exclude, false) {
            continue;
        }

        if let Ok(metadata) = entry.metadata()
            && metadata.len() > MAX_FILE_BYTES
        {
            continue;
        }

        // Non-UTF-8 content means a binary file; skip it rather than fail.
        let Ok(content) = fs::read_to_string(entry.path()) else {
            continue;
        };

        let lang = language::infer_language(&rel_path);
        files.push(ProjectFile::new(rel_path, content, lang));
    }

    Ok(files)
}

/// Load a single file from disk as a file set of one
pub fn load_single_file(path: &Path) -> Result<Vec<ProjectFile>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let lang = language::infer_language(&name);
    Ok(vec![ProjectFile::new(name, content, lang)])
}

/// Synthesize a one-file set from a raw code buffer
///
/// Used whenever a request carries code but no file set; mirrors the
/// editor-buffer fallback of the platform API.
pub fn single_file_set(code: &str, language: Option<&str>) -> Vec<ProjectFile> {
    vec![ProjectFile::new(
        "main.js",
        code,
        language.unwrap_or(DEFAULT_LANGUAGE),
    )]
}

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| SKIPPED_DIRS.contains(&name))
            .unwrap_or(false)
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid glob pattern: '{}'", p)))
        .collect()
}

fn matches_patterns(path: &str, patterns: &[Pattern], empty_matches: bool) -> bool {
    if patterns.is_empty() {
        return empty_matches;
    }
    patterns.iter().any(|p| p.matches(path))
}

fn normalize(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_file_set_basic() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("src")).unwrap();
        fs::write(root.join("src/app.ts"), "export const x = 1;").unwrap();
        fs::write(root.join("index.js"), "require('./src/app')").unwrap();

        let files = load_file_set(root, &[], &[]).unwrap();

        assert_eq!(files.len(), 2);
        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert!(paths.contains(&"src/app.ts"));
        assert!(paths.contains(&"index.js"));
    }

    #[test]
    fn test_load_file_set_skips_node_modules() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "x").unwrap();
        fs::write(root.join("app.js"), "x").unwrap();

        let files = load_file_set(root, &[], &[]).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "app.js");
    }

    #[test]
    fn test_load_file_set_include_exclude() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(root.join("app.ts"), "x").unwrap();
        fs::write(root.join("app.test.ts"), "x").unwrap();
        fs::write(root.join("notes.md"), "x").unwrap();

        let files = load_file_set(
            root,
            &["*.ts".to_string()],
            &["*.test.ts".to_string()],
        )
        .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "app.ts");
    }

    #[test]
    fn test_load_file_set_invalid_glob() {
        let temp = TempDir::new().unwrap();
        let result = load_file_set(temp.path(), &["[".to_string()], &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_file_set_missing_root() {
        let result = load_file_set(Path::new("/path/that/does/not/exist/12345"), &[], &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_single_file_set_defaults() {
        let files = single_file_set("const a = 1;", None);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "main.js");
        assert_eq!(files[0].language, "javascript");
    }

    #[test]
    fn test_language_inference() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("lib.rs"), "fn main() {}").unwrap();

        let files = load_file_set(temp.path(), &[], &[]).unwrap();
        assert_eq!(files[0].language, "rust");
    }
}
