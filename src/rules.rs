/*!
 * Scan rules: extension allowlist, ignored names, and ignore-file
 * pattern matching
 */

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use glob_match::glob_match;

use crate::utils::{DEFAULT_EXTENSIONS, DEFAULT_IGNORED_NAMES};

/// Inclusion/exclusion configuration for a single packing run
///
/// Built once before the scan and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ScanRule {
    /// Extensions to include, lowercase with leading dot (".py", ".rs")
    pub included_extensions: HashSet<String>,
    /// Base names (directories or files) excluded outright; entries
    /// containing `*` are wildcards matched against the base name only
    pub ignored_names: HashSet<String>,
    /// Glob patterns from an ignore file, matched against the
    /// root-relative path
    pub ignore_patterns: Vec<String>,
}

impl Default for ScanRule {
    fn default() -> Self {
        Self {
            included_extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            ignored_names: DEFAULT_IGNORED_NAMES.iter().map(|s| s.to_string()).collect(),
            ignore_patterns: Vec::new(),
        }
    }
}

impl ScanRule {
    /// Check whether a base name is excluded by the ignored-name set
    pub fn name_ignored(&self, name: &str) -> bool {
        if self.ignored_names.contains(name) {
            return true;
        }
        self.ignored_names
            .iter()
            .filter(|p| p.contains('*'))
            .any(|p| glob_match(p, name))
    }

    /// Check whether a file's extension is on the allowlist
    /// (case-insensitive)
    pub fn extension_included(&self, path: &Path) -> bool {
        match path.extension() {
            Some(ext) => {
                let dotted = format!(".{}", ext.to_string_lossy().to_lowercase());
                self.included_extensions.contains(&dotted)
            }
            None => false,
        }
    }

    /// Check whether any ignore-file pattern excludes a relative path
    pub fn pattern_excluded(&self, rel_path: &str) -> bool {
        self.ignore_patterns
            .iter()
            .any(|p| pattern_matches(p, rel_path))
    }
}

/// Match a single ignore pattern against a `/`-separated relative path
///
/// Semantics follow version-control ignore files: `*` matches within a
/// path segment, `**` across segments, and a trailing `/` anchors the
/// pattern to a directory, excluding everything beneath it. A pattern
/// without a slash also matches the bare base name anywhere in the
/// tree.
pub fn pattern_matches(pattern: &str, rel_path: &str) -> bool {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return false;
    }

    // Trailing slash: the pattern names a directory
    if let Some(dir_pattern) = pattern.strip_suffix('/') {
        if glob_match(dir_pattern, rel_path) || glob_match(&format!("{dir_pattern}/**"), rel_path) {
            return true;
        }
        if !dir_pattern.contains('/') {
            let mut segments: Vec<&str> = rel_path.split('/').collect();
            segments.pop(); // last segment is the file itself
            return segments.iter().any(|s| glob_match(dir_pattern, s));
        }
        return false;
    }

    if glob_match(pattern, rel_path) {
        return true;
    }

    // Slash-less patterns also match the base name
    if !pattern.contains('/') {
        if let Some(name) = rel_path.rsplit('/').next() {
            return glob_match(pattern, name);
        }
    }

    false
}

/// Load ignore patterns from a file, one glob per line
///
/// `#`-prefixed comments and blank lines are skipped. Pattern order is
/// preserved.
pub fn load_ignore_patterns(path: &Path) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let mut patterns = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        patterns.push(trimmed.to_string());
    }
    Ok(patterns)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_pattern_single_segment_star() {
        assert!(pattern_matches("temp/*", "temp/d.py"));
        // `*` does not cross segment boundaries
        assert!(!pattern_matches("temp/*", "temp/sub/d.py"));
        // patterns with a slash are anchored to the root
        assert!(!pattern_matches("temp/*", "a/temp/d.py"));
    }

    #[test]
    fn test_pattern_globstar() {
        assert!(pattern_matches("build/**", "build/out.py"));
        assert!(pattern_matches("build/**", "build/a/b/out.py"));
        assert!(!pattern_matches("build/**", "rebuild/out.py"));
    }

    #[test]
    fn test_pattern_basename_fallback() {
        assert!(pattern_matches("*.log", "a/b/x.log"));
        assert!(pattern_matches("secret.txt", "deep/secret.txt"));
        assert!(!pattern_matches("*.log", "a/b/x.logs"));
    }

    #[test]
    fn test_pattern_directory_anchor() {
        assert!(pattern_matches("logs/", "logs/x.txt"));
        assert!(pattern_matches("logs/", "a/logs/x.txt"));
        assert!(!pattern_matches("logs/", "logs.txt"));
    }

    #[test]
    fn test_pattern_blank_never_matches() {
        assert!(!pattern_matches("", "a.py"));
        assert!(!pattern_matches("   ", "a.py"));
    }

    #[test]
    fn test_extension_case_insensitive() {
        let rules = ScanRule::default();
        assert!(rules.extension_included(Path::new("a.py")));
        assert!(rules.extension_included(Path::new("A.PY")));
        assert!(!rules.extension_included(Path::new("a.rst")));
        // dotfiles have no extension
        assert!(!rules.extension_included(Path::new(".env")));
        assert!(rules.extension_included(Path::new("local.env")));
        assert!(!rules.extension_included(Path::new("Makefile")));
    }

    #[test]
    fn test_name_ignored() {
        let rules = ScanRule::default();
        assert!(rules.name_ignored("node_modules"));
        assert!(rules.name_ignored(".git"));
        assert!(rules.name_ignored("debug.log"));
        assert!(!rules.name_ignored("src"));
    }

    #[test]
    fn test_load_ignore_patterns() -> io::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "# a comment")?;
        writeln!(file)?;
        writeln!(file, "temp/*")?;
        writeln!(file, "  build/**  ")?;
        writeln!(file, "   ")?;

        let patterns = load_ignore_patterns(file.path())?;
        assert_eq!(patterns, vec!["temp/*", "build/**"]);
        Ok(())
    }
}
