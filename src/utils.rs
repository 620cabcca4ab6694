/*!
 * Utility functions and built-in defaults for ctxpack
 */

use once_cell::sync::Lazy;

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Extensions packed by default, lowercase with leading dot
pub static DEFAULT_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        ".py", ".js", ".ts", ".tsx", ".html", ".css", ".json", ".md", ".sql", ".go", ".rs",
        ".java", ".cpp", ".c", ".h", ".hpp", ".ino", ".txt", ".yaml", ".yml", ".toml", ".xml",
        ".sh", ".bat", ".env",
    ]
});

/// Base names ignored by default
///
/// Matched against the base name of every entry: a matching directory
/// is pruned without being opened, a matching file is skipped. Entries
/// containing `*` are simple wildcards over the base name.
pub static DEFAULT_IGNORED_NAMES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version control & editors
        ".git",
        ".idea",
        ".vscode",
        ".gemini",
        // Dependencies & environments
        "node_modules",
        "venv",
        ".venv",
        "__pycache__",
        "pycache",
        // Build output
        "dist",
        "build",
        "target",
        ".next",
        ".nuxt",
        "coverage",
        "test-results",
        "playwright-report",
        // Lockfiles
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "bun.lockb",
        // Static assets
        "images",
        "assets",
        "public",
        // Noise
        "logs.txt",
        "*.log",
        "*.audit.json",
    ]
});
