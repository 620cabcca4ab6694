/*!
 * Markdown rendering and output writing
 */

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{PackError, Result};
use crate::types::{PackedDocument, PackedEntry};

/// Preamble written at the top of every document
pub const DOCUMENT_HEADER: &str = "# Codebase Context\n\
I am providing my codebase context below in this flattened markdown file.\n\
\n\
## Project Structure\n\
(See file paths below)\n\
\n\
---\n";

/// Renders a packed document as Markdown and writes it to disk
pub struct MarkdownWriter {
    output_path: PathBuf,
}

impl MarkdownWriter {
    /// Create a writer targeting the given output path
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    /// Render the document to a Markdown string
    ///
    /// Each entry becomes a path header followed by the content in a
    /// backtick fence, in the document's sorted order.
    pub fn render(&self, document: &PackedDocument) -> String {
        let mut out = String::from(DOCUMENT_HEADER);
        for entry in &document.entries {
            render_entry(&mut out, entry);
        }
        out
    }

    /// Write the rendered document atomically
    ///
    /// The content goes to a temp file in the output directory and is
    /// renamed over the target, so a failed run never leaves a
    /// truncated document behind.
    pub fn write(&self, document: &PackedDocument) -> Result<()> {
        let rendered = self.render(document);
        let dir = self
            .output_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let result = (|| -> std::io::Result<()> {
            let mut tmp = NamedTempFile::new_in(dir)?;
            tmp.write_all(rendered.as_bytes())?;
            tmp.persist(&self.output_path).map_err(|e| e.error)?;
            Ok(())
        })();

        result.map_err(|source| PackError::OutputWrite {
            path: self.output_path.clone(),
            source,
        })
    }
}

/// Append one entry: path header, optional lossy note, fenced content
fn render_entry(out: &mut String, entry: &PackedEntry) {
    out.push('\n');
    out.push_str("## File: `");
    out.push_str(&entry.rel_path);
    out.push_str("`\n");

    if entry.lossy {
        out.push_str("\n_Note: this file contained invalid UTF-8; undecodable bytes were replaced._\n");
    }

    let fence = fence_for(&entry.content);
    out.push('\n');
    out.push_str(&fence);
    out.push('\n');
    out.push_str(&entry.content);
    if !entry.content.is_empty() && !entry.content.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&fence);
    out.push('\n');
}

/// Pick a backtick fence longer than any run inside the content, so
/// embedded Markdown cannot terminate the block early
fn fence_for(content: &str) -> String {
    let mut longest = 0;
    let mut current = 0;
    for ch in content.chars() {
        if ch == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, content: &str) -> PackedEntry {
        PackedEntry {
            rel_path: path.to_string(),
            content: content.to_string(),
            lossy: false,
        }
    }

    #[test]
    fn test_render_empty_document() {
        let writer = MarkdownWriter::new("out.md");
        let rendered = writer.render(&PackedDocument::default());
        assert_eq!(rendered, DOCUMENT_HEADER);
    }

    #[test]
    fn test_render_entry_layout() {
        let writer = MarkdownWriter::new("out.md");
        let document = PackedDocument {
            entries: vec![entry("a.py", "x\n")],
        };
        let rendered = writer.render(&document);
        assert!(rendered.contains("## File: `a.py`\n"));
        assert!(rendered.contains("```\nx\n```\n"));
    }

    #[test]
    fn test_fence_extends_past_embedded_backticks() {
        let writer = MarkdownWriter::new("out.md");
        let document = PackedDocument {
            entries: vec![entry("doc.md", "```rust\nlet x = 1;\n```\n")],
        };
        let rendered = writer.render(&document);
        assert!(rendered.contains("````\n```rust"));
        assert!(rendered.trim_end().ends_with("````"));
    }

    #[test]
    fn test_fence_minimum_three_backticks() {
        assert_eq!(fence_for("plain text"), "```");
        assert_eq!(fence_for("a `code` span"), "```");
        assert_eq!(fence_for("````four"), "`````");
    }

    #[test]
    fn test_content_without_trailing_newline_gets_one() {
        let writer = MarkdownWriter::new("out.md");
        let document = PackedDocument {
            entries: vec![entry("a.py", "x")],
        };
        let rendered = writer.render(&document);
        assert!(rendered.contains("```\nx\n```\n"));
    }

    #[test]
    fn test_lossy_note_rendered() {
        let writer = MarkdownWriter::new("out.md");
        let document = PackedDocument {
            entries: vec![PackedEntry {
                rel_path: "bad.py".to_string(),
                content: "f\u{FFFD}o\n".to_string(),
                lossy: true,
            }],
        };
        let rendered = writer.render(&document);
        assert!(rendered.contains("contained invalid UTF-8"));
    }

    #[test]
    fn test_write_creates_file() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.md");
        let writer = MarkdownWriter::new(&path);
        let document = PackedDocument {
            entries: vec![entry("a.py", "x\n")],
        };
        writer.write(&document).expect("write failed");
        let on_disk = std::fs::read_to_string(&path)?;
        assert_eq!(on_disk, writer.render(&document));
        Ok(())
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let writer = MarkdownWriter::new("/nonexistent-dir-xyz/out.md");
        let err = writer.write(&PackedDocument::default()).unwrap_err();
        assert!(matches!(err, PackError::OutputWrite { .. }));
    }
}
