/*!
 * Core types and data structures for the ctxpack application
 */

use std::collections::HashMap;
use std::fmt;

/// A single packed file: relative path plus decoded content
#[derive(Debug, Clone)]
pub struct PackedEntry {
    /// Path relative to the scan root, `/`-separated
    pub rel_path: String,
    /// Decoded file content
    pub content: String,
    /// True if the raw bytes were not valid UTF-8 and were decoded
    /// with replacement characters
    pub lossy: bool,
}

/// The ordered collection of packed entries
///
/// Entries are sorted by relative path in lexicographic byte order,
/// independent of filesystem traversal order, so two runs over an
/// unchanged tree render byte-identical documents.
#[derive(Debug, Clone, Default)]
pub struct PackedDocument {
    /// Packed entries in sorted order
    pub entries: Vec<PackedEntry>,
}

impl PackedDocument {
    /// Whether the document contains no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of packed entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Why a file was left out of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Extension not on the allowlist
    Extension,
    /// Base name on the ignored-name list
    IgnoredName,
    /// Matched an ignore-file pattern
    Pattern,
    /// Larger than the per-file size cap
    Oversize,
    /// Could not be opened or read
    Unreadable,
    /// Walker error, including symlink cycles
    Traversal,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Extension => "extension not included",
            Self::IgnoredName => "ignored name",
            Self::Pattern => "ignore pattern",
            Self::Oversize => "oversized",
            Self::Unreadable => "unreadable",
            Self::Traversal => "traversal error",
        };
        f.write_str(s)
    }
}

/// Per-file detail used by the report
#[derive(Debug, Clone, Default)]
pub struct FileDetail {
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
}

/// Statistics accumulated over a packing run
#[derive(Debug, Clone, Default)]
pub struct PackStats {
    /// Number of files included in the document
    pub files_packed: usize,
    /// Skip counts broken out by reason
    pub skipped: HashMap<SkipReason, usize>,
    /// Total content bytes across packed files
    pub total_bytes: usize,
    /// Per-file line/char counts, keyed by relative path
    pub file_details: HashMap<String, FileDetail>,
}

impl PackStats {
    /// Record one skipped file
    pub(crate) fn record_skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_insert(0) += 1;
    }

    /// Total number of skipped files across all reasons
    pub fn files_skipped(&self) -> usize {
        self.skipped.values().sum()
    }

    /// Skip count for a single reason
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }
}
