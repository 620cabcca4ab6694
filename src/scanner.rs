/*!
 * Directory traversal and file packing
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::error::{PackError, Result};
use crate::rules::ScanRule;
use crate::types::{FileDetail, PackStats, PackedDocument, PackedEntry, SkipReason};

/// Per-file size cap; anything larger is skipped and counted
pub const MAX_FILE_SIZE: u64 = 8 * 1024 * 1024;

/// A file that survived the traversal filters and is queued for reading
struct Candidate {
    abs: PathBuf,
    rel: String,
}

enum Outcome {
    Packed(PackedEntry, FileDetail),
    Skipped(SkipReason),
}

/// Walks a root directory and packs matching files into a document
pub struct Packer {
    /// Filter configuration for this run
    rules: ScanRule,
    /// Base name of the output document, excluded from the scan so the
    /// tool never packs its own product
    output_name: Option<String>,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Packer {
    /// Create a new packer
    pub fn new(rules: ScanRule, progress: Arc<ProgressBar>) -> Self {
        Self {
            rules,
            output_name: None,
            progress,
        }
    }

    /// Exclude a file name from the scan (the output document itself)
    pub fn exclude_output(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Pack every matching file under `root` into a sorted document
    ///
    /// Fails only if `root` is not a directory. Per-file problems are
    /// recorded as skips on the returned stats and never abort the run.
    pub fn pack(&self, root: &Path) -> Result<(PackedDocument, PackStats)> {
        if !root.is_dir() {
            return Err(PackError::InvalidRoot(root.to_path_buf()));
        }
        let root = fs::canonicalize(root)?;

        let mut stats = PackStats::default();
        let candidates = self.collect_candidates(&root, &mut stats);

        self.progress.set_length(candidates.len() as u64);

        // Reads are independent, so they run on the rayon pool; the
        // sort below makes the result order deterministic regardless
        // of completion order.
        let outcomes: Vec<Outcome> = candidates
            .par_iter()
            .map(|candidate| {
                self.progress.inc(1);
                self.progress.set_message(candidate.rel.clone());
                self.read_candidate(candidate)
            })
            .collect();

        let mut entries = Vec::new();
        for outcome in outcomes {
            match outcome {
                Outcome::Packed(entry, detail) => {
                    stats.files_packed += 1;
                    stats.total_bytes += entry.content.len();
                    stats.file_details.insert(entry.rel_path.clone(), detail);
                    entries.push(entry);
                }
                Outcome::Skipped(reason) => stats.record_skip(reason),
            }
        }

        entries.sort_unstable_by(|a, b| a.rel_path.cmp(&b.rel_path));

        Ok((PackedDocument { entries }, stats))
    }

    /// Enumerate files under `root` that pass every filter
    ///
    /// Ignored directories are pruned without being opened. Walker
    /// errors, including symlink cycles detected by walkdir, are
    /// counted as skips and the walk continues.
    fn collect_candidates(&self, root: &Path, stats: &mut PackStats) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        let walker = WalkDir::new(root).follow_links(true).into_iter();
        let iter = walker.filter_entry(|entry| {
            entry.depth() == 0
                || !(entry.file_type().is_dir()
                    && self
                        .rules
                        .name_ignored(&entry.file_name().to_string_lossy()))
        });

        for entry in iter {
            let entry = match entry {
                Ok(entry) => entry,
                Err(_) => {
                    stats.record_skip(SkipReason::Traversal);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if let Some(output_name) = &self.output_name {
                if name.as_ref() == output_name {
                    continue;
                }
            }
            if self.rules.name_ignored(&name) {
                stats.record_skip(SkipReason::IgnoredName);
                continue;
            }
            if !self.rules.extension_included(entry.path()) {
                stats.record_skip(SkipReason::Extension);
                continue;
            }

            let rel = match entry.path().strip_prefix(root) {
                Ok(rel) => rel_path_string(rel),
                Err(_) => continue,
            };
            if self.rules.pattern_excluded(&rel) {
                stats.record_skip(SkipReason::Pattern);
                continue;
            }

            candidates.push(Candidate {
                abs: entry.path().to_path_buf(),
                rel,
            });
        }

        candidates
    }

    /// Read and decode one candidate
    ///
    /// Invalid UTF-8 is decoded with replacement characters and the
    /// entry is flagged lossy; content is never included silently
    /// corrupted. Oversized and unreadable files become skips.
    fn read_candidate(&self, candidate: &Candidate) -> Outcome {
        let size = match fs::metadata(&candidate.abs) {
            Ok(metadata) => metadata.len(),
            Err(_) => return Outcome::Skipped(SkipReason::Unreadable),
        };
        if size > MAX_FILE_SIZE {
            return Outcome::Skipped(SkipReason::Oversize);
        }

        let bytes = match fs::read(&candidate.abs) {
            Ok(bytes) => bytes,
            Err(_) => return Outcome::Skipped(SkipReason::Unreadable),
        };

        let (content, lossy) = match String::from_utf8(bytes) {
            Ok(text) => (text, false),
            Err(err) => (String::from_utf8_lossy(err.as_bytes()).into_owned(), true),
        };

        let detail = FileDetail {
            lines: content.lines().count(),
            chars: content.chars().count(),
        };

        Outcome::Packed(
            PackedEntry {
                rel_path: candidate.rel.clone(),
                content,
                lossy,
            },
            detail,
        )
    }
}

/// Convert a root-relative path to a `/`-separated string
fn rel_path_string(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
