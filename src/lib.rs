/*!
 * ctxpack - Pack a project directory into a single Markdown document
 * for LLM chat context
 *
 * Walks a project tree, filters files by extension allowlist and
 * ignore rules, and concatenates the survivors into one Markdown
 * file suitable for uploading to a chat-based LLM.
 */

pub mod clipboard;
pub mod config;
pub mod error;
pub mod launch;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::Config;
pub use error::{PackError, Result};
pub use report::{ReportFormat, Reporter, RunReport};
pub use rules::{pattern_matches, ScanRule};
pub use scanner::Packer;
pub use types::{FileDetail, PackStats, PackedDocument, PackedEntry, SkipReason};
pub use utils::format_file_size;
pub use writer::MarkdownWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
