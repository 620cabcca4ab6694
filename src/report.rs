/*!
 * Reporting functionality for ctxpack
 *
 * Generates a formatted end-of-run report using the tabled library
 * for clean, consistent table rendering.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::{PackStats, SkipReason};
use crate::utils::format_file_size;

/// Everything the end-of-run report needs
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Output file path
    pub output_file: String,
    /// Time taken to pack and write
    pub duration: Duration,
    /// Statistics from the packing run
    pub stats: PackStats,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for packing results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string for a finished run
    pub fn generate_report(&self, report: &RunReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &RunReport) {
        println!("\n{}", self.generate_report(report));
    }

    fn console_report(&self, report: &RunReport) -> String {
        let files_table = self.files_table(&report.stats);
        let summary_table = self.summary_table(report);

        let files_title = if report.stats.file_details.len() > 15 {
            "LARGEST PACKED FILES"
        } else {
            "PACKED FILES"
        };

        format!(
            "{}\n{}\n\nPACK COMPLETE\n{}",
            files_title, files_table, summary_table
        )
    }

    fn summary_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let stats = &report.stats;
        let mut rows = vec![
            SummaryRow {
                key: "Output File".to_string(),
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "Files Packed".to_string(),
                value: self.format_number(stats.files_packed),
            },
            SummaryRow {
                key: "Files Skipped".to_string(),
                value: self.format_number(stats.files_skipped()),
            },
            SummaryRow {
                key: "Content Size".to_string(),
                value: format_file_size(stats.total_bytes as u64),
            },
            SummaryRow {
                key: "Est. LLM Tokens".to_string(),
                value: format!(
                    "{} (estimated)",
                    self.format_number(stats.total_bytes / 4)
                ),
            },
        ];

        // Break the skips out per reason, deterministically ordered
        let mut reasons: Vec<(&SkipReason, &usize)> = stats.skipped.iter().collect();
        reasons.sort_by_key(|(reason, _)| reason.to_string());
        for (reason, count) in reasons {
            rows.push(SummaryRow {
                key: format!("  skipped: {reason}"),
                value: self.format_number(*count),
            });
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn files_table(&self, stats: &PackStats) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Chars")]
            chars: String,
        }

        // Sort by size, largest first; path breaks ties so the table
        // is stable across runs
        let mut files: Vec<_> = stats.file_details.iter().collect();
        files.sort_by(|(path_a, a), (path_b, b)| {
            b.chars.cmp(&a.chars).then_with(|| path_a.cmp(path_b))
        });

        let shown = if files.len() > 15 {
            &files[..10]
        } else {
            &files[..]
        };

        let rows: Vec<FileRow> = shown
            .iter()
            .map(|(path, info)| FileRow {
                path: truncate_path(path, 60),
                lines: self.format_number(info.lines),
                chars: self.format_number(info.chars),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }
}

/// Truncate a path for display, keeping the trailing segments
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.len() <= max_len {
        return path.to_string();
    }

    let parts: Vec<&str> = path.split('/').collect();
    let mut kept: Vec<&str> = Vec::new();
    let mut len = 3; // leading "..."
    for part in parts.iter().rev() {
        let part_len = part.len() + 1;
        if len + part_len > max_len {
            break;
        }
        kept.push(part);
        len += part_len;
    }

    if kept.is_empty() {
        // No whole segment fits; keep as much of the tail as the
        // budget allows, trimming on a char boundary
        let budget = max_len - 3;
        let mut start = path.len();
        for (idx, _) in path.char_indices().rev() {
            if path.len() - idx > budget {
                break;
            }
            start = idx;
        }
        return format!("...{}", &path[start..]);
    }

    let mut out = String::from("...");
    for part in kept.iter().rev() {
        out.push('/');
        out.push_str(part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_path_short_unchanged() {
        assert_eq!(truncate_path("src/main.rs", 60), "src/main.rs");
    }

    #[test]
    fn test_truncate_path_keeps_trailing_segments() {
        let long = "very/long/nested/directory/structure/with/many/levels/file.rs";
        let truncated = truncate_path(long, 30);
        assert!(truncated.starts_with("..."));
        assert!(truncated.ends_with("file.rs"));
        assert!(truncated.len() <= 30);
    }

    #[test]
    fn test_truncate_path_multibyte_segment() {
        // A single long non-ASCII segment must trim on a char
        // boundary instead of panicking mid-character
        let long = "é".repeat(40);
        let truncated = truncate_path(&long, 60);
        assert!(truncated.starts_with("..."));
        assert!(truncated.len() <= 60);
        assert!(truncated[3..].chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_report_includes_skip_breakdown() {
        let mut stats = PackStats::default();
        stats.files_packed = 1;
        stats.record_skip(SkipReason::Extension);
        stats.record_skip(SkipReason::Extension);
        stats.record_skip(SkipReason::Oversize);
        stats
            .file_details
            .insert("a.py".to_string(), crate::types::FileDetail { lines: 1, chars: 2 });

        let report = RunReport {
            output_file: "codebase_context.md".to_string(),
            duration: Duration::from_millis(5),
            stats,
        };

        let rendered = Reporter::new(ReportFormat::ConsoleTable).generate_report(&report);
        assert!(rendered.contains("skipped: extension not included"));
        assert!(rendered.contains("skipped: oversized"));
        assert!(rendered.contains("a.py"));
    }
}
