/*!
 * Configuration handling for ctxpack
 */

use std::env;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::error::{PackError, Result};
use crate::rules::{self, ScanRule};

/// Web app opened after a successful pack
pub const CHAT_URL: &str = "https://gemini.google.com/app";

/// Default name of the packed document, created in the invocation
/// directory (not the scanned root)
pub const OUTPUT_FILENAME: &str = "codebase_context.md";

/// File the instruction prompt is mirrored to, as a clipboard fallback
pub const PROMPT_FILENAME: &str = "prompt.txt";

/// Instruction prompt copied to the clipboard for pasting into the chat
pub const USER_PROMPT: &str = "I have attached a file `codebase_context.md` which contains the full source code and directory structure of my project. \n\n\
**Instruction:**\n\
1.  **Analyze** the provided codebase to understand its architecture, tech stack, and key components.\n\
2.  **Act** as a Senior Software Architect and Coding Assistant for this specific project.\n\
3.  **Wait** for my next command. I will ask you to implement features, fix bugs, or explain code. When I do, provide concrete code examples and file modifications that fit the existing style and structure.\n\n\
Please confirm you have ingested the context and are ready.";

/// Command-line arguments for ctxpack
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "ctxpack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Pack a project directory into a single Markdown document for LLM chat context",
    long_about = "Walks a project directory, filters files by extension and ignore rules, and concatenates their contents into a single Markdown document ready to drop into a chat-based LLM."
)]
pub struct Args {
    /// Project root directory to pack
    pub directory_path: Option<String>,

    /// Project root directory (alternative flag form)
    #[clap(long, short = 'p')]
    pub path: Option<String>,

    /// Output Markdown file name, created in the current directory
    #[clap(long, default_value = OUTPUT_FILENAME)]
    pub output_file: String,

    /// Comma-separated glob patterns to ignore, in addition to the
    /// ignore file
    #[clap(long, value_delimiter = ',')]
    pub ignore_patterns: Vec<String>,

    /// Comma-separated extensions to pack instead of the defaults
    /// (e.g. ".py,.rs")
    #[clap(long, value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Comma-separated directory or file names to ignore, in addition
    /// to the defaults
    #[clap(long, value_delimiter = ',')]
    pub ignore_names: Vec<String>,

    /// Path to a custom ignore file (default: .gitignore in the root)
    #[clap(long)]
    pub ignore_file: Option<String>,

    /// Number of threads to use for reading files
    #[clap(long, default_value = "4")]
    pub threads: usize,

    /// Skip copying the instruction prompt to the clipboard
    #[clap(long)]
    pub no_clip: bool,

    /// Skip opening the browser and file manager afterwards
    #[clap(long)]
    pub no_open: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory tree being scanned
    pub root: PathBuf,

    /// Output document path, resolved against the invocation directory
    pub output_file: PathBuf,

    /// Extra ignore patterns from the command line
    pub ignore_patterns: Vec<String>,

    /// Extension allowlist override (empty: use defaults)
    pub extensions: Vec<String>,

    /// Extra ignored names from the command line
    pub ignore_names: Vec<String>,

    /// Custom ignore file (default: .gitignore in the root)
    pub ignore_file: Option<PathBuf>,

    /// Worker threads for file reading
    pub num_threads: usize,

    /// Copy the instruction prompt to the clipboard
    pub clip: bool,

    /// Open the browser and file manager afterwards
    pub open: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    ///
    /// Root resolution order: positional argument, `--path` flag,
    /// `CONTEXT_ROOT` environment variable, current directory.
    pub fn from_args(args: Args) -> Self {
        let root = args
            .directory_path
            .or(args.path)
            .or_else(|| env::var("CONTEXT_ROOT").ok())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            root,
            output_file: PathBuf::from(args.output_file),
            ignore_patterns: args.ignore_patterns,
            extensions: args.extensions,
            ignore_names: args.ignore_names,
            ignore_file: args.ignore_file.map(PathBuf::from),
            num_threads: args.threads,
            clip: !args.no_clip,
            open: !args.no_open,
        }
    }

    /// Validate the configuration before scanning
    pub fn validate(&self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(PackError::InvalidRoot(self.root.clone()));
        }

        if let Some(parent) = self.output_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(PackError::OutputWrite {
                    path: self.output_file.clone(),
                    source: io::Error::new(io::ErrorKind::NotFound, "output directory not found"),
                });
            }
        }

        if let Some(path) = &self.ignore_file {
            if !path.exists() {
                return Err(PackError::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("ignore file not found: {}", path.display()),
                )));
            }
        }

        Ok(())
    }

    /// Path the instruction prompt is mirrored to, next to the output
    /// document
    pub fn prompt_file(&self) -> PathBuf {
        match self.output_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(PROMPT_FILENAME),
            _ => PathBuf::from(PROMPT_FILENAME),
        }
    }

    /// Build the scan rule for this run: built-in defaults, then the
    /// ignore file, then command-line overrides
    pub fn build_rules(&self) -> ScanRule {
        let mut scan_rule = ScanRule::default();

        if !self.extensions.is_empty() {
            scan_rule.included_extensions = self
                .extensions
                .iter()
                .map(|e| normalize_extension(e))
                .collect();
        }
        for name in &self.ignore_names {
            scan_rule.ignored_names.insert(name.clone());
        }

        let ignore_path = self
            .ignore_file
            .clone()
            .unwrap_or_else(|| self.root.join(".gitignore"));
        if ignore_path.exists() {
            match rules::load_ignore_patterns(&ignore_path) {
                Ok(patterns) => scan_rule.ignore_patterns = patterns,
                Err(e) => eprintln!("Warning: could not read {}: {}", ignore_path.display(), e),
            }
        }
        scan_rule
            .ignore_patterns
            .extend(self.ignore_patterns.iter().cloned());

        scan_rule
    }
}

/// Normalize a user-supplied extension to lowercase dotted form
fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_resolution_prefers_positional() {
        let args = Args::parse_from(["ctxpack", "pos-root", "--path", "flag-root"]);
        let config = Config::from_args(args);
        assert_eq!(config.root, PathBuf::from("pos-root"));
    }

    // All CONTEXT_ROOT states live in one test so parallel test
    // threads never race on the variable
    #[test]
    fn test_root_resolution_env_fallback() {
        env::set_var("CONTEXT_ROOT", "env-root");

        // An explicit flag still wins over the environment
        let config = Config::from_args(Args::parse_from(["ctxpack", "--path", "flag-root"]));
        assert_eq!(config.root, PathBuf::from("flag-root"));

        // With no argument the environment supplies the root
        let config = Config::from_args(Args::parse_from(["ctxpack"]));
        assert_eq!(config.root, PathBuf::from("env-root"));

        env::remove_var("CONTEXT_ROOT");
        let config = Config::from_args(Args::parse_from(["ctxpack"]));
        assert_eq!(config.root, PathBuf::from("."));
    }

    #[test]
    fn test_prompt_file_sits_next_to_output() {
        let mut config = Config::from_args(Args::parse_from(["ctxpack"]));
        assert_eq!(config.prompt_file(), PathBuf::from(PROMPT_FILENAME));

        config.output_file = PathBuf::from("reports/ctx.md");
        assert_eq!(config.prompt_file(), PathBuf::from("reports/prompt.txt"));
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("py"), ".py");
        assert_eq!(normalize_extension(".RS"), ".rs");
        assert_eq!(normalize_extension(" go "), ".go");
    }
}
