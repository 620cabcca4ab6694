/*!
 * Clipboard support for ctxpack
 *
 * Copies the instruction prompt to the system clipboard by piping it
 * into whatever clipboard tool the platform provides. Callers treat
 * failure as a warning, never as a fatal error.
 */

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the clipboard command
    #[error("command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("no clipboard tool found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Copy text to the system clipboard
///
/// Tries the available clipboard tools in order of preference for the
/// current platform and pipes the text into the first one that exists.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    for (cmd, args) in candidate_tools() {
        if command_exists(cmd) {
            return pipe_to_command(cmd, args, text);
        }
    }
    Err(ClipboardError::NoClipboardFound)
}

/// Check if a command exists on the system
pub fn command_exists(command: &str) -> bool {
    if let Ok(paths) = env::var("PATH") {
        for path in paths.split(':') {
            if Path::new(path).join(command).exists() {
                return true;
            }
        }
    }

    // Fall back to running it with --version
    Command::new(command)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

/// Clipboard tools to try, most specific first
fn candidate_tools() -> Vec<(&'static str, &'static [&'static str])> {
    let mut tools: Vec<(&'static str, &'static [&'static str])> = Vec::new();

    // Inside tmux the buffer reaches the outer clipboard too
    if env::var("TMUX").is_ok() {
        tools.push(("tmux", &["load-buffer", "-w", "-"]));
    }

    if cfg!(target_os = "macos") {
        tools.push(("pbcopy", &[]));
    } else if cfg!(target_os = "windows") {
        tools.push(("clip.exe", &[]));
    } else if cfg!(target_os = "android") {
        tools.push(("termux-clipboard-set", &[]));
    } else {
        if env::var("WSL_DISTRO_NAME").is_ok() {
            tools.push(("clip.exe", &[]));
        }
        tools.push(("wl-copy", &[]));
        tools.push(("xsel", &["-b", "-i"]));
        tools.push(("xclip", &["-selection", "clipboard", "-in"]));
    }

    tools
}

/// Spawn a command and write the text to its stdin
fn pipe_to_command(cmd: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|_| ClipboardError::CommandFailed(format!("failed to spawn {cmd}")))?;

    child
        .stdin
        .as_mut()
        .ok_or_else(|| ClipboardError::CommandFailed(format!("failed to open stdin for {cmd}")))?
        .write_all(text.as_bytes())
        .map_err(|_| ClipboardError::CommandFailed(format!("failed to write to {cmd}")))?;

    let status = child
        .wait()
        .map_err(|_| ClipboardError::CommandFailed(format!("failed to wait for {cmd}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{cmd} exited with status {status}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_exists() {
        assert!(command_exists("ls"));
        assert!(!command_exists("nonexistentcommandxyz"));
    }

    #[test]
    fn test_candidate_tools_not_empty_on_known_platforms() {
        if cfg!(any(
            target_os = "macos",
            target_os = "windows",
            target_os = "linux"
        )) {
            assert!(!candidate_tools().is_empty());
        }
    }
}
