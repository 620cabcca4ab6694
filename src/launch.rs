/*!
 * Fire-and-forget launchers for the browser and file manager
 *
 * Both launchers spawn a detached platform command and return without
 * waiting. Failures never fail the run; callers log a warning and
 * move on.
 */

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;

/// Error type for launcher operations
#[derive(Error, Debug)]
pub enum LaunchError {
    /// The platform command could not be spawned
    #[error("failed to launch {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
}

/// Result type for launcher operations
pub type Result<T> = std::result::Result<T, LaunchError>;

/// Open a URL in the default browser
pub fn open_url(url: &str) -> Result<()> {
    if cfg!(target_os = "macos") {
        spawn_detached("open", &[url])
    } else if cfg!(target_os = "windows") {
        spawn_detached("cmd", &["/C", "start", "", url])
    } else {
        spawn_detached("xdg-open", &[url])
    }
}

/// Open the file manager showing the given file
pub fn reveal(path: &Path) -> Result<()> {
    if cfg!(target_os = "macos") {
        let target = path.to_string_lossy();
        spawn_detached("open", &["-R", &target])
    } else if cfg!(target_os = "windows") {
        let target = format!("/select,{}", path.display());
        spawn_detached("explorer", &[&target])
    } else {
        // Linux file managers cannot reliably select a file; open the
        // containing directory instead
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let target = dir.to_string_lossy();
        spawn_detached("xdg-open", &[&target])
    }
}

/// Spawn without waiting; stdout and stderr are discarded
fn spawn_detached(command: &str, args: &[&str]) -> Result<()> {
    Command::new(command)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|source| LaunchError::Spawn {
            command: command.to_string(),
            source,
        })
}
