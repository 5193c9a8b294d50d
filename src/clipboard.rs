/*!
 * Clipboard support for arcscan
 *
 * Pipes the collected output into the first clipboard tool found on PATH.
 */

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use strum::{Display, EnumIter, IntoEnumIterator};
use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the command
    #[error("{tool} failed: {reason}")]
    CommandFailed { tool: &'static str, reason: String },

    /// No suitable clipboard tool was found
    #[error("No clipboard tool found (xclip, wl-copy, pbcopy, xsel, clip.exe)")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Known clipboard tools, in order of preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum ClipboardProvider {
    /// X11 clipboard with xclip
    #[strum(serialize = "xclip")]
    Xclip,
    /// Wayland clipboard
    #[strum(serialize = "wl-copy")]
    Wayland,
    /// macOS clipboard
    #[strum(serialize = "pbcopy")]
    MacOS,
    /// X11 clipboard with xsel
    #[strum(serialize = "xsel")]
    Xsel,
    /// Windows clipboard (via WSL)
    #[strum(serialize = "clip.exe")]
    Wsl,
}

impl ClipboardProvider {
    /// Executable name
    fn tool(self) -> &'static str {
        match self {
            Self::Xclip => "xclip",
            Self::Wayland => "wl-copy",
            Self::MacOS => "pbcopy",
            Self::Xsel => "xsel",
            Self::Wsl => "clip.exe",
        }
    }

    fn args(self) -> &'static [&'static str] {
        match self {
            Self::Xclip => &["-selection", "clipboard"],
            Self::Xsel => &["-b", "-i"],
            Self::Wayland | Self::MacOS | Self::Wsl => &[],
        }
    }

    /// First provider whose executable is on PATH
    pub fn detect() -> Option<Self> {
        Self::iter().find(|provider| command_exists(provider.tool()))
    }

    /// Copy `text` using this provider
    pub fn copy(self, text: &str) -> Result<()> {
        let tool = self.tool();
        let failed = |reason: String| ClipboardError::CommandFailed { tool, reason };

        let mut child = Command::new(tool)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| failed(format!("could not spawn: {}", e)))?;

        {
            let stdin = child
                .stdin
                .as_mut()
                .ok_or_else(|| failed("could not open stdin".to_string()))?;
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| failed(format!("could not write: {}", e)))?;
        }
        // Close stdin so the tool sees EOF
        drop(child.stdin.take());

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(failed(format!("exited with status: {}", status)))
        }
    }
}

/// Copy text to the clipboard with the first available tool
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let provider = ClipboardProvider::detect().ok_or(ClipboardError::NoClipboardFound)?;
    log::debug!("Copying {} bytes to the clipboard with {}", text.len(), provider);
    provider.copy(text)
}

/// Check whether an executable named `command` exists on PATH
pub fn command_exists(command: &str) -> bool {
    env::var_os("PATH").is_some_and(|paths| {
        env::split_paths(&paths).any(|dir| is_executable(&dir.join(command)))
    })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
