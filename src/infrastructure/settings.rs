//! Helper-endpoint discovery from the Mach1 settings file.
//!
//! The helper service writes its UDP port to a shared `settings.json`
//! under the platform's Mach1 data directory:
//!
//! - macOS:   `/Library/Application Support/Mach1/settings.json`
//! - Windows: `%PROGRAMDATA%\Mach1\settings.json`
//! - Linux:   `/usr/local/share/Mach1/settings.json`
//!
//! This lookup is an external collaborator of the simulator: an absent
//! file silently yields the documented default, and an unreadable or
//! corrupt file is only worth a warning before falling back.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// The helper port assumed when no settings file is readable.
pub const DEFAULT_HELPER_PORT: u16 = 10301;

/// Error type for settings-file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A file system error other than "not found".
    #[error("I/O error reading settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The JSON content could not be parsed.
    #[error("failed to parse settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The subset of `settings.json` this process cares about. Unknown keys
/// are ignored.
#[derive(Debug, Deserialize)]
struct HelperSettings {
    #[serde(rename = "helperPort")]
    helper_port: Option<u16>,
}

/// The platform-appropriate path of the Mach1 settings file.
pub fn settings_file_path() -> PathBuf {
    platform_data_dir().join("settings.json")
}

/// The Mach1 shared data directory for the current platform.
fn platform_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        PathBuf::from("/Library/Application Support/Mach1")
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var_os("PROGRAMDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData"))
            .join("Mach1")
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        PathBuf::from("/usr/local/share/Mach1")
    }
}

/// Reads the `helperPort` key from the settings file at `path`.
///
/// Returns `Ok(None)` when the file does not exist or carries no
/// `helperPort` key — both are normal on a machine without a running
/// helper.
///
/// # Errors
///
/// Returns [`SettingsError`] for unreadable files or malformed JSON.
pub fn load_helper_port_from(path: &Path) -> Result<Option<u16>, SettingsError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    let settings: HelperSettings = serde_json::from_str(&content)?;
    Ok(settings.helper_port)
}

/// Resolves the helper's UDP port: the settings file value when present,
/// otherwise [`DEFAULT_HELPER_PORT`]. Unreadable settings are a warning,
/// never a failure.
pub fn resolve_helper_port() -> u16 {
    let path = settings_file_path();
    match load_helper_port_from(&path) {
        Ok(Some(port)) => {
            debug!("helper port {port} read from {}", path.display());
            port
        }
        Ok(None) => {
            debug!(
                "no helper port in {}; using default {DEFAULT_HELPER_PORT}",
                path.display()
            );
            DEFAULT_HELPER_PORT
        }
        Err(e) => {
            warn!("could not read settings file: {e}; using default helper port {DEFAULT_HELPER_PORT}");
            DEFAULT_HELPER_PORT
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
