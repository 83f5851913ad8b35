use std::path::PathBuf;

use anyhow::{Context, Result};

/// Directory name under the platform data directory.
pub const APP_DIR_NAME: &str = "PocketBank";

/// Get the PocketBank application data root directory.
///
/// # Platform-specific Paths
/// - macOS: ~/Library/Application Support/PocketBank
/// - Windows: %APPDATA%\PocketBank
/// - Linux: $XDG_DATA_HOME/PocketBank or ~/.local/share/PocketBank
///
/// The directory is not created here; the caller decides when to create it.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join(APP_DIR_NAME))
}
