use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::bail;

/// Returns the current user's home directory.
///
/// The platform lookup wins; `HOME` is only consulted when it comes back empty.
pub fn home_dir() -> anyhow::Result<PathBuf> {
    resolve(dirs::home_dir(), env::var_os("HOME"))
}

fn resolve(platform: Option<PathBuf>, home_var: Option<OsString>) -> anyhow::Result<PathBuf> {
    if let Some(home) = platform.filter(|home| !home.as_os_str().is_empty()) {
        return Ok(home);
    }
    match home_var {
        Some(home) if !home.is_empty() => Ok(PathBuf::from(home)),
        _ => bail!("Failed to get Current User"),
    }
}
