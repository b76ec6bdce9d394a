use std::env;
use std::path::PathBuf;

use crate::config::CONFIG_FILE_NAME;

/// Directory holding the running executable.
pub fn executing_dir() -> std::io::Result<PathBuf> {
    let exe = env::current_exe()?;
    Ok(exe.parent().map(PathBuf::from).unwrap_or_default())
}

/// Picks the config file: an explicit path as-is, otherwise the first
/// existing `servers.json` next to the executable, in the working directory,
/// then in the XDG config dir. Falls back to the executable-side path so the
/// read error names where we looked first.
pub fn config_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }

    let beside_exe = match executing_dir() {
        Ok(dir) => Some(dir.join(CONFIG_FILE_NAME)),
        Err(e) => {
            log::debug!("Could not locate executable: {}", e);
            None
        }
    };
    let in_cwd = PathBuf::from(CONFIG_FILE_NAME);
    let in_xdg = xdg::BaseDirectories::with_prefix(env!("CARGO_PKG_NAME"))
        .ok()
        .and_then(|xdg| xdg.find_config_file(CONFIG_FILE_NAME));

    let candidates = beside_exe.iter().chain([&in_cwd]).chain(in_xdg.iter());
    for candidate in candidates {
        if candidate.is_file() {
            return candidate.clone();
        }
        log::debug!("No config at {}", candidate.display());
    }

    beside_exe.unwrap_or(in_cwd)
}
