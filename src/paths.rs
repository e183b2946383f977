//! Filesystem locations for assets and outputs.

use std::path::PathBuf;
use std::sync::OnceLock;

static EXE_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Environment variable naming the extraction root of a packaged
/// single-file distribution.
const RESOURCE_ROOT_ENV: &str = "DIG_TOOL_RESOURCE_DIR";

/// Returns the directory containing the executable.
pub fn get_exe_dir() -> &'static PathBuf {
    EXE_DIR.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

/// Resolve the window icon: `assets/icon.ico` next to the executable,
/// falling back to the packaged resource root. `None` when neither exists;
/// the caller renders without an icon.
pub fn icon_path() -> Option<PathBuf> {
    let local = get_exe_dir().join("assets").join("icon.ico");
    if local.is_file() {
        return Some(local);
    }
    if let Ok(root) = std::env::var(RESOURCE_ROOT_ENV) {
        let bundled = PathBuf::from(root).join("assets").join("icon.ico");
        if bundled.is_file() {
            return Some(bundled);
        }
    }
    None
}

/// Returns the snapshots directory: `<exe_dir>/snapshots/`
pub fn get_snapshots_dir() -> PathBuf {
    get_exe_dir().join("snapshots")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exe_dir_is_stable() {
        assert_eq!(get_exe_dir(), get_exe_dir());
    }

    #[test]
    fn test_snapshots_dir_is_under_exe_dir() {
        assert!(get_snapshots_dir().starts_with(get_exe_dir()));
    }
}
