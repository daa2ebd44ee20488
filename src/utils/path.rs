//! Path utilities: expand `~` and resolve database paths against the config dir.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// `~/x` → home-relative, absolute stays as is, a bare relative name lands
/// in `base` (the config directory).
pub fn resolve_db_path(path: &str, base: &Path) -> PathBuf {
    let p = expand_tilde(path);
    if p.is_absolute() || path.starts_with("./") || path.contains(std::path::MAIN_SEPARATOR) {
        p
    } else {
        base.join(p)
    }
}
