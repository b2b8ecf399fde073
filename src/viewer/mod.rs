use std::path::Path;
use tracing::debug;

/// Open a file in the platform's default application
///
/// # Arguments
/// * `path` - The file to open (e.g., a saved report)
///
/// Best-effort: the `open` crate picks `open` on macOS, `start` on Windows,
/// and `xdg-open` (or similar) elsewhere. Failures are logged, not returned.
pub fn open_path(path: &Path) {
    if let Err(e) = open::that(path) {
        debug!(path = %path.display(), error = %e, "failed to open in default viewer");
    }
}
