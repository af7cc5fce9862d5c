//! On-disk music library fixtures

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Create every relative path under `root`
///
/// Paths ending in `/` become directories, everything else an empty file
/// (parent directories are created as needed).
pub fn build_library(root: &Path, entries: &[&str]) {
    for entry in entries {
        let path = root.join(entry.trim_end_matches('/'));
        if entry.ends_with('/') {
            std::fs::create_dir_all(&path).unwrap();
        } else {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(&path, b"").unwrap();
        }
    }
}

/// Absolute paths for `names` inside `dir`, in the given order
pub fn files_of(dir: &Path, names: &[&str]) -> Vec<OsString> {
    names
        .iter()
        .map(|name| dir.join(name).into_os_string())
        .collect()
}

/// Template tokens as they appear in a recorded argument list
pub fn template_args(template: &[String]) -> Vec<OsString> {
    template.iter().map(OsString::from).collect()
}

/// Split a recorded argument list into (template, files)
pub fn split_invocation(args: &[OsString], template_len: usize) -> (Vec<OsString>, Vec<PathBuf>) {
    let template = args[..template_len].to_vec();
    let files = args[template_len..].iter().map(PathBuf::from).collect();
    (template, files)
}
