//! Audio file recognition by extension

use std::ffi::OsStr;
use std::path::Path;

/// Extensions (without the leading dot) the analysis tool accepts
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "aiff", "flac", "mp2", "mp3", "m4a", "mpc", "ogg", "oga", "spx", "opus", "wav", "wv", "wma",
];

/// Whether `file_name` names an audio file the analysis tool can process
///
/// Comparison is case-sensitive: `track.MP3` is not eligible.
pub fn is_eligible(file_name: impl AsRef<OsStr>) -> bool {
    Path::new(file_name.as_ref())
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext))
}
