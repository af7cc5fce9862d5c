//! Analysis job: one tool invocation for one directory's audio files

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Immutable description of a single analysis invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisJob {
    directory: PathBuf,
    files: Vec<PathBuf>,
    command: Arc<[String]>,
}

impl AnalysisJob {
    /// Build a job for `directory`
    ///
    /// `files` are sorted by path so the argument list is deterministic
    /// regardless of directory enumeration order.
    pub fn new(directory: PathBuf, mut files: Vec<PathBuf>, command: Arc<[String]>) -> Self {
        files.sort();
        Self {
            directory,
            files,
            command,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Template tokens shared by every job of the run
    pub fn command(&self) -> &[String] {
        &self.command
    }

    /// Full argument list: template tokens first, then the file paths
    ///
    /// Paths are passed through as raw OS strings, never re-encoded.
    pub fn arguments(&self) -> Vec<OsString> {
        self.command
            .iter()
            .map(OsString::from)
            .chain(self.files.iter().map(|f| f.as_os_str().to_os_string()))
            .collect()
    }

    /// Human-readable command line for error reports (lossy for non-UTF-8 names)
    pub fn render(&self, program: &Path) -> String {
        let mut rendered = program.display().to_string();
        for arg in self.arguments() {
            rendered.push(' ');
            rendered.push_str(&arg.to_string_lossy());
        }
        rendered
    }
}
