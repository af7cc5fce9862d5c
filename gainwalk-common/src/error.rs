//! Common error types for gainwalk

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Common result type for gainwalk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the gainwalk crates
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid flag value or configuration file (fatal before any traversal)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A directory could not be enumerated; its subtree is not explored
    #[error("Cannot read directory {}: {source}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The analysis tool failed for one directory's batch of files
    #[error("Analysis failed in {}: `{command}`: {source}", .directory.display())]
    Invocation {
        directory: PathBuf,
        command: String,
        #[source]
        source: InvocationFailure,
    },

    /// Admission gate was closed while a job waited for a permit
    #[error("Admission gate closed")]
    GateClosed,

    /// Configuration file could not be parsed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// How an analysis tool invocation went wrong
#[derive(Error, Debug)]
pub enum InvocationFailure {
    /// The process could not be started at all
    #[error("failed to launch: {0}")]
    Launch(#[source] std::io::Error),

    /// The process ran but reported failure
    #[error("exited unsuccessfully ({0})")]
    ExitStatus(ExitStatus),
}
