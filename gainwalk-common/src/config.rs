//! Analysis command configuration and configuration file resolution
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// External analysis program used when nothing else is configured
pub const DEFAULT_TOOL: &str = "rsgain";

/// Mode argument placed first in every analysis command
pub const TOOL_MODE: &str = "custom";

/// Default target loudness in LUFS
pub const DEFAULT_TARGET_LOUDNESS: i32 = -18;

/// Accepted target loudness values in LUFS
pub const TARGET_LOUDNESS_RANGE: RangeInclusive<i32> = -30..=-5;

/// Default number of analysis invocations allowed to run at once
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 100;

/// Largest concurrency limit the admission gate can hold
///
/// Equal to tokio's `Semaphore::MAX_PERMITS`.
pub const MAX_CONCURRENCY_LIMIT: usize = usize::MAX >> 3;

/// What the analysis tool does with ReplayGain tags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagMode {
    /// Scan only, leave tags untouched
    #[default]
    Scan,
    /// Write tags
    Write,
    /// Delete tags
    Delete,
}

impl TagMode {
    /// Single-letter value understood by the tool's `-s` option
    pub fn as_flag(&self) -> &'static str {
        match self {
            TagMode::Scan => "s",
            TagMode::Write => "i",
            TagMode::Delete => "d",
        }
    }
}

impl FromStr for TagMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "s" | "scan" => Ok(TagMode::Scan),
            "i" | "write" => Ok(TagMode::Write),
            "d" | "delete" => Ok(TagMode::Delete),
            other => Err(Error::Config(format!("Invalid tag mode: {}", other))),
        }
    }
}

impl fmt::Display for TagMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_flag())
    }
}

/// Clipping protection applied by the analysis tool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClipMode {
    /// No clipping protection
    #[default]
    None,
    /// Clipping protection for positive gain values only
    PositiveOnly,
    /// Always use the max peak level for clipping protection
    MaxPeak,
}

impl ClipMode {
    /// Single-letter value understood by the tool's `-c` option
    pub fn as_flag(&self) -> &'static str {
        match self {
            ClipMode::None => "n",
            ClipMode::PositiveOnly => "p",
            ClipMode::MaxPeak => "a",
        }
    }
}

impl FromStr for ClipMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "n" | "none" => Ok(ClipMode::None),
            "p" | "positive" => Ok(ClipMode::PositiveOnly),
            "a" | "max-peak" => Ok(ClipMode::MaxPeak),
            other => Err(Error::Config(format!("Invalid clip mode: {}", other))),
        }
    }
}

impl fmt::Display for ClipMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_flag())
    }
}

/// Analysis settings shared read-only by every task of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandConfig {
    /// Calculate album gain and peak
    pub album_mode: bool,
    /// Don't scan files with existing ReplayGain information
    pub skip_existing: bool,
    pub tag_mode: TagMode,
    /// Target loudness in LUFS, within [`TARGET_LOUDNESS_RANGE`]
    pub target_loudness: i32,
    pub clip_mode: ClipMode,
    /// Suppress the tool's scanning status messages
    pub quiet: bool,
    /// Admission gate capacity
    pub concurrency_limit: usize,
    /// Program invoked for each analysis job
    pub tool: PathBuf,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            album_mode: false,
            skip_existing: false,
            tag_mode: TagMode::default(),
            target_loudness: DEFAULT_TARGET_LOUDNESS,
            clip_mode: ClipMode::default(),
            quiet: false,
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
            tool: PathBuf::from(DEFAULT_TOOL),
        }
    }
}

impl CommandConfig {
    /// Check value ranges
    ///
    /// Returns `Error::Config` describing the first invalid value found.
    pub fn validate(&self) -> Result<()> {
        if !TARGET_LOUDNESS_RANGE.contains(&self.target_loudness) {
            return Err(Error::Config(format!(
                "Target loudness n needs to be {} ≤ n ≤ {}, got {}",
                TARGET_LOUDNESS_RANGE.start(),
                TARGET_LOUDNESS_RANGE.end(),
                self.target_loudness
            )));
        }

        if !(1..=MAX_CONCURRENCY_LIMIT).contains(&self.concurrency_limit) {
            return Err(Error::Config(format!(
                "Concurrency limit must be between 1 and {}, got {}",
                MAX_CONCURRENCY_LIMIT, self.concurrency_limit
            )));
        }

        if self.tool.as_os_str().is_empty() {
            return Err(Error::Config("Analysis tool path is empty".to_string()));
        }

        Ok(())
    }

    /// Argument tokens preceding the file list of every analysis command
    ///
    /// Layout: `custom [-a] [-S] -s <tag> -l <n> -c <clip> [-q]`
    pub fn command_template(&self) -> Vec<String> {
        let mut args = vec![TOOL_MODE.to_string()];

        if self.album_mode {
            args.push("-a".to_string());
        }
        if self.skip_existing {
            args.push("-S".to_string());
        }

        args.push("-s".to_string());
        args.push(self.tag_mode.as_flag().to_string());
        args.push("-l".to_string());
        args.push(self.target_loudness.to_string());
        args.push("-c".to_string());
        args.push(self.clip_mode.as_flag().to_string());

        if self.quiet {
            args.push("-q".to_string());
        }

        args
    }
}

/// Logging section of the TOML config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when neither RUST_LOG nor -v is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Path to the analysis program
    pub tool: Option<PathBuf>,
    /// Admission gate capacity
    pub concurrency_limit: Option<usize>,
    pub logging: LoggingConfig,
}

/// Platform config file location: `<config_dir>/gainwalk/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gainwalk").join("config.toml"))
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
    })?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

/// Load the config file named on the command line, or the platform default
///
/// An explicitly named file must exist. A missing default file is not an
/// error; compiled defaults are used instead.
pub fn resolve_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        return load_toml_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => load_toml_config(&path),
        Some(path) => {
            debug!("No config file at {}, using defaults", path.display());
            Ok(TomlConfig::default())
        }
        None => {
            debug!("Could not determine config directory, using defaults");
            Ok(TomlConfig::default())
        }
    }
}
