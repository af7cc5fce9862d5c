//! Command-line arguments and startup configuration

use clap::{ArgAction, Parser};
use gainwalk_common::config::{
    TomlConfig, DEFAULT_CONCURRENCY_LIMIT, DEFAULT_TARGET_LOUDNESS, DEFAULT_TOOL,
};
use gainwalk_common::{ClipMode, CommandConfig, Error, Result, TagMode};
use std::path::PathBuf;

/// gainwalk - ReplayGain analysis for a whole music library
///
/// Runs `rsgain custom` once for every directory that directly contains audio
/// files, with a configurable limit on concurrently running instances.
#[derive(Parser, Debug)]
#[command(name = "gainwalk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Calculate album gain and peak
    #[arg(short = 'a')]
    pub album_mode: bool,

    /// Don't scan files with existing ReplayGain information
    #[arg(short = 'S')]
    pub skip_existing: bool,

    /// Tag mode: s = scan only, i = write tags, d = delete tags
    #[arg(short = 's', value_name = "MODE", default_value = "s")]
    pub tag_mode: TagMode,

    /// Use N LUFS as target loudness (-30 ≤ N ≤ -5)
    #[arg(
        short = 'l',
        value_name = "N",
        default_value_t = DEFAULT_TARGET_LOUDNESS,
        allow_negative_numbers = true
    )]
    pub target_loudness: i32,

    /// Clip mode: n = no clipping protection, p = protection for positive gain
    /// values only, a = always use max peak level
    #[arg(short = 'c', value_name = "MODE", default_value = "n")]
    pub clip_mode: ClipMode,

    /// Don't print the analysis tool's scanning status messages
    #[arg(short = 'q')]
    pub quiet: bool,

    /// Limit how many analysis instances can run at a time [default: 100]
    #[arg(short = 'r', value_name = "N")]
    pub concurrency_limit: Option<usize>,

    /// Analysis program to run [default: rsgain]
    #[arg(long, value_name = "PATH", env = "GAINWALK_TOOL")]
    pub tool: Option<PathBuf>,

    /// Configuration file (defaults to <config dir>/gainwalk/config.toml)
    #[arg(long, value_name = "FILE", env = "GAINWALK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Root folder of the music library
    #[arg(value_name = "LIBRARY_ROOT")]
    pub library_root: PathBuf,
}

/// Validated settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    pub library_root: PathBuf,
    pub command: CommandConfig,
}

impl Cli {
    /// Merge arguments with the config file and validate the result
    ///
    /// Command-line values (and their environment variables) take priority
    /// over the file; compiled defaults fill whatever is left.
    pub fn resolve(&self, file: &TomlConfig) -> Result<StartupConfig> {
        if self.library_root.as_os_str().is_empty() {
            return Err(Error::Config("No library path specified.".to_string()));
        }

        let command = CommandConfig {
            album_mode: self.album_mode,
            skip_existing: self.skip_existing,
            tag_mode: self.tag_mode,
            target_loudness: self.target_loudness,
            clip_mode: self.clip_mode,
            quiet: self.quiet,
            concurrency_limit: self
                .concurrency_limit
                .or(file.concurrency_limit)
                .unwrap_or(DEFAULT_CONCURRENCY_LIMIT),
            tool: self
                .tool
                .clone()
                .or_else(|| file.tool.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TOOL)),
        };
        command.validate()?;

        Ok(StartupConfig {
            library_root: self.library_root.clone(),
            command,
        })
    }

    /// Log filter used when RUST_LOG is not set
    pub fn log_directive(&self, file_level: &str) -> String {
        match self.verbose {
            0 => file_level.to_string(),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gainwalk").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["/music"]);
        let startup = cli.resolve(&TomlConfig::default()).unwrap();

        assert_eq!(startup.library_root, PathBuf::from("/music"));
        assert_eq!(startup.command, CommandConfig::default());
    }

    #[test]
    fn test_all_flags() {
        let cli = parse(&[
            "-a", "-S", "-s", "i", "-l", "-23", "-c", "p", "-q", "-r", "4", "/music",
        ]);
        let command = cli.resolve(&TomlConfig::default()).unwrap().command;

        assert!(command.album_mode);
        assert!(command.skip_existing);
        assert_eq!(command.tag_mode, TagMode::Write);
        assert_eq!(command.target_loudness, -23);
        assert_eq!(command.clip_mode, ClipMode::PositiveOnly);
        assert!(command.quiet);
        assert_eq!(command.concurrency_limit, 4);
    }

    #[test]
    fn test_invalid_modes_rejected_by_parser() {
        let args = ["gainwalk", "-s", "x", "/music"];
        assert!(Cli::try_parse_from(args).is_err());

        let args = ["gainwalk", "-c", "z", "/music"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_missing_root_rejected() {
        assert!(Cli::try_parse_from(["gainwalk", "-a"]).is_err());
    }

    #[test]
    fn test_out_of_range_loudness() {
        let cli = parse(&["-l", "-40", "/music"]);
        assert!(matches!(
            cli.resolve(&TomlConfig::default()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_file_values_below_arguments() {
        let file = TomlConfig {
            tool: Some(PathBuf::from("/opt/rsgain")),
            concurrency_limit: Some(8),
            ..Default::default()
        };

        let command = parse(&["/music"]).resolve(&file).unwrap().command;
        assert_eq!(command.tool, PathBuf::from("/opt/rsgain"));
        assert_eq!(command.concurrency_limit, 8);

        let command = parse(&["-r", "2", "--tool", "/usr/bin/rsgain", "/music"])
            .resolve(&file)
            .unwrap()
            .command;
        assert_eq!(command.tool, PathBuf::from("/usr/bin/rsgain"));
        assert_eq!(command.concurrency_limit, 2);
    }

    #[test]
    fn test_log_directive() {
        assert_eq!(parse(&["/music"]).log_directive("warn"), "warn");
        assert_eq!(parse(&["-v", "/music"]).log_directive("warn"), "debug");
        assert_eq!(parse(&["-vv", "/music"]).log_directive("warn"), "trace");
    }
}
