//! # gainwalk common library
//!
//! Shared code for the gainwalk workspace:
//! - Error types (`Error`, `Result`)
//! - Analysis command configuration and validation
//! - TOML configuration file loading

pub mod config;
pub mod error;

pub use config::{ClipMode, CommandConfig, TagMode};
pub use error::{Error, InvocationFailure, Result};
