//! Test Helper Utilities
//!
//! Shared utilities for testing gainwalk

#![allow(dead_code)]

pub mod library;
pub mod log_capture;
pub mod mock_tool;

pub use library::{build_library, files_of, template_args};
pub use log_capture::{init_test_logging, LogCapture};
pub use mock_tool::MockTool;
