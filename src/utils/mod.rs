//! Shared utilities: locating the tool.

pub mod binary;

pub use binary::{resolve_tool, validate_binary, BinaryError};
