//! mytail - display the last part of a file, optionally following growth.

pub mod config;
pub mod follow;
pub mod orchestrator;
pub mod source;
pub mod tail;

/// Name used as the prefix of error messages.
pub const PROGRAM_NAME: &str = "mytail";
