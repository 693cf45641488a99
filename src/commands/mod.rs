//! # CLI Subcommands
//!
//! Contains modules that run the subcommands.

pub mod extract;
pub mod filter;
pub mod stat;
pub mod completions;

use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("Command could not be interpreted")]
    InvalidCommand,
    #[error("Input could not be mapped in strict mode")]
    UnmappableInput,
}

/// Resolve a directory name against what already exists, appending ` (K)`
/// with K counting up from 2 until the name is free.
pub fn unique_dir(parent: &Path, name: &str) -> PathBuf {
    let mut candidate = parent.join(name);
    let mut k = 1;
    while candidate.exists() {
        k += 1;
        candidate = parent.join(format!("{} ({})", name, k));
    }
    candidate
}
