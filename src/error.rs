// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Error types for timeline generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for timeline operations
pub type Result<T> = std::result::Result<T, MomentsError>;

/// Fatal errors surfaced to the caller.
///
/// Per-folder problems (unmatched names, invalid dates, unreadable link or
/// text files) never show up here; the scanner skips or inlines them.
#[derive(Error, Debug)]
pub enum MomentsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Moments directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
