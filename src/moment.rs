// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Moment records and folder-name parsing
//!
//! A moment folder is named `<author>_<YYYY-MM-DD-HHMM>`, where the author
//! part may carry parenthesized annotations such as `Alice(work)`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::LazyLock;

static TIMESTAMP_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_([0-9]{4})-([0-9]{2})-([0-9]{2})-([0-9]{4})$").unwrap_or_else(|e| {
        panic!("timestamp suffix regex must compile: {e}")
    })
});

static AUTHOR_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+)_[0-9]{4}-[0-9]{2}-[0-9]{2}-[0-9]{4}$").unwrap_or_else(|e| {
        panic!("author prefix regex must compile: {e}")
    })
});

static PARENTHESIZED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\([^)]*\)").unwrap_or_else(|e| panic!("parenthesis regex must compile: {e}"))
});

/// One parsed moment folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Moment {
    /// Raw folder name, kept for diagnostics and tie-breaking
    pub folder_name: String,
    pub author: String,
    /// Minute precision, taken from the folder name
    pub timestamp: NaiveDateTime,
    /// Trimmed `text.txt`, or an inline error placeholder
    pub text: String,
    /// Trimmed `url.txt`; empty when absent or unreadable
    pub url: String,
    pub images: Vec<PathBuf>,
    pub videos: Vec<PathBuf>,
}

impl Moment {
    /// Moment without any content, as produced for an empty folder
    pub fn new(folder_name: impl Into<String>, author: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            folder_name: folder_name.into(),
            author: author.into(),
            timestamp,
            text: String::new(),
            url: String::new(),
            images: Vec::new(),
            videos: Vec::new(),
        }
    }

    pub fn has_media(&self) -> bool {
        !self.images.is_empty() || !self.videos.is_empty()
    }
}

/// True when the name ends with `_YYYY-MM-DD-HHMM`, valid date or not
pub fn has_timestamp_suffix(folder_name: &str) -> bool {
    TIMESTAMP_SUFFIX.is_match(folder_name)
}

/// Timestamp encoded in the folder name suffix.
///
/// Returns `None` when the suffix is missing or names an impossible
/// date/time (`2024-02-30-1200`, `2024-01-01-2460`).
pub fn extract_timestamp(folder_name: &str) -> Option<NaiveDateTime> {
    let caps = TIMESTAMP_SUFFIX.captures(folder_name)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    let hhmm: u32 = caps[4].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hhmm / 100, hhmm % 100, 0)?;
    Some(NaiveDateTime::new(date, time))
}

/// Author name from the folder name prefix.
///
/// Parenthesized spans are dropped and the rest trimmed. Falls back to
/// `unknown` when there is no prefix or nothing remains after cleaning.
pub fn extract_author(folder_name: &str, unknown: &str) -> String {
    let Some(caps) = AUTHOR_PREFIX.captures(folder_name) else {
        return unknown.to_string();
    };

    let cleaned = PARENTHESIZED.replace_all(&caps[1], "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        unknown.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Author and timestamp of a qualifying folder name
pub fn parse_folder_name(folder_name: &str, unknown: &str) -> Option<(String, NaiveDateTime)> {
    let timestamp = extract_timestamp(folder_name)?;
    Some((extract_author(folder_name, unknown), timestamp))
}
