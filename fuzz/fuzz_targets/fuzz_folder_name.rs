// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

#![no_main]

use libfuzzer_sys::fuzz_target;
use moments_timeline::moment::{extract_author, has_timestamp_suffix, parse_folder_name};
use moments_timeline::render::escape_html;

fuzz_target!(|name: &str| {
    let parsed = parse_folder_name(name, "?");
    if parsed.is_some() {
        assert!(has_timestamp_suffix(name));
    }

    let author = extract_author(name, "?");
    assert!(!author.is_empty());
    assert_eq!(author, author.trim());

    let escaped = escape_html(name);
    assert!(!escaped.contains('<') && !escaped.contains('"'));
});
