// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Folder scanner: turns a moments directory into [`Moment`] records

use glob::Pattern;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};

use crate::config::Labels;
use crate::moment::{has_timestamp_suffix, parse_folder_name, Moment};
use crate::{MomentsError, Result};

/// Text body of a moment
pub const TEXT_FILE: &str = "text.txt";
/// Shared link of a moment
pub const URL_FILE: &str = "url.txt";

const IMAGE_PATTERNS: &[&str] = &["img_*.jpg", "img_*.png"];
const VIDEO_PATTERNS: &[&str] = &["*.mp4", "*.mov", "*.avi"];

static IMAGE_GLOBS: LazyLock<Vec<Pattern>> = LazyLock::new(|| compile_patterns(IMAGE_PATTERNS));
static VIDEO_GLOBS: LazyLock<Vec<Pattern>> = LazyLock::new(|| compile_patterns(VIDEO_PATTERNS));

fn compile_patterns(patterns: &[&str]) -> Vec<Pattern> {
    patterns.iter().filter_map(|p| Pattern::new(p).ok()).collect()
}

fn matches_any(patterns: &[Pattern], name: &str) -> bool {
    patterns.iter().any(|p| p.matches(name))
}

/// Whether a file name is picked up as a moment image
pub fn is_image_name(name: &str) -> bool {
    matches_any(&IMAGE_GLOBS, name)
}

/// Whether a file name is picked up as a moment video
pub fn is_video_name(name: &str) -> bool {
    matches_any(&VIDEO_GLOBS, name)
}

/// Resolve the moments root, failing if it is missing or not a directory
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    let resolved = fs::canonicalize(root).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => MomentsError::DirectoryNotFound(root.to_path_buf()),
        _ => MomentsError::FileSystem(e),
    })?;

    if !resolved.is_dir() {
        return Err(MomentsError::NotADirectory(root.to_path_buf()));
    }
    Ok(resolved)
}

/// Scan the immediate children of `root` for moment folders.
///
/// Entries that are not directories, whose name lacks a
/// `_YYYY-MM-DD-HHMM` suffix, or whose date is invalid are skipped. The
/// result is in directory order; callers sort it.
pub fn scan_moments(root: &Path, labels: &Labels) -> Result<Vec<Moment>> {
    let root = resolve_root(root)?;
    scan_resolved_root(&root, labels)
}

/// [`scan_moments`] over a root already passed through [`resolve_root`]
pub(crate) fn scan_resolved_root(root: &Path, labels: &Labels) -> Result<Vec<Moment>> {
    let mut moments = Vec::new();

    for entry in fs::read_dir(root)?.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let Some(folder_name) = entry.file_name().to_str().map(str::to_string) else {
            debug!("Skipping non UTF-8 folder name: {:?}", entry.file_name());
            continue;
        };

        if !has_timestamp_suffix(&folder_name) {
            debug!("Skipping {}: no timestamp suffix", folder_name);
            continue;
        }

        let Some((author, timestamp)) = parse_folder_name(&folder_name, labels.unknown_author) else {
            debug!("Skipping {}: invalid date", folder_name);
            continue;
        };

        moments.push(load_moment(&path, folder_name, author, timestamp, labels));
    }

    info!("Found {} moments in {:?}", moments.len(), root);
    Ok(moments)
}

/// Load the content of one moment folder
pub fn load_moment(
    folder: &Path,
    folder_name: String,
    author: String,
    timestamp: chrono::NaiveDateTime,
    labels: &Labels,
) -> Moment {
    let (images, videos) = list_media(folder);

    Moment {
        text: read_text(&folder.join(TEXT_FILE), labels),
        url: read_url(&folder.join(URL_FILE)),
        images,
        videos,
        ..Moment::new(folder_name, author, timestamp)
    }
}

/// Trimmed text body; a read failure becomes a visible placeholder
fn read_text(path: &Path, labels: &Labels) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text.trim().to_string(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            labels.read_error(&e.to_string())
        }
    }
}

/// Trimmed link; any read failure yields an empty link
fn read_url(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(url) => url.trim().to_string(),
        Err(e) => {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("Ignoring unreadable link file {:?}: {}", path, e);
            }
            String::new()
        }
    }
}

/// Image and video paths directly inside `folder`, sorted by name
fn list_media(folder: &Path) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to list {:?}: {}", folder, e);
            return (Vec::new(), Vec::new());
        }
    };

    let mut names = Vec::new();
    for entry in entries.flatten() {
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => debug!("Skipping non UTF-8 file name in {:?}: {:?}", folder, name),
        }
    }
    names.sort();

    let mut images = Vec::new();
    let mut videos = Vec::new();
    for name in names {
        if is_image_name(&name) {
            images.push(folder.join(&name));
        }
        if is_video_name(&name) {
            videos.push(folder.join(&name));
        }
    }
    (images, videos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn moment_dir(root: &Path, name: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir(&dir).unwrap();
        dir
    }

    #[test]
    fn test_media_name_matching() {
        assert!(is_image_name("img_1.jpg"));
        assert!(is_image_name("img_cat.png"));
        assert!(!is_image_name("img_1.JPG"));
        assert!(!is_image_name("photo.jpg"));
        assert!(!is_image_name("img_1.jpeg"));
        assert!(!is_image_name("img_1.jpg.txt"));

        assert!(is_video_name("clip.mp4"));
        assert!(is_video_name("clip.mov"));
        assert!(is_video_name("clip.avi"));
        assert!(!is_video_name("clip.MP4"));
        assert!(!is_video_name("clip.mkv"));
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = scan_moments(&missing, &Labels::default()).unwrap_err();
        assert!(matches!(err, MomentsError::DirectoryNotFound(p) if p == missing));
    }

    #[test]
    fn test_root_is_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            scan_moments(&file, &Labels::default()),
            Err(MomentsError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_scan_filters_entries() {
        let dir = TempDir::new().unwrap();
        moment_dir(dir.path(), "Bob_2024-03-05-1530");
        moment_dir(dir.path(), "Bob_2024-02-30-1200");
        moment_dir(dir.path(), "random folder");
        fs::write(dir.path().join("Eve_2024-03-05-1530"), "a file, not a folder").unwrap();

        let moments = scan_moments(dir.path(), &Labels::default()).unwrap();
        assert_eq!(moments.len(), 1);
        assert_eq!(moments[0].folder_name, "Bob_2024-03-05-1530");
        assert_eq!(moments[0].author, "Bob");
    }

    #[test]
    fn test_scanned_fields_match_folder_name() {
        let dir = TempDir::new().unwrap();
        let name = "Carol (family)_2023-12-31-2359";
        moment_dir(dir.path(), name);

        let moments = scan_moments(dir.path(), &Labels::default()).unwrap();
        let (author, timestamp) = parse_folder_name(name, Labels::default().unknown_author).unwrap();
        assert_eq!(moments[0].author, author);
        assert_eq!(moments[0].timestamp, timestamp);
        assert_eq!(author, "Carol");
    }

    #[test]
    fn test_scan_resolved_root_matches_scan_moments() {
        let dir = TempDir::new().unwrap();
        let root = resolve_root(dir.path()).unwrap();
        moment_dir(&root, "Bob_2024-03-05-1530");
        fs::write(root.join("Bob_2024-03-05-1530").join("img_1.jpg"), b"").unwrap();

        let moments = scan_resolved_root(&root, &Labels::default()).unwrap();
        assert_eq!(moments, scan_moments(dir.path(), &Labels::default()).unwrap());
        assert!(moments[0].images[0].starts_with(&root));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_media_name_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let folder = moment_dir(dir.path(), "Bob_2024-03-05-1530");
        fs::write(folder.join("img_1.jpg"), b"").unwrap();
        if fs::write(folder.join(OsStr::from_bytes(b"img_\xFF.jpg")), b"").is_err() {
            // Filesystem refuses non UTF-8 names
            return;
        }

        let moments = scan_moments(dir.path(), &Labels::default()).unwrap();
        assert_eq!(moments[0].images.len(), 1);
        assert!(moments[0].images[0].ends_with("img_1.jpg"));
    }

    #[test]
    fn test_empty_root() {
        let dir = TempDir::new().unwrap();
        assert!(scan_moments(dir.path(), &Labels::default()).unwrap().is_empty());
    }

    #[test]
    fn test_load_content() {
        let dir = TempDir::new().unwrap();
        let folder = moment_dir(dir.path(), "Alice(work)_2024-01-01-0930");
        fs::write(folder.join(TEXT_FILE), "\n  Hello\nworld  \n").unwrap();
        fs::write(folder.join(URL_FILE), " https://example.com \n").unwrap();
        fs::write(folder.join("img_2.png"), b"").unwrap();
        fs::write(folder.join("img_1.jpg"), b"").unwrap();
        fs::write(folder.join("cover.jpg"), b"").unwrap();
        fs::write(folder.join("clip.mov"), b"").unwrap();

        let moments = scan_moments(dir.path(), &Labels::default()).unwrap();
        let moment = &moments[0];
        let root = fs::canonicalize(dir.path()).unwrap();
        let folder = root.join("Alice(work)_2024-01-01-0930");

        assert_eq!(moment.author, "Alice");
        assert_eq!(moment.text, "Hello\nworld");
        assert_eq!(moment.url, "https://example.com");
        assert_eq!(moment.images, vec![folder.join("img_1.jpg"), folder.join("img_2.png")]);
        assert_eq!(moment.videos, vec![folder.join("clip.mov")]);
        assert!(moment.images.iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn test_missing_content_files() {
        let dir = TempDir::new().unwrap();
        moment_dir(dir.path(), "Bob_2024-03-05-1530");
        let moments = scan_moments(dir.path(), &Labels::default()).unwrap();
        assert_eq!(moments[0].text, "");
        assert_eq!(moments[0].url, "");
        assert!(!moments[0].has_media());
    }

    #[test]
    fn test_unreadable_text_becomes_placeholder() {
        let dir = TempDir::new().unwrap();
        let folder = moment_dir(dir.path(), "Bob_2024-03-05-1530");
        fs::write(folder.join(TEXT_FILE), b"\xff\xfe\x00\x80").unwrap();
        fs::write(folder.join(URL_FILE), b"\xff\xfe").unwrap();

        let moments = scan_moments(dir.path(), &Labels::default()).unwrap();
        assert!(moments[0].text.starts_with("[Failed to read text: "));
        assert_eq!(moments[0].url, "");
    }

    #[test]
    fn test_unknown_author_uses_locale_sentinel() {
        let dir = TempDir::new().unwrap();
        moment_dir(dir.path(), "(note)_2024-03-05-1530");
        let labels = Labels::for_locale(crate::config::Locale::ZhCn);
        let moments = scan_moments(dir.path(), &labels).unwrap();
        assert_eq!(moments[0].author, "未知用户");
    }

    #[test]
    fn test_scan_leaves_tree_untouched() {
        let dir = TempDir::new().unwrap();
        let folder = moment_dir(dir.path(), "Bob_2024-03-05-1530");
        fs::write(folder.join(TEXT_FILE), "Hello").unwrap();

        scan_moments(dir.path(), &Labels::default()).unwrap();
        let mut names: Vec<_> = fs::read_dir(&folder)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        names.sort();
        assert_eq!(names, vec![std::ffi::OsString::from(TEXT_FILE)]);
    }
}
