// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Generation entry point: scan, render, write

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::Builder;
use tracing::info;

use crate::config::Labels;
use crate::render::render_timeline;
use crate::scanner::{resolve_root, scan_resolved_root};
use crate::{MomentsError, Result};

/// Generate the timeline page for `root` into `output`.
///
/// Returns the path written. Fails without touching `output` when the root
/// is missing or the page cannot be written.
pub fn generate_timeline(root: &Path, output: &Path, labels: &Labels) -> Result<PathBuf> {
    let root = resolve_root(root)?;
    let moments = scan_resolved_root(&root, labels)?;

    let html = render_timeline(&moments, &root, labels);
    write_atomic(output, html.as_bytes())?;

    info!("Wrote {} moments to {:?}", moments.len(), output);
    Ok(output.to_path_buf())
}

/// Replace `path` with `contents` in one step.
///
/// The data goes to a temporary file next to `path` first, so a failed
/// write never leaves a truncated page behind. An existing target keeps its
/// permissions; a new one gets 0644 minus the umask.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let write_err = |source: std::io::Error| MomentsError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }
    let mut tmp = builder.tempfile_in(parent).map_err(write_err)?;

    if let Ok(existing) = fs::metadata(path) {
        if existing.is_file() {
            tmp.as_file().set_permissions(existing.permissions()).map_err(write_err)?;
        }
    }

    tmp.write_all(contents).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
