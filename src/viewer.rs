// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Open a generated page with the platform's default viewer

use std::path::Path;
use std::process::Command;

use crate::{MomentsError, Result};

/// Launch the default viewer for `path` without waiting for it.
///
/// Fails if the page does not exist.
pub fn open_in_viewer(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(MomentsError::FileSystem(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("page not found: {}", path.display()),
        )));
    }

    viewer_command(path).spawn()?;
    Ok(())
}

fn viewer_command(path: &Path) -> Command {
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    }
    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/c", "start", ""]).arg(path);
        cmd
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}
