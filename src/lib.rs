// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Moments Timeline: static HTML timelines from exported moment folders
//!
//! Each folder under the moments root is named `<author>_<YYYY-MM-DD-HHMM>`
//! and may hold `text.txt`, `url.txt`, `img_*.jpg`/`img_*.png` images and
//! `.mp4`/`.mov`/`.avi` videos. [`generate_timeline`] scans such a root and
//! writes one self-contained page, newest moment first.

pub mod config;
pub mod error;
pub mod moment;
pub mod render;
pub mod scanner;
pub mod timeline;
pub mod viewer;

pub use config::{AppConfig, Labels, Locale};
pub use error::{MomentsError, Result};
pub use moment::Moment;
pub use timeline::generate_timeline;
