// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Configuration management for the timeline generator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// File name used when no explicit output path is configured
pub const DEFAULT_OUTPUT_NAME: &str = "moments_timeline.html";

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Root directory holding one folder per moment
    #[serde(default = "default_moments_dir")]
    pub moments_dir: String,

    /// Output HTML file; `None` writes into the moments directory
    #[serde(default)]
    pub output_file: Option<String>,

    /// Label preset used for every fixed string on the page
    #[serde(default)]
    pub locale: Locale,

    /// Open the page in the system viewer after generating it
    #[serde(default)]
    pub open_after_generate: bool,
}

fn default_moments_dir() -> String { "./moments".to_string() }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            moments_dir: default_moments_dir(),
            output_file: None,
            locale: Locale::default(),
            open_after_generate: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| crate::MomentsError::Config(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values that would make generation meaningless
    pub fn validate(&self) -> crate::Result<()> {
        if self.moments_dir.trim().is_empty() {
            return Err(crate::MomentsError::Config("moments_dir must not be empty".to_string()));
        }
        if matches!(self.output_file.as_deref(), Some(f) if f.trim().is_empty()) {
            return Err(crate::MomentsError::Config("output_file must not be empty when set".to_string()));
        }
        Ok(())
    }

    /// Root directory as a path
    pub fn moments_path(&self) -> PathBuf {
        PathBuf::from(&self.moments_dir)
    }

    /// Resolved output path
    pub fn output_path(&self) -> PathBuf {
        match &self.output_file {
            Some(file) => PathBuf::from(file),
            None => self.moments_path().join(DEFAULT_OUTPUT_NAME),
        }
    }

    pub fn labels(&self) -> Labels {
        Labels::for_locale(self.locale)
    }
}

/// Label presets
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    #[value(name = "en")]
    En,
    #[serde(rename = "zh-CN", alias = "zh")]
    #[value(name = "zh-CN", alias = "zh")]
    ZhCn,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhCn => "zh-CN",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed human-visible strings of the generated page.
///
/// Every string here is trusted; user data is escaped by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Value of the `<html lang>` attribute
    pub lang: &'static str,
    /// Author used when a folder name has no recognizable prefix
    pub unknown_author: &'static str,
    /// Appended to the newest author to form the page title
    pub title_suffix: &'static str,
    /// Title of an empty timeline
    pub fallback_title: &'static str,
    /// chrono format string for the date label of each moment
    pub date_format: &'static str,
    /// Followed by the 1-based image position
    pub image_caption_prefix: &'static str,
    /// Shown by browsers that cannot play a video
    pub video_fallback: &'static str,
    /// Prefix of the inline placeholder for an unreadable text file
    pub read_error_prefix: &'static str,
}

impl Labels {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self {
                lang: "en",
                unknown_author: "Unknown user",
                title_suffix: "'s moments",
                fallback_title: "Moments timeline",
                date_format: "%B %-d, %Y %H:%M",
                image_caption_prefix: "Image ",
                video_fallback: "Your browser does not support video playback.",
                read_error_prefix: "Failed to read text",
            },
            Locale::ZhCn => Self {
                lang: "zh-CN",
                unknown_author: "未知用户",
                title_suffix: "朋友圈",
                fallback_title: "朋友圈时间线",
                date_format: "%Y年%m月%d日 %H:%M",
                image_caption_prefix: "图片",
                video_fallback: "您的浏览器不支持视频播放。",
                read_error_prefix: "读取文本出错",
            },
        }
    }

    /// Page title derived from the newest moment's author
    pub fn title(&self, newest_author: Option<&str>) -> String {
        match newest_author {
            Some(author) => format!("{}{}", author, self.title_suffix),
            None => self.fallback_title.to_string(),
        }
    }

    /// Caption for the image at 1-based `position`
    pub fn image_caption(&self, position: usize) -> String {
        format!("{}{}", self.image_caption_prefix, position)
    }

    /// Inline placeholder replacing an unreadable text file
    pub fn read_error(&self, detail: &str) -> String {
        format!("[{}: {}]", self.read_error_prefix, detail)
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_write_into_moments_dir() {
        let config = AppConfig::default();
        assert_eq!(config.output_path(), PathBuf::from("./moments").join(DEFAULT_OUTPUT_NAME));
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"locale": "zh-CN"}"#).unwrap();
        assert_eq!(config.moments_dir, "./moments");
        assert_eq!(config.locale, Locale::ZhCn);
        assert!(!config.open_after_generate);
    }

    #[test]
    fn test_explicit_output_file() {
        let config = AppConfig {
            output_file: Some("/tmp/out.html".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(config.output_path(), PathBuf::from("/tmp/out.html"));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let config = AppConfig::load(Path::new("/nonexistent/moments.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("moments.json");
        let config = AppConfig {
            moments_dir: "/data/moments".to_string(),
            locale: Locale::ZhCn,
            ..AppConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("moments.json");
        std::fs::write(&path, r#"{"moments_dir": "  "}"#).unwrap();
        assert!(matches!(AppConfig::load(&path), Err(crate::MomentsError::Config(_))));

        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(crate::MomentsError::Config(_))));
    }

    #[test]
    fn test_locale_value_names_match_serde() {
        use clap::ValueEnum;

        for locale in Locale::value_variants() {
            let name = locale.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(name, locale.as_str());
            assert_eq!(serde_json::to_string(locale).unwrap(), format!("\"{}\"", name));
        }
        assert_eq!(Locale::from_str("zh", false).unwrap(), Locale::ZhCn);
        assert!(Locale::from_str("fr", false).is_err());
    }

    #[test]
    fn test_labels() {
        let en = Labels::for_locale(Locale::En);
        assert_eq!(en.title(Some("Bob")), "Bob's moments");
        assert_eq!(en.title(None), "Moments timeline");
        assert_eq!(en.image_caption(3), "Image 3");
        assert_eq!(en.read_error("denied"), "[Failed to read text: denied]");

        let zh = Labels::for_locale(Locale::ZhCn);
        assert_eq!(zh.title(Some("小明")), "小明朋友圈");
        assert_eq!(zh.image_caption(1), "图片1");
    }
}
