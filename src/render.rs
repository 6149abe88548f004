// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Timeline renderer
//!
//! Pure functions from a set of [`Moment`]s to one self-contained HTML
//! document. Nothing in here touches the filesystem; media files are only
//! referenced by paths relative to the moments root.

use std::cmp::Ordering;
use std::path::Path;

use crate::config::Labels;
use crate::moment::Moment;

/// Newest first; equal timestamps fall back to folder name ascending
pub fn compare_moments(a: &Moment, b: &Moment) -> Ordering {
    b.timestamp
        .cmp(&a.timestamp)
        .then_with(|| a.folder_name.cmp(&b.folder_name))
}

/// Sort moments in timeline order
pub fn sort_moments(moments: &mut [Moment]) {
    moments.sort_by(compare_moments);
}

/// Escape text for use in element content and quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `path` relative to `root`, `/`-separated; unrelated paths are kept as is
pub fn relative_media_path(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

fn video_mime(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        _ => "video/mp4",
    }
}

/// Render the whole timeline page.
///
/// `moments` may be in any order. The title names the author of the
/// newest moment only.
pub fn render_timeline(moments: &[Moment], root: &Path, labels: &Labels) -> String {
    let mut ordered: Vec<&Moment> = moments.iter().collect();
    ordered.sort_by(|a, b| compare_moments(a, b));

    let title = labels.title(ordered.first().map(|m| m.author.as_str()));

    let content: String = ordered
        .iter()
        .map(|m| render_moment(m, root, labels))
        .collect();

    base_template(labels.lang, &title, &content)
}

fn base_template(lang: &str, title: &str, content: &str) -> String {
    let title = escape_html(title);
    format!(r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        :root {{
            --bg-page: #f8f9fa;
            --bg-card: #ffffff;
            --text-primary: #333333;
            --text-heading: #2c3e50;
            --accent: #3498db;
            --accent-hover: #2980b9;
            --author: #e74c3c;
            --rail: #27ae60;
            --border: #dddddd;
        }}
        * {{ box-sizing: border-box; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "PingFang SC", "Hiragino Sans GB", "Microsoft YaHei", "Segoe UI", sans-serif;
            line-height: 1.6;
            color: var(--text-primary);
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            background: var(--bg-page);
        }}
        .container {{
            background: var(--bg-card);
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }}
        h1 {{
            color: var(--text-heading);
            text-align: center;
            border-bottom: 3px solid var(--accent);
            padding-bottom: 15px;
            margin-bottom: 30px;
        }}
        .moment {{
            margin-bottom: 30px;
            padding: 20px;
            border-left: 4px solid var(--rail);
            background: var(--bg-page);
            border-radius: 0 8px 8px 0;
        }}
        .moment-header {{ margin-bottom: 15px; }}
        .moment-date {{
            font-size: 1.2em;
            font-weight: bold;
            color: var(--text-heading);
            margin-bottom: 5px;
        }}
        .moment-user {{
            color: var(--author);
            font-weight: bold;
        }}
        .moment-content {{
            margin: 15px 0;
            line-height: 1.8;
            white-space: pre-wrap;
            word-wrap: break-word;
        }}
        .moment-images, .moment-videos {{ margin-top: 15px; }}
        .moment-images img {{
            width: 180px;
            height: 180px;
            object-fit: cover;
            margin: 5px;
            border: 1px solid var(--border);
            border-radius: 4px;
            box-shadow: 0 2px 5px rgba(0,0,0,0.1);
        }}
        .moment-videos video {{
            width: 300px;
            height: auto;
            margin: 5px;
            border: 1px solid var(--border);
            border-radius: 4px;
            box-shadow: 0 2px 5px rgba(0,0,0,0.1);
        }}
        .moment-link {{
            margin-top: 15px;
            padding: 12px;
            background: #e8f4fd;
            border: 1px solid var(--accent);
            border-radius: 6px;
        }}
        .moment-link a {{
            color: var(--accent);
            text-decoration: none;
            font-weight: 500;
            word-break: break-all;
        }}
        .moment-link a:hover {{
            color: var(--accent-hover);
            text-decoration: underline;
        }}
    </style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>
{content}    </div>
</body>
</html>
"#)
}

fn render_moment(moment: &Moment, root: &Path, labels: &Labels) -> String {
    let date = moment.timestamp.format(labels.date_format).to_string();

    let mut html = format!(r#"        <div class="moment">
            <div class="moment-header">
                <div class="moment-date">{}</div>
                <div class="moment-user">{}</div>
            </div>
"#, escape_html(&date), escape_html(&moment.author));

    if !moment.text.is_empty() {
        html.push_str(&format!(
            "            <div class=\"moment-content\">{}</div>\n",
            escape_html(&moment.text)
        ));
    }

    if !moment.images.is_empty() {
        html.push_str("            <div class=\"moment-images\">\n");
        for (i, image) in moment.images.iter().enumerate() {
            let caption = escape_html(&labels.image_caption(i + 1));
            html.push_str(&format!(
                "                <img src=\"{}\" alt=\"{caption}\" title=\"{caption}\" loading=\"lazy\">\n",
                escape_html(&relative_media_path(image, root))
            ));
        }
        html.push_str("            </div>\n");
    }

    if !moment.videos.is_empty() {
        html.push_str("            <div class=\"moment-videos\">\n");
        for video in &moment.videos {
            html.push_str(&format!(r#"                <video controls preload="metadata">
                    <source src="{}" type="{}">
                    {}
                </video>
"#,
                escape_html(&relative_media_path(video, root)),
                video_mime(video),
                escape_html(labels.video_fallback),
            ));
        }
        html.push_str("            </div>\n");
    }

    if !moment.url.is_empty() {
        let url = escape_html(&moment.url);
        html.push_str(&format!(r#"            <div class="moment-link">
                <a href="{url}" target="_blank" rel="noopener noreferrer">{url}</a>
            </div>
"#));
    }

    html.push_str("        </div>\n");
    html
}
