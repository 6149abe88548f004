// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Moments Timeline CLI
//!
//! Command-line shell around the timeline generator: pick a moments
//! directory and an output file, generate, and optionally open the result.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use moments_timeline::config::AppConfig;
use moments_timeline::render::sort_moments;
use moments_timeline::scanner::scan_moments;
use moments_timeline::viewer::open_in_viewer;
use moments_timeline::{generate_timeline, Locale, Moment, Result};

/// Moments Timeline - render exported moment folders as one HTML page
#[derive(Parser, Debug)]
#[command(name = "moments-timeline")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version)]
#[command(about = "Render a directory of moment folders into a static HTML timeline", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "moments.json", global = true)]
    config: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    /// Output format for results
    #[arg(long, global = true, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Suppress non-essential output (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the timeline page
    Generate {
        /// Moments directory (overrides config)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Output HTML file (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Label language
        #[arg(long, value_enum)]
        locale: Option<Locale>,

        /// Open the page once written
        #[arg(long)]
        open: bool,
    },

    /// List the moments that would be rendered, newest first
    Scan {
        /// Moments directory (overrides config)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Maximum number to show in text mode
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Open a generated page in the default viewer
    Preview {
        /// Page to open (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Generate default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "moments.json")]
        output: PathBuf,
    },

    /// Validate configuration file
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load(&cli.config)?;

    match cli.command {
        Some(Commands::Generate { dir, output, locale, open }) => {
            run_generate(config, dir, output, locale, open)
        }
        Some(Commands::Scan { dir, limit }) => run_scan(config, dir, limit, &cli.format),
        Some(Commands::Preview { output }) => {
            let page = output.unwrap_or_else(|| config.output_path());
            open_in_viewer(&page)?;
            info!("Opened {:?}", page);
            Ok(())
        }
        Some(Commands::Config { action }) => run_config_command(config, action, &cli.config),
        None => run_generate(config, None, None, None, false),
    }
}

/// Apply CLI overrides on top of the loaded configuration
fn apply_overrides(
    mut config: AppConfig,
    dir: Option<PathBuf>,
    output: Option<PathBuf>,
    locale: Option<Locale>,
) -> AppConfig {
    if let Some(dir) = dir {
        config.moments_dir = dir.to_string_lossy().into_owned();
    }
    if let Some(output) = output {
        config.output_file = Some(output.to_string_lossy().into_owned());
    }
    if let Some(locale) = locale {
        config.locale = locale;
    }
    config
}

fn run_generate(
    config: AppConfig,
    dir: Option<PathBuf>,
    output: Option<PathBuf>,
    locale: Option<Locale>,
    open: bool,
) -> Result<()> {
    let config = apply_overrides(config, dir, output, locale);
    config.validate()?;

    let root = config.moments_path();
    let output = config.output_path();
    info!("Generating timeline from {:?}", root);

    let written = generate_timeline(&root, &output, &config.labels())?;
    println!("{}", written.display());

    if open || config.open_after_generate {
        // The page is already written; a missing viewer is not fatal.
        if let Err(e) = open_in_viewer(&written) {
            error!("Failed to open {:?}: {}", written, e);
        }
    }
    Ok(())
}

fn run_scan(config: AppConfig, dir: Option<PathBuf>, limit: usize, format: &str) -> Result<()> {
    let config = apply_overrides(config, dir, None, None);
    let mut moments = scan_moments(&config.moments_path(), &config.labels())?;
    sort_moments(&mut moments);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&moments)?);
        return Ok(());
    }

    println!("Found {} moments in {}:", moments.len(), config.moments_dir);
    for moment in moments.iter().take(limit) {
        println!("  {}", describe(moment));
    }
    if moments.len() > limit {
        println!("  ... and {} more", moments.len() - limit);
    }
    Ok(())
}

/// One-line summary of a moment for `scan`
fn describe(moment: &Moment) -> String {
    let mut parts = Vec::new();
    if !moment.text.is_empty() {
        parts.push("text".to_string());
    }
    if !moment.images.is_empty() {
        parts.push(format!("{} images", moment.images.len()));
    }
    if !moment.videos.is_empty() {
        parts.push(format!("{} videos", moment.videos.len()));
    }
    if !moment.url.is_empty() {
        parts.push("link".to_string());
    }
    if moment.text.is_empty() && moment.url.is_empty() && !moment.has_media() {
        parts.push("empty".to_string());
    }

    format!(
        "{}  {}  [{}]  {}",
        moment.timestamp.format("%Y-%m-%d %H:%M"),
        moment.author,
        moment.folder_name,
        parts.join(", ")
    )
}

fn run_config_command(config: AppConfig, action: ConfigCommands, config_path: &Path) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommands::Generate { output } => {
            AppConfig::default().save(&output)?;
            println!("Generated config at {:?}", output);
        }
        ConfigCommands::Validate => {
            config.validate()?;
            println!("Configuration at {:?} is valid", config_path);
            println!("  Moments directory: {}", config.moments_dir);
            println!("  Output file: {}", config.output_path().display());
            println!("  Locale: {}", config.locale);
        }
    }

    Ok(())
}
