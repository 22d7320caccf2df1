//! Command-line interface for linterlog.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{self, FileConfig, DEFAULT_CONFIG_TEMPLATE};
use crate::lint::Runner;
use crate::logging;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &["vendor", "node_modules", "testdata"];

/// Lint log messages in Go source code.
///
/// Checks the first argument of logging calls (log.Print, slog.Info,
/// logger.Errorf and friends) for style and safety problems: capitalized
/// messages, special symbols or emojis, non-english text, and mentions of
/// sensitive data.
#[derive(Parser)]
#[command(name = "linterlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lint log messages in a file or directory
    #[command(visible_alias = "check")]
    Lint(LintArgs),
    /// Write a configuration file with every rule enabled
    Init(InitArgs),
}

/// Arguments for the lint command.
#[derive(Parser)]
pub struct LintArgs {
    /// Path to check (file or directory)
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty, json, or sarif
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Also lint _test.go files
    #[arg(long)]
    pub tests: bool,

    /// Show suppressed diagnostics in output
    #[arg(long)]
    pub show_suppressed: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = ".linterlog.yml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Collect Go files under `root`.
pub fn collect_files(root: &Path, config: &FileConfig, include_tests: bool) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && !SKIPPED_DIRS.contains(&&*name)
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("go") {
            continue;
        }

        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if !include_tests && name.ends_with("_test.go") {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if config.is_path_excluded(relative) {
            tracing::debug!(file = %relative.display(), "excluded by config");
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Run the lint command.
pub fn run_lint(args: &LintArgs) -> anyhow::Result<i32> {
    logging::init(args.verbose);

    // Validate format
    if args.format != "pretty" && args.format != "json" && args.format != "sarif" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty', 'json', or 'sarif'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    // Resolve path
    let abs_path = match args.path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let is_dir = abs_path.is_dir();
    let base_dir = if is_dir {
        abs_path.clone()
    } else {
        abs_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| abs_path.clone())
    };

    // Look for a config next to the sources first, then in the working directory
    let config_path = args
        .config
        .clone()
        .or_else(|| config::discover(&base_dir))
        .or_else(|| std::env::current_dir().ok().and_then(|d| config::discover(&d)));

    let (file_config, config_path) = match config::load(config_path.as_deref(), &base_dir) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    // Collect files to scan
    let include_tests = args.tests || file_config.should_include_tests();
    let files = if is_dir {
        collect_files(&abs_path, &file_config, include_tests)?
    } else {
        vec![abs_path.clone()]
    };

    if files.is_empty() {
        eprintln!("Warning: no files to scan");
        return Ok(EXIT_SUCCESS);
    }
    tracing::debug!(count = files.len(), root = %base_dir.display(), "collected files");

    let runner = Runner::new(&base_dir, file_config.rules);
    let result = runner.run(&files)?;

    let config_path_str = config_path.map(|p| p.to_string_lossy().to_string());
    let path_str = args.path.to_string_lossy().to_string();

    match args.format.as_str() {
        "json" => report::write_json(&path_str, config_path_str.as_deref(), &result)?,
        "sarif" => report::write_sarif(&result)?,
        _ => report::write_pretty(
            &path_str,
            config_path_str.as_deref(),
            &result,
            args.show_suppressed,
        ),
    }

    if result.has_diagnostics() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() && !args.force {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Use --force to overwrite it or --output to choose another path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, DEFAULT_CONFIG_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Switch off the rules you don't need in {}", args.output.display());
    println!("  2. Run: linterlog lint . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}
