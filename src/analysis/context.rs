//! Analysis context for reading and parsing a set of source files.
//!
//! The AnalysisContext provides:
//! - Extension-based parser lookup
//! - Relative path resolution for diagnostics
//! - Parallel parsing with deterministic ordering

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::analysis::{get_parser, ParsedFile};

/// Analysis context for a set of files.
pub struct AnalysisContext {
    /// Base directory for relative path resolution.
    base_dir: PathBuf,
}

impl AnalysisContext {
    /// Create a new analysis context.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Read and parse a single file.
    ///
    /// The returned file carries a path relative to the base directory
    /// when possible. Unsupported extensions are an error.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<ParsedFile> {
        let path = path.as_ref();
        let abs_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        };

        let ext = abs_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let parser = get_parser(ext)
            .ok_or_else(|| anyhow::anyhow!("no parser for file: {}", abs_path.display()))?;

        let source = fs::read(&abs_path)
            .map_err(|e| anyhow::anyhow!("reading {}: {}", abs_path.display(), e))?;
        let mut parsed = parser.parse(&abs_path, &source)?;

        if parsed.tree.root_node().has_error() {
            debug!(file = %abs_path.display(), "source contains syntax errors");
        }

        parsed.path = self.relative_path(&abs_path);
        Ok(parsed)
    }

    /// Parse multiple files in parallel.
    ///
    /// Files that cannot be read or parsed are logged and skipped.
    /// Results are sorted by path.
    pub fn parse_files_parallel(&self, paths: &[PathBuf]) -> Vec<ParsedFile> {
        let results: Vec<_> = paths.par_iter().map(|p| self.parse_file(p)).collect();

        let mut parsed = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(file) => parsed.push(file),
                Err(e) => {
                    // Log but don't fail - some files may not be parseable
                    warn!("failed to analyze file: {}", e);
                }
            }
        }

        // Sort by path for deterministic ordering
        parsed.sort_by(|a, b| a.path.cmp(&b.path));
        parsed
    }

    fn relative_path(&self, abs_path: &Path) -> String {
        abs_path
            .strip_prefix(&self.base_dir)
            .ok()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(abs_path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}
