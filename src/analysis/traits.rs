//! Core traits for source parsing.

use std::path::Path;

/// Holds a parsed tree-sitter tree and associated metadata.
///
/// This is the unit the analyzer pass works on: the tree is walked for
/// call expressions and the source is kept for node text extraction.
pub struct ParsedFile {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// The original source code (kept for node text extraction).
    pub source: Vec<u8>,
    /// The file path used in diagnostics.
    pub path: String,
}

impl ParsedFile {
    /// Get the source code as a string slice.
    pub fn source_str(&self) -> &str {
        std::str::from_utf8(&self.source).unwrap_or("")
    }

    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: tree_sitter::Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }
}

/// Language-specific parser trait.
///
/// Implementations turn raw source into a [`ParsedFile`]. Only Go is
/// provided, but the lint pass only depends on this seam.
///
/// # Thread Safety
///
/// tree_sitter::Parser is not Sync, so implementations create a parser
/// per call.
pub trait SourceParser: Send + Sync {
    /// Returns the language identifier (e.g., "go").
    fn language_id(&self) -> &'static str;

    /// Returns file extensions this parser handles (without dot).
    fn file_extensions(&self) -> &'static [&'static str];

    /// The tree-sitter language, used to compile queries against its trees.
    fn language(&self) -> &tree_sitter::Language;

    /// Parse a source file into a tree-sitter tree.
    ///
    /// Partial parse errors are still returned as a valid tree with ERROR nodes.
    fn parse(&self, path: &Path, source: &[u8]) -> anyhow::Result<ParsedFile>;

    /// Check if this parser handles the given file extension.
    fn handles_extension(&self, ext: &str) -> bool {
        self.file_extensions().contains(&ext)
    }
}
