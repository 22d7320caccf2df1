//! Source positions derived from the syntax tree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in a source file.
///
/// Lines and columns follow the Go toolchain convention: both are
/// 1-indexed and the column counts bytes, not characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line (1-indexed).
    pub line: usize,
    /// Column in bytes (1-indexed).
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Start position of a tree-sitter node.
    pub fn from_node(node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        Self {
            line: start.row + 1, // tree-sitter is 0-indexed
            column: start.column + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Position::new(12, 5).to_string(), "12:5");
    }

    #[test]
    fn test_ordering_is_line_then_column() {
        let a = Position::new(3, 40);
        let b = Position::new(4, 1);
        assert!(a < b);
        assert!(Position::new(4, 2) > b);
    }
}
