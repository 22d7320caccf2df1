//! Tree-sitter backed source parsing.
//!
//! This module is the syntax-tree provider for the lint pass:
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ Source Files    │────▶│ SourceParser │────▶│ ParsedFile    │
//! └─────────────────┘     │ (Go)         │     │ (tree, source)│
//!                         └──────────────┘     └───────────────┘
//!                                                      │
//!                                                      ▼
//!                                              ┌───────────────┐
//!                                              │ lint pass     │
//!                                              └───────────────┘
//! ```

mod context;
mod facts;
mod go;
mod traits;

pub use context::AnalysisContext;
pub use facts::Position;
pub use go::GoParser;
pub use traits::{ParsedFile, SourceParser};

use once_cell::sync::OnceCell;

/// Static storage for the Go parser.
static GO_PARSER: OnceCell<GoParser> = OnceCell::new();

/// Get the Go parser, creating it on first use.
pub fn go_parser() -> &'static GoParser {
    GO_PARSER.get_or_init(GoParser::new)
}

/// Get a parser for the given file extension (without dot).
///
/// Returns None if no parser handles the extension.
pub fn get_parser(ext: &str) -> Option<&'static dyn SourceParser> {
    let go = go_parser();
    if go.handles_extension(ext) {
        return Some(go as &'static dyn SourceParser);
    }
    None
}
