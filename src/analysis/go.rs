//! Go language parser using tree-sitter.

use std::path::Path;

use tree_sitter::{Language, Parser};

use crate::analysis::{ParsedFile, SourceParser};

/// Go source parser.
pub struct GoParser {
    language: Language,
}

impl GoParser {
    /// Create a new Go parser.
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    /// Create a new tree-sitter parser for this thread.
    fn create_parser(&self) -> anyhow::Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }
}

impl Default for GoParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for GoParser {
    fn language_id(&self) -> &'static str {
        "go"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["go"]
    }

    fn language(&self) -> &Language {
        &self.language
    }

    fn parse(&self, path: &Path, source: &[u8]) -> anyhow::Result<ParsedFile> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse Go source: {}", path.display()))?;

        Ok(ParsedFile {
            tree,
            source: source.to_vec(),
            path: path.to_string_lossy().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_go_source() {
        let parser = GoParser::new();
        let parsed = parser
            .parse(
                Path::new("main.go"),
                b"package main\n\nfunc main() {\n\tlog.Print(\"ok\")\n}\n",
            )
            .unwrap();

        assert_eq!(parsed.path, "main.go");
        assert_eq!(parsed.tree.root_node().kind(), "source_file");
        assert!(!parsed.tree.root_node().has_error());
    }

    #[test]
    fn test_node_text() {
        let parser = GoParser::new();
        let parsed = parser
            .parse(Path::new("main.go"), b"package demo\n")
            .unwrap();
        let root = parsed.tree.root_node();
        let clause = root.child(0).unwrap();
        assert_eq!(parsed.node_text(clause), "package demo");
    }

    #[test]
    fn test_handles_extension() {
        let parser = GoParser::new();
        assert!(parser.handles_extension("go"));
        assert!(!parser.handles_extension("rs"));
    }
}
